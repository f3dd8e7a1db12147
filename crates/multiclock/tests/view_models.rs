// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! View models and the tick pipeline driven by the system clock.

use jiff::Timestamp;
use multiclock::{
    ChimePlayer, ChimeRequest, Clock, ClockViewModel, Dashboard, DayPeriod, DisplayFormats, Error, Presenter, Settings, TimeSource,
    TimezoneSpec, build,
};

fn zones() -> Vec<TimezoneSpec> {
    vec![
        TimezoneSpec::new("Tokyo", "Asia/Tokyo"),
        TimezoneSpec::new("UTC", "UTC"),
        TimezoneSpec::new("New York", "America/New_York"),
    ]
}

#[test]
fn build_keeps_configured_order() {
    let models = build(&zones(), &TimeSource::new(Clock::new_system()), &DisplayFormats::default());

    let labels: Vec<_> = models.iter().map(|m| m.as_ref().unwrap().zone_label()).collect();
    assert_eq!(labels, ["Tokyo", "UTC", "New York"]);
}

#[test]
fn winter_offsets() {
    // 2024-01-15T12:00:00Z
    let timestamp = Timestamp::from_second(1_705_320_000).unwrap();
    let formats = DisplayFormats::default();

    let offsets: Vec<_> = zones()
        .iter()
        .map(|zone| ClockViewModel::at(zone, timestamp, None, &formats).unwrap().offset_label())
        .collect();

    assert_eq!(offsets, ["UTC 9", "UTC 0", "UTC -5"]);
}

#[test]
fn half_hour_zone_truncates() {
    let timestamp = Timestamp::from_second(1_705_320_000).unwrap();
    let zone = TimezoneSpec::new("Delhi", "Asia/Kolkata");

    let model = ClockViewModel::at(&zone, timestamp, None, &DisplayFormats::default()).unwrap();

    assert_eq!(model.offset_label(), "UTC 5");
    assert_eq!(model.time_text(), "17:30");
    assert_eq!(model.day_period(), DayPeriod::Dusk);
}

#[derive(Debug, Default)]
struct Collect {
    zones: Vec<String>,
    invalid: Vec<String>,
}

impl Presenter for Collect {
    fn render_zone(&mut self, _index: usize, model: &ClockViewModel) -> multiclock::Result<()> {
        self.zones.push(model.zone_label().to_owned());
        Ok(())
    }

    fn render_invalid(&mut self, _index: usize, zone: &TimezoneSpec, error: &Error) -> multiclock::Result<()> {
        assert!(error.is_unknown_timezone());
        self.invalid.push(zone.label.clone());
        Ok(())
    }
}

impl ChimePlayer for Collect {
    fn play(&mut self, _request: &ChimeRequest<'_>) -> multiclock::Result<()> {
        Ok(())
    }
}

#[test]
fn dashboard_isolates_unknown_zone() {
    let mut clocks = zones();
    clocks.push(TimezoneSpec::new("Atlantis", "Not/AZone"));
    let settings = Settings {
        clocks,
        ..Settings::default()
    };
    let dashboard = Dashboard::new(settings, Clock::new_system());
    let mut presenter = Collect::default();

    let report = dashboard.render_tick(&mut presenter, &mut Collect::default());

    assert_eq!(presenter.zones, ["Tokyo", "UTC", "New York"]);
    assert_eq!(presenter.invalid, ["Atlantis"]);
    assert_eq!(report.rendered, 3);
    assert_eq!(report.failed, 1);
}
