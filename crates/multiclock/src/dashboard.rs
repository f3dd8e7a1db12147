// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::Path;

use crate::{ChimeWindow, Clock, ClockViewModel, DisplayFormats, Error, Result, Settings, TimeSource, TimezoneSpec, WallTime, build};

/// Draws zones on some output.
///
/// Implementations receive every configured zone once per tick, in order. A returned error is
/// logged by the [`Dashboard`] and does not prevent the remaining zones from being drawn.
pub trait Presenter {
    /// Draws a zone whose values were computed.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone could not be drawn.
    fn render_zone(&mut self, index: usize, model: &ClockViewModel) -> Result<()>;

    /// Draws a placeholder for a zone whose values could not be computed.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder could not be drawn.
    fn render_invalid(&mut self, index: usize, zone: &TimezoneSpec, error: &Error) -> Result<()>;

    /// Called after all zones of a tick were handed over.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be completed.
    fn finish_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// What to play when the chime fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChimeRequest<'a> {
    /// Sound asset.
    pub path: &'a Path,
    /// Playback volume, `0..=100`.
    pub volume: u8,
}

/// Plays the hourly chime.
pub trait ChimePlayer {
    /// Starts playback. Implementations should not block for the length of the sound.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not start.
    fn play(&mut self, request: &ChimeRequest<'_>) -> Result<()>;
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Zones drawn successfully.
    pub rendered: usize,
    /// Zones that were invalid or failed to draw.
    pub failed: usize,
    /// Whether the chime fired during this tick.
    pub chimed: bool,
}

/// Runs the per-tick pipeline over the configured zones.
///
/// Each tick builds the view models of all zones, hands them to a [`Presenter`] and evaluates
/// the chime once against the host's local time. Failures are contained: a bad zone, a failing
/// presenter or a failing chime player is logged and the tick carries on.
#[derive(Debug, Clone)]
pub struct Dashboard {
    settings: Settings,
    time_source: TimeSource,
    formats: DisplayFormats,
    chime_window: ChimeWindow,
}

impl Dashboard {
    /// Creates a dashboard for the given settings.
    #[must_use]
    pub fn new(settings: Settings, clock: Clock) -> Self {
        Self {
            formats: settings.formats(),
            chime_window: settings.chime.window(),
            time_source: TimeSource::new(clock),
            settings,
        }
    }

    /// The settings in use.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the view models of all zones at the current instant.
    #[must_use]
    pub fn view_models(&self) -> Vec<Result<ClockViewModel>> {
        build(&self.settings.clocks, &self.time_source, &self.formats)
    }

    /// Renders one tick.
    pub fn render_tick(&self, presenter: &mut impl Presenter, chime_player: &mut impl ChimePlayer) -> TickReport {
        let mut report = TickReport::default();

        for (index, (zone, model)) in self.settings.clocks.iter().zip(self.view_models()).enumerate() {
            let outcome = match &model {
                Ok(model) => presenter.render_zone(index, model),
                Err(error) => {
                    tracing::debug!(zone.index = index, zone.label = %zone.label, error = %error, "zone is invalid");
                    report.failed += 1;
                    presenter.render_invalid(index, zone, error)
                }
            };

            match outcome {
                Ok(()) if model.is_ok() => report.rendered += 1,
                Ok(()) => {}
                Err(error) => {
                    tracing::warn!(zone.index = index, zone.label = %zone.label, error = %error, "rendering zone failed");
                    if model.is_ok() {
                        report.failed += 1;
                    }
                }
            }
        }

        if let Err(error) = presenter.finish_frame() {
            tracing::warn!(error = %error, "finishing frame failed");
        }

        report.chimed = self.chime(chime_player);
        report
    }

    fn chime(&self, chime_player: &mut impl ChimePlayer) -> bool {
        let now = WallTime::from(&self.time_source.local_now());
        if !self.chime_window.should_chime(now) {
            return false;
        }

        let request = ChimeRequest {
            path: &self.settings.chime.path,
            volume: self.settings.chime.volume,
        };

        tracing::debug!(chime.path = %request.path.display(), chime.volume = request.volume, "chime fired");
        if let Err(error) = chime_player.play(&request) {
            tracing::warn!(chime.path = %request.path.display(), error = %error, "chime playback failed");
        }

        true
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::ClockControl;

    // 2024-07-01T00:00:00Z
    const JULY_FIRST: u64 = 1_719_792_000;

    #[derive(Debug, Default)]
    struct RecordingPresenter {
        lines: Vec<String>,
        frames: usize,
        fail_on: Option<usize>,
    }

    impl Presenter for RecordingPresenter {
        fn render_zone(&mut self, index: usize, model: &ClockViewModel) -> Result<()> {
            if self.fail_on == Some(index) {
                return Err(Error::render_failure("panel unavailable"));
            }

            self.lines.push(format!("{index} {} {} {}", model.zone_label(), model.time_text(), model.offset_label()));
            Ok(())
        }

        fn render_invalid(&mut self, index: usize, zone: &TimezoneSpec, _error: &Error) -> Result<()> {
            self.lines.push(format!("{index} {} invalid", zone.label));
            Ok(())
        }

        fn finish_frame(&mut self) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingChime {
        played: Vec<(PathBuf, u8)>,
        fail: bool,
    }

    impl ChimePlayer for RecordingChime {
        fn play(&mut self, request: &ChimeRequest<'_>) -> Result<()> {
            self.played.push((request.path.to_path_buf(), request.volume));
            if self.fail {
                return Err(Error::chime("no audio device"));
            }
            Ok(())
        }
    }

    fn dashboard_at(seconds_after_midnight: u64, clocks: Vec<TimezoneSpec>) -> Dashboard {
        let clock = ClockControl::new_at(SystemTime::UNIX_EPOCH + Duration::from_secs(JULY_FIRST + seconds_after_midnight)).to_clock();
        let settings = Settings {
            clocks,
            ..Settings::default()
        };

        Dashboard::new(settings, clock)
    }

    fn zones() -> Vec<TimezoneSpec> {
        vec![
            TimezoneSpec::new("Tokyo", "Asia/Tokyo"),
            TimezoneSpec::new("UTC", "UTC"),
            TimezoneSpec::new("New York", "America/New_York"),
        ]
    }

    #[test]
    fn renders_all_zones_in_order() {
        let dashboard = dashboard_at(6 * 3600 + 30 * 60, zones());
        let mut presenter = RecordingPresenter::default();

        let report = dashboard.render_tick(&mut presenter, &mut RecordingChime::default());

        assert_eq!(
            presenter.lines,
            ["0 Tokyo 15:30 UTC 9", "1 UTC 06:30 UTC 0", "2 New York 02:30 UTC -4"]
        );
        assert_eq!(presenter.frames, 1);
        assert_eq!(
            report,
            TickReport {
                rendered: 3,
                failed: 0,
                chimed: false
            }
        );
    }

    #[test]
    fn invalid_zone_does_not_block_others() {
        let mut clocks = zones();
        clocks.insert(1, TimezoneSpec::new("Atlantis", "Not/AZone"));
        let dashboard = dashboard_at(0, clocks);
        let mut presenter = RecordingPresenter::default();

        let report = dashboard.render_tick(&mut presenter, &mut RecordingChime::default());

        assert_eq!(presenter.lines[1], "1 Atlantis invalid");
        assert_eq!(presenter.lines.len(), 4);
        assert_eq!(report.rendered, 3);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn presenter_failure_does_not_block_others() {
        let dashboard = dashboard_at(0, zones());
        let mut presenter = RecordingPresenter {
            fail_on: Some(0),
            ..RecordingPresenter::default()
        };

        let report = dashboard.render_tick(&mut presenter, &mut RecordingChime::default());

        assert_eq!(presenter.lines.len(), 2);
        assert!(presenter.lines[0].starts_with("1 UTC"));
        assert_eq!(report.rendered, 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn chime_fires_once_per_tick() {
        // Local zone is UTC; 10:59:55 is the chime second for an offset of -4.
        let dashboard = dashboard_at(10 * 3600 + 59 * 60 + 55, zones());
        let mut chime = RecordingChime::default();

        let report = dashboard.render_tick(&mut RecordingPresenter::default(), &mut chime);

        assert!(report.chimed);
        assert_eq!(chime.played, [(PathBuf::from("jihou-sine-3f.mp3"), 50)]);
    }

    #[test]
    fn chime_silent_in_quiet_hours() {
        let dashboard = dashboard_at(23 * 3600 + 59 * 60 + 55, zones());
        let mut chime = RecordingChime::default();

        let report = dashboard.render_tick(&mut RecordingPresenter::default(), &mut chime);

        assert!(!report.chimed);
        assert!(chime.played.is_empty());
    }

    #[test]
    fn chime_failure_is_contained() {
        let dashboard = dashboard_at(10 * 3600 + 59 * 60 + 55, zones());
        let mut chime = RecordingChime {
            fail: true,
            ..RecordingChime::default()
        };
        let mut presenter = RecordingPresenter::default();

        let report = dashboard.render_tick(&mut presenter, &mut chime);

        assert!(report.chimed);
        assert_eq!(report.rendered, 3);
        assert_eq!(chime.played.len(), 1);
    }

    #[test]
    fn default_finish_frame_is_ok() {
        struct Silent;

        impl Presenter for Silent {
            fn render_zone(&mut self, _index: usize, _model: &ClockViewModel) -> Result<()> {
                Ok(())
            }

            fn render_invalid(&mut self, _index: usize, _zone: &TimezoneSpec, _error: &Error) -> Result<()> {
                Ok(())
            }
        }

        Silent.finish_frame().unwrap();
    }
}
