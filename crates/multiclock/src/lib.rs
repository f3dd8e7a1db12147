// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        clippy::unchecked_time_subtraction,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The computing and scheduling core of a multi-timezone clock.
//!
//! Once per second the clock shows the current time in several configured timezones, as text
//! and as analog faces, with a time-of-day background and an optional chime at the end of each
//! hour. This crate turns a timezone-aware instant into everything such a display needs and
//! drives the redraw; drawing pixels and playing sound are left to the host.
//!
//! # Quick Start
//!
//! ```no_run
//! use multiclock::{ChimePlayer, ChimeRequest, Clock, ClockViewModel, Dashboard, Error, Presenter};
//! use multiclock::{Settings, TickScheduler, TimezoneSpec};
//!
//! struct Stdout;
//!
//! impl Presenter for Stdout {
//!     fn render_zone(&mut self, _index: usize, model: &ClockViewModel) -> multiclock::Result<()> {
//!         println!("{} {} {}", model.zone_label(), model.time_text(), model.offset_label());
//!         Ok(())
//!     }
//!
//!     fn render_invalid(&mut self, _index: usize, zone: &TimezoneSpec, error: &Error) -> multiclock::Result<()> {
//!         println!("{}: {error}", zone.label);
//!         Ok(())
//!     }
//! }
//!
//! impl ChimePlayer for Stdout {
//!     fn play(&mut self, request: &ChimeRequest<'_>) -> multiclock::Result<()> {
//!         println!("chime {}", request.path.display());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let clock = Clock::new_system();
//!     let (settings, _) = Settings::load_or_init("settings.json");
//!     let interval = settings.interval();
//!     let dashboard = Dashboard::new(settings, clock.clone());
//!
//!     let _scheduler = TickScheduler::start(&clock, interval, move |_| {
//!         dashboard.render_tick(&mut Stdout, &mut Stdout);
//!         Ok(())
//!     });
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//! }
//! ```
//!
//! # Overview
//!
//! - [`Clock`] - The injectable source of wall time, monotonic time, delays and the host's
//!   timezone. Every other component reads time through it.
//! - [`ClockControl`] - Pins wall time and the local timezone in tests. Available when the
//!   `test-util` feature is enabled.
//! - [`TimeSource`] - The current instant in a named timezone.
//! - [`OffsetHours`] - A zone's offset from UTC in whole hours, `?` when the zone is unknown.
//! - [`HandAngles`] and [`Dial`] - Analog hand angles and the line geometry of a clock face.
//!   [`Dial`] serves graphical hosts that paint the face; text hosts only need the angles.
//! - [`DayPeriod`] - Dawn, day, dusk or night, used to pick a background image by its
//!   [`asset_name`][DayPeriod::asset_name].
//! - [`ChimeWindow`] - Decides whether the hourly chime fires on a tick.
//! - [`PeriodicTimer`] - Fixed-deadline ticks without drift or catch-up bursts.
//! - [`TickScheduler`] - Aligns to the second boundary and drives a callback every interval.
//! - [`ClockViewModel`] - All display values of one zone for one tick, see [`build`].
//! - [`Dashboard`] - The per-tick pipeline from settings to [`Presenter`] and [`ChimePlayer`].
//! - [`Settings`] - The configuration record and its JSON file.
//! - [`Error`] - Represents an error that can occur while computing or presenting values.
//!
//! # Failure Isolation
//!
//! Nothing in a tick is fatal. A timezone that does not resolve makes only that zone invalid
//! and its offset label becomes `UTC ?`. A presenter or chime failure is logged through
//! [`tracing`](https://docs.rs/tracing) and the tick carries on. Settings that cannot be used
//! are replaced by the defaults.
//!
//! # Testing
//!
//! With the `test-util` feature, [`ClockControl`] fixes wall time and the local zone. Combined
//! with paused Tokio time (`#[tokio::test(start_paused = true)]`) and
//! [`ClockControl::follow_tokio_time`], scheduler tests complete instantly and deterministically.
//!
//! > **Important:** Never enable the `test-util` feature for production code. Only use it in your `dev-dependencies`.
//!
//! # Features
//!
//! - **`test-util`** - Enables [`ClockControl`] and [`Clock::new_frozen_at`].

mod angles;
mod chime;
mod clock;
#[cfg(any(feature = "test-util", test))]
mod clock_control;
mod dashboard;
mod day_period;
mod dial;
mod error;
mod offset;
mod periodic_timer;
mod scheduler;
mod settings;
mod time_source;
mod view_model;

pub use angles::{HandAngles, WallTime};
pub use chime::{ChimeWindow, should_chime};
pub use clock::Clock;
#[cfg(any(feature = "test-util", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub use clock_control::ClockControl;
pub use dashboard::{ChimePlayer, ChimeRequest, Dashboard, Presenter, TickReport};
pub use day_period::DayPeriod;
pub use dial::{Dial, Hands, Point, Segment};
pub use error::{BoxedCause, Error, ErrorKind, Result};
pub use offset::OffsetHours;
pub use periodic_timer::PeriodicTimer;
pub use scheduler::{SchedulerState, Tick, TickScheduler, alignment_delay};
pub use settings::{
    APPLICATION_MARKER, Alignment, ChimeSettings, FontWeight, HorizontalAlign, RegionStyle, Settings, SettingsOrigin, Theme, TimezoneSpec,
    VerticalAlign, WindowSettings,
};
pub use time_source::TimeSource;
pub use view_model::{ClockViewModel, DisplayFormats, build};
