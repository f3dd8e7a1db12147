// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::Write;

use multiclock::{ClockViewModel, Error, Presenter, Result, TimezoneSpec};

const LABEL_WIDTH: usize = 12;

/// Writes one line per zone and a blank line after each frame.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_zone(&mut self, _index: usize, model: &ClockViewModel) -> Result<()> {
        let angles = model.hand_angles();

        writeln!(
            self.out,
            "{label:<LABEL_WIDTH$} {date}  {time}{seconds:<3}  {offset:<7} {background:<9}  h{hour:>5.1} m{minute:>5.1} s{second:>5.1}",
            label = model.zone_label(),
            date = model.date_text(),
            time = model.time_text(),
            seconds = model.seconds_text().unwrap_or_default(),
            offset = model.offset_label(),
            background = model.day_period().asset_name(),
            hour = angles.hour_degrees(),
            minute = angles.minute_degrees(),
            second = angles.second_degrees(),
        )
        .map_err(Error::render_failure)
    }

    fn render_invalid(&mut self, _index: usize, zone: &TimezoneSpec, error: &Error) -> Result<()> {
        writeln!(self.out, "{label:<LABEL_WIDTH$} -- {error}", label = zone.label).map_err(Error::render_failure)
    }

    fn finish_frame(&mut self) -> Result<()> {
        writeln!(self.out).and_then(|()| self.out.flush()).map_err(Error::render_failure)
    }
}
