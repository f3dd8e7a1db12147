// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::Write;

use multiclock::{ChimePlayer, ChimeRequest, Error, Result};

const BELL: &[u8] = b"\x07";

/// Signals the chime with the terminal bell.
///
/// Decoding the configured sound asset is left to a desktop host; the asset and volume are
/// logged so that the request stays visible.
#[derive(Debug)]
pub struct BellChimePlayer<W> {
    out: W,
}

impl<W: Write> BellChimePlayer<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChimePlayer for BellChimePlayer<W> {
    fn play(&mut self, request: &ChimeRequest<'_>) -> Result<()> {
        if request.volume == 0 {
            tracing::debug!(chime.path = %request.path.display(), "chime muted");
            return Ok(());
        }

        tracing::info!(chime.path = %request.path.display(), chime.volume = request.volume, "chime");
        self.out.write_all(BELL).and_then(|()| self.out.flush()).map_err(Error::chime)
    }
}
