// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::path::PathBuf;

/// The result type for fallible operations that use the [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause reported by external collaborators such as presenters and chime players.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error that can occur while computing or presenting clock values.
///
/// None of these errors is fatal to the clock. A zone that cannot be resolved is
/// displayed as invalid, invalid settings are replaced by defaults and render or
/// chime failures are logged and skipped.
///
/// # Examples
///
/// ```
/// use multiclock::{Clock, ErrorKind, TimeSource};
///
/// let source = TimeSource::new(Clock::new_system());
/// let error = source.now_in("Not/AZone").unwrap_err();
///
/// assert!(matches!(error.kind(), ErrorKind::UnknownTimezone { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorKind);

/// The category of an [`Error`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The timezone identifier does not resolve to a known timezone.
    #[error("unknown timezone '{identifier}'")]
    UnknownTimezone {
        /// The identifier that failed to resolve.
        identifier: String,
        /// The underlying lookup failure.
        #[source]
        source: jiff::Error,
    },

    /// The settings lack required values or fail validation.
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(Cow<'static, str>),

    /// The settings file could not be read or written.
    #[error("cannot access settings file '{}'", path.display())]
    SettingsIo {
        /// Location of the settings file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or does not match the settings layout.
    #[error("malformed settings")]
    SettingsFormat(#[source] serde_json::Error),

    /// A date or time pattern could not be applied.
    #[error("cannot format time with pattern '{pattern}'")]
    Format {
        /// The strftime-style pattern.
        pattern: String,
        /// The underlying formatting failure.
        #[source]
        source: jiff::Error,
    },

    /// The presentation layer failed to render a zone or a frame.
    #[error("render failed: {0}")]
    RenderFailure(BoxedCause),

    /// The audio collaborator failed to play the chime.
    #[error("chime playback failed: {0}")]
    Chime(BoxedCause),
}

impl Error {
    const fn from_kind(kind: ErrorKind) -> Self {
        Self(kind)
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Returns `true` if the error was caused by an unresolvable timezone identifier.
    #[must_use]
    pub const fn is_unknown_timezone(&self) -> bool {
        matches!(self.0, ErrorKind::UnknownTimezone { .. })
    }

    /// Creates an error reported by a presentation layer.
    pub fn render_failure(cause: impl Into<BoxedCause>) -> Self {
        Self::from_kind(ErrorKind::RenderFailure(cause.into()))
    }

    /// Creates an error reported by an audio collaborator.
    pub fn chime(cause: impl Into<BoxedCause>) -> Self {
        Self::from_kind(ErrorKind::Chime(cause.into()))
    }

    pub(crate) fn unknown_timezone(identifier: impl Into<String>, source: jiff::Error) -> Self {
        Self::from_kind(ErrorKind::UnknownTimezone {
            identifier: identifier.into(),
            source,
        })
    }

    pub(crate) fn configuration_invalid(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::ConfigurationInvalid(reason.into()))
    }

    pub(crate) fn settings_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::from_kind(ErrorKind::SettingsIo { path: path.into(), source })
    }

    pub(crate) fn format(pattern: impl Into<String>, source: jiff::Error) -> Self {
        Self::from_kind(ErrorKind::Format {
            pattern: pattern.into(),
            source,
        })
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_kind(ErrorKind::SettingsFormat(error))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(Error: Send, Sync);
    }

    #[test]
    fn unknown_timezone_error() {
        let source = jiff::tz::TimeZone::get("Not/AZone").unwrap_err();
        let error = Error::unknown_timezone("Not/AZone", source);

        assert!(error.is_unknown_timezone());
        assert_eq!(error.to_string(), "unknown timezone 'Not/AZone'");
        assert!(error.source().is_some());
    }

    #[test]
    fn configuration_invalid_error() {
        let error = Error::configuration_invalid("no clocks configured");

        assert!(matches!(error.kind(), ErrorKind::ConfigurationInvalid(_)));
        assert!(!error.is_unknown_timezone());
        assert_eq!(error.to_string(), "invalid configuration: no clocks configured");
    }

    #[test]
    fn render_failure_error() {
        let error = Error::render_failure("broken pipe");

        assert!(matches!(error.kind(), ErrorKind::RenderFailure(_)));
        assert_eq!(error.to_string(), "render failed: broken pipe");
    }

    #[test]
    fn chime_error() {
        let error = Error::chime(std::io::Error::other("no audio device"));

        assert_eq!(error.to_string(), "chime playback failed: no audio device");
    }

    #[test]
    fn settings_io_error() {
        let error = Error::settings_io("settings.json", std::io::Error::other("denied"));

        assert_eq!(error.to_string(), "cannot access settings file 'settings.json'");
        assert_eq!(error.source().unwrap().to_string(), "denied");
    }
}
