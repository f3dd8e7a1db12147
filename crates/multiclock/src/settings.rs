// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ChimeWindow, DisplayFormats, Error, Result};

/// Value of the `application` field that marks a file as MultiClock settings.
pub const APPLICATION_MARKER: &str = "MultiClock";

const MAX_VOLUME: u8 = 100;
const HOURS_PER_DAY: u8 = 24;

/// A zone to display: a label and a timezone identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimezoneSpec {
    /// Display name, unique within the settings.
    pub label: String,
    /// IANA timezone identifier, for example `Asia/Tokyo`.
    pub timezone: String,
}

impl TimezoneSpec {
    /// Creates a zone from a label and a timezone identifier.
    #[must_use]
    pub fn new(label: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timezone: timezone.into(),
        }
    }
}

/// The hourly chime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChimeSettings {
    /// Sound asset to play.
    pub path: PathBuf,
    /// Offset from second 59 of minute 59 at which to play.
    pub offset_seconds: i32,
    /// Playback volume, `0..=100`.
    pub volume: u8,
    /// Quiet hours start, exclusive.
    pub quiet_start_hour: u8,
    /// Quiet hours end, exclusive.
    pub quiet_end_hour: u8,
}

impl ChimeSettings {
    /// The timing rules of the chime.
    #[must_use]
    pub const fn window(&self) -> ChimeWindow {
        ChimeWindow::new(self.offset_seconds, self.quiet_start_hour, self.quiet_end_hour)
    }
}

impl Default for ChimeSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("jihou-sine-3f.mp3"),
            offset_seconds: -4,
            volume: 50,
            quiet_start_hour: 22,
            quiet_end_hour: 7,
        }
    }
}

/// Window chrome, passed through to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Icon asset.
    pub icon: PathBuf,
    /// Window opacity, `0.0..=1.0`.
    pub opacity: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: APPLICATION_MARKER.to_owned(),
            icon: PathBuf::from("icon.ico"),
            opacity: 0.95,
        }
    }
}

/// Font weight of a text region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Weight 100.
    Thin,
    /// Weight 200.
    ExtraLight,
    /// Weight 300.
    Light,
    /// Weight 400.
    #[default]
    Normal,
    /// Weight 500.
    Medium,
    /// Weight 600.
    DemiBold,
    /// Weight 700.
    Bold,
    /// Weight 800.
    ExtraBold,
    /// Weight 900.
    Black,
}

/// Horizontal placement of text within its region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical placement of text within its region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Flush with the top edge.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Flush with the bottom edge.
    Bottom,
}

/// Placement of text within its region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal placement.
    #[serde(default)]
    pub horizontal: HorizontalAlign,
    /// Vertical placement.
    #[serde(default)]
    pub vertical: VerticalAlign,
}

impl Alignment {
    /// Creates an alignment.
    #[must_use]
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self { horizontal, vertical }
    }
}

/// Style of one text region of a zone panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in points.
    pub font_size: u16,
    /// Font weight, `normal` when absent.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Text color.
    pub color: String,
    /// Background color.
    pub background: String,
    /// Optional top border, CSS-like.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top: Option<String>,
    /// Text placement, top-left when absent.
    #[serde(default)]
    pub align: Alignment,
}

impl RegionStyle {
    fn classic(font_size: u16, font_weight: FontWeight, align: Alignment) -> Self {
        Self {
            font_family: "Consolas".to_owned(),
            font_size,
            font_weight,
            color: "#49e9a6".to_owned(),
            background: "transparent".to_owned(),
            border_top: None,
            align,
        }
    }
}

/// A named set of styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Background color of the window.
    pub window_background: String,
    /// Style of the zone label.
    pub zone: RegionStyle,
    /// Style of the date line.
    pub date: RegionStyle,
    /// Style of the time line.
    pub clock: RegionStyle,
}

impl Theme {
    /// The built-in `classic` theme.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            window_background: "#031417".to_owned(),
            zone: RegionStyle::classic(10, FontWeight::Thin, Alignment::new(HorizontalAlign::Left, VerticalAlign::Bottom)),
            date: RegionStyle::classic(10, FontWeight::Thin, Alignment::new(HorizontalAlign::Right, VerticalAlign::Bottom)),
            clock: RegionStyle {
                border_top: Some("1px solid #223b3f".to_owned()),
                ..RegionStyle::classic(28, FontWeight::Normal, Alignment::new(HorizontalAlign::Center, VerticalAlign::Top))
            },
        }
    }
}

/// Where the settings of a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsOrigin {
    /// Read from the settings file.
    Loaded,
    /// The file was missing or unusable and the defaults were used.
    Defaulted,
}

/// The configuration record of the clock.
///
/// Settings are loaded once at startup and passed to the components that need them. The JSON
/// layout is:
///
/// ```json
/// {
///   "application": "MultiClock",
///   "clocks": [{ "label": "Tokyo", "timezone": "Asia/Tokyo" }],
///   "date_format": "%a, %d %B %Y",
///   "time_format": "%H:%M",
///   "timer_ms": 1000,
///   "chime": { "path": "jihou-sine-3f.mp3", "offset_seconds": -4, "volume": 50,
///              "quiet_start_hour": 22, "quiet_end_hour": 7 },
///   "window": { "title": "MultiClock", "icon": "icon.ico", "opacity": 0.95 },
///   "selected_theme": "classic",
///   "themes": { "classic": { "window_background": "#031417", "zone": {}, "date": {}, "clock": {} } }
/// }
/// ```
///
/// A file whose `application` field is not `MultiClock` is not treated as settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Marker identifying the file.
    #[serde(default)]
    pub application: String,
    /// Zones to display, in order.
    pub clocks: Vec<TimezoneSpec>,
    /// Pattern of the date text.
    pub date_format: String,
    /// Pattern of the time text.
    pub time_format: String,
    /// Tick interval in milliseconds.
    pub timer_ms: u64,
    /// The hourly chime.
    pub chime: ChimeSettings,
    /// Window chrome.
    pub window: WindowSettings,
    /// Name of the active theme.
    pub selected_theme: String,
    /// Available themes by name.
    pub themes: BTreeMap<String, Theme>,
}

impl Settings {
    /// Parses and validates settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not settings JSON or fails [`validate`][Self::validate].
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and validates settings from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not settings JSON or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::settings_io(path, e))?;
        Self::from_json(&json)
    }

    /// Writes the settings to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| Error::settings_io(path, e))
    }

    /// Loads settings, falling back to the defaults.
    ///
    /// When the file is missing, unreadable, malformed, lacks the application marker or fails
    /// validation, the defaults are written to `path` and returned. A failure to write them is
    /// logged; the defaults are still used for the session.
    #[must_use]
    pub fn load_or_init(path: impl AsRef<Path>) -> (Self, SettingsOrigin) {
        let path = path.as_ref();

        match Self::load(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), clocks = settings.clocks.len(), "settings loaded");
                (settings, SettingsOrigin::Loaded)
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "settings unusable, using defaults");

                let defaults = Self::default();
                if let Err(error) = defaults.save(path) {
                    tracing::warn!(path = %path.display(), error = %error, "cannot write default settings");
                }

                (defaults, SettingsOrigin::Defaulted)
            }
        }
    }

    /// Checks the settings for values the clock cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.application != APPLICATION_MARKER {
            return Err(Error::configuration_invalid(format!(
                "application marker is '{}', expected '{APPLICATION_MARKER}'",
                self.application
            )));
        }

        if self.clocks.is_empty() {
            return Err(Error::configuration_invalid("no clocks configured"));
        }

        let mut labels = HashSet::new();
        if let Some(duplicate) = self.clocks.iter().find(|zone| !labels.insert(zone.label.as_str())) {
            return Err(Error::configuration_invalid(format!("duplicate clock label '{}'", duplicate.label)));
        }

        if self.timer_ms == 0 {
            return Err(Error::configuration_invalid("timer_ms must be greater than zero"));
        }

        if self.chime.volume > MAX_VOLUME {
            return Err(Error::configuration_invalid(format!(
                "chime volume {} exceeds {MAX_VOLUME}",
                self.chime.volume
            )));
        }

        if self.chime.quiet_start_hour >= HOURS_PER_DAY || self.chime.quiet_end_hour >= HOURS_PER_DAY {
            return Err(Error::configuration_invalid("quiet hours must be below 24"));
        }

        if !self.themes.contains_key(&self.selected_theme) {
            return Err(Error::configuration_invalid(format!("unknown theme '{}'", self.selected_theme)));
        }

        Ok(())
    }

    /// The date and time patterns.
    #[must_use]
    pub fn formats(&self) -> DisplayFormats {
        DisplayFormats::new(&self.date_format, &self.time_format)
    }

    /// The tick interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.timer_ms)
    }

    /// The selected theme, if it exists.
    #[must_use]
    pub fn theme(&self) -> Option<&Theme> {
        self.themes.get(&self.selected_theme)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let formats = DisplayFormats::default();

        Self {
            application: APPLICATION_MARKER.to_owned(),
            clocks: vec![
                TimezoneSpec::new("Tokyo", "Asia/Tokyo"),
                TimezoneSpec::new("New York", "US/Eastern"),
                TimezoneSpec::new("Denver", "US/Mountain"),
                TimezoneSpec::new("Seattle", "US/Pacific"),
                TimezoneSpec::new("Honolulu", "US/Hawaii"),
            ],
            date_format: formats.date_format().to_owned(),
            time_format: formats.time_format().to_owned(),
            timer_ms: 1000,
            chime: ChimeSettings::default(),
            window: WindowSettings::default(),
            selected_theme: "classic".to_owned(),
            themes: BTreeMap::from([("classic".to_owned(), Theme::classic())]),
        }
    }
}
