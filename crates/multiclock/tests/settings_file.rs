// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Settings persistence through the file system.

use multiclock::{APPLICATION_MARKER, Settings, SettingsOrigin, TimezoneSpec};

#[test]
fn first_run_creates_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let (settings, origin) = Settings::load_or_init(&path);

    assert_eq!(origin, SettingsOrigin::Defaulted);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(APPLICATION_MARKER));
    assert!(written.contains("Asia/Tokyo"));

    let (reloaded, origin) = Settings::load_or_init(&path);
    assert_eq!(origin, SettingsOrigin::Loaded);
    assert_eq!(reloaded, settings);
}

#[test]
fn foreign_json_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"application": "SomethingElse", "volume": 3}"#).unwrap();

    let (settings, origin) = Settings::load_or_init(&path);

    assert_eq!(origin, SettingsOrigin::Defaulted);
    assert_eq!(settings, Settings::default());
    assert_eq!(Settings::load(&path).unwrap(), Settings::default());
}

#[test]
fn user_edits_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut edited = Settings::default();
    edited.clocks = vec![TimezoneSpec::new("Home", "Europe/Prague"), TimezoneSpec::new("UTC", "UTC")];
    edited.time_format = "%H:%M:%S".to_owned();
    edited.chime.volume = 0;
    edited.save(&path).unwrap();

    let (settings, origin) = Settings::load_or_init(&path);

    assert_eq!(origin, SettingsOrigin::Loaded);
    assert_eq!(settings.clocks[0].label, "Home");
    assert_eq!(settings.time_format, "%H:%M:%S");
    assert_eq!(settings.chime.volume, 0);
}

#[test]
fn invalid_edit_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut edited = Settings::default();
    edited.clocks.push(TimezoneSpec::new("Tokyo", "Asia/Tokyo"));
    std::fs::write(&path, serde_json::to_string(&edited).unwrap()).unwrap();

    let (settings, origin) = Settings::load_or_init(&path);

    assert_eq!(origin, SettingsOrigin::Defaulted);
    assert_eq!(settings.clocks.len(), 5);
}
