use std::fs;

use pageguard_model::{GuardError, GuardSettings, Locale, load_settings};

#[test]
fn loads_explicit_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r##"
[markers]
delete_segment = "/remove/"
legacy_cancel_label = false

[appearance]
error_hue = "#ff0000"

[messages]
locale = "en"
concurrent_edit = "Finish the open edit first"
"##,
    )
    .unwrap();

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.markers.delete_segment, "/remove/");
    assert!(!settings.markers.legacy_cancel_label);
    assert_eq!(settings.appearance.error_hue, "#ff0000");
    assert_eq!(settings.appearance.neutral_hue, "#ddd");
    assert_eq!(settings.messages.locale, Locale::En);

    let messages = settings.resolved_messages();
    assert_eq!(messages.concurrent_edit, "Finish the open edit first");
    assert_eq!(messages.unbounded_above, "infinity");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_settings(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, GuardError::Io(_)));
}

#[test]
fn malformed_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[markers\nedit_segment = 1").unwrap();
    let err = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(err, GuardError::Toml(_)));
}

#[test]
fn json_settings_match_toml_settings() {
    let from_json = GuardSettings::from_json_str(
        r#"{"markers": {"edit_segment": "/modify/"}, "messages": {"locale": "en"}}"#,
    )
    .unwrap();
    let from_toml = GuardSettings::from_toml_str(
        "[markers]\nedit_segment = \"/modify/\"\n[messages]\nlocale = \"en\"\n",
    )
    .unwrap();
    assert_eq!(from_json, from_toml);
}
