//! Tests for reading game configuration from disk.

use descent::{DescentError, GameConfig, GameSettings};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "monster_count": 50, "potion_count": 3 }}"#).unwrap();

    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.monster_count, Some(50));
    assert_eq!(config.potion_count, Some(3));

    let settings = GameSettings::from_config(&config);
    assert_eq!(settings.base_monster_count, 20);
    assert_eq!(settings.potion_count, 3);
}

#[test]
fn test_missing_fields_use_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{}}").unwrap();

    let settings = GameSettings::from_config(&GameConfig::load(file.path()).unwrap());
    assert_eq!(settings, GameSettings::default());
}

#[test]
fn test_bad_config_reports_errors() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "monster_count = 4").unwrap();
    assert!(matches!(
        GameConfig::load(file.path()),
        Err(DescentError::Serde(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        GameConfig::load(dir.path().join("missing.json")),
        Err(DescentError::Io(_))
    ));
}
