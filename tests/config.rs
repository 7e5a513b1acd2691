use caldate::{CalDateError, CaldateConfig, Location};
use chrono::FixedOffset;
use chrono_tz::Tz;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = CaldateConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config.location().unwrap(), None);
}

#[test]
fn reads_timezone_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timezone = \"Asia/Tokyo\"\n").unwrap();

    let config = CaldateConfig::load_from(&path).unwrap();
    assert_eq!(config.timezone.as_deref(), Some("Asia/Tokyo"));
    assert_eq!(config.location().unwrap(), Some(Location::Zone(Tz::Asia__Tokyo)));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = CaldateConfig {
        timezone: Some("-03:00".to_string()),
    };
    config.save_to(&path).unwrap();

    let loaded = CaldateConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(
        loaded.location().unwrap(),
        Some(Location::Fixed(FixedOffset::west_opt(3 * 3600).unwrap()))
    );
}

#[test]
fn default_config_file_has_everything_commented_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caldate").join("config.toml");

    CaldateConfig::create_default_config(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("# timezone"));

    let config = CaldateConfig::load_from(&path).unwrap();
    assert_eq!(config.timezone, None);
}

#[test]
fn unknown_timezone_is_a_parse_error() {
    let config = CaldateConfig {
        timezone: Some("Mars/Olympus_Mons".to_string()),
    };
    assert!(matches!(config.location(), Err(CalDateError::Parse { .. })));
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timezone = [").unwrap();

    assert!(matches!(
        CaldateConfig::load_from(&path),
        Err(CalDateError::Config(_))
    ));
}
