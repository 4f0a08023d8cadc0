// ==========================================
// 配置管理器测试
// ==========================================


use autoshop_erp::config::{config_keys, ConfigManager, DayBoundary, ReportConfig};
use chrono::FixedOffset;
use std::time::Duration;
use test_helpers::create_test_db;

#[test]
fn test_empty_config_uses_defaults() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    let config = manager.get_report_config().unwrap();
    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.export_file_prefix, "Report");
    assert_eq!(config.label_max_chars, 30);
    assert_eq!(config.placeholder, "-");
    assert_eq!(config.day_boundary, DayBoundary::Local);
    assert_eq!(config.load_timeout(), Duration::from_millis(5_000));
}

#[test]
fn test_overrides_are_applied() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    manager.set_config_value(config_keys::EXPORT_FILE_PREFIX, "Garage").unwrap();
    manager.set_config_value(config_keys::LABEL_MAX_CHARS, "40").unwrap();
    manager.set_config_value(config_keys::PLACEHOLDER, "N/A").unwrap();
    manager.set_config_value(config_keys::DAY_BOUNDARY, "+07:00").unwrap();
    manager.set_config_value(config_keys::LOAD_TIMEOUT_MS, "1500").unwrap();

    let config = manager.get_report_config().unwrap();
    assert_eq!(
        config,
        ReportConfig {
            export_file_prefix: "Garage".to_string(),
            label_max_chars: 40,
            placeholder: "N/A".to_string(),
            day_boundary: DayBoundary::Fixed(FixedOffset::east_opt(7 * 3600).unwrap()),
            load_timeout_ms: 1500,
        }
    );
}

#[test]
fn test_set_config_value_overwrites() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    assert_eq!(manager.get_config_value(config_keys::PLACEHOLDER).unwrap(), None);
    manager.set_config_value(config_keys::PLACEHOLDER, "?").unwrap();
    manager.set_config_value(config_keys::PLACEHOLDER, "--").unwrap();
    assert_eq!(
        manager.get_config_value(config_keys::PLACEHOLDER).unwrap(),
        Some("--".to_string())
    );
}

#[test]
fn test_malformed_values_fall_back_to_defaults() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    manager.set_config_value(config_keys::EXPORT_FILE_PREFIX, "   ").unwrap();
    manager.set_config_value(config_keys::LABEL_MAX_CHARS, "0").unwrap();
    manager.set_config_value(config_keys::DAY_BOUNDARY, "Asia/Bangkok").unwrap();
    manager.set_config_value(config_keys::LOAD_TIMEOUT_MS, "soon").unwrap();

    let config = manager.get_report_config().unwrap();
    assert_eq!(config, ReportConfig::default());
}
