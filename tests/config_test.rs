use std::env;
use std::sync::Mutex;
use tempfile::tempdir;
use tidyseries::config::loader;
use tidyseries::{ComputeConfig, TidyConfig};

// Environment variables are process-wide
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 6] = [
    "TIDYSERIES_DATE_FORMAT",
    "TIDYSERIES_DELIMITER",
    "TIDYSERIES_PARALLEL",
    "TIDYSERIES_PARALLEL_THRESHOLD",
    "TIDYSERIES_LOG_LEVEL",
    "RUST_LOG",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_default_config() {
    let config = TidyConfig::default();

    assert_eq!(config.csv.date_format, "%Y-%m-%d");
    assert_eq!(config.csv.delimiter, ",");
    assert!(config.csv.na_values.contains(&"NA".to_string()));
    assert_eq!(config.compute, ComputeConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    env::set_var("TIDYSERIES_PARALLEL", "false");
    env::set_var("TIDYSERIES_PARALLEL_THRESHOLD", "64");
    env::set_var("TIDYSERIES_LOG_LEVEL", "debug");
    let config = TidyConfig::from_env().unwrap();
    assert!(!config.compute.parallel_enabled);
    assert_eq!(config.compute.parallel_threshold, 64);
    assert_eq!(config.logging.level, "debug");

    // RUST_LOG goes straight to env_logger and never reaches the config
    env::remove_var("TIDYSERIES_LOG_LEVEL");
    env::set_var("RUST_LOG", "tidyseries");
    let config = TidyConfig::from_env().unwrap();
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());

    env::set_var("TIDYSERIES_LOG_LEVEL", "tidyseries::series");
    assert!(TidyConfig::from_env().unwrap().validate().is_ok());

    env::set_var("TIDYSERIES_PARALLEL_THRESHOLD", "many");
    assert!(TidyConfig::from_env().is_err());

    clear_env();
}

#[test]
fn test_precedence_file_then_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let dir = tempdir().unwrap();
    let path = dir.path().join("tidyseries.toml");
    std::fs::write(
        &path,
        "[csv]\ndate_format = \"%d.%m.%Y\"\n\n[compute]\nparallel_threshold = 10\n",
    )
    .unwrap();

    let config = TidyConfig::load_with_precedence(Some(&path)).unwrap();
    assert_eq!(config.csv.date_format, "%d.%m.%Y");
    assert_eq!(config.compute.parallel_threshold, 10);

    // Environment wins over the file, but only for the variables that are set
    env::set_var("TIDYSERIES_PARALLEL_THRESHOLD", "20");
    let config = TidyConfig::load_with_precedence(Some(&path)).unwrap();
    assert_eq!(config.csv.date_format, "%d.%m.%Y");
    assert_eq!(config.compute.parallel_threshold, 20);

    clear_env();
}

#[test]
fn test_precedence_validates() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "compute:\n  parallel_threshold: 0\n").unwrap();

    assert!(TidyConfig::from_file(&path).is_ok());
    assert!(TidyConfig::load_with_precedence(Some(&path)).is_err());
}

#[test]
fn test_yaml_and_toml_serialization() {
    let mut config = TidyConfig::default();
    config.logging.level = "info".to_string();

    let yaml = config.to_yaml().unwrap();
    assert_eq!(TidyConfig::from_yaml(&yaml).unwrap(), config);

    let toml = config.to_toml().unwrap();
    assert_eq!(TidyConfig::from_toml(&toml).unwrap(), config);

    assert!(TidyConfig::from_yaml("compute: [1, 2]").is_err());
}

#[test]
fn test_config_search_paths() {
    let paths = loader::get_config_file_paths();
    assert!(paths.iter().any(|p| p.ends_with("tidyseries.yaml")));
    assert!(paths.iter().any(|p| p.ends_with("tidyseries.toml")));
}
