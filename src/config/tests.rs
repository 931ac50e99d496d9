use super::*;
use crate::cache::{Cache, DEFAULT_CACHE};
use crate::error::LockError;

#[test]
fn parses_minimal_settings() {
    let settings = Settings::from_yaml_str("caches: {}").unwrap();
    assert!(settings.caches.is_empty());
}

#[test]
fn parses_declared_caches() {
    let yaml = r#"
caches:
  default:
    backend: memory
  reports:
    backend: file
    dir: /var/lib/app/locks
"#;
    let settings = Settings::from_yaml_str(yaml).unwrap();

    assert_eq!(settings.caches.len(), 2);
    assert_eq!(settings.caches["default"].backend, CacheBackend::Memory);
    assert_eq!(settings.caches["reports"].backend, CacheBackend::File);
    assert_eq!(
        settings.caches["reports"].dir.as_deref(),
        Some(std::path::Path::new("/var/lib/app/locks"))
    );
}

#[test]
fn backend_defaults_to_memory() {
    let yaml = "caches:\n  default: {}\n";
    let settings = Settings::from_yaml_str(yaml).unwrap();
    assert_eq!(settings.caches["default"].backend, CacheBackend::Memory);
}

#[test]
fn unknown_fields_are_preserved() {
    let yaml = r#"
caches:
  default:
    backend: memory
    future_option: 42
top_level_future: hello
"#;
    let settings = Settings::from_yaml_str(yaml).unwrap();

    assert!(settings.extra.contains_key("top_level_future"));
    assert!(settings.caches["default"].extra.contains_key("future_option"));
}

#[test]
fn invalid_cache_name_is_rejected() {
    let yaml = "caches:\n  \"bad name\": {}\n";
    let err = Settings::from_yaml_str(yaml).unwrap_err();

    assert!(matches!(err, LockError::Settings(_)));
    assert!(err.to_string().contains("invalid cache name"));
}

#[test]
fn file_backend_without_dir_is_rejected() {
    let yaml = "caches:\n  reports:\n    backend: file\n";
    let err = Settings::from_yaml_str(yaml).unwrap_err();

    assert!(err.to_string().contains("no dir"));
}

#[test]
fn malformed_yaml_is_a_settings_error() {
    let err = Settings::from_yaml_str("caches: [not a map").unwrap_err();
    assert!(matches!(err, LockError::Settings(_)));
}

#[test]
fn build_registry_creates_declared_instances() {
    let dir = tempfile::TempDir::new().unwrap();
    let yaml = format!(
        "caches:\n  default:\n    backend: memory\n  reports:\n    backend: file\n    dir: {}\n",
        dir.path().display()
    );
    let settings = Settings::from_yaml_str(&yaml).unwrap();
    let registry = settings.build_registry().unwrap();

    assert_eq!(registry.names(), vec!["default", "reports"]);

    // The file-backed instance writes into the declared directory.
    let reports = registry.get("reports").unwrap();
    assert!(
        reports
            .set_if_absent("k", "v", std::time::Duration::from_secs(60))
            .unwrap()
    );
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_some());
}

#[test]
fn build_registry_supplies_a_default_cache() {
    let settings = Settings::from_yaml_str("caches: {}").unwrap();
    let registry = settings.build_registry().unwrap();

    assert!(registry.get(DEFAULT_CACHE).is_ok());
}

#[test]
fn settings_round_trip_through_yaml() {
    let yaml = "caches:\n  default:\n    backend: memory\n";
    let settings = Settings::from_yaml_str(yaml).unwrap();
    let dumped = serde_yaml::to_string(&settings).unwrap();
    let reparsed = Settings::from_yaml_str(&dumped).unwrap();

    assert_eq!(reparsed.caches.len(), settings.caches.len());
}
