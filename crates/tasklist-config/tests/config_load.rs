//! Config loading and validation tests for tasklist-config.
// crates/tasklist-config/tests/config_load.rs
// =============================================================================
// Module: Config Loading and Validation Tests
// Description: Validate defaults, file loading, and value limits.
// Purpose: Ensure tasklist.toml parses strictly and rejects unsafe values.
// =============================================================================

use std::fs;

use tasklist_config::ConfigError;
use tasklist_config::DEFAULT_BIND;
use tasklist_config::DEFAULT_MAX_BODY_BYTES;
use tasklist_config::DEFAULT_MAX_FLASH_BYTES;
use tasklist_config::MAX_CONFIG_FILE_SIZE;
use tasklist_config::StoreType;
use tasklist_config::TasklistConfig;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

fn write_config(dir: &TempDir, content: &[u8]) -> Result<std::path::PathBuf, String> {
    let path = dir.path().join("tasklist.toml");
    fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok(path)
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn empty_config_applies_defaults() -> TestResult {
    let config = TasklistConfig::from_toml_str("").map_err(|err| err.to_string())?;
    if config.server.bind != DEFAULT_BIND {
        return Err(format!("unexpected bind {}", config.server.bind));
    }
    if config.server.max_body_bytes != DEFAULT_MAX_BODY_BYTES {
        return Err("unexpected max_body_bytes".to_string());
    }
    if config.server.max_flash_bytes != DEFAULT_MAX_FLASH_BYTES {
        return Err("unexpected max_flash_bytes".to_string());
    }
    if config.server.allow_non_loopback {
        return Err("non-loopback should default to false".to_string());
    }
    if !config.server.audit.enabled || config.server.audit.path.is_some() {
        return Err("audit should default to enabled on stderr".to_string());
    }
    if config.store.store_type != StoreType::Sqlite {
        return Err("store should default to sqlite".to_string());
    }
    Ok(())
}

#[test]
fn default_config_is_valid() -> TestResult {
    TasklistConfig::default().validate().map_err(|err| err.to_string())
}

#[test]
fn full_config_round_trips_values() -> TestResult {
    let config = TasklistConfig::from_toml_str(
        r#"
[server]
bind = "0.0.0.0:8080"
max_body_bytes = 4096
max_flash_bytes = 1024
allow_non_loopback = true

[server.audit]
enabled = false
path = "logs/audit.jsonl"

[store]
type = "memory"
"#,
    )
    .map_err(|err| err.to_string())?;
    let addr = config.server.bind_addr().map_err(|err| err.to_string())?;
    if addr.port() != 8080 || addr.ip().is_loopback() {
        return Err(format!("unexpected bind {addr}"));
    }
    if config.server.max_body_bytes != 4096 || config.server.max_flash_bytes != 1024 {
        return Err("limits not applied".to_string());
    }
    if config.server.audit.enabled {
        return Err("audit should be disabled".to_string());
    }
    if config.server.audit.path.as_deref() != Some("logs/audit.jsonl") {
        return Err("audit path not applied".to_string());
    }
    if config.store.store_type != StoreType::Memory {
        return Err("store type not applied".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    assert_invalid(TasklistConfig::from_toml_str("[server]\nport = 5000\n"), "parse error")?;
    assert_invalid(TasklistConfig::from_toml_str("[extra]\n"), "parse error")
}

#[test]
fn unknown_store_type_is_rejected() -> TestResult {
    assert_invalid(TasklistConfig::from_toml_str("[store]\ntype = \"redis\"\n"), "parse error")
}

#[test]
fn invalid_bind_is_rejected() -> TestResult {
    assert_invalid(
        TasklistConfig::from_toml_str("[server]\nbind = \"localhost\"\n"),
        "invalid bind address",
    )
}

#[test]
fn non_loopback_bind_requires_opt_in() -> TestResult {
    assert_invalid(
        TasklistConfig::from_toml_str("[server]\nbind = \"0.0.0.0:5000\"\n"),
        "non-loopback bind disallowed",
    )
}

#[test]
fn zero_limits_are_rejected() -> TestResult {
    assert_invalid(
        TasklistConfig::from_toml_str("[server]\nmax_body_bytes = 0\n"),
        "max_body_bytes must be greater than zero",
    )?;
    assert_invalid(
        TasklistConfig::from_toml_str("[server]\nmax_flash_bytes = 0\n"),
        "max_flash_bytes must be greater than zero",
    )
}

#[test]
fn oversized_flash_limit_is_rejected() -> TestResult {
    assert_invalid(
        TasklistConfig::from_toml_str("[server]\nmax_flash_bytes = 4097\n"),
        "max_flash_bytes must be at most 4096",
    )
}

#[test]
fn empty_audit_path_is_rejected() -> TestResult {
    assert_invalid(
        TasklistConfig::from_toml_str("[server.audit]\npath = \" \"\n"),
        "audit.path must be non-empty",
    )
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn load_reads_explicit_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, b"[server]\nbind = \"127.0.0.1:6000\"\n")?;
    let config = TasklistConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:6000" {
        return Err(format!("unexpected bind {}", config.server.bind));
    }
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(TasklistConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let mut content = b"# padding\n".to_vec();
    content.resize(MAX_CONFIG_FILE_SIZE + 1, b'#');
    let path = write_config(&dir, &content)?;
    assert_invalid(TasklistConfig::load(Some(&path)), "exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, &[0xff, 0xfe, 0x00])?;
    assert_invalid(TasklistConfig::load(Some(&path)), "must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, b"[server\nbind = 1")?;
    assert_invalid(TasklistConfig::load(Some(&path)), "parse error")
}

#[test]
fn load_unvalidated_defers_policy_checks_to_validate() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, b"[server]\nbind = \"0.0.0.0:5000\"\n")?;
    assert_invalid(TasklistConfig::load(Some(&path)), "non-loopback bind disallowed")?;
    let mut config =
        TasklistConfig::load_unvalidated(Some(&path)).map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "non-loopback bind disallowed")?;
    config.server.allow_non_loopback = true;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn load_unvalidated_still_rejects_malformed_files() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, b"[server]\nunknown = 1\n")?;
    assert_invalid(TasklistConfig::load_unvalidated(Some(&path)), "parse error")
}
