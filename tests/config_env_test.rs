//! Tests for the ESCALOG_* environment layer
//!
//! Kept in its own test binary with a single test: it mutates the process
//! environment, which other tests in the same binary would observe.

use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use escalog::config::Settings;

const VARS: [(&str, &str); 3] = [
    ("ESCALOG_NOTIFY_ON_CREATE", "false"),
    ("ESCALOG_LOG_DIR", "/srv/from-env"),
    ("ESCALOG_STARTUP__RECIPIENT", "env@example.com"),
];

/// Removes the variables again, also when an assertion panics.
struct EnvGuard;

impl EnvGuard {
    fn set() -> Self {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, _) in VARS {
            env::remove_var(key);
        }
    }
}

#[test]
fn given_env_vars_and_config_file_when_loading_then_env_wins() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("escalog.toml");
    fs::write(
        &file,
        r#"
log_dir = "/srv/from-file"
admin_recipient = "ops@example.com"
notify_on_create = true

[startup]
recipient = "file@example.com"
banner = "from file"
"#,
    )
    .unwrap();
    let _guard = EnvGuard::set();

    // Act
    let settings = Settings::load_from(None, Some(&file), true).unwrap();

    // Assert
    assert_eq!(settings.log_dir, PathBuf::from("/srv/from-env"));
    assert!(!settings.notify_on_create);
    assert_eq!(settings.startup.recipient, "env@example.com");
    // Keys without a variable keep the file's value
    assert_eq!(settings.admin_recipient, "ops@example.com");
    assert_eq!(settings.startup.banner, "from file");
}
