//! Tests for command dispatch over an injected container

use std::sync::Arc;

use tempfile::TempDir;

use escalog::cli::commands::dispatch;
use escalog::cli::{Commands, ConfigCommands};
use escalog::config::Settings;
use escalog::domain::LogLevel;
use escalog::exitcode;
use escalog::infrastructure::traits::RealFileSystem;
use escalog::infrastructure::ServiceContainer;
use escalog::util::testing::{init_test_setup, RecordingConsole};

fn container(temp: &TempDir) -> (Arc<RecordingConsole>, ServiceContainer) {
    init_test_setup();
    let settings = Settings {
        log_dir: temp.path().join("logs"),
        ..Settings::default()
    };
    let console = Arc::new(RecordingConsole::new());
    let container =
        ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), console.clone());
    (console, container)
}

#[test]
fn given_log_information_command_when_dispatching_then_prints_line_only() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (console, container) = container(&temp);

    // Act
    dispatch(
        &Commands::Log {
            level: LogLevel::Information,
            text: "ready".into(),
        },
        &container,
    )
    .unwrap();

    // Assert
    assert_eq!(console.lines(), vec!["Information: ready".to_string()]);
    assert!(!temp.path().join("logs").exists());
}

#[test]
fn given_mail_command_with_invalid_recipient_when_dispatching_then_exit_code_is_dataerr() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (console, container) = container(&temp);

    // Act
    let err = dispatch(
        &Commands::Mail {
            recipient: "nobody".into(),
            content: "hi".into(),
        },
        &container,
    )
    .unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(console.lines().is_empty());
}

#[test]
fn given_append_command_when_dispatching_then_line_is_in_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (_console, container) = container(&temp);
    let path = temp.path().join("notes.txt");

    // Act
    dispatch(
        &Commands::Append {
            path: path.clone(),
            line: "remember".into(),
        },
        &container,
    )
    .unwrap();

    // Assert
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "remember\n");
}

#[test]
fn given_multiline_append_when_dispatching_then_rejected_as_data_error() {
    let temp = TempDir::new().unwrap();
    let (_console, container) = container(&temp);

    let err = dispatch(
        &Commands::Append {
            path: temp.path().join("notes.txt"),
            line: "a\nb".into(),
        },
        &container,
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(!temp.path().join("notes.txt").exists());
}

#[test]
fn given_run_command_when_dispatching_then_succeeds_despite_invalid_startup_address() {
    let temp = TempDir::new().unwrap();
    let (console, container) = container(&temp);

    dispatch(&Commands::Run, &container).unwrap();

    assert!(console
        .lines()
        .iter()
        .any(|l| l.starts_with("Error: An error occurred: ")));
    assert!(temp.path().join("logs/Error-log-file.txt").exists());
}

#[test]
fn given_config_show_when_dispatching_then_prints_effective_settings() {
    let temp = TempDir::new().unwrap();
    let (console, container) = container(&temp);

    dispatch(
        &Commands::Config {
            command: ConfigCommands::Show,
        },
        &container,
    )
    .unwrap();

    let output = console.lines().join("\n");
    assert!(output.contains("admin_recipient = \"admin@example.com\""));
    assert!(output.contains("[startup]"));
}
