//! Tests for the startup routine

use std::sync::Arc;

use tempfile::TempDir;

use escalog::application::services::{Program, StartupOptions};
use escalog::config::Settings;
use escalog::domain::LogLevel;
use escalog::infrastructure::traits::RealFileSystem;
use escalog::infrastructure::ServiceContainer;
use escalog::util::testing::{
    init_test_setup, InMemoryFileSystem, RecordingConsole, RecordingLogger, RecordingMailSender,
};

fn startup(recipient: &str) -> StartupOptions {
    StartupOptions {
        banner: "starting up".to_string(),
        recipient: recipient.to_string(),
        message: "Program has started.".to_string(),
    }
}

#[test]
fn given_invalid_startup_recipient_when_running_then_logs_warning_then_error() {
    // Arrange
    init_test_setup();
    let logger = Arc::new(RecordingLogger::new());
    let mail = Arc::new(RecordingMailSender::validating());
    let program = Program::new(
        logger.clone(),
        mail.clone(),
        startup("some-invalid-email-address.com"),
    );

    // Act
    program.run().unwrap();

    // Assert
    let entries = logger.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], (LogLevel::Warning, "starting up".to_string()));
    assert_eq!(entries[1].0, LogLevel::Error);
    assert!(
        entries[1].1.starts_with("An error occurred: "),
        "got: {}",
        entries[1].1
    );
    assert!(entries[1].1.contains("some-invalid-email-address.com"));
    assert_eq!(mail.attempts(), 1);
    assert!(mail.sent().is_empty());
}

#[test]
fn given_valid_startup_recipient_when_running_then_sends_notice_and_logs_no_error() {
    // Arrange
    init_test_setup();
    let logger = Arc::new(RecordingLogger::new());
    let mail = Arc::new(RecordingMailSender::validating());
    let program = Program::new(logger.clone(), mail.clone(), startup("ops@example.com"));

    // Act
    program.run().unwrap();

    // Assert
    assert_eq!(
        logger.entries(),
        vec![(LogLevel::Warning, "starting up".to_string())]
    );
    let sent = mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "ops@example.com");
    assert_eq!(sent[0].content, "Program has started.");
}

#[test]
fn given_mail_sender_that_always_fails_when_running_then_error_is_logged_not_returned() {
    // Arrange
    init_test_setup();
    let logger = Arc::new(RecordingLogger::new());
    let program = Program::new(
        logger.clone(),
        Arc::new(RecordingMailSender::failing()),
        startup("ops@example.com"),
    );

    // Act
    let result = program.run();

    // Assert
    assert!(result.is_ok());
    assert_eq!(logger.entries().last().map(|e| e.0), Some(LogLevel::Error));
}

#[test]
fn given_default_settings_when_running_container_program_then_reaches_error_branch() {
    // Arrange
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let settings = Settings {
        log_dir: temp.path().to_path_buf(),
        ..Settings::default()
    };
    let console = Arc::new(RecordingConsole::new());
    let container =
        ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), console.clone());

    // Act
    container.program().run().unwrap();

    // Assert
    let lines = console.lines();
    let log_lines: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("Warning: ") || l.starts_with("Error: "))
        .collect();
    assert_eq!(log_lines.len(), 2);
    assert_eq!(
        log_lines[0],
        "Warning: Some warning - program is starting up or whatever"
    );
    assert!(log_lines[1].starts_with("Error: An error occurred: "));

    let warning_file = temp.path().join("Warning-log-file.txt");
    let error_file = temp.path().join("Error-log-file.txt");
    assert_eq!(
        std::fs::read_to_string(&warning_file).unwrap(),
        "Some warning - program is starting up or whatever\n"
    );
    let error_content = std::fs::read_to_string(&error_file).unwrap();
    assert_eq!(error_content.lines().count(), 1);
    assert!(error_content.starts_with("An error occurred: "));

    // Two creation notices plus one escalation mail per logged line
    let mails = lines
        .iter()
        .filter(|l| l.starts_with("Sent e-mail to admin@example.com"))
        .count();
    assert_eq!(mails, 4);
}

#[test]
fn given_in_memory_fs_when_running_twice_then_files_are_created_once() {
    // Arrange
    init_test_setup();
    let settings = Settings {
        log_dir: "/mem/logs".into(),
        ..Settings::default()
    };
    let fs = Arc::new(InMemoryFileSystem::new());
    let console = Arc::new(RecordingConsole::new());
    let container = ServiceContainer::with_deps(settings, fs.clone(), console.clone());

    // Act
    container.program().run().unwrap();
    container.program().run().unwrap();

    // Assert
    let touches = fs.ops().iter().filter(|op| *op == "touch").count();
    assert_eq!(touches, 2, "one Warning and one Error file");
    let notices = console
        .lines()
        .iter()
        .filter(|l| l.contains("was created since it didn't exist"))
        .count();
    assert_eq!(notices, 2);
}
