//! Domain entities: core data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::DomainError;

/// Severity of a log line.
///
/// Ordering follows importance, so `Warning > Information`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Information,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
        }
    }

    /// Whether a line at this level goes to a log file and out by e-mail.
    pub fn escalates(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    /// Case-insensitive; accepts the usual short forms (`info`, `warn`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "information" | "info" => Ok(LogLevel::Information),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::UnknownLogLevel(s.to_string())),
        }
    }
}

/// An e-mail address that passed the `@` check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipient(String);

impl Recipient {
    /// Validate a raw address.
    ///
    /// The only rule is that the address contains `@`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.contains('@') {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::InvalidRecipient {
                recipient: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A simulated e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: Recipient,
    pub content: String,
}

impl Email {
    pub fn new(recipient: Recipient, content: impl Into<String>) -> Self {
        Self {
            recipient,
            content: content.into(),
        }
    }

    /// Line printed in place of actually sending the e-mail.
    pub fn confirmation(&self) -> String {
        format!(
            "Sent e-mail to {} with content \"{}\"",
            self.recipient, self.content
        )
    }
}

/// Console form of a log line: `<Level>: <text>`.
pub fn format_log_line(level: LogLevel, text: &str) -> String {
    format!("{}: {}", level, text)
}

/// Path of the file that collects escalated lines for `level`.
pub fn log_file_path(log_dir: &Path, level: LogLevel, suffix: &str) -> PathBuf {
    log_dir.join(format!("{}{}", level, suffix))
}

/// Content of the notification sent when a log file had to be created.
pub fn file_created_notice(path: &Path) -> String {
    format!(
        "The file {} was created since it didn't exist.",
        path.display()
    )
}

/// A file line may not carry its own line break.
pub fn ensure_single_line(text: &str) -> Result<(), DomainError> {
    if text.contains(['\n', '\r']) {
        return Err(DomainError::MultiLineText(text.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_warning_and_error_when_checking_escalation_then_only_they_escalate() {
        let escalating: Vec<LogLevel> = LogLevel::ALL
            .into_iter()
            .filter(LogLevel::escalates)
            .collect();
        assert_eq!(escalating, vec![LogLevel::Warning, LogLevel::Error]);
    }

    #[test]
    fn given_level_names_when_parsing_then_accepts_any_case_and_short_forms() {
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Information);
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!(
            "fatal".parse::<LogLevel>(),
            Err(DomainError::UnknownLogLevel("fatal".to_string()))
        );
    }

    #[test]
    fn given_address_without_at_when_parsing_recipient_then_fails() {
        let err = Recipient::parse("some-invalid-email-address.com").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidRecipient {
                recipient: "some-invalid-email-address.com".to_string()
            }
        );
    }

    #[test]
    fn given_email_when_rendering_confirmation_then_quotes_content() {
        let email = Email::new(Recipient::parse("a@b.c").unwrap(), "hello");
        assert_eq!(
            email.confirmation(),
            "Sent e-mail to a@b.c with content \"hello\""
        );
    }

    #[test]
    fn given_level_when_building_log_file_path_then_joins_dir_level_and_suffix() {
        let path = log_file_path(Path::new("/var/log/app"), LogLevel::Error, "-log-file.txt");
        assert_eq!(path, PathBuf::from("/var/log/app/Error-log-file.txt"));
    }

    #[test]
    fn given_level_and_text_when_formatting_then_prefixes_level() {
        assert_eq!(
            format_log_line(LogLevel::Information, "ready"),
            "Information: ready"
        );
    }

    #[test]
    fn given_text_with_line_break_when_checking_single_line_then_fails() {
        assert!(ensure_single_line("one line").is_ok());
        assert_eq!(
            ensure_single_line("a\nb"),
            Err(DomainError::MultiLineText("a\nb".to_string()))
        );
        assert!(ensure_single_line("a\r\nb").is_err());
    }
}
