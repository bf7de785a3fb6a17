//! Escalating console logger
//!
//! Every line goes to the console. Warning and Error lines are also
//! appended to a per-level file and mailed to the admin.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{LineWriterFactory, MailSender};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{format_log_line, log_file_path, LogLevel};
use crate::infrastructure::traits::Console;

/// Logs a line of text at a severity.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, text: &str) -> ApplicationResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Directory holding the per-level files
    pub log_dir: PathBuf,
    /// Appended to the level name to form the file name
    pub log_file_suffix: String,
    /// Recipient of escalation e-mails
    pub admin_recipient: String,
}

pub struct EscalatingLogger {
    console: Arc<dyn Console>,
    mail: Arc<dyn MailSender>,
    writers: Arc<dyn LineWriterFactory>,
    options: LoggerOptions,
}

impl EscalatingLogger {
    pub fn new(
        console: Arc<dyn Console>,
        mail: Arc<dyn MailSender>,
        writers: Arc<dyn LineWriterFactory>,
        options: LoggerOptions,
    ) -> Self {
        Self {
            console,
            mail,
            writers,
            options,
        }
    }
}

impl Logger for EscalatingLogger {
    fn log(&self, level: LogLevel, text: &str) -> ApplicationResult<()> {
        self.console
            .write_line(&format_log_line(level, text))
            .with_context("write log line")?;

        if !level.escalates() {
            return Ok(());
        }

        let path = log_file_path(&self.options.log_dir, level, &self.options.log_file_suffix);
        debug!("log: escalating {} to {}", level, path.display());

        // The writer rejects multi-line text; no mail goes out then.
        self.writers.create(&path).append_line(text)?;
        self.mail.send_mail(&self.options.admin_recipient, text)
    }
}
