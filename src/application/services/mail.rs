//! Simulated e-mail delivery
//!
//! Validates the recipient and prints a confirmation line in place of
//! talking to a mail server.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Email, Recipient};
use crate::infrastructure::traits::Console;

/// Sends e-mail notifications.
pub trait MailSender: Send + Sync {
    /// Send `content` to `recipient`.
    ///
    /// Fails with `DomainError::InvalidRecipient` when the address has no `@`.
    fn send_mail(&self, recipient: &str, content: &str) -> ApplicationResult<()>;
}

/// Mail sender that "delivers" by writing a confirmation to the console.
pub struct ConsoleMailSender {
    console: Arc<dyn Console>,
}

impl ConsoleMailSender {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

impl MailSender for ConsoleMailSender {
    fn send_mail(&self, recipient: &str, content: &str) -> ApplicationResult<()> {
        let recipient = Recipient::parse(recipient).inspect_err(|e| debug!("send_mail: {}", e))?;
        let email = Email::new(recipient, content);
        debug!("send_mail: to={}", email.recipient);

        self.console
            .write_line(&email.confirmation())
            .with_context("write mail confirmation")
    }
}
