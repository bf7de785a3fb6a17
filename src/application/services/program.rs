//! Startup routine

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::services::{Logger, MailSender};
use crate::application::ApplicationResult;
use crate::domain::LogLevel;

/// What the startup routine logs and whom it notifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOptions {
    pub banner: String,
    pub recipient: String,
    pub message: String,
}

/// Logs a startup warning and announces the start by e-mail.
///
/// Any failure of that sequence is logged at Error level instead of
/// being returned.
pub struct Program {
    logger: Arc<dyn Logger>,
    mail: Arc<dyn MailSender>,
    options: StartupOptions,
}

impl Program {
    pub fn new(logger: Arc<dyn Logger>, mail: Arc<dyn MailSender>, options: StartupOptions) -> Self {
        Self {
            logger,
            mail,
            options,
        }
    }

    /// Run the startup routine.
    ///
    /// Only fails when logging the startup error fails as well.
    #[instrument(skip(self))]
    pub fn run(&self) -> ApplicationResult<()> {
        match self.start() {
            Ok(()) => {
                info!("startup notification sent");
                Ok(())
            }
            Err(e) => {
                warn!("startup failed: {}", e);
                self.logger
                    .log(LogLevel::Error, &format!("An error occurred: {}", e))
            }
        }
    }

    fn start(&self) -> ApplicationResult<()> {
        self.logger.log(LogLevel::Warning, &self.options.banner)?;
        self.mail
            .send_mail(&self.options.recipient, &self.options.message)
    }
}
