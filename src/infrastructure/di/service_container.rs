//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{
    ConsoleMailSender, CustomFileWriterFactory, EscalatingLogger, LineWriterFactory, Logger,
    MailSender, Program,
};
use crate::config::Settings;
use crate::infrastructure::locks::PathLocks;
use crate::infrastructure::traits::{Console, FileSystem, RealFileSystem, StdoutConsole};

/// Container holding all application services.
///
/// The graph is built once, eagerly:
/// `Program -> Logger -> (MailSender, LineWriterFactory -> MailSender)`.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Console abstraction
    pub console: Arc<dyn Console>,

    /// Per-path append locks shared by all writers
    pub locks: Arc<PathLocks>,

    pub mail_sender: Arc<dyn MailSender>,
    pub writer_factory: Arc<dyn LineWriterFactory>,
    pub logger: Arc<dyn Logger>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(StdoutConsole))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        console: Arc<dyn Console>,
    ) -> Self {
        debug!("wiring services: log_dir={}", settings.log_dir.display());
        let settings = Arc::new(settings);
        let locks = Arc::new(PathLocks::new());

        let mail_sender: Arc<dyn MailSender> = Arc::new(ConsoleMailSender::new(Arc::clone(&console)));
        let writer_factory: Arc<dyn LineWriterFactory> = Arc::new(CustomFileWriterFactory::new(
            Arc::clone(&fs),
            Arc::clone(&mail_sender),
            Arc::clone(&locks),
            settings.writer_options(),
        ));
        let logger: Arc<dyn Logger> = Arc::new(EscalatingLogger::new(
            Arc::clone(&console),
            Arc::clone(&mail_sender),
            Arc::clone(&writer_factory),
            settings.logger_options(),
        ));

        Self {
            settings,
            fs,
            console,
            locks,
            mail_sender,
            writer_factory,
            logger,
        }
    }

    /// Build the startup routine over the container's services.
    pub fn program(&self) -> Program {
        Program::new(
            Arc::clone(&self.logger),
            Arc::clone(&self.mail_sender),
            self.settings.startup_options(),
        )
    }
}
