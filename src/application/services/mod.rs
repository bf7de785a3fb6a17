//! Application services
//!
//! Each collaborator is a trait with one concrete implementation, so that
//! callers can be tested against fakes. Implementations depend on I/O
//! boundary traits (FileSystem, Console) and on each other's traits.

mod file_writer;
mod logger;
mod mail;
mod program;

pub use file_writer::{
    CustomFileWriter, CustomFileWriterFactory, LineWriter, LineWriterFactory, WriterOptions,
};
pub use logger::{EscalatingLogger, Logger, LoggerOptions};
pub use mail::{ConsoleMailSender, MailSender};
pub use program::{Program, StartupOptions};
