//! Protected append-only file writer
//!
//! A writer is bound to one path. Each append makes sure the file exists
//! (optionally telling the admin that it had to be created), lifts the
//! read-only flag, appends, and puts the flag back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::application::services::MailSender;
use crate::domain::{ensure_single_line, file_created_notice};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::PathLocks;

/// Appends lines to a single file.
pub trait LineWriter: Send + Sync {
    /// File this writer appends to.
    fn path(&self) -> &Path;

    /// Append one line, creating the file first if needed.
    ///
    /// Fails with `DomainError::MultiLineText` when `line` contains a line
    /// break; nothing is created or sent in that case.
    fn append_line(&self, line: &str) -> ApplicationResult<()>;
}

/// Produces writers bound to a path.
pub trait LineWriterFactory: Send + Sync {
    fn create(&self, path: &Path) -> Box<dyn LineWriter>;
}

/// Behaviour switches shared by every writer of a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Recipient of the "file was created" notice
    pub admin_recipient: String,
    /// Send the notice when a missing file is created
    pub notify_on_create: bool,
    /// Keep the file read-only between appends
    pub protect_files: bool,
}

/// File writer over the `FileSystem` boundary.
pub struct CustomFileWriter {
    fs: Arc<dyn FileSystem>,
    mail: Arc<dyn MailSender>,
    locks: Arc<PathLocks>,
    options: Arc<WriterOptions>,
    path: PathBuf,
}

impl CustomFileWriter {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        mail: Arc<dyn MailSender>,
        locks: Arc<PathLocks>,
        options: Arc<WriterOptions>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            mail,
            locks,
            options,
            path: path.into(),
        }
    }

    fn ensure_exists(&self) -> ApplicationResult<()> {
        if self.fs.exists(&self.path) {
            return Ok(());
        }

        info!("creating missing file {}", self.path.display());
        if self.options.notify_on_create {
            self.mail.send_mail(
                &self.options.admin_recipient,
                &file_created_notice(&self.path),
            )?;
        }

        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create parent directory", &self.path)?;
        self.fs
            .touch(&self.path)
            .with_path_context("create file", &self.path)
    }
}

impl LineWriter for CustomFileWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self, line), fields(path = %self.path.display()))]
    fn append_line(&self, line: &str) -> ApplicationResult<()> {
        ensure_single_line(line)?;

        let lock = self.locks.lock_for(&self.path);
        let _guard = lock.lock();

        self.ensure_exists()?;

        if !self.options.protect_files {
            return self
                .fs
                .append_line(&self.path, line)
                .with_path_context("append line", &self.path);
        }

        self.fs
            .set_readonly(&self.path, false)
            .with_path_context("make file writable", &self.path)?;

        // Protection goes back on even if the append failed.
        let appended = self
            .fs
            .append_line(&self.path, line)
            .with_path_context("append line", &self.path);
        let protected = self
            .fs
            .set_readonly(&self.path, true)
            .with_path_context("make file read-only", &self.path);
        debug!("append_line: done");

        appended.and(protected)
    }
}

/// Factory handing out `CustomFileWriter`s that share one lock registry.
pub struct CustomFileWriterFactory {
    fs: Arc<dyn FileSystem>,
    mail: Arc<dyn MailSender>,
    locks: Arc<PathLocks>,
    options: Arc<WriterOptions>,
}

impl CustomFileWriterFactory {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        mail: Arc<dyn MailSender>,
        locks: Arc<PathLocks>,
        options: WriterOptions,
    ) -> Self {
        Self {
            fs,
            mail,
            locks,
            options: Arc::new(options),
        }
    }
}

impl LineWriterFactory for CustomFileWriterFactory {
    fn create(&self, path: &Path) -> Box<dyn LineWriter> {
        Box::new(CustomFileWriter::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.mail),
            Arc::clone(&self.locks),
            Arc::clone(&self.options),
            path,
        ))
    }
}
