//! Test support: one-time tracing setup and recording fakes for every
//! service and I/O boundary trait.

use std::collections::HashMap;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use parking_lot::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::services::{LineWriter, LineWriterFactory, Logger, MailSender};
use crate::application::ApplicationResult;
use crate::domain::{DomainError, LogLevel, Recipient};
use crate::infrastructure::traits::{Console, FileSystem};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "escalog=trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

// ============================================================
// CONSOLE
// ============================================================

/// Console that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Console for RecordingConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

// ============================================================
// MAIL
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub recipient: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MailBehaviour {
    AcceptAll,
    Validate,
    RejectAll,
}

/// Mail sender that records what it was asked to send.
///
/// Only successful sends end up in `sent()`; `attempts()` counts all calls.
#[derive(Debug)]
pub struct RecordingMailSender {
    behaviour: MailBehaviour,
    sent: Mutex<Vec<SentMail>>,
    attempts: Mutex<usize>,
}

impl RecordingMailSender {
    /// Accepts any recipient.
    pub fn new() -> Self {
        Self::with_behaviour(MailBehaviour::AcceptAll)
    }

    /// Applies the same `@` rule as the real sender.
    pub fn validating() -> Self {
        Self::with_behaviour(MailBehaviour::Validate)
    }

    /// Rejects every recipient as invalid.
    pub fn failing() -> Self {
        Self::with_behaviour(MailBehaviour::RejectAll)
    }

    fn with_behaviour(behaviour: MailBehaviour) -> Self {
        Self {
            behaviour,
            sent: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl Default for RecordingMailSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MailSender for RecordingMailSender {
    fn send_mail(&self, recipient: &str, content: &str) -> ApplicationResult<()> {
        *self.attempts.lock() += 1;
        match self.behaviour {
            MailBehaviour::AcceptAll => {}
            MailBehaviour::Validate => {
                Recipient::parse(recipient)?;
            }
            MailBehaviour::RejectAll => {
                return Err(DomainError::InvalidRecipient {
                    recipient: recipient.to_string(),
                }
                .into());
            }
        }
        self.sent.lock().push(SentMail {
            recipient: recipient.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

// ============================================================
// LOGGER
// ============================================================

/// Logger that records entries without any side effects.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, text: &str) -> ApplicationResult<()> {
        self.entries.lock().push((level, text.to_string()));
        Ok(())
    }
}

// ============================================================
// WRITERS
// ============================================================

/// Writer factory whose writers record `(path, line)` pairs in one shared list.
#[derive(Debug, Default)]
pub struct RecordingWriterFactory {
    appended: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl RecordingWriterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appended(&self) -> Vec<(PathBuf, String)> {
        self.appended.lock().clone()
    }
}

impl LineWriterFactory for RecordingWriterFactory {
    fn create(&self, path: &Path) -> Box<dyn LineWriter> {
        Box::new(RecordingWriter {
            path: path.to_path_buf(),
            appended: Arc::clone(&self.appended),
        })
    }
}

struct RecordingWriter {
    path: PathBuf,
    appended: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl LineWriter for RecordingWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> ApplicationResult<()> {
        self.appended
            .lock()
            .push((self.path.clone(), line.to_string()));
        Ok(())
    }
}

// ============================================================
// FILESYSTEM
// ============================================================

#[derive(Debug, Clone, Default)]
struct MemFile {
    content: String,
    readonly: bool,
}

/// In-memory filesystem that enforces the read-only flag on appends
/// and records every mutating call in order.
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    files: Mutex<HashMap<PathBuf, MemFile>>,
    ops: Mutex<Vec<String>>,
    fail_appends: bool,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filesystem whose appends always fail with an I/O error.
    pub fn failing_appends() -> Self {
        Self {
            fail_appends: true,
            ..Self::default()
        }
    }

    /// Mutating calls so far, e.g. `["touch", "writable", "append", "readonly"]`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().clone()
    }

    fn record(&self, op: &str) {
        self.ops.lock().push(op.to_string());
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        self.record("touch");
        self.files.lock().entry(path.to_path_buf()).or_default();
        Ok(())
    }

    fn append_line(&self, path: &Path, line: &str) -> io::Result<()> {
        self.record("append");
        if self.fail_appends {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let mut files = self.files.lock();
        let file = files.get_mut(path).ok_or_else(|| Self::not_found(path))?;
        if file.readonly {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only file: {}", path.display()),
            ));
        }
        file.content.push_str(line);
        file.content.push('\n');
        Ok(())
    }

    fn set_readonly(&self, path: &Path, readonly: bool) -> io::Result<()> {
        self.record(if readonly { "readonly" } else { "writable" });
        let mut files = self.files.lock();
        let file = files.get_mut(path).ok_or_else(|| Self::not_found(path))?;
        file.readonly = readonly;
        Ok(())
    }

    fn is_readonly(&self, path: &Path) -> io::Result<bool> {
        self.files
            .lock()
            .get(path)
            .map(|f| f.readonly)
            .ok_or_else(|| Self::not_found(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .get(path)
            .map(|f| f.content.clone())
            .ok_or_else(|| Self::not_found(path))
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
