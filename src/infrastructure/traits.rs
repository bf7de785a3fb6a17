//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create the file if it is missing. Never truncates.
    fn touch(&self, path: &Path) -> io::Result<()>;

    /// Append `line` plus a newline to an existing file.
    fn append_line(&self, path: &Path, line: &str) -> io::Result<()>;

    /// Mark the file read-only (`true`) or writable (`false`).
    fn set_readonly(&self, path: &Path, readonly: bool) -> io::Result<()>;

    /// Check the file's read-only flag.
    fn is_readonly(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Line-oriented console abstraction.
///
/// Carries the program's own output; diagnostics go through `tracing`.
pub trait Console: Send + Sync {
    /// Write one line followed by a newline.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(())
    }

    fn append_line(&self, path: &Path, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        writeln!(file, "{}", line)
    }

    /// On Unix only the write bits change: read-only clears all of them,
    /// writable restores the owner's. Group and other never gain write access.
    #[cfg(unix)]
    fn set_readonly(&self, path: &Path, readonly: bool) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        let mode = perms.mode();
        let new_mode = if readonly {
            mode & !0o222
        } else {
            mode | 0o200
        };
        if new_mode == mode {
            return Ok(());
        }
        perms.set_mode(new_mode);
        std::fs::set_permissions(path, perms)
    }

    #[cfg(not(unix))]
    fn set_readonly(&self, path: &Path, readonly: bool) -> io::Result<()> {
        let mut perms = std::fs::metadata(path)?.permissions();
        if perms.readonly() == readonly {
            return Ok(());
        }
        perms.set_readonly(readonly);
        std::fs::set_permissions(path, perms)
    }

    fn is_readonly(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.permissions().readonly())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Real console writing to stdout.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }
}
