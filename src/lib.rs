//! Severity logger with escalation to protected log files and e-mail.
//!
//! Layers, inner to outer:
//! - [`domain`]: levels, recipients, file naming
//! - [`application`]: the `MailSender`, `LineWriter`, `Logger` services and `Program`
//! - [`infrastructure`]: I/O boundaries, per-path locks, the service container
//! - [`cli`]: argument parsing and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
