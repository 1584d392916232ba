//! CLI command implementations
//!
//! Each command returns a process exit code: 0 on success, 2 for
//! configuration errors, 5 for fatal errors.

pub mod filter;
pub mod init;
pub mod redact;
pub mod validate;
