//! Note vault access for penrose diagram references.
//!
//! Diagram code blocks reference their domain and style files by paths
//! relative to the vault root. This crate provides the [`SourceReader`]
//! implementations that resolve those references:
//!
//! - [`VaultReader`] reads files from a vault directory on disk
//! - [`MockVault`] serves in-memory files for testing (behind `mock` feature flag)
//!
//! Both report unresolvable references as `tracing` warnings and hand back
//! an empty string, so diagram rendering always proceeds.
//!
//! # Example
//!
//! ```ignore
//! use penrose_trio::resolve_trio;
//! use penrose_vault::VaultReader;
//!
//! let vault = VaultReader::new("notes");
//! let trio = resolve_trio(source, &vault).await;
//! ```
//!
//! [`SourceReader`]: penrose_trio::SourceReader

mod error;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(test)]
mod test_logs;

pub use error::{VaultError, VaultErrorKind};
pub use fs::VaultReader;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVault;
