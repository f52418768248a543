//! Mock vault implementation for testing.
//!
//! Provides [`MockVault`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::Mutex;

use penrose_trio::SourceReader;

/// In-memory vault for testing.
///
/// Serves file contents from a map and records every reference it was asked
/// for. Unknown references behave like the real reader: a warning is logged
/// and an empty string returned.
///
/// # Example
///
/// ```ignore
/// use penrose_vault::MockVault;
///
/// let vault = MockVault::new()
///     .with_file("sets.domain", "type Set")
///     .with_file("sets.style", "Set a { }");
///
/// let trio = penrose_trio::resolve_trio(source, &vault).await;
/// assert_eq!(vault.reads().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockVault {
    files: HashMap<String, String>,
    reads: Mutex<Vec<String>>,
}

impl MockVault {
    /// Create a new empty mock vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file under `reference`.
    #[must_use]
    pub fn with_file(mut self, reference: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(reference.into(), content.into());
        self
    }

    /// References read so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl SourceReader for MockVault {
    async fn read(&self, reference: &str) -> String {
        self.reads.lock().unwrap().push(reference.to_owned());
        if let Some(content) = self.files.get(reference) {
            content.clone()
        } else {
            tracing::warn!(reference, "Failed to read file");
            String::new()
        }
    }
}
