//! Filesystem-backed vault reader.

use std::path::{Component, Path, PathBuf};

use penrose_trio::SourceReader;

use crate::error::{VaultError, VaultErrorKind};

/// Reads diagram references from a vault directory.
///
/// References are paths relative to the vault root (e.g.,
/// `"diagrams/sets.domain"`). Absolute paths and `..` components are
/// rejected so a note can't reach outside its vault.
#[derive(Clone, Debug)]
pub struct VaultReader {
    root: PathBuf,
}

impl VaultReader {
    /// Create a reader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a reference to a path inside the vault.
    fn resolve(&self, reference: &str) -> Result<PathBuf, VaultError> {
        if reference.is_empty() {
            return Err(VaultError::new(VaultErrorKind::InvalidPath));
        }

        let relative = Path::new(reference);
        let inside_vault = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside_vault {
            return Err(VaultError::new(VaultErrorKind::InvalidPath).with_path(reference));
        }

        Ok(self.root.join(relative))
    }

    /// Read the file behind `reference`.
    ///
    /// # Errors
    ///
    /// - [`VaultErrorKind::InvalidPath`] for empty or escaping references
    /// - [`VaultErrorKind::NotFound`] if nothing exists at the reference
    /// - [`VaultErrorKind::NotAFile`] if the reference names a directory or other non-file
    /// - any other kind mapped from the underlying I/O error
    pub async fn read_file(&self, reference: &str) -> Result<String, VaultError> {
        let path = self.resolve(reference)?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| VaultError::io(e, reference))?;
        if !metadata.is_file() {
            return Err(VaultError::new(VaultErrorKind::NotAFile).with_path(reference));
        }

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| VaultError::io(e, reference))
    }
}

impl SourceReader for VaultReader {
    async fn read(&self, reference: &str) -> String {
        match self.read_file(reference).await {
            Ok(content) => {
                tracing::debug!(reference, "Read file");
                content
            }
            Err(e) => {
                tracing::warn!(reference, error = %e, "Failed to read file");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::test_logs::CapturedLogs;

    fn vault_with_files(files: &[(&str, &str)]) -> (TempDir, VaultReader) {
        let temp_dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = temp_dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let reader = VaultReader::new(temp_dir.path());
        (temp_dir, reader)
    }

    #[test]
    fn test_root() {
        let reader = VaultReader::new("notes/vault");
        assert_eq!(reader.root(), Path::new("notes/vault"));
    }

    #[tokio::test]
    async fn test_read_file() {
        let (_dir, reader) = vault_with_files(&[("sets.domain", "type Set")]);

        let content = reader.read_file("sets.domain").await.unwrap();

        assert_eq!(content, "type Set");
    }

    #[tokio::test]
    async fn test_read_nested_file() {
        let (_dir, reader) = vault_with_files(&[("diagrams/sets.style", "Set a { }")]);

        let content = reader.read_file("diagrams/sets.style").await.unwrap();

        assert_eq!(content, "Set a { }");
    }

    #[tokio::test]
    async fn test_read_current_dir_prefix() {
        let (_dir, reader) = vault_with_files(&[("sets.domain", "type Set")]);

        let content = reader.read_file("./sets.domain").await.unwrap();

        assert_eq!(content, "type Set");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let (_dir, reader) = vault_with_files(&[]);

        let err = reader.read_file("missing.domain").await.unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("missing.domain")));
    }

    #[tokio::test]
    async fn test_read_directory_is_not_a_file() {
        let (_dir, reader) = vault_with_files(&[("diagrams/sets.style", "")]);

        let err = reader.read_file("diagrams").await.unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::NotAFile);
    }

    #[tokio::test]
    async fn test_read_empty_reference() {
        let (_dir, reader) = vault_with_files(&[]);

        let err = reader.read_file("").await.unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn test_read_parent_reference_rejected() {
        let (_dir, reader) = vault_with_files(&[]);

        let err = reader.read_file("../secret.txt").await.unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn test_read_absolute_reference_rejected() {
        let (_dir, reader) = vault_with_files(&[]);

        let err = reader.read_file("/etc/passwd").await.unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn test_source_reader_returns_content() {
        let (_dir, reader) = vault_with_files(&[("sets.domain", "type Set")]);

        assert_eq!(reader.read("sets.domain").await, "type Set");
    }

    #[tokio::test]
    async fn test_source_reader_failures_return_empty() {
        let (_dir, reader) = vault_with_files(&[("diagrams/sets.style", "")]);

        assert_eq!(reader.read("missing.domain").await, "");
        assert_eq!(reader.read("diagrams").await, "");
        assert_eq!(reader.read("").await, "");
        assert_eq!(reader.read("../outside").await, "");
    }

    #[tokio::test]
    async fn test_source_reader_failure_logs_warning() {
        let (_dir, reader) = vault_with_files(&[]);
        let (logs, _guard) = CapturedLogs::install();

        reader.read("shapes/missing.domain").await;

        let logs = logs.contents();
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Failed to read file"), "{logs}");
        assert!(logs.contains("shapes/missing.domain"), "{logs}");
        assert!(logs.contains("Not found"), "{logs}");
    }

    #[tokio::test]
    async fn test_source_reader_success_logs_nothing_at_warn() {
        let (_dir, reader) = vault_with_files(&[("sets.domain", "type Set")]);
        let (logs, _guard) = CapturedLogs::install();

        reader.read("sets.domain").await;

        assert_eq!(logs.contents(), "");
    }

    #[tokio::test]
    async fn test_resolve_trio_from_vault() {
        let (_dir, reader) = vault_with_files(&[
            ("shapes.domain", "type Set"),
            ("shapes.style", "Set a { ... }"),
        ]);
        let source = "-- domain: shapes.domain\n-- style: shapes.style\n-- variation: abc123\nSet A";

        let trio = penrose_trio::resolve_trio(source, &reader).await;

        assert_eq!(trio.domain, "type Set");
        assert_eq!(trio.style, "Set a { ... }");
        assert_eq!(trio.variation, "abc123");
        assert_eq!(trio.substance, source);
    }
}
