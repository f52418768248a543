//! Vault error types.

use std::path::PathBuf;

/// Semantic error categories for vault reads.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum VaultErrorKind {
    /// Nothing exists at the reference.
    NotFound,
    /// Something exists at the reference, but it is not a regular file.
    NotAFile,
    /// Permission denied.
    PermissionDenied,
    /// Empty reference, or one that points outside the vault.
    InvalidPath,
    /// File exists but is not valid UTF-8 text.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Vault error with semantic kind and underlying source.
#[derive(Debug)]
pub struct VaultError {
    /// Semantic error category.
    pub kind: VaultErrorKind,
    /// Vault-relative reference (if applicable).
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VaultError {
    /// Create a new vault error.
    #[must_use]
    pub fn new(kind: VaultErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(VaultErrorKind::NotFound).with_path(path)
    }

    /// Create a vault error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => VaultErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => VaultErrorKind::PermissionDenied,
            std::io::ErrorKind::IsADirectory => VaultErrorKind::NotAFile,
            std::io::ErrorKind::InvalidData => VaultErrorKind::InvalidData,
            _ => VaultErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: foo/bar)"
        let kind_str = match self.kind {
            VaultErrorKind::NotFound => "Not found",
            VaultErrorKind::NotAFile => "Not a file",
            VaultErrorKind::PermissionDenied => "Permission denied",
            VaultErrorKind::InvalidPath => "Invalid path",
            VaultErrorKind::InvalidData => "Invalid data",
            VaultErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_vault_error_new() {
        let err = VaultError::new(VaultErrorKind::NotFound);

        assert_eq!(err.kind, VaultErrorKind::NotFound);
        assert!(err.path.is_none());
    }

    #[test]
    fn test_vault_error_not_found() {
        let err = VaultError::not_found("diagrams/sets.domain");

        assert_eq!(err.kind, VaultErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("diagrams/sets.domain")));
    }

    #[test]
    fn test_vault_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = VaultError::io(io_err, "sets.style");

        assert_eq!(err.kind, VaultErrorKind::PermissionDenied);
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_vault_error_io_invalid_data() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err = VaultError::io(io_err, "image.png");

        assert_eq!(err.kind, VaultErrorKind::InvalidData);
    }

    #[test]
    fn test_vault_error_display_simple() {
        let err = VaultError::new(VaultErrorKind::InvalidPath);

        assert_eq!(err.to_string(), "Invalid path");
    }

    #[test]
    fn test_vault_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = VaultError::io(io_err, "sets.domain");

        assert_eq!(
            err.to_string(),
            "Not found: file not found (path: sets.domain)"
        );
    }

    #[test]
    fn test_vault_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VaultError>();
    }
}
