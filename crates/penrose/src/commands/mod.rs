//! CLI command implementations.

pub(crate) mod meta;
pub(crate) mod render;
pub(crate) mod trio;

pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;
pub(crate) use trio::TrioArgs;

use std::io::Write;
use std::path::Path;

use crate::error::CliError;

/// Read a UTF-8 text file, keeping the path in the error.
async fn read_text(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a command result to stdout.
fn emit(content: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
