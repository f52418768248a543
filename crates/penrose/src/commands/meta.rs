//! `penrose meta` command implementation.

use std::path::PathBuf;

use clap::Args;
use penrose_trio::extract_metadata;

use super::{emit, read_text};
use crate::error::CliError;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Substance program to read directives from.
    file: PathBuf,
}

impl MetaArgs {
    /// Print the directives of a substance program as JSON.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let source = read_text(&self.file).await?;
        let meta = extract_metadata(&source);
        emit(&serde_json::to_string_pretty(&meta)?)
    }
}
