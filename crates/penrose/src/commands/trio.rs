//! `penrose trio` command implementation.

use std::path::PathBuf;

use clap::Args;
use penrose_blocks::resolve_blocks;
use penrose_config::{CliSettings, Config};
use penrose_vault::VaultReader;

use super::{emit, read_text};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the trio command.
#[derive(Args)]
pub(crate) struct TrioArgs {
    /// Markdown note containing penrose code blocks.
    note: PathBuf,

    /// Path to configuration file (default: auto-discover penrose.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault root that references resolve against (overrides config).
    #[arg(long, env = "PENROSE_VAULT")]
    vault: Option<PathBuf>,
}

impl TrioArgs {
    /// Print the resolved trio of every penrose block in a note as JSON.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            vault_root: self.vault,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read_text(&self.note).await?;
        let reader = VaultReader::new(&config.vault_resolved.root);
        let trios = resolve_blocks(&markdown, &config.blocks.language, &reader).await;

        if trios.is_empty() {
            Output::new().warning(&format!(
                "No `{}` code blocks in {}",
                config.blocks.language,
                self.note.display()
            ));
        }

        emit(&serde_json::to_string_pretty(&trios)?)
    }
}
