//! `penrose render` command implementation.

use std::path::PathBuf;

use clap::Args;
use penrose_blocks::{BlockProcessor, CommandCompiler};
use penrose_config::{CliSettings, Config};
use penrose_vault::VaultReader;

use super::{emit, read_text};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown note containing penrose code blocks.
    note: PathBuf,

    /// Path to configuration file (default: auto-discover penrose.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault root that references resolve against (overrides config).
    #[arg(long, env = "PENROSE_VAULT")]
    vault: Option<PathBuf>,

    /// External compiler command (overrides config).
    #[arg(long, env = "PENROSE_COMPILER")]
    compiler: Option<String>,

    /// Write the rendered document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (show file reads and compiler diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Render every penrose block in a note through the external compiler.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            vault_root: self.vault,
            compiler_command: self.compiler,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let compiler_config = config.require_compiler()?;

        let reader = VaultReader::new(&config.vault_resolved.root);
        let compiler = CommandCompiler::new(&compiler_config.command).args(&compiler_config.args);
        if self.verbose {
            output.info(&format!("Vault root: {}", reader.root().display()));
            output.info(&format!("Compiler: {}", compiler.command()));
        }

        let markdown = read_text(&self.note).await?;
        tracing::info!(note = %self.note.display(), "Rendering note");
        let processor = BlockProcessor::new(reader, compiler)
            .language(&config.blocks.language)
            .class(&config.blocks.class);

        let rendered = processor.render_document(&markdown).await;

        match &self.output {
            Some(path) => tokio::fs::write(path, &rendered.content).await?,
            None => emit(&rendered.content)?,
        }

        let summary = format!(
            "Rendered {} diagram(s), {} failed",
            rendered.rendered, rendered.failed
        );
        if rendered.failed > 0 {
            output.warning(&summary);
        } else {
            output.success(&summary);
        }

        Ok(())
    }
}
