//! Penrose code block rendering for markdown notes.
//!
//! This crate finds ```` ```penrose ```` fenced code blocks in a markdown
//! document, resolves each block's trio through a
//! [`SourceReader`](penrose_trio::SourceReader), hands the trio to a
//! [`DiagramCompiler`] and splices the resulting SVG (or the compiler's
//! error text) back into the document.
//!
//! # Architecture
//!
//! - [`fence`]: fenced block discovery (`extract_blocks`, `DiagramBlock`)
//! - [`compiler`]: the `DiagramCompiler` boundary and `CommandCompiler`
//! - [`processor`]: `BlockProcessor`, the per-block render callback
//! - [`html`]: HTML output for rendered blocks
//!
//! # Example
//!
//! ```ignore
//! use penrose_blocks::{BlockProcessor, CommandCompiler};
//! use penrose_vault::VaultReader;
//!
//! let processor = BlockProcessor::new(
//!     VaultReader::new("notes"),
//!     CommandCompiler::new("penrose-compile"),
//! );
//! let rendered = processor.render_document(&markdown).await;
//! ```

mod compiler;
mod fence;
mod html;
mod processor;

pub use compiler::{CommandCompiler, CompileError, CompileStage, DiagramCompiler};
pub use fence::{DiagramBlock, extract_blocks};
pub use processor::{BlockOutput, BlockProcessor, RenderedDocument, resolve_blocks};
