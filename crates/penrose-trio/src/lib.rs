//! Trio resolution for penrose diagram code blocks.
//!
//! A penrose code block holds a substance program whose comment directives
//! name the domain schema and style sheet it is drawn with:
//!
//! ```text
//! -- domain: shapes.domain
//! -- style: shapes.style
//! -- variation: abc123
//! Set A
//! ```
//!
//! This crate provides:
//! - [`extract_metadata`]: parse the directives into [`Metadata`]
//! - [`resolve_trio`]: read the referenced files through a [`SourceReader`]
//!   and bundle everything into a [`Trio`] for the diagram compiler
//!
//! # Example
//!
//! ```ignore
//! use penrose_trio::{ReadFn, resolve_trio};
//!
//! let reader = ReadFn::new(|path: String| async move {
//!     tokio::fs::read_to_string(path).await.unwrap_or_default()
//! });
//! let trio = resolve_trio(source, &reader).await;
//! ```

mod meta;
mod reader;
mod trio;

pub use meta::{Metadata, extract_metadata};
pub use reader::{ReadFn, SourceReader};
pub use trio::{Trio, resolve_trio};
