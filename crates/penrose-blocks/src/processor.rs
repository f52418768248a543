//! Render callback for penrose code blocks.
//!
//! [`BlockProcessor`] is invoked once per code block: it resolves the
//! block's trio, passes it to the compiler and produces either a rendered
//! diagram or the compiler's error text. It never fails; every block ends
//! up with some output.

use penrose_trio::{SourceReader, Trio, resolve_trio};

use crate::compiler::DiagramCompiler;
use crate::fence::extract_blocks;
use crate::html::{diagram_html, error_html};

/// Default fence language of diagram blocks.
const DEFAULT_LANGUAGE: &str = "penrose";

/// Default CSS class of rendered output.
const DEFAULT_CLASS: &str = "penrose-diagram";

/// Output of rendering one code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockOutput {
    /// Rendered SVG document.
    Svg(String),
    /// Error text from the compiler.
    Error(String),
}

impl BlockOutput {
    /// HTML replacing the code block.
    ///
    /// SVG is embedded as-is inside a container of the given `width`; error
    /// text is escaped.
    #[must_use]
    pub fn to_html(&self, class: &str, width: Option<&str>) -> String {
        match self {
            Self::Svg(svg) => diagram_html(svg, class, width),
            Self::Error(message) => error_html(message, class),
        }
    }
}

/// Markdown document with its diagram blocks replaced by output HTML.
#[derive(Debug)]
pub struct RenderedDocument {
    /// Document content.
    pub content: String,
    /// Number of blocks rendered to SVG.
    pub rendered: usize,
    /// Number of blocks replaced by error text.
    pub failed: usize,
}

/// Resolve the trio of every diagram block in `markdown`, in document order.
pub async fn resolve_blocks<R: SourceReader>(
    markdown: &str,
    language: &str,
    reader: &R,
) -> Vec<Trio> {
    let mut trios = Vec::new();
    for block in extract_blocks(markdown, language) {
        trios.push(resolve_trio(&block.source, reader).await);
    }
    trios
}

/// Render callback for diagram code blocks.
///
/// # Example
///
/// ```ignore
/// use penrose_blocks::{BlockOutput, BlockProcessor, CommandCompiler};
/// use penrose_vault::VaultReader;
///
/// let processor = BlockProcessor::new(VaultReader::new("notes"), CommandCompiler::new("roger"))
///     .class("diagram");
///
/// match processor.render_block(source).await {
///     BlockOutput::Svg(svg) => println!("{svg}"),
///     BlockOutput::Error(message) => eprintln!("{message}"),
/// }
/// ```
pub struct BlockProcessor<R, C> {
    reader: R,
    compiler: C,
    language: String,
    class: String,
}

impl<R: SourceReader, C: DiagramCompiler> BlockProcessor<R, C> {
    /// Create a processor reading references through `reader` and
    /// compiling with `compiler`.
    #[must_use]
    pub fn new(reader: R, compiler: C) -> Self {
        Self {
            reader,
            compiler,
            language: DEFAULT_LANGUAGE.to_owned(),
            class: DEFAULT_CLASS.to_owned(),
        }
    }

    /// Set the fence language of diagram blocks (default: `penrose`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the CSS class of rendered output (default: `penrose-diagram`).
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Render the body of one code block.
    pub async fn render_block(&self, source: &str) -> BlockOutput {
        let trio = resolve_trio(source, &self.reader).await;
        match self.compiler.render(&trio).await {
            Ok(svg) => BlockOutput::Svg(svg),
            Err(e) => {
                tracing::warn!(stage = %e.stage, error = %e.message, "Diagram failed to render");
                BlockOutput::Error(e.to_string())
            }
        }
    }

    /// Resolve the trio of every diagram block in `markdown`.
    pub async fn resolve_document(&self, markdown: &str) -> Vec<Trio> {
        resolve_blocks(markdown, &self.language, &self.reader).await
    }

    /// Replace every diagram block in `markdown` with its rendered output.
    ///
    /// Text outside diagram blocks is copied unchanged.
    pub async fn render_document(&self, markdown: &str) -> RenderedDocument {
        let blocks = extract_blocks(markdown, &self.language);
        let mut content = String::with_capacity(markdown.len());
        let mut rendered = 0;
        let mut failed = 0;
        let mut last = 0;

        for block in &blocks {
            let output = self.render_block(&block.source).await;
            match output {
                BlockOutput::Svg(_) => rendered += 1,
                BlockOutput::Error(_) => failed += 1,
            }

            content.push_str(&markdown[last..block.range.start]);
            let width = block.attrs.get("width").map(String::as_str);
            content.push_str(&output.to_html(&self.class, width));
            if markdown[block.range.clone()].ends_with('\n') {
                content.push('\n');
            }
            last = block.range.end;
        }
        content.push_str(&markdown[last..]);

        tracing::debug!(rendered, failed, "Rendered document");

        RenderedDocument {
            content,
            rendered,
            failed,
        }
    }
}
