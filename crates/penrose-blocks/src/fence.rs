//! Fenced code block discovery.

use std::collections::HashMap;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// A diagram code block found in a markdown document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramBlock {
    /// Zero-based index among diagram blocks of the document.
    pub index: usize,
    /// Body of the code block (the substance program).
    pub source: String,
    /// Attributes parsed from the fence (e.g., `width=400` → {"width": "400"}).
    pub attrs: HashMap<String, String>,
    /// Byte range of the whole fenced block, fences included.
    pub range: Range<usize>,
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            // Strip quotes if present
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

/// Block being collected between its start and end events.
struct PendingBlock {
    attrs: HashMap<String, String>,
    range: Range<usize>,
    source: String,
}

/// Find every fenced code block tagged `language`, in document order.
///
/// Indented code blocks and fences with other languages are skipped.
#[must_use]
pub fn extract_blocks(markdown: &str, language: &str) -> Vec<DiagramBlock> {
    let mut blocks = Vec::new();
    let mut pending: Option<PendingBlock> = None;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let (lang, attrs) = parse_fence_info(&info);
                if lang == language {
                    pending = Some(PendingBlock {
                        attrs,
                        range,
                        source: String::new(),
                    });
                }
            }
            Event::Text(text) => {
                if let Some(block) = pending.as_mut() {
                    block.source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = pending.take() {
                    blocks.push(DiagramBlock {
                        index: blocks.len(),
                        source: block.source,
                        attrs: block.attrs,
                        range: block.range,
                    });
                }
            }
            _ => {}
        }
    }

    blocks
}
