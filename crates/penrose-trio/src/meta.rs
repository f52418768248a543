//! Directive extraction from substance programs.
//!
//! A substance program names its companion files through comment lines:
//!
//! ```text
//! -- domain: shapes.domain
//! -- style: shapes.style
//! -- variation: abc123
//! ```
//!
//! Each line is tested against three independent patterns. Directives may
//! appear in any order and any number of times; the last occurrence wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--\s*domain:(.*)").unwrap());
static STYLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--\s*style:(.*)").unwrap());
static VARIATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--\s*variation:(.*)").unwrap());

/// Directive values found in a substance program.
///
/// Every field is always present. A directive that never appears leaves
/// its field empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Reference to the domain schema file.
    pub domain: String,
    /// Reference to the style sheet file.
    pub style: String,
    /// Layout seed label. Not a file reference.
    pub variation: String,
}

/// Return the trimmed capture of `pattern` if `line` matches it.
fn capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Extract `domain:`, `style:` and `variation:` directives from a document.
///
/// Never fails. Lines that do not match any directive are ignored.
///
/// # Example
///
/// ```
/// use penrose_trio::extract_metadata;
///
/// let meta = extract_metadata("-- domain: sets.domain\nSet A");
/// assert_eq!(meta.domain, "sets.domain");
/// assert_eq!(meta.style, "");
/// ```
#[must_use]
pub fn extract_metadata(source: &str) -> Metadata {
    let mut meta = Metadata::default();

    for line in source.split('\n') {
        if let Some(value) = capture(&DOMAIN_PATTERN, line) {
            value.clone_into(&mut meta.domain);
        }
        if let Some(value) = capture(&STYLE_PATTERN, line) {
            value.clone_into(&mut meta.style);
        }
        if let Some(value) = capture(&VARIATION_PATTERN, line) {
            value.clone_into(&mut meta.variation);
        }
    }

    meta
}
