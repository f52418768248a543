//! Trio resolution.
//!
//! Turns the body of a penrose code block into the four-part bundle the
//! diagram compiler takes as input.

use serde::{Deserialize, Serialize};

use crate::meta::extract_metadata;
use crate::reader::SourceReader;

/// Compiler input: the substance program plus its resolved companions.
///
/// Serializes to `{"substance", "style", "domain", "variation"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trio {
    /// The substance program, verbatim.
    pub substance: String,
    /// Contents of the referenced style sheet.
    pub style: String,
    /// Contents of the referenced domain schema.
    pub domain: String,
    /// Layout seed label, verbatim from the `variation:` directive.
    pub variation: String,
}

/// Resolve a substance program into a [`Trio`].
///
/// Extracts directives, then asks `reader` for the style and domain
/// references. Both reads are always issued, even for empty references,
/// and run concurrently. Unresolvable references come back as empty
/// strings; this function never fails.
pub async fn resolve_trio<R: SourceReader>(source: &str, reader: &R) -> Trio {
    let meta = extract_metadata(source);
    tracing::debug!(
        domain = %meta.domain,
        style = %meta.style,
        variation = %meta.variation,
        "Resolving trio"
    );

    let (style, domain) = tokio::join!(reader.read(&meta.style), reader.read(&meta.domain));

    Trio {
        substance: source.to_owned(),
        style,
        domain,
        variation: meta.variation,
    }
}
