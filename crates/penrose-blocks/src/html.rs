//! HTML output for rendered blocks.

/// Escape special HTML characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a rendered SVG in its container element.
///
/// A bare number `width` is taken as pixels; other values (`50%`, `20em`)
/// are used as given.
pub(crate) fn diagram_html(svg: &str, class: &str, width: Option<&str>) -> String {
    let style = match width {
        Some(w) if w.chars().all(|c| c.is_ascii_digit()) && !w.is_empty() => {
            format!(r#" style="width: {w}px""#)
        }
        Some(w) if !w.is_empty() => format!(r#" style="width: {}""#, escape_html(w)),
        _ => String::new(),
    };
    format!(r#"<div class="{}"{style}>{svg}</div>"#, escape_html(class))
}

/// Render compiler error text as a preformatted block.
pub(crate) fn error_html(message: &str, class: &str) -> String {
    format!(
        r#"<pre class="{}-error">{}</pre>"#,
        escape_html(class),
        escape_html(message)
    )
}
