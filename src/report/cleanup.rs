//! Removal of markdown code fences the model sometimes wraps around its HTML.

const HTML_FENCE: &str = "```html";
const FENCE: &str = "```";

/// Strip one leading ```` ```html ```` (or bare ```` ``` ````) marker and one trailing
/// ```` ``` ```` marker.
///
/// Whitespace between a marker and the document is removed along with the marker.
/// Text without markers is returned unchanged, and fences inside the document are
/// left alone.
///
/// ```
/// use medreport::strip_code_fences;
///
/// let raw = "```html\n<!DOCTYPE html><html></html>\n```";
/// assert_eq!(strip_code_fences(raw), "<!DOCTYPE html><html></html>");
/// assert_eq!(strip_code_fences("<p>clean</p>"), "<p>clean</p>");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text;

    let leading = body.trim_start();
    if let Some(rest) = leading
        .strip_prefix(HTML_FENCE)
        .or_else(|| leading.strip_prefix(FENCE))
    {
        body = rest.trim_start();
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest.trim_end();
    }

    body.to_string()
}
