//! HTML escaping for literal text fragments.

/// Escape the five characters reserved in HTML markup.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with entity references; every other
/// character is copied through unchanged and in order.
///
/// # Examples
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
