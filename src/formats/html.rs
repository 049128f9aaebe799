//! HTML fragment output
//!
//! Produces a `<pre class="highlight"><code>` block in which every token with
//! a CSS class is wrapped in `<span class="..">`. Plain text is emitted
//! unwrapped. Colors come from the stylesheet of the documentation theme.

use super::registry::{FormatError, Formatter};
use crate::token::Token;

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        let mut out = String::from("<pre class=\"highlight\"><code>");
        for token in tokens {
            let text = escape_html(token.text());
            match token.category().css_class() {
                // Whitespace spans only add noise to the markup
                Some(class) if !token.is_whitespace() => {
                    out.push_str("<span class=\"");
                    out.push_str(class);
                    out.push_str("\">");
                    out.push_str(&text);
                    out.push_str("</span>");
                }
                _ => out.push_str(&text),
            }
        }
        out.push_str("</code></pre>\n");
        Ok(out)
    }

    fn description(&self) -> &str {
        "HTML <pre> block with one CSS class per token category"
    }
}
