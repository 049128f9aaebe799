//! Line-per-token text format
//!
//! Each token becomes `start..end Category "text"`, with the text in Rust debug
//! quoting so that newlines and tabs stay on one line:
//!
//! ```text
//! 0..6 Keyword.Control "return"
//! 6..7 Whitespace " "
//! ```

use super::registry::{FormatError, Formatter};
use crate::token::Token;
use std::fmt::Write;

/// Render tokens in the tag format
pub fn to_tag_str(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        let span = token.span();
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{}..{} {} {:?}",
            span.start,
            span.end,
            token.category(),
            token.text()
        );
    }
    out
}

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        Ok(to_tag_str(tokens))
    }

    fn description(&self) -> &str {
        "One line per token: span, category and quoted text"
    }
}
