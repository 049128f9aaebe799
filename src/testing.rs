//! Testing utilities for classifier output
//!
//! Two tools that are meant to be used together:
//!
//! 1. [`Samples`]: verified AngelScript programs from `samples/`. Tests should
//!    classify these rather than ad-hoc snippets when they are about realistic
//!    input; every sample is known to tokenize without plain-text fallbacks.
//! 2. [`assert_tokens`]: fluent assertions over a token stream.
//!
//! ```rust-example
//! let source = Samples::get("optional.as")?;
//! let tokens = angelscript::shared().tokenize(source);
//! assert_tokens(&tokens)
//!     .covers(source)
//!     .no_fallbacks()
//!     .significant()
//!     .token(0, "bool", Category::KeywordType);
//! ```

use crate::token::{Category, Token};
use std::fmt;

const SAMPLES: &[(&str, &str)] = &[
    (
        "gc_init_list.as",
        include_str!("../samples/gc_init_list.as"),
    ),
    ("interfaces.as", include_str!("../samples/interfaces.as")),
    ("math.as", include_str!("../samples/math.as")),
    ("optional.as", include_str!("../samples/optional.as")),
    ("strings.as", include_str!("../samples/strings.as")),
];

/// Errors when looking up samples
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    NotFound(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::NotFound(name) => write!(f, "Sample not found: {}", name),
        }
    }
}

impl std::error::Error for SampleError {}

/// Verified AngelScript sample library
pub struct Samples;

impl Samples {
    /// Source of a sample by file name
    pub fn get(name: &str) -> Result<&'static str, SampleError> {
        SAMPLES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| *source)
            .ok_or_else(|| SampleError::NotFound(name.to_string()))
    }

    /// All sample names (sorted)
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = SAMPLES.iter().map(|(n, _)| *n).collect();
        names.sort();
        names
    }

    /// All samples as `(name, source)` pairs
    pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
        SAMPLES.iter().copied()
    }
}

/// Create an assertion builder for a token stream
pub fn assert_tokens<'t>(tokens: &[Token<'t>]) -> TokenAssertion<'t> {
    TokenAssertion {
        tokens: tokens.to_vec(),
        context: "tokens".to_string(),
    }
}

/// Fluent assertions over a token stream
pub struct TokenAssertion<'t> {
    tokens: Vec<Token<'t>>,
    context: String,
}

impl<'t> TokenAssertion<'t> {
    /// Drop whitespace tokens for the assertions that follow
    pub fn significant(self) -> Self {
        Self {
            tokens: self
                .tokens
                .into_iter()
                .filter(|t| !t.is_whitespace())
                .collect(),
            context: format!("{} (significant)", self.context),
        }
    }

    /// Assert the number of tokens
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.tokens.len(),
            expected,
            "{}: expected {} tokens, found {}: [{}]",
            self.context,
            expected,
            self.tokens.len(),
            summarize(&self.tokens)
        );
        self
    }

    /// Assert the text and category of the token at `index`
    pub fn token(self, index: usize, text: &str, category: Category) -> Self {
        assert!(
            index < self.tokens.len(),
            "{}: index {} out of bounds ({} tokens)",
            self.context,
            index,
            self.tokens.len()
        );
        let token = &self.tokens[index];
        assert_eq!(
            (token.text(), token.category()),
            (text, category),
            "{}[{}] mismatch",
            self.context,
            index
        );
        self
    }

    /// Assert the exact `(text, category)` sequence
    pub fn pairs(self, expected: &[(&str, Category)]) -> Self {
        let actual: Vec<(&str, Category)> = self
            .tokens
            .iter()
            .map(|t| (t.text(), t.category()))
            .collect();
        assert_eq!(actual, expected, "{}: sequence mismatch", self.context);
        self
    }

    /// Assert that the tokens reproduce `source` with contiguous offsets.
    ///
    /// Only meaningful before [`TokenAssertion::significant`].
    pub fn covers(self, source: &str) -> Self {
        let mut offset = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            assert_eq!(
                token.offset(),
                offset,
                "{}[{}] starts at {}, expected {}",
                self.context,
                i,
                token.offset(),
                offset
            );
            assert!(!token.is_empty(), "{}[{}] is empty", self.context, i);
            offset += token.len();
        }
        let joined: String = self.tokens.iter().map(|t| t.text()).collect();
        assert_eq!(joined, source, "{}: tokens do not reproduce the source", self.context);
        self
    }

    /// Assert that no token fell back to plain text
    pub fn no_fallbacks(self) -> Self {
        let fallbacks: Vec<_> = self
            .tokens
            .iter()
            .filter(|t| t.category() == Category::Text)
            .collect();
        assert!(
            fallbacks.is_empty(),
            "{}: unexpected plain-text fallbacks: {:?}",
            self.context,
            fallbacks
        );
        self
    }

    /// Assert that some token has the given text and category
    pub fn contains(self, text: &str, category: Category) -> Self {
        assert!(
            self.tokens
                .iter()
                .any(|t| t.text() == text && t.category() == category),
            "{}: no {} token {:?} in [{}]",
            self.context,
            category,
            text,
            summarize(&self.tokens)
        );
        self
    }

    /// Assert that no token has the given category
    pub fn lacks_category(self, category: Category) -> Self {
        let found: Vec<_> = self
            .tokens
            .iter()
            .filter(|t| t.category() == category)
            .map(|t| t.text())
            .collect();
        assert!(
            found.is_empty(),
            "{}: unexpected {} tokens: {:?}",
            self.context,
            category,
            found
        );
        self
    }
}

fn summarize(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}:{:?}", t.category(), t.text()))
        .collect::<Vec<_>>()
        .join(", ")
}
