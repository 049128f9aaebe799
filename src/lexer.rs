//! The classifier
//!
//! A [`Lexer`] pairs an immutable [`RuleSet`] with the identity under which it
//! is registered (name, aliases, file extensions). Classification walks the
//! input left to right:
//!
//! 1. Try each rule in priority order at the current position.
//! 2. The first match becomes a token of the rule's category.
//! 3. If nothing matches, one character becomes a [`Category::Text`] token.
//! 4. Advance past the emitted token and repeat until the input is exhausted.
//!
//! The resulting token stream covers the input with no gaps or overlaps, and
//! classification never fails. [`Tokens`] is lazy; calling [`Lexer::tokens`]
//! again on the same text restarts from the beginning and yields the same
//! sequence.

use crate::rules::RuleSet;
use crate::token::{Category, Token};
use std::iter::FusedIterator;
use tracing::debug;

/// Lexer state a scan starts in. Rule sets have no sub-modes, so there is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Root,
}

/// A named, immutable classifier
#[derive(Debug, Clone)]
pub struct Lexer {
    name: String,
    aliases: Vec<String>,
    extensions: Vec<String>,
    rules: RuleSet,
}

impl Lexer {
    /// Create a lexer with no aliases or extensions
    pub fn new(name: impl Into<String>, rules: RuleSet) -> Self {
        let name = name.into();
        debug!(lexer = %name, rules = rules.len(), "built lexer");
        Self {
            name,
            aliases: Vec::new(),
            extensions: Vec::new(),
            rules,
        }
    }

    /// Add alternate names under which the lexer can be requested
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Add file extensions (without the leading dot) handled by the lexer
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions
            .extend(extensions.into_iter().map(|e| e.into().to_lowercase()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether a file with this extension should be classified by this lexer
    pub fn handles_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.extensions.iter().any(|e| *e == extension)
    }

    /// Lazily classify `text` starting in [`Mode::Root`]
    pub fn tokens<'l, 't>(&'l self, text: &'t str) -> Tokens<'l, 't> {
        self.tokens_in(text, Mode::Root)
    }

    /// Lazily classify `text` starting in the given mode
    pub fn tokens_in<'l, 't>(&'l self, text: &'t str, mode: Mode) -> Tokens<'l, 't> {
        Tokens {
            rules: &self.rules,
            text,
            pos: 0,
            mode,
        }
    }

    /// Classify `text` and collect the tokens
    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        self.tokens(text).collect()
    }
}

/// Lazy token stream over a single input
#[derive(Debug, Clone)]
pub struct Tokens<'l, 't> {
    rules: &'l RuleSet,
    text: &'t str,
    pos: usize,
    mode: Mode,
}

impl<'l, 't> Tokens<'l, 't> {
    /// Byte offset of the next token
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Input not yet classified
    pub fn remaining(&self) -> &'t str {
        &self.text[self.pos..]
    }
}

impl<'l, 't> Iterator for Tokens<'l, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        let (len, category) = match self.mode {
            Mode::Root => self.rules.match_at(rest).unwrap_or_else(|| {
                // Fall back to a single character, never a partial UTF-8 sequence
                let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
                (len, Category::Text)
            }),
        };

        let token = Token::new(&rest[..len], category, self.pos);
        self.pos += len;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.pos;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Tokens<'_, '_> {}
