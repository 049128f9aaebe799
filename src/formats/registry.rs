//! Output format lookup
//!
//! Formats are looked up by name the same way lexers are looked up by alias:
//! surrounding whitespace is ignored and case does not matter, so `--format
//! JSON` and `json` select the same [`Formatter`].

use crate::token::Token;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under the requested name
    FormatNotFound { name: String, available: Vec<String> },
    /// The formatter failed to encode the tokens
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound { name, .. } => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a classified token stream as text
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, tokens: &[Token<'_>]) -> Result<String, FormatError>;

    /// One-line summary shown by `aslex list-formats`
    fn description(&self) -> &str {
        ""
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Formatters keyed by normalized name
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `tag`, `json`, `yaml` and `html`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TagFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::HtmlFormatter);
        registry
    }

    /// Add `formatter` under its normalized name; a later registration wins.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let key = normalize(formatter.name());
        if self.formatters.insert(key.clone(), Box::new(formatter)).is_some() {
            warn!(format = %key, "format replaced by a later registration");
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .get(&normalize(name))
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound {
                name: name.trim().to_string(),
                available: self.list_formats(),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(&normalize(name))
    }

    /// Render `tokens` with the formatter registered under `format`
    pub fn serialize(&self, tokens: &[Token<'_>], format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(tokens)
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}
