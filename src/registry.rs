//! Lexer registry for alias lookup
//!
//! Documentation authors tag code blocks with a short language name. The
//! registry maps every such alias to the lexer that handles it. It is an
//! ordinary value: whoever hosts the documentation build constructs one and
//! hands it to the renderer, instead of relying on global registration.
//!
//! Aliases are case-insensitive. A lexer is reachable under its own name and
//! under each of its aliases.

use crate::lexer::Lexer;
use crate::token::Token;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Errors from registry lookups
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// No lexer is registered under the alias
    LexerNotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::LexerNotFound(alias) => {
                write!(f, "No lexer registered for '{}'", alias)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of lexers keyed by alias
///
/// # Examples
///
/// ```ignore
/// let registry = LexerRegistry::with_defaults();
/// let tokens = registry.tokenize("return x;", "as")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexerRegistry {
    lexers: HashMap<String, Arc<Lexer>>,
}

fn normalize(alias: &str) -> String {
    alias.trim().to_lowercase()
}

impl LexerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            lexers: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in lexers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::angelscript::shared());
        registry
    }

    /// Register a lexer under its name and all of its aliases.
    ///
    /// An alias already taken by another lexer is reassigned to this one.
    pub fn register(&mut self, lexer: impl Into<Arc<Lexer>>) {
        let lexer = lexer.into();
        let keys: Vec<String> = std::iter::once(lexer.name())
            .chain(lexer.aliases().iter().map(String::as_str))
            .map(normalize)
            .collect();

        for key in keys {
            self.insert(key, Arc::clone(&lexer));
        }
        debug!(lexer = lexer.name(), "registered lexer");
    }

    /// Make an already registered lexer reachable under an extra alias
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let lexer = self.get(target)?;
        self.insert(normalize(alias), lexer);
        Ok(())
    }

    fn insert(&mut self, key: String, lexer: Arc<Lexer>) {
        if let Some(previous) = self.lexers.get(&key) {
            if !Arc::ptr_eq(previous, &lexer) {
                warn!(
                    alias = %key,
                    previous = previous.name(),
                    replacement = lexer.name(),
                    "alias reassigned"
                );
            }
        }
        self.lexers.insert(key, lexer);
    }

    /// Get the lexer registered under an alias
    pub fn get(&self, alias: &str) -> Result<Arc<Lexer>, RegistryError> {
        self.lexers
            .get(&normalize(alias))
            .cloned()
            .ok_or_else(|| RegistryError::LexerNotFound(alias.to_string()))
    }

    /// Check if an alias is registered
    pub fn has(&self, alias: &str) -> bool {
        self.lexers.contains_key(&normalize(alias))
    }

    /// Names of the distinct registered lexers (sorted)
    pub fn list_lexers(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lexers
            .values()
            .map(|l| l.name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Every registered alias with the name of the lexer it resolves to
    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.lexers
            .iter()
            .map(|(alias, lexer)| (alias.clone(), lexer.name().to_string()))
            .collect()
    }

    /// Find a lexer for a file by its extension
    pub fn for_filename(&self, path: impl AsRef<Path>) -> Option<Arc<Lexer>> {
        let extension = path.as_ref().extension()?.to_str()?;
        let mut candidates: Vec<&Arc<Lexer>> = self
            .lexers
            .values()
            .filter(|l| l.handles_extension(extension))
            .collect();
        // Several aliases point at the same lexer; pick deterministically
        candidates.sort_by(|a, b| a.name().cmp(b.name()));
        candidates.first().map(|l| Arc::clone(*l))
    }

    /// Classify source text with the lexer registered under `alias`
    pub fn tokenize<'t>(
        &self,
        source: &'t str,
        alias: &str,
    ) -> Result<Vec<Token<'t>>, RegistryError> {
        let lexer = self.get(alias)?;
        Ok(lexer.tokenize(source))
    }
}

static DEFAULT_REGISTRY: Lazy<LexerRegistry> = Lazy::new(LexerRegistry::with_defaults);

/// Shared registry holding the built-in lexers
pub fn default_registry() -> &'static LexerRegistry {
    &DEFAULT_REGISTRY
}
