//! # aslex
//!
//! Syntax classifier for AngelScript code samples in documentation builds.
//!
//! Source text goes through an ordered, first-match-wins rule table and comes
//! out as a gap-free sequence of [`Token`]s, each tagged with a [`Category`]
//! that a renderer maps to a visual style.
//!
//! - [`rules`]: rule tables and their construction
//! - [`lexer`]: the classifier and its lazy token stream
//! - [`angelscript`]: the built-in AngelScript rule table
//! - [`registry`]: alias to lexer lookup
//! - [`formats`]: token serializers (tag, json, yaml, html)
//! - [`config`]: layered configuration for the documentation build
//!
//! ## Testing
//!
//! See the [testing module](testing) for the sample corpus and token assertions.

pub mod angelscript;
pub mod config;
pub mod formats;
pub mod lexer;
pub mod registry;
pub mod rules;
pub mod testing;
pub mod token;

pub use lexer::{Lexer, Mode, Tokens};
pub use registry::{default_registry, LexerRegistry, RegistryError};
pub use rules::{Rule, RuleError, RuleSet, RuleSetBuilder};
pub use token::{Category, Token};

/// Classify AngelScript source with the built-in lexer
pub fn highlight(source: &str) -> Vec<Token<'_>> {
    angelscript::shared().tokenize(source)
}
