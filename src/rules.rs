//! Ordered classification rules
//!
//! A [`RuleSet`] is an ordered list of `(pattern, category)` pairs. At a given
//! position the rules are tried in declaration order and the first one whose
//! pattern matches wins, regardless of match length. Keyword and operator rules
//! therefore only lose to comment and string rules because those are declared
//! earlier.
//!
//! Patterns are standard `regex` syntax. Each one is compiled anchored to the
//! start of the remaining input, so a rule can never skip ahead. Patterns that
//! can match the empty string are rejected at build time: they would stall the
//! scan.

use crate::token::Category;
use regex::Regex;
use std::fmt;

/// Error type for rule construction
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The pattern is not valid regex syntax
    InvalidPattern { pattern: String, message: String },
    /// The pattern accepts the empty string
    MatchesEmpty { pattern: String },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid rule pattern '{}': {}", pattern, message)
            }
            RuleError::MatchesEmpty { pattern } => {
                write!(f, "Rule pattern '{}' matches the empty string", pattern)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// A single `(pattern, category)` rule
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    category: Category,
    regex: Regex,
}

impl Rule {
    /// Compile a rule. The pattern is anchored at the scan position.
    pub fn new(pattern: &str, category: Category) -> Result<Self, RuleError> {
        let anchored = format!(r"\A(?:{})", pattern);
        let regex = Regex::new(&anchored).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        if regex.is_match("") {
            return Err(RuleError::MatchesEmpty {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            pattern: pattern.to_string(),
            category,
            regex,
        })
    }

    /// The pattern as written, without the anchor
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Length in bytes of the match at the start of `input`, if any.
    ///
    /// Zero-length matches count as no match; a pattern can still produce one
    /// when it contains context-sensitive assertions.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// Ordered, immutable list of rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Start building a rule set
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// Build a rule set from a `(pattern, category)` table, keeping its order
    pub fn from_table(table: &[(&str, Category)]) -> Result<Self, RuleError> {
        table
            .iter()
            .fold(RuleSetBuilder::new(), |builder, (pattern, category)| {
                builder.rule(pattern, *category)
            })
            .build()
    }

    /// First rule matching at the start of `input`, as `(length, category)`
    pub fn match_at(&self, input: &str) -> Option<(usize, Category)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(input).map(|len| (len, rule.category)))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder collecting rules in priority order
///
/// Errors are deferred to [`RuleSetBuilder::build`], which reports the first
/// invalid rule.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Result<Rule, RuleError>>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule with lower priority than every rule added so far
    pub fn rule(mut self, pattern: &str, category: Category) -> Self {
        self.rules.push(Rule::new(pattern, category));
        self
    }

    /// Append a rule matching any of `words` as a whole word.
    ///
    /// Words are escaped, so they are matched literally. The word boundary is
    /// ASCII-only, matching ASCII identifier rules.
    pub fn words(self, words: &[&str], category: Category) -> Self {
        let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
        let pattern = format!(r"(?:{})(?-u:\b)", alternatives.join("|"));
        self.rule(&pattern, category)
    }

    pub fn build(self) -> Result<RuleSet, RuleError> {
        let rules = self.rules.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet { rules })
    }
}
