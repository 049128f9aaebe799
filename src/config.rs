//! Configuration loader
//!
//! `defaults/aslex.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files and
//! `ASLEX__SECTION__KEY` environment variables on top of those defaults via
//! [`Loader`] before deserializing into [`AslexConfig`].
//!
//! The `docs` section carries the documentation build metadata. The only
//! decision it encodes is where API reference XML comes from: on the hosted
//! build service Doxygen has to run first and writes next to the docs, locally
//! the XML is read from the regular build directory.

use crate::registry::{LexerRegistry, RegistryError};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/aslex.default.toml");

/// Prefix of environment variables read by [`Loader::with_env`]
pub const ENV_PREFIX: &str = "ASLEX";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AslexConfig {
    pub docs: DocsConfig,
    pub highlight: HighlightConfig,
}

/// Documentation build metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    pub project: String,
    pub copyright: String,
    pub author: String,
    #[serde(deserialize_with = "string_list")]
    pub extensions: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub templates_path: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub exclude_patterns: Vec<String>,
    pub html_theme: String,
    #[serde(deserialize_with = "string_list")]
    pub html_static_path: Vec<String>,
    pub doxygen: DoxygenConfig,
}

/// Where the API reference XML comes from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoxygenConfig {
    /// Project name the XML is registered under
    pub project: String,
    pub local_xml_dir: String,
    pub hosted_xml_dir: String,
    /// Environment variable that marks the hosted build service
    pub hosted_env_var: String,
    pub hosted_env_value: String,
}

/// Resolved Doxygen hand-off for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoxygenPlan {
    pub project: String,
    pub xml_dir: String,
    /// Doxygen must run before the docs are built
    pub run_doxygen: bool,
}

impl DoxygenConfig {
    /// Resolve the plan using `lookup` to read environment variables
    pub fn resolve<F>(&self, lookup: F) -> DoxygenPlan
    where
        F: Fn(&str) -> Option<String>,
    {
        let hosted = lookup(&self.hosted_env_var).is_some_and(|v| v == self.hosted_env_value);
        let xml_dir = if hosted {
            &self.hosted_xml_dir
        } else {
            &self.local_xml_dir
        };
        DoxygenPlan {
            project: self.project.clone(),
            xml_dir: xml_dir.clone(),
            run_doxygen: hosted,
        }
    }

    /// Resolve the plan against the process environment
    pub fn resolve_from_env(&self) -> DoxygenPlan {
        self.resolve(|key| std::env::var(key).ok())
    }
}

/// Highlighting defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HighlightConfig {
    /// Alias used when a code block or file has no recognizable language
    pub default_language: String,
    /// Additional aliases for the default language
    #[serde(deserialize_with = "string_list")]
    pub extra_aliases: Vec<String>,
    /// Output format used when none is requested
    pub format: String,
}

impl HighlightConfig {
    /// Register the extra aliases against the default language
    pub fn apply(&self, registry: &mut LexerRegistry) -> Result<(), RegistryError> {
        for alias in &self.extra_aliases {
            registry.add_alias(alias, &self.default_language)?;
        }
        Ok(())
    }
}

/// Accept a TOML array or a comma-separated string (environment variables).
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringList {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match StringList::deserialize(deserializer)? {
        StringList::List(items) => items,
        StringList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
    })
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `ASLEX__SECTION__KEY` environment variables.
    ///
    /// Values stay strings; list keys take comma-separated items.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__");
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AslexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AslexConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.docs.project, "asbind20");
        assert_eq!(config.docs.extensions, vec!["breathe"]);
        assert_eq!(config.docs.html_theme, "alabaster");
        assert_eq!(config.highlight.default_language, "angelscript");
        assert_eq!(config.highlight.format, "tag");
        assert!(config.highlight.extra_aliases.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("docs.html_theme", "furo")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.docs.html_theme, "furo");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[highlight]\nformat = \"html\"\nextra_aliases = [\"asc\"]").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.highlight.format, "html");
        assert_eq!(config.highlight.extra_aliases, vec!["asc"]);
        // Untouched keys keep their defaults
        assert_eq!(config.highlight.default_language, "angelscript");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/aslex.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/aslex.toml")
            .build()
            .unwrap();
        assert_eq!(config.docs.author, "HenryAWE");
    }

    #[test]
    fn layers_environment_variables() {
        // Only this test sets ASLEX__ variables; the rest never call with_env
        std::env::set_var("ASLEX__HIGHLIGHT__FORMAT", "json");
        std::env::set_var("ASLEX__HIGHLIGHT__EXTRA_ALIASES", "asc, script,");
        std::env::set_var("ASLEX__DOCS__EXCLUDE_PATTERNS", "_build");
        std::env::set_var("ASLEX__DOCS__DOXYGEN__HOSTED_ENV_VALUE", "True");
        let config = Loader::new().with_env().build();
        for key in [
            "ASLEX__HIGHLIGHT__FORMAT",
            "ASLEX__HIGHLIGHT__EXTRA_ALIASES",
            "ASLEX__DOCS__EXCLUDE_PATTERNS",
            "ASLEX__DOCS__DOXYGEN__HOSTED_ENV_VALUE",
        ] {
            std::env::remove_var(key);
        }

        let config = config.expect("env overrides to deserialize");
        assert_eq!(config.highlight.format, "json");
        assert_eq!(config.highlight.extra_aliases, vec!["asc", "script"]);
        assert_eq!(config.docs.exclude_patterns, vec!["_build"]);
        assert_eq!(config.docs.doxygen.hosted_env_value, "True");
        // Keys without a variable keep their defaults
        assert_eq!(config.docs.extensions, vec!["breathe"]);
    }

    #[test]
    fn resolves_local_doxygen_plan() {
        let config = load_defaults().unwrap();
        let plan = config.docs.doxygen.resolve(|_| None);
        assert_eq!(
            plan,
            DoxygenPlan {
                project: "asbind20".to_string(),
                xml_dir: "../build/doxygen-output/xml".to_string(),
                run_doxygen: false,
            }
        );
    }

    #[test]
    fn resolves_hosted_doxygen_plan() {
        let config = load_defaults().unwrap();
        let plan = config.docs.doxygen.resolve(|key| {
            (key == "READTHEDOCS").then(|| "True".to_string())
        });
        assert!(plan.run_doxygen);
        assert_eq!(plan.xml_dir, "doxygen-output/xml");
    }

    #[test]
    fn hosted_marker_must_match_exactly() {
        let config = load_defaults().unwrap();
        let plan = config
            .docs
            .doxygen
            .resolve(|_| Some("False".to_string()));
        assert!(!plan.run_doxygen);
    }

    #[test]
    fn extra_aliases_reach_the_registry() {
        let config = Loader::new()
            .set_override("highlight.extra_aliases", vec!["asc", "script"])
            .unwrap()
            .build()
            .unwrap();
        let mut registry = LexerRegistry::with_defaults();
        config.highlight.apply(&mut registry).unwrap();
        assert_eq!(registry.get("asc").unwrap().name(), "AngelScript");
        assert_eq!(registry.get("script").unwrap().name(), "AngelScript");
    }
}
