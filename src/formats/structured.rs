//! JSON and YAML token dumps
//!
//! Both serialize the token list as an array of `{text, category, offset}`
//! records, with categories in their dotted form.

use super::registry::{FormatError, Formatter};
use crate::token::Token;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tokens)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON array of tokens"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tokens: &[Token<'_>]) -> Result<String, FormatError> {
        serde_yaml::to_string(tokens).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of tokens"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Category;
    use serde_json::{json, Value};

    fn sample() -> Vec<Token<'static>> {
        vec![
            Token::new("return", Category::KeywordControl, 0),
            Token::new(";", Category::Punctuation, 6),
        ]
    }

    #[test]
    fn test_json_records() {
        let out = JsonFormatter.serialize(&sample()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!([
                {"text": "return", "category": "Keyword.Control", "offset": 0},
                {"text": ";", "category": "Punctuation", "offset": 6},
            ])
        );
    }

    #[test]
    fn test_yaml_records() {
        let out = YamlFormatter.serialize(&sample()).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        let first = &value[0];
        assert_eq!(first["text"].as_str(), Some("return"));
        assert_eq!(first["category"].as_str(), Some("Keyword.Control"));
        assert_eq!(value[1]["offset"].as_u64(), Some(6));
    }
}
