//! Built-in AngelScript lexer
//!
//! Rules are declared in priority order. Comments and strings come first so that
//! keywords and operators never fire inside them; numbers come before names so
//! that `0x1F` is not split; operators are listed longest first inside a single
//! alternation.
//!
//! Multi-line comments and heredoc strings are matched in the same pass as
//! everything else. An unterminated `/*` or `"""` runs to the end of the input.

use crate::lexer::Lexer;
use crate::rules::{RuleError, RuleSet};
use crate::token::Category;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Registered lexer name
pub const NAME: &str = "AngelScript";

/// Tags documentation authors can use on code blocks
pub const ALIASES: &[&str] = &["angelscript", "as"];

/// File extensions classified as AngelScript
pub const EXTENSIONS: &[&str] = &["as", "angelscript"];

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
    "return", "try", "catch",
];

const DECLARATION_KEYWORDS: &[&str] = &[
    "class",
    "interface",
    "enum",
    "funcdef",
    "namespace",
    "typedef",
    "mixin",
    "shared",
    "external",
    "abstract",
    "final",
    "override",
    "private",
    "protected",
    "const",
    "property",
    "get",
    "set",
];

const TYPE_KEYWORDS: &[&str] = &[
    "void", "bool", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "float", "double", "auto",
];

const CONSTANT_KEYWORDS: &[&str] = &["true", "false", "null"];

const OTHER_KEYWORDS: &[&str] = &[
    "cast", "import", "from", "function", "explicit", "in", "out", "inout",
];

const PSEUDO_NAMES: &[&str] = &["this", "super"];

/// Types registered by the common script add-ons and used throughout samples
const BUILTIN_NAMES: &[&str] = &["string", "array", "dictionary", "ref", "weakref", "any", "grid"];

const OPERATOR_WORDS: &[&str] = &["is", "and", "or", "xor", "not"];

/// Literal and punctuation rules, in priority order, up to the keyword rules
const LEADING_RULES: &[(&str, Category)] = &[
    (r"\s+", Category::Whitespace),
    (r"//[^\n]*", Category::Comment),
    (r"/\*(?s:.*?)(?:\*/|\z)", Category::CommentMultiline),
    (r"#[ \t]*[A-Za-z_][^\n]*", Category::CommentPreproc),
    (r#""""(?s:.*?)(?:"""|\z)"#, Category::StringHeredoc),
    (r#""(?:[^"\\\n]|\\(?s:.))*""#, Category::String),
    (r"'(?:[^'\\\n]|\\(?s:.))*'", Category::StringSingle),
    (r"0[xX][0-9a-fA-F]+", Category::NumberHex),
    (r"0[bB][01]+", Category::NumberBin),
    (r"0[oO][0-7]+", Category::NumberOct),
    (
        r"(?:\d+\.\d+|\.\d+)(?:[eE][+-]?\d+)?[fFdD]?|\d+\.[fFdD](?-u:\b)|\d+[eE][+-]?\d+[fFdD]?",
        Category::NumberFloat,
    ),
    (r"0[dD]\d+|\d+", Category::Number),
    (r"!is(?-u:\b)", Category::OperatorWord),
];

/// Rules following the keyword rules
const TRAILING_RULES: &[(&str, Category)] = &[
    (r"[A-Za-z_][A-Za-z0-9_]*", Category::Name),
    (
        r">>>=|<<=|>>=|\*\*=|>>>|<<|>>|\*\*|&&|\|\||\^\^|==|!=|<=|>=|\+\+|--|\+=|-=|\*=|/=|%=|&=|\|=|\^=|::|[-+*/%=<>!&|^~?:@]",
        Category::Operator,
    ),
    (r"[()\[\]{};,.]", Category::Punctuation),
];

/// Build the AngelScript rule set
pub fn rules() -> Result<RuleSet, RuleError> {
    let builder = LEADING_RULES
        .iter()
        .fold(RuleSet::builder(), |b, (pattern, category)| {
            b.rule(pattern, *category)
        })
        .words(OPERATOR_WORDS, Category::OperatorWord)
        .words(CONTROL_KEYWORDS, Category::KeywordControl)
        .words(DECLARATION_KEYWORDS, Category::KeywordDeclaration)
        .words(TYPE_KEYWORDS, Category::KeywordType)
        .words(CONSTANT_KEYWORDS, Category::KeywordConstant)
        .words(OTHER_KEYWORDS, Category::Keyword)
        .words(PSEUDO_NAMES, Category::NameBuiltinPseudo)
        .words(BUILTIN_NAMES, Category::NameBuiltin);

    TRAILING_RULES
        .iter()
        .fold(builder, |b, (pattern, category)| b.rule(pattern, *category))
        .build()
}

/// Build a fresh AngelScript lexer with its aliases and extensions
pub fn lexer() -> Result<Lexer, RuleError> {
    Ok(Lexer::new(NAME, rules()?)
        .with_aliases(ALIASES.iter().copied())
        .with_extensions(EXTENSIONS.iter().copied()))
}

static SHARED: Lazy<Arc<Lexer>> =
    Lazy::new(|| Arc::new(lexer().expect("built-in AngelScript rules are valid")));

/// Process-wide AngelScript lexer, built on first use
pub fn shared() -> Arc<Lexer> {
    Arc::clone(&SHARED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn classify(source: &str) -> Vec<(&str, Category)> {
        shared()
            .tokenize(source)
            .into_iter()
            .filter(|t| !t.is_whitespace())
            .map(|t: Token<'_>| (t.text(), t.category()))
            .collect()
    }

    #[test]
    fn test_rules_build() {
        let rules = rules().unwrap();
        assert_eq!(rules.len(), LEADING_RULES.len() + 8 + TRAILING_RULES.len());
    }

    #[test]
    fn test_line_comment_is_one_token() {
        assert_eq!(classify("// foo bar"), vec![("// foo bar", Category::Comment)]);
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        assert_eq!(
            classify("// note\nreturn"),
            vec![("// note", Category::Comment), ("return", Category::KeywordControl)]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            classify("/* a\n * b */ int"),
            vec![
                ("/* a\n * b */", Category::CommentMultiline),
                ("int", Category::KeywordType)
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(
            classify("/* never closed\nint x;"),
            vec![("/* never closed\nint x;", Category::CommentMultiline)]
        );
    }

    #[test]
    fn test_keyword_inside_string_is_not_a_keyword() {
        assert_eq!(classify(r#""return""#), vec![(r#""return""#, Category::String)]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            classify(r#""say \"hi\"" 'c\''"#),
            vec![
                (r#""say \"hi\"""#, Category::String),
                (r"'c\''", Category::StringSingle)
            ]
        );
    }

    #[test]
    fn test_heredoc_spans_lines() {
        let source = "string s = \"\"\"line one\n\"quoted\" line two\"\"\";";
        assert_eq!(
            classify(source),
            vec![
                ("string", Category::NameBuiltin),
                ("s", Category::Name),
                ("=", Category::Operator),
                ("\"\"\"line one\n\"quoted\" line two\"\"\"", Category::StringHeredoc),
                (";", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_falls_back() {
        let tokens = classify("\"open");
        assert_eq!(tokens[0], ("\"", Category::Text));
        assert_eq!(tokens[1], ("open", Category::Name));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            classify("42 0x1F 0b101 0o17 0d99 3.14 .5 2.f 1e10 6.02E+23d"),
            vec![
                ("42", Category::Number),
                ("0x1F", Category::NumberHex),
                ("0b101", Category::NumberBin),
                ("0o17", Category::NumberOct),
                ("0d99", Category::Number),
                ("3.14", Category::NumberFloat),
                (".5", Category::NumberFloat),
                ("2.f", Category::NumberFloat),
                ("1e10", Category::NumberFloat),
                ("6.02E+23d", Category::NumberFloat),
            ]
        );
    }

    #[test]
    fn test_float_needs_digits_or_suffix_after_dot() {
        assert_eq!(
            classify("1.method 2.f 3.d; 4.fx"),
            vec![
                ("1", Category::Number),
                (".", Category::Punctuation),
                ("method", Category::Name),
                ("2.f", Category::NumberFloat),
                ("3.d", Category::NumberFloat),
                (";", Category::Punctuation),
                ("4", Category::Number),
                (".", Category::Punctuation),
                ("fx", Category::Name),
            ]
        );
    }

    #[test]
    fn test_keyword_before_non_ascii_letter() {
        assert_eq!(
            classify("intä"),
            vec![("int", Category::KeywordType), ("ä", Category::Text)]
        );
    }

    #[test]
    fn test_handle_operators() {
        assert_eq!(
            classify("@f.il_ref = @il;"),
            vec![
                ("@", Category::Operator),
                ("f", Category::Name),
                (".", Category::Punctuation),
                ("il_ref", Category::Name),
                ("=", Category::Operator),
                ("@", Category::Operator),
                ("il", Category::Name),
                (";", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn test_identity_operators() {
        assert_eq!(
            classify("a is b && a !is null"),
            vec![
                ("a", Category::Name),
                ("is", Category::OperatorWord),
                ("b", Category::Name),
                ("&&", Category::Operator),
                ("a", Category::Name),
                ("!is", Category::OperatorWord),
                ("null", Category::KeywordConstant),
            ]
        );
    }

    #[test]
    fn test_not_equal_is_not_identity() {
        assert_eq!(
            classify("a != island"),
            vec![
                ("a", Category::Name),
                ("!=", Category::Operator),
                ("island", Category::Name),
            ]
        );
    }

    #[test]
    fn test_longest_operators_first() {
        assert_eq!(
            classify("x >>>= 1; y **= 2; ns::f"),
            vec![
                ("x", Category::Name),
                (">>>=", Category::Operator),
                ("1", Category::Number),
                (";", Category::Punctuation),
                ("y", Category::Name),
                ("**=", Category::Operator),
                ("2", Category::Number),
                (";", Category::Punctuation),
                ("ns", Category::Name),
                ("::", Category::Operator),
                ("f", Category::Name),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_an_identifier() {
        assert_eq!(
            classify("interval int32 returns"),
            vec![
                ("interval", Category::Name),
                ("int32", Category::KeywordType),
                ("returns", Category::Name),
            ]
        );
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            classify("shared class foo : bar { private int x; }"),
            vec![
                ("shared", Category::KeywordDeclaration),
                ("class", Category::KeywordDeclaration),
                ("foo", Category::Name),
                (":", Category::Operator),
                ("bar", Category::Name),
                ("{", Category::Punctuation),
                ("private", Category::KeywordDeclaration),
                ("int", Category::KeywordType),
                ("x", Category::Name),
                (";", Category::Punctuation),
                ("}", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn test_preprocessor_line() {
        assert_eq!(
            classify("#include \"helper.as\"\nvoid main() {}"),
            vec![
                ("#include \"helper.as\"", Category::CommentPreproc),
                ("void", Category::KeywordType),
                ("main", Category::Name),
                ("(", Category::Punctuation),
                (")", Category::Punctuation),
                ("{", Category::Punctuation),
                ("}", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn test_pseudo_names_and_casts() {
        assert_eq!(
            classify("cast<foo>(this)"),
            vec![
                ("cast", Category::Keyword),
                ("<", Category::Operator),
                ("foo", Category::Name),
                (">", Category::Operator),
                ("(", Category::Punctuation),
                ("this", Category::NameBuiltinPseudo),
                (")", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn test_identity() {
        let lexer = shared();
        assert_eq!(lexer.name(), "AngelScript");
        assert_eq!(lexer.aliases(), ["angelscript".to_string(), "as".to_string()]);
        assert!(lexer.handles_extension("as"));
    }
}
