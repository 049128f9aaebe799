//! Token categories and the tokens produced by the classifier.
//!
//! Categories follow the dotted naming used by documentation highlighters
//! (`Keyword.Control`, `Comment.Multiline`, ...). The rendering side maps each
//! category to a visual style, usually through [`Category::css_class`].
//!
//! A [`Token`] borrows its text from the classified source and records the byte
//! offset it starts at. Concatenating the text of every token of a single
//! classification call gives back the source exactly.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Default category for characters no rule matched
    Text,
    Whitespace,
    Comment,
    CommentMultiline,
    CommentPreproc,
    String,
    StringSingle,
    StringHeredoc,
    Number,
    NumberFloat,
    NumberHex,
    NumberBin,
    NumberOct,
    Keyword,
    KeywordControl,
    KeywordDeclaration,
    KeywordType,
    KeywordConstant,
    Name,
    NameBuiltin,
    NameBuiltinPseudo,
    Operator,
    OperatorWord,
    Punctuation,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 24] = [
        Category::Text,
        Category::Whitespace,
        Category::Comment,
        Category::CommentMultiline,
        Category::CommentPreproc,
        Category::String,
        Category::StringSingle,
        Category::StringHeredoc,
        Category::Number,
        Category::NumberFloat,
        Category::NumberHex,
        Category::NumberBin,
        Category::NumberOct,
        Category::Keyword,
        Category::KeywordControl,
        Category::KeywordDeclaration,
        Category::KeywordType,
        Category::KeywordConstant,
        Category::Name,
        Category::NameBuiltin,
        Category::NameBuiltinPseudo,
        Category::Operator,
        Category::OperatorWord,
        Category::Punctuation,
    ];

    /// Dotted display name, e.g. `Keyword.Control`
    pub fn name(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Whitespace => "Whitespace",
            Category::Comment => "Comment",
            Category::CommentMultiline => "Comment.Multiline",
            Category::CommentPreproc => "Comment.Preproc",
            Category::String => "String",
            Category::StringSingle => "String.Single",
            Category::StringHeredoc => "String.Heredoc",
            Category::Number => "Number",
            Category::NumberFloat => "Number.Float",
            Category::NumberHex => "Number.Hex",
            Category::NumberBin => "Number.Bin",
            Category::NumberOct => "Number.Oct",
            Category::Keyword => "Keyword",
            Category::KeywordControl => "Keyword.Control",
            Category::KeywordDeclaration => "Keyword.Declaration",
            Category::KeywordType => "Keyword.Type",
            Category::KeywordConstant => "Keyword.Constant",
            Category::Name => "Name",
            Category::NameBuiltin => "Name.Builtin",
            Category::NameBuiltinPseudo => "Name.Builtin.Pseudo",
            Category::Operator => "Operator",
            Category::OperatorWord => "Operator.Word",
            Category::Punctuation => "Punctuation",
        }
    }

    /// Short CSS class used by HTML output. Plain text has none.
    pub fn css_class(&self) -> Option<&'static str> {
        let class = match self {
            Category::Text => return None,
            Category::Whitespace => "w",
            Category::Comment => "c1",
            Category::CommentMultiline => "cm",
            Category::CommentPreproc => "cp",
            Category::String => "s2",
            Category::StringSingle => "s1",
            Category::StringHeredoc => "sh",
            Category::Number => "mi",
            Category::NumberFloat => "mf",
            Category::NumberHex => "mh",
            Category::NumberBin => "mb",
            Category::NumberOct => "mo",
            Category::Keyword => "k",
            Category::KeywordControl => "kr",
            Category::KeywordDeclaration => "kd",
            Category::KeywordType => "kt",
            Category::KeywordConstant => "kc",
            Category::Name => "n",
            Category::NameBuiltin => "nb",
            Category::NameBuiltinPseudo => "bp",
            Category::Operator => "o",
            Category::OperatorWord => "ow",
            Category::Punctuation => "p",
        };
        Some(class)
    }

    /// Look a category up by its dotted name
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.name() == name)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Category::Keyword
                | Category::KeywordControl
                | Category::KeywordDeclaration
                | Category::KeywordType
                | Category::KeywordConstant
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            Category::Comment | Category::CommentMultiline | Category::CommentPreproc
        )
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            Category::String | Category::StringSingle | Category::StringHeredoc
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Category::Number
                | Category::NumberFloat
                | Category::NumberHex
                | Category::NumberBin
                | Category::NumberOct
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A classified span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token<'t> {
    text: &'t str,
    category: Category,
    offset: usize,
}

impl<'t> Token<'t> {
    pub fn new(text: &'t str, category: Category, offset: usize) -> Self {
        Self {
            text,
            category,
            offset,
        }
    }

    /// Matched text
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Byte offset of the token in the classified source
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte length of the matched text
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte range of the token in the classified source
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Whitespace tokens carry no meaning for most assertions and renderers
    pub fn is_whitespace(&self) -> bool {
        self.category == Category::Whitespace
    }
}
