//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<bad-string-token>`, `<url-token>`,
//! `<bad-url-token>`, `<delim-token>`, `<number-token>`, `<percentage-token>`,
//! `<dimension-token>`, `<whitespace-token>`, `<CDO-token>`, `<CDC-token>`,
//! `<colon-token>`, `<semicolon-token>`, `<comma-token>`, `<[-token>`,
//! `<]-token>`, `<(-token>`, `<)-token>`, `<{-token>`, and `<}-token>`."

use core::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use crate::units::UnitType;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

/// Whether a token opens or closes a block.
///
/// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value):
/// `<function-token>`, `<(-token>`, `<[-token>` and `<{-token>` start a block
/// that runs to the matching closing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockType {
    /// An ordinary token.
    NotBlock,
    /// Opens a block.
    BlockStart,
    /// Closes a block.
    BlockEnd,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// CSS tokens as defined by the CSS Syntax Module Level 3 specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum CSSToken {
    /// "`<ident-token>`"
    Ident(String),

    /// "`<function-token>`", the name without the trailing parenthesis
    Function(String),

    /// "`<at-keyword-token>`", the name without the leading `@`
    AtKeyword(String),

    /// "`<hash-token>`"
    Hash {
        /// "a value composed of one or more code points"
        value: String,
        /// "a type flag set to either 'id' or 'unrestricted'"
        hash_type: HashType,
    },

    /// "`<string-token>`"
    String(String),

    /// "`<bad-string-token>`"
    BadString,

    /// "`<url-token>`"
    Url(String),

    /// "`<bad-url-token>`"
    BadUrl,

    /// "`<delim-token>`"
    Delim(char),

    /// "`<number-token>`"
    Number {
        /// "a numeric value"
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<percentage-token>`"
    Percentage {
        /// "a numeric value"
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
    },

    /// "`<dimension-token>`"
    Dimension {
        /// "a numeric value"
        value: f64,
        /// The integer value if this is an integer type.
        int_value: Option<i64>,
        /// "a type flag set to either 'integer' or 'number'"
        numeric_type: NumericType,
        /// "a unit", as written
        unit: String,
    },

    /// "`<whitespace-token>`"
    Whitespace,

    /// "`<CDO-token>`"
    CDO,

    /// "`<CDC-token>`"
    CDC,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// `<[-token>`
    LeftBracket,

    /// `<]-token>`
    RightBracket,

    /// `<(-token>`
    LeftParen,

    /// `<)-token>`
    RightParen,

    /// `<{-token>`
    LeftBrace,

    /// `<}-token>`
    RightBrace,

    /// End of file - signals end of input
    EOF,
}

impl CSSToken {
    /// Create a new ident token.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Create a new function token.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    /// Create a new number token (integer).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn integer(value: i64) -> Self {
        Self::Number {
            value: value as f64,
            int_value: Some(value),
            numeric_type: NumericType::Integer,
        }
    }

    /// Create a new number token (float).
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number {
            value,
            int_value: None,
            numeric_type: NumericType::Number,
        }
    }

    /// Create a new dimension token.
    #[must_use]
    pub fn dimension(value: f64, int_value: Option<i64>, unit: impl Into<String>) -> Self {
        Self::Dimension {
            value,
            int_value,
            numeric_type: if int_value.is_some() {
                NumericType::Integer
            } else {
                NumericType::Number
            },
            unit: unit.into(),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Whether this token opens or closes a block.
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        match self {
            Self::Function(_) | Self::LeftParen | Self::LeftBracket | Self::LeftBrace => {
                BlockType::BlockStart
            }
            Self::RightParen | Self::RightBracket | Self::RightBrace => BlockType::BlockEnd,
            _ => BlockType::NotBlock,
        }
    }

    /// For a block-start token, the token that closes its block.
    #[must_use]
    pub const fn closing_token(&self) -> Option<Self> {
        match self {
            Self::Function(_) | Self::LeftParen => Some(Self::RightParen),
            Self::LeftBracket => Some(Self::RightBracket),
            Self::LeftBrace => Some(Self::RightBrace),
            _ => None,
        }
    }

    /// True for an ident token matching `keyword` ASCII case-insensitively.
    #[must_use]
    pub fn is_ident(&self, keyword: &str) -> bool {
        matches!(self, Self::Ident(name) if name.eq_ignore_ascii_case(keyword))
    }

    /// True for a function token whose name matches `name` ASCII case-insensitively.
    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        matches!(self, Self::Function(fname) if fname.eq_ignore_ascii_case(name))
    }

    /// The numeric value of a number, percentage or dimension token.
    #[must_use]
    pub const fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. }
            | Self::Percentage { value, .. }
            | Self::Dimension { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The unit a numeric token carries.
    ///
    /// Number tokens map to [`UnitType::Integer`] or [`UnitType::Number`]
    /// according to their type flag; dimensions with an unrecognized unit
    /// map to [`UnitType::Unknown`].
    #[must_use]
    pub fn unit_type(&self) -> Option<UnitType> {
        match self {
            Self::Number { numeric_type, .. } => Some(match numeric_type {
                NumericType::Integer => UnitType::Integer,
                NumericType::Number => UnitType::Number,
            }),
            Self::Percentage { .. } => Some(UnitType::Percentage),
            Self::Dimension { unit, .. } => {
                Some(UnitType::from_unit_str(unit).unwrap_or(UnitType::Unknown))
            }
            _ => None,
        }
    }

    /// Append a CSS serialization of this token to `out`.
    ///
    /// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
    pub fn write_css(&self, out: &mut String) {
        match self {
            Self::Ident(v) => out.push_str(v),
            Self::Function(v) => {
                out.push_str(v);
                out.push('(');
            }
            Self::AtKeyword(v) => {
                out.push('@');
                out.push_str(v);
            }
            Self::Hash { value, .. } => {
                out.push('#');
                out.push_str(value);
            }
            Self::String(v) => write_css_string(v, out),
            Self::BadString | Self::BadUrl => {}
            Self::Url(v) => {
                out.push_str("url(");
                out.push_str(v);
                out.push(')');
            }
            Self::Delim(c) => out.push(*c),
            Self::Number { value, .. } => write_number(*value, out),
            Self::Percentage { value, .. } => {
                write_number(*value, out);
                out.push('%');
            }
            Self::Dimension { value, unit, .. } => {
                write_number(*value, out);
                out.push_str(unit);
            }
            Self::Whitespace => out.push(' '),
            Self::CDO => out.push_str("<!--"),
            Self::CDC => out.push_str("-->"),
            Self::Colon => out.push(':'),
            Self::Semicolon => out.push(';'),
            Self::Comma => out.push(','),
            Self::LeftBracket => out.push('['),
            Self::RightBracket => out.push(']'),
            Self::LeftParen => out.push('('),
            Self::RightParen => out.push(')'),
            Self::LeftBrace => out.push('{'),
            Self::RightBrace => out.push('}'),
            Self::EOF => {}
        }
    }
}

fn write_number(value: f64, out: &mut String) {
    let _ = write!(out, "{value}");
}

/// [CSSOM § 2.1 serialize a string](https://drafts.csswg.org/cssom/#serialize-a-string)
///
/// "To serialize a string means to create a string represented by '"',
/// followed by the result of applying the rules below to each character of
/// the given string, followed by '"'."
pub(crate) fn write_css_string(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\u{1}'..='\u{1f}' | '\u{7f}' => {
                let _ = write!(out, "\\{:x} ", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Serialize a run of tokens back to CSS text, collapsing whitespace runs
/// and trimming both ends.
#[must_use]
pub fn serialize_tokens(tokens: &[CSSToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.is_whitespace() && (out.is_empty() || out.ends_with(' ')) {
            continue;
        }
        token.write_css(&mut out);
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}

impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "<ident:{v}>"),
            Self::Function(v) => write!(f, "<function:{v}(>"),
            Self::AtKeyword(v) => write!(f, "<at-keyword:@{v}>"),
            Self::Hash { value, hash_type } => {
                let t = match hash_type {
                    HashType::Id => "id",
                    HashType::Unrestricted => "unrestricted",
                };
                write!(f, "<hash:#{value} ({t})>")
            }
            Self::String(v) => write!(f, "<string:\"{v}\">"),
            Self::BadString => write!(f, "<bad-string>"),
            Self::Url(v) => write!(f, "<url:{v}>"),
            Self::BadUrl => write!(f, "<bad-url>"),
            Self::Delim(c) => write!(f, "<delim:{c}>"),
            Self::Number { value, .. } => write!(f, "<number:{value}>"),
            Self::Percentage { value, .. } => write!(f, "<percentage:{value}%>"),
            Self::Dimension { value, unit, .. } => write!(f, "<dimension:{value}{unit}>"),
            Self::Whitespace => write!(f, "<whitespace>"),
            Self::CDO => write!(f, "<CDO>"),
            Self::CDC => write!(f, "<CDC>"),
            Self::Colon => write!(f, "<colon>"),
            Self::Semicolon => write!(f, "<semicolon>"),
            Self::Comma => write!(f, "<comma>"),
            Self::LeftBracket => write!(f, "<[>"),
            Self::RightBracket => write!(f, "<]>"),
            Self::LeftParen => write!(f, "<(>"),
            Self::RightParen => write!(f, "<)>"),
            Self::LeftBrace => write!(f, "<{{>"),
            Self::RightBrace => write!(f, "<}}>"),
            Self::EOF => write!(f, "<EOF>"),
        }
    }
}
