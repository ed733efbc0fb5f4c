//! CSS value types
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSSOM § 6.7 Serializing CSS values](https://drafts.csswg.org/cssom/#serializing-css-values)
//!
//! Parsed values form a tree of [`CSSValue`] nodes shared through [`Rc`].
//! Nodes are never mutated after construction, so equality is structural.

pub mod color;
pub mod length;
pub mod math_function;
pub mod numeric;
pub mod pool;

use std::rc::Rc;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub use color::ColorValue;
pub use length::{DEFAULT_FONT_SIZE_PX, Length, LengthResolver, PixelsAndPercent, Size};
pub use math_function::{MathFunctionValue, ValueRange};
pub use numeric::NumericValue;
pub use pool::ValuePool;

use crate::tokenizer::token::write_css_string;

/// [CSS Cascade 5 § 7.3 Explicit Defaulting](https://www.w3.org/TR/css-cascade-5/#defaulting-keywords)
///
/// "Several CSS-wide property values are defined below; declaring a property
/// to have these values explicitly specifies a particular defaulting
/// behavior."
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CssWideKeyword {
    /// `initial`
    Initial,
    /// `inherit`
    Inherit,
    /// `unset`
    Unset,
    /// `revert`
    Revert,
    /// `revert-layer`
    RevertLayer,
}

/// How the items of a [`CSSValue::List`] are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Separator {
    /// `a b`
    Space,
    /// `a, b`
    Comma,
    /// `a / b`
    Slash,
}

impl Separator {
    const fn text(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ", ",
            Self::Slash => " / ",
        }
    }
}

/// A parsed CSS value.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSValue {
    /// A keyword, stored lowercase.
    Identifier(String),
    /// An author-defined identifier, case preserved.
    CustomIdent(String),
    /// A quoted string.
    String(String),
    /// `url(…)`
    Url(String),
    /// A number, percentage or dimension.
    Numeric(NumericValue),
    /// A math function.
    MathFunction(MathFunctionValue),
    /// A resolved color.
    Color(ColorValue),
    /// Two values, as in `border-radius` corners or `background-position`.
    Pair {
        /// First value
        first: Rc<CSSValue>,
        /// Second value
        second: Rc<CSSValue>,
        /// Serialize as one value when both are equal.
        coalesce: bool,
    },
    /// A separated list.
    List {
        /// Separator between items
        separator: Separator,
        /// The items
        items: Vec<Rc<CSSValue>>,
    },
    /// A function other than a math function, e.g. `translate(…)`.
    Function {
        /// Lowercase function name
        name: String,
        /// Comma-separated arguments
        arguments: Vec<Rc<CSSValue>>,
    },
    /// `initial`, `inherit`, `unset`, `revert` or `revert-layer`.
    CssWide(CssWideKeyword),
    /// A value containing `var()`, kept as text until substitution.
    PendingSubstitution(String),
    /// The value of a custom property, kept as written.
    CustomProperty {
        /// Property name including the leading `--`
        name: String,
        /// The raw value text
        value: String,
    },
}

impl CSSValue {
    /// A keyword value.
    #[must_use]
    pub fn ident(name: &str) -> Rc<Self> {
        Rc::new(Self::Identifier(name.to_ascii_lowercase()))
    }

    /// A space-separated list.
    #[must_use]
    pub fn space_list(items: Vec<Rc<Self>>) -> Rc<Self> {
        Rc::new(Self::List {
            separator: Separator::Space,
            items,
        })
    }

    /// A comma-separated list.
    #[must_use]
    pub fn comma_list(items: Vec<Rc<Self>>) -> Rc<Self> {
        Rc::new(Self::List {
            separator: Separator::Comma,
            items,
        })
    }

    /// A slash-separated list.
    #[must_use]
    pub fn slash_list(items: Vec<Rc<Self>>) -> Rc<Self> {
        Rc::new(Self::List {
            separator: Separator::Slash,
            items,
        })
    }

    /// A pair that serializes as one value when both halves match.
    #[must_use]
    pub fn pair(first: Rc<Self>, second: Rc<Self>) -> Rc<Self> {
        Rc::new(Self::Pair {
            first,
            second,
            coalesce: true,
        })
    }

    /// The keyword, if this is an identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// True for the identifier `keyword`.
    #[must_use]
    pub fn is_identifier(&self, keyword: &str) -> bool {
        self.as_identifier()
            .is_some_and(|name| name.eq_ignore_ascii_case(keyword))
    }

    /// The CSS-wide keyword, if this is one.
    #[must_use]
    pub const fn as_css_wide_keyword(&self) -> Option<CssWideKeyword> {
        match self {
            Self::CssWide(keyword) => Some(*keyword),
            _ => None,
        }
    }

    /// True for `initial`, `inherit`, `unset`, `revert` and `revert-layer`.
    #[must_use]
    pub const fn is_css_wide_keyword(&self) -> bool {
        matches!(self, Self::CssWide(_))
    }

    /// True for values awaiting `var()` substitution.
    #[must_use]
    pub const fn is_pending_substitution(&self) -> bool {
        matches!(self, Self::PendingSubstitution(_))
    }

    /// The items of a list, or this value alone.
    #[must_use]
    pub fn items(self: &Rc<Self>) -> Vec<Rc<Self>> {
        match self.as_ref() {
            Self::List { items, .. } => items.clone(),
            _ => vec![Rc::clone(self)],
        }
    }

    /// The color this value stands for when it can be known without
    /// context: resolved colors and named color keywords.
    #[must_use]
    pub fn to_color(&self) -> Option<ColorValue> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Identifier(name) => ColorValue::from_named(name),
            _ => None,
        }
    }

    /// [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-value)
    ///
    /// "To serialize a CSS value, follow these rules."
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out);
        out
    }

    /// Append the serialization of this value to `out`.
    pub fn write_css(&self, out: &mut String) {
        match self {
            Self::Identifier(name) | Self::CustomIdent(name) => out.push_str(name),
            Self::String(text) => write_css_string(text, out),
            Self::Url(url) => {
                out.push_str("url(");
                write_css_string(url, out);
                out.push(')');
            }
            Self::Numeric(value) => value.write_css(out),
            Self::MathFunction(value) => out.push_str(&value.css_text()),
            Self::Color(color) => out.push_str(&color.css_text()),
            Self::Pair {
                first,
                second,
                coalesce,
            } => {
                first.write_css(out);
                if !(*coalesce && first == second) {
                    out.push(' ');
                    second.write_css(out);
                }
            }
            Self::List { separator, items } => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(separator.text());
                    }
                    item.write_css(out);
                }
            }
            Self::Function { name, arguments } => {
                out.push_str(name);
                out.push('(');
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    argument.write_css(out);
                }
                out.push(')');
            }
            Self::CssWide(keyword) => out.push_str(keyword.into()),
            Self::PendingSubstitution(text) => out.push_str(text),
            Self::CustomProperty { value, .. } => out.push_str(value),
        }
    }
}

impl Serialize for CSSValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.css_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_coalesce_equal_halves() {
        let px = Rc::new(CSSValue::Numeric(NumericValue::px(4.0)));
        let pair = CSSValue::pair(Rc::clone(&px), Rc::clone(&px));
        assert_eq!(pair.css_text(), "4px");
        let pair = CSSValue::pair(px, CSSValue::ident("auto"));
        assert_eq!(pair.css_text(), "4px auto");
    }

    #[test]
    fn lists_use_their_separator() {
        let items = vec![CSSValue::ident("a"), CSSValue::ident("b")];
        assert_eq!(CSSValue::comma_list(items.clone()).css_text(), "a, b");
        assert_eq!(CSSValue::slash_list(items.clone()).css_text(), "a / b");
        assert_eq!(CSSValue::space_list(items).css_text(), "a b");
    }

    #[test]
    fn structural_equality_ignores_sharing() {
        let a = CSSValue::space_list(vec![CSSValue::ident("x")]);
        let b = CSSValue::space_list(vec![CSSValue::ident("X")]);
        assert_eq!(a, b);
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn strings_and_urls_are_quoted() {
        assert_eq!(CSSValue::String("a\"b".into()).css_text(), "\"a\\\"b\"");
        assert_eq!(CSSValue::Url("x.png".into()).css_text(), "url(\"x.png\")");
        assert_eq!(CSSValue::CssWide(CssWideKeyword::RevertLayer).css_text(), "revert-layer");
    }
}
