//! CSS tokenizer, value parsers, calc() evaluation, property-value sets and
//! shorthand serialization.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types, with block markers and integer/number distinction
//!   - Comment handling and escape sequences
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Stylesheets, style rules and declaration lists
//!   - `@layer`, `@counter-style`, `@scope` and generic at-rules
//!
//! - **Values** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Every length, angle, time, frequency, resolution and flex unit
//!   - Math functions (`calc()`, `min()`, `round()`, trig, …) with
//!     simplification and clamped evaluation
//!   - Colors: hex, named, `rgb()`, `hsl()`, `hwb()`, `color-mix()`
//!
//! - **Properties**
//!   - Per-property grammars and shorthand expansion
//!   - A string-level fast path for the most common values
//!   - Property-value sets with `all`, `!important` and custom properties
//!   - Shorthand serialization and declaration-block `cssText`
//!
//! # Not Yet Implemented
//!
//! - Selector parsing beyond splitting selector lists
//! - The `font` and `list-style` shorthands
//! - `var()` substitution

use std::rc::Rc;

use thiserror::Error;

/// Grammar productions for property values.
pub mod consume;
/// String-level parsing for common declaration values.
pub mod fast_path;
/// Math expression trees per [CSS Values 4 § 10](https://www.w3.org/TR/css-values-4/#math).
pub mod math;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// The property table.
pub mod properties;
/// Per-property grammar dispatch and shorthand expansion.
pub mod property_parser;
/// Property-value sets per [CSSOM § 6.6](https://drafts.csswg.org/cssom/#css-declaration-blocks).
pub mod property_set;
/// Shorthand serialization per [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serializing-css-values).
pub mod serializer;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Unit classification per [CSS Values 4 § 6](https://www.w3.org/TR/css-values-4/#lengths).
pub mod units;
/// The value tree.
pub mod values;

// Re-exports for convenience
pub use parser::{CSSParser, ParserContext, ParserMode, Rule, Stylesheet, TokenStream};
pub use properties::{PropertyId, PropertyName};
pub use property_set::{
    CSSProperty, ImmutablePropertyValueSet, MutablePropertyValueSet, PropertyValueSet,
};
pub use tokenizer::{CSSToken, CSSTokenizer, tokenize};
pub use units::UnitType;
pub use values::{CSSValue, ColorValue, LengthResolver, NumericValue};

/// Errors from the convenience entry points. Inside the pipeline, failure is
/// an empty `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    /// Neither a known property nor a custom property name.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
    /// The value does not match the property's grammar.
    #[error("invalid value for '{property}': '{value}'")]
    InvalidValue {
        /// The property name as given
        property: String,
        /// The rejected value text
        value: String,
    },
    /// The value was empty.
    #[error("unexpected end of input in the value of '{0}'")]
    UnexpectedEof(String),
    /// A shorthand has no single value; parse it into a property-value set.
    #[error("'{0}' is a shorthand")]
    Shorthand(String),
}

/// Look up a property by name. Names starting with `--` are custom
/// properties; other names are matched ASCII case-insensitively.
///
/// # Errors
///
/// [`CssError::UnknownProperty`] if the name is not in the property table.
pub fn parse_property_name(name: &str) -> Result<PropertyName, CssError> {
    PropertyName::parse(name).ok_or_else(|| CssError::UnknownProperty(name.to_owned()))
}

/// Parse `text` as the value of the longhand or custom property
/// `property_name` in a standard-mode context.
///
/// ```
/// let value = wattle_css::parse_declaration_value("width", "calc(10px + 5px)").unwrap();
/// assert_eq!(value.css_text(), "calc(15px)");
/// ```
///
/// # Errors
///
/// See [`parse_declaration_value_in`].
pub fn parse_declaration_value(property_name: &str, text: &str) -> Result<Rc<CSSValue>, CssError> {
    parse_declaration_value_in(property_name, text, &ParserContext::new())
}

/// Parse `text` as the value of `property_name` in `context`. A trailing
/// `!important` is accepted and ignored.
///
/// # Errors
///
/// - [`CssError::UnknownProperty`] for an unknown name
/// - [`CssError::Shorthand`] for a shorthand other than `all`
/// - [`CssError::UnexpectedEof`] for an empty value
/// - [`CssError::InvalidValue`] if the value does not parse
pub fn parse_declaration_value_in(
    property_name: &str,
    text: &str,
    context: &ParserContext,
) -> Result<Rc<CSSValue>, CssError> {
    let name = parse_property_name(property_name)?;
    if name
        .id()
        .is_some_and(|id| id.is_shorthand() && id != PropertyId::All)
    {
        return Err(CssError::Shorthand(property_name.to_owned()));
    }
    let tokens = tokenize(text);
    let (value, important) = property_parser::strip_important(&tokens);
    if value.is_empty() {
        return Err(CssError::UnexpectedEof(property_name.to_owned()));
    }
    let mut parsed = Vec::new();
    if !property_parser::parse_declaration(&name, value, important, context, &mut parsed) {
        return Err(CssError::InvalidValue {
            property: property_name.to_owned(),
            value: text.trim().to_owned(),
        });
    }
    parsed
        .pop()
        .map(|property| property.value)
        .ok_or_else(|| CssError::InvalidValue {
            property: property_name.to_owned(),
            value: text.trim().to_owned(),
        })
}
