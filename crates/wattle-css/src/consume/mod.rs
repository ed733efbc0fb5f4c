//! Grammar productions for property values.
//!
//! [CSS Values 4 § 2](https://www.w3.org/TR/css-values-4/#value-defs)
//!
//! Each `consume_*` function parses one production from the front of a
//! [`TokenStream`]. On success the stream is left after the value and any
//! whitespace that follows it. On failure the stream is left exactly where
//! it was, so callers can try one production after another.

pub mod color;
pub mod transform;

use std::rc::Rc;

pub use color::{consume_color, consume_color_with_quirks};

use crate::math::{CalculationResultCategory, at_math_function, parse_math_function};
use crate::parser::context::ParserContext;
use crate::parser::stream::TokenStream;
use crate::tokenizer::{CSSToken, NumericType, serialize_tokens};
use crate::units::{UnitCategory, UnitType};
use crate::values::{
    CSSValue, CssWideKeyword, MathFunctionValue, NumericValue, Separator, ValueRange,
};

/// Whether a bare number may stand in for a `px` length.
///
/// [Quirks § 3.9 The unitless length quirk](https://quirks.spec.whatwg.org/#the-unitless-length-quirk)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitlessQuirk {
    /// Accepted in quirks mode.
    Allow,
    /// Never accepted (except in SVG attributes).
    Forbid,
}

/// Literal values are kept within the range of an `f32`, like the fast
/// path does.
fn clamp_literal(value: f64) -> f64 {
    value.clamp(-f64::from(f32::MAX), f64::from(f32::MAX))
}

fn in_range(value: f64, range: ValueRange) -> bool {
    range.contains(value)
}

/// Parse a math function whose category satisfies `accepts`.
fn consume_math(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    allow_percent: bool,
    range: ValueRange,
    accepts: impl Fn(CalculationResultCategory) -> bool,
) -> Option<Rc<CSSValue>> {
    if !at_math_function(stream) {
        return None;
    }
    let state = stream.state();
    let node = parse_math_function(stream, allow_percent)?;
    let container_units_rejected = !context.container_units_enabled
        && node.any_unit(&|unit: UnitType| unit.is_container_percentage_length());
    if !accepts(node.category()) || container_units_rejected {
        stream.restore(state);
        return None;
    }
    Some(Rc::new(CSSValue::MathFunction(MathFunctionValue::new(
        node, range,
    ))))
}

/// A CSS-wide keyword.
pub fn consume_css_wide_keyword(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    let keyword: CssWideKeyword = name.parse().ok()?;
    let _ = stream.consume_including_whitespace();
    Some(context.pool().css_wide(keyword))
}

/// Any `<ident>`, as a lowercase keyword.
pub fn consume_ident(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    let _ = stream.consume_including_whitespace();
    Some(context.pool().identifier(name))
}

/// An `<ident>` from `keywords`, compared ASCII case-insensitively.
pub fn consume_ident_in(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    keywords: &[&str],
) -> Option<Rc<CSSValue>> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    if !keywords.iter().any(|keyword| keyword.eq_ignore_ascii_case(name)) {
        return None;
    }
    consume_ident(stream, context)
}

/// [§ 4.2 Author-defined Identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
///
/// "The CSS-wide keywords are not valid `<custom-ident>`s. The `default`
/// keyword is reserved and is also not a valid `<custom-ident>`."
pub fn consume_custom_ident(stream: &mut TokenStream<'_>) -> Option<Rc<CSSValue>> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    if is_reserved_ident(name) {
        return None;
    }
    let _ = stream.consume_including_whitespace();
    Some(Rc::new(CSSValue::CustomIdent(name.clone())))
}

/// True for names a `<custom-ident>` can never be.
#[must_use]
pub fn is_reserved_ident(name: &str) -> bool {
    name.parse::<CssWideKeyword>().is_ok() || name.eq_ignore_ascii_case("default")
}

/// A `<string>`.
pub fn consume_string(stream: &mut TokenStream<'_>) -> Option<Rc<CSSValue>> {
    let CSSToken::String(text) = stream.peek() else {
        return None;
    };
    let _ = stream.consume_including_whitespace();
    Some(Rc::new(CSSValue::String(text.clone())))
}

/// A `<url>`: either an unquoted url token or `url("…")`.
pub fn consume_url(stream: &mut TokenStream<'_>) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Url(url) => {
            let _ = stream.consume_including_whitespace();
            Some(Rc::new(CSSValue::Url(url.clone())))
        }
        token if token.is_function("url") || token.is_function("src") => {
            let mut guard = stream.save();
            let mut arguments = guard.consume_block();
            arguments.consume_whitespace();
            let CSSToken::String(url) = arguments.consume_including_whitespace() else {
                return None;
            };
            if !arguments.at_end() {
                return None;
            }
            guard.consume_whitespace();
            guard.release();
            Some(Rc::new(CSSValue::Url(url.clone())))
        }
        _ => None,
    }
}

/// [§ 5.2 Integers](https://www.w3.org/TR/css-values-4/#integers)
///
/// An integer literal no smaller than `minimum`, or a math function that
/// resolves to a `<number>` (rounded when read).
pub fn consume_integer(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    minimum: f64,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Number {
            value,
            numeric_type: NumericType::Integer,
            ..
        } => {
            if *value < minimum {
                return None;
            }
            let value = clamp_literal(*value);
            let _ = stream.consume_including_whitespace();
            Some(context.pool().numeric(value, UnitType::Integer))
        }
        _ => {
            let range = if minimum >= 1.0 {
                ValueRange::PositiveInteger
            } else if minimum >= 0.0 {
                ValueRange::NonNegativeInteger
            } else {
                ValueRange::Integer
            };
            consume_math(stream, context, false, range, |category| {
                category == CalculationResultCategory::Number
            })
        }
    }
}

/// An integer `>= 1`.
pub fn consume_positive_integer(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    consume_integer(stream, context, 1.0)
}

/// [§ 5.3 Real Numbers](https://www.w3.org/TR/css-values-4/#numbers)
pub fn consume_number(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Number { value, .. } => {
            if !in_range(*value, range) {
                return None;
            }
            let unit = stream.peek().unit_type().unwrap_or(UnitType::Number);
            let value = clamp_literal(*value);
            let _ = stream.consume_including_whitespace();
            Some(context.pool().numeric(value, unit))
        }
        _ => consume_math(stream, context, false, range, |category| {
            category == CalculationResultCategory::Number
        }),
    }
}

/// [§ 5.5 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
pub fn consume_percent(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Percentage { value, .. } => {
            if !in_range(*value, range) {
                return None;
            }
            let value = clamp_literal(*value);
            let _ = stream.consume_including_whitespace();
            Some(context.pool().numeric(value, UnitType::Percentage))
        }
        _ => consume_math(stream, context, true, range, |category| {
            category == CalculationResultCategory::Percent
        }),
    }
}

/// A `<number>` or a `<percentage>`.
pub fn consume_number_or_percent(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
) -> Option<Rc<CSSValue>> {
    consume_number(stream, context, range).or_else(|| consume_percent(stream, context, range))
}

/// A dimension token in one of the units `accepts` allows.
fn consume_dimension(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
    accepts: impl Fn(UnitType) -> bool,
) -> Option<Rc<CSSValue>> {
    let token = stream.peek();
    let CSSToken::Dimension { value, .. } = token else {
        return None;
    };
    let unit = token.unit_type()?;
    if !accepts(unit) || !in_range(*value, range) {
        return None;
    }
    if unit.is_container_percentage_length() && !context.container_units_enabled {
        return None;
    }
    let value = clamp_literal(*value);
    let _ = stream.consume_including_whitespace();
    Some(context.pool().numeric(value, unit))
}

/// A bare number read as `px`: zero always, anything else under the
/// unitless quirk or in SVG attributes.
fn consume_unitless_length(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
    unitless: UnitlessQuirk,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Number { value, .. } = stream.peek() else {
        return None;
    };
    let allowed = *value == 0.0
        || context.is_svg_attribute_mode()
        || (unitless == UnitlessQuirk::Allow && context.is_quirks_mode());
    if !allowed || !in_range(*value, range) {
        return None;
    }
    let value = clamp_literal(*value);
    let _ = stream.consume_including_whitespace();
    Some(context.pool().numeric(value, UnitType::Pixels))
}

/// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
pub fn consume_length(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
    unitless: UnitlessQuirk,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Dimension { .. } => consume_dimension(stream, context, range, UnitType::is_length),
        CSSToken::Number { .. } => consume_unitless_length(stream, context, range, unitless),
        _ => consume_math(stream, context, false, range, |category| {
            category == CalculationResultCategory::Length
        }),
    }
}

/// `<length-percentage>`
pub fn consume_length_or_percent(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
    unitless: UnitlessQuirk,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Dimension { .. } => consume_dimension(stream, context, range, UnitType::is_length),
        CSSToken::Number { .. } => consume_unitless_length(stream, context, range, unitless),
        CSSToken::Percentage { .. } => consume_percent(stream, context, range),
        _ => consume_math(stream, context, true, range, |category| {
            matches!(
                category,
                CalculationResultCategory::Length
                    | CalculationResultCategory::Percent
                    | CalculationResultCategory::LengthFunction
            )
        }),
    }
}

/// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
///
/// A bare `0` is accepted as `0deg`.
pub fn consume_angle(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Dimension { .. } => consume_dimension(stream, context, ValueRange::All, |unit| {
            unit.category() == UnitCategory::Angle
        }),
        CSSToken::Number { value, .. } if *value == 0.0 => {
            let _ = stream.consume_including_whitespace();
            Some(context.pool().numeric(0.0, UnitType::Degrees))
        }
        _ => consume_math(stream, context, false, ValueRange::All, |category| {
            category == CalculationResultCategory::Angle
        }),
    }
}

/// [`consume_angle`], with a literal outside `[minimum, maximum]` degrees
/// replaced by the nearest bound.
pub fn consume_angle_clamped(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    minimum: f64,
    maximum: f64,
) -> Option<Rc<CSSValue>> {
    let angle = consume_angle(stream, context)?;
    let CSSValue::Numeric(literal) = angle.as_ref() else {
        return Some(angle);
    };
    let degrees = literal.value * literal.unit.conversion_to_canonical();
    if (minimum..=maximum).contains(&degrees) {
        return Some(angle);
    }
    Some(Rc::new(CSSValue::Numeric(NumericValue::new(
        degrees.clamp(minimum, maximum),
        UnitType::Degrees,
    ))))
}

/// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
pub fn consume_time(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    range: ValueRange,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Dimension { .. } => consume_dimension(stream, context, range, |unit| {
            unit.category() == UnitCategory::Time
        }),
        _ => consume_math(stream, context, false, range, |category| {
            category == CalculationResultCategory::Time
        }),
    }
}

/// [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
pub fn consume_resolution(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Dimension { .. } => {
            consume_dimension(stream, context, ValueRange::NonNegative, |unit| {
                unit.category() == UnitCategory::Resolution
            })
        }
        _ => consume_math(stream, context, false, ValueRange::NonNegative, |category| {
            category == CalculationResultCategory::Resolution
        }),
    }
}

/// `<flex>`, e.g. `1fr`.
pub fn consume_flex(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    consume_dimension(stream, context, ValueRange::NonNegative, |unit| {
        unit == UnitType::Fraction
    })
}

/// Gradient and image functions accepted where an `<image>` is expected.
const IMAGE_FUNCTIONS: &[&str] = &[
    "linear-gradient",
    "repeating-linear-gradient",
    "radial-gradient",
    "repeating-radial-gradient",
    "conic-gradient",
    "repeating-conic-gradient",
    "image-set",
    "-webkit-image-set",
    "cross-fade",
];

/// [CSS Images 3 § 2](https://www.w3.org/TR/css-images-3/#image-values)
///
/// A `<url>` or a gradient/image function. Function arguments are kept as
/// generic component values.
pub fn consume_image(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    if let Some(url) = consume_url(stream) {
        return Some(url);
    }
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    if !IMAGE_FUNCTIONS.iter().any(|function| function.eq_ignore_ascii_case(name)) {
        return None;
    }
    consume_function(stream, context)
}

/// Consume a function and its comma-separated arguments as generic values.
fn consume_function(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    let name = name.to_ascii_lowercase();
    let mut guard = stream.save();
    let mut arguments = guard.consume_block();
    arguments.consume_whitespace();
    let mut values = Vec::new();
    while !arguments.at_end() {
        let argument = consume_generic_list(&mut arguments, context, &|token| {
            matches!(token, CSSToken::Comma)
        })?;
        values.push(argument);
        if matches!(arguments.peek(), CSSToken::Comma) {
            let _ = arguments.consume_including_whitespace();
            if arguments.at_end() {
                return None;
            }
        }
    }
    guard.consume_whitespace();
    guard.release();
    Some(Rc::new(CSSValue::Function {
        name,
        arguments: values,
    }))
}

/// One component value of an otherwise unstructured grammar.
///
/// Numbers, dimensions and math functions become numeric values, idents
/// become keywords, hashes become colors, functions keep their arguments
/// and any other block is kept as its text.
pub fn consume_generic_component(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let token = stream.peek();
    match token {
        CSSToken::Number { value, .. }
        | CSSToken::Percentage { value, .. }
        | CSSToken::Dimension { value, .. } => {
            let unit = token.unit_type()?;
            if unit == UnitType::Unknown {
                return None;
            }
            let value = clamp_literal(*value);
            let _ = stream.consume_including_whitespace();
            Some(context.pool().numeric(value, unit))
        }
        CSSToken::Function(_) if at_math_function(stream) => {
            consume_math(stream, context, true, ValueRange::All, |category| {
                category != CalculationResultCategory::Other
            })
        }
        CSSToken::Function(name) if name.eq_ignore_ascii_case("url") => consume_url(stream),
        CSSToken::Function(_) => {
            consume_color(stream, context).or_else(|| consume_function(stream, context))
        }
        CSSToken::Hash { .. } => consume_color(stream, context),
        CSSToken::Ident(_) => consume_ident(stream, context),
        CSSToken::String(_) => consume_string(stream),
        CSSToken::Url(_) => consume_url(stream),
        CSSToken::LeftBracket | CSSToken::LeftParen => {
            let text = serialize_tokens(stream.consume_component_value());
            stream.consume_whitespace();
            Some(Rc::new(CSSValue::CustomIdent(text)))
        }
        _ => None,
    }
}

/// Generic components up to the end of the stream or a top-level token
/// matching `stop`. A single component is returned as itself; several as a
/// space-separated list; `/` between components splits a slash list.
pub fn consume_generic_list(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    stop: &dyn Fn(&CSSToken) -> bool,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let mut groups: Vec<Vec<Rc<CSSValue>>> = vec![Vec::new()];
    while !guard.at_end() && !stop(guard.peek()) {
        if matches!(guard.peek(), CSSToken::Delim('/')) {
            let _ = guard.consume_including_whitespace();
            groups.push(Vec::new());
            continue;
        }
        let component = consume_generic_component(&mut *guard, context)?;
        if let Some(group) = groups.last_mut() {
            group.push(component);
        }
    }
    if groups.iter().any(Vec::is_empty) {
        return None;
    }
    guard.release();
    let mut groups: Vec<Rc<CSSValue>> = groups.into_iter().map(single_or_space_list).collect();
    if groups.len() == 1 {
        return groups.pop();
    }
    Some(Rc::new(CSSValue::List {
        separator: Separator::Slash,
        items: groups,
    }))
}

/// The only item of `items`, or a space-separated list of them.
#[must_use]
pub fn single_or_space_list(mut items: Vec<Rc<CSSValue>>) -> Rc<CSSValue> {
    if items.len() == 1 {
        if let Some(item) = items.pop() {
            return item;
        }
    }
    CSSValue::space_list(items)
}

/// Parse comma-separated items with `consume_item`, which must consume each
/// item entirely. Fails on an empty item or trailing comma.
pub fn consume_comma_separated_list(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    consume_item: &dyn Fn(&mut TokenStream<'_>, &ParserContext) -> Option<Rc<CSSValue>>,
) -> Option<Vec<Rc<CSSValue>>> {
    let mut guard = stream.save();
    let mut items = Vec::new();
    loop {
        let item = consume_item(&mut *guard, context)?;
        items.push(item);
        if !matches!(guard.peek(), CSSToken::Comma) {
            break;
        }
        let _ = guard.consume_including_whitespace();
    }
    guard.release();
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn with_stream<T>(text: &str, f: impl FnOnce(&mut TokenStream<'_>) -> T) -> (T, bool) {
        let tokens = tokenize(text);
        let mut stream = TokenStream::new(&tokens);
        let result = f(&mut stream);
        (result, stream.at_end())
    }

    #[test]
    fn failure_leaves_stream_untouched() {
        let context = ParserContext::new();
        let tokens = tokenize("calc(1deg + 1px) 5px");
        let mut stream = TokenStream::new(&tokens);
        let before = stream.state();
        assert!(consume_length(&mut stream, &context, ValueRange::All, UnitlessQuirk::Forbid).is_none());
        assert_eq!(stream.state(), before);
    }

    #[test]
    fn unitless_lengths_need_the_quirk() {
        let standard = ParserContext::new();
        let (value, _) = with_stream("12", |stream| {
            consume_length(stream, &standard, ValueRange::All, UnitlessQuirk::Allow)
        });
        assert!(value.is_none());

        let quirks = ParserContext::new().with_mode(crate::parser::ParserMode::Quirks);
        let (value, _) = with_stream("12", |stream| {
            consume_length(stream, &quirks, ValueRange::All, UnitlessQuirk::Allow)
        });
        assert_eq!(value.map(|v| v.css_text()).as_deref(), Some("12px"));

        let (value, _) = with_stream("0", |stream| {
            consume_length(stream, &standard, ValueRange::All, UnitlessQuirk::Forbid)
        });
        assert_eq!(value.map(|v| v.css_text()).as_deref(), Some("0px"));
    }

    #[test]
    fn non_negative_rejects_negative_literals() {
        let context = ParserContext::new();
        let (value, _) = with_stream("-1px", |stream| {
            consume_length(stream, &context, ValueRange::NonNegative, UnitlessQuirk::Forbid)
        });
        assert!(value.is_none());
        // calc() is clamped when read, not rejected.
        let (value, done) = with_stream("calc(-1px)", |stream| {
            consume_length(stream, &context, ValueRange::NonNegative, UnitlessQuirk::Forbid)
        });
        assert!(value.is_some());
        assert!(done);
    }

    #[test]
    fn integers_accept_calc_numbers() {
        let context = ParserContext::new();
        let (value, _) = with_stream("calc(3 / 2)", |stream| consume_integer(stream, &context, 0.0));
        let value = value.map(|v| v.compute_integer(&crate::values::LengthResolver::default()));
        assert_eq!(value, Some(2));
        let (value, _) = with_stream("1.5", |stream| consume_integer(stream, &context, 0.0));
        assert!(value.is_none());
    }

    #[test]
    fn custom_idents_exclude_reserved_words() {
        let (value, _) = with_stream("inherit", consume_custom_ident);
        assert!(value.is_none());
        let (value, _) = with_stream("Thumbs", consume_custom_ident);
        assert_eq!(value.map(|v| v.css_text()).as_deref(), Some("Thumbs"));
    }

    #[test]
    fn generic_lists_split_on_slash() {
        let context = ParserContext::new();
        let (value, done) = with_stream("1 / 3 span", |stream| {
            consume_generic_list(stream, &context, &|_| false)
        });
        assert_eq!(value.map(|v| v.css_text()).as_deref(), Some("1 / 3 span"));
        assert!(done);
    }
}
