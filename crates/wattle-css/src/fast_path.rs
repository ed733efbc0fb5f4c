//! String-level parsing for the most common declaration values.
//!
//! Simple lengths, colors, keywords and plain transform lists are read
//! straight from the text without tokenizing. Anything the fast path does
//! not recognize returns `None` and goes through the full grammar, which
//! produces the same value for every input the fast path accepts.

use std::rc::Rc;

use crate::consume::color::is_color_keyword;
use crate::consume::transform::{TransformArgument, transform_grammar};
use crate::parser::context::ParserContext;
use crate::properties::{Grammar, PropertyId};
use crate::units::{UnitCategory, UnitType};
use crate::values::color::unit_to_u8;
use crate::values::{CSSValue, ColorValue, ValueRange};

/// Try to parse `text` as the value of `id` without the tokenizer.
#[must_use]
pub fn maybe_parse_value(
    id: PropertyId,
    text: &str,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if text.is_empty() || !text.is_ascii() {
        return None;
    }
    match id.grammar() {
        Grammar::LengthPercentage(range) => parse_simple_length(id, text, range, true, context),
        Grammar::Length(range) => parse_simple_length(id, text, range, false, context),
        Grammar::Color => parse_color(id, text, context),
        Grammar::Keywords => parse_keyword(id, text, context),
        Grammar::Transform => parse_simple_transform(text, context),
        _ => None,
    }
}

/// A number with an optional `-` sign, digits and at most one `.`, followed
/// by whatever unit text remains. Exponents are left to the full parser.
fn split_number(text: &str) -> Option<(f64, bool, &str)> {
    let digits_start = usize::from(text.starts_with('-'));
    let end = text[digits_start..]
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .map_or(text.len(), |offset| digits_start + offset);
    let number = &text[..end];
    let digits = &number[digits_start..];
    if digits.is_empty() || digits.starts_with('.') && digits.len() == 1 {
        return None;
    }
    if digits.matches('.').count() > 1 || digits.ends_with('.') {
        return None;
    }
    let unit = &text[end..];
    if unit.starts_with(|c: char| c == 'e' || c == 'E') && !unit.eq_ignore_ascii_case("em") {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    Some((
        value.clamp(-f64::from(f32::MAX), f64::from(f32::MAX)),
        !digits.contains('.'),
        unit,
    ))
}

/// `<number>px`, `<number>%` or a bare number where a unitless length is
/// allowed.
fn parse_simple_length(
    id: PropertyId,
    text: &str,
    range: ValueRange,
    allow_percent: bool,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let (value, _, unit) = split_number(text)?;
    let unit = if unit.eq_ignore_ascii_case("px") {
        UnitType::Pixels
    } else if unit == "%" && allow_percent {
        UnitType::Percentage
    } else if unit.is_empty() {
        let unitless = value == 0.0
            || context.is_svg_attribute_mode()
            || (context.is_quirks_mode() && id.allows_unitless_quirk());
        if !unitless {
            return None;
        }
        UnitType::Pixels
    } else {
        return None;
    };
    if !range.contains(value) {
        return None;
    }
    Some(context.pool().numeric(value, unit))
}

/// Hex colors, `rgb()`/`rgba()` with integer channels, color keywords and
/// hashless hex in quirks mode.
fn parse_color(id: PropertyId, text: &str, context: &ParserContext) -> Option<Rc<CSSValue>> {
    if let Some(hex) = text.strip_prefix('#') {
        return ColorValue::from_hex(hex).map(|color| context.pool().color(color));
    }
    if is_color_keyword(text) {
        return Some(context.pool().identifier(text));
    }
    if let Some(color) = parse_legacy_rgb(text) {
        return Some(context.pool().color(color));
    }
    let quirky = id.allows_quirky_color()
        && context.is_quirks_mode()
        && matches!(text.len(), 3 | 6)
        && text.starts_with(|c: char| c.is_ascii_alphabetic())
        && text.chars().all(|c| c.is_ascii_hexdigit());
    if quirky {
        return ColorValue::from_hex(text).map(|color| context.pool().color(color));
    }
    None
}

/// `rgb(r, g, b)` and `rgba(r, g, b, a)` with integer channels.
fn parse_legacy_rgb(text: &str) -> Option<ColorValue> {
    let lower = text.to_ascii_lowercase();
    let (arguments, with_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, true)
    } else {
        (lower.strip_prefix("rgb(")?, false)
    };
    let arguments = arguments.strip_suffix(')')?;
    let parts: Vec<&str> = arguments.split(',').map(str::trim).collect();
    let (channels, alpha) = match (parts.as_slice(), with_alpha) {
        ([r, g, b], _) => ([*r, *g, *b], None),
        ([r, g, b, a], _) => ([*r, *g, *b], Some(*a)),
        _ => return None,
    };
    let mut rgb = [0_u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        let (value, is_integer, unit) = split_number(channel)?;
        if !is_integer || !unit.is_empty() {
            return None;
        }
        *slot = unit_to_u8(value / 255.0);
    }
    let alpha = match alpha {
        Some(alpha) => {
            let (value, _, unit) = split_number(alpha)?;
            if !unit.is_empty() {
                return None;
            }
            unit_to_u8(value)
        }
        None => 255,
    };
    let [r, g, b] = rgb;
    Some(ColorValue::rgba(r, g, b, alpha))
}

/// A keyword the property accepts.
fn parse_keyword(id: PropertyId, text: &str, context: &ParserContext) -> Option<Rc<CSSValue>> {
    let valid = id
        .keywords()
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(text));
    valid.then(|| context.pool().identifier(text))
}

/// A space-separated list of transform functions with comma-separated
/// literal arguments, or `none`. Each function is checked against the same
/// argument grammar the full parser uses.
fn parse_simple_transform(text: &str, context: &ParserContext) -> Option<Rc<CSSValue>> {
    if text.eq_ignore_ascii_case("none") {
        return Some(context.pool().identifier("none"));
    }
    let mut functions = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let name = rest[..open].to_ascii_lowercase();
        let grammar = transform_grammar(&name)?;
        let close = rest.find(')')?;
        let texts: Vec<&str> = rest[open + 1..close].split(',').map(str::trim).collect();
        if texts.len() < grammar.required || texts.len() > grammar.arguments.len() {
            return None;
        }
        let arguments = texts
            .iter()
            .zip(grammar.arguments)
            .map(|(argument, kind)| parse_transform_argument(argument, *kind, context))
            .collect::<Option<Vec<_>>>()?;
        functions.push(Rc::new(CSSValue::Function { name, arguments }));
        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_ascii_whitespace());
    }
    if functions.is_empty() {
        return None;
    }
    Some(CSSValue::space_list(functions))
}

/// One literal argument of the given kind. Bare numbers other than `0` in
/// length and angle slots are left to the full parser.
fn parse_transform_argument(
    text: &str,
    kind: TransformArgument,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    if kind == TransformArgument::Perspective && text.eq_ignore_ascii_case("none") {
        return Some(context.pool().identifier("none"));
    }
    let (value, is_integer, unit) = split_number(text)?;
    let unit = match (kind, unit) {
        (TransformArgument::Number | TransformArgument::NumberOrPercent, "") if is_integer => {
            UnitType::Integer
        }
        (TransformArgument::Number | TransformArgument::NumberOrPercent, "") => UnitType::Number,
        (TransformArgument::NumberOrPercent | TransformArgument::LengthPercentage, "%") => {
            UnitType::Percentage
        }
        (TransformArgument::Angle, "") if value == 0.0 => {
            return Some(context.pool().numeric(0.0, UnitType::Degrees));
        }
        (
            TransformArgument::LengthPercentage
            | TransformArgument::Length
            | TransformArgument::Perspective,
            "",
        ) if value == 0.0 => UnitType::Pixels,
        (TransformArgument::Angle, unit) => {
            let unit = UnitType::from_unit_str(unit)?;
            if unit.category() != UnitCategory::Angle {
                return None;
            }
            unit
        }
        (
            TransformArgument::LengthPercentage
            | TransformArgument::Length
            | TransformArgument::Perspective,
            unit,
        ) if !unit.is_empty() => {
            let unit = UnitType::from_unit_str(unit)?;
            if !unit.is_length() || unit.is_container_percentage_length() {
                return None;
            }
            unit
        }
        _ => return None,
    };
    if kind == TransformArgument::Perspective && value < 0.0 {
        return None;
    }
    Some(context.pool().numeric(value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::ParserMode;
    use crate::parser::stream::TokenStream;
    use crate::property_parser::parse_longhand;
    use crate::tokenizer::tokenize;

    fn fast(id: PropertyId, text: &str, context: &ParserContext) -> Option<String> {
        maybe_parse_value(id, text, context).map(|value| value.css_text())
    }

    fn agrees_with_full_parser(id: PropertyId, text: &str, context: &ParserContext) {
        let fast = maybe_parse_value(id, text, context);
        assert!(fast.is_some(), "{id}: {text}");
        let tokens = tokenize(text);
        let mut stream = TokenStream::new(&tokens);
        let full = parse_longhand(id, &mut stream, context);
        assert_eq!(fast, full, "{id}: {text}");
    }

    #[test]
    fn simple_lengths() {
        let context = ParserContext::new();
        assert_eq!(fast(PropertyId::Width, "10px", &context).as_deref(), Some("10px"));
        assert_eq!(fast(PropertyId::Width, " 50% ", &context).as_deref(), Some("50%"));
        assert_eq!(fast(PropertyId::Width, "0", &context).as_deref(), Some("0px"));
        assert!(fast(PropertyId::Width, "-1px", &context).is_none());
        assert_eq!(fast(PropertyId::MarginTop, "-1.5px", &context).as_deref(), Some("-1.5px"));
        assert!(fast(PropertyId::Width, "10", &context).is_none());
        assert!(fast(PropertyId::Width, "1e3px", &context).is_none());
        assert!(fast(PropertyId::Width, "10em", &context).is_none());
    }

    #[test]
    fn unitless_lengths_by_mode() {
        let quirks = ParserContext::new().with_mode(ParserMode::Quirks);
        assert_eq!(fast(PropertyId::Width, "10", &quirks).as_deref(), Some("10px"));
        let svg = ParserContext::new().with_mode(ParserMode::SVGAttribute);
        assert_eq!(fast(PropertyId::R, "4", &svg).as_deref(), Some("4px"));
    }

    #[test]
    fn colors() {
        let context = ParserContext::new();
        assert_eq!(fast(PropertyId::Color, "#f00", &context).as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(fast(PropertyId::Color, "Red", &context).as_deref(), Some("red"));
        assert_eq!(
            fast(PropertyId::Color, "rgba(0, 0, 255, 0.5)", &context).as_deref(),
            Some("rgba(0, 0, 255, 0.5)")
        );
        assert!(fast(PropertyId::Color, "rgb(10%, 0, 0)", &context).is_none());
        assert!(fast(PropertyId::Color, "abc", &context).is_none());
        let quirks = ParserContext::new().with_mode(ParserMode::Quirks);
        assert_eq!(fast(PropertyId::Color, "abc", &quirks).as_deref(), Some("rgb(170, 187, 204)"));
        assert!(fast(PropertyId::Fill, "abc", &quirks).is_none());
    }

    #[test]
    fn keywords_must_belong_to_the_property() {
        let context = ParserContext::new();
        assert_eq!(fast(PropertyId::Display, "FLEX", &context).as_deref(), Some("flex"));
        assert!(fast(PropertyId::Display, "solid", &context).is_none());
    }

    #[test]
    fn transforms() {
        let context = ParserContext::new();
        assert_eq!(
            fast(PropertyId::Transform, "translateX(10px) scale(2, 3)", &context).as_deref(),
            Some("translatex(10px) scale(2, 3)")
        );
        assert_eq!(
            fast(PropertyId::Transform, "skew(10deg) rotate(0)", &context).as_deref(),
            Some("skew(10deg) rotate(0deg)")
        );
        assert!(fast(PropertyId::Transform, "rotate(10px)", &context).is_none());
        assert!(fast(PropertyId::Transform, "translate(10deg)", &context).is_none());
        assert!(fast(PropertyId::Transform, "translate(1px, 2px, 3px, 4px, 5px)", &context).is_none());
        assert!(fast(PropertyId::Transform, "scale()", &context).is_none());
    }

    #[test]
    fn matches_the_full_grammar() {
        let context = ParserContext::new();
        agrees_with_full_parser(PropertyId::Width, "12.5px", &context);
        agrees_with_full_parser(PropertyId::PaddingLeft, "0", &context);
        agrees_with_full_parser(PropertyId::Color, "#00ff0080", &context);
        agrees_with_full_parser(PropertyId::Color, "rgb(1, 2, 3)", &context);
        agrees_with_full_parser(PropertyId::Display, "inline-block", &context);
        agrees_with_full_parser(PropertyId::Transform, "translate3d(1px, 2px, 0)", &context);
    }
}
