//! `<color>`
//!
//! [CSS Color 4 § 4](https://www.w3.org/TR/css-color-4/#color-syntax)
//!
//! Hex colors and the functional notations resolve to a [`ColorValue`]
//! while parsing. Lab, LCH, OKLab, OKLCH and `color()` colors convert to
//! sRGB and clip to its gamut. Keywords (named colors, system colors,
//! `currentcolor`) stay identifiers so they serialize as written.
//! `light-dark()` and any `color-mix()` that cannot be computed up front are
//! kept as functions.

use std::rc::Rc;

use super::{consume_angle, consume_ident, consume_number, consume_percent};
use crate::parser::context::ParserContext;
use crate::parser::stream::TokenStream;
use crate::tokenizer::{CSSToken, NumericType};
use crate::values::color::{
    hsl_to_rgb, hwb_to_rgb, is_predefined_colorspace, lab_to_rgb, oklab_to_rgb, polar_to_ab,
    predefined_to_rgb, unit_to_u8,
};
use crate::values::{CSSValue, ColorValue, LengthResolver, ValueRange};

/// Keywords outside the named and system color tables that still parse as
/// colors.
const EXTRA_COLOR_KEYWORDS: &[&str] = &[
    "currentcolor",
    "-webkit-link",
    "-webkit-activelink",
    "-webkit-focus-ring-color",
    "-webkit-text",
];

/// True for every identifier [`consume_color`] accepts.
#[must_use]
pub fn is_color_keyword(name: &str) -> bool {
    if name.eq_ignore_ascii_case("accentcolor") || name.eq_ignore_ascii_case("accentcolortext") {
        return false;
    }
    ColorValue::from_named(name).is_some()
        || ColorValue::is_system_color(name)
        || EXTRA_COLOR_KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(name))
}

/// Parse a `<color>`.
pub fn consume_color(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    consume_color_with_quirks(stream, context, false)
}

/// Parse a `<color>`, also accepting hex digits without the `#` when
/// `accept_quirky` is set and the context is in quirks mode.
///
/// [Quirks § 3.8 The hashless hex color quirk](https://quirks.spec.whatwg.org/#the-hashless-hex-color-quirk)
pub fn consume_color_with_quirks(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    accept_quirky: bool,
) -> Option<Rc<CSSValue>> {
    let token = stream.peek();
    match token {
        CSSToken::Ident(name) if is_color_keyword(name) => consume_ident(stream, context),
        CSSToken::Hash { value, .. } => {
            let color = ColorValue::from_hex(value)?;
            let _ = stream.consume_including_whitespace();
            Some(context.pool().color(color))
        }
        CSSToken::Function(name) => {
            let name = name.to_ascii_lowercase();
            match name.as_str() {
                "rgb" | "rgba" | "hsl" | "hsla" | "hwb" => {
                    let mut guard = stream.save();
                    let mut arguments = guard.consume_block();
                    let color = consume_color_function(&name, &mut arguments, context)?;
                    guard.consume_whitespace();
                    guard.release();
                    Some(context.pool().color(color))
                }
                "lab" | "lch" | "oklab" | "oklch" | "color" => {
                    let mut guard = stream.save();
                    let mut arguments = guard.consume_block();
                    let color = if name == "color" {
                        consume_predefined_color(&mut arguments, context)?
                    } else {
                        consume_lab_function(&name, &mut arguments, context)?
                    };
                    guard.consume_whitespace();
                    guard.release();
                    Some(context.pool().color(color))
                }
                "color-mix" if context.color_mix_enabled => consume_color_mix(stream, context),
                "light-dark" if context.light_dark_enabled => consume_light_dark(stream, context),
                _ => None,
            }
        }
        _ if accept_quirky && context.is_quirks_mode() => consume_quirky_hex(stream, context),
        _ => None,
    }
}

/// Digits for the hashless hex quirk: an ident as written, or an integer
/// (with any unit letters) padded with zeros to six digits.
fn quirky_hex_digits(token: &CSSToken) -> Option<String> {
    let digits = match token {
        CSSToken::Ident(name) => name.clone(),
        CSSToken::Number {
            value,
            numeric_type: NumericType::Integer,
            int_value,
        }
        | CSSToken::Dimension {
            value,
            numeric_type: NumericType::Integer,
            int_value,
            ..
        } => {
            if *value < 0.0 || *value >= 1_000_000.0 {
                return None;
            }
            let unit = match token {
                CSSToken::Dimension { unit, .. } => unit.as_str(),
                _ => "",
            };
            let mut digits = format!("{}{unit}", int_value.unwrap_or_default());
            while digits.len() < 6 {
                digits.insert(0, '0');
            }
            digits
        }
        _ => return None,
    };
    matches!(digits.len(), 3 | 6).then_some(digits)
}

fn consume_quirky_hex(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let digits = quirky_hex_digits(stream.peek())?;
    let color = ColorValue::from_hex(&digits)?;
    let _ = stream.consume_including_whitespace();
    Some(context.pool().color(color))
}

/// One argument of a color function.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Channel {
    Number(f64),
    Percent(f64),
    /// `none`, which behaves as zero.
    Missing,
}

impl Channel {
    /// Map onto `0.0..=1.0`, with numbers out of `number_scale`.
    fn fraction(self, number_scale: f64) -> f64 {
        match self {
            Self::Number(value) => value / number_scale,
            Self::Percent(value) => value / 100.0,
            Self::Missing => 0.0,
        }
    }

    /// The channel value, with `100%` equal to `percent_reference`.
    fn resolve(self, percent_reference: f64) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Percent(value) => value / 100.0 * percent_reference,
            Self::Missing => 0.0,
        }
    }

    const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

fn consume_channel(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    allow_none: bool,
) -> Option<Channel> {
    let resolver = LengthResolver::default();
    if allow_none && stream.peek().is_ident("none") {
        let _ = stream.consume_including_whitespace();
        return Some(Channel::Missing);
    }
    if let Some(number) = consume_number(stream, context, ValueRange::All) {
        return Some(Channel::Number(number.compute_number(&resolver)));
    }
    let percent = consume_percent(stream, context, ValueRange::All)?;
    Some(Channel::Percent(percent.compute_percentage(&resolver)))
}

/// A hue in degrees: a number or an `<angle>`.
fn consume_hue(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    allow_none: bool,
) -> Option<f64> {
    let resolver = LengthResolver::default();
    if allow_none && stream.peek().is_ident("none") {
        let _ = stream.consume_including_whitespace();
        return Some(0.0);
    }
    if let Some(number) = consume_number(stream, context, ValueRange::All) {
        return Some(number.compute_number(&resolver));
    }
    consume_angle(stream, context).map(|angle| angle.compute_degrees(&resolver))
}

fn consume_comma(stream: &mut TokenStream<'_>) -> bool {
    if matches!(stream.peek(), CSSToken::Comma) {
        let _ = stream.consume_including_whitespace();
        return true;
    }
    false
}

/// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
/// and [§ 7](https://www.w3.org/TR/css-color-4/#the-hsl-notation),
/// [§ 8](https://www.w3.org/TR/css-color-4/#the-hwb-notation).
///
/// Accepts the legacy comma syntax (not for `hwb()`) and the modern space
/// syntax with an optional `/ alpha`.
fn consume_color_function(
    name: &str,
    arguments: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<ColorValue> {
    arguments.consume_whitespace();
    let is_rgb = name.starts_with("rgb");
    let is_hwb = name == "hwb";

    // The first channel decides between the legacy and modern syntaxes.
    let first = if is_rgb {
        consume_channel(arguments, context, true)?
    } else {
        Channel::Number(consume_hue(arguments, context, true)?)
    };
    let legacy = !is_hwb && consume_comma(arguments);
    if legacy && first == Channel::Missing {
        return None;
    }

    let mut rest = [Channel::Missing; 2];
    for (index, slot) in rest.iter_mut().enumerate() {
        if legacy && index > 0 && !consume_comma(arguments) {
            return None;
        }
        *slot = consume_channel(arguments, context, !legacy)?;
    }

    let alpha = if legacy {
        if consume_comma(arguments) {
            Some(consume_channel(arguments, context, false)?)
        } else {
            None
        }
    } else if matches!(arguments.peek(), CSSToken::Delim('/')) {
        let _ = arguments.consume_including_whitespace();
        Some(consume_channel(arguments, context, true)?)
    } else {
        None
    };
    if !arguments.at_end() {
        return None;
    }

    if legacy {
        // "The legacy syntax doesn't allow mixing numbers and percentages."
        if is_rgb && (first.is_percent() != rest[0].is_percent() || rest[0].is_percent() != rest[1].is_percent()) {
            return None;
        }
        if !is_rgb && !(rest[0].is_percent() && rest[1].is_percent()) {
            return None;
        }
    }

    let (r, g, b) = if is_rgb {
        (first.fraction(255.0), rest[0].fraction(255.0), rest[1].fraction(255.0))
    } else {
        let hue = first.fraction(1.0);
        if is_hwb {
            hwb_to_rgb(hue, rest[0].fraction(100.0), rest[1].fraction(100.0))
        } else {
            hsl_to_rgb(hue, rest[0].fraction(100.0), rest[1].fraction(100.0))
        }
    };
    let alpha = alpha.map_or(1.0, |alpha| alpha.fraction(1.0));
    Some(ColorValue::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(alpha),
    ))
}

/// The optional `/ <alpha-value>` closing a modern color function, as a
/// fraction.
fn consume_slash_alpha(arguments: &mut TokenStream<'_>, context: &ParserContext) -> Option<f64> {
    if !matches!(arguments.peek(), CSSToken::Delim('/')) {
        return Some(1.0);
    }
    let _ = arguments.consume_including_whitespace();
    Some(consume_channel(arguments, context, true)?.fraction(1.0))
}

/// [§ 9.2 `lab()`, `lch()`](https://www.w3.org/TR/css-color-4/#specifying-lab-lch)
/// and [§ 9.3 `oklab()`, `oklch()`](https://www.w3.org/TR/css-color-4/#specifying-oklab-oklch).
///
/// Space-separated syntax only. Percentages map lightness onto `100` (or `1`
/// for the OK spaces) and chroma or the a/b axes onto `125`, `150` or `0.4`.
#[allow(clippy::similar_names)]
fn consume_lab_function(
    name: &str,
    arguments: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<ColorValue> {
    arguments.consume_whitespace();
    let ok = name.starts_with("ok");
    let polar = name.ends_with("ch");
    let lightness_reference = if ok { 1.0 } else { 100.0 };
    let axis_reference = match (ok, polar) {
        (true, _) => 0.4,
        (false, true) => 150.0,
        (false, false) => 125.0,
    };

    let lightness = consume_channel(arguments, context, true)?
        .resolve(lightness_reference)
        .clamp(0.0, lightness_reference);
    let second = consume_channel(arguments, context, true)?.resolve(axis_reference);
    let (axis_a, axis_b) = if polar {
        let hue = consume_hue(arguments, context, true)?;
        polar_to_ab(second.max(0.0), hue)
    } else {
        (second, consume_channel(arguments, context, true)?.resolve(axis_reference))
    };
    let alpha = consume_slash_alpha(arguments, context)?;
    if !arguments.at_end() {
        return None;
    }

    let (r, g, b) = if ok {
        oklab_to_rgb(lightness, axis_a, axis_b)
    } else {
        lab_to_rgb(lightness, axis_a, axis_b)
    };
    Some(ColorValue::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(alpha),
    ))
}

/// [§ 10.1 `color()`](https://www.w3.org/TR/css-color-4/#color-function)
///
/// "`color() = color( <colorspace-params> [ / [ <alpha-value> | none ] ]? )`"
fn consume_predefined_color(
    arguments: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<ColorValue> {
    arguments.consume_whitespace();
    let CSSToken::Ident(space) = arguments.peek() else {
        return None;
    };
    let space = space.to_ascii_lowercase();
    if !is_predefined_colorspace(&space) {
        return None;
    }
    let _ = arguments.consume_including_whitespace();
    let mut channels = [0.0; 3];
    for channel in &mut channels {
        *channel = consume_channel(arguments, context, true)?.resolve(1.0);
    }
    let alpha = consume_slash_alpha(arguments, context)?;
    if !arguments.at_end() {
        return None;
    }
    let [c0, c1, c2] = channels;
    let (r, g, b) = predefined_to_rgb(&space, (c0, c1, c2))?;
    Some(ColorValue::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(alpha),
    ))
}

/// A color and its optional percentage inside `color-mix()`.
fn consume_mix_component(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<(Rc<CSSValue>, Option<Rc<CSSValue>>)> {
    let leading = consume_percent(stream, context, ValueRange::NonNegative);
    let color = consume_color(stream, context)?;
    let percentage = match leading {
        Some(percentage) => Some(percentage),
        None => consume_percent(stream, context, ValueRange::NonNegative),
    };
    Some((color, percentage))
}

/// [CSS Color 5 § 2](https://www.w3.org/TR/css-color-5/#color-mix)
///
/// "`color-mix() = color-mix( <color-interpolation-method> , [ <color> &&
/// <percentage [0,100]>? ]#{2})`"
///
/// Mixing in `srgb` with two known colors computes the result; anything
/// else is kept as the function.
fn consume_color_mix(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let mut arguments = guard.consume_block();
    arguments.consume_whitespace();

    if !arguments.peek().is_ident("in") {
        return None;
    }
    let _ = arguments.consume_including_whitespace();
    let mut method = vec![CSSValue::ident("in")];
    let CSSToken::Ident(space) = arguments.peek() else {
        return None;
    };
    let space = space.to_ascii_lowercase();
    let _ = arguments.consume_including_whitespace();
    method.push(CSSValue::ident(&space));
    while let CSSToken::Ident(keyword) = arguments.peek() {
        if !matches!(
            keyword.to_ascii_lowercase().as_str(),
            "shorter" | "longer" | "increasing" | "decreasing" | "hue"
        ) {
            return None;
        }
        method.push(CSSValue::ident(keyword));
        let _ = arguments.consume_including_whitespace();
    }
    if !consume_comma(&mut arguments) {
        return None;
    }
    let (first, first_percent) = consume_mix_component(&mut arguments, context)?;
    if !consume_comma(&mut arguments) {
        return None;
    }
    let (second, second_percent) = consume_mix_component(&mut arguments, context)?;
    if !arguments.at_end() {
        return None;
    }
    guard.consume_whitespace();
    guard.release();

    let resolver = LengthResolver::default();
    let p1 = first_percent.as_ref().map(|p| p.compute_percentage(&resolver));
    let p2 = second_percent.as_ref().map(|p| p.compute_percentage(&resolver));
    // "If the percentages sum to zero, the function is invalid."
    if let (Some(a), Some(b)) = (p1, p2) {
        if a + b == 0.0 {
            return None;
        }
    }

    if space == "srgb" {
        if let (Some(a), Some(b)) = (first.to_color(), second.to_color()) {
            if let Some(color) = mix_colors(a, b, p1, p2) {
                return Some(context.pool().color(color));
            }
        }
    }

    let component = |color: Rc<CSSValue>, percent: Option<Rc<CSSValue>>| match percent {
        Some(percent) => CSSValue::space_list(vec![color, percent]),
        None => color,
    };
    Some(Rc::new(CSSValue::Function {
        name: "color-mix".to_owned(),
        arguments: vec![
            CSSValue::space_list(method),
            component(first, first_percent),
            component(second, second_percent),
        ],
    }))
}

/// [CSS Color 5 § 2.1 Percentage normalization](https://www.w3.org/TR/css-color-5/#color-mix-percent-norm)
fn mix_colors(
    first: ColorValue,
    second: ColorValue,
    p1: Option<f64>,
    p2: Option<f64>,
) -> Option<ColorValue> {
    let (p1, p2) = match (p1, p2) {
        (None, None) => (50.0, 50.0),
        (Some(a), None) => (a, 100.0 - a),
        (None, Some(b)) => (100.0 - b, b),
        (Some(a), Some(b)) => (a, b),
    };
    if !(0.0..=100.0).contains(&p1) || !(0.0..=100.0).contains(&p2) {
        return None;
    }
    let sum = p1 + p2;
    let mut mixed = first.mix_srgb(&second, p1 / sum);
    // "If the percentages sum to less than 100%, the result is made more
    // transparent."
    if sum < 100.0 {
        mixed.a = unit_to_u8(f64::from(mixed.a) / 255.0 * sum / 100.0);
    }
    Some(mixed)
}

/// [CSS Color 5 § 5](https://www.w3.org/TR/css-color-5/#light-dark)
///
/// "`light-dark( <color>, <color> )`"
fn consume_light_dark(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let mut arguments = guard.consume_block();
    arguments.consume_whitespace();
    let light = consume_color(&mut arguments, context)?;
    if !consume_comma(&mut arguments) {
        return None;
    }
    let dark = consume_color(&mut arguments, context)?;
    if !arguments.at_end() {
        return None;
    }
    guard.consume_whitespace();
    guard.release();
    Some(Rc::new(CSSValue::Function {
        name: "light-dark".to_owned(),
        arguments: vec![light, dark],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserMode;
    use crate::tokenizer::tokenize;

    fn parse(text: &str, context: &ParserContext, quirky: bool) -> Option<Rc<CSSValue>> {
        let tokens = tokenize(text);
        let mut stream = TokenStream::new(&tokens);
        let value = consume_color_with_quirks(&mut stream, context, quirky)?;
        stream.at_end().then_some(value)
    }

    fn color(text: &str) -> Option<ColorValue> {
        parse(text, &ParserContext::new(), false).and_then(|value| value.to_color())
    }

    #[test]
    fn functional_notations() {
        let red = Some(ColorValue::rgb(255, 0, 0));
        assert_eq!(color("rgb(255, 0, 0)"), red);
        assert_eq!(color("rgb(255 0 0)"), red);
        assert_eq!(color("rgba(100%, 0%, 0%, 1)"), red);
        assert_eq!(color("hsl(0 100% 50%)"), red);
        assert_eq!(color("hsl(0deg, 100%, 50%)"), red);
        assert_eq!(color("hwb(0 0% 0%)"), red);
        assert_eq!(color("rgb(255 0 0 / 50%)"), Some(ColorValue::rgba(255, 0, 0, 128)));
        assert_eq!(color("rgb(calc(200 + 55) none 0)"), red);
    }

    #[test]
    fn legacy_syntax_is_strict() {
        assert!(color("rgb(255, 0%, 0)").is_none());
        assert!(color("rgb(255, 0 0)").is_none());
        assert!(color("hwb(0, 0%, 0%)").is_none());
        assert!(color("rgb(none, 0, 0)").is_none());
        assert!(color("rgb(255, 0, 0,)").is_none());
    }

    #[test]
    fn keywords_stay_identifiers() {
        let context = ParserContext::new();
        for keyword in ["red", "currentColor", "transparent", "Canvas"] {
            let value = parse(keyword, &context, false);
            assert!(matches!(value.as_deref(), Some(CSSValue::Identifier(_))), "{keyword}");
        }
        assert!(parse("accentcolor", &context, false).is_none());
        assert!(parse("bogus", &context, false).is_none());
    }

    #[test]
    fn hashless_hex_in_quirks_mode() {
        let quirks = ParserContext::new().with_mode(ParserMode::Quirks);
        let value = |text: &str| parse(text, &quirks, true).and_then(|v| v.to_color());
        assert_eq!(value("ff0000"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(value("123456"), Some(ColorValue::rgb(0x12, 0x34, 0x56)));
        assert_eq!(value("abc"), Some(ColorValue::rgb(0xaa, 0xbb, 0xcc)));
        // A dimension token: the integer and its unit letters are padded.
        assert_eq!(value("1ff"), Some(ColorValue::rgb(0, 0x01, 0xff)));
        assert!(value("1234567").is_none());
        assert!(parse("ff0000", &ParserContext::new(), true).is_none());
        assert!(parse("ff0000", &quirks, false).is_none());
    }

    #[test]
    fn color_mix_in_srgb() {
        assert_eq!(
            color("color-mix(in srgb, red, blue)"),
            Some(ColorValue::rgb(128, 0, 128))
        );
        assert_eq!(
            color("color-mix(in srgb, red 25%, blue 25%)"),
            Some(ColorValue::rgba(128, 0, 128, 128))
        );
        let kept = parse("color-mix(in oklab, red, currentcolor)", &ParserContext::new(), false);
        assert_eq!(
            kept.map(|v| v.css_text()).as_deref(),
            Some("color-mix(in oklab, red, currentcolor)")
        );
        assert!(color("color-mix(in srgb, red 0%, blue 0%)").is_none());
        let disabled = ParserContext::new().with_color_mix(false);
        assert!(parse("color-mix(in srgb, red, blue)", &disabled, false).is_none());
    }

    #[test]
    fn light_dark_is_kept() {
        let value = parse("light-dark(white, #000)", &ParserContext::new(), false);
        assert_eq!(
            value.map(|v| v.css_text()).as_deref(),
            Some("light-dark(white, rgb(0, 0, 0))")
        );
    }

    #[test]
    fn lab_family_converts_to_srgb() {
        let gray = Some(ColorValue::rgb(119, 119, 119));
        assert_eq!(color("lab(50 0 0)"), gray);
        assert_eq!(color("lab(50% 0 0)"), gray);
        assert_eq!(color("lch(50 0 120deg)"), gray);
        assert_eq!(color("oklab(1 0 0)"), Some(ColorValue::rgb(255, 255, 255)));
        assert_eq!(color("oklch(0% 0 0 / 50%)"), Some(ColorValue::rgba(0, 0, 0, 128)));
        assert!(color("lab(50, 0, 0)").is_none());
        assert!(color("oklch(0.5 0.1)").is_none());
    }

    #[test]
    fn predefined_colorspaces() {
        let red = Some(ColorValue::rgb(255, 0, 0));
        assert_eq!(color("color(srgb 1 0 0)"), red);
        assert_eq!(color("color(srgb 100% 0% none)"), red);
        assert_eq!(color("color(display-p3 1 0 0)"), red);
        assert_eq!(color("color(srgb 1 0.5 0 / 0.5)"), Some(ColorValue::rgba(255, 128, 0, 128)));
        assert!(color("color(unknown 1 0 0)").is_none());
        assert!(color("color(srgb 1 0)").is_none());
    }
}
