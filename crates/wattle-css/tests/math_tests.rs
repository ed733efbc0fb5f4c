//! Integration tests for math functions: category checks, simplification,
//! clamping and conversion to used lengths.

use std::rc::Rc;

use wattle_css::consume::{
    UnitlessQuirk, consume_angle, consume_integer, consume_length, consume_length_or_percent,
    consume_number,
};
use wattle_css::math::CalculationResultCategory;
use wattle_css::parser::{ParserContext, TokenStream};
use wattle_css::tokenizer::tokenize;
use wattle_css::values::{CSSValue, Length, LengthResolver, ValueRange};

fn length(text: &str) -> Option<Rc<CSSValue>> {
    let context = ParserContext::new();
    let tokens = tokenize(text);
    let mut stream = TokenStream::new(&tokens);
    consume_length(&mut stream, &context, ValueRange::All, UnitlessQuirk::Forbid)
        .filter(|_| stream.at_end())
}

fn length_percentage(text: &str) -> Option<Rc<CSSValue>> {
    let context = ParserContext::new();
    let tokens = tokenize(text);
    let mut stream = TokenStream::new(&tokens);
    consume_length_or_percent(&mut stream, &context, ValueRange::All, UnitlessQuirk::Forbid)
        .filter(|_| stream.at_end())
}

fn number(text: &str) -> Option<Rc<CSSValue>> {
    let context = ParserContext::new();
    let tokens = tokenize(text);
    let mut stream = TokenStream::new(&tokens);
    consume_number(&mut stream, &context, ValueRange::All).filter(|_| stream.at_end())
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_mixed_categories_are_rejected() {
    assert!(length("calc(1deg + 1px)").is_none());
    assert!(length("calc(1px * 1px)").is_none());
    assert!(length("calc(1px / 1px)").is_none());
    assert!(length("calc(10% + 1px)").is_none());
}

#[test]
fn test_same_unit_sums_resolve() {
    let value = length("calc(1px + 1px)").unwrap_or_else(|| panic!("calc(1px + 1px) must parse"));
    assert!(value.is_length());
    assert_eq!(value.compute_length_px(&LengthResolver::default()), 2.0);
}

#[test]
fn test_infinity_clamps_to_the_largest_double() {
    let resolver = LengthResolver::default();
    let positive = length("calc(infinity * 1px)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(positive.compute_length_px(&resolver), f64::MAX);
    let negative = length("calc(-infinity * 1px)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(negative.compute_length_px(&resolver), f64::MIN);
}

#[test]
fn test_nan_resolves_to_zero() {
    let resolver = LengthResolver::default();
    let value = length("calc(NaN * 1px)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(value.compute_length_px(&resolver), 0.0);
    let value = number("calc(nan)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(value.compute_number(&resolver), 0.0);
    assert!(value.get_double_value_without_clamping().is_nan());
}

#[test]
fn test_zoom_scales_pixels_but_not_percentages() {
    let value = length_percentage("calc(10% + 100px)").unwrap_or_else(|| panic!("must parse"));
    assert!(value.is_calculated_percentage_with_length());

    let resolver = LengthResolver::default().with_zoom(0.5);
    let used = value
        .convert_to_length(&resolver)
        .unwrap_or_else(|| panic!("a length-percentage converts to a length"));
    assert!(used.is_calculated());
    let parts = used.pixels_and_percent();
    assert_eq!(parts.pixels, 50.0);
    assert_eq!(parts.percent, 10.0);

    let back = CSSValue::create_from_length(&used, 0.5);
    assert_eq!(back.css_text(), "calc(10% + 100px)");
}

#[test]
fn test_fixed_and_percent_lengths() {
    let resolver = LengthResolver::default().with_zoom(2.0);
    let fixed = length("calc(2in)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(fixed.convert_to_length(&resolver), Some(Length::Fixed(384.0)));
    let percent = length_percentage("calc(50% * 2)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(percent.convert_to_length(&resolver), Some(Length::Percent(100.0)));
}

#[test]
fn test_relative_units_need_the_resolver() {
    let value = length("calc(2em + 10px)").unwrap_or_else(|| panic!("must parse"));
    assert!(!value.is_computationally_independent());
    let resolver = LengthResolver::default().with_font_size(20.0);
    assert!(close(value.compute_length_px(&resolver), 50.0));
}

#[test]
fn test_comparison_functions() {
    let resolver = LengthResolver::default();
    let min = length("min(10px, 2em)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(min.compute_length_px(&resolver), 10.0));
    let max = length("max(10px, 2em)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(max.compute_length_px(&resolver), 32.0));
    let clamp = length("clamp(10px, 1px, 20px)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(clamp.compute_length_px(&resolver), 10.0));
}

#[test]
fn test_stepped_functions() {
    let resolver = LengthResolver::default();
    let round = length("round(up, 7px, 5px)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(round.compute_length_px(&resolver), 10.0));
    let modulo = number("mod(-7, 3)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(modulo.compute_number(&resolver), 2.0));
    let rem = number("rem(-7, 3)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(rem.compute_number(&resolver), -1.0));
}

#[test]
fn test_trigonometry_and_exponentials() {
    let resolver = LengthResolver::default();
    let sin = number("sin(90deg)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(sin.compute_number(&resolver), 1.0));
    let pow = number("pow(2, 10)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(pow.compute_number(&resolver), 1024.0));
    let hypot = length("hypot(3px, 4px)").unwrap_or_else(|| panic!("must parse"));
    assert!(close(hypot.compute_length_px(&resolver), 5.0));
    let context = ParserContext::new();
    let tokens = tokenize("atan2(1, 1)");
    let mut stream = TokenStream::new(&tokens);
    let angle = consume_angle(&mut stream, &context).unwrap_or_else(|| panic!("must parse"));
    assert!(close(angle.compute_degrees(&resolver), 45.0));
}

#[test]
fn test_integer_contexts_round_half_up() {
    let context = ParserContext::new();
    let tokens = tokenize("calc(2.5)");
    let mut stream = TokenStream::new(&tokens);
    let value = consume_integer(&mut stream, &context, f64::from(i32::MIN))
        .unwrap_or_else(|| panic!("must parse"));
    assert_eq!(value.compute_integer(&LengthResolver::default()), 3);
}

#[test]
fn test_categories_of_mixed_sums() {
    let value = length_percentage("calc(1px + 10%)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(value.numeric_category(), Some(CalculationResultCategory::LengthFunction));
    let value = length("calc(1in + 4px)").unwrap_or_else(|| panic!("must parse"));
    assert_eq!(value.numeric_category(), Some(CalculationResultCategory::Length));
}

#[test]
fn test_reparsing_serialized_text_is_stable() {
    for text in ["calc(10% + 100px)", "calc(1px + 2em - 3vw)", "min(10px, 5%)"] {
        let first = length_percentage(text).unwrap_or_else(|| panic!("{text} must parse"));
        let serialized = first.css_text();
        let second =
            length_percentage(&serialized).unwrap_or_else(|| panic!("{serialized} must parse"));
        assert_eq!(second.css_text(), serialized, "{text}");
        assert_eq!(first, second, "{text}");
    }
}

#[test]
fn test_nesting_depth_is_bounded() {
    let nested = |levels: usize| {
        format!("{}1px{}", "calc(".repeat(levels), ")".repeat(levels))
    };
    assert!(length(&nested(50)).is_some());
    assert!(length(&nested(150)).is_none());
    let arguments = vec!["1px"; 101].join(", ");
    assert!(length(&format!("hypot({arguments})")).is_none());
}
