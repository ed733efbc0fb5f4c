//! The fast path must never change what a declaration parses to.

use wattle_css::fast_path::maybe_parse_value;
use wattle_css::property_parser::parse_longhand_text;
use wattle_css::{ParserContext, ParserMode, PropertyId};

/// Parse with and without the fast path and require the same result.
fn assert_same(id: PropertyId, text: &str, mode: ParserMode) {
    let fast = ParserContext::new().with_mode(mode);
    let full = ParserContext::new().with_mode(mode).with_fast_path(false);
    assert_eq!(
        parse_longhand_text(id, text, &fast),
        parse_longhand_text(id, text, &full),
        "{id}: {text} ({mode})"
    );
}

#[test]
fn test_lengths() {
    for text in ["10px", "0", "50%", "12.5px", " 3px ", "-1px", "10", "1e3px", "4em", "auto", "calc(1px)"] {
        assert_same(PropertyId::Width, text, ParserMode::Standard);
        assert_same(PropertyId::MarginLeft, text, ParserMode::Standard);
    }
}

#[test]
fn test_unitless_lengths_in_quirks_mode() {
    for text in ["10", "0", "7.5"] {
        assert_same(PropertyId::Height, text, ParserMode::Quirks);
    }
    assert!(parse_longhand_text(
        PropertyId::Height,
        "10",
        &ParserContext::new().with_mode(ParserMode::Quirks)
    )
    .is_some());
}

#[test]
fn test_unitless_lengths_in_svg_attributes() {
    for text in ["4", "0.5", "4px"] {
        assert_same(PropertyId::R, text, ParserMode::SVGAttribute);
    }
}

#[test]
fn test_colors() {
    for text in ["#f00", "#00ff0080", "red", "Transparent", "rgb(1, 2, 3)", "rgba(0, 0, 255, 0.5)", "rgb(10%, 0%, 0%)", "hsl(0 100% 50%)"] {
        assert_same(PropertyId::Color, text, ParserMode::Standard);
        assert_same(PropertyId::BackgroundColor, text, ParserMode::Standard);
    }
    for text in ["abc", "ff0000", "123456"] {
        assert_same(PropertyId::Color, text, ParserMode::Quirks);
    }
}

#[test]
fn test_keywords() {
    for text in ["block", "INLINE-BLOCK", "none", "flex", "solid"] {
        assert_same(PropertyId::Display, text, ParserMode::Standard);
    }
    for text in ["hidden", "visible", "clip"] {
        assert_same(PropertyId::OverflowX, text, ParserMode::Standard);
    }
}

#[test]
fn test_transforms() {
    for text in [
        "none",
        "translate3d(1px, 2px, 0)",
        "rotate(45deg)",
        "skew(10deg)",
        "rotate(0)",
        "scale(1.5, 50%)",
        "perspective(none)",
        "rotate(10px)",
        "translate(10deg)",
        "translate(1px, 2px, 3px, 4px, 5px)",
    ] {
        assert_same(PropertyId::Transform, text, ParserMode::Standard);
    }
}

#[test]
fn test_fast_path_rejects_mistyped_transforms() {
    let context = ParserContext::new();
    for text in [
        "rotate(10px)",
        "translate(10deg)",
        "translate(1px, 2px, 3px, 4px, 5px)",
        "scale()",
        "translatez(10%)",
        "matrix(1, 0, 0, 1)",
    ] {
        assert!(maybe_parse_value(PropertyId::Transform, text, &context).is_none(), "{text}");
    }
    assert!(maybe_parse_value(PropertyId::Transform, "rotate(0)", &context).is_some());
}

#[test]
fn test_fast_path_declines_what_it_does_not_know() {
    let context = ParserContext::new();
    assert!(maybe_parse_value(PropertyId::Width, "calc(1px + 2px)", &context).is_none());
    assert!(maybe_parse_value(PropertyId::Width, "inherit", &context).is_none());
    assert!(maybe_parse_value(PropertyId::Color, "color-mix(in srgb, red, blue)", &context).is_none());
    assert!(maybe_parse_value(PropertyId::Width, "10pximportant", &context).is_none());
    assert!(maybe_parse_value(PropertyId::Width, "", &context).is_none());
}
