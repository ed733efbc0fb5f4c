//! Integration tests for `<color>` values as property values.

use wattle_css::values::{CSSValue, ColorValue};
use wattle_css::{ParserContext, ParserMode, parse_declaration_value, parse_declaration_value_in};

fn color_in(property: &str, text: &str, context: &ParserContext) -> Option<ColorValue> {
    parse_declaration_value_in(property, text, context)
        .ok()
        .and_then(|value| value.to_color())
}

fn color(text: &str) -> Option<ColorValue> {
    color_in("color", text, &ParserContext::new())
}

#[test]
fn test_notations_of_red_agree() {
    let red = Some(ColorValue::rgba(255, 0, 0, 255));
    for text in ["#ff0000", "#F00", "rgb(255,0,0)", "rgb(255 0 0)", "red", "RED", "rgba(255, 0, 0, 1)"] {
        assert_eq!(color(text), red, "{text}");
    }
}

#[test]
fn test_both_parsers_agree_on_colors() {
    let slow = ParserContext::new().with_fast_path(false);
    for text in ["#ff0000", "rgb(255,0,0)", "rgba(0, 0, 255, 0.5)", "red", "#0f08"] {
        assert_eq!(color(text), color_in("color", text, &slow), "{text}");
    }
}

#[test]
fn test_named_colors_serialize_as_written() {
    let value = parse_declaration_value("color", "CornflowerBlue")
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(matches!(value.as_ref(), CSSValue::Identifier(_)));
    assert_eq!(value.css_text(), "cornflowerblue");
    assert_eq!(value.to_color(), Some(ColorValue::rgb(100, 149, 237)));
}

#[test]
fn test_resolved_colors_serialize_as_rgb() {
    let value = parse_declaration_value("background-color", "#336699cc")
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(value.css_text(), "rgba(51, 102, 153, 0.8)");
    let value = parse_declaration_value("color", "hsl(240 100% 50%)")
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(value.css_text(), "rgb(0, 0, 255)");
}

#[test]
fn test_hsl_and_hwb() {
    assert_eq!(color("hsl(120, 100%, 50%)"), Some(ColorValue::rgb(0, 255, 0)));
    assert_eq!(color("hsla(120deg 100% 50% / 0)"), Some(ColorValue::rgba(0, 255, 0, 0)));
    assert_eq!(color("hwb(240 0% 0%)"), Some(ColorValue::rgb(0, 0, 255)));
    assert_eq!(color("hwb(0 100% 100%)"), Some(ColorValue::rgb(128, 128, 128)));
    assert!(color("hwb(0, 0%, 0%)").is_none());
    assert!(color("hsl(0, 100, 50)").is_none());
}

#[test]
fn test_channels_clamp() {
    assert_eq!(color("rgb(300 -20 0)"), Some(ColorValue::rgb(255, 0, 0)));
    assert_eq!(color("rgb(0 0 0 / 150%)"), Some(ColorValue::rgb(0, 0, 0)));
}

#[test]
fn test_color_mix() {
    assert_eq!(color("color-mix(in srgb, white, black)"), Some(ColorValue::rgb(128, 128, 128)));
    assert_eq!(
        color("color-mix(in srgb, red 75%, blue)"),
        Some(ColorValue::rgb(191, 0, 64))
    );
    let kept = parse_declaration_value("color", "color-mix(in srgb, currentcolor, red)")
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(kept.css_text(), "color-mix(in srgb, currentcolor, red)");
    assert!(kept.to_color().is_none());
}

#[test]
fn test_light_dark_can_be_disabled() {
    let context = ParserContext::new().with_light_dark(false);
    assert!(parse_declaration_value_in("color", "light-dark(white, black)", &context).is_err());
    assert!(parse_declaration_value("color", "light-dark(white, black)").is_ok());
}

#[test]
fn test_system_colors_and_currentcolor() {
    assert_eq!(
        parse_declaration_value("color", "CanvasText").map(|value| value.css_text()),
        Ok("canvastext".to_owned())
    );
    assert!(parse_declaration_value("color", "currentColor").is_ok());
    assert!(parse_declaration_value("color", "AccentColor").is_err());
}

#[test]
fn test_hashless_hex_only_in_quirks_mode() {
    let quirks = ParserContext::new().with_mode(ParserMode::Quirks);
    assert_eq!(color_in("color", "ff0000", &quirks), Some(ColorValue::rgb(255, 0, 0)));
    assert_eq!(color_in("color", "123456", &quirks), Some(ColorValue::rgb(0x12, 0x34, 0x56)));
    assert_eq!(
        color_in("background-color", "abc", &quirks),
        Some(ColorValue::rgb(0xaa, 0xbb, 0xcc))
    );
    assert!(color("ff0000").is_none());
    assert!(parse_declaration_value_in("fill", "ff0000", &quirks).is_err());
    assert!(parse_declaration_value_in("color", "ff00000", &quirks).is_err());
}

#[test]
fn test_lab_oklch_and_color_function_parse() {
    assert_eq!(color("lab(50 0 0)"), Some(ColorValue::rgb(119, 119, 119)));
    assert_eq!(color("color(srgb 1 0 0)"), Some(ColorValue::rgb(255, 0, 0)));
    assert_eq!(color("color(xyz 0.9505 1 1.089)"), Some(ColorValue::rgb(255, 255, 255)));

    let warm = color("oklch(0.5 0.1 30)").unwrap_or_else(|| panic!("oklch did not parse"));
    assert!(warm.r > warm.g && warm.g > warm.b, "{warm:?}");
    assert_eq!(warm.a, 255);

    let value = parse_declaration_value("background-color", "lch(50% 0 0 / 0.5)")
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(value.css_text(), "rgba(119, 119, 119, 0.5)");
}

#[test]
fn test_wide_gamut_syntax_errors_are_rejected() {
    for text in ["lab(50, 0, 0)", "oklab(1 0)", "color(1 0 0)", "color(rec2020 1 0 0 0)"] {
        assert!(parse_declaration_value("color", text).is_err(), "{text}");
    }
}
