//! Integration tests for the value tree and the declaration-value entry
//! points.

use std::rc::Rc;

use wattle_css::values::{CSSValue, CssWideKeyword};
use wattle_css::{CssError, ParserContext, PropertyId, PropertyName, parse_declaration_value};

fn text(property: &str, value: &str) -> String {
    parse_declaration_value(property, value)
        .map(|value| value.css_text())
        .unwrap_or_else(|error| panic!("{property}: {value}: {error}"))
}

#[test]
fn test_property_names() {
    assert_eq!(
        wattle_css::parse_property_name("Width"),
        Ok(PropertyName::Known(PropertyId::Width))
    );
    assert_eq!(
        wattle_css::parse_property_name("--Accent"),
        Ok(PropertyName::Custom("--Accent".to_owned()))
    );
    assert_eq!(
        wattle_css::parse_property_name("colour"),
        Err(CssError::UnknownProperty("colour".to_owned()))
    );
}

#[test]
fn test_errors() {
    assert_eq!(
        parse_declaration_value("margin", "1px"),
        Err(CssError::Shorthand("margin".to_owned()))
    );
    assert_eq!(
        parse_declaration_value("width", "  "),
        Err(CssError::UnexpectedEof("width".to_owned()))
    );
    assert_eq!(
        parse_declaration_value("width", "!important"),
        Err(CssError::UnexpectedEof("width".to_owned()))
    );
    assert_eq!(
        parse_declaration_value("width", " red "),
        Err(CssError::InvalidValue {
            property: "width".to_owned(),
            value: "red".to_owned(),
        })
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        CssError::UnknownProperty("colour".to_owned()).to_string(),
        "unknown property 'colour'"
    );
    assert_eq!(CssError::Shorthand("flex".to_owned()).to_string(), "'flex' is a shorthand");
}

#[test]
fn test_numeric_serialization() {
    assert_eq!(text("width", "10PX"), "10px");
    assert_eq!(text("width", "+.5em"), "0.5em");
    assert_eq!(text("width", "0"), "0px");
    assert_eq!(text("z-index", "7"), "7");
    assert_eq!(text("opacity", "0.25"), "0.25");
    assert_eq!(text("transition-duration", "250ms"), "250ms");
}

#[test]
fn test_important_is_accepted_and_ignored() {
    assert_eq!(text("width", "10px !important"), "10px");
}

#[test]
fn test_css_wide_keywords() {
    for (input, keyword) in [
        ("initial", CssWideKeyword::Initial),
        ("INHERIT", CssWideKeyword::Inherit),
        ("unset", CssWideKeyword::Unset),
        ("revert", CssWideKeyword::Revert),
        ("revert-layer", CssWideKeyword::RevertLayer),
    ] {
        let value = parse_declaration_value("color", input)
            .unwrap_or_else(|error| panic!("{input}: {error}"));
        assert_eq!(value.as_css_wide_keyword(), Some(keyword));
    }
    assert_eq!(text("all", "revert-layer"), "revert-layer");
    assert!(parse_declaration_value("all", "red").is_err());
    assert!(parse_declaration_value("width", "inherit 1px").is_err());
}

#[test]
fn test_var_is_kept_until_substitution() {
    let value = parse_declaration_value("width", "calc( var(--w) * 2 )")
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(value.is_pending_substitution());
    assert_eq!(value.css_text(), "calc( var(--w) * 2 )");
}

#[test]
fn test_custom_properties_keep_their_text() {
    let value = parse_declaration_value("--gap", "  1px   solid  ")
        .unwrap_or_else(|error| panic!("{error}"));
    let CSSValue::CustomProperty { name, value } = value.as_ref() else {
        panic!("expected a custom property, got {value:?}");
    };
    assert_eq!(name, "--gap");
    assert_eq!(value, "1px solid");
}

#[test]
fn test_lists() {
    assert_eq!(text("background-image", "none, url(a.png)"), "none, url(\"a.png\")");
    assert_eq!(text("transition-property", "opacity,transform"), "opacity, transform");
}

#[test]
fn test_items_of_a_single_value() {
    let value = CSSValue::ident("auto");
    let items = value.items();
    assert_eq!(items.len(), 1);
    assert!(Rc::ptr_eq(&items[0], &value));
}

#[test]
fn test_keywords_are_lowercased() {
    assert_eq!(text("display", "Inline-Block"), "inline-block");
    assert!(CSSValue::ident("AUTO").is_identifier("auto"));
}

#[test]
fn test_context_pool_shares_literals() {
    let context = ParserContext::new();
    let pool = context.pool();
    assert!(Rc::ptr_eq(&pool.identifier("none"), &pool.identifier("NONE")));
    assert!(Rc::ptr_eq(
        &pool.css_wide(CssWideKeyword::Unset),
        &pool.css_wide(CssWideKeyword::Unset)
    ));
}

#[test]
fn test_transform_arguments_are_checked() {
    for value in [
        "rotate(red)",
        "scale()",
        "translate(1px, 2px, 3px, 4px)",
        "rotate(45deg) skew(1px)",
        "rotate3d(1, 0, 0)",
    ] {
        assert!(parse_declaration_value("transform", value).is_err(), "{value}");
    }
    assert_eq!(text("transform", "rotate3d(1, 0, 0, 0)"), "rotate3d(1, 0, 0, 0deg)");
    assert_eq!(text("transform", "scale(2) translatex(-50%)"), "scale(2) translatex(-50%)");
}

#[test]
fn test_reparsing_serialized_values_is_stable() {
    let cases = [
        ("width", "calc(1px / 3)"),
        ("width", "0.1234567px"),
        ("width", "calc(2px * pi)"),
        ("width", "calc(1e30px * 1e30)"),
        ("width", "calc(1px / 7 + 1em)"),
        ("opacity", "calc(nan)"),
        ("opacity", "1e-7"),
        ("z-index", "calc(1 / 3)"),
    ];
    for (property, value) in cases {
        let first = parse_declaration_value(property, value)
            .unwrap_or_else(|error| panic!("{property}: {value}: {error}"));
        let serialized = first.css_text();
        let second = parse_declaration_value(property, &serialized)
            .unwrap_or_else(|error| panic!("{property}: {serialized}: {error}"));
        assert_eq!(first, second, "{property}: {value} -> {serialized}");
        assert_eq!(second.css_text(), serialized, "{property}: {value}");
    }
    assert_eq!(text("width", "calc(1px / 3)"), "calc(0.3333333333333333px)");
    assert_eq!(text("width", "calc(1e30px * 1e30)"), "calc(3.4028234663852886e38px)");
}
