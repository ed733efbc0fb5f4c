//! Integration tests for shorthand serialization and declaration-block text.

use wattle_css::parser::parse_declaration_list;
use wattle_css::serializer::{get_2_values, get_4_values};
use wattle_css::values::CSSValue;
use wattle_css::{MutablePropertyValueSet, ParserContext, PropertyName, PropertyValueSet};

fn set(text: &str) -> MutablePropertyValueSet {
    parse_declaration_list(text, &ParserContext::new())
}

fn shorthand(declarations: &str, property: &str) -> String {
    let name = PropertyName::parse(property).unwrap_or_else(|| panic!("unknown property {property}"));
    set(declarations).get_property_value(&name)
}

#[test]
fn test_four_sides() {
    assert_eq!(shorthand("margin: 1px", "margin"), "1px");
    assert_eq!(shorthand("margin: 1px 2px", "margin"), "1px 2px");
    assert_eq!(shorthand("margin: 1px 2px 3px", "margin"), "1px 2px 3px");
    assert_eq!(shorthand("margin: 1px 2px 3px 4px", "margin"), "1px 2px 3px 4px");
    assert_eq!(shorthand("padding: 1px 1px 1px 1px", "padding"), "1px");
    assert_eq!(
        shorthand("margin-top: 1px; margin-right: auto; margin-bottom: 1px; margin-left: auto", "margin"),
        "1px auto"
    );
}

#[test]
fn test_value_helpers() {
    let one = CSSValue::ident("a");
    let two = CSSValue::ident("b");
    assert_eq!(get_4_values(&[one.clone(), two.clone(), one.clone(), two.clone()]), "a b");
    assert_eq!(get_2_values(&[one.clone(), one.clone()]), "a");
    assert_eq!(get_2_values(&[one, two]), "a b");
    assert_eq!(get_4_values(&[]), "");
}

#[test]
fn test_missing_longhand_gives_empty() {
    assert_eq!(shorthand("margin-top: 1px; margin-left: 1px", "margin"), "");
}

#[test]
fn test_mixed_importance_gives_empty() {
    assert_eq!(shorthand("margin: 1px; margin-top: 2px !important", "margin"), "");
    assert_eq!(shorthand("margin: 1px !important", "margin"), "1px");
}

#[test]
fn test_css_wide_keywords() {
    assert_eq!(shorthand("margin: inherit", "margin"), "inherit");
    assert_eq!(shorthand("margin: inherit; margin-top: 1px", "margin"), "");
}

#[test]
fn test_pending_substitution() {
    assert_eq!(shorthand("margin: var(--m)", "margin"), "var(--m)");
    assert_eq!(shorthand("margin: var(--m); margin-top: 1px", "margin"), "");
}

#[test]
fn test_two_value_shorthands() {
    assert_eq!(shorthand("gap: 1px", "gap"), "1px");
    assert_eq!(shorthand("gap: 1px 2px", "gap"), "1px 2px");
    assert_eq!(shorthand("overflow: hidden", "overflow"), "hidden");
    assert_eq!(shorthand("overflow: hidden auto", "overflow"), "hidden auto");
}

#[test]
fn test_border() {
    assert_eq!(shorthand("border: 1px solid red", "border"), "1px solid red");
    assert_eq!(shorthand("border: solid", "border"), "solid");
    assert_eq!(shorthand("border: 1px solid red; border-left-color: blue", "border"), "");
    assert_eq!(shorthand("border-top: 2px dotted", "border-top"), "2px dotted");
}

#[test]
fn test_border_radius() {
    assert_eq!(shorthand("border-radius: 5px", "border-radius"), "5px");
    assert_eq!(shorthand("border-radius: 1px 2px / 3px", "border-radius"), "1px 2px / 3px");
    assert_eq!(shorthand("border-radius: 1px 2px 3px 4px / 5%", "border-radius"), "1px 2px 3px 4px / 5%");
}

#[test]
fn test_flex() {
    assert_eq!(shorthand("flex: 1", "flex"), "1 1 0%");
    assert_eq!(shorthand("flex: none", "flex"), "0 0 auto");
    assert_eq!(shorthand("flex: 2 3 10px", "flex"), "2 3 10px");
}

#[test]
fn test_background() {
    assert_eq!(shorthand("background: red", "background"), "red");
    assert_eq!(shorthand("background: center / cover", "background"), "center center / cover");
    assert_eq!(
        shorthand("background: url(a.png) 10px 20px / contain repeat-x fixed", "background"),
        "url(\"a.png\") 10px 20px / contain repeat-x fixed"
    );
}

#[test]
fn test_background_layers() {
    assert_eq!(
        shorthand("background: url(a.png) 10px 20px / cover no-repeat, url(b.png) red", "background"),
        "url(\"a.png\") 10px 20px / cover no-repeat, url(\"b.png\") red"
    );
    // Initial values are left out of each layer, and the color only
    // belongs to the last one.
    assert_eq!(
        shorthand("background: none, url(b.png) padding-box", "background"),
        "none, url(\"b.png\") padding-box"
    );
    // A layer with no item in a shorter list just omits it.
    assert_eq!(
        shorthand("background: url(a.png), url(b.png); background-repeat: no-repeat", "background"),
        "url(\"a.png\") no-repeat, url(\"b.png\")"
    );
}

#[test]
fn test_background_longhands_with_two_keywords() {
    let values = set("background-size: auto 10px; background-repeat: repeat no-repeat");
    let size = PropertyName::parse("background-size").unwrap_or_else(|| panic!("unknown property"));
    let repeat = PropertyName::parse("background-repeat").unwrap_or_else(|| panic!("unknown property"));
    assert_eq!(values.get_property_value(&size), "auto 10px");
    assert_eq!(values.get_property_value(&repeat), "repeat no-repeat");
}

#[test]
fn test_transition() {
    assert_eq!(shorthand("transition: opacity 1s", "transition"), "opacity 1s");
    assert_eq!(
        shorthand("transition: opacity 1s; transition-delay: 1s, 2s", "transition"),
        ""
    );
}

#[test]
fn test_declaration_block_folds_shorthands() {
    assert_eq!(set("margin: 1px 2px").as_text(), "margin: 1px 2px;");
    assert_eq!(
        set("color: red; margin: 0 !important").as_text(),
        "color: red; margin: 0px !important;"
    );
    assert_eq!(set("border: 1px solid red").as_text(), "border: 1px solid red;");
    assert_eq!(set("--x:  a  b ").as_text(), "--x: a b;");
}

#[test]
fn test_declaration_block_lists_unfoldable_longhands() {
    assert_eq!(
        set("margin: 1px; margin-top: 2px !important").as_text(),
        "margin-top: 2px !important; margin-right: 1px; margin-bottom: 1px; margin-left: 1px;"
    );
    assert_eq!(set("margin-top: 1px; width: 2px").as_text(), "margin-top: 1px; width: 2px;");
}

#[test]
fn test_reparsing_the_block_is_stable() {
    let first = set("margin: 1px 2px; border: 2px dashed blue; color: red !important");
    let text = first.as_text();
    let second = set(&text);
    assert!(first.properties_equal(&second));
    assert_eq!(second.as_text(), text);
}
