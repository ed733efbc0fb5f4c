//! Integration tests for mutable and immutable property-value sets.

use wattle_css::parser::parse_declaration_list;
use wattle_css::{
    ImmutablePropertyValueSet, MutablePropertyValueSet, ParserContext, PropertyId, PropertyName,
    PropertyValueSet,
};

fn name(text: &str) -> PropertyName {
    PropertyName::parse(text).unwrap_or_else(|| panic!("unknown property {text}"))
}

fn set(text: &str) -> MutablePropertyValueSet {
    parse_declaration_list(text, &ParserContext::new())
}

#[test]
fn test_shorthands_expand_in_declaration_order() {
    let set = set("color: red; padding: 1px 2px");
    let names: Vec<String> = set
        .properties()
        .iter()
        .map(|property| property.name.to_string())
        .collect();
    assert_eq!(
        names,
        ["color", "padding-top", "padding-right", "padding-bottom", "padding-left"]
    );
}

#[test]
fn test_later_declarations_win_in_place() {
    let set = set("margin-left: 1px; color: red; margin: 3px");
    assert_eq!(set.property_at(0).map(|p| p.name.to_string()).as_deref(), Some("margin-left"));
    assert_eq!(set.get_property_value(&name("margin-left")), "3px");
    assert_eq!(set.property_count(), 5);
}

#[test]
fn test_custom_properties_are_case_sensitive() {
    let set = set("--a: 1; --A: 2; --a: 3");
    assert_eq!(set.property_count(), 2);
    assert_eq!(set.get_property_value(&name("--a")), "3");
    assert_eq!(set.get_property_value(&name("--A")), "2");
}

#[test]
fn test_important_flags() {
    let set = set("color: red !important; margin: 0 !important; width: 1px");
    assert!(set.is_property_important(&name("color")));
    assert!(set.is_property_important(&name("margin")));
    assert!(set.is_property_important(&name("margin-top")));
    assert!(!set.is_property_important(&name("width")));
    assert!(!set.is_property_important(&name("height")));
}

#[test]
fn test_all_overrides_earlier_longhands() {
    let set = set("color: red; all: initial");
    assert_eq!(set.get_property_value(&name("color")), "initial");
    assert_eq!(set.get_property_value(&name("all")), "initial");
    // Not affected by `all`.
    assert_eq!(set.get_property_value(&name("direction")), "");
    let value = set.get_property_css_value(&name("background-color"));
    assert_eq!(value.map(|value| value.css_text()).as_deref(), Some("initial"));
}

#[test]
fn test_later_longhand_beats_all() {
    let set = set("all: unset; color: red");
    assert_eq!(set.get_property_value(&name("color")), "red");
    assert_eq!(set.get_property_value(&name("width")), "unset");
}

#[test]
fn test_important_all_beats_a_later_longhand() {
    let set = set("all: revert !important; color: red");
    assert_eq!(set.get_property_value(&name("color")), "revert");
    assert!(set.is_property_important(&name("color")));
}

#[test]
fn test_remove_shorthand_removes_longhands() {
    let mut set = set("margin: 1px; color: red");
    assert!(set.remove_property(&name("margin")));
    assert_eq!(set.property_count(), 1);
    assert!(!set.remove_property(&name("margin-top")));
    assert!(set.remove_property(&name("color")));
    assert!(set.is_empty());
}

#[test]
fn test_set_property_text() {
    let context = ParserContext::new();
    let mut set = MutablePropertyValueSet::new();
    assert!(set.set_property_text(&name("border-width"), "1px 2px !important", &context));
    assert_eq!(set.property_count(), 4);
    assert!(set.is_property_important(&name("border-width")));
    assert!(!set.set_property_text(&name("border-width"), "thick red", &context));
    assert_eq!(set.get_property_value(&name("border-width")), "1px 2px");
}

#[test]
fn test_merge_and_copy() {
    let mut base = set("color: red; width: 1px");
    let overrides = set("color: blue; height: 2px");
    base.merge_and_override_on_conflict(&overrides);
    assert_eq!(base.property_count(), 3);
    assert_eq!(base.get_property_value(&name("color")), "blue");

    let copy = base.copy_properties_in_set(&[PropertyId::Width, PropertyId::Height]);
    assert_eq!(copy.property_count(), 2);
    assert!(!copy.has_property(&name("color")));
}

#[test]
fn test_immutable_round_trip() {
    let mutable = set("color: red; margin: 1px");
    let immutable: ImmutablePropertyValueSet = mutable.to_immutable();
    assert!(immutable.properties_equal(&mutable));
    let mut copy = immutable.to_mutable();
    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(immutable.property_count(), 5);
}

#[test]
fn test_find_property_index() {
    let set = set("width: 1px; height: 2px");
    assert_eq!(set.find_property_index(&name("height")), Some(1));
    assert_eq!(set.find_property_index(&name("color")), None);
    assert!(set.get_property(&name("width")).is_some_and(|p| p.id() == Some(PropertyId::Width)));
}
