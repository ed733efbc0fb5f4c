//! Integration tests for `@layer`, `@counter-style`, `@scope` and the
//! generic at-rules.

use wattle_css::parser::{CounterStyleDescriptor, parse_stylesheet};
use wattle_css::{ParserContext, ParserMode, Rule};

fn rules(text: &str) -> Vec<Rule> {
    parse_stylesheet(text, &ParserContext::new()).rules
}

fn only(text: &str) -> Rule {
    let mut rules = rules(text);
    assert_eq!(rules.len(), 1, "{text}: {rules:?}");
    rules.remove(0)
}

#[test]
fn test_counter_style() {
    let rule = only(r#"@counter-style thumbs { system: cyclic; symbols: "\1F44D"; suffix: " "; }"#);
    let Rule::CounterStyle(rule) = rule else {
        panic!("expected @counter-style, got {rule:?}");
    };
    assert_eq!(rule.name, "thumbs");
    let text = |descriptor| rule.descriptor(descriptor).map(|value| value.css_text());
    assert_eq!(text(CounterStyleDescriptor::System).as_deref(), Some("cyclic"));
    assert_eq!(text(CounterStyleDescriptor::Symbols).as_deref(), Some("\"\u{1F44D}\""));
    assert_eq!(text(CounterStyleDescriptor::Suffix).as_deref(), Some("\" \""));
    assert_eq!(text(CounterStyleDescriptor::Prefix), None);
    assert_eq!(
        rule.css_text(),
        "@counter-style thumbs { system: cyclic; symbols: \"\u{1F44D}\"; suffix: \" \"; }"
    );
}

#[test]
fn test_counter_style_descriptors() {
    let rule = only(
        r#"@counter-style roman { system: additive; additive-symbols: 10 X, 5 V, 1 I;
            range: 1 3999; pad: 3 "0"; negative: "(" ")"; fallback: decimal;
            speak-as: numbers; system: bogus; }"#,
    );
    let Rule::CounterStyle(rule) = rule else {
        panic!("expected @counter-style, got {rule:?}");
    };
    let text = |descriptor| rule.descriptor(descriptor).map(|value| value.css_text());
    assert_eq!(text(CounterStyleDescriptor::System).as_deref(), Some("additive"));
    assert_eq!(
        text(CounterStyleDescriptor::AdditiveSymbols).as_deref(),
        Some("10 X, 5 V, 1 I")
    );
    assert_eq!(text(CounterStyleDescriptor::Range).as_deref(), Some("1 3999"));
    assert_eq!(text(CounterStyleDescriptor::Pad).as_deref(), Some("3 \"0\""));
    assert_eq!(text(CounterStyleDescriptor::Negative).as_deref(), Some("\"(\" \")\""));
    assert_eq!(text(CounterStyleDescriptor::Fallback).as_deref(), Some("decimal"));
    assert_eq!(text(CounterStyleDescriptor::SpeakAs).as_deref(), Some("numbers"));
}

#[test]
fn test_later_descriptors_overwrite_in_place() {
    let Rule::CounterStyle(rule) = only(r#"@counter-style x { suffix: "a"; prefix: "p"; suffix: "b"; }"#)
    else {
        panic!("expected @counter-style");
    };
    let order: Vec<CounterStyleDescriptor> = rule.descriptors.iter().map(|(d, _)| *d).collect();
    assert_eq!(order, [CounterStyleDescriptor::Suffix, CounterStyleDescriptor::Prefix]);
    assert_eq!(
        rule.descriptor(CounterStyleDescriptor::Suffix).map(|v| v.css_text()).as_deref(),
        Some("\"b\"")
    );
}

#[test]
fn test_counter_style_names() {
    assert!(rules("@counter-style none { system: cyclic; }").is_empty());
    assert!(rules("@counter-style inherit { system: cyclic; }").is_empty());
    assert!(rules("@counter-style a b { system: cyclic; }").is_empty());
    assert!(rules("@counter-style x;").is_empty());
    assert!(rules("@counter-style Decimal { system: numeric; }").is_empty());

    let ua = ParserContext::new().with_mode(ParserMode::UASheet);
    let sheet = parse_stylesheet("@counter-style disc { system: cyclic; symbols: \"\\2022\"; }", &ua);
    assert_eq!(sheet.rules.len(), 1);
}

#[test]
fn test_layer_statement() {
    let Rule::LayerStatement(rule) = only("@layer base, layout, utilities;") else {
        panic!("expected a layer statement");
    };
    let names: Vec<String> = rule.names.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["base", "layout", "utilities"]);
    assert_eq!(rule.css_text(), "@layer base, layout, utilities;");
}

#[test]
fn test_layer_block() {
    let Rule::LayerBlock(rule) = only("@layer framework.base { a { color: red } }") else {
        panic!("expected a layer block");
    };
    assert_eq!(rule.name.as_ref().map(ToString::to_string).as_deref(), Some("framework.base"));
    assert_eq!(rule.name.as_ref().map(|name| name.0.len()), Some(2));
    assert_eq!(rule.rules.len(), 1);
    assert_eq!(rule.css_text(), "@layer framework.base { a { color: red; } }");
}

#[test]
fn test_anonymous_layer() {
    let Rule::LayerBlock(rule) = only("@layer { }") else {
        panic!("expected a layer block");
    };
    assert!(rule.name.is_none());
    assert_eq!(rule.css_text(), "@layer { }");
}

#[test]
fn test_invalid_layers_are_dropped() {
    assert!(rules("@layer;").is_empty());
    assert!(rules("@layer initial;").is_empty());
    assert!(rules("@layer a b;").is_empty());
    assert!(rules("@layer a, ;").is_empty());
    assert!(rules("@layer a, b { }").is_empty());
}

#[test]
fn test_scope() {
    let Rule::Scope(rule) = only("@scope (.card) to (.content > *) { img { border: 1px solid black } }")
    else {
        panic!("expected @scope");
    };
    assert_eq!(rule.start.as_deref(), Some(".card"));
    assert_eq!(rule.end.as_deref(), Some(".content > *"));
    assert_eq!(rule.rules.len(), 1);
    assert_eq!(
        rule.css_text(),
        "@scope (.card) to (.content > *) { img { border: 1px solid black; } }"
    );
}

#[test]
fn test_scope_without_bounds() {
    let Rule::Scope(rule) = only("@scope { p { color: red } }") else {
        panic!("expected @scope");
    };
    assert!(rule.start.is_none());
    assert!(rule.end.is_none());
    let Rule::Scope(rule) = only("@scope to (footer) { }") else {
        panic!("expected @scope");
    };
    assert_eq!(rule.end.as_deref(), Some("footer"));
}

#[test]
fn test_invalid_scopes_are_dropped() {
    assert!(rules("@scope () { }").is_empty());
    assert!(rules("@scope (.a) junk { }").is_empty());
    assert!(rules("@scope (.a);").is_empty());
}

#[test]
fn test_grouping_rules_nest() {
    let Rule::At(rule) = only("@media screen and (min-width: 10px) { a { color: red } b { } }") else {
        panic!("expected @media");
    };
    assert_eq!(rule.name, "media");
    assert_eq!(rule.prelude, "screen and (min-width: 10px)");
    assert_eq!(rule.rules.as_ref().map(Vec::len), Some(2));
    assert_eq!(
        rule.css_text(),
        "@media screen and (min-width: 10px) { a { color: red; } b { } }"
    );
}

#[test]
fn test_other_at_rules_keep_their_block() {
    let Rule::At(rule) = only("@font-face { font-family: x;  src: local(x) }") else {
        panic!("expected @font-face");
    };
    assert!(rule.rules.is_none());
    assert_eq!(rule.block.as_deref(), Some("font-family: x; src: local(x)"));
    let Rule::At(rule) = only("@charset \"utf-8\";") else {
        panic!("expected @charset");
    };
    assert!(rule.block.is_none());
    assert_eq!(rule.css_text(), "@charset \"utf-8\";");
}

#[test]
fn test_rules_serialize_with_a_type_tag() {
    let rule = only("@layer a, b.c;");
    let json = serde_json::to_value(&rule).unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(json["type"], "layer-statement");
    assert_eq!(json["names"], serde_json::json!(["a", "b.c"]));
}
