//! Integration tests for stylesheet and declaration-list parsing.

use wattle_common::warn_once;
use wattle_css::parser::{CSSParser, parse_declaration_list, parse_stylesheet};
use wattle_css::{ParserContext, PropertyValueSet, Rule, tokenize};

#[test]
fn test_rules_in_order() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet("h1 { color: red } p, li { margin: 0 auto }", &context);
    assert_eq!(sheet.rules.len(), 2);
    assert_eq!(
        sheet.css_text(),
        "h1 { color: red; }\np, li { margin: 0px auto; }"
    );
}

#[test]
fn test_parser_over_tokens() {
    let context = ParserContext::new();
    let tokens = tokenize("a { width: 10px }");
    let sheet = CSSParser::new(&tokens, &context).parse_stylesheet();
    let [Rule::Style(rule)] = sheet.rules.as_slice() else {
        panic!("expected one style rule, got {sheet:?}");
    };
    assert_eq!(rule.selectors[0].text, "a");
    assert_eq!(rule.properties.property_count(), 1);
}

#[test]
fn test_cdo_and_cdc_are_ignored_at_the_top_level() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet("<!-- a { color: red } -->", &context);
    assert_eq!(sheet.rules.len(), 1);
}

#[test]
fn test_empty_input() {
    let context = ParserContext::new();
    assert!(parse_stylesheet("", &context).rules.is_empty());
    assert!(parse_stylesheet("  /* only a comment */ ", &context).rules.is_empty());
    assert!(parse_declaration_list("", &context).is_empty());
}

#[test]
fn test_nested_grouping_rules() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet(
        "@media print { @supports (display: grid) { a { display: grid } } }",
        &context,
    );
    let [Rule::At(media)] = sheet.rules.as_slice() else {
        panic!("expected @media, got {sheet:?}");
    };
    let Some([Rule::At(supports)]) = media.rules.as_deref() else {
        panic!("expected @supports inside @media, got {media:?}");
    };
    assert_eq!(supports.name, "supports");
    assert_eq!(supports.rules.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_bad_declarations_do_not_spoil_the_rule() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet(
        "a { color: ; width: 1px; 12: 3; height: 1px 2px; margin-top: 2px }",
        &context,
    );
    let [Rule::Style(rule)] = sheet.rules.as_slice() else {
        panic!("expected one style rule, got {sheet:?}");
    };
    assert_eq!(rule.properties.as_text(), "width: 1px; margin-top: 2px;");
}

#[test]
fn test_at_rules_inside_declarations_are_dropped() {
    let context = ParserContext::new();
    let set = parse_declaration_list("color: red; @media print { color: blue } width: 1px", &context);
    assert_eq!(set.as_text(), "color: red; width: 1px;");
}

#[test]
fn test_nested_blocks_inside_values() {
    let context = ParserContext::new();
    let set = parse_declaration_list("--json: { \"a\": [1; 2] }; color: red", &context);
    assert_eq!(set.property_count(), 2);
}

#[test]
fn test_dropped_declarations_are_reported_once() {
    let context = ParserContext::new().with_reporting(true);
    let _ = parse_stylesheet("a { stylesheet-tests-unknown: 1 } b { stylesheet-tests-unknown: 2 }", &context);
    assert!(!warn_once(
        "CSS",
        "dropped declaration with unknown property 'stylesheet-tests-unknown'"
    ));
}

#[test]
fn test_reporting_is_off_by_default() {
    let context = ParserContext::new();
    let _ = parse_stylesheet("a { stylesheet-tests-silent: 1 }", &context);
    assert!(warn_once(
        "CSS",
        "dropped declaration with unknown property 'stylesheet-tests-silent'"
    ));
}

#[test]
fn test_unknown_at_rules_are_kept_and_reported() {
    let context = ParserContext::new().with_reporting(true);
    let sheet = parse_stylesheet("@stylesheet-tests-rule foo { bar }", &context);
    assert_eq!(sheet.rules.len(), 1);
    assert!(!warn_once(
        "CSS",
        "unsupported at-rule '@stylesheet-tests-rule' kept as written"
    ));
}

#[test]
fn test_rules_serialize_to_json() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet("a, b { color: red }", &context);
    let json = serde_json::to_value(&sheet).unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(json["rules"][0]["type"], "style");
    assert_eq!(json["rules"][0]["selectors"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_stray_close_brace_invalidates_the_following_rule() {
    let context = ParserContext::new();
    let sheet = parse_stylesheet("a{color:red}}b{color:blue}", &context);
    assert_eq!(sheet.css_text(), "a { color: red; }");
    // Parsing picks up again at the rule after the damaged one.
    let sheet = parse_stylesheet("a{}]b{}c{}", &context);
    assert_eq!(sheet.css_text(), "a { }\nc { }");
}
