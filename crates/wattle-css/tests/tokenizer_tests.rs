//! Integration tests for the CSS tokenizer.

use wattle_css::tokenizer::{
    BlockType, CSSToken, CSSTokenizer, NumericType, serialize_tokens, tokenize,
};
use wattle_css::units::UnitType;

/// Tokens without the trailing EOF.
fn tokens(input: &str) -> Vec<CSSToken> {
    let mut tokens = tokenize(input);
    assert_eq!(tokens.pop(), Some(CSSToken::EOF));
    tokens
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![CSSToken::EOF]);
}

#[test]
fn test_comments_are_dropped() {
    assert_eq!(tokens("/* a */b/**/c"), vec![CSSToken::ident("b"), CSSToken::ident("c")]);
}

#[test]
fn test_declaration_shape() {
    assert_eq!(
        tokens("width: 10px;"),
        vec![
            CSSToken::ident("width"),
            CSSToken::Colon,
            CSSToken::Whitespace,
            CSSToken::dimension(10.0, Some(10), "px"),
            CSSToken::Semicolon,
        ]
    );
}

#[test]
fn test_exponent_makes_a_number() {
    match &tokens("1e3")[0] {
        CSSToken::Number {
            value,
            int_value,
            numeric_type,
        } => {
            assert_eq!(*value, 1000.0);
            assert_eq!(*int_value, None);
            assert_eq!(*numeric_type, NumericType::Number);
        }
        other => panic!("Expected Number token, got {other:?}"),
    }
}

#[test]
fn test_unit_keeps_its_case() {
    let tokens = tokens("10PX");
    match &tokens[0] {
        CSSToken::Dimension { unit, .. } => assert_eq!(unit, "PX"),
        other => panic!("Expected Dimension token, got {other:?}"),
    }
    assert_eq!(tokens[0].unit_type(), Some(UnitType::Pixels));
}

#[test]
fn test_unknown_unit_type() {
    assert_eq!(tokens("3foo")[0].unit_type(), Some(UnitType::Unknown));
    assert_eq!(tokens("3")[0].unit_type(), Some(UnitType::Integer));
    assert_eq!(tokens("3.5")[0].unit_type(), Some(UnitType::Number));
    assert_eq!(tokens("foo")[0].unit_type(), None);
}

#[test]
fn test_string_escapes() {
    assert_eq!(tokens(r#""\1F44D""#), vec![CSSToken::String("\u{1F44D}".to_owned())]);
    assert_eq!(tokens(r"'a\'b'"), vec![CSSToken::String("a'b".to_owned())]);
}

#[test]
fn test_ident_escapes() {
    assert_eq!(tokens(r"\31 a"), vec![CSSToken::ident("1a")]);
}

#[test]
fn test_unterminated_string_is_bad() {
    assert_eq!(tokens("'abc\ndef")[0], CSSToken::BadString);
}

#[test]
fn test_urls() {
    assert_eq!(tokens("url(foo.png)"), vec![CSSToken::Url("foo.png".to_owned())]);
    assert_eq!(tokens("url( a b )"), vec![CSSToken::BadUrl]);
    assert_eq!(
        tokens("url('x.png')"),
        vec![CSSToken::function("url"), CSSToken::String("x.png".to_owned()), CSSToken::RightParen]
    );
}

#[test]
fn test_cdo_and_cdc() {
    assert_eq!(
        tokens("<!-- -->"),
        vec![CSSToken::CDO, CSSToken::Whitespace, CSSToken::CDC]
    );
}

#[test]
fn test_block_markers() {
    let tokens = tokens("f([{}])");
    let kinds: Vec<BlockType> = tokens.iter().map(CSSToken::block_type).collect();
    assert_eq!(
        kinds,
        [
            BlockType::BlockStart,
            BlockType::BlockStart,
            BlockType::BlockStart,
            BlockType::BlockEnd,
            BlockType::BlockEnd,
            BlockType::BlockEnd,
        ]
    );
    assert_eq!(tokens[0].closing_token(), Some(CSSToken::RightParen));
    assert_eq!(tokens[2].closing_token(), Some(CSSToken::RightBrace));
}

#[test]
fn test_block_depth_returns_to_zero() {
    let mut tokenizer = CSSTokenizer::new("calc((1 + 2) * 3)");
    tokenizer.run();
    assert_eq!(tokenizer.block_depth(), 0);

    let mut unbalanced = CSSTokenizer::new("a { b(");
    unbalanced.run();
    assert_eq!(unbalanced.block_depth(), 2);
    assert_eq!(unbalanced.tokens().last(), Some(&CSSToken::EOF));
}

#[test]
fn test_serialize_collapses_whitespace() {
    let tokens = tokenize("  a   ,\n b( 1px )  ");
    assert_eq!(serialize_tokens(&tokens), "a , b( 1px )");
}
