//! Integration tests for the token stream cursor.

use wattle_css::parser::TokenStream;
use wattle_css::tokenizer::{CSSToken, serialize_tokens, tokenize};

#[test]
fn test_trailing_eof_is_not_part_of_the_stream() {
    let tokens = tokenize("a");
    let mut stream = TokenStream::new(&tokens);
    assert_eq!(stream.consume(), &CSSToken::ident("a"));
    assert!(stream.at_end());
    assert_eq!(stream.peek(), &CSSToken::EOF);
    assert_eq!(stream.consume(), &CSSToken::EOF);
}

#[test]
fn test_peek_at_looks_ahead() {
    let tokens = tokenize("a b");
    let stream = TokenStream::new(&tokens);
    assert_eq!(stream.peek_at(0), &CSSToken::ident("a"));
    assert_eq!(stream.peek_at(1), &CSSToken::Whitespace);
    assert_eq!(stream.peek_at(2), &CSSToken::ident("b"));
    assert_eq!(stream.peek_at(3), &CSSToken::EOF);
}

#[test]
fn test_consume_including_whitespace() {
    let tokens = tokenize("a   b");
    let mut stream = TokenStream::new(&tokens);
    let _ = stream.consume_including_whitespace();
    assert_eq!(stream.peek(), &CSSToken::ident("b"));
    assert_eq!(stream.previous(), &CSSToken::Whitespace);
}

#[test]
fn test_save_point_rewinds_on_drop() {
    let tokens = tokenize("a b c");
    let mut stream = TokenStream::new(&tokens);
    {
        let mut guard = stream.save();
        let _ = guard.consume_including_whitespace();
        let _ = guard.consume_including_whitespace();
        assert_eq!(guard.peek(), &CSSToken::ident("c"));
    }
    assert_eq!(stream.peek(), &CSSToken::ident("a"));
}

#[test]
fn test_save_point_release_commits() {
    let tokens = tokenize("a b c");
    let mut stream = TokenStream::new(&tokens);
    let mut guard = stream.save();
    let _ = guard.consume_including_whitespace();
    guard.release();
    assert_eq!(stream.peek(), &CSSToken::ident("b"));
}

#[test]
fn test_state_and_restore() {
    let tokens = tokenize("a b");
    let mut stream = TokenStream::new(&tokens);
    let state = stream.state();
    stream.consume_whitespace();
    let _ = stream.consume();
    let _ = stream.consume();
    stream.restore(state);
    assert_eq!(stream.remaining().len(), 3);
}

#[test]
fn test_consume_block_returns_contents() {
    let tokens = tokenize("(a (b) c) d");
    let mut stream = TokenStream::new(&tokens);
    let inner = stream.consume_block();
    assert_eq!(serialize_tokens(inner.remaining()), "a (b) c");
    assert_eq!(stream.consume_including_whitespace(), &CSSToken::Whitespace);
    assert_eq!(stream.peek(), &CSSToken::ident("d"));
}

#[test]
fn test_consume_block_needs_a_block_start() {
    let tokens = tokenize("a");
    let mut stream = TokenStream::new(&tokens);
    assert!(stream.consume_block().at_end());
    assert_eq!(stream.peek(), &CSSToken::ident("a"));
}

#[test]
fn test_unterminated_block_runs_to_the_end() {
    let tokens = tokenize("f(a, b");
    let mut stream = TokenStream::new(&tokens);
    let inner = stream.consume_block();
    assert_eq!(serialize_tokens(inner.remaining()), "a, b");
    assert!(stream.at_end());
}

#[test]
fn test_component_value_includes_the_whole_function() {
    let tokens = tokenize("calc(1px + f(2)) x");
    let mut stream = TokenStream::new(&tokens);
    let value = stream.consume_component_value();
    assert_eq!(serialize_tokens(value), "calc(1px + f(2))");
    assert_eq!(stream.peek(), &CSSToken::Whitespace);
}

#[test]
fn test_consume_until_top_level_skips_nested_commas() {
    let tokens = tokenize("rgb(1, 2, 3) red, blue");
    let mut stream = TokenStream::new(&tokens);
    let first = stream.consume_until_top_level(|token| matches!(token, CSSToken::Comma));
    assert_eq!(serialize_tokens(first), "rgb(1, 2, 3) red");
    assert_eq!(stream.peek(), &CSSToken::Comma);
    let _ = stream.consume_including_whitespace();
    let rest = stream.consume_until_top_level(|token| matches!(token, CSSToken::Comma));
    assert_eq!(serialize_tokens(rest), "blue");
    assert!(stream.at_end());
}
