//! CSS parser module.

/// `@layer`, `@counter-style`, `@scope` and generic at-rules.
pub mod at_rules;
/// Per-parse configuration.
pub mod context;
/// CSS parser implementation per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod css_parser;
/// Cursor over a token slice.
pub mod stream;

pub use at_rules::{
    AtRule, CounterStyleDescriptor, CounterStyleRule, LayerBlockRule, LayerName,
    LayerStatementRule, ScopeRule,
};
pub use context::{ParserContext, ParserMode};
pub use css_parser::{
    CSSParser, Rule, Selector, StyleRule, Stylesheet, parse_declaration_list, parse_stylesheet,
};
pub use stream::{SavePoint, StreamState, TokenStream};
