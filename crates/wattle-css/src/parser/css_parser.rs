//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! Style rules keep their selectors as text and their declarations as an
//! [`ImmutablePropertyValueSet`]. Declarations that fail to parse are
//! dropped, as are invalid at-rules.

use serde::Serialize;
use wattle_common::warning::warn_once;

use super::at_rules::{
    AtRule, CounterStyleRule, LayerBlockRule, LayerStatementRule, ScopeRule, parse_at_rule,
};
use super::context::ParserContext;
use super::stream::TokenStream;
use crate::properties::PropertyName;
use crate::property_parser::{parse_declaration, strip_important, trim_whitespace};
use crate::property_set::{ImmutablePropertyValueSet, MutablePropertyValueSet, PropertyValueSet};
use crate::tokenizer::{BlockType, CSSToken, serialize_tokens, tokenize};

/// A CSS selector (simplified representation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selector {
    /// Raw selector text
    pub text: String,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selector + declarations).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    /// The list of selectors for this rule.
    pub selectors: Vec<Selector>,
    /// The valid declarations in this rule block.
    pub properties: ImmutablePropertyValueSet,
}

impl StyleRule {
    /// `a, b { color: red; }`
    #[must_use]
    pub fn css_text(&self) -> String {
        let selectors: Vec<&str> = self
            .selectors
            .iter()
            .map(|selector| selector.text.as_str())
            .collect();
        let declarations = self.properties.as_text();
        if declarations.is_empty() {
            format!("{} {{ }}", selectors.join(", "))
        } else {
            format!("{} {{ {declarations} }}", selectors.join(", "))
        }
    }
}

/// [§ 5.3.3 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
///
/// A CSS rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// `@layer a, b;`
    LayerStatement(LayerStatementRule),
    /// `@layer a { … }`
    LayerBlock(LayerBlockRule),
    /// `@counter-style`
    CounterStyle(CounterStyleRule),
    /// `@scope`
    Scope(ScopeRule),
    /// Any other at-rule.
    At(AtRule),
}

impl Rule {
    /// The rule re-serialized as CSS text.
    #[must_use]
    pub fn css_text(&self) -> String {
        match self {
            Self::Style(rule) => rule.css_text(),
            Self::LayerStatement(rule) => rule.css_text(),
            Self::LayerBlock(rule) => rule.css_text(),
            Self::CounterStyle(rule) => rule.css_text(),
            Self::Scope(rule) => rule.css_text(),
            Self::At(rule) => rule.css_text(),
        }
    }
}

/// `{ rule rule }`
pub(crate) fn rules_css_text(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "{ }".to_owned();
    }
    let rules: Vec<String> = rules.iter().map(Rule::css_text).collect();
    format!("{{ {} }}", rules.join(" "))
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// One rule per line.
    #[must_use]
    pub fn css_text(&self) -> String {
        let rules: Vec<String> = self.rules.iter().map(Rule::css_text).collect();
        rules.join("\n")
    }
}

/// CSS parser
pub struct CSSParser<'a> {
    stream: TokenStream<'a>,
    context: &'a ParserContext,
}

impl<'a> CSSParser<'a> {
    /// Create a new parser over a list of tokens.
    #[must_use]
    pub fn new(tokens: &'a [CSSToken], context: &'a ParserContext) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            context,
        }
    }

    /// A parser over the contents of a block, sharing this parser's context.
    const fn nested(&self, stream: TokenStream<'a>) -> Self {
        Self {
            stream,
            context: self.context,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules(true);
        Stylesheet { rules }
    }

    /// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    pub fn parse_declaration_list(&mut self) -> MutablePropertyValueSet {
        self.consume_list_of_declarations()
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        // "Create an initially empty list of rules."
        let mut rules = Vec::new();

        loop {
            match self.stream.peek() {
                // "<whitespace-token>"
                // "Do nothing."
                CSSToken::Whitespace => {
                    let _ = self.stream.consume();
                }

                // "<EOF-token>"
                // "Return the list of rules."
                CSSToken::EOF => {
                    return rules;
                }

                // "<CDO-token>" or "<CDC-token>"
                CSSToken::CDO | CSSToken::CDC if top_level => {
                    // "If the top-level flag is set, do nothing."
                    let _ = self.stream.consume();
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule, and append
                // the returned value to the list of rules."
                CSSToken::AtKeyword(_) => {
                    if let Some(rule) = self.consume_at_rule() {
                        rules.push(rule);
                    }
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                _ => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self) -> Option<Rule> {
        // "Consume the next input token."
        let CSSToken::AtKeyword(name) = self.stream.consume() else {
            return None;
        };

        // "Reconsume the current input token. Consume a component value.
        // Append the returned value to the at-rule's prelude."
        let prelude = self
            .stream
            .consume_until_top_level(|token| matches!(token, CSSToken::Semicolon | CSSToken::LeftBrace));

        let block = match self.stream.peek() {
            // "<{-token>"
            // "Consume a simple block and assign it to the at-rule's block.
            // Return the at-rule."
            CSSToken::LeftBrace => Some(self.stream.consume_block()),
            // "<semicolon-token>"
            // "Return the at-rule."
            CSSToken::Semicolon => {
                let _ = self.stream.consume();
                None
            }
            // "<EOF-token>"
            // "This is a parse error. Return the at-rule."
            _ => None,
        };

        parse_at_rule(name, prelude, block, self.context)
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        // "Reconsume the current input token. Consume a component value.
        // Append the returned value to the qualified rule's prelude."
        let prelude = self
            .stream
            .consume_until_top_level(|token| matches!(token, CSSToken::LeftBrace));

        // "<EOF-token>"
        // "This is a parse error. Return nothing."
        if self.stream.at_end() {
            return None;
        }

        // "<{-token>"
        // "Consume a simple block and assign it to the qualified rule's block.
        // Return the qualified rule."
        let block = self.stream.consume_block();

        // [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
        // "A selector list is a comma-separated list of selectors"
        let Some(selectors) = split_selector_list(prelude) else {
            if self.context.report_dropped_declarations {
                let text = serialize_tokens(trim_whitespace(prelude));
                let _ = warn_once("CSS", &format!("dropped rule with invalid selector '{text}'"));
            }
            return None;
        };

        let properties = self.nested(block).consume_list_of_declarations();
        Some(StyleRule {
            selectors,
            properties: properties.into(),
        })
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> MutablePropertyValueSet {
        let mut properties = MutablePropertyValueSet::new();

        loop {
            match self.stream.peek() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                CSSToken::Whitespace | CSSToken::Semicolon => {
                    let _ = self.stream.consume();
                }

                // "<EOF-token>"
                // "Return the list of declarations."
                CSSToken::EOF => {
                    return properties;
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule. Append the
                // returned rule to the list of declarations."
                CSSToken::AtKeyword(name) => {
                    if self.context.report_dropped_declarations {
                        let _ = warn_once("CSS", &format!("dropped '@{name}' inside a declaration block"));
                    }
                    let _ = self.consume_at_rule();
                }

                // "<ident-token>"
                // "Initialize a temporary list initially filled with the current input
                // token. As long as the next input token is anything other than a
                // <semicolon-token> or <EOF-token>, consume a component value and
                // append it to the temporary list. Consume a declaration from the
                // temporary list."
                CSSToken::Ident(_) => {
                    let declaration = self
                        .stream
                        .consume_until_top_level(|token| matches!(token, CSSToken::Semicolon));
                    self.consume_declaration(declaration, &mut properties);
                }

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As long as
                // the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and throw away the returned value."
                _ => {
                    let _ = self
                        .stream
                        .consume_until_top_level(|token| matches!(token, CSSToken::Semicolon));
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    ///
    /// Parses the value for the named property and adds every resulting
    /// longhand to `properties`.
    fn consume_declaration(&self, tokens: &[CSSToken], properties: &mut MutablePropertyValueSet) {
        let mut stream = TokenStream::new(tokens);

        // "Consume the next input token."
        let CSSToken::Ident(name) = stream.consume() else {
            return;
        };

        // "While the next input token is a <whitespace-token>, consume the next input token."
        stream.consume_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        if !matches!(stream.consume(), CSSToken::Colon) {
            return;
        }

        // "If the last two non-<whitespace-token>s in the declaration's value are a
        // <delim-token> with the value "!" followed by an <ident-token> with a value
        // that is an ASCII case-insensitive match for "important", remove them from
        // the declaration's value and set the declaration's important flag to true."
        let (value, important) = strip_important(stream.remaining());

        let Some(property) = PropertyName::parse(name) else {
            if self.context.report_dropped_declarations {
                let _ = warn_once("CSS", &format!("dropped declaration with unknown property '{name}'"));
            }
            return;
        };

        let mut parsed = Vec::new();
        if !parse_declaration(&property, value, important, self.context, &mut parsed) {
            if self.context.report_dropped_declarations {
                let text = serialize_tokens(value);
                let _ = warn_once("CSS", &format!("dropped invalid declaration '{name}: {text}'"));
            }
            return;
        }
        for property in parsed {
            let _ = properties.set_property(property);
        }
    }
}

/// True if `prelude` holds a `}`, `)` or `]` that closes nothing, such as a
/// stray `}` left over from the previous rule.
fn has_unmatched_block_end(prelude: &[CSSToken]) -> bool {
    let mut stream = TokenStream::new(prelude);
    while !stream.at_end() {
        if matches!(stream.peek().block_type(), BlockType::BlockEnd) {
            return true;
        }
        let _ = stream.consume_component_value();
    }
    false
}

/// Split a rule prelude on top-level commas. Returns `None` if any selector
/// in the list is empty or the prelude has an unmatched closing token.
fn split_selector_list(prelude: &[CSSToken]) -> Option<Vec<Selector>> {
    if has_unmatched_block_end(prelude) {
        return None;
    }
    let mut stream = TokenStream::new(prelude);
    let mut selectors = Vec::new();
    loop {
        let selector = trim_whitespace(
            stream.consume_until_top_level(|token| matches!(token, CSSToken::Comma)),
        );
        if selector.is_empty() {
            return None;
        }
        selectors.push(Selector {
            text: serialize_tokens(selector),
        });
        if stream.at_end() {
            return Some(selectors);
        }
        // ,
        let _ = stream.consume();
    }
}

/// Parse the contents of a block as a list of nested rules.
pub(crate) fn parse_rule_list(block: TokenStream<'_>, context: &ParserContext) -> Vec<Rule> {
    let mut parser = CSSParser {
        stream: block,
        context,
    };
    parser.consume_list_of_rules(false)
}

/// Tokenize and parse a whole stylesheet.
#[must_use]
pub fn parse_stylesheet(text: &str, context: &ParserContext) -> Stylesheet {
    let tokens = tokenize(text);
    CSSParser::new(&tokens, context).parse_stylesheet()
}

/// Tokenize and parse the contents of a `style` attribute.
#[must_use]
pub fn parse_declaration_list(text: &str, context: &ParserContext) -> MutablePropertyValueSet {
    let tokens = tokenize(text);
    CSSParser::new(&tokens, context).parse_declaration_list()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_split_on_top_level_commas() {
        let context = ParserContext::new();
        let sheet = parse_stylesheet("a, b:is(c, d) { color: red }", &context);
        let [Rule::Style(rule)] = sheet.rules.as_slice() else {
            panic!("expected one style rule, got {sheet:?}");
        };
        let selectors: Vec<&str> = rule.selectors.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(selectors, ["a", "b:is(c, d)"]);
    }

    #[test]
    fn empty_selectors_drop_the_rule() {
        let context = ParserContext::new();
        let sheet = parse_stylesheet("a, { color: red } b { color: blue }", &context);
        assert_eq!(sheet.rules.len(), 1);
    }

    #[test]
    fn stray_close_brace_drops_the_next_rule() {
        let context = ParserContext::new();
        let sheet = parse_stylesheet("a{color:red}}b{color:blue} c{color:green}", &context);
        assert_eq!(sheet.css_text(), "a { color: red; }\nc { color: green; }");
        assert!(has_unmatched_block_end(&tokenize(") a")));
        assert!(!has_unmatched_block_end(&tokenize("a:is(b, c) [x]")));
    }

    #[test]
    fn invalid_declarations_are_dropped() {
        let context = ParserContext::new();
        let set = parse_declaration_list("color: red; width: blue; bogus: 1; margin: 1px", &context);
        assert_eq!(set.as_text(), "color: red; margin: 1px;");
    }

    #[test]
    fn unterminated_rule_is_dropped() {
        let context = ParserContext::new();
        assert!(parse_stylesheet("a", &context).rules.is_empty());
        assert_eq!(parse_stylesheet("a { color: red", &context).rules.len(), 1);
    }
}
