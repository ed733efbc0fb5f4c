//! At-rules with a grammar of their own: `@layer`, `@counter-style` and
//! `@scope`. Grouping rules such as `@media` keep their prelude as text and
//! parse their contents as nested rules; any other at-rule is kept as
//! written.

use core::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use wattle_common::warning::warn_once;

use super::context::{ParserContext, ParserMode};
use super::css_parser::{Rule, parse_rule_list, rules_css_text};
use super::stream::TokenStream;
use crate::consume::{
    consume_custom_ident, consume_image, consume_integer, consume_string, is_reserved_ident,
    single_or_space_list,
};
use crate::property_parser::{strip_important, trim_whitespace};
use crate::tokenizer::{CSSToken, serialize_tokens};
use crate::values::{CSSValue, CssWideKeyword};

/// At-rules whose block holds nested rules.
const GROUPING_RULES: &[&str] = &["media", "supports", "container", "document", "starting-style"];

/// At-rules kept as written without a warning.
const KNOWN_RULES: &[&str] = &[
    "charset",
    "import",
    "namespace",
    "font-face",
    "font-feature-values",
    "font-palette-values",
    "keyframes",
    "-webkit-keyframes",
    "page",
    "property",
    "view-transition",
];

/// Counter style names only the user agent stylesheet may define.
const PREDEFINED_COUNTER_STYLES: &[&str] = &[
    "decimal",
    "disc",
    "square",
    "circle",
    "disclosure-open",
    "disclosure-closed",
];

/// [CSS Cascade 5 § 6.4.2](https://www.w3.org/TR/css-cascade-5/#layer-names)
///
/// "`<layer-name> = <ident> [ '.' <ident> ]*`"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerName(pub Vec<String>);

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl Serialize for LayerName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `@layer a, b.c;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStatementRule {
    /// The declared layers, in order
    pub names: Vec<LayerName>,
}

/// `@layer name { … }` or an anonymous `@layer { … }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerBlockRule {
    /// The layer, or `None` for an anonymous layer
    pub name: Option<LayerName>,
    /// Nested rules
    pub rules: Vec<Rule>,
}

/// [CSS Counter Styles 3 § 3](https://www.w3.org/TR/css-counter-styles-3/#the-counter-style-rule)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(into = "&'static str")]
#[allow(missing_docs)]
pub enum CounterStyleDescriptor {
    System,
    Symbols,
    AdditiveSymbols,
    Negative,
    Prefix,
    Suffix,
    Range,
    Pad,
    Fallback,
    SpeakAs,
}

/// `@counter-style <name> { … }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterStyleRule {
    /// The counter style name, case preserved
    pub name: String,
    /// Valid descriptors in the order they were first declared
    pub descriptors: Vec<(CounterStyleDescriptor, Rc<CSSValue>)>,
}

impl CounterStyleRule {
    /// The value of `descriptor`, if it was declared with a valid value.
    #[must_use]
    pub fn descriptor(&self, descriptor: CounterStyleDescriptor) -> Option<&Rc<CSSValue>> {
        self.descriptors
            .iter()
            .find(|(candidate, _)| *candidate == descriptor)
            .map(|(_, value)| value)
    }
}

/// [CSS Cascade 6 § 2.5](https://www.w3.org/TR/css-cascade-6/#scope-atrule)
///
/// `@scope (<scope-start>)? [to (<scope-end>)]? { … }`. The selectors are
/// kept as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeRule {
    /// The scoping root selector list
    pub start: Option<String>,
    /// The scoping limit selector list
    pub end: Option<String>,
    /// Nested rules
    pub rules: Vec<Rule>,
}

/// Any other at-rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    /// The name, without the `@`
    pub name: String,
    /// The prelude as written
    pub prelude: String,
    /// Nested rules, for grouping rules such as `@media`
    pub rules: Option<Vec<Rule>>,
    /// The block contents as written, for other at-rules with a block
    pub block: Option<String>,
}

impl LayerStatementRule {
    /// `@layer a, b;`
    #[must_use]
    pub fn css_text(&self) -> String {
        let names: Vec<String> = self.names.iter().map(ToString::to_string).collect();
        format!("@layer {};", names.join(", "))
    }
}

impl LayerBlockRule {
    /// `@layer a { … }`
    #[must_use]
    pub fn css_text(&self) -> String {
        match &self.name {
            Some(name) => format!("@layer {name} {}", rules_css_text(&self.rules)),
            None => format!("@layer {}", rules_css_text(&self.rules)),
        }
    }
}

impl CounterStyleRule {
    /// `@counter-style name { descriptor: value; … }`
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut text = format!("@counter-style {} {{", self.name);
        for (descriptor, value) in &self.descriptors {
            text.push_str(&format!(" {descriptor}: {};", value.css_text()));
        }
        text.push_str(" }");
        text
    }
}

impl ScopeRule {
    /// `@scope (start) to (end) { … }`
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut text = "@scope".to_owned();
        if let Some(start) = &self.start {
            text.push_str(&format!(" ({start})"));
        }
        if let Some(end) = &self.end {
            text.push_str(&format!(" to ({end})"));
        }
        text.push(' ');
        text.push_str(&rules_css_text(&self.rules));
        text
    }
}

impl AtRule {
    /// The rule as written, with nested rules re-serialized.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut text = format!("@{}", self.name);
        if !self.prelude.is_empty() {
            text.push(' ');
            text.push_str(&self.prelude);
        }
        match (&self.rules, &self.block) {
            (Some(rules), _) => {
                text.push(' ');
                text.push_str(&rules_css_text(rules));
            }
            (None, Some(block)) => text.push_str(&format!(" {{ {block} }}")),
            (None, None) => text.push(';'),
        }
        text
    }
}

/// Build the rule for `@name prelude` with an optional block. Returns
/// `None` for an invalid rule, which is dropped.
pub fn parse_at_rule(
    name: &str,
    prelude: &[CSSToken],
    block: Option<TokenStream<'_>>,
    context: &ParserContext,
) -> Option<Rule> {
    let prelude = trim_whitespace(prelude);
    let lower = name.to_ascii_lowercase();
    let rule = match lower.as_str() {
        "layer" => parse_layer(prelude, block, context),
        "counter-style" => block
            .and_then(|block| parse_counter_style(prelude, block, context))
            .map(Rule::CounterStyle),
        "scope" => block
            .and_then(|block| parse_scope(prelude, block, context))
            .map(Rule::Scope),
        _ => {
            let grouping = GROUPING_RULES.contains(&lower.as_str());
            if !grouping && !KNOWN_RULES.contains(&lower.as_str()) && context.report_dropped_declarations {
                let _ = warn_once("CSS", &format!("unsupported at-rule '@{name}' kept as written"));
            }
            let (rules, block) = match block {
                Some(block) if grouping => (Some(parse_rule_list(block, context)), None),
                Some(block) => (None, Some(serialize_tokens(trim_whitespace(block.remaining())))),
                None => (None, None),
            };
            Some(Rule::At(AtRule {
                name: lower,
                prelude: serialize_tokens(prelude),
                rules,
                block,
            }))
        }
    };
    if rule.is_none() && context.report_dropped_declarations {
        let _ = warn_once("CSS", &format!("dropped invalid '@{name}' rule"));
    }
    rule
}

fn consume_layer_name(stream: &mut TokenStream<'_>) -> Option<LayerName> {
    let mut guard = stream.save();
    let mut parts = Vec::new();
    loop {
        let CSSToken::Ident(part) = guard.peek() else {
            return None;
        };
        if part.parse::<CssWideKeyword>().is_ok() {
            return None;
        }
        parts.push(part.clone());
        let _ = guard.consume();
        if matches!(guard.peek(), CSSToken::Delim('.')) && matches!(guard.peek_at(1), CSSToken::Ident(_)) {
            let _ = guard.consume();
            continue;
        }
        break;
    }
    guard.consume_whitespace();
    guard.release();
    Some(LayerName(parts))
}

/// [CSS Cascade 5 § 6.4.2](https://www.w3.org/TR/css-cascade-5/#layering)
///
/// "`@layer <layer-name>? { <rule-list> }`" and "`@layer <layer-name>#;`"
fn parse_layer(
    prelude: &[CSSToken],
    block: Option<TokenStream<'_>>,
    context: &ParserContext,
) -> Option<Rule> {
    let mut stream = TokenStream::new(prelude);
    let Some(block) = block else {
        let mut names = vec![consume_layer_name(&mut stream)?];
        while matches!(stream.peek(), CSSToken::Comma) {
            let _ = stream.consume_including_whitespace();
            names.push(consume_layer_name(&mut stream)?);
        }
        return stream
            .at_end()
            .then_some(Rule::LayerStatement(LayerStatementRule { names }));
    };
    let name = if stream.at_end() {
        None
    } else {
        Some(consume_layer_name(&mut stream)?)
    };
    if !stream.at_end() {
        return None;
    }
    Some(Rule::LayerBlock(LayerBlockRule {
        name,
        rules: parse_rule_list(block, context),
    }))
}

/// [CSS Counter Styles 3 § 3](https://www.w3.org/TR/css-counter-styles-3/#the-counter-style-rule)
///
/// "`@counter-style <counter-style-name> { <declaration-list> }`"
///
/// "The `<counter-style-name>` must not be an ASCII case-insensitive match
/// for "decimal", "disc", "square", "circle", "disclosure-open", and
/// "disclosure-closed"; if it is, the `@counter-style` is invalid."
fn parse_counter_style(
    prelude: &[CSSToken],
    mut block: TokenStream<'_>,
    context: &ParserContext,
) -> Option<CounterStyleRule> {
    let [CSSToken::Ident(name)] = prelude else {
        return None;
    };
    if !is_counter_style_name(name) {
        return None;
    }
    let predefined = PREDEFINED_COUNTER_STYLES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name));
    if predefined && context.mode != ParserMode::UASheet {
        return None;
    }

    let mut rule = CounterStyleRule {
        name: name.clone(),
        descriptors: Vec::new(),
    };
    while !block.at_end() {
        if matches!(block.peek(), CSSToken::Whitespace | CSSToken::Semicolon) {
            let _ = block.consume();
            continue;
        }
        let declaration = block.consume_until_top_level(|token| matches!(token, CSSToken::Semicolon));
        let Some((descriptor, value)) = parse_descriptor(declaration, context) else {
            if context.report_dropped_declarations {
                let text = serialize_tokens(trim_whitespace(declaration));
                let _ = warn_once("CSS", &format!("dropped counter-style descriptor '{text}'"));
            }
            continue;
        };
        match rule
            .descriptors
            .iter_mut()
            .find(|(existing, _)| *existing == descriptor)
        {
            Some(entry) => entry.1 = value,
            None => rule.descriptors.push((descriptor, value)),
        }
    }
    Some(rule)
}

/// "`<counter-style-name>` is a `<custom-ident>` that is not an ASCII
/// case-insensitive match for `none`."
fn is_counter_style_name(name: &str) -> bool {
    !is_reserved_ident(name) && !name.eq_ignore_ascii_case("none")
}

fn consume_counter_style_name(stream: &mut TokenStream<'_>) -> Option<Rc<CSSValue>> {
    match stream.peek() {
        CSSToken::Ident(name) if is_counter_style_name(name) => consume_custom_ident(stream),
        _ => None,
    }
}

/// [§ 3.2](https://www.w3.org/TR/css-counter-styles-3/#typedef-symbol)
///
/// "`<symbol> = <string> | <image> | <custom-ident>`"
fn consume_symbol(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Rc<CSSValue>> {
    consume_string(stream)
        .or_else(|| consume_image(stream, context))
        .or_else(|| consume_custom_ident(stream))
}

/// `<integer [0,∞]> && <symbol>`, integer first.
fn consume_weighted_symbol(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<(f64, Rc<CSSValue>)> {
    let mut guard = stream.save();
    let (weight, symbol) = match consume_integer(&mut guard, context, 0.0) {
        Some(weight) => (weight, consume_symbol(&mut guard, context)?),
        None => {
            let symbol = consume_symbol(&mut guard, context)?;
            (consume_integer(&mut guard, context, 0.0)?, symbol)
        }
    };
    guard.release();
    let value = weight.get_double_value();
    Some((value, CSSValue::space_list(vec![weight, symbol])))
}

/// One `name: value` descriptor declaration.
fn parse_descriptor(
    declaration: &[CSSToken],
    context: &ParserContext,
) -> Option<(CounterStyleDescriptor, Rc<CSSValue>)> {
    let mut stream = TokenStream::new(declaration);
    stream.consume_whitespace();
    let CSSToken::Ident(name) = stream.consume_including_whitespace() else {
        return None;
    };
    let descriptor: CounterStyleDescriptor = name.parse().ok()?;
    if !matches!(stream.consume_including_whitespace(), CSSToken::Colon) {
        return None;
    }
    let (value, important) = strip_important(stream.remaining());
    if important || value.is_empty() {
        return None;
    }
    let mut stream = TokenStream::new(value);
    let value = consume_descriptor_value(descriptor, &mut stream, context)?;
    stream.at_end().then_some((descriptor, value))
}

fn consume_descriptor_value(
    descriptor: CounterStyleDescriptor,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    use CounterStyleDescriptor as D;

    let pool = context.pool();
    match descriptor {
        // "`cyclic | numeric | alphabetic | symbolic | additive | [fixed
        // <integer>?] | [ extends <counter-style-name> ]`"
        D::System => {
            let CSSToken::Ident(keyword) = stream.peek() else {
                return None;
            };
            let keyword = keyword.to_ascii_lowercase();
            let simple = ["cyclic", "numeric", "alphabetic", "symbolic", "additive"];
            let _ = stream.consume_including_whitespace();
            if simple.contains(&keyword.as_str()) {
                return Some(pool.identifier(&keyword));
            }
            let argument = match keyword.as_str() {
                "fixed" => consume_integer(stream, context, f64::from(i32::MIN)),
                "extends" => Some(consume_counter_style_name(stream)?),
                _ => return None,
            };
            Some(match argument {
                Some(argument) => CSSValue::space_list(vec![pool.identifier(&keyword), argument]),
                None => pool.identifier(&keyword),
            })
        }
        // "`<symbol>+`"
        D::Symbols => {
            let mut symbols = Vec::new();
            while let Some(symbol) = consume_symbol(stream, context) {
                symbols.push(symbol);
            }
            if symbols.is_empty() {
                return None;
            }
            Some(single_or_space_list(symbols))
        }
        // "`[ <integer [0,∞]> && <symbol> ]#`", weights strictly decreasing.
        D::AdditiveSymbols => {
            let mut tuples = Vec::new();
            let mut previous = f64::INFINITY;
            loop {
                let (weight, tuple) = consume_weighted_symbol(stream, context)?;
                if weight >= previous {
                    return None;
                }
                previous = weight;
                tuples.push(tuple);
                if !matches!(stream.peek(), CSSToken::Comma) {
                    break;
                }
                let _ = stream.consume_including_whitespace();
            }
            Some(CSSValue::comma_list(tuples))
        }
        // "`<symbol> <symbol>?`"
        D::Negative => {
            let first = consume_symbol(stream, context)?;
            Some(match consume_symbol(stream, context) {
                Some(second) => CSSValue::space_list(vec![first, second]),
                None => first,
            })
        }
        D::Prefix | D::Suffix => consume_symbol(stream, context),
        // "`[ [ <integer> | infinite ]{2} ]# | auto`"
        D::Range => {
            if stream.peek().is_ident("auto") {
                let _ = stream.consume_including_whitespace();
                return Some(pool.identifier("auto"));
            }
            let mut ranges = Vec::new();
            loop {
                let (lower, lower_value) = consume_range_bound(stream, context, f64::NEG_INFINITY)?;
                let (upper, upper_value) = consume_range_bound(stream, context, f64::INFINITY)?;
                // "If the lower bound of any range is higher than the upper
                // bound, the entire descriptor is invalid."
                if lower > upper {
                    return None;
                }
                ranges.push(CSSValue::space_list(vec![lower_value, upper_value]));
                if !matches!(stream.peek(), CSSToken::Comma) {
                    break;
                }
                let _ = stream.consume_including_whitespace();
            }
            Some(CSSValue::comma_list(ranges))
        }
        // "`<integer [0,∞]> && <symbol>`"
        D::Pad => consume_weighted_symbol(stream, context).map(|(_, tuple)| tuple),
        D::Fallback => consume_counter_style_name(stream),
        // "`auto | bullets | numbers | words | spell-out | <counter-style-name>`"
        D::SpeakAs => {
            let keywords = ["auto", "bullets", "numbers", "words", "spell-out"];
            match stream.peek() {
                CSSToken::Ident(keyword)
                    if keywords.iter().any(|known| known.eq_ignore_ascii_case(keyword)) =>
                {
                    let value = pool.identifier(keyword);
                    let _ = stream.consume_including_whitespace();
                    Some(value)
                }
                _ => consume_counter_style_name(stream),
            }
        }
    }
}

/// `<integer> | infinite`, with `infinite` read as `infinite_value`.
fn consume_range_bound(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    infinite_value: f64,
) -> Option<(f64, Rc<CSSValue>)> {
    if stream.peek().is_ident("infinite") {
        let _ = stream.consume_including_whitespace();
        return Some((infinite_value, context.pool().identifier("infinite")));
    }
    let value = consume_integer(stream, context, f64::from(i32::MIN))?;
    Some((value.get_double_value(), value))
}

/// The selector list inside a `( … )` block, trimmed. Empty lists are
/// invalid.
fn consume_scope_selector(stream: &mut TokenStream<'_>) -> Option<String> {
    if !matches!(stream.peek(), CSSToken::LeftParen) {
        return None;
    }
    let inner = stream.consume_block();
    stream.consume_whitespace();
    let text = serialize_tokens(trim_whitespace(inner.remaining()));
    (!text.is_empty()).then_some(text)
}

/// [CSS Cascade 6 § 2.5.1](https://www.w3.org/TR/css-cascade-6/#scope-syntax)
///
/// "`@scope [(<scope-start>)]? [to (<scope-end>)]? { <rule-list> }`"
fn parse_scope(
    prelude: &[CSSToken],
    block: TokenStream<'_>,
    context: &ParserContext,
) -> Option<ScopeRule> {
    let mut stream = TokenStream::new(prelude);
    let start = if matches!(stream.peek(), CSSToken::LeftParen) {
        Some(consume_scope_selector(&mut stream)?)
    } else {
        None
    };
    let end = if stream.peek().is_ident("to") {
        let _ = stream.consume_including_whitespace();
        Some(consume_scope_selector(&mut stream)?)
    } else {
        None
    };
    if !stream.at_end() {
        return None;
    }
    Some(ScopeRule {
        start,
        end,
        rules: parse_rule_list(block, context),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn descriptor(name: &str, value: &str) -> Option<String> {
        let context = ParserContext::new();
        let tokens = tokenize(&format!("{name}: {value}"));
        parse_descriptor(&tokens, &context).map(|(_, value)| value.css_text())
    }

    #[test]
    fn system_descriptor() {
        assert_eq!(descriptor("system", "Cyclic").as_deref(), Some("cyclic"));
        assert_eq!(descriptor("system", "fixed 3").as_deref(), Some("fixed 3"));
        assert_eq!(descriptor("system", "extends decimal").as_deref(), Some("extends decimal"));
        assert!(descriptor("system", "extends none").is_none());
        assert!(descriptor("system", "cyclic 2").is_none());
    }

    #[test]
    fn additive_weights_must_decrease() {
        assert_eq!(
            descriptor("additive-symbols", "10 X, 5 V, I 1").as_deref(),
            Some("10 X, 5 V, 1 I")
        );
        assert!(descriptor("additive-symbols", "1 I, 5 V").is_none());
    }

    #[test]
    fn range_bounds_are_ordered() {
        assert_eq!(descriptor("range", "infinite 10, 20 30").as_deref(), Some("infinite 10, 20 30"));
        assert!(descriptor("range", "10 1").is_none());
        assert_eq!(descriptor("range", "AUTO").as_deref(), Some("auto"));
    }

    #[test]
    fn important_descriptors_are_dropped() {
        assert!(descriptor("prefix", "'a' !important").is_none());
        assert!(descriptor("colour", "red").is_none());
    }
}
