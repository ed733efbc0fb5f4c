//! Recursive-descent parser for math functions.
//!
//! [CSS Values 4 § 10.1 Syntax](https://www.w3.org/TR/css-values-4/#calc-syntax)
//!
//! ```text
//! <calc-sum>     = <calc-product> [ [ '+' | '-' ] <calc-product> ]*
//! <calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*
//! <calc-value>   = <number> | <dimension> | <percentage> |
//!                  <calc-keyword> | ( <calc-sum> )
//! ```

use std::rc::Rc;

use super::category::CalculationResultCategory;
use super::node::{MathNode, MathOperator};
use super::simplify;
use crate::parser::stream::TokenStream;
use crate::tokenizer::CSSToken;
use crate::units::UnitType;

/// Nesting limit for parenthesized expressions and nested functions.
pub const MAX_EXPRESSION_DEPTH: usize = 100;

/// Names of every math function the parser understands.
const MATH_FUNCTIONS: &[&str] = &[
    "calc",
    "-webkit-calc",
    "min",
    "max",
    "clamp",
    "sin",
    "cos",
    "tan",
    "asin",
    "acos",
    "atan",
    "atan2",
    "pow",
    "sqrt",
    "hypot",
    "log",
    "exp",
    "round",
    "mod",
    "rem",
    "abs",
    "sign",
    "progress",
];

/// True if `name` is a math function, ignoring ASCII case.
#[must_use]
pub fn is_math_function_name(name: &str) -> bool {
    MATH_FUNCTIONS
        .iter()
        .any(|function| function.eq_ignore_ascii_case(name))
}

/// True if the next token opens a math function.
#[must_use]
pub fn at_math_function(stream: &TokenStream<'_>) -> bool {
    matches!(stream.peek(), CSSToken::Function(name) if is_math_function_name(name))
}

/// Parse the math function that starts at the next token.
///
/// On success the stream is left after the function and any trailing
/// whitespace. On failure nothing is consumed. The category of the result
/// is not checked; callers decide which categories their grammar accepts.
pub fn parse_math_function(
    stream: &mut TokenStream<'_>,
    allow_percent: bool,
) -> Option<Rc<MathNode>> {
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    if !is_math_function_name(name) {
        return None;
    }
    let name = name.to_ascii_lowercase();
    let mut guard = stream.save();
    let mut arguments = guard.consume_block();
    guard.consume_whitespace();
    arguments.consume_whitespace();
    let parser = MathParser { allow_percent };
    let node = parser.parse_function(&name, &mut arguments, 0)?;
    guard.release();
    Some(node)
}

struct MathParser {
    allow_percent: bool,
}

impl MathParser {
    fn parse_function(
        &self,
        name: &str,
        arguments: &mut TokenStream<'_>,
        depth: usize,
    ) -> Option<Rc<MathNode>> {
        if name == "progress" {
            return self.parse_progress(arguments, depth);
        }

        let (min_arguments, max_arguments) = match name {
            "calc" | "-webkit-calc" | "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "sqrt"
            | "exp" | "abs" | "sign" => (1, 1),
            "min" | "max" => (1, usize::MAX),
            "clamp" => (3, 3),
            "pow" | "mod" | "rem" | "atan2" => (2, 2),
            "hypot" => (1, MAX_EXPRESSION_DEPTH),
            "log" => (1, 2),
            "round" => (1, 3),
            _ => return None,
        };

        let mut rounding = None;
        if name == "round" {
            if let CSSToken::Ident(keyword) = arguments.peek() {
                rounding = MathOperator::from_rounding_strategy(keyword);
                if rounding.is_some() {
                    let _ = arguments.consume_including_whitespace();
                }
            }
        }

        let mut nodes = Vec::new();
        let counted = |nodes: &[Rc<MathNode>]| nodes.len() + usize::from(rounding.is_some());
        while !arguments.at_end() && counted(&nodes) < max_arguments {
            if counted(&nodes) > 0 {
                if !matches!(arguments.peek(), CSSToken::Comma) {
                    return None;
                }
                let _ = arguments.consume_including_whitespace();
            }
            arguments.consume_whitespace();
            nodes.push(self.parse_value_expression(arguments, depth)?);
        }
        if !arguments.at_end() || counted(&nodes) < min_arguments {
            return None;
        }

        match name {
            "calc" | "-webkit-calc" => nodes.pop(),
            "min" => simplify::comparison(MathOperator::Min, nodes),
            "max" => simplify::comparison(MathOperator::Max, nodes),
            "clamp" => simplify::comparison(MathOperator::Clamp, nodes),
            "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "atan2" => {
                simplify::trigonometric(name, &nodes)
            }
            "pow" | "sqrt" | "hypot" | "log" | "exp" => simplify::exponential(name, nodes),
            "round" => {
                // "If the type of A matches <number>, then B may be omitted,
                // and defaults to 1; omitting B is otherwise invalid."
                if nodes.len() == 1 {
                    if nodes[0].category() != CalculationResultCategory::Number {
                        return None;
                    }
                    nodes.push(MathNode::number(1.0));
                }
                simplify::stepped(rounding.unwrap_or(MathOperator::RoundNearest), nodes)
            }
            "mod" => simplify::stepped(MathOperator::Mod, nodes),
            "rem" => simplify::stepped(MathOperator::Rem, nodes),
            "abs" => simplify::sign_related(MathOperator::Abs, nodes),
            "sign" => simplify::sign_related(MathOperator::Sign, nodes),
            _ => None,
        }
    }

    /// `progress(<calc-sum> from <calc-sum> to <calc-sum>)`
    fn parse_progress(&self, arguments: &mut TokenStream<'_>, depth: usize) -> Option<Rc<MathNode>> {
        let value = self.parse_value_expression(arguments, depth)?;
        if !arguments.consume_including_whitespace().is_ident("from") {
            return None;
        }
        let start = self.parse_value_expression(arguments, depth)?;
        if !arguments.consume_including_whitespace().is_ident("to") {
            return None;
        }
        let end = self.parse_value_expression(arguments, depth)?;
        if !arguments.at_end() {
            return None;
        }
        simplify::progress(vec![value, start, end])
    }

    fn parse_value_expression(
        &self,
        tokens: &mut TokenStream<'_>,
        depth: usize,
    ) -> Option<Rc<MathNode>> {
        let depth = depth + 1;
        if depth > MAX_EXPRESSION_DEPTH {
            return None;
        }
        self.parse_additive(tokens, depth)
    }

    /// `<calc-sum>`
    ///
    /// "White space is required on both sides of the + and - operators."
    fn parse_additive(&self, tokens: &mut TokenStream<'_>, depth: usize) -> Option<Rc<MathNode>> {
        if tokens.at_end() {
            return None;
        }
        let mut result = self.parse_multiplicative(tokens, depth)?;
        while !tokens.at_end() {
            let op = match tokens.peek() {
                CSSToken::Delim('+') => MathOperator::Add,
                CSSToken::Delim('-') => MathOperator::Subtract,
                _ => break,
            };
            if !tokens.previous().is_whitespace() {
                return None;
            }
            let _ = tokens.consume();
            if !tokens.peek().is_whitespace() {
                return None;
            }
            tokens.consume_whitespace();
            let right = self.parse_multiplicative(tokens, depth)?;
            result = simplify::arithmetic_simplified(result, right, op)?;
        }
        if result.is_add_or_subtract() {
            result = simplify::simplify_sum(&result);
        }
        Some(result)
    }

    /// `<calc-product>`
    fn parse_multiplicative(
        &self,
        tokens: &mut TokenStream<'_>,
        depth: usize,
    ) -> Option<Rc<MathNode>> {
        if tokens.at_end() {
            return None;
        }
        let mut result = self.parse_term(tokens, depth)?;
        while !tokens.at_end() {
            let op = match tokens.peek() {
                CSSToken::Delim('*') => MathOperator::Multiply,
                CSSToken::Delim('/') => MathOperator::Divide,
                _ => break,
            };
            let _ = tokens.consume_including_whitespace();
            let right = self.parse_term(tokens, depth)?;
            result = simplify::arithmetic_simplified(result, right, op)?;
        }
        Some(result)
    }

    /// A parenthesized sum, a nested function or a single value.
    fn parse_term(&self, tokens: &mut TokenStream<'_>, depth: usize) -> Option<Rc<MathNode>> {
        let token = tokens.peek();
        if matches!(token, CSSToken::LeftParen)
            || token.is_function("calc")
            || token.is_function("-webkit-calc")
        {
            let mut inner = tokens.consume_block();
            tokens.consume_whitespace();
            inner.consume_whitespace();
            let mut result = self.parse_value_expression(&mut inner, depth)?;
            if !inner.at_end() {
                return None;
            }
            MathNode::set_nested_calc(&mut result);
            return Some(result);
        }
        if let CSSToken::Function(name) = token {
            let name = name.to_ascii_lowercase();
            let mut inner = tokens.consume_block();
            tokens.consume_whitespace();
            inner.consume_whitespace();
            return self.parse_function(&name, &mut inner, depth);
        }
        self.parse_value(tokens)
    }

    /// `<calc-value>` other than a parenthesized sum.
    fn parse_value(&self, tokens: &mut TokenStream<'_>) -> Option<Rc<MathNode>> {
        let token = tokens.consume_including_whitespace();
        if let CSSToken::Ident(keyword) = token {
            let value = match keyword.to_ascii_lowercase().as_str() {
                "infinity" => f64::INFINITY,
                "-infinity" => f64::NEG_INFINITY,
                "nan" => f64::NAN,
                "pi" => core::f64::consts::PI,
                "e" => core::f64::consts::E,
                _ => return None,
            };
            return Some(MathNode::number(value));
        }
        let accepted = match token {
            CSSToken::Number { .. } | CSSToken::Dimension { .. } => true,
            CSSToken::Percentage { .. } => self.allow_percent,
            _ => false,
        };
        if !accepted {
            return None;
        }
        let unit = token.unit_type()?;
        if unit == UnitType::Unknown || unit == UnitType::Fraction {
            return None;
        }
        Some(MathNode::literal(token.numeric_value()?, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(input: &str) -> Option<Rc<MathNode>> {
        let tokens = tokenize(input);
        let mut stream = TokenStream::new(&tokens);
        parse_math_function(&mut stream, true)
    }

    #[test]
    fn failure_consumes_nothing() {
        let tokens = tokenize("calc(1px +) 2px");
        let mut stream = TokenStream::new(&tokens);
        assert!(parse_math_function(&mut stream, true).is_none());
        assert!(stream.peek().is_function("calc"));
    }

    #[test]
    fn operators_need_surrounding_whitespace() {
        assert!(parse("calc(1px+2px)").is_none());
        assert!(parse("calc(1px +2px)").is_none());
        assert!(parse("calc(1px + 2px)").is_some());
    }

    #[test]
    fn depth_limit_rejects_deep_nesting() {
        let deep = format!("calc({}1px{})", "(".repeat(120), ")".repeat(120));
        assert!(parse(&deep).is_none());
        let shallow = format!("calc({}1px{})", "(".repeat(20), ")".repeat(20));
        assert!(parse(&shallow).is_some());
    }

    #[test]
    fn percent_can_be_disallowed() {
        let tokens = tokenize("calc(10% + 1px)");
        let mut stream = TokenStream::new(&tokens);
        assert!(parse_math_function(&mut stream, false).is_none());
    }

    #[test]
    fn unknown_units_and_functions_fail() {
        assert!(parse("calc(1foo)").is_none());
        assert!(parse("calc(foo(1px))").is_none());
        assert!(parse("clamp(1px, 2px)").is_none());
    }
}
