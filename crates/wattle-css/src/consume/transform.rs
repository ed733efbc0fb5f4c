//! [CSS Transforms 2 § 13](https://www.w3.org/TR/css-transforms-2/#transform-functions)
//!
//! Each transform function has a fixed list of argument slots. The first
//! `required` slots must be present; the rest are optional and, when given,
//! follow a comma.

use std::rc::Rc;

use super::{
    UnitlessQuirk, consume_angle, consume_ident_in, consume_length, consume_length_or_percent,
    consume_number, consume_number_or_percent,
};
use crate::parser::context::ParserContext;
use crate::parser::stream::TokenStream;
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, ValueRange};

/// The kind of value a transform argument slot takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformArgument {
    /// `<length-percentage>`
    LengthPercentage,
    /// `<length>`
    Length,
    /// `<number>`
    Number,
    /// `<number> | <percentage>`
    NumberOrPercent,
    /// `<angle>`, or a bare `0`
    Angle,
    /// `<length [0,∞]> | none`
    Perspective,
}

/// Argument slots of one transform function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformGrammar {
    /// Every slot, in order
    pub arguments: &'static [TransformArgument],
    /// How many leading slots must be present
    pub required: usize,
}

use TransformArgument as A;

const fn grammar(arguments: &'static [TransformArgument], required: usize) -> TransformGrammar {
    TransformGrammar {
        arguments,
        required,
    }
}

/// The grammar of the transform function `name` (lowercase).
#[must_use]
pub fn transform_grammar(name: &str) -> Option<TransformGrammar> {
    let grammar = match name {
        "matrix" => grammar(&[A::Number; 6], 6),
        "matrix3d" => grammar(&[A::Number; 16], 16),
        "translate" => grammar(&[A::LengthPercentage, A::LengthPercentage], 1),
        "translatex" | "translatey" => grammar(&[A::LengthPercentage], 1),
        "translatez" => grammar(&[A::Length], 1),
        "translate3d" => grammar(&[A::LengthPercentage, A::LengthPercentage, A::Length], 3),
        "scale" => grammar(&[A::NumberOrPercent, A::NumberOrPercent], 1),
        "scalex" | "scaley" | "scalez" => grammar(&[A::NumberOrPercent], 1),
        "scale3d" => grammar(&[A::NumberOrPercent; 3], 3),
        "rotate" | "rotatex" | "rotatey" | "rotatez" | "skewx" | "skewy" => {
            grammar(&[A::Angle], 1)
        }
        "rotate3d" => grammar(&[A::Number, A::Number, A::Number, A::Angle], 4),
        "skew" => grammar(&[A::Angle, A::Angle], 1),
        "perspective" => grammar(&[A::Perspective], 1),
        _ => return None,
    };
    Some(grammar)
}

fn consume_argument(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    kind: TransformArgument,
) -> Option<Rc<CSSValue>> {
    match kind {
        A::LengthPercentage => {
            consume_length_or_percent(stream, context, ValueRange::All, UnitlessQuirk::Forbid)
        }
        A::Length => consume_length(stream, context, ValueRange::All, UnitlessQuirk::Forbid),
        A::Number => consume_number(stream, context, ValueRange::All),
        A::NumberOrPercent => consume_number_or_percent(stream, context, ValueRange::All),
        A::Angle => consume_angle(stream, context),
        A::Perspective => {
            consume_length(stream, context, ValueRange::NonNegative, UnitlessQuirk::Forbid)
                .or_else(|| consume_ident_in(stream, context, &["none"]))
        }
    }
}

/// One transform function with arguments matching its grammar.
pub fn consume_transform_function(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    let name = name.to_ascii_lowercase();
    let grammar = transform_grammar(&name)?;
    let mut guard = stream.save();
    let mut arguments = guard.consume_block();
    arguments.consume_whitespace();
    let mut values = Vec::with_capacity(grammar.arguments.len());
    for (index, kind) in grammar.arguments.iter().enumerate() {
        if index > 0 {
            if !matches!(arguments.peek(), CSSToken::Comma) {
                if index < grammar.required {
                    return None;
                }
                break;
            }
            let _ = arguments.consume_including_whitespace();
        }
        values.push(consume_argument(&mut arguments, context, *kind)?);
    }
    if !arguments.at_end() {
        return None;
    }
    guard.consume_whitespace();
    guard.release();
    Some(Rc::new(CSSValue::Function {
        name,
        arguments: values,
    }))
}

/// `<transform-function>+`
pub fn consume_transform_list(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let mut functions = Vec::new();
    while matches!(stream.peek(), CSSToken::Function(_)) {
        functions.push(consume_transform_function(stream, context)?);
    }
    if functions.is_empty() {
        return None;
    }
    Some(CSSValue::space_list(functions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(text: &str) -> Option<String> {
        let context = ParserContext::new();
        let tokens = tokenize(text);
        let mut stream = TokenStream::new(&tokens);
        let value = consume_transform_list(&mut stream, &context)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn optional_arguments() {
        assert_eq!(parse("translate(1px)").as_deref(), Some("translate(1px)"));
        assert_eq!(parse("translate(1px, 50%)").as_deref(), Some("translate(1px, 50%)"));
        assert_eq!(parse("skew(10deg, 0)").as_deref(), Some("skew(10deg, 0deg)"));
        assert_eq!(parse("perspective(none)").as_deref(), Some("perspective(none)"));
    }

    #[test]
    fn arity_is_enforced() {
        assert!(parse("scale()").is_none());
        assert!(parse("translate(1px, 2px, 3px)").is_none());
        assert!(parse("translate3d(1px, 2px)").is_none());
        assert!(parse("matrix(1, 0, 0, 1, 0)").is_none());
        assert!(parse("rotate(10deg,)").is_none());
    }

    #[test]
    fn argument_kinds_are_enforced() {
        assert!(parse("rotate(red)").is_none());
        assert!(parse("rotate(10px)").is_none());
        assert!(parse("translate(10deg)").is_none());
        assert!(parse("translatez(10%)").is_none());
        assert!(parse("perspective(-1px)").is_none());
        assert!(parse("unknown(1px)").is_none());
    }
}
