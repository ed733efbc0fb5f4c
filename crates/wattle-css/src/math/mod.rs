//! Math expressions: `calc()` and the other math functions.
//!
//! [CSS Values 4 § 10](https://www.w3.org/TR/css-values-4/#math)
//!
//! Parsing builds an immutable tree of [`MathNode`]s, simplifying while it
//! goes. Each node knows its [`CalculationResultCategory`]; grammar slots
//! accept a math function only when its category fits. Evaluation against a
//! [`LengthResolver`](crate::values::length::LengthResolver) happens when a
//! value is read, never while parsing.

/// Result categories and their algebra.
pub mod category;
/// Evaluation and resolution of trees.
pub mod eval;
/// Tree nodes and serialization.
pub mod node;
/// The math function parser.
pub mod parse;
/// Simplifying node constructors.
pub mod simplify;

pub use category::CalculationResultCategory;
pub use eval::{evaluate_operator, evaluate_stepped};
pub use node::{MathNode, MathOperation, MathOperator};
pub use parse::{MAX_EXPRESSION_DEPTH, at_math_function, is_math_function_name, parse_math_function};
