//! The math expression tree.
//!
//! [CSS Values 4 § 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)

use std::rc::Rc;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use super::category::CalculationResultCategory;
use crate::units::{LengthTypeFlags, UnitCategory, UnitType};
use crate::values::math_function::clamp_to_float_range;
use crate::values::numeric::NumericValue;

/// An operator or math function in an expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
pub enum MathOperator {
    /// `+`
    #[strum(serialize = "+")]
    Add,
    /// `-`
    #[strum(serialize = "-")]
    Subtract,
    /// `*`
    #[strum(serialize = "*")]
    Multiply,
    /// `/`
    #[strum(serialize = "/")]
    Divide,
    /// `min()`
    #[strum(serialize = "min")]
    Min,
    /// `max()`
    #[strum(serialize = "max")]
    Max,
    /// `clamp()`
    #[strum(serialize = "clamp")]
    Clamp,
    /// `round(nearest, …)`
    #[strum(serialize = "round")]
    RoundNearest,
    /// `round(up, …)`
    #[strum(serialize = "round")]
    RoundUp,
    /// `round(down, …)`
    #[strum(serialize = "round")]
    RoundDown,
    /// `round(to-zero, …)`
    #[strum(serialize = "round")]
    RoundToZero,
    /// `mod()`
    #[strum(serialize = "mod")]
    Mod,
    /// `rem()`
    #[strum(serialize = "rem")]
    Rem,
    /// `hypot()`
    #[strum(serialize = "hypot")]
    Hypot,
    /// `abs()`
    #[strum(serialize = "abs")]
    Abs,
    /// `sign()`
    #[strum(serialize = "sign")]
    Sign,
    /// `progress()`
    #[strum(serialize = "progress")]
    Progress,
}

impl MathOperator {
    /// True for `+` and `-`.
    #[must_use]
    pub const fn is_add_or_subtract(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// True for `*` and `/`.
    #[must_use]
    pub const fn is_multiply_or_divide(self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// The `<rounding-strategy>` keyword of a `round()` operator.
    #[must_use]
    pub const fn rounding_strategy(self) -> Option<&'static str> {
        match self {
            Self::RoundNearest => Some("nearest"),
            Self::RoundUp => Some("up"),
            Self::RoundDown => Some("down"),
            Self::RoundToZero => Some("to-zero"),
            _ => None,
        }
    }

    /// Parse a `<rounding-strategy>` keyword.
    #[must_use]
    pub fn from_rounding_strategy(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "nearest" => Some(Self::RoundNearest),
            "up" => Some(Self::RoundUp),
            "down" => Some(Self::RoundDown),
            "to-zero" => Some(Self::RoundToZero),
            _ => None,
        }
    }
}

/// An operator applied to one or more operands.
#[derive(Debug, Clone)]
pub struct MathOperation {
    /// The operator
    pub op: MathOperator,
    /// Operands in source order; exactly two for arithmetic operators
    pub operands: Vec<Rc<MathNode>>,
    /// What the operation resolves to
    pub category: CalculationResultCategory,
    /// Set when the operation was written inside parentheses or a nested
    /// `calc()`, which changes how a leading `-` distributes over it.
    pub is_nested_calc: bool,
}

impl PartialEq for MathOperation {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.category == other.category && self.operands == other.operands
    }
}

/// A node of a math expression tree. Nodes are immutable once built and
/// shared between parents through [`Rc`].
#[derive(Debug, Clone, PartialEq)]
pub enum MathNode {
    /// A numeric literal.
    Literal(NumericValue),
    /// An operator or function.
    Operation(MathOperation),
}

impl MathNode {
    /// A literal node. Dimensions that convert to their canonical unit
    /// without outside information are stored canonically.
    ///
    /// [§ 10.10 Simplification](https://www.w3.org/TR/css-values-4/#calc-simplification)
    ///
    /// "If root is a dimension that is not expressed in its canonical unit,
    /// and there is enough information available to convert it to the
    /// canonical unit, do so, and return the value."
    ///
    /// Finite values are clamped to the range of an `f32`, like literals
    /// outside math functions, so a folded result reads back unchanged.
    #[must_use]
    pub fn literal(value: f64, unit: UnitType) -> Rc<Self> {
        let numeric = NumericValue::new(value, unit);
        let mut numeric = if matches!(unit, UnitType::Number | UnitType::Integer) {
            numeric
        } else {
            numeric.to_canonical()
        };
        if numeric.value.is_finite() {
            numeric.value = clamp_to_float_range(numeric.value);
        }
        Rc::new(Self::Literal(numeric))
    }

    /// A unitless literal.
    #[must_use]
    pub fn number(value: f64) -> Rc<Self> {
        Self::literal(value, UnitType::Number)
    }

    /// An operation node with an already computed category.
    #[must_use]
    pub fn operation(
        op: MathOperator,
        operands: Vec<Rc<Self>>,
        category: CalculationResultCategory,
    ) -> Rc<Self> {
        Rc::new(Self::Operation(MathOperation {
            op,
            operands,
            category,
            is_nested_calc: false,
        }))
    }

    /// The literal value, if this is a literal.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&NumericValue> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Operation(_) => None,
        }
    }

    /// The operation, if this is not a literal.
    #[must_use]
    pub const fn as_operation(&self) -> Option<&MathOperation> {
        match self {
            Self::Literal(_) => None,
            Self::Operation(operation) => Some(operation),
        }
    }

    /// True for literal nodes.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// True for `+`/`-` operation nodes.
    #[must_use]
    pub fn is_add_or_subtract(&self) -> bool {
        self.as_operation()
            .is_some_and(|operation| operation.op.is_add_or_subtract())
    }

    /// True if this node was parenthesized or written as a nested `calc()`.
    #[must_use]
    pub const fn is_nested_calc(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Operation(operation) => operation.is_nested_calc,
        }
    }

    /// Mark the node as parenthesized. Literals are unaffected.
    pub fn set_nested_calc(node: &mut Rc<Self>) {
        if let Self::Operation(operation) = Rc::make_mut(node) {
            operation.is_nested_calc = true;
        }
    }

    /// What the node resolves to.
    #[must_use]
    pub const fn category(&self) -> CalculationResultCategory {
        match self {
            Self::Literal(value) => CalculationResultCategory::from_unit(value.unit),
            Self::Operation(operation) => operation.category,
        }
    }

    /// A literal `<number>`.
    #[must_use]
    pub fn is_number_literal(&self) -> bool {
        self.is_literal() && self.category() == CalculationResultCategory::Number
    }

    /// The single unit the node resolves in, or [`UnitType::Unknown`] when
    /// its operands mix units.
    #[must_use]
    pub fn resolved_unit(&self) -> UnitType {
        let operation = match self {
            Self::Literal(value) => return value.unit,
            Self::Operation(operation) => operation,
        };
        match operation.category {
            CalculationResultCategory::Number => return UnitType::Number,
            CalculationResultCategory::LengthFunction
            | CalculationResultCategory::IntrinsicSize
            | CalculationResultCategory::Other => return UnitType::Unknown,
            _ => {}
        }
        match operation.op {
            MathOperator::Multiply | MathOperator::Divide => {
                let [left, right] = operation.operands.as_slice() else {
                    return UnitType::Unknown;
                };
                if left.category() == CalculationResultCategory::Number {
                    right.resolved_unit()
                } else if right.category() == CalculationResultCategory::Number {
                    left.resolved_unit()
                } else {
                    UnitType::Unknown
                }
            }
            MathOperator::Sign | MathOperator::Progress => UnitType::Number,
            _ => {
                let mut units = operation.operands.iter().map(|node| node.resolved_unit());
                let Some(first) = units.next() else {
                    return UnitType::Unknown;
                };
                if first != UnitType::Unknown && units.all(|unit| unit == first) {
                    first
                } else {
                    UnitType::Unknown
                }
            }
        }
    }

    /// Every length unit used anywhere in the tree.
    pub fn accumulate_length_unit_types(&self, types: &mut LengthTypeFlags) {
        match self {
            Self::Literal(value) => {
                if value.unit.is_length() {
                    let _ = types.insert(value.unit);
                }
            }
            Self::Operation(operation) => {
                for operand in &operation.operands {
                    operand.accumulate_length_unit_types(types);
                }
            }
        }
    }

    /// True if any literal in the tree satisfies `predicate`.
    #[must_use]
    pub fn any_unit(&self, predicate: &impl Fn(UnitType) -> bool) -> bool {
        match self {
            Self::Literal(value) => predicate(value.unit),
            Self::Operation(operation) => operation
                .operands
                .iter()
                .any(|operand| operand.any_unit(predicate)),
        }
    }

    /// True if the tree contains a percentage.
    #[must_use]
    pub fn has_percentage(&self) -> bool {
        matches!(
            self.category(),
            CalculationResultCategory::Percent | CalculationResultCategory::LengthFunction
        ) || self.any_unit(&|unit| unit == UnitType::Percentage)
    }

    /// [CSS Values 4 § 4.4](https://www.w3.org/TR/css-values-4/#computationally-independent)
    ///
    /// True if the tree needs no font or container information to compute.
    /// Viewport units count as independent.
    #[must_use]
    pub fn is_computationally_independent(&self) -> bool {
        !self.any_unit(&|unit| {
            unit.is_length() && unit.is_relative_unit() && !unit.is_viewport_percentage_length()
        })
    }

    /// True for a literal whose value converts to canonical units without
    /// outside information.
    #[must_use]
    pub fn can_eagerly_simplify(&self) -> bool {
        let Self::Literal(value) = self else {
            return false;
        };
        match self.category() {
            CalculationResultCategory::Number
            | CalculationResultCategory::Angle
            | CalculationResultCategory::Time
            | CalculationResultCategory::Frequency
            | CalculationResultCategory::Resolution => true,
            CalculationResultCategory::Length => !value.unit.is_relative_unit(),
            _ => false,
        }
    }

    /// The value of the literal as written, without conversion.
    #[must_use]
    pub fn literal_value(&self) -> Option<f64> {
        self.as_literal().map(|literal| literal.value)
    }
}

impl MathNode {
    /// True for operations serialized in function form, like `min(…)`.
    #[must_use]
    pub fn is_math_function(&self) -> bool {
        self.as_operation()
            .is_some_and(|operation| {
                !operation.op.is_add_or_subtract() && !operation.op.is_multiply_or_divide()
            })
    }

    /// Serialize as a complete CSS value: wrapped in `calc()` unless the
    /// root is already a function.
    ///
    /// [§ 10.12 Serialization](https://www.w3.org/TR/css-values-4/#calc-serialize)
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        if self.is_math_function() {
            self.write_expression(&mut out);
        } else {
            out.push_str("calc(");
            self.write_expression(&mut out);
            out.push(')');
        }
        out
    }

    /// Append the expression text, without any `calc()` wrapper, to `out`.
    pub fn write_expression(&self, out: &mut String) {
        let operation = match self {
            Self::Literal(value) => {
                value.write_css(out);
                return;
            }
            Self::Operation(operation) => operation,
        };
        let operands = operation.operands.as_slice();
        match operation.op {
            MathOperator::Add
            | MathOperator::Subtract
            | MathOperator::Multiply
            | MathOperator::Divide => {
                let [left, right] = operands else {
                    return;
                };
                let product = operation.op.is_multiply_or_divide();
                left.write_operand(out, product);
                out.push(' ');
                out.push_str(operation.op.into());
                out.push(' ');
                let right_needs_parens =
                    product || (operation.op == MathOperator::Subtract && right.is_nested_calc());
                right.write_operand(out, right_needs_parens);
            }
            MathOperator::RoundNearest
            | MathOperator::RoundUp
            | MathOperator::RoundDown
            | MathOperator::RoundToZero => {
                out.push_str("round(");
                if let Some(strategy) = operation.op.rounding_strategy() {
                    if operation.op != MathOperator::RoundNearest {
                        out.push_str(strategy);
                        out.push_str(", ");
                    }
                }
                if let Some(a) = operands.first() {
                    a.write_expression(out);
                }
                if let [a, b] = operands {
                    let implicit_step = a.category() == CalculationResultCategory::Number
                        && b.as_literal().is_some_and(|step| {
                            step.unit.category() == UnitCategory::Number
                                && (step.value - 1.0).abs() < f64::EPSILON
                        });
                    if !implicit_step {
                        out.push_str(", ");
                        b.write_expression(out);
                    }
                }
                out.push(')');
            }
            MathOperator::Progress => {
                out.push_str("progress(");
                let separators = ["", " from ", " to "];
                for (separator, operand) in separators.iter().zip(operands) {
                    out.push_str(separator);
                    operand.write_expression(out);
                }
                out.push(')');
            }
            _ => {
                out.push_str(operation.op.into());
                out.push('(');
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    operand.write_expression(out);
                }
                out.push(')');
            }
        }
    }

    /// Write an operand of an arithmetic operator, parenthesizing sums when
    /// `parenthesize_sums` is set.
    fn write_operand(&self, out: &mut String, parenthesize_sums: bool) {
        if parenthesize_sums && self.is_add_or_subtract() {
            out.push('(');
            self.write_expression(out);
            out.push(')');
        } else {
            self.write_expression(out);
        }
    }
}
