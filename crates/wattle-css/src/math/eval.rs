//! Evaluation of math expression trees.
//!
//! [CSS Values 4 § 10.9 Range checking](https://www.w3.org/TR/css-values-4/#calc-range)
//!
//! Evaluation never fails: NaN and infinities flow through the arithmetic
//! and are clamped by the reader of the final value.

use super::category::CalculationResultCategory;
use super::node::{MathNode, MathOperation, MathOperator};
use crate::units::{LengthArray, UnitCategory, UnitType};
use crate::values::length::{LengthResolver, PixelsAndPercent};

/// Apply `op` to already evaluated operands.
///
/// Any NaN operand makes the result NaN.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn evaluate_operator(operands: &[f64], op: MathOperator) -> f64 {
    if let Some(nan) = operands.iter().copied().find(|value| value.is_nan()) {
        return nan;
    }
    let first = operands.first().copied().unwrap_or(f64::NAN);
    let second = operands.get(1).copied().unwrap_or(f64::NAN);
    match op {
        MathOperator::Add => first + second,
        MathOperator::Subtract => first - second,
        MathOperator::Multiply => first * second,
        MathOperator::Divide => first / second,
        MathOperator::Min => operands.iter().copied().reduce(min_signed).unwrap_or(f64::NAN),
        MathOperator::Max => operands.iter().copied().reduce(max_signed).unwrap_or(f64::NAN),
        MathOperator::Clamp => {
            let third = operands.get(2).copied().unwrap_or(f64::NAN);
            // clamp(MIN, VAL, MAX) = max(MIN, min(VAL, MAX))
            max_signed(first, min_signed(second, third))
        }
        MathOperator::RoundNearest
        | MathOperator::RoundUp
        | MathOperator::RoundDown
        | MathOperator::RoundToZero
        | MathOperator::Mod
        | MathOperator::Rem => evaluate_stepped(op, first, second),
        MathOperator::Hypot => operands.iter().fold(0.0, |total, value| total.hypot(*value)),
        MathOperator::Abs => first.abs(),
        MathOperator::Sign => signum(first),
        MathOperator::Progress => {
            let third = operands.get(2).copied().unwrap_or(f64::NAN);
            (first - second) / (third - second)
        }
    }
}

/// `min()` of two values where `-0` is smaller than `0`.
#[allow(clippy::float_cmp)]
fn min_signed(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 && a.is_sign_negative() != b.is_sign_negative() {
        -0.0
    } else {
        a.min(b)
    }
}

/// `max()` of two values where `0` is larger than `-0`.
#[allow(clippy::float_cmp)]
fn max_signed(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 && a.is_sign_negative() != b.is_sign_negative() {
        0.0
    } else {
        a.max(b)
    }
}

/// [§ 10.8.3 sign()](https://www.w3.org/TR/css-values-4/#sign-funcs)
///
/// Zeros keep their sign and NaN stays NaN.
#[must_use]
pub fn signum(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        value
    } else if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// [§ 10.5 Stepped value functions](https://www.w3.org/TR/css-values-4/#round-func)
///
/// `round()`, `mod()` and `rem()` with their infinity and zero rules.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn evaluate_stepped(op: MathOperator, a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match op {
        MathOperator::Mod => {
            if b == 0.0 || a.is_infinite() {
                return f64::NAN;
            }
            if b.is_infinite() {
                // "If A and B have the same sign the result is A, otherwise NaN."
                return if a == 0.0 || a.is_sign_negative() == b.is_sign_negative() {
                    a
                } else {
                    f64::NAN
                };
            }
            let remainder = a % b;
            if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                remainder + b
            } else {
                remainder
            }
        }
        MathOperator::Rem => {
            if b == 0.0 || a.is_infinite() {
                f64::NAN
            } else if b.is_infinite() {
                a
            } else {
                a % b
            }
        }
        _ => round_to_step(op, a, b),
    }
}

#[allow(clippy::float_cmp)]
fn round_to_step(op: MathOperator, a: f64, b: f64) -> f64 {
    if b == 0.0 || (a.is_infinite() && b.is_infinite()) {
        return f64::NAN;
    }
    if a.is_infinite() {
        return a;
    }
    let negative_zero_if = |negative: bool| if negative { -0.0 } else { 0.0 };
    if b.is_infinite() {
        return match op {
            MathOperator::RoundUp => {
                if a > 0.0 {
                    f64::INFINITY
                } else if a == 0.0 {
                    a
                } else {
                    -0.0
                }
            }
            MathOperator::RoundDown => {
                if a < 0.0 {
                    f64::NEG_INFINITY
                } else if a == 0.0 {
                    a
                } else {
                    0.0
                }
            }
            _ => negative_zero_if(a.is_sign_negative()),
        };
    }
    let step = b.abs();
    let lower = (a / step).floor() * step;
    if lower == a {
        return a;
    }
    let upper = lower + step;
    let rounded = match op {
        MathOperator::RoundUp => upper,
        MathOperator::RoundDown => lower,
        MathOperator::RoundToZero => {
            if a > 0.0 {
                lower
            } else {
                upper
            }
        }
        _ => {
            if a - lower < upper - a {
                lower
            } else {
                upper
            }
        }
    };
    if rounded == 0.0 {
        negative_zero_if(a < 0.0)
    } else {
        rounded
    }
}

impl MathOperation {
    /// The literal `<number>` operand of a `*` or `/`, with the other
    /// operand.
    fn number_side(&self) -> Option<(&MathNode, &MathNode)> {
        let [left, right] = self.operands.as_slice() else {
            return None;
        };
        if left.is_number_literal() {
            Some((left, right))
        } else if right.is_number_literal() {
            Some((right, left))
        } else {
            None
        }
    }

    fn evaluate(&self, operands: &[f64]) -> f64 {
        evaluate_operator(operands, self.op)
    }
}

impl MathNode {
    /// The value in the canonical unit of the node's category, or `None`
    /// when the tree contains relative lengths or mixes units.
    ///
    /// Only consults information available at parse time.
    #[must_use]
    pub fn compute_value_in_canonical_unit(&self) -> Option<f64> {
        match self {
            Self::Literal(value) => value.value_in_canonical_unit(),
            Self::Operation(operation) => {
                if !operation.category.has_canonical_unit() {
                    return None;
                }
                let values = operation
                    .operands
                    .iter()
                    .map(|operand| operand.compute_value_in_canonical_unit())
                    .collect::<Option<Vec<_>>>()?;
                Some(operation.evaluate(&values))
            }
        }
    }

    /// Like [`compute_value_in_canonical_unit`](Self::compute_value_in_canonical_unit)
    /// but resolving relative lengths to zoomed pixels through `resolver`.
    #[must_use]
    pub fn compute_value_in_canonical_unit_with(&self, resolver: &LengthResolver) -> Option<f64> {
        match self {
            Self::Literal(value) if value.unit.is_length() => {
                resolver.length_to_px(value.value, value.unit)
            }
            Self::Literal(value) => value.value_in_canonical_unit(),
            Self::Operation(operation) => {
                if !operation.category.has_canonical_unit() {
                    return None;
                }
                let values = operation
                    .operands
                    .iter()
                    .map(|operand| operand.compute_value_in_canonical_unit_with(resolver))
                    .collect::<Option<Vec<_>>>()?;
                Some(operation.evaluate(&values))
            }
        }
    }

    /// Evaluate the tree. Lengths resolve to pixels, angles to degrees,
    /// times to seconds, resolutions to dots per pixel and frequencies to
    /// hertz. Percentages evaluate to their raw value.
    #[must_use]
    pub fn compute_double(&self, resolver: &LengthResolver) -> f64 {
        match self {
            Self::Literal(value) => match value.unit.category() {
                UnitCategory::Length => resolver
                    .length_to_px(value.value, value.unit)
                    .unwrap_or(value.value),
                UnitCategory::Angle
                | UnitCategory::Time
                | UnitCategory::Frequency
                | UnitCategory::Resolution => value.value * value.unit.conversion_to_canonical(),
                UnitCategory::Number
                | UnitCategory::Percent
                | UnitCategory::Flex
                | UnitCategory::Other => value.value,
            },
            Self::Operation(operation) => {
                let values: Vec<f64> = operation
                    .operands
                    .iter()
                    .map(|operand| operand.compute_double(resolver))
                    .collect();
                operation.evaluate(&values)
            }
        }
    }

    /// The raw value of a literal, or the canonical value of an operation
    /// that needs no outside information. NaN otherwise.
    #[must_use]
    pub fn double_value(&self) -> f64 {
        match self {
            Self::Literal(value) => value.value,
            Self::Operation(_) => self.compute_value_in_canonical_unit().unwrap_or(f64::NAN),
        }
    }

    /// Split a `<length-percentage>` tree into its pixel and percentage
    /// parts.
    ///
    /// Numbers are treated as pixels. Only sums and products by a literal
    /// number can be split; any other function returns `None`.
    #[must_use]
    pub fn to_pixels_and_percent(&self, resolver: &LengthResolver) -> Option<PixelsAndPercent> {
        match self {
            Self::Literal(value) => match self.category() {
                CalculationResultCategory::Length => Some(PixelsAndPercent::pixels(
                    resolver.length_to_px(value.value, value.unit)?,
                )),
                CalculationResultCategory::Percent => Some(PixelsAndPercent::percent(value.value)),
                CalculationResultCategory::Number => {
                    Some(PixelsAndPercent::pixels(value.value * resolver.zoom))
                }
                _ => None,
            },
            Self::Operation(operation) => match operation.op {
                MathOperator::Add | MathOperator::Subtract => {
                    let [left, right] = operation.operands.as_slice() else {
                        return None;
                    };
                    let left = left.to_pixels_and_percent(resolver)?;
                    let right = right.to_pixels_and_percent(resolver)?;
                    Some(if operation.op == MathOperator::Add {
                        left + right
                    } else {
                        left - right
                    })
                }
                MathOperator::Multiply | MathOperator::Divide => {
                    let (number, other) = operation.number_side()?;
                    let mut factor = number.double_value();
                    if operation.op == MathOperator::Divide {
                        factor = 1.0 / factor;
                    }
                    Some(other.to_pixels_and_percent(resolver)? * factor)
                }
                _ => None,
            },
        }
    }

    /// Add this length expression, scaled by `multiplier`, into `array`.
    ///
    /// Returns false when the tree contains a function that cannot be
    /// expressed as a sum of per-unit values.
    pub fn accumulate_length_array(&self, array: &mut LengthArray, multiplier: f64) -> bool {
        match self {
            Self::Literal(value) => {
                if !value.unit.is_length() && value.unit != UnitType::Percentage {
                    return false;
                }
                array.add(value.unit, value.value * multiplier);
                true
            }
            Self::Operation(operation) => {
                let operands = operation.operands.as_slice();
                match (operation.op, operands) {
                    (MathOperator::Add, [left, right]) => {
                        left.accumulate_length_array(array, multiplier)
                            && right.accumulate_length_array(array, multiplier)
                    }
                    (MathOperator::Subtract, [left, right]) => {
                        left.accumulate_length_array(array, multiplier)
                            && right.accumulate_length_array(array, -multiplier)
                    }
                    (MathOperator::Multiply, [left, right]) => {
                        if left.category() == CalculationResultCategory::Number {
                            right.accumulate_length_array(array, multiplier * left.double_value())
                        } else {
                            left.accumulate_length_array(array, multiplier * right.double_value())
                        }
                    }
                    (MathOperator::Divide, [left, right]) => {
                        left.accumulate_length_array(array, multiplier / right.double_value())
                    }
                    _ => false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_and_max_order_signed_zeros() {
        assert!(evaluate_operator(&[0.0, -0.0], MathOperator::Min).is_sign_negative());
        assert!(evaluate_operator(&[-0.0, 0.0], MathOperator::Max).is_sign_positive());
        assert!(evaluate_operator(&[], MathOperator::Min).is_nan());
    }

    #[test]
    fn nan_operand_poisons_result() {
        assert!(evaluate_operator(&[1.0, f64::NAN], MathOperator::Add).is_nan());
        assert!(evaluate_operator(&[f64::NAN, 1.0, 2.0], MathOperator::Clamp).is_nan());
    }

    #[test]
    fn clamp_prefers_minimum() {
        assert_eq!(evaluate_operator(&[10.0, 5.0, 1.0], MathOperator::Clamp), 10.0);
        assert_eq!(evaluate_operator(&[0.0, 5.0, 10.0], MathOperator::Clamp), 5.0);
    }

    #[test]
    fn round_strategies() {
        assert_eq!(evaluate_stepped(MathOperator::RoundNearest, 2.5, 1.0), 3.0);
        assert_eq!(evaluate_stepped(MathOperator::RoundNearest, -2.5, 1.0), -2.0);
        assert_eq!(evaluate_stepped(MathOperator::RoundUp, 2.1, 1.0), 3.0);
        assert_eq!(evaluate_stepped(MathOperator::RoundDown, 2.9, 1.0), 2.0);
        assert_eq!(evaluate_stepped(MathOperator::RoundToZero, -2.9, 1.0), -2.0);
        assert_eq!(evaluate_stepped(MathOperator::RoundNearest, 17.0, 5.0), 15.0);
        assert!(evaluate_stepped(MathOperator::RoundNearest, 1.0, 0.0).is_nan());
        assert!(evaluate_stepped(MathOperator::RoundNearest, -0.3, 1.0).is_sign_negative());
    }

    #[test]
    fn round_with_infinite_step() {
        assert_eq!(
            evaluate_stepped(MathOperator::RoundUp, 1.0, f64::INFINITY),
            f64::INFINITY
        );
        assert!(evaluate_stepped(MathOperator::RoundNearest, -1.0, f64::INFINITY).is_sign_negative());
        assert!(evaluate_stepped(MathOperator::RoundNearest, f64::INFINITY, f64::INFINITY).is_nan());
    }

    #[test]
    fn mod_follows_divisor_sign() {
        assert_eq!(evaluate_stepped(MathOperator::Mod, -7.0, 3.0), 2.0);
        assert_eq!(evaluate_stepped(MathOperator::Mod, 7.0, -3.0), -2.0);
        assert_eq!(evaluate_stepped(MathOperator::Rem, -7.0, 3.0), -1.0);
        assert!(evaluate_stepped(MathOperator::Mod, 1.0, 0.0).is_nan());
        assert!(evaluate_stepped(MathOperator::Mod, -1.0, f64::INFINITY).is_nan());
        assert_eq!(evaluate_stepped(MathOperator::Rem, 5.0, f64::INFINITY), 5.0);
    }

    #[test]
    fn sign_keeps_zero_sign() {
        assert!(signum(-0.0).is_sign_negative());
        assert_eq!(signum(-4.0), -1.0);
        assert!(signum(f64::NAN).is_nan());
    }
}
