//! Building math trees, simplifying as nodes are created.
//!
//! [CSS Values 4 § 10.10 Simplification](https://www.w3.org/TR/css-values-4/#calc-simplification)
//!
//! Every constructor returns `None` when its operands cannot be combined
//! (for example adding an angle to a length). Operands whose value is known
//! without layout information are folded into a single literal.

use std::collections::BTreeMap;
use std::rc::Rc;

use super::category::CalculationResultCategory;
use super::eval::{evaluate_operator, signum};
use super::node::{MathNode, MathOperator};
use crate::units::{UnitCategory, UnitType};

/// `left op right` without simplification.
#[must_use]
pub fn arithmetic(
    left: Rc<MathNode>,
    right: Rc<MathNode>,
    op: MathOperator,
) -> Option<Rc<MathNode>> {
    let category = if op.is_add_or_subtract() {
        left.category().add_subtract_result(right.category())
    } else {
        left.category()
            .multiply_divide_result(right.category(), op == MathOperator::Divide)
    };
    if category == CalculationResultCategory::Other {
        return None;
    }
    Some(MathNode::operation(op, vec![left, right], category))
}

/// `left op right`, folding literals where possible.
///
/// - numbers fold to a number
/// - `+`/`-` of literals in the same unit, or in absolute units of the same
///   category, fold to one literal
/// - `*`/`/` by a literal number scales the other literal
/// - a literal number distributes over a sum of literals
#[must_use]
pub fn arithmetic_simplified(
    left: Rc<MathNode>,
    right: Rc<MathNode>,
    op: MathOperator,
) -> Option<Rc<MathNode>> {
    if let Some(distributed) = distribute(&left, &right, op) {
        return Some(distributed);
    }
    let (Some(left_value), Some(right_value)) = (left.as_literal(), right.as_literal()) else {
        return arithmetic(left, right, op);
    };
    let (left_value, right_value) = (*left_value, *right_value);
    let left_category = left.category();
    let right_category = right.category();

    if left_category == CalculationResultCategory::Number
        && right_category == CalculationResultCategory::Number
    {
        return Some(MathNode::number(evaluate_operator(
            &[left_value.value, right_value.value],
            op,
        )));
    }

    if op.is_add_or_subtract() {
        if left_category == right_category {
            if left_value.unit == right_value.unit {
                return Some(MathNode::literal(
                    evaluate_operator(&[left_value.value, right_value.value], op),
                    left_value.unit,
                ));
            }
            let left_unit_category = left_value.unit.category();
            if left_unit_category != UnitCategory::Other
                && left_unit_category == right_value.unit.category()
                && left_value.unit.is_absolute()
                && right_value.unit.is_absolute()
            {
                let values = [
                    left_value.value * left_value.unit.conversion_to_canonical(),
                    right_value.value * right_value.unit.conversion_to_canonical(),
                ];
                return Some(MathNode::literal(
                    evaluate_operator(&values, op),
                    left_value.unit.canonical_unit(),
                ));
            }
        }
        return arithmetic(left, right, op);
    }

    let (number, other, number_on_left) = if left.is_number_literal() {
        (left_value, right_value, true)
    } else if right.is_number_literal() {
        (right_value, left_value, false)
    } else {
        return arithmetic(left, right, op);
    };
    if number_on_left && op == MathOperator::Divide {
        return None;
    }
    if other.unit == UnitType::Unknown {
        return arithmetic(left, right, op);
    }
    Some(MathNode::literal(
        evaluate_operator(&[other.value, number.value], op),
        other.unit,
    ))
}

/// `(a ± b) * n`, `(a ± b) / n` and `n * (a ± b)` where `a` and `b` are
/// literals become `a*n ± b*n`.
fn distribute(left: &Rc<MathNode>, right: &Rc<MathNode>, op: MathOperator) -> Option<Rc<MathNode>> {
    if !op.is_multiply_or_divide() {
        return None;
    }
    let literal_sum = |node: &MathNode| {
        node.as_operation()
            .filter(|operation| {
                operation.op.is_add_or_subtract()
                    && operation.operands.len() == 2
                    && operation.operands.iter().all(|operand| operand.is_literal())
            })
            .map(|operation| (operation.op, operation.operands.clone()))
    };

    if right.is_number_literal() {
        if let Some((sum_op, operands)) = literal_sum(left) {
            let [first, second] = <[Rc<MathNode>; 2]>::try_from(operands).ok()?;
            let first = arithmetic_simplified(first, Rc::clone(right), op)?;
            let second = arithmetic_simplified(second, Rc::clone(right), op)?;
            let mut result = arithmetic_simplified(first, second, sum_op)?;
            // a - b * (c + d) must serialize as a - (b*c + b*d).
            MathNode::set_nested_calc(&mut result);
            return Some(result);
        }
    }
    if left.is_number_literal() && op != MathOperator::Divide {
        if let Some((sum_op, operands)) = literal_sum(right) {
            let [first, second] = <[Rc<MathNode>; 2]>::try_from(operands).ok()?;
            let first = arithmetic_simplified(Rc::clone(left), first, op)?;
            let second = arithmetic_simplified(Rc::clone(left), second, op)?;
            let mut result = arithmetic_simplified(first, second, sum_op)?;
            MathNode::set_nested_calc(&mut result);
            return Some(result);
        }
    }
    None
}

/// A summand with the sign it is added with.
struct Term {
    op: MathOperator,
    node: Rc<MathNode>,
}

/// Flip the sign of a term inside a parenthesized sum that is subtracted:
/// `a - (b + c)` subtracts `c`, `a - (b - c)` adds it.
const fn sign_inside_nesting(
    is_in_nesting: bool,
    outer: MathOperator,
    current: MathOperator,
) -> MathOperator {
    match (is_in_nesting, outer, current) {
        (true, MathOperator::Subtract, MathOperator::Add) => MathOperator::Subtract,
        (true, MathOperator::Subtract, MathOperator::Subtract) => MathOperator::Add,
        _ => current,
    }
}

fn collect_terms(node: &Rc<MathNode>, op: MathOperator, terms: &mut Vec<Term>, is_in_nesting: bool) {
    if let Some(operation) = node.as_operation() {
        if let [first, second] = operation.operands.as_slice() {
            if operation.op.is_add_or_subtract() {
                let is_in_nesting = is_in_nesting || operation.is_nested_calc;
                collect_terms(first, op, terms, is_in_nesting);
                let op = sign_inside_nesting(is_in_nesting, op, operation.op);
                collect_terms(second, op, terms, is_in_nesting);
                return;
            }
        }
    }
    terms.push(Term {
        op,
        node: Rc::clone(node),
    });
}

/// [§ 10.10.1 Sort a calculation's children](https://www.w3.org/TR/css-values-4/#sort-a-calculations-children)
///
/// "If nodes contains a number, remove it from nodes and append it to ret.
/// If nodes contains a percentage, remove it from nodes and append it to
/// ret. If nodes contains any dimensions, remove them from nodes, sort them
/// by their units, ordered ASCII case-insensitively, and append them to
/// ret."
fn unit_order(unit: UnitType) -> (u8, &'static str) {
    match unit {
        UnitType::Number | UnitType::Integer => (0, ""),
        UnitType::Percentage => (1, ""),
        _ => (2, unit.unit_str()),
    }
}

/// Flatten a tree of `+`/`-` nodes, combine literals that share a unit and
/// rebuild it in serialization order: numbers, percentages, dimensions by
/// unit name, then every other term in source order.
#[must_use]
pub fn simplify_sum(root: &Rc<MathNode>) -> Rc<MathNode> {
    let Some(category) = root
        .as_operation()
        .filter(|operation| operation.op.is_add_or_subtract())
        .map(|operation| operation.category)
    else {
        return Rc::clone(root);
    };

    let mut terms = Vec::new();
    collect_terms(root, MathOperator::Add, &mut terms, false);

    let mut totals: BTreeMap<(u8, &'static str, UnitType), f64> = BTreeMap::new();
    let mut complex = Vec::new();
    for term in terms {
        match term.node.as_literal() {
            Some(literal) => {
                let value = if term.op == MathOperator::Add {
                    literal.value
                } else {
                    -literal.value
                };
                let (rank, name) = unit_order(literal.unit);
                *totals.entry((rank, name, literal.unit)).or_insert(0.0) += value;
            }
            None => complex.push(term),
        }
    }

    let ordered = totals
        .into_iter()
        .map(|((_, _, unit), value)| Term {
            op: MathOperator::Add,
            node: MathNode::literal(value, unit),
        })
        .chain(complex);

    let mut sum: Option<Rc<MathNode>> = None;
    for term in ordered {
        sum = Some(match sum {
            None => negate_first(term.op, term.node),
            Some(sum) => add_to_sum(sum, term.node, term.op, category),
        });
    }
    sum.unwrap_or_else(|| Rc::clone(root))
}

fn negate_first(op: MathOperator, node: Rc<MathNode>) -> Rc<MathNode> {
    match node.as_literal() {
        Some(literal) if op == MathOperator::Subtract => {
            MathNode::literal(-literal.value, literal.unit)
        }
        _ => node,
    }
}

/// Append `op node` to a sum, writing `+ -10px` as `- 10px` and
/// `- -10px` as `+ 10px`.
fn add_to_sum(
    sum: Rc<MathNode>,
    node: Rc<MathNode>,
    op: MathOperator,
    category: CalculationResultCategory,
) -> Rc<MathNode> {
    let (op, node) = match node.as_literal() {
        Some(literal) if literal.value < 0.0 => {
            let flipped = if op == MathOperator::Add {
                MathOperator::Subtract
            } else {
                MathOperator::Add
            };
            (flipped, MathNode::literal(literal.value.abs(), literal.unit))
        }
        _ => (op, node),
    };
    MathNode::operation(op, vec![sum, node], category)
}

fn all_eager(operands: &[Rc<MathNode>]) -> bool {
    operands.iter().all(|operand| operand.can_eagerly_simplify())
}

fn canonical_values(operands: &[Rc<MathNode>]) -> Option<Vec<f64>> {
    operands
        .iter()
        .map(|operand| operand.compute_value_in_canonical_unit())
        .collect()
}

/// The canonical unit of the first operand, used for eagerly folded
/// functions.
fn first_canonical_unit(operands: &[Rc<MathNode>]) -> UnitType {
    operands
        .first()
        .map_or(UnitType::Number, |first| first.resolved_unit().canonical_unit())
}

/// [§ 10.2 min(), max() and clamp()](https://www.w3.org/TR/css-values-4/#comp-func)
#[must_use]
pub fn comparison(op: MathOperator, mut operands: Vec<Rc<MathNode>>) -> Option<Rc<MathNode>> {
    let category = CalculationResultCategory::combined(operands.iter().map(|node| node.category()));
    if category == CalculationResultCategory::Other {
        return None;
    }
    if all_eager(&operands) {
        let values = canonical_values(&operands)?;
        return Some(MathNode::literal(
            evaluate_operator(&values, op),
            first_canonical_unit(&operands),
        ));
    }
    if operands.len() == 1 {
        return operands.pop();
    }
    Some(MathNode::operation(op, operands, category))
}

fn value_as_number(node: &MathNode) -> Option<f64> {
    if node.category() == CalculationResultCategory::Number {
        node.compute_value_in_canonical_unit()
    } else {
        None
    }
}

fn value_as_degrees(node: &MathNode) -> Option<f64> {
    if node.category() == CalculationResultCategory::Angle {
        node.compute_value_in_canonical_unit()
    } else {
        value_as_number(node).map(f64::to_degrees)
    }
}

/// Exact sine and cosine at multiples of 90 degrees.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let quarter_turns = degrees / 90.0;
    if quarter_turns.trunc() == quarter_turns && quarter_turns.abs() < f64::from(i32::MAX) {
        return match (quarter_turns as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    degrees.to_radians().sin_cos()
}

/// Tangent with exact results at multiples of 45 degrees.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn tan_degrees(degrees: f64) -> f64 {
    const TAN_OCTANTS: [f64; 8] = [
        0.0,
        1.0,
        f64::INFINITY,
        -1.0,
        0.0,
        1.0,
        f64::NEG_INFINITY,
        -1.0,
    ];
    if degrees > -90_000_000.0 && degrees < 90_000_000.0 {
        let octants = degrees / 45.0;
        if octants.trunc() == octants {
            #[allow(clippy::cast_sign_loss)]
            let index = (octants as i64).rem_euclid(8) as usize;
            return TAN_OCTANTS[index];
        }
    }
    degrees.to_radians().tan()
}

const fn supports_atan2(category: CalculationResultCategory) -> bool {
    matches!(
        category,
        CalculationResultCategory::Number
            | CalculationResultCategory::Length
            | CalculationResultCategory::Percent
            | CalculationResultCategory::Time
            | CalculationResultCategory::Frequency
            | CalculationResultCategory::Angle
    )
}

fn resolve_atan2(y: &MathNode, x: &MathNode) -> Option<f64> {
    let category = y.category();
    if category != x.category() || !supports_atan2(category) {
        return None;
    }
    let y_unit = y.resolved_unit();
    let x_unit = x.resolved_unit();
    if y_unit == UnitType::Unknown || x_unit == UnitType::Unknown {
        return None;
    }
    let relative_length = |unit: UnitType| unit.is_length() && unit.is_relative_unit();
    if relative_length(y_unit) || relative_length(x_unit) {
        // Only meaningful when both sides share a unit.
        return Some(y.double_value().atan2(x.double_value()));
    }
    Some(
        y.compute_value_in_canonical_unit()?
            .atan2(x.compute_value_in_canonical_unit()?),
    )
}

/// [§ 10.4 Trigonometric functions](https://www.w3.org/TR/css-values-4/#trig-funcs)
///
/// Always folds to a literal: `sin`, `cos` and `tan` produce a number, the
/// inverse functions produce degrees.
#[must_use]
pub fn trigonometric(function: &str, operands: &[Rc<MathNode>]) -> Option<Rc<MathNode>> {
    let first = operands.first()?;
    let (value, unit) = match function {
        "sin" => (sin_cos_degrees(value_as_degrees(first)?).0, UnitType::Number),
        "cos" => (sin_cos_degrees(value_as_degrees(first)?).1, UnitType::Number),
        "tan" => (tan_degrees(value_as_degrees(first)?), UnitType::Number),
        "asin" => (value_as_number(first)?.asin().to_degrees(), UnitType::Degrees),
        "acos" => (value_as_number(first)?.acos().to_degrees(), UnitType::Degrees),
        "atan" => (value_as_number(first)?.atan().to_degrees(), UnitType::Degrees),
        "atan2" => (
            resolve_atan2(first, operands.get(1)?)?.to_degrees(),
            UnitType::Degrees,
        ),
        _ => return None,
    };
    Some(MathNode::literal(value, unit))
}

/// [§ 10.6 Exponential functions](https://www.w3.org/TR/css-values-4/#exponent-funcs)
///
/// `pow`, `sqrt`, `log` and `exp` need numbers and always fold. `hypot`
/// accepts any consistent category and folds when its operands allow.
#[must_use]
pub fn exponential(function: &str, operands: Vec<Rc<MathNode>>) -> Option<Rc<MathNode>> {
    if function == "hypot" {
        let category =
            CalculationResultCategory::combined(operands.iter().map(|node| node.category()));
        if category == CalculationResultCategory::Other {
            return None;
        }
        if !all_eager(&operands) {
            return Some(MathNode::operation(MathOperator::Hypot, operands, category));
        }
        let values = canonical_values(&operands)?;
        return Some(MathNode::literal(
            evaluate_operator(&values, MathOperator::Hypot),
            first_canonical_unit(&operands),
        ));
    }
    let number_at = |index: usize| operands.get(index).and_then(|node| value_as_number(node));
    let value = match function {
        "pow" => number_at(0)?.powf(number_at(1)?),
        "sqrt" => number_at(0)?.sqrt(),
        "exp" => number_at(0)?.exp(),
        "log" => {
            let a = number_at(0)?;
            if operands.len() == 2 {
                a.log2() / number_at(1)?.log2()
            } else {
                a.ln()
            }
        }
        _ => return None,
    };
    Some(MathNode::number(value))
}

/// [§ 10.5 Stepped value functions](https://www.w3.org/TR/css-values-4/#round-func)
///
/// `round()`, `mod()` and `rem()` with exactly two operands.
#[must_use]
pub fn stepped(op: MathOperator, operands: Vec<Rc<MathNode>>) -> Option<Rc<MathNode>> {
    let [a, b] = operands.as_slice() else {
        return None;
    };
    let category = a.category().add_subtract_result(b.category());
    if category == CalculationResultCategory::Other {
        return None;
    }
    if all_eager(&operands) {
        let values = canonical_values(&operands)?;
        return Some(MathNode::literal(
            evaluate_operator(&values, op),
            first_canonical_unit(&operands),
        ));
    }
    Some(MathNode::operation(op, operands, category))
}

/// [§ 10.8 Sign-related functions](https://www.w3.org/TR/css-values-4/#sign-funcs)
///
/// `abs()` keeps its operand's category; `sign()` is always a number.
#[must_use]
pub fn sign_related(op: MathOperator, operands: Vec<Rc<MathNode>>) -> Option<Rc<MathNode>> {
    let operand = operands.first()?;
    let category = operand.category();
    if matches!(
        category,
        CalculationResultCategory::IntrinsicSize | CalculationResultCategory::Other
    ) {
        return None;
    }
    let eager = operand
        .can_eagerly_simplify()
        .then(|| operand.compute_value_in_canonical_unit())
        .flatten();
    match op {
        MathOperator::Abs => match eager {
            Some(value) => Some(MathNode::literal(value.abs(), operand.resolved_unit())),
            None => Some(MathNode::operation(op, operands, category)),
        },
        MathOperator::Sign => match eager {
            Some(value) => Some(MathNode::number(signum(value))),
            None => Some(MathNode::operation(
                op,
                operands,
                CalculationResultCategory::Number,
            )),
        },
        _ => None,
    }
}

/// [CSS Values 5 § 4.1 progress()](https://drafts.csswg.org/css-values-5/#progress-func)
///
/// `progress(a from b to c)` = `(a - b) / (c - b)`. Folds when every operand
/// is a literal that converts to canonical units or every operand is a
/// literal in the same unit.
#[must_use]
pub fn progress(operands: Vec<Rc<MathNode>>) -> Option<Rc<MathNode>> {
    let [a, b, c] = operands.as_slice() else {
        return None;
    };
    let category = a.category();
    if category != b.category()
        || category != c.category()
        || category == CalculationResultCategory::IntrinsicSize
        || category == CalculationResultCategory::Other
    {
        return None;
    }
    let canonical = operands
        .iter()
        .all(|node| node.is_literal() && node.compute_value_in_canonical_unit().is_some());
    let first_unit = a.resolved_unit();
    let same_unit = operands
        .iter()
        .all(|node| node.is_literal() && node.resolved_unit() == first_unit);
    let values: Option<Vec<f64>> = if canonical {
        canonical_values(&operands)
    } else if same_unit {
        Some(operands.iter().map(|node| node.double_value()).collect())
    } else {
        None
    };
    match values {
        Some(values) => Some(MathNode::number(evaluate_operator(
            &values,
            MathOperator::Progress,
        ))),
        None => Some(MathNode::operation(
            MathOperator::Progress,
            operands,
            CalculationResultCategory::Number,
        )),
    }
}
