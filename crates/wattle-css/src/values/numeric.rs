//! Numeric literals: a number plus a unit.
//!
//! [CSS Values 4 § 5](https://www.w3.org/TR/css-values-4/#numeric-types)

use std::fmt::Write as _;
use std::rc::Rc;

use serde::Serialize;

use super::CSSValue;
use super::length::{Length, LengthResolver};
use super::math_function::{MathFunctionValue, ValueRange, clamp_to_finite, clamp_to_float_range};
use crate::math::simplify::{arithmetic, arithmetic_simplified, simplify_sum};
use crate::math::{CalculationResultCategory, MathNode, MathOperator};
use crate::units::{
    LengthTypeFlags, UnitCategory, UnitType, has_dynamic_viewport_units,
    has_static_viewport_units,
};

/// Magnitudes in this range print as plain decimals, all others in
/// exponent form.
const PLAIN_FORM_RANGE: std::ops::Range<f64> = 1e-6..1e21;

/// A number with a unit, e.g. `12px`, `50%`, `3`.
///
/// Two NaN values with the same unit compare equal, so a value equals its
/// own reparsed text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumericValue {
    /// The numeric value as written
    pub value: f64,
    /// The unit it was written in
    pub unit: UnitType,
}

impl PartialEq for NumericValue {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && (self.value == other.value || (self.value.is_nan() && other.value.is_nan()))
    }
}

impl NumericValue {
    /// Create a numeric value.
    #[must_use]
    pub const fn new(value: f64, unit: UnitType) -> Self {
        Self { value, unit }
    }

    /// A unitless `<number>`.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::new(value, UnitType::Number)
    }

    /// A `px` length.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, UnitType::Pixels)
    }

    /// A percentage.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self::new(value, UnitType::Percentage)
    }

    /// The same quantity in its category's canonical unit, when the
    /// conversion needs no outside information.
    #[must_use]
    pub fn to_canonical(self) -> Self {
        if self.unit.is_absolute() {
            Self::new(
                self.value * self.unit.conversion_to_canonical(),
                self.unit.canonical_unit(),
            )
        } else {
            self
        }
    }

    /// The value in canonical units, or `None` for relative lengths and
    /// units without a canonical form.
    #[must_use]
    pub fn value_in_canonical_unit(self) -> Option<f64> {
        match self.unit.category() {
            UnitCategory::Number | UnitCategory::Percent => Some(self.value),
            UnitCategory::Length if self.unit.is_relative_unit() => None,
            UnitCategory::Length
            | UnitCategory::Angle
            | UnitCategory::Time
            | UnitCategory::Frequency
            | UnitCategory::Resolution => Some(self.value * self.unit.conversion_to_canonical()),
            UnitCategory::Flex | UnitCategory::Other => None,
        }
    }

    /// Serialize as CSS text.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out);
        out
    }

    /// Append the CSS text of this value to `out`.
    ///
    /// Finite values print as the shortest text that parses back to the
    /// same `f64`, in exponent form when very large or very small. Infinities
    /// and NaN, which cannot be written as literals, print in their `calc()`
    /// keyword form.
    pub fn write_css(&self, out: &mut String) {
        let suffix = self.unit.unit_str();
        let value = self.value;
        if self.unit == UnitType::Integer && value.is_finite() {
            #[allow(clippy::cast_possible_truncation)]
            let integer = value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
            let _ = write!(out, "{integer}");
            return;
        }
        if !value.is_finite() {
            out.push_str(if value.is_nan() {
                "NaN"
            } else if value > 0.0 {
                "infinity"
            } else {
                "-infinity"
            });
            if !suffix.is_empty() {
                let _ = write!(out, " * 1{suffix}");
            }
            return;
        }
        write_shortest(value, out);
        out.push_str(suffix);
    }
}

/// The shortest decimal text that reads back as `value`. Negative zero
/// prints as `0`.
fn write_shortest(value: f64, out: &mut String) {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        out.push('0');
    } else if PLAIN_FORM_RANGE.contains(&magnitude) {
        let _ = write!(out, "{value}");
    } else {
        let _ = write!(out, "{value:e}");
    }
}

/// [CSS Values 4 § 5](https://www.w3.org/TR/css-values-4/#numeric-types)
///
/// Reads shared by numeric literals and math functions. Every read that
/// returns a plain number applies the clamping rules of
/// [§ 10.9](https://www.w3.org/TR/css-values-4/#calc-ieee): the permitted
/// range first, then NaN to 0 and infinities to the largest finite values.
impl CSSValue {
    /// True for numeric literals and math functions.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_) | Self::MathFunction(_))
    }

    /// True for math functions.
    #[must_use]
    pub const fn is_calculated(&self) -> bool {
        matches!(self, Self::MathFunction(_))
    }

    /// What a numeric value resolves to.
    #[must_use]
    pub fn numeric_category(&self) -> Option<CalculationResultCategory> {
        match self {
            Self::Numeric(value) => Some(CalculationResultCategory::from_unit(value.unit)),
            Self::MathFunction(function) => Some(function.category()),
            _ => None,
        }
    }

    /// The unit of a literal, or the single unit a math function resolves to.
    #[must_use]
    pub fn primitive_unit(&self) -> Option<UnitType> {
        match self {
            Self::Numeric(value) => Some(value.unit),
            Self::MathFunction(function) => Some(function.resolved_unit()),
            _ => None,
        }
    }

    fn category_is(&self, category: CalculationResultCategory) -> bool {
        self.numeric_category() == Some(category)
    }

    /// `<length>`
    #[must_use]
    pub fn is_length(&self) -> bool {
        self.category_is(CalculationResultCategory::Length)
    }

    /// `<percentage>`
    #[must_use]
    pub fn is_percentage(&self) -> bool {
        self.category_is(CalculationResultCategory::Percent)
    }

    /// A `calc()` mixing lengths and percentages.
    #[must_use]
    pub fn is_calculated_percentage_with_length(&self) -> bool {
        self.category_is(CalculationResultCategory::LengthFunction)
    }

    /// `<number>` or `<integer>`
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.category_is(CalculationResultCategory::Number)
    }

    /// An `<integer>` literal, or a math function in an integer range.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        match self {
            Self::Numeric(value) => matches!(value.unit, UnitType::Integer),
            Self::MathFunction(function) => matches!(
                function.range(),
                ValueRange::Integer | ValueRange::NonNegativeInteger | ValueRange::PositiveInteger
            ),
            _ => false,
        }
    }

    /// `<angle>`
    #[must_use]
    pub fn is_angle(&self) -> bool {
        self.category_is(CalculationResultCategory::Angle)
    }

    /// `<time>`
    #[must_use]
    pub fn is_time(&self) -> bool {
        self.category_is(CalculationResultCategory::Time)
    }

    /// `<resolution>`
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        self.category_is(CalculationResultCategory::Resolution)
    }

    /// `<flex>`
    #[must_use]
    pub fn is_flex(&self) -> bool {
        matches!(self, Self::Numeric(value) if value.unit == UnitType::Fraction)
    }

    /// Collect every length unit in the value.
    pub fn accumulate_length_unit_types(&self, types: &mut LengthTypeFlags) {
        match self {
            Self::Numeric(value) => {
                if value.unit.is_length() {
                    let _ = types.insert(value.unit);
                }
            }
            Self::MathFunction(function) => function.accumulate_length_unit_types(types),
            _ => {}
        }
    }

    fn length_unit_types(&self) -> LengthTypeFlags {
        let mut types = LengthTypeFlags::new();
        self.accumulate_length_unit_types(&mut types);
        types
    }

    /// True if the value uses any `cq*` unit.
    #[must_use]
    pub fn has_container_relative_units(&self) -> bool {
        self.length_unit_types()
            .iter()
            .any(|unit| unit.is_container_percentage_length())
    }

    /// True if the value uses any `v*`, `sv*` or `lv*` unit.
    #[must_use]
    pub fn has_static_viewport_units(&self) -> bool {
        has_static_viewport_units(&self.length_unit_types())
    }

    /// True if the value uses any `dv*` unit.
    #[must_use]
    pub fn has_dynamic_viewport_units(&self) -> bool {
        has_dynamic_viewport_units(&self.length_unit_types())
    }

    /// True if the value needs no font or container information.
    #[must_use]
    pub fn is_computationally_independent(&self) -> bool {
        match self {
            Self::Numeric(value) => {
                !(value.unit.is_length()
                    && value.unit.is_relative_unit()
                    && !value.unit.is_viewport_percentage_length())
            }
            Self::MathFunction(function) => function.expression().is_computationally_independent(),
            _ => true,
        }
    }

    /// The numeric value as written (or in canonical units for a math
    /// function), clamped to a finite number. Zero for non-numeric values.
    #[must_use]
    pub fn get_double_value(&self) -> f64 {
        match self {
            Self::Numeric(value) => clamp_to_finite(value.value),
            Self::MathFunction(function) => function.double_value(),
            _ => 0.0,
        }
    }

    /// Like [`get_double_value`](Self::get_double_value) but NaN and
    /// infinities pass through.
    #[must_use]
    pub fn get_double_value_without_clamping(&self) -> f64 {
        match self {
            Self::Numeric(value) => value.value,
            Self::MathFunction(function) => function.double_value_without_clamping(),
            _ => f64::NAN,
        }
    }

    /// A length in zoomed px. Unitless numbers count as px.
    #[must_use]
    pub fn compute_length_px(&self, resolver: &LengthResolver) -> f64 {
        match self {
            Self::Numeric(value) => {
                let px = if value.unit.category() == UnitCategory::Number {
                    value.value * resolver.zoom
                } else {
                    resolver
                        .length_to_px(value.value, value.unit)
                        .unwrap_or(value.value)
                };
                clamp_to_finite(px)
            }
            Self::MathFunction(function) => function.compute_double(resolver),
            _ => 0.0,
        }
    }

    fn compute_in_canonical(&self, resolver: &LengthResolver) -> f64 {
        match self {
            Self::Numeric(value) => clamp_to_finite(
                value
                    .value_in_canonical_unit()
                    .unwrap_or(value.value),
            ),
            Self::MathFunction(function) => function.compute_double(resolver),
            _ => 0.0,
        }
    }

    /// An angle in degrees.
    #[must_use]
    pub fn compute_degrees(&self, resolver: &LengthResolver) -> f64 {
        self.compute_in_canonical(resolver)
    }

    /// A time in seconds.
    #[must_use]
    pub fn compute_seconds(&self) -> f64 {
        self.compute_in_canonical(&LengthResolver::default())
    }

    /// A resolution in dots per CSS pixel.
    #[must_use]
    pub fn compute_dots_per_pixel(&self) -> f64 {
        self.compute_in_canonical(&LengthResolver::default())
    }

    /// A `<number>`.
    #[must_use]
    pub fn compute_number(&self, resolver: &LengthResolver) -> f64 {
        self.compute_in_canonical(resolver)
    }

    /// A `<percentage>`, as its percentage value.
    #[must_use]
    pub fn compute_percentage(&self, resolver: &LengthResolver) -> f64 {
        self.compute_in_canonical(resolver)
    }

    /// An `<integer>`, rounded half toward positive infinity and saturated
    /// to the `i32` range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute_integer(&self, resolver: &LengthResolver) -> i32 {
        let value = (self.compute_in_canonical(resolver) + 0.5).floor();
        value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }

    /// The value in its category's canonical unit, resolving relative
    /// lengths through `resolver`.
    #[must_use]
    pub fn compute_value_in_canonical_unit(&self, resolver: &LengthResolver) -> Option<f64> {
        match self {
            Self::Numeric(value) if value.unit.is_length() => {
                resolver.length_to_px(value.value, value.unit)
            }
            Self::Numeric(value) => value.value_in_canonical_unit(),
            Self::MathFunction(function) => function
                .expression()
                .compute_value_in_canonical_unit_with(resolver)
                .map(|value| function.clamp_to_permitted_range(value)),
            _ => None,
        }
    }

    /// Convert a `<length-percentage>` to a used [`Length`].
    ///
    /// Pixels are zoomed; percentages are not.
    #[must_use]
    pub fn convert_to_length(&self, resolver: &LengthResolver) -> Option<Length> {
        match self {
            Self::Numeric(value) if value.unit == UnitType::Percentage => {
                Some(Length::Percent(clamp_to_float_range(value.value)))
            }
            Self::Numeric(value)
                if value.unit.is_length() || value.unit.category() == UnitCategory::Number =>
            {
                Some(Length::Fixed(self.compute_length_px(resolver)))
            }
            Self::MathFunction(function) => function.convert_to_length(resolver),
            _ => None,
        }
    }

    /// The inverse of [`convert_to_length`](Self::convert_to_length): pixels
    /// are divided by `zoom`, percentages are kept.
    #[must_use]
    pub fn create_from_length(length: &Length, zoom: f64) -> Rc<Self> {
        match *length {
            Length::Fixed(px) => Rc::new(Self::Numeric(NumericValue::px(px / zoom))),
            Length::Percent(percent) => Rc::new(Self::Numeric(NumericValue::percent(percent))),
            Length::Calculated(value) => {
                let pixels = MathNode::literal(value.pixels / zoom, UnitType::Pixels);
                let percent = MathNode::literal(value.percent, UnitType::Percentage);
                arithmetic(pixels, percent, MathOperator::Add).map_or_else(
                    || Rc::new(Self::Numeric(NumericValue::px(value.pixels / zoom))),
                    |sum| {
                        Rc::new(Self::MathFunction(MathFunctionValue::new(
                            simplify_sum(&sum),
                            ValueRange::All,
                        )))
                    },
                )
            }
        }
    }

    /// The value as an expression tree.
    #[must_use]
    pub fn to_math_node(&self) -> Option<Rc<MathNode>> {
        match self {
            Self::Numeric(value) => Some(MathNode::literal(value.value, value.unit)),
            Self::MathFunction(function) => Some(Rc::clone(function.expression())),
            _ => None,
        }
    }

    fn from_math_node(node: Rc<MathNode>) -> Rc<Self> {
        match node.as_literal() {
            Some(literal) => Rc::new(Self::Numeric(*literal)),
            None => Rc::new(Self::MathFunction(MathFunctionValue::new(node, ValueRange::All))),
        }
    }

    fn combine(
        left: Rc<MathNode>,
        right: Rc<MathNode>,
        op: MathOperator,
    ) -> Option<Rc<Self>> {
        let node = arithmetic_simplified(left, right, op)?;
        let node = if op.is_add_or_subtract() {
            simplify_sum(&node)
        } else {
            node
        };
        Some(Self::from_math_node(node))
    }

    /// `self + value unit`
    #[must_use]
    pub fn add(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(self.to_math_node()?, MathNode::literal(value, unit), MathOperator::Add)
    }

    /// `self - value unit`
    #[must_use]
    pub fn subtract(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(
            self.to_math_node()?,
            MathNode::literal(value, unit),
            MathOperator::Subtract,
        )
    }

    /// `self - other`
    #[must_use]
    pub fn subtract_value(&self, other: &Self) -> Option<Rc<Self>> {
        Self::combine(self.to_math_node()?, other.to_math_node()?, MathOperator::Subtract)
    }

    /// `value unit - self`
    #[must_use]
    pub fn subtract_from(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(
            MathNode::literal(value, unit),
            self.to_math_node()?,
            MathOperator::Subtract,
        )
    }

    /// `self * value unit`
    #[must_use]
    pub fn multiply(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(
            self.to_math_node()?,
            MathNode::literal(value, unit),
            MathOperator::Multiply,
        )
    }

    /// `value unit * self`
    #[must_use]
    pub fn multiply_by(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(
            MathNode::literal(value, unit),
            self.to_math_node()?,
            MathOperator::Multiply,
        )
    }

    /// `self / value unit`
    #[must_use]
    pub fn divide(&self, value: f64, unit: UnitType) -> Option<Rc<Self>> {
        Self::combine(self.to_math_node()?, MathNode::literal(value, unit), MathOperator::Divide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_plainly() {
        assert_eq!(NumericValue::px(100.0).css_text(), "100px");
        assert_eq!(NumericValue::px(-0.0).css_text(), "0px");
        assert_eq!(NumericValue::new(3.0, UnitType::Integer).css_text(), "3");
    }

    #[test]
    fn fractions_print_the_shortest_round_trip_text() {
        assert_eq!(NumericValue::px(0.5).css_text(), "0.5px");
        assert_eq!(NumericValue::number(1.0 / 3.0).css_text(), "0.3333333333333333");
        assert_eq!(NumericValue::px(0.123_456_7).css_text(), "0.1234567px");
        assert_eq!(NumericValue::number(1_234_567.0).css_text(), "1234567");
        assert_eq!(NumericValue::number(0.000_01).css_text(), "0.00001");
        assert_eq!(NumericValue::number(1e-7).css_text(), "1e-7");
        assert_eq!(NumericValue::px(f64::from(f32::MAX)).css_text(), "3.4028234663852886e38px");
    }

    #[test]
    fn nan_equals_nan() {
        assert_eq!(NumericValue::number(f64::NAN), NumericValue::number(f64::NAN));
        assert_ne!(NumericValue::number(f64::NAN), NumericValue::px(f64::NAN));
        assert_eq!(NumericValue::px(-0.0), NumericValue::px(0.0));
    }

    #[test]
    fn non_finite_values_use_keywords() {
        assert_eq!(NumericValue::px(f64::INFINITY).css_text(), "infinity * 1px");
        assert_eq!(NumericValue::number(f64::NEG_INFINITY).css_text(), "-infinity");
        assert_eq!(NumericValue::percent(f64::NAN).css_text(), "NaN * 1%");
    }

    #[test]
    fn absolute_units_canonicalize() {
        let value = NumericValue::new(1.0, UnitType::Inches).to_canonical();
        assert_eq!(value.unit, UnitType::Pixels);
        assert!((value.value - 96.0).abs() < 1e-9);
        let em = NumericValue::new(1.0, UnitType::Ems).to_canonical();
        assert_eq!(em.unit, UnitType::Ems);
    }
}
