//! `calc()` and friends as CSS values.
//!
//! [CSS Values 4 § 10](https://www.w3.org/TR/css-values-4/#math)
//!
//! A [`MathFunctionValue`] wraps an expression tree together with the range
//! its grammar slot permits. The range is applied whenever a number is read
//! out of the value, never while parsing, because the expression may depend
//! on font or container sizes that are only known later.

use std::rc::Rc;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::math::{CalculationResultCategory, MathNode};
use crate::units::{LengthArray, LengthTypeFlags, UnitType};
use crate::values::length::{Length, LengthResolver, PixelsAndPercent};

/// The numeric range a grammar slot accepts.
///
/// [§ 10.10 Range Checking](https://www.w3.org/TR/css-values-4/#calc-range)
///
/// "Parse-time range-checking of values is not performed within a top-level
/// calculation; values must instead be clamped to the allowed range."
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ValueRange {
    /// Any value.
    #[default]
    All,
    /// `[0,∞]`
    NonNegative,
    /// Integers.
    Integer,
    /// Integers `>= 0`.
    NonNegativeInteger,
    /// Integers `>= 1`.
    PositiveInteger,
}

/// Round half toward positive infinity, as integer contexts require.
///
/// [§ 10.9.1](https://www.w3.org/TR/css-values-4/#calc-ieee)
///
/// "if the value is a non-integer, it is rounded to the nearest integer, with
/// halfway values rounding towards positive infinity"
#[must_use]
pub fn round_half_toward_positive_infinity(value: f64) -> f64 {
    (value + 0.5).floor()
}

impl ValueRange {
    /// Clamp `value` into this range. NaN passes through unchanged.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match self {
            Self::All => value,
            Self::NonNegative => value.max(0.0),
            Self::Integer => round_half_toward_positive_infinity(value),
            Self::NonNegativeInteger => round_half_toward_positive_infinity(value.max(0.0)),
            Self::PositiveInteger => round_half_toward_positive_infinity(value.max(1.0)),
        }
    }

    /// True if `value` lies in the range without clamping.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::All | Self::Integer => true,
            Self::NonNegative | Self::NonNegativeInteger => value >= 0.0,
            Self::PositiveInteger => value >= 1.0,
        }
    }
}

/// Map NaN to 0 and infinities to the largest finite values.
///
/// "If a top-level calculation would produce a value whose numeric part is
/// NaN, it instead act as though the numeric part is 0. If a top-level
/// calculation would produce a value whose numeric part is infinite, it
/// instead acts as though the numeric part is the largest (or smallest)
/// value allowed."
#[must_use]
pub fn clamp_to_finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// [`clamp_to_finite`] into the range of an `f32`.
#[must_use]
pub fn clamp_to_float_range(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::from(f32::MIN), f64::from(f32::MAX))
    }
}

/// A math function as a CSS value.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFunctionValue {
    expression: Rc<MathNode>,
    range: ValueRange,
}

impl MathFunctionValue {
    /// Wrap `expression` with its permitted range.
    #[must_use]
    pub const fn new(expression: Rc<MathNode>, range: ValueRange) -> Self {
        Self { expression, range }
    }

    /// The expression tree.
    #[must_use]
    pub const fn expression(&self) -> &Rc<MathNode> {
        &self.expression
    }

    /// The permitted range.
    #[must_use]
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// The category the expression resolves to.
    #[must_use]
    pub fn category(&self) -> CalculationResultCategory {
        self.expression.category()
    }

    /// The unit every part of the expression resolves to, or
    /// [`UnitType::Unknown`] when they differ.
    #[must_use]
    pub fn resolved_unit(&self) -> UnitType {
        self.expression.resolved_unit()
    }

    /// The permitted range applied to `value`.
    #[must_use]
    pub fn clamp_to_permitted_range(&self, value: f64) -> f64 {
        self.range.clamp(value)
    }

    /// `calc()` text of the expression.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.expression.css_text()
    }

    /// The raw canonical value when it needs no context, clamped.
    #[must_use]
    pub fn double_value(&self) -> f64 {
        clamp_to_finite(self.clamp_to_permitted_range(self.expression.double_value()))
    }

    /// Like [`double_value`](Self::double_value) without any clamping.
    #[must_use]
    pub fn double_value_without_clamping(&self) -> f64 {
        self.expression.double_value()
    }

    /// Evaluate with `resolver` and clamp.
    ///
    /// Lengths come out in zoomed px, angles in degrees, times in seconds and
    /// resolutions in dppx.
    #[must_use]
    pub fn compute_double(&self, resolver: &LengthResolver) -> f64 {
        clamp_to_finite(self.clamp_to_permitted_range(self.expression.compute_double(resolver)))
    }

    /// The canonical value using only parse-time information.
    #[must_use]
    pub fn compute_value_in_canonical_unit(&self) -> Option<f64> {
        self.expression
            .compute_value_in_canonical_unit()
            .map(|value| self.clamp_to_permitted_range(value))
    }

    /// Split into pixel and percentage parts, clamping each.
    #[must_use]
    pub fn to_pixels_and_percent(&self, resolver: &LengthResolver) -> Option<PixelsAndPercent> {
        let mut value = self.expression.to_pixels_and_percent(resolver)?;
        value.pixels = clamp_to_float_range(value.pixels);
        value.percent = clamp_to_float_range(value.percent);
        Some(value)
    }

    /// Convert a `<length-percentage>` expression to a [`Length`].
    ///
    /// A value that is purely a length becomes [`Length::Fixed`], purely a
    /// percentage [`Length::Percent`], anything else [`Length::Calculated`].
    #[must_use]
    pub fn convert_to_length(&self, resolver: &LengthResolver) -> Option<Length> {
        match self.category() {
            CalculationResultCategory::Length | CalculationResultCategory::Number => {
                Some(Length::Fixed(self.compute_double(resolver)))
            }
            CalculationResultCategory::Percent => {
                Some(Length::Percent(clamp_to_float_range(self.clamp_to_permitted_range(
                    self.expression.compute_double(resolver),
                ))))
            }
            CalculationResultCategory::LengthFunction => {
                let value = self.to_pixels_and_percent(resolver)?;
                Some(Length::Calculated(value))
            }
            _ => None,
        }
    }

    /// Collect every length unit the expression mentions.
    pub fn accumulate_length_unit_types(&self, types: &mut LengthTypeFlags) {
        self.expression.accumulate_length_unit_types(types);
    }

    /// Add the per-unit totals of the expression to `array`.
    pub fn accumulate_length_array(&self, array: &mut LengthArray, multiplier: f64) -> bool {
        self.expression.accumulate_length_array(array, multiplier)
    }
}

impl Serialize for MathFunctionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.css_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ranges_round_half_up() {
        assert_eq!(ValueRange::Integer.clamp(2.5), 3.0);
        assert_eq!(ValueRange::Integer.clamp(-2.5), -2.0);
        assert_eq!(ValueRange::NonNegativeInteger.clamp(-3.7), 0.0);
        assert_eq!(ValueRange::PositiveInteger.clamp(0.2), 1.0);
        assert_eq!(ValueRange::PositiveInteger.clamp(4.4), 4.0);
    }

    #[test]
    fn non_negative_clamps_below() {
        assert_eq!(ValueRange::NonNegative.clamp(-1.0), 0.0);
        assert_eq!(ValueRange::All.clamp(-1.0), -1.0);
        assert!(ValueRange::NonNegative.clamp(f64::NAN).is_nan());
    }

    #[test]
    fn finite_clamps() {
        assert_eq!(clamp_to_finite(f64::INFINITY), f64::MAX);
        assert_eq!(clamp_to_finite(f64::NEG_INFINITY), f64::MIN);
        assert_eq!(clamp_to_finite(f64::NAN), 0.0);
        assert_eq!(clamp_to_float_range(f64::INFINITY), f64::from(f32::MAX));
    }

    #[test]
    fn range_names() {
        assert_eq!(ValueRange::NonNegativeInteger.to_string(), "non-negative-integer");
    }
}
