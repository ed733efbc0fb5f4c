//! [CSS Values 4 § 10.7 Type checking](https://www.w3.org/TR/css-values-4/#calc-type-checking)

use serde::Serialize;

use crate::units::{UnitCategory, UnitType};

/// What a math expression resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CalculationResultCategory {
    /// `<number>`
    Number,
    /// `<length>`
    Length,
    /// `<percentage>`
    Percent,
    /// A mix of `<length>` and `<percentage>` that can only be resolved once
    /// the percentage basis is known.
    LengthFunction,
    /// `<angle>`
    Angle,
    /// `<time>`
    Time,
    /// `<frequency>`
    Frequency,
    /// `<resolution>`
    Resolution,
    /// An intrinsic sizing keyword expression.
    IntrinsicSize,
    /// Invalid.
    Other,
}

impl CalculationResultCategory {
    /// The category of a literal in `unit`.
    #[must_use]
    pub const fn from_unit(unit: UnitType) -> Self {
        match unit.category() {
            UnitCategory::Number => Self::Number,
            UnitCategory::Percent => Self::Percent,
            UnitCategory::Length => Self::Length,
            UnitCategory::Angle => Self::Angle,
            UnitCategory::Time => Self::Time,
            UnitCategory::Frequency => Self::Frequency,
            UnitCategory::Resolution => Self::Resolution,
            UnitCategory::Flex | UnitCategory::Other => Self::Other,
        }
    }

    /// The category of `a + b` or `a - b`.
    ///
    /// Same categories combine to themselves. Lengths, percentages and
    /// length/percentage mixes combine to [`Self::LengthFunction`].
    /// Everything else is invalid.
    #[must_use]
    pub fn add_subtract_result(self, other: Self) -> Self {
        use CalculationResultCategory::{Length, LengthFunction, Other, Percent};

        if self == Other || other == Other || self == Self::IntrinsicSize {
            return Other;
        }
        if self == other {
            return self;
        }
        let length_like = |c: Self| matches!(c, Length | Percent | LengthFunction);
        if length_like(self) && length_like(other) {
            LengthFunction
        } else {
            Other
        }
    }

    /// The category of `a * b` or `a / b`.
    ///
    /// "At a `*`, verify that at least one side is `<number>`. At a `/`,
    /// verify that the right side is `<number>`."
    #[must_use]
    pub fn multiply_divide_result(self, other: Self, divide: bool) -> Self {
        if self == Self::Other || other == Self::Other {
            return Self::Other;
        }
        if self == Self::IntrinsicSize || other == Self::IntrinsicSize {
            return Self::Other;
        }
        if other == Self::Number {
            self
        } else if self == Self::Number && !divide {
            other
        } else {
            Self::Other
        }
    }

    /// Fold [`add_subtract_result`](Self::add_subtract_result) across every
    /// category, as comparison functions do.
    #[must_use]
    pub fn combined<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = categories.into_iter();
        let Some(first) = iter.next() else {
            return Self::Other;
        };
        iter.fold(first, Self::add_subtract_result)
    }

    /// True for the categories a value of canonical units can be computed for.
    #[must_use]
    pub const fn has_canonical_unit(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Length
                | Self::Percent
                | Self::Angle
                | Self::Time
                | Self::Frequency
                | Self::Resolution
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CalculationResultCategory as C;

    #[test]
    fn length_and_percent_defer() {
        assert_eq!(C::Length.add_subtract_result(C::Percent), C::LengthFunction);
        assert_eq!(C::LengthFunction.add_subtract_result(C::Length), C::LengthFunction);
        assert_eq!(C::Number.add_subtract_result(C::Percent), C::Other);
        assert_eq!(C::Angle.add_subtract_result(C::Length), C::Other);
    }

    #[test]
    fn division_needs_number_on_the_right() {
        assert_eq!(C::Length.multiply_divide_result(C::Number, true), C::Length);
        assert_eq!(C::Number.multiply_divide_result(C::Length, true), C::Other);
        assert_eq!(C::Number.multiply_divide_result(C::Length, false), C::Length);
        assert_eq!(C::Length.multiply_divide_result(C::Length, false), C::Other);
    }
}
