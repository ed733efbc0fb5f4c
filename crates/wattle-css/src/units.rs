//! Unit classification and conversion.
//!
//! [CSS Values 4 § 5-7](https://www.w3.org/TR/css-values-4/#numeric-types)
//!
//! Every numeric value carries a [`UnitType`]. Units that can be converted
//! without layout information (absolute lengths, angles, times, frequencies
//! and resolutions) have a canonical unit per category.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use strum_macros::{EnumCount, EnumIter};

/// The unit attached to a numeric value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, EnumIter, EnumCount,
)]
pub enum UnitType {
    /// A `<number>` with a fractional part or exponent.
    Number,
    /// An `<integer>`.
    Integer,
    /// `%`
    Percentage,
    /// `px`
    Pixels,
    /// `cm`
    Centimeters,
    /// `mm`
    Millimeters,
    /// `q`
    QuarterMillimeters,
    /// `in`
    Inches,
    /// `pt`
    Points,
    /// `pc`
    Picas,
    /// `em`
    Ems,
    /// `rem`
    Rems,
    /// `ex`
    Exs,
    /// `rex`
    Rexs,
    /// `ch`
    Chs,
    /// `rch`
    Rchs,
    /// `ic`
    Ics,
    /// `ric`
    Rics,
    /// `cap`
    Caps,
    /// `rcap`
    Rcaps,
    /// `lh`
    LineHeights,
    /// `rlh`
    RootLineHeights,
    /// `vw`
    ViewportWidth,
    /// `vh`
    ViewportHeight,
    /// `vi`
    ViewportInlineSize,
    /// `vb`
    ViewportBlockSize,
    /// `vmin`
    ViewportMin,
    /// `vmax`
    ViewportMax,
    /// `svw`
    SmallViewportWidth,
    /// `svh`
    SmallViewportHeight,
    /// `svi`
    SmallViewportInlineSize,
    /// `svb`
    SmallViewportBlockSize,
    /// `svmin`
    SmallViewportMin,
    /// `svmax`
    SmallViewportMax,
    /// `lvw`
    LargeViewportWidth,
    /// `lvh`
    LargeViewportHeight,
    /// `lvi`
    LargeViewportInlineSize,
    /// `lvb`
    LargeViewportBlockSize,
    /// `lvmin`
    LargeViewportMin,
    /// `lvmax`
    LargeViewportMax,
    /// `dvw`
    DynamicViewportWidth,
    /// `dvh`
    DynamicViewportHeight,
    /// `dvi`
    DynamicViewportInlineSize,
    /// `dvb`
    DynamicViewportBlockSize,
    /// `dvmin`
    DynamicViewportMin,
    /// `dvmax`
    DynamicViewportMax,
    /// `cqw`
    ContainerWidth,
    /// `cqh`
    ContainerHeight,
    /// `cqi`
    ContainerInlineSize,
    /// `cqb`
    ContainerBlockSize,
    /// `cqmin`
    ContainerMin,
    /// `cqmax`
    ContainerMax,
    /// `deg`
    Degrees,
    /// `rad`
    Radians,
    /// `grad`
    Gradians,
    /// `turn`
    Turns,
    /// `s`
    Seconds,
    /// `ms`
    Milliseconds,
    /// `hz`
    Hertz,
    /// `khz`
    Kilohertz,
    /// `dppx`
    DotsPerPixel,
    /// `x`, an alias of `dppx`
    X,
    /// `dpi`
    DotsPerInch,
    /// `dpcm`
    DotsPerCentimeter,
    /// `fr`
    Fraction,
    /// A dimension whose unit is not recognized.
    Unknown,
}

/// The broad category a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitCategory {
    /// Unitless numbers and integers.
    Number,
    /// Percentages.
    Percent,
    /// Absolute and relative lengths.
    Length,
    /// Angles.
    Angle,
    /// Times.
    Time,
    /// Frequencies.
    Frequency,
    /// Resolutions.
    Resolution,
    /// Flexible lengths (`fr`).
    Flex,
    /// Anything else.
    Other,
}

impl UnitType {
    /// The unit as written in CSS, or the empty string for unitless types.
    #[must_use]
    pub const fn unit_str(self) -> &'static str {
        match self {
            Self::Number | Self::Integer | Self::Unknown => "",
            Self::Percentage => "%",
            Self::Pixels => "px",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::QuarterMillimeters => "q",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Picas => "pc",
            Self::Ems => "em",
            Self::Rems => "rem",
            Self::Exs => "ex",
            Self::Rexs => "rex",
            Self::Chs => "ch",
            Self::Rchs => "rch",
            Self::Ics => "ic",
            Self::Rics => "ric",
            Self::Caps => "cap",
            Self::Rcaps => "rcap",
            Self::LineHeights => "lh",
            Self::RootLineHeights => "rlh",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
            Self::ViewportInlineSize => "vi",
            Self::ViewportBlockSize => "vb",
            Self::ViewportMin => "vmin",
            Self::ViewportMax => "vmax",
            Self::SmallViewportWidth => "svw",
            Self::SmallViewportHeight => "svh",
            Self::SmallViewportInlineSize => "svi",
            Self::SmallViewportBlockSize => "svb",
            Self::SmallViewportMin => "svmin",
            Self::SmallViewportMax => "svmax",
            Self::LargeViewportWidth => "lvw",
            Self::LargeViewportHeight => "lvh",
            Self::LargeViewportInlineSize => "lvi",
            Self::LargeViewportBlockSize => "lvb",
            Self::LargeViewportMin => "lvmin",
            Self::LargeViewportMax => "lvmax",
            Self::DynamicViewportWidth => "dvw",
            Self::DynamicViewportHeight => "dvh",
            Self::DynamicViewportInlineSize => "dvi",
            Self::DynamicViewportBlockSize => "dvb",
            Self::DynamicViewportMin => "dvmin",
            Self::DynamicViewportMax => "dvmax",
            Self::ContainerWidth => "cqw",
            Self::ContainerHeight => "cqh",
            Self::ContainerInlineSize => "cqi",
            Self::ContainerBlockSize => "cqb",
            Self::ContainerMin => "cqmin",
            Self::ContainerMax => "cqmax",
            Self::Degrees => "deg",
            Self::Radians => "rad",
            Self::Gradians => "grad",
            Self::Turns => "turn",
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Hertz => "hz",
            Self::Kilohertz => "khz",
            Self::DotsPerPixel => "dppx",
            Self::X => "x",
            Self::DotsPerInch => "dpi",
            Self::DotsPerCentimeter => "dpcm",
            Self::Fraction => "fr",
        }
    }

    /// Look up a dimension unit, ASCII case-insensitively.
    ///
    /// Returns `None` for unrecognized units and for the empty string.
    #[must_use]
    pub fn from_unit_str(unit: &str) -> Option<Self> {
        let lower = unit.to_ascii_lowercase();
        let unit = match lower.as_str() {
            "%" => Self::Percentage,
            "px" => Self::Pixels,
            "cm" => Self::Centimeters,
            "mm" => Self::Millimeters,
            "q" => Self::QuarterMillimeters,
            "in" => Self::Inches,
            "pt" => Self::Points,
            "pc" => Self::Picas,
            "em" => Self::Ems,
            "rem" => Self::Rems,
            "ex" => Self::Exs,
            "rex" => Self::Rexs,
            "ch" => Self::Chs,
            "rch" => Self::Rchs,
            "ic" => Self::Ics,
            "ric" => Self::Rics,
            "cap" => Self::Caps,
            "rcap" => Self::Rcaps,
            "lh" => Self::LineHeights,
            "rlh" => Self::RootLineHeights,
            "vw" => Self::ViewportWidth,
            "vh" => Self::ViewportHeight,
            "vi" => Self::ViewportInlineSize,
            "vb" => Self::ViewportBlockSize,
            "vmin" => Self::ViewportMin,
            "vmax" => Self::ViewportMax,
            "svw" => Self::SmallViewportWidth,
            "svh" => Self::SmallViewportHeight,
            "svi" => Self::SmallViewportInlineSize,
            "svb" => Self::SmallViewportBlockSize,
            "svmin" => Self::SmallViewportMin,
            "svmax" => Self::SmallViewportMax,
            "lvw" => Self::LargeViewportWidth,
            "lvh" => Self::LargeViewportHeight,
            "lvi" => Self::LargeViewportInlineSize,
            "lvb" => Self::LargeViewportBlockSize,
            "lvmin" => Self::LargeViewportMin,
            "lvmax" => Self::LargeViewportMax,
            "dvw" => Self::DynamicViewportWidth,
            "dvh" => Self::DynamicViewportHeight,
            "dvi" => Self::DynamicViewportInlineSize,
            "dvb" => Self::DynamicViewportBlockSize,
            "dvmin" => Self::DynamicViewportMin,
            "dvmax" => Self::DynamicViewportMax,
            "cqw" => Self::ContainerWidth,
            "cqh" => Self::ContainerHeight,
            "cqi" => Self::ContainerInlineSize,
            "cqb" => Self::ContainerBlockSize,
            "cqmin" => Self::ContainerMin,
            "cqmax" => Self::ContainerMax,
            "deg" => Self::Degrees,
            "rad" => Self::Radians,
            "grad" => Self::Gradians,
            "turn" => Self::Turns,
            "s" => Self::Seconds,
            "ms" => Self::Milliseconds,
            "hz" => Self::Hertz,
            "khz" => Self::Kilohertz,
            "dppx" => Self::DotsPerPixel,
            "x" => Self::X,
            "dpi" => Self::DotsPerInch,
            "dpcm" => Self::DotsPerCentimeter,
            "fr" => Self::Fraction,
            _ => return None,
        };
        Some(unit)
    }

    /// The category this unit belongs to.
    #[must_use]
    pub const fn category(self) -> UnitCategory {
        match self {
            Self::Number | Self::Integer => UnitCategory::Number,
            Self::Percentage => UnitCategory::Percent,
            Self::Degrees | Self::Radians | Self::Gradians | Self::Turns => UnitCategory::Angle,
            Self::Seconds | Self::Milliseconds => UnitCategory::Time,
            Self::Hertz | Self::Kilohertz => UnitCategory::Frequency,
            Self::DotsPerPixel | Self::X | Self::DotsPerInch | Self::DotsPerCentimeter => {
                UnitCategory::Resolution
            }
            Self::Fraction => UnitCategory::Flex,
            Self::Unknown => UnitCategory::Other,
            _ => UnitCategory::Length,
        }
    }

    /// The canonical unit of this unit's category, if it has one.
    ///
    /// Integers canonicalize to [`UnitType::Number`]; relative lengths have
    /// no conversion and map to pixels only through layout information.
    #[must_use]
    pub const fn canonical_unit(self) -> Self {
        match self.category() {
            UnitCategory::Number => Self::Number,
            UnitCategory::Length => Self::Pixels,
            UnitCategory::Angle => Self::Degrees,
            UnitCategory::Time => Self::Seconds,
            UnitCategory::Frequency => Self::Hertz,
            UnitCategory::Resolution => Self::DotsPerPixel,
            UnitCategory::Percent | UnitCategory::Flex | UnitCategory::Other => self,
        }
    }

    /// The factor converting one of this unit into its canonical unit.
    ///
    /// [CSS Values 4 § 6.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    ///
    /// "1in = 2.54cm = 96px", "1pt = 1/72th of 1in", "1pc = 1/6th of 1in",
    /// "1Q = 1/40th of 1cm". Relative units return 1.
    #[must_use]
    pub fn conversion_to_canonical(self) -> f64 {
        match self {
            Self::Centimeters => 96.0 / 2.54,
            Self::Millimeters => 96.0 / 25.4,
            Self::QuarterMillimeters => 96.0 / 101.6,
            Self::Inches => 96.0,
            Self::Points => 96.0 / 72.0,
            Self::Picas => 16.0,
            Self::Radians => 180.0 / core::f64::consts::PI,
            Self::Gradians => 0.9,
            Self::Turns => 360.0,
            Self::Milliseconds => 0.001,
            Self::Kilohertz => 1000.0,
            Self::DotsPerInch => 1.0 / 96.0,
            Self::DotsPerCentimeter => 2.54 / 96.0,
            _ => 1.0,
        }
    }

    /// True for percentages, font-relative, viewport-relative and
    /// container-relative lengths.
    #[must_use]
    pub const fn is_relative_unit(self) -> bool {
        self.is_font_relative()
            || self.is_viewport_percentage_length()
            || self.is_container_percentage_length()
            || matches!(self, Self::Percentage)
    }

    /// [CSS Values 4 § 6.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    #[must_use]
    pub const fn is_font_relative(self) -> bool {
        matches!(
            self,
            Self::Ems
                | Self::Rems
                | Self::Exs
                | Self::Rexs
                | Self::Chs
                | Self::Rchs
                | Self::Ics
                | Self::Rics
                | Self::Caps
                | Self::Rcaps
                | Self::LineHeights
                | Self::RootLineHeights
        )
    }

    /// Any `v*`, `sv*`, `lv*` or `dv*` unit.
    #[must_use]
    pub const fn is_viewport_percentage_length(self) -> bool {
        self.is_static_viewport_unit() || self.is_dynamic_viewport_unit()
    }

    /// Units resolved against the small or large viewport, including the
    /// unprefixed `v*` units.
    #[must_use]
    pub const fn is_static_viewport_unit(self) -> bool {
        matches!(
            self,
            Self::ViewportWidth
                | Self::ViewportHeight
                | Self::ViewportInlineSize
                | Self::ViewportBlockSize
                | Self::ViewportMin
                | Self::ViewportMax
                | Self::SmallViewportWidth
                | Self::SmallViewportHeight
                | Self::SmallViewportInlineSize
                | Self::SmallViewportBlockSize
                | Self::SmallViewportMin
                | Self::SmallViewportMax
                | Self::LargeViewportWidth
                | Self::LargeViewportHeight
                | Self::LargeViewportInlineSize
                | Self::LargeViewportBlockSize
                | Self::LargeViewportMin
                | Self::LargeViewportMax
        )
    }

    /// The `dv*` units.
    #[must_use]
    pub const fn is_dynamic_viewport_unit(self) -> bool {
        matches!(
            self,
            Self::DynamicViewportWidth
                | Self::DynamicViewportHeight
                | Self::DynamicViewportInlineSize
                | Self::DynamicViewportBlockSize
                | Self::DynamicViewportMin
                | Self::DynamicViewportMax
        )
    }

    /// The `cq*` units.
    #[must_use]
    pub const fn is_container_percentage_length(self) -> bool {
        matches!(
            self,
            Self::ContainerWidth
                | Self::ContainerHeight
                | Self::ContainerInlineSize
                | Self::ContainerBlockSize
                | Self::ContainerMin
                | Self::ContainerMax
        )
    }

    /// True for lengths, absolute or relative, excluding percentages.
    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(self.category(), UnitCategory::Length)
    }

    /// True for units that convert to their canonical unit without any
    /// layout information.
    #[must_use]
    pub const fn is_absolute(self) -> bool {
        match self.category() {
            UnitCategory::Length => !self.is_relative_unit(),
            UnitCategory::Angle
            | UnitCategory::Time
            | UnitCategory::Frequency
            | UnitCategory::Resolution => true,
            _ => false,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_str())
    }
}

/// Accumulated per-unit totals of a length expression.
///
/// Absolute lengths are folded into the [`UnitType::Pixels`] entry; every
/// relative unit keeps its own entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthArray {
    /// Value per unit
    pub values: BTreeMap<UnitType, f64>,
}

impl LengthArray {
    /// Add `value` in `unit`, folding absolute lengths into pixels.
    pub fn add(&mut self, unit: UnitType, value: f64) {
        let (key, value) = if unit.is_absolute() {
            (UnitType::Pixels, value * unit.conversion_to_canonical())
        } else {
            (unit, value)
        };
        *self.values.entry(key).or_insert(0.0) += value;
    }

    /// The accumulated value for `unit`, zero if absent.
    #[must_use]
    pub fn get(&self, unit: UnitType) -> f64 {
        self.values.get(&unit).copied().unwrap_or(0.0)
    }
}

/// The set of length units appearing in a value.
pub type LengthTypeFlags = BTreeSet<UnitType>;

/// True if any unit in `flags` resolves against the small or large viewport.
#[must_use]
pub fn has_static_viewport_units(flags: &LengthTypeFlags) -> bool {
    flags.iter().any(|unit| unit.is_static_viewport_unit())
}

/// True if any unit in `flags` resolves against the dynamic viewport.
#[must_use]
pub fn has_dynamic_viewport_units(flags: &LengthTypeFlags) -> bool {
    flags.iter().any(|unit| unit.is_dynamic_viewport_unit())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn unit_strings_round_trip() {
        for unit in UnitType::iter() {
            if unit.unit_str().is_empty() {
                continue;
            }
            assert_eq!(UnitType::from_unit_str(unit.unit_str()), Some(unit));
        }
    }

    #[test]
    fn unit_lookup_is_case_insensitive() {
        assert_eq!(UnitType::from_unit_str("PX"), Some(UnitType::Pixels));
        assert_eq!(UnitType::from_unit_str("kHz"), Some(UnitType::Kilohertz));
        assert_eq!(UnitType::from_unit_str("foo"), None);
    }

    #[test]
    fn length_array_folds_absolute_units() {
        let mut array = LengthArray::default();
        array.add(UnitType::Inches, 1.0);
        array.add(UnitType::Pixels, 4.0);
        array.add(UnitType::Ems, 2.0);
        assert!((array.get(UnitType::Pixels) - 100.0).abs() < 1e-9);
        assert!((array.get(UnitType::Ems) - 2.0).abs() < 1e-9);
    }
}
