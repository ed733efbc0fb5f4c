//! Length resolution context and resolved length representations.
//!
//! [CSS Values and Units Level 4 § 6](https://www.w3.org/TR/css-values-4/#lengths)

use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use serde::Serialize;

use crate::units::UnitType;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    /// Width in px
    pub width: f64,
    /// Height in px
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything needed to turn a relative length into pixels.
///
/// Only consulted when a value is read, never while parsing. Font metrics
/// are in zoomed pixels; absolute lengths and unitless numbers are scaled
/// by `zoom` on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthResolver {
    /// Computed `font-size` of the element
    pub font_size: f64,
    /// Computed `font-size` of the root element
    pub root_font_size: f64,
    /// x-height of the element's font; half the font size when unknown
    pub x_height: Option<f64>,
    /// Advance of "0" in the element's font; half the font size when unknown
    pub ch_width: Option<f64>,
    /// Computed `line-height` in px; 1.2 × font size when unknown
    pub line_height: Option<f64>,
    /// Effective zoom factor
    pub zoom: f64,
    /// The small viewport (`sv*` units)
    pub small_viewport: Size,
    /// The large viewport (`lv*` and plain `v*` units)
    pub large_viewport: Size,
    /// The dynamic viewport (`dv*` units)
    pub dynamic_viewport: Size,
    /// The size of the query container, when one exists (`cq*` units)
    pub container: Option<Size>,
}

impl Default for LengthResolver {
    fn default() -> Self {
        let viewport = Size::new(800.0, 600.0);
        Self {
            font_size: DEFAULT_FONT_SIZE_PX,
            root_font_size: DEFAULT_FONT_SIZE_PX,
            x_height: None,
            ch_width: None,
            line_height: None,
            zoom: 1.0,
            small_viewport: viewport,
            large_viewport: viewport,
            dynamic_viewport: viewport,
            container: None,
        }
    }
}

impl LengthResolver {
    /// A resolver with every viewport set to `width` × `height`.
    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        let viewport = Size::new(width, height);
        self.small_viewport = viewport;
        self.large_viewport = viewport;
        self.dynamic_viewport = viewport;
        self
    }

    /// A resolver with the given zoom factor.
    #[must_use]
    pub const fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// A resolver with the given element and root font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self.root_font_size = font_size;
        self
    }

    fn x_height(&self) -> f64 {
        self.x_height.unwrap_or(self.font_size / 2.0)
    }

    fn ch_width(&self) -> f64 {
        self.ch_width.unwrap_or(self.font_size / 2.0)
    }

    fn line_height(&self) -> f64 {
        self.line_height.unwrap_or(self.font_size * 1.2)
    }

    /// The container size, falling back to the small viewport.
    ///
    /// [CSS Containment 3 § 6.1](https://www.w3.org/TR/css-contain-3/#container-lengths)
    ///
    /// "If no eligible query container can be found, then use the small
    /// viewport size for that axis."
    fn container(&self) -> Size {
        self.container.unwrap_or(self.small_viewport)
    }

    /// Convert `value` in `unit` to pixels.
    ///
    /// Returns `None` for units that are not lengths (percentages included).
    #[must_use]
    pub fn length_to_px(&self, value: f64, unit: UnitType) -> Option<f64> {
        let percent_of = |extent: f64| value * extent / 100.0;
        let px = match unit {
            UnitType::Pixels
            | UnitType::Centimeters
            | UnitType::Millimeters
            | UnitType::QuarterMillimeters
            | UnitType::Inches
            | UnitType::Points
            | UnitType::Picas => value * unit.conversion_to_canonical() * self.zoom,
            UnitType::Ems | UnitType::Ics | UnitType::Caps => value * self.font_size,
            UnitType::Rems | UnitType::Rics | UnitType::Rcaps => value * self.root_font_size,
            UnitType::Exs => value * self.x_height(),
            UnitType::Rexs => value * self.root_font_size / 2.0,
            UnitType::Chs => value * self.ch_width(),
            UnitType::Rchs => value * self.root_font_size / 2.0,
            UnitType::LineHeights => value * self.line_height(),
            UnitType::RootLineHeights => value * self.root_font_size * 1.2,
            UnitType::ViewportWidth
            | UnitType::ViewportInlineSize
            | UnitType::LargeViewportWidth
            | UnitType::LargeViewportInlineSize => percent_of(self.large_viewport.width),
            UnitType::ViewportHeight
            | UnitType::ViewportBlockSize
            | UnitType::LargeViewportHeight
            | UnitType::LargeViewportBlockSize => percent_of(self.large_viewport.height),
            UnitType::ViewportMin | UnitType::LargeViewportMin => {
                percent_of(self.large_viewport.width.min(self.large_viewport.height))
            }
            UnitType::ViewportMax | UnitType::LargeViewportMax => {
                percent_of(self.large_viewport.width.max(self.large_viewport.height))
            }
            UnitType::SmallViewportWidth | UnitType::SmallViewportInlineSize => {
                percent_of(self.small_viewport.width)
            }
            UnitType::SmallViewportHeight | UnitType::SmallViewportBlockSize => {
                percent_of(self.small_viewport.height)
            }
            UnitType::SmallViewportMin => {
                percent_of(self.small_viewport.width.min(self.small_viewport.height))
            }
            UnitType::SmallViewportMax => {
                percent_of(self.small_viewport.width.max(self.small_viewport.height))
            }
            UnitType::DynamicViewportWidth | UnitType::DynamicViewportInlineSize => {
                percent_of(self.dynamic_viewport.width)
            }
            UnitType::DynamicViewportHeight | UnitType::DynamicViewportBlockSize => {
                percent_of(self.dynamic_viewport.height)
            }
            UnitType::DynamicViewportMin => {
                percent_of(self.dynamic_viewport.width.min(self.dynamic_viewport.height))
            }
            UnitType::DynamicViewportMax => {
                percent_of(self.dynamic_viewport.width.max(self.dynamic_viewport.height))
            }
            UnitType::ContainerWidth | UnitType::ContainerInlineSize => {
                percent_of(self.container().width)
            }
            UnitType::ContainerHeight | UnitType::ContainerBlockSize => {
                percent_of(self.container().height)
            }
            UnitType::ContainerMin => {
                let size = self.container();
                percent_of(size.width.min(size.height))
            }
            UnitType::ContainerMax => {
                let size = self.container();
                percent_of(size.width.max(size.height))
            }
            _ => return None,
        };
        Some(px)
    }
}

/// A length that mixes an absolute part and a percentage part, as produced
/// by `calc(<length> + <percentage>)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PixelsAndPercent {
    /// Absolute part in zoomed px
    pub pixels: f64,
    /// Percentage part
    pub percent: f64,
    /// True if a length contributed to `pixels`
    pub has_explicit_pixels: bool,
    /// True if a percentage contributed to `percent`
    pub has_explicit_percent: bool,
}

impl PixelsAndPercent {
    /// Only a pixel part.
    #[must_use]
    pub const fn pixels(pixels: f64) -> Self {
        Self {
            pixels,
            percent: 0.0,
            has_explicit_pixels: true,
            has_explicit_percent: false,
        }
    }

    /// Only a percentage part.
    #[must_use]
    pub const fn percent(percent: f64) -> Self {
        Self {
            pixels: 0.0,
            percent,
            has_explicit_pixels: false,
            has_explicit_percent: true,
        }
    }
}

impl AddAssign for PixelsAndPercent {
    fn add_assign(&mut self, other: Self) {
        self.pixels += other.pixels;
        self.percent += other.percent;
        self.has_explicit_pixels |= other.has_explicit_pixels;
        self.has_explicit_percent |= other.has_explicit_percent;
    }
}

impl SubAssign for PixelsAndPercent {
    fn sub_assign(&mut self, other: Self) {
        self.pixels -= other.pixels;
        self.percent -= other.percent;
        self.has_explicit_pixels |= other.has_explicit_pixels;
        self.has_explicit_percent |= other.has_explicit_percent;
    }
}

impl MulAssign<f64> for PixelsAndPercent {
    fn mul_assign(&mut self, factor: f64) {
        self.pixels *= factor;
        self.percent *= factor;
    }
}

impl Add for PixelsAndPercent {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sub for PixelsAndPercent {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl Mul<f64> for PixelsAndPercent {
    type Output = Self;

    fn mul(mut self, factor: f64) -> Self {
        self *= factor;
        self
    }
}

/// A used-value length: fixed pixels, a bare percentage, or a mix of both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Length {
    /// Zoomed px
    Fixed(f64),
    /// A percentage of the reference length
    Percent(f64),
    /// `calc()` of a pixel and a percentage part
    Calculated(PixelsAndPercent),
}

impl Length {
    /// True for [`Length::Calculated`].
    #[must_use]
    pub const fn is_calculated(&self) -> bool {
        matches!(self, Self::Calculated(_))
    }

    /// The pixel/percent decomposition of this length.
    #[must_use]
    pub const fn pixels_and_percent(&self) -> PixelsAndPercent {
        match *self {
            Self::Fixed(px) => PixelsAndPercent::pixels(px),
            Self::Percent(pct) => PixelsAndPercent::percent(pct),
            Self::Calculated(value) => value,
        }
    }

    /// Resolve against a reference length in px.
    #[must_use]
    pub fn resolve(&self, reference: f64) -> f64 {
        let value = self.pixels_and_percent();
        value.pixels + value.percent * reference / 100.0
    }
}
