//! Per-parse configuration.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::values::ValuePool;

/// Which dialect of CSS is being parsed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ParserMode {
    /// Author stylesheets in a no-quirks document.
    #[default]
    Standard,
    /// [Quirks Mode](https://quirks.spec.whatwg.org/): unitless lengths and
    /// hashless hex colors are accepted for some properties.
    Quirks,
    /// The user agent stylesheet.
    UASheet,
    /// Presentation attributes on SVG elements, where unitless lengths are
    /// always accepted.
    SVGAttribute,
}

/// Everything a parse needs besides the text itself.
///
/// Built with a chain of `with_*` calls:
///
/// ```
/// use wattle_css::parser::{ParserContext, ParserMode};
///
/// let context = ParserContext::new()
///     .with_mode(ParserMode::Quirks)
///     .with_fast_path(false);
/// assert!(context.is_quirks_mode());
/// ```
#[derive(Debug)]
pub struct ParserContext {
    /// The dialect
    pub mode: ParserMode,
    /// Accept `color-mix()`
    pub color_mix_enabled: bool,
    /// Accept `light-dark()`
    pub light_dark_enabled: bool,
    /// Accept the `cq*` units
    pub container_units_enabled: bool,
    /// Report dropped declarations and unknown at-rules as warnings
    pub report_dropped_declarations: bool,
    /// Try the fast path before the full grammar
    pub use_fast_path: bool,
    pool: ValuePool,
}

impl Default for ParserContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserContext {
    /// Standard mode with every feature enabled and reporting off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ParserMode::Standard,
            color_mix_enabled: true,
            light_dark_enabled: true,
            container_units_enabled: true,
            report_dropped_declarations: false,
            use_fast_path: true,
            pool: ValuePool::new(),
        }
    }

    /// Set the parser mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ParserMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the fast path.
    #[must_use]
    pub const fn with_fast_path(mut self, enabled: bool) -> Self {
        self.use_fast_path = enabled;
        self
    }

    /// Enable or disable `color-mix()`.
    #[must_use]
    pub const fn with_color_mix(mut self, enabled: bool) -> Self {
        self.color_mix_enabled = enabled;
        self
    }

    /// Enable or disable `light-dark()`.
    #[must_use]
    pub const fn with_light_dark(mut self, enabled: bool) -> Self {
        self.light_dark_enabled = enabled;
        self
    }

    /// Enable or disable container units.
    #[must_use]
    pub const fn with_container_units(mut self, enabled: bool) -> Self {
        self.container_units_enabled = enabled;
        self
    }

    /// Enable or disable warnings for dropped declarations.
    #[must_use]
    pub const fn with_reporting(mut self, enabled: bool) -> Self {
        self.report_dropped_declarations = enabled;
        self
    }

    /// True in quirks mode.
    #[must_use]
    pub const fn is_quirks_mode(&self) -> bool {
        matches!(self.mode, ParserMode::Quirks)
    }

    /// True when parsing SVG presentation attributes.
    #[must_use]
    pub const fn is_svg_attribute_mode(&self) -> bool {
        matches!(self.mode, ParserMode::SVGAttribute)
    }

    /// The value pool shared by everything parsed with this context.
    #[must_use]
    pub const fn pool(&self) -> &ValuePool {
        &self.pool
    }
}
