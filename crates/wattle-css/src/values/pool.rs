//! Interned values for the literals stylesheets use most.
//!
//! A pool belongs to one [`ParserContext`](crate::parser::ParserContext) and
//! lives as long as it does. Handing out shared nodes keeps equal small
//! literals from being allocated once per declaration.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use strum::IntoEnumIterator;

use super::{CSSValue, ColorValue, CssWideKeyword, NumericValue};
use crate::units::UnitType;

/// Integers `0..POOLED_INTEGERS` are pooled per unit.
const POOLED_INTEGERS: usize = 256;

/// Cache of shared value nodes.
#[derive(Debug)]
pub struct ValuePool {
    pixels: RefCell<Vec<Option<Rc<CSSValue>>>>,
    percents: RefCell<Vec<Option<Rc<CSSValue>>>>,
    integers: RefCell<Vec<Option<Rc<CSSValue>>>>,
    identifiers: RefCell<HashMap<String, Rc<CSSValue>>>,
    css_wide: Vec<(CssWideKeyword, Rc<CSSValue>)>,
    colors: Vec<Rc<CSSValue>>,
}

impl Default for ValuePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuePool {
    /// An empty pool. Only the CSS-wide keywords and the three basic colors
    /// are created up front.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: RefCell::new(vec![None; POOLED_INTEGERS]),
            percents: RefCell::new(vec![None; POOLED_INTEGERS]),
            integers: RefCell::new(vec![None; POOLED_INTEGERS]),
            identifiers: RefCell::new(HashMap::new()),
            css_wide: CssWideKeyword::iter()
                .map(|keyword| (keyword, Rc::new(CSSValue::CssWide(keyword))))
                .collect(),
            colors: [ColorValue::TRANSPARENT, ColorValue::BLACK, ColorValue::WHITE]
                .into_iter()
                .map(|color| Rc::new(CSSValue::Color(color)))
                .collect(),
        }
    }

    /// The shared node for a CSS-wide keyword.
    #[must_use]
    pub fn css_wide(&self, keyword: CssWideKeyword) -> Rc<CSSValue> {
        self.css_wide
            .iter()
            .find(|(candidate, _)| *candidate == keyword)
            .map_or_else(
                || Rc::new(CSSValue::CssWide(keyword)),
                |(_, value)| Rc::clone(value),
            )
    }

    /// A keyword, lowercased and shared.
    #[must_use]
    pub fn identifier(&self, name: &str) -> Rc<CSSValue> {
        let name = name.to_ascii_lowercase();
        let mut identifiers = self.identifiers.borrow_mut();
        Rc::clone(
            identifiers
                .entry(name)
                .or_insert_with_key(|name| Rc::new(CSSValue::Identifier(name.clone()))),
        )
    }

    /// A color, shared for transparent, black and white.
    #[must_use]
    pub fn color(&self, color: ColorValue) -> Rc<CSSValue> {
        self.colors
            .iter()
            .find(|candidate| matches!(candidate.as_ref(), CSSValue::Color(c) if *c == color))
            .map_or_else(|| Rc::new(CSSValue::Color(color)), Rc::clone)
    }

    /// A numeric literal. Small non-negative integers in px, `%` or as
    /// `<integer>` come from the pool.
    #[must_use]
    pub fn numeric(&self, value: f64, unit: UnitType) -> Rc<CSSValue> {
        let cache = match unit {
            UnitType::Pixels => &self.pixels,
            UnitType::Percentage => &self.percents,
            UnitType::Integer => &self.integers,
            _ => return Rc::new(CSSValue::Numeric(NumericValue::new(value, unit))),
        };
        let Some(index) = pooled_index(value) else {
            return Rc::new(CSSValue::Numeric(NumericValue::new(value, unit)));
        };
        let mut slots = cache.borrow_mut();
        match slots.get_mut(index) {
            Some(slot) => Rc::clone(
                slot.get_or_insert_with(|| Rc::new(CSSValue::Numeric(NumericValue::new(value, unit)))),
            ),
            None => Rc::new(CSSValue::Numeric(NumericValue::new(value, unit))),
        }
    }

    /// How many numeric and keyword nodes the pool currently holds.
    #[must_use]
    pub fn len(&self) -> usize {
        let filled = |cache: &RefCell<Vec<Option<Rc<CSSValue>>>>| {
            cache.borrow().iter().filter(|slot| slot.is_some()).count()
        };
        filled(&self.pixels)
            + filled(&self.percents)
            + filled(&self.integers)
            + self.identifiers.borrow().len()
    }

    /// True when nothing has been pooled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn pooled_index(value: f64) -> Option<usize> {
    if value.is_sign_negative() || value.fract() != 0.0 || value >= POOLED_INTEGERS as f64 {
        return None;
    }
    Some(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_are_shared() {
        let pool = ValuePool::new();
        let a = pool.numeric(12.0, UnitType::Pixels);
        let b = pool.numeric(12.0, UnitType::Pixels);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn other_values_are_fresh() {
        let pool = ValuePool::new();
        let a = pool.numeric(0.5, UnitType::Pixels);
        let b = pool.numeric(0.5, UnitType::Pixels);
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(a, b);
        let big = pool.numeric(256.0, UnitType::Percentage);
        assert_eq!(big.css_text(), "256%");
        assert!(pool.numeric(-0.0, UnitType::Pixels).css_text() == "0px");
        assert!(pool.is_empty());
    }

    #[test]
    fn identifiers_are_lowercased() {
        let pool = ValuePool::new();
        let a = pool.identifier("AUTO");
        let b = pool.identifier("auto");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.css_text(), "auto");
    }
}
