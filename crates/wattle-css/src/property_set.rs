//! Property-value sets: the declarations of one style rule or `style`
//! attribute.
//!
//! [CSSOM § 6.6 CSS Declaration Blocks](https://drafts.csswg.org/cssom/#css-declaration-blocks)
//!
//! Entries keep declaration order. A property appears at most once;
//! setting it again overwrites the entry in place. Custom properties are
//! keyed by their full name, so many may coexist.

use std::rc::Rc;

use serde::Serialize;

use crate::parser::context::ParserContext;
use crate::properties::{PropertyId, PropertyName};
use crate::property_parser::{parse_declaration, strip_important};
use crate::serializer::{serialize_declaration_block, serialize_shorthand};
use crate::tokenizer::tokenize;
use crate::values::CSSValue;

/// One declaration in a property-value set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CSSProperty {
    /// The property, known or custom
    pub name: PropertyName,
    /// The parsed value
    pub value: Rc<CSSValue>,
    /// `!important`
    pub important: bool,
}

impl CSSProperty {
    /// A declaration entry.
    #[must_use]
    pub const fn new(name: PropertyName, value: Rc<CSSValue>, important: bool) -> Self {
        Self {
            name,
            value,
            important,
        }
    }

    /// The property id, or `None` for custom properties.
    #[must_use]
    pub const fn id(&self) -> Option<PropertyId> {
        self.name.id()
    }
}

/// The read side shared by both set variants.
pub trait PropertyValueSet {
    /// Every entry, in declaration order.
    fn properties(&self) -> &[CSSProperty];

    /// Number of entries.
    fn property_count(&self) -> usize {
        self.properties().len()
    }

    /// The entry at `index`.
    fn property_at(&self, index: usize) -> Option<&CSSProperty> {
        self.properties().get(index)
    }

    /// True when there are no entries.
    fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    /// The index of the entry for `name`.
    fn find_property_index(&self, name: &PropertyName) -> Option<usize> {
        self.properties()
            .iter()
            .position(|property| &property.name == name)
    }

    /// The entry for `name` itself, ignoring `all`.
    fn get_property(&self, name: &PropertyName) -> Option<&CSSProperty> {
        self.find_property_index(name)
            .and_then(|index| self.property_at(index))
    }

    /// True if `name` has its own entry.
    fn has_property(&self, name: &PropertyName) -> bool {
        self.find_property_index(name).is_some()
    }

    /// The entry that decides the value of the longhand `id`.
    ///
    /// [CSS Cascade 5 § 3.2](https://www.w3.org/TR/css-cascade-5/#all-shorthand)
    ///
    /// An `all` declaration stands in for every longhand it affects. Between
    /// `all` and the longhand's own entry, an important declaration beats a
    /// normal one and otherwise the later one wins.
    fn effective_property(&self, id: PropertyId) -> Option<&CSSProperty> {
        let own_index = self.find_property_index(&PropertyName::Known(id));
        let all_index = if id.is_affected_by_all() {
            self.find_property_index(&PropertyName::Known(PropertyId::All))
        } else {
            None
        };
        let index = match (own_index, all_index) {
            (Some(own), Some(all)) => {
                let own_entry = self.property_at(own)?;
                let all_entry = self.property_at(all)?;
                if own_entry.important == all_entry.important {
                    own.max(all)
                } else if own_entry.important {
                    own
                } else {
                    all
                }
            }
            (own, all) => own.or(all)?,
        };
        self.property_at(index)
    }

    /// The value that applies to `name`, following `all` for longhands.
    fn get_property_css_value(&self, name: &PropertyName) -> Option<Rc<CSSValue>> {
        let property = match name.id() {
            Some(id) if !id.is_shorthand() => self.effective_property(id),
            _ => self.get_property(name),
        }?;
        Some(Rc::clone(&property.value))
    }

    /// [CSSOM § 6.6.1 `getPropertyValue()`](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// "If property is a shorthand property, then follow these substeps:
    /// … If important flags of all declarations in list are same, then
    /// return the serialization of list. Return the empty string."
    fn get_property_value(&self, name: &PropertyName) -> String
    where
        Self: Sized,
    {
        match name.id() {
            Some(PropertyId::All) => self
                .get_property(name)
                .map(|property| property.value.css_text())
                .unwrap_or_default(),
            Some(id) if id.is_shorthand() => serialize_shorthand(self, id),
            _ => self
                .get_property_css_value(name)
                .map(|value| value.css_text())
                .unwrap_or_default(),
        }
    }

    /// True if the declaration that applies to `name` is `!important`. For a
    /// shorthand, all of its longhands must be.
    fn is_property_important(&self, name: &PropertyName) -> bool {
        match name.id() {
            Some(id) if id != PropertyId::All && id.is_shorthand() => {
                id.longhands().iter().all(|longhand| {
                    self.effective_property(*longhand)
                        .is_some_and(|property| property.important)
                })
            }
            Some(id) if id != PropertyId::All => self
                .effective_property(id)
                .is_some_and(|property| property.important),
            _ => self
                .get_property(name)
                .is_some_and(|property| property.important),
        }
    }

    /// [CSSOM § 6.7.1 Serializing a declaration block](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
    fn as_text(&self) -> String
    where
        Self: Sized,
    {
        serialize_declaration_block(self)
    }

    /// True if both sets hold equal entries in the same order.
    fn properties_equal(&self, other: &dyn PropertyValueSet) -> bool {
        self.properties() == other.properties()
    }

    /// A mutable copy holding only the entries for `ids`.
    fn copy_properties_in_set(&self, ids: &[PropertyId]) -> MutablePropertyValueSet {
        MutablePropertyValueSet {
            properties: self
                .properties()
                .iter()
                .filter(|property| property.id().is_some_and(|id| ids.contains(&id)))
                .cloned()
                .collect(),
        }
    }
}

/// A set that is never modified once built, as stored on a style rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImmutablePropertyValueSet {
    properties: Rc<[CSSProperty]>,
}

impl ImmutablePropertyValueSet {
    /// A set holding `properties`, which must already be deduplicated.
    #[must_use]
    pub fn new(properties: Vec<CSSProperty>) -> Self {
        Self {
            properties: properties.into(),
        }
    }

    /// A mutable copy.
    #[must_use]
    pub fn to_mutable(&self) -> MutablePropertyValueSet {
        MutablePropertyValueSet {
            properties: self.properties.to_vec(),
        }
    }
}

impl PropertyValueSet for ImmutablePropertyValueSet {
    fn properties(&self) -> &[CSSProperty] {
        &self.properties
    }
}

/// A set that can be edited, as behind `element.style`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MutablePropertyValueSet {
    properties: Vec<CSSProperty>,
}

impl MutablePropertyValueSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// An immutable snapshot.
    #[must_use]
    pub fn to_immutable(&self) -> ImmutablePropertyValueSet {
        ImmutablePropertyValueSet::new(self.properties.clone())
    }

    /// Add or replace one entry. Returns true if the set changed.
    ///
    /// An existing entry for the same property is overwritten in place and
    /// keeps its position.
    pub fn set_property(&mut self, property: CSSProperty) -> bool {
        match self.find_property_index(&property.name) {
            Some(index) => {
                if self.properties[index] == property {
                    return false;
                }
                self.properties[index] = property;
            }
            None => self.properties.push(property),
        }
        true
    }

    /// Set `name` from CSS text, expanding shorthands. `text` may end in
    /// `!important`. Returns false and leaves the set unchanged if the
    /// value is invalid for the property.
    pub fn set_property_text(
        &mut self,
        name: &PropertyName,
        text: &str,
        context: &ParserContext,
    ) -> bool {
        let tokens = tokenize(text);
        let (value, important) = strip_important(&tokens);
        let mut parsed = Vec::new();
        if !parse_declaration(name, value, important, context, &mut parsed) {
            return false;
        }
        for property in parsed {
            let _ = self.set_property(property);
        }
        true
    }

    /// Remove the entry for `name`, or every longhand of a shorthand.
    /// Returns true if anything was removed.
    pub fn remove_property(&mut self, name: &PropertyName) -> bool {
        match name.id() {
            Some(id) if id != PropertyId::All && id.is_shorthand() => {
                self.remove_properties(id.longhands())
            }
            _ => match self.find_property_index(name) {
                Some(index) => {
                    let _ = self.properties.remove(index);
                    true
                }
                None => false,
            },
        }
    }

    /// Remove the entries for `ids`. Returns true if anything was removed.
    pub fn remove_properties(&mut self, ids: &[PropertyId]) -> bool {
        let before = self.properties.len();
        self.properties
            .retain(|property| !property.id().is_some_and(|id| ids.contains(&id)));
        self.properties.len() != before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Copy every entry of `other` into this set; `other` wins on conflict.
    pub fn merge_and_override_on_conflict(&mut self, other: &dyn PropertyValueSet) {
        for property in other.properties() {
            let _ = self.set_property(property.clone());
        }
    }
}

impl PropertyValueSet for MutablePropertyValueSet {
    fn properties(&self) -> &[CSSProperty] {
        &self.properties
    }
}

impl From<MutablePropertyValueSet> for ImmutablePropertyValueSet {
    fn from(set: MutablePropertyValueSet) -> Self {
        Self::new(set.properties)
    }
}

impl From<&ImmutablePropertyValueSet> for MutablePropertyValueSet {
    fn from(set: &ImmutablePropertyValueSet) -> Self {
        set.to_mutable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> PropertyName {
        PropertyName::parse(text).unwrap_or_else(|| panic!("unknown property {text}"))
    }

    #[test]
    fn setting_twice_overwrites_in_place() {
        let context = ParserContext::new();
        let mut set = MutablePropertyValueSet::new();
        assert!(set.set_property_text(&name("color"), "red", &context));
        assert!(set.set_property_text(&name("width"), "1px", &context));
        assert!(set.set_property_text(&name("color"), "blue", &context));
        assert_eq!(set.property_count(), 2);
        assert_eq!(set.property_at(0).map(|p| p.value.css_text()).as_deref(), Some("blue"));
    }

    #[test]
    fn all_applies_unless_overridden_later() {
        let context = ParserContext::new();
        let mut set = MutablePropertyValueSet::new();
        assert!(set.set_property_text(&name("color"), "red", &context));
        assert!(set.set_property_text(&name("all"), "inherit", &context));
        assert!(set.set_property_text(&name("width"), "1px", &context));
        assert_eq!(set.get_property_value(&name("color")), "inherit");
        assert_eq!(set.get_property_value(&name("width")), "1px");
        assert_eq!(set.get_property_value(&name("direction")), "");
        assert_eq!(set.get_property_value(&name("all")), "inherit");
    }

    #[test]
    fn important_beats_a_later_all() {
        let context = ParserContext::new();
        let mut set = MutablePropertyValueSet::new();
        assert!(set.set_property_text(&name("color"), "red !important", &context));
        assert!(set.set_property_text(&name("all"), "unset", &context));
        assert_eq!(set.get_property_value(&name("color")), "red");
        assert!(set.is_property_important(&name("color")));
    }

    #[test]
    fn invalid_values_leave_the_set_alone() {
        let context = ParserContext::new();
        let mut set = MutablePropertyValueSet::new();
        assert!(!set.set_property_text(&name("width"), "red", &context));
        assert!(set.is_empty());
    }
}
