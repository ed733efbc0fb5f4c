//! Shorthand serialization.
//!
//! [CSSOM § 6.7.2 Serializing CSS values](https://drafts.csswg.org/cssom/#serialize-a-css-value)
//!
//! The inverse of shorthand expansion: given the longhands in a
//! property-value set, rebuild the shortest shorthand text that expands
//! back to them. When a shorthand cannot represent the longhands exactly
//! the result is the empty string, and callers list the longhands instead.

use std::rc::Rc;

use crate::parser::context::ParserContext;
use crate::properties::{PropertyId, PropertyName};
use crate::property_parser::initial_value;
use crate::property_set::{CSSProperty, PropertyValueSet};
use crate::values::CSSValue;

use PropertyId as P;

/// Serialize the shorthand `id` from the longhands in `set`, or return the
/// empty string.
#[must_use]
pub fn serialize_shorthand(set: &dyn PropertyValueSet, id: PropertyId) -> String {
    let longhands = id.longhands();
    if longhands.is_empty() {
        return String::new();
    }
    let Some(properties) = longhands
        .iter()
        .map(|longhand| set.effective_property(*longhand))
        .collect::<Option<Vec<&CSSProperty>>>()
    else {
        return String::new();
    };
    let values: Vec<Rc<CSSValue>> = properties
        .iter()
        .map(|property| Rc::clone(&property.value))
        .collect();
    if let Some(common) = common_shorthand_checks(&properties, &values) {
        return common;
    }
    let serializer = ShorthandSerializer {
        context: ParserContext::new(),
    };
    serializer.serialize(id, &values)
}

/// [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serialize-a-css-value)
///
/// Checks every shorthand runs first. Returns `Some` when they settle the
/// result:
///
/// - mixed `!important` flags cannot be written as one declaration;
/// - a CSS-wide keyword serializes as itself only when every longhand has it;
/// - longhands still waiting for `var()` substitution serialize as the
///   shorthand's original text only when they all came from it.
fn common_shorthand_checks(properties: &[&CSSProperty], values: &[Rc<CSSValue>]) -> Option<String> {
    let important = properties.first()?.important;
    if properties.iter().any(|property| property.important != important) {
        return Some(String::new());
    }
    let first = values.first()?;
    let special = |value: &CSSValue| value.is_css_wide_keyword() || value.is_pending_substitution();
    if values.iter().any(|value| special(value)) {
        if values.iter().all(|value| value == first) {
            return Some(first.css_text());
        }
        return Some(String::new());
    }
    None
}

/// Per-shorthand contraction rules. Initial values are parsed with a fresh
/// context so they compare structurally with author values.
struct ShorthandSerializer {
    context: ParserContext,
}

impl ShorthandSerializer {
    fn serialize(&self, id: PropertyId, values: &[Rc<CSSValue>]) -> String {
        match id {
            P::Margin
            | P::Padding
            | P::Inset
            | P::ScrollMargin
            | P::ScrollPadding
            | P::BorderWidth
            | P::BorderStyle
            | P::BorderColor => get_4_values(values),
            P::MarginBlock
            | P::MarginInline
            | P::PaddingBlock
            | P::PaddingInline
            | P::InsetBlock
            | P::InsetInline
            | P::ScrollPaddingBlock
            | P::ScrollPaddingInline
            | P::Gap
            | P::Overflow
            | P::BorderSpacing
            | P::PlaceItems
            | P::PlaceContent
            | P::PlaceSelf => get_2_values(values),
            P::BorderTop
            | P::BorderRight
            | P::BorderBottom
            | P::BorderLeft
            | P::Outline
            | P::ColumnRule
            | P::Columns
            | P::TextDecoration
            | P::TextEmphasis
            | P::FlexFlow => self.unordered_shorthand(id.longhands(), values),
            P::Border => self.border(values),
            P::BorderRadius => border_radius(values),
            P::BorderImage => self.border_image(values),
            P::Flex => space_separated(values),
            P::Background => self.background(values),
            P::BackgroundPosition => background_position(values),
            P::Transition => self.transition(values),
            P::GridRow | P::GridColumn => self.grid_line_pair(values),
            P::GridArea => self.grid_area(values),
            P::GridTemplate => grid_template(values),
            P::Grid => self.grid(values),
            _ => {
                debug_assert!(false, "no serializer for shorthand {id}");
                String::new()
            }
        }
    }

    fn initial(&self, id: PropertyId) -> Rc<CSSValue> {
        initial_value(id, &self.context)
    }

    fn is_initial(&self, id: PropertyId, value: &CSSValue) -> bool {
        *self.initial(id) == *value
    }

    /// True if `value` is the initial value of one layer of `id`.
    fn is_layer_initial(&self, id: PropertyId, value: &CSSValue) -> bool {
        let initial = self.initial(id);
        match initial.as_ref() {
            CSSValue::List { items, .. } => items.iter().all(|item| **item == *value),
            other => other == value,
        }
    }

    /// `a || b || c`: the non-initial longhands in order. When every
    /// longhand is initial, the `*-style` one (or the first) stands alone.
    fn unordered_shorthand(&self, longhands: &[PropertyId], values: &[Rc<CSSValue>]) -> String {
        let parts: Vec<String> = longhands
            .iter()
            .zip(values)
            .filter(|(id, value)| !self.is_initial(**id, value))
            .map(|(_, value)| value.css_text())
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }
        let fallback = longhands
            .iter()
            .position(|id| id.into_static().ends_with("-style"))
            .unwrap_or(0);
        values[fallback].css_text()
    }

    /// [CSS Backgrounds 3 § 4.4](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
    ///
    /// Only representable when all four sides agree and `border-image` is
    /// at its initial value.
    fn border(&self, values: &[Rc<CSSValue>]) -> String {
        let (sides, image) = values.split_at(12);
        let same_sides = sides
            .chunks(4)
            .all(|group| group.iter().all(|value| *value == group[0]));
        let image_initial = P::BorderImage
            .longhands()
            .iter()
            .zip(image)
            .all(|(id, value)| self.is_initial(*id, value));
        if !same_sides || !image_initial {
            return String::new();
        }
        let top = [
            Rc::clone(&sides[0]),
            Rc::clone(&sides[4]),
            Rc::clone(&sides[8]),
        ];
        self.unordered_shorthand(
            &[P::BorderTopWidth, P::BorderTopStyle, P::BorderTopColor],
            &top,
        )
    }

    /// `source slice / width / outset repeat`, dropping initial parts.
    fn border_image(&self, values: &[Rc<CSSValue>]) -> String {
        let [source, slice, width, outset, repeat] = values else {
            return String::new();
        };
        let non_initial = |id: PropertyId, value: &Rc<CSSValue>| !self.is_initial(id, value);
        let mut parts = Vec::new();
        if non_initial(P::BorderImageSource, source) {
            parts.push(source.css_text());
        }
        let show_outset = non_initial(P::BorderImageOutset, outset);
        let show_width = show_outset || non_initial(P::BorderImageWidth, width);
        if show_width || non_initial(P::BorderImageSlice, slice) {
            parts.push(slice.css_text());
        }
        if show_width {
            parts.push(format!("/ {}", width.css_text()));
        }
        if show_outset {
            parts.push(format!("/ {}", outset.css_text()));
        }
        if non_initial(P::BorderImageRepeat, repeat) {
            parts.push(repeat.css_text());
        }
        if parts.is_empty() {
            return "none".to_owned();
        }
        parts.join(" ")
    }

    /// [CSS Backgrounds 3 § 3.10](https://www.w3.org/TR/css-backgrounds-3/#background)
    fn background(&self, values: &[Rc<CSSValue>]) -> String {
        let [image, x, y, size, repeat, attachment, origin, clip, color] = values else {
            return String::new();
        };
        let lists: Vec<Vec<Rc<CSSValue>>> = [image, x, y, size, repeat, attachment, origin, clip]
            .iter()
            .map(|value| value.items())
            .collect();
        let Some(layer_count) = lists.iter().map(Vec::len).max() else {
            return String::new();
        };
        let item = |list: usize, layer: usize| lists[list].get(layer).cloned();

        let mut layers = Vec::with_capacity(layer_count);
        for layer in 0..layer_count {
            let mut parts = Vec::new();
            let value = |list: usize, id: PropertyId| {
                item(list, layer).filter(|value| !self.is_layer_initial(id, value))
            };
            if let Some(image) = value(0, P::BackgroundImage) {
                parts.push(image.css_text());
            }
            let size = value(3, P::BackgroundSize);
            let position_x = item(1, layer);
            let position_y = item(2, layer);
            let position_initial = position_x
                .as_ref()
                .is_none_or(|x| self.is_layer_initial(P::BackgroundPositionX, x))
                && position_y
                    .as_ref()
                    .is_none_or(|y| self.is_layer_initial(P::BackgroundPositionY, y));
            if !position_initial || size.is_some() {
                let x = position_x.map_or_else(|| "0%".to_owned(), |x| x.css_text());
                let y = position_y.map_or_else(|| "0%".to_owned(), |y| y.css_text());
                parts.push(format!("{x} {y}"));
            }
            if let Some(size) = size {
                parts.push(format!("/ {}", size.css_text()));
            }
            if let Some(repeat) = value(4, P::BackgroundRepeat) {
                parts.push(repeat_style_text(&repeat));
            }
            if let Some(attachment) = value(5, P::BackgroundAttachment) {
                parts.push(attachment.css_text());
            }
            let origin = item(6, layer);
            let clip = item(7, layer);
            if let (Some(origin), Some(clip)) = (origin, clip) {
                let origin_initial = self.is_layer_initial(P::BackgroundOrigin, &origin);
                let clip_initial = self.is_layer_initial(P::BackgroundClip, &clip);
                if origin == clip {
                    parts.push(origin.css_text());
                } else if !origin_initial || !clip_initial {
                    parts.push(format!("{} {}", origin.css_text(), clip.css_text()));
                }
            }
            if layer + 1 == layer_count && !self.is_initial(P::BackgroundColor, color) {
                parts.push(color.css_text());
            }
            if parts.is_empty() {
                parts.push("none".to_owned());
            }
            layers.push(parts.join(" "));
        }
        layers.join(", ")
    }

    /// [CSS Transitions 1 § 2.5](https://www.w3.org/TR/css-transitions-1/#transition-shorthand-property)
    fn transition(&self, values: &[Rc<CSSValue>]) -> String {
        let [property, duration, timing, delay, behavior] = values else {
            return String::new();
        };
        let lists: Vec<Vec<Rc<CSSValue>>> = [property, duration, timing, delay, behavior]
            .iter()
            .map(|value| value.items())
            .collect();
        // Every longhand needs one item per layer for the layers to line up.
        let layer_count = lists[0].len();
        if lists.iter().any(|list| list.len() != layer_count) {
            return String::new();
        }
        if lists[4].iter().any(|value| !value.is_identifier("normal")) {
            return String::new();
        }
        let mut layers = Vec::with_capacity(layer_count);
        for layer in 0..layer_count {
            let value = |list: usize| Rc::clone(&lists[list][layer]);
            let mut parts = Vec::new();
            let property = value(0);
            if !property.is_identifier("all") {
                parts.push(property.css_text());
            }
            let show_delay = !self.is_layer_initial(P::TransitionDelay, &value(3));
            if show_delay || !self.is_layer_initial(P::TransitionDuration, &value(1)) {
                parts.push(value(1).css_text());
            }
            if !self.is_layer_initial(P::TransitionTimingFunction, &value(2)) {
                parts.push(value(2).css_text());
            }
            if show_delay {
                parts.push(value(3).css_text());
            }
            if parts.is_empty() {
                parts.push("all".to_owned());
            }
            layers.push(parts.join(" "));
        }
        layers.join(", ")
    }

    fn grid_line_default(&self, start: &Rc<CSSValue>) -> Rc<CSSValue> {
        if matches!(start.as_ref(), CSSValue::CustomIdent(_)) {
            Rc::clone(start)
        } else {
            self.context.pool().identifier("auto")
        }
    }

    fn grid_line_pair(&self, values: &[Rc<CSSValue>]) -> String {
        let [start, end] = values else {
            return String::new();
        };
        if *end == self.grid_line_default(start) {
            return start.css_text();
        }
        format!("{} / {}", start.css_text(), end.css_text())
    }

    /// [CSS Grid 2 § 8.4](https://www.w3.org/TR/css-grid-2/#propdef-grid-area)
    ///
    /// Trailing lines equal to what the shorthand would fill in are omitted.
    fn grid_area(&self, values: &[Rc<CSSValue>]) -> String {
        let [row_start, column_start, row_end, column_end] = values else {
            return String::new();
        };
        let mut count = 4;
        if *column_end == self.grid_line_default(column_start) {
            count = 3;
            if *row_end == self.grid_line_default(row_start) {
                count = 2;
                if *column_start == self.grid_line_default(row_start) {
                    count = 1;
                }
            }
        }
        values[..count]
            .iter()
            .map(|value| value.css_text())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// [CSS Grid 2 § 7.8](https://www.w3.org/TR/css-grid-2/#grid-shorthand)
    ///
    /// The explicit and implicit grid properties cannot both be authored in
    /// one `grid` value.
    fn grid(&self, values: &[Rc<CSSValue>]) -> String {
        let [rows, columns, areas, auto_rows, auto_columns, auto_flow] = values else {
            return String::new();
        };
        let auto_rows_initial = self.is_initial(P::GridAutoRows, auto_rows);
        let auto_columns_initial = self.is_initial(P::GridAutoColumns, auto_columns);
        let auto_flow_initial = self.is_initial(P::GridAutoFlow, auto_flow);
        if auto_rows_initial && auto_columns_initial && auto_flow_initial {
            return grid_template(&values[..3]);
        }
        if !areas.is_identifier("none") {
            return String::new();
        }
        let flow_items = auto_flow.items();
        let dense = flow_items.iter().any(|item| item.is_identifier("dense"));
        let column_flow = flow_items.iter().any(|item| item.is_identifier("column"));
        let flow = if dense { "auto-flow dense" } else { "auto-flow" };
        if column_flow {
            if !columns.is_identifier("none") || !auto_rows_initial {
                return String::new();
            }
            let mut text = format!("{} / {flow}", rows.css_text());
            if !auto_columns_initial {
                text.push(' ');
                text.push_str(&auto_columns.css_text());
            }
            return text;
        }
        if !rows.is_identifier("none") || !auto_columns_initial {
            return String::new();
        }
        let mut text = flow.to_owned();
        if !auto_rows_initial {
            text.push(' ');
            text.push_str(&auto_rows.css_text());
        }
        text.push_str(" / ");
        text.push_str(&columns.css_text());
        text
    }
}

/// [CSS Box 4 § 3](https://www.w3.org/TR/css-box-4/#margin-shorthand)
///
/// Top, right, bottom, left with the shortest form that expands back: the
/// left value is shown only if it differs from the right, the bottom only if
/// it differs from the top or the left is shown, the right only if it
/// differs from the top or anything after it is shown.
#[must_use]
pub fn get_4_values(values: &[Rc<CSSValue>]) -> String {
    let [top, right, bottom, left] = values else {
        return String::new();
    };
    let show_left = left != right;
    let show_bottom = show_left || bottom != top;
    let show_right = show_bottom || right != top;
    let mut text = top.css_text();
    for (value, shown) in [(right, show_right), (bottom, show_bottom), (left, show_left)] {
        if shown {
            text.push(' ');
            text.push_str(&value.css_text());
        }
    }
    text
}

/// One value when both are equal, otherwise both.
#[must_use]
pub fn get_2_values(values: &[Rc<CSSValue>]) -> String {
    let [first, second] = values else {
        return String::new();
    };
    if first == second {
        return first.css_text();
    }
    format!("{} {}", first.css_text(), second.css_text())
}

fn space_separated(values: &[Rc<CSSValue>]) -> String {
    values
        .iter()
        .map(|value| value.css_text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [CSS Backgrounds 3 § 5.1](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// Horizontal radii, then `/` and the vertical radii if they differ.
fn border_radius(values: &[Rc<CSSValue>]) -> String {
    let mut horizontal = Vec::with_capacity(4);
    let mut vertical = Vec::with_capacity(4);
    for value in values {
        match value.as_ref() {
            CSSValue::Pair { first, second, .. } => {
                horizontal.push(Rc::clone(first));
                vertical.push(Rc::clone(second));
            }
            _ => {
                horizontal.push(Rc::clone(value));
                vertical.push(Rc::clone(value));
            }
        }
    }
    let horizontal_text = get_4_values(&horizontal);
    if horizontal == vertical {
        return horizontal_text;
    }
    format!("{horizontal_text} / {}", get_4_values(&vertical))
}

/// `repeat no-repeat` and `no-repeat repeat` have single-keyword forms.
fn repeat_style_text(value: &CSSValue) -> String {
    if let CSSValue::Pair { first, second, .. } = value {
        if first.is_identifier("repeat") && second.is_identifier("no-repeat") {
            return "repeat-x".to_owned();
        }
        if first.is_identifier("no-repeat") && second.is_identifier("repeat") {
            return "repeat-y".to_owned();
        }
    }
    value.css_text()
}

fn background_position(values: &[Rc<CSSValue>]) -> String {
    let [x, y] = values else {
        return String::new();
    };
    let xs = x.items();
    let ys = y.items();
    if xs.len() != ys.len() {
        return String::new();
    }
    xs.iter()
        .zip(&ys)
        .map(|(x, y)| format!("{} {}", x.css_text(), y.css_text()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// [CSS Grid 2 § 7.4](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand)
///
/// With areas, each row's line names, string and track size are written
/// together; the rows must have exactly one track per area string.
fn grid_template(values: &[Rc<CSSValue>]) -> String {
    let [rows, columns, areas] = values else {
        return String::new();
    };
    if areas.is_identifier("none") {
        if rows.is_identifier("none") && columns.is_identifier("none") {
            return "none".to_owned();
        }
        return format!("{} / {}", rows.css_text(), columns.css_text());
    }
    if rows.is_identifier("none") {
        return String::new();
    }
    let strings = areas.items();
    let mut strings = strings.iter();
    let mut parts = Vec::new();
    let mut tracks = 0;
    for item in rows.items() {
        let is_line_names = matches!(item.as_ref(), CSSValue::CustomIdent(text) if text.starts_with('['));
        if is_line_names {
            parts.push(item.css_text());
            continue;
        }
        let Some(string) = strings.next() else {
            return String::new();
        };
        tracks += 1;
        parts.push(string.css_text());
        if !item.is_identifier("auto") {
            parts.push(item.css_text());
        }
    }
    if tracks == 0 || strings.next().is_some() {
        return String::new();
    }
    let mut text = parts.join(" ");
    if !columns.is_identifier("none") {
        text.push_str(" / ");
        text.push_str(&columns.css_text());
    }
    text
}

/// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
///
/// Longhands are folded into the largest shorthand that can represent them
/// all; whatever is left is listed individually. Each declaration is
/// written as `name: value;` with ` !important` before the semicolon.
#[must_use]
pub fn serialize_declaration_block(set: &dyn PropertyValueSet) -> String {
    let properties = set.properties();
    let mut serialized = vec![false; properties.len()];
    let mut declarations = Vec::new();

    for (index, property) in properties.iter().enumerate() {
        if serialized[index] {
            continue;
        }
        let shorthand = property.id().and_then(|id| {
            id.shorthands().into_iter().find_map(|shorthand| {
                fold_into_shorthand(set, shorthand, &serialized).map(|text| (shorthand, text))
            })
        });
        if let Some((shorthand, text)) = shorthand {
            for longhand in shorthand.longhands() {
                if let Some(position) = set.find_property_index(&PropertyName::Known(*longhand)) {
                    serialized[position] = true;
                }
            }
            declarations.push(declaration_text(shorthand.into_static(), &text, property.important));
            continue;
        }
        serialized[index] = true;
        declarations.push(declaration_text(
            &property.name.to_string(),
            &property.value.css_text(),
            property.important,
        ));
    }
    declarations.join(" ")
}

/// The shorthand text for `shorthand` when every one of its longhands has
/// its own entry, none has been written yet and the serializer succeeds.
fn fold_into_shorthand(
    set: &dyn PropertyValueSet,
    shorthand: PropertyId,
    serialized: &[bool],
) -> Option<String> {
    for longhand in shorthand.longhands() {
        let position = set.find_property_index(&PropertyName::Known(*longhand))?;
        if serialized[position] {
            return None;
        }
    }
    let text = serialize_shorthand(set, shorthand);
    (!text.is_empty()).then_some(text)
}

fn declaration_text(name: &str, value: &str, important: bool) -> String {
    if important {
        format!("{name}: {value} !important;")
    } else {
        format!("{name}: {value};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::NumericValue;

    fn px(value: f64) -> Rc<CSSValue> {
        Rc::new(CSSValue::Numeric(NumericValue::px(value)))
    }

    #[test]
    fn four_values_contract() {
        assert_eq!(get_4_values(&[px(1.0), px(1.0), px(1.0), px(1.0)]), "1px");
        assert_eq!(get_4_values(&[px(1.0), px(2.0), px(1.0), px(2.0)]), "1px 2px");
        assert_eq!(get_4_values(&[px(1.0), px(2.0), px(3.0), px(2.0)]), "1px 2px 3px");
        assert_eq!(get_4_values(&[px(1.0), px(2.0), px(3.0), px(4.0)]), "1px 2px 3px 4px");
        assert_eq!(get_4_values(&[px(1.0), px(1.0), px(1.0), px(2.0)]), "1px 1px 1px 2px");
    }

    #[test]
    fn two_values_contract() {
        assert_eq!(get_2_values(&[px(1.0), px(1.0)]), "1px");
        assert_eq!(get_2_values(&[px(1.0), px(2.0)]), "1px 2px");
    }

    #[test]
    fn repeat_pairs_use_single_keywords() {
        let pair = CSSValue::pair(CSSValue::ident("repeat"), CSSValue::ident("no-repeat"));
        assert_eq!(repeat_style_text(&pair), "repeat-x");
        let pair = CSSValue::pair(CSSValue::ident("space"), CSSValue::ident("space"));
        assert_eq!(repeat_style_text(&pair), "space");
    }
}
