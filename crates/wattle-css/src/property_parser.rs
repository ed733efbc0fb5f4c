//! Property value parsing.
//!
//! [CSS Cascade 5 § 1 Shorthand Properties](https://www.w3.org/TR/css-cascade-5/#shorthand)
//!
//! A declaration's value is parsed with the grammar of its property. For a
//! shorthand the value is expanded into its longhands; longhands the author
//! left out get their initial value. The result is appended to a list of
//! [`CSSProperty`] entries that a property set takes ownership of.

use std::rc::Rc;

use crate::consume::{
    UnitlessQuirk, consume_color_with_quirks, consume_comma_separated_list,
    consume_css_wide_keyword, consume_custom_ident, consume_generic_component,
    consume_generic_list, consume_ident, consume_ident_in, consume_image, consume_integer,
    consume_length, consume_length_or_percent, consume_number, consume_number_or_percent,
    consume_string, consume_time, single_or_space_list,
};
use crate::consume::transform::consume_transform_list;
use crate::fast_path;
use crate::parser::context::ParserContext;
use crate::parser::stream::TokenStream;
use crate::properties::{Grammar, PropertyId, PropertyName};
use crate::property_set::CSSProperty;
use crate::tokenizer::{CSSToken, serialize_tokens, tokenize};
use crate::units::UnitType;
use crate::values::{CSSValue, CssWideKeyword, ValueRange};

use PropertyId as P;

/// Longhand values produced by one shorthand.
type Expansion = Vec<(PropertyId, Rc<CSSValue>)>;

/// Easing functions accepted in `transition-timing-function`.
const EASING_FUNCTIONS: &[&str] = &["cubic-bezier", "steps", "linear"];

/// Split a trailing `!important` off a declaration value.
///
/// [CSS Syntax 3 § 5.4.6](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// "If the last two non-`<whitespace-token>`s in the declaration's value are
/// a `<delim-token>` with the value "!" followed by an `<ident-token>` with a
/// value that is an ASCII case-insensitive match for "important", remove
/// them from the declaration's value and set the declaration's important
/// flag to true."
#[must_use]
pub fn strip_important(tokens: &[CSSToken]) -> (&[CSSToken], bool) {
    let trimmed = trim_whitespace(tokens);
    let Some((CSSToken::Ident(last), rest)) = trimmed.split_last() else {
        return (trimmed, false);
    };
    if !last.eq_ignore_ascii_case("important") {
        return (trimmed, false);
    }
    let rest = trim_whitespace(rest);
    match rest.split_last() {
        Some((CSSToken::Delim('!'), value)) => (trim_whitespace(value), true),
        _ => (trimmed, false),
    }
}

/// Strip leading and trailing whitespace tokens, and a trailing EOF.
#[must_use]
pub fn trim_whitespace(tokens: &[CSSToken]) -> &[CSSToken] {
    let start = tokens
        .iter()
        .position(|token| !token.is_whitespace() && !token.is_eof())
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|token| !token.is_whitespace() && !token.is_eof())
        .map_or(start, |index| index + 1);
    &tokens[start..end]
}

/// True if `var()` appears anywhere in `tokens`, including inside blocks.
#[must_use]
pub fn contains_var(tokens: &[CSSToken]) -> bool {
    tokens.iter().any(|token| token.is_function("var"))
}

/// Parse `text` as the value of the longhand `id`.
///
/// The fast path is tried first when the context allows it; anything it
/// does not accept goes through the full grammar.
#[must_use]
pub fn parse_longhand_text(id: PropertyId, text: &str, context: &ParserContext) -> Option<Rc<CSSValue>> {
    if context.use_fast_path {
        if let Some(value) = fast_path::maybe_parse_value(id, text, context) {
            return Some(value);
        }
    }
    let tokens = tokenize(text);
    let mut stream = TokenStream::new(trim_whitespace(&tokens));
    parse_longhand(id, &mut stream, context)
}

/// Parse a whole stream as the value of the longhand `id` (no CSS-wide
/// keywords, no `var()`).
pub fn parse_longhand(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    stream.consume_whitespace();
    let value = if id.is_layered() {
        let layers = consume_comma_separated_list(stream, context, &|stream, context| {
            consume_longhand(id, stream, context)
        })?;
        CSSValue::comma_list(layers)
    } else {
        consume_longhand(id, stream, context)?
    };
    stream.at_end().then_some(value)
}

/// The initial value of a longhand as a value tree.
#[must_use]
pub fn initial_value(id: PropertyId, context: &ParserContext) -> Rc<CSSValue> {
    let tokens = tokenize(id.initial_text());
    let mut stream = TokenStream::new(&tokens);
    let value = parse_longhand(id, &mut stream, context);
    debug_assert!(value.is_some(), "initial value of {id} does not parse");
    value.unwrap_or_else(|| context.pool().css_wide(CssWideKeyword::Initial))
}

/// One value of the longhand `id`, leaving whatever follows in the stream.
///
/// Used both for whole longhand declarations and for the components of a
/// shorthand.
pub fn consume_longhand(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let grammar = id.grammar();
    // These grammars combine their keywords, e.g. `repeat no-repeat`.
    let combines_keywords = matches!(
        grammar,
        Grammar::BackgroundSize | Grammar::BackgroundRepeat | Grammar::BorderImageRepeat
    );
    let keyword = if combines_keywords {
        None
    } else {
        consume_ident_in(stream, context, id.keywords())
    };
    if keyword.is_some() {
        return keyword;
    }
    let unitless = if id.allows_unitless_quirk() {
        UnitlessQuirk::Allow
    } else {
        UnitlessQuirk::Forbid
    };
    match grammar {
        Grammar::Keywords => None,
        Grammar::LengthPercentage(range) => consume_length_or_percent(stream, context, range, unitless),
        Grammar::Length(range) => consume_length(stream, context, range, unitless),
        Grammar::Color => consume_color_with_quirks(stream, context, id.allows_quirky_color()),
        Grammar::Number(range) => consume_number(stream, context, range),
        Grammar::NumberOrPercent => consume_number_or_percent(stream, context, ValueRange::All),
        Grammar::Integer(minimum) => consume_integer(stream, context, f64::from(minimum)),
        Grammar::Time(range) => consume_time(stream, context, range),
        Grammar::Image => consume_image(stream, context),
        Grammar::Transform => consume_transform_list(stream, context),
        Grammar::Radius => consume_radius(stream, context, unitless),
        Grammar::GridLine => consume_grid_line(stream, context),
        Grammar::GridTemplate => consume_generic_list(stream, context, &|token| {
            matches!(token, CSSToken::Delim('/') | CSSToken::Comma)
        }),
        Grammar::GridAreas => consume_repeated(stream, context, usize::MAX, &|stream, _| {
            consume_string(stream)
        }),
        Grammar::GridAutoFlow => consume_any_order(stream, context, &[&["row", "column"], &["dense"]]),
        Grammar::TextDecorationLine => consume_any_order(
            stream,
            context,
            &[&["underline"], &["overline"], &["line-through"], &["blink"]],
        ),
        Grammar::TextEmphasisStyle => consume_string(stream).or_else(|| {
            consume_any_order(
                stream,
                context,
                &[
                    &["filled", "open"],
                    &["dot", "circle", "double-circle", "triangle", "sesame"],
                ],
            )
        }),
        Grammar::TransitionProperty => consume_transition_property(stream, context),
        Grammar::TimingFunction => consume_easing_function(stream, context),
        Grammar::BackgroundSize => consume_background_size(stream, context),
        Grammar::BackgroundRepeat => consume_repeat_style(stream, context),
        Grammar::BorderImageSlice => consume_border_image_slice(stream, context),
        Grammar::BorderImageQuad => consume_repeated(stream, context, 4, &|stream, context| {
            consume_length_or_percent(stream, context, ValueRange::NonNegative, UnitlessQuirk::Forbid)
                .or_else(|| consume_number(stream, context, ValueRange::NonNegative))
                .or_else(|| consume_ident_in(stream, context, &["auto"]))
        }),
        Grammar::BorderImageRepeat => consume_repeated(stream, context, 2, &|stream, context| {
            consume_ident_in(stream, context, P::BorderImageRepeat.keywords())
        }),
        Grammar::PositionComponent => {
            consume_length_or_percent(stream, context, ValueRange::All, unitless)
        }
        Grammar::Generic => consume_generic_list(stream, context, &|_| false),
    }
}

/// Between one and `maximum` items; one item is returned as itself.
fn consume_repeated(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    maximum: usize,
    consume_item: &dyn Fn(&mut TokenStream<'_>, &ParserContext) -> Option<Rc<CSSValue>>,
) -> Option<Rc<CSSValue>> {
    let mut items = Vec::new();
    while items.len() < maximum {
        let Some(item) = consume_item(stream, context) else {
            break;
        };
        items.push(item);
    }
    if items.is_empty() {
        return None;
    }
    Some(single_or_space_list(items))
}

/// `a || b || …`: each group's keywords at most once, in any order.
fn consume_any_order(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    groups: &[&[&str]],
) -> Option<Rc<CSSValue>> {
    let mut seen = vec![false; groups.len()];
    let mut items = Vec::new();
    'components: loop {
        for (index, group) in groups.iter().enumerate() {
            if seen[index] {
                continue;
            }
            if let Some(keyword) = consume_ident_in(stream, context, group) {
                seen[index] = true;
                items.push(keyword);
                continue 'components;
            }
        }
        break;
    }
    if items.is_empty() {
        return None;
    }
    Some(single_or_space_list(items))
}

/// [CSS Backgrounds 3 § 5.1](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// "The two length or percentage values of the 'border-*-radius' properties
/// define the radii of a quarter ellipse."
fn consume_radius(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    unitless: UnitlessQuirk,
) -> Option<Rc<CSSValue>> {
    let horizontal = consume_length_or_percent(stream, context, ValueRange::NonNegative, unitless)?;
    let vertical = consume_length_or_percent(stream, context, ValueRange::NonNegative, unitless)
        .unwrap_or_else(|| Rc::clone(&horizontal));
    Some(CSSValue::pair(horizontal, vertical))
}

/// [CSS Grid 2 § 8.3](https://www.w3.org/TR/css-grid-2/#line-placement)
///
/// "`<grid-line> = auto | <custom-ident> | [ [ <integer [-∞,-1]> |
/// <integer [1,∞]> ] && <custom-ident>? ] | [ span && [ <integer [1,∞]> ||
/// <custom-ident> ] ]`"
fn consume_grid_line(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let mut span = None;
    let mut number = None;
    let mut name = None;
    loop {
        if span.is_none() && guard.peek().is_ident("span") {
            span = consume_ident(&mut guard, context);
            continue;
        }
        if number.is_none() {
            if let Some(value) = consume_integer(&mut guard, context, f64::from(i32::MIN)) {
                number = Some(value);
                continue;
            }
        }
        if name.is_none() {
            if let Some(value) = consume_grid_line_name(&mut guard) {
                name = Some(value);
                continue;
            }
        }
        break;
    }
    if number.is_none() && name.is_none() {
        return None;
    }
    if let Some(value) = &number {
        let literal = value.get_double_value();
        // "A value of zero makes the declaration invalid."
        if literal == 0.0 || (span.is_some() && literal < 0.0) {
            return None;
        }
    }
    guard.release();
    let items: Vec<Rc<CSSValue>> = [span, number, name].into_iter().flatten().collect();
    Some(single_or_space_list(items))
}

fn consume_grid_line_name(stream: &mut TokenStream<'_>) -> Option<Rc<CSSValue>> {
    if stream.peek().is_ident("span") || stream.peek().is_ident("auto") {
        return None;
    }
    consume_custom_ident(stream)
}

/// `none | all | <custom-ident>`; known property names are lowercased.
fn consume_transition_property(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    if PropertyName::parse(name).is_some_and(|name| !name.is_custom()) {
        return consume_ident(stream, context);
    }
    consume_custom_ident(stream)
}

/// [CSS Easing 1 § 2](https://www.w3.org/TR/css-easing-1/#easing-functions)
fn consume_easing_function(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    if !EASING_FUNCTIONS.iter().any(|known| known.eq_ignore_ascii_case(name)) {
        return None;
    }
    consume_generic_component(stream, context)
}

/// [CSS Backgrounds 3 § 3.9](https://www.w3.org/TR/css-backgrounds-3/#background-size)
///
/// "`<bg-size> = [ <length-percentage [0,∞]> | auto ]{1,2} | cover | contain`"
fn consume_background_size(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    if let Some(keyword) = consume_ident_in(stream, context, &["cover", "contain"]) {
        return Some(keyword);
    }
    let component = |stream: &mut TokenStream<'_>| {
        consume_ident_in(stream, context, &["auto"]).or_else(|| {
            consume_length_or_percent(stream, context, ValueRange::NonNegative, UnitlessQuirk::Forbid)
        })
    };
    let horizontal = component(stream)?;
    match component(stream) {
        Some(vertical) => Some(Rc::new(CSSValue::Pair {
            first: horizontal,
            second: vertical,
            coalesce: false,
        })),
        None => Some(horizontal),
    }
}

/// [CSS Backgrounds 3 § 3.4](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
///
/// "`<repeat-style> = repeat-x | repeat-y | [ repeat | space | round |
/// no-repeat ]{1,2}`"
fn consume_repeat_style(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    if let Some(keyword) = consume_ident_in(stream, context, &["repeat-x", "repeat-y"]) {
        return Some(keyword);
    }
    let axis = ["repeat", "space", "round", "no-repeat"];
    let horizontal = consume_ident_in(stream, context, &axis)?;
    match consume_ident_in(stream, context, &axis) {
        Some(vertical) => Some(CSSValue::pair(horizontal, vertical)),
        None => Some(horizontal),
    }
}

/// [CSS Backgrounds 3 § 6.3](https://www.w3.org/TR/css-backgrounds-3/#border-image-slice)
///
/// "`[<number [0,∞]> | <percentage [0,∞]>]{1,4} && fill?`"
fn consume_border_image_slice(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let fill_first = consume_ident_in(&mut guard, context, &["fill"]);
    let mut items = Vec::new();
    while items.len() < 4 {
        match consume_number_or_percent(&mut guard, context, ValueRange::NonNegative) {
            Some(item) => items.push(item),
            None => break,
        }
    }
    if items.is_empty() {
        return None;
    }
    let fill = fill_first.or_else(|| consume_ident_in(&mut guard, context, &["fill"]));
    guard.release();
    items.extend(fill);
    Some(single_or_space_list(items))
}

/// Parse the declaration `name: tokens` and append the resulting entries to
/// `out`. Returns false (appending nothing) when the value is invalid.
pub fn parse_declaration(
    name: &PropertyName,
    tokens: &[CSSToken],
    important: bool,
    context: &ParserContext,
    out: &mut Vec<CSSProperty>,
) -> bool {
    let tokens = trim_whitespace(tokens);
    let id = match name {
        PropertyName::Custom(custom) => {
            // [CSS Variables 1 § 2](https://www.w3.org/TR/css-variables-1/#defining-variables)
            //
            // Custom property values are kept as written.
            out.push(CSSProperty::new(
                name.clone(),
                Rc::new(CSSValue::CustomProperty {
                    name: custom.clone(),
                    value: serialize_tokens(tokens),
                }),
                important,
            ));
            return true;
        }
        PropertyName::Known(id) => *id,
    };
    if tokens.is_empty() {
        return false;
    }

    // STEP 1: A lone CSS-wide keyword applies to every longhand.
    let mut stream = TokenStream::new(tokens);
    if let Some(keyword) = consume_css_wide_keyword(&mut stream, context) {
        if !stream.at_end() {
            return false;
        }
        if id == P::All || !id.is_shorthand() {
            out.push(CSSProperty::new(name.clone(), keyword, important));
        } else {
            out.extend(
                id.longhands()
                    .iter()
                    .map(|longhand| CSSProperty::new((*longhand).into(), Rc::clone(&keyword), important)),
            );
        }
        return true;
    }
    if id == P::All {
        // "all: <css-wide-keyword>" is the only valid form.
        return false;
    }

    // STEP 2: Values with var() are kept until substitution.
    if contains_var(tokens) {
        let pending = Rc::new(CSSValue::PendingSubstitution(serialize_tokens(tokens)));
        let longhands: &[PropertyId] = if id.is_shorthand() { id.longhands() } else { &[id] };
        out.extend(
            longhands
                .iter()
                .map(|longhand| CSSProperty::new((*longhand).into(), Rc::clone(&pending), important)),
        );
        return true;
    }

    // STEP 3: Longhands: fast path, then the full grammar.
    if !id.is_shorthand() {
        let value = if context.use_fast_path {
            fast_path::maybe_parse_value(id, &serialize_tokens(tokens), context)
        } else {
            None
        };
        let Some(value) = value.or_else(|| {
            let mut stream = TokenStream::new(tokens);
            parse_longhand(id, &mut stream, context)
        }) else {
            return false;
        };
        out.push(CSSProperty::new(name.clone(), value, important));
        return true;
    }

    // STEP 4: Shorthands expand into every longhand.
    let mut stream = TokenStream::new(tokens);
    let Some(expansion) = parse_shorthand(id, &mut stream, context) else {
        return false;
    };
    if !stream.at_end() {
        return false;
    }
    debug_assert_eq!(expansion.len(), id.longhands().len());
    out.extend(
        expansion
            .into_iter()
            .map(|(longhand, value)| CSSProperty::new(longhand.into(), value, important)),
    );
    true
}

/// Expand the shorthand `id`. The returned longhands follow
/// [`PropertyId::longhands`] order.
pub fn parse_shorthand(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    stream.consume_whitespace();
    let expansion = match id {
        P::Margin
        | P::Padding
        | P::Inset
        | P::ScrollMargin
        | P::ScrollPadding
        | P::BorderWidth
        | P::BorderStyle
        | P::BorderColor => consume_four_sides(id, stream, context)?,
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
        | P::PlaceSelf => consume_two_values(id, stream, context)?,
        P::BorderTop
        | P::BorderRight
        | P::BorderBottom
        | P::BorderLeft
        | P::Outline
        | P::ColumnRule
        | P::Columns
        | P::TextDecoration
        | P::TextEmphasis
        | P::FlexFlow => consume_any_order_longhands(id.longhands(), stream, context)?,
        P::Border => consume_border(stream, context)?,
        P::BorderRadius => consume_border_radius(stream, context)?,
        P::BorderImage => consume_border_image(stream, context)?,
        P::Flex => consume_flex(stream, context)?,
        P::Background => consume_background(stream, context)?,
        P::BackgroundPosition => consume_background_position(stream, context)?,
        P::Transition => consume_transition(stream, context)?,
        P::GridRow | P::GridColumn => consume_grid_line_pair(id, stream, context)?,
        P::GridArea => consume_grid_area(stream, context)?,
        P::GridTemplate => consume_grid_template(stream, context)?,
        P::Grid => consume_grid(stream, context)?,
        _ => return None,
    };
    Some(expansion)
}

/// [CSS Box 4 § 3](https://www.w3.org/TR/css-box-4/#margins)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom are set to the first value and the
/// right and left are set to the second. If there are three values, the top
/// is set to the first value, the left and right are set to the second, and
/// the bottom is set to the third. If there are four values they apply to
/// the top, right, bottom, and left, respectively."
fn consume_four_sides(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    let sides = id.longhands();
    let mut values: Vec<Rc<CSSValue>> = Vec::with_capacity(4);
    while values.len() < 4 && !stream.at_end() {
        values.push(consume_longhand(sides[values.len()], stream, context)?);
    }
    let [top, right, bottom, left] = expand_four(values)?;
    Some(vec![
        (sides[0], top),
        (sides[1], right),
        (sides[2], bottom),
        (sides[3], left),
    ])
}

/// Apply the one-to-four value rule.
fn expand_four(values: Vec<Rc<CSSValue>>) -> Option<[Rc<CSSValue>; 4]> {
    let mut values = values.into_iter();
    let top = values.next()?;
    let right = values.next().unwrap_or_else(|| Rc::clone(&top));
    let bottom = values.next().unwrap_or_else(|| Rc::clone(&top));
    let left = values.next().unwrap_or_else(|| Rc::clone(&right));
    Some([top, right, bottom, left])
}

/// Two longhands; the second defaults to the first.
fn consume_two_values(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    let [first_id, second_id] = id.longhands() else {
        return None;
    };
    let first = consume_longhand(*first_id, stream, context)?;
    let second = if stream.at_end() {
        Rc::clone(&first)
    } else {
        consume_longhand(*second_id, stream, context)?
    };
    Some(vec![(*first_id, first), (*second_id, second)])
}

/// `a || b || c`: each longhand at most once, in any order, at least one;
/// the rest get their initial value.
fn consume_any_order_longhands(
    longhands: &[PropertyId],
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    let mut values: Vec<Option<Rc<CSSValue>>> = vec![None; longhands.len()];
    'components: while !stream.at_end() {
        for (index, longhand) in longhands.iter().enumerate() {
            if values[index].is_some() {
                continue;
            }
            if let Some(value) = consume_longhand(*longhand, stream, context) {
                values[index] = Some(value);
                continue 'components;
            }
        }
        return None;
    }
    if values.iter().all(Option::is_none) {
        return None;
    }
    Some(
        longhands
            .iter()
            .zip(values)
            .map(|(longhand, value)| {
                (*longhand, value.unwrap_or_else(|| initial_value(*longhand, context)))
            })
            .collect(),
    )
}

/// [CSS Backgrounds 3 § 4.4](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
///
/// "The border shorthand also resets border-image to its initial value."
fn consume_border(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let side = consume_any_order_longhands(
        &[P::BorderTopWidth, P::BorderTopStyle, P::BorderTopColor],
        stream,
        context,
    )?;
    let mut expansion = Expansion::new();
    for (index, (_, value)) in side.iter().enumerate() {
        let group = match index {
            0 => P::BorderWidth,
            1 => P::BorderStyle,
            _ => P::BorderColor,
        };
        expansion.extend(group.longhands().iter().map(|id| (*id, Rc::clone(value))));
    }
    expansion.extend(
        P::BorderImage
            .longhands()
            .iter()
            .map(|id| (*id, initial_value(*id, context))),
    );
    Some(expansion)
}

/// [CSS Backgrounds 3 § 5.1](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// "`[ <length-percentage [0,∞]>{1,4} [ / <length-percentage [0,∞]>{1,4} ]? ]`"
fn consume_border_radius(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let unitless = UnitlessQuirk::Allow;
    let radii = |stream: &mut TokenStream<'_>| {
        let mut values = Vec::new();
        while values.len() < 4 {
            match consume_length_or_percent(stream, context, ValueRange::NonNegative, unitless) {
                Some(value) => values.push(value),
                None => break,
            }
        }
        expand_four(values)
    };
    let horizontal = radii(stream)?;
    let vertical = if matches!(stream.peek(), CSSToken::Delim('/')) {
        let _ = stream.consume_including_whitespace();
        radii(stream)?
    } else {
        horizontal.clone()
    };
    Some(
        P::BorderRadius
            .longhands()
            .iter()
            .zip(horizontal.into_iter().zip(vertical))
            .map(|(id, (h, v))| (*id, CSSValue::pair(h, v)))
            .collect(),
    )
}

/// [CSS Backgrounds 3 § 6.7](https://www.w3.org/TR/css-backgrounds-3/#border-image)
///
/// "`<'border-image-source'> || <'border-image-slice'> [ /
/// <'border-image-width'> | / <'border-image-width'>? /
/// <'border-image-outset'> ]? || <'border-image-repeat'>`"
fn consume_border_image(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let mut source = None;
    let mut slice = None;
    let mut width = None;
    let mut outset = None;
    let mut repeat = None;
    while !stream.at_end() {
        if source.is_none() {
            if let Some(value) = consume_longhand(P::BorderImageSource, stream, context) {
                source = Some(value);
                continue;
            }
        }
        if repeat.is_none() {
            if let Some(value) = consume_longhand(P::BorderImageRepeat, stream, context) {
                repeat = Some(value);
                continue;
            }
        }
        if slice.is_none() {
            if let Some(value) = consume_longhand(P::BorderImageSlice, stream, context) {
                slice = Some(value);
                if matches!(stream.peek(), CSSToken::Delim('/')) {
                    let _ = stream.consume_including_whitespace();
                    width = consume_longhand(P::BorderImageWidth, stream, context);
                    if matches!(stream.peek(), CSSToken::Delim('/')) {
                        let _ = stream.consume_including_whitespace();
                        outset = Some(consume_longhand(P::BorderImageOutset, stream, context)?);
                    } else if width.is_none() {
                        return None;
                    }
                }
                continue;
            }
        }
        return None;
    }
    if source.is_none() && slice.is_none() && repeat.is_none() {
        return None;
    }
    let values = [source, slice, width, outset, repeat];
    Some(
        P::BorderImage
            .longhands()
            .iter()
            .zip(values)
            .map(|(id, value)| (*id, value.unwrap_or_else(|| initial_value(*id, context))))
            .collect(),
    )
}

/// [CSS Flexbox 1 § 7.1](https://www.w3.org/TR/css-flexbox-1/#flex-property)
///
/// "`none | [ <'flex-grow'> <'flex-shrink'>? || <'flex-basis'> ]`"
///
/// "When omitted from the flex shorthand, its specified value is 1" for
/// both factors, and the basis is `0%`.
fn consume_flex(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let pool = context.pool();
    if let Some(keyword) = consume_ident_in(stream, context, &["none", "auto"]) {
        if !stream.at_end() {
            return None;
        }
        let factor = if keyword.is_identifier("none") { 0.0 } else { 1.0 };
        return Some(vec![
            (P::FlexGrow, pool.numeric(factor, UnitType::Integer)),
            (P::FlexShrink, pool.numeric(factor, UnitType::Integer)),
            (P::FlexBasis, pool.identifier("auto")),
        ]);
    }
    let mut grow = None;
    let mut shrink = None;
    let mut basis = None;
    while !stream.at_end() {
        if grow.is_none() {
            if let Some(value) = consume_number(stream, context, ValueRange::NonNegative) {
                grow = Some(value);
                shrink = consume_number(stream, context, ValueRange::NonNegative);
                continue;
            }
        }
        if basis.is_none() {
            if let Some(value) = consume_longhand(P::FlexBasis, stream, context) {
                basis = Some(value);
                continue;
            }
        }
        return None;
    }
    if grow.is_none() && basis.is_none() {
        return None;
    }
    Some(vec![
        (P::FlexGrow, grow.unwrap_or_else(|| pool.numeric(1.0, UnitType::Integer))),
        (P::FlexShrink, shrink.unwrap_or_else(|| pool.numeric(1.0, UnitType::Integer))),
        (P::FlexBasis, basis.unwrap_or_else(|| pool.numeric(0.0, UnitType::Percentage))),
    ])
}

/// [CSS Backgrounds 3 § 3.6](https://www.w3.org/TR/css-backgrounds-3/#background-position)
///
/// One or two components. A single keyword or length sets one axis and
/// centers the other; two keywords may come in either order.
fn consume_position(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<(Rc<CSSValue>, Rc<CSSValue>)> {
    const KEYWORDS: &[&str] = &["left", "center", "right", "top", "bottom"];
    let component = |stream: &mut TokenStream<'_>| {
        consume_ident_in(stream, context, KEYWORDS).or_else(|| {
            consume_length_or_percent(stream, context, ValueRange::All, UnitlessQuirk::Allow)
        })
    };
    let is_vertical = |value: &CSSValue| value.is_identifier("top") || value.is_identifier("bottom");
    let is_horizontal = |value: &CSSValue| value.is_identifier("left") || value.is_identifier("right");

    let mut guard = stream.save();
    let first = component(&mut guard)?;
    let (x, y) = match component(&mut guard) {
        None if is_vertical(&first) => (context.pool().identifier("center"), first),
        None => (first, context.pool().identifier("center")),
        Some(second) => {
            let both_keywords = first.as_identifier().is_some() && second.as_identifier().is_some();
            if both_keywords && (is_vertical(&first) || is_horizontal(&second)) {
                (second, first)
            } else {
                (first, second)
            }
        }
    };
    if is_vertical(&x) || is_horizontal(&y) {
        return None;
    }
    guard.release();
    Some((x, y))
}

/// Longhands of `background`, in layer order, with their layer defaults.
const BACKGROUND_LAYER_LONGHANDS: [PropertyId; 8] = [
    P::BackgroundImage,
    P::BackgroundPositionX,
    P::BackgroundPositionY,
    P::BackgroundSize,
    P::BackgroundRepeat,
    P::BackgroundAttachment,
    P::BackgroundOrigin,
    P::BackgroundClip,
];

/// The initial value of a layered longhand for one layer.
fn layer_initial(id: PropertyId, context: &ParserContext) -> Rc<CSSValue> {
    let initial = initial_value(id, context);
    match initial.as_ref() {
        CSSValue::List { items, .. } if items.len() == 1 => Rc::clone(&items[0]),
        _ => initial,
    }
}

/// One layer of `background`. The color is returned separately; it is only
/// valid in the final layer.
fn consume_background_layer(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<([Option<Rc<CSSValue>>; 8], Option<Rc<CSSValue>>)> {
    let mut layer: [Option<Rc<CSSValue>>; 8] = Default::default();
    let mut color = None;
    let mut boxes = Vec::new();
    let mut any = false;
    while !stream.at_end() && !matches!(stream.peek(), CSSToken::Comma) {
        any = true;
        if color.is_none() {
            if let Some(value) = consume_color_with_quirks(stream, context, false) {
                color = Some(value);
                continue;
            }
        }
        if layer[0].is_none() {
            if let Some(value) = consume_longhand(P::BackgroundImage, stream, context) {
                layer[0] = Some(value);
                continue;
            }
        }
        if layer[1].is_none() {
            if let Some((x, y)) = consume_position(stream, context) {
                layer[1] = Some(x);
                layer[2] = Some(y);
                if matches!(stream.peek(), CSSToken::Delim('/')) {
                    let _ = stream.consume_including_whitespace();
                    layer[3] = Some(consume_background_size(stream, context)?);
                }
                continue;
            }
        }
        if layer[4].is_none() {
            if let Some(value) = consume_repeat_style(stream, context) {
                layer[4] = Some(value);
                continue;
            }
        }
        if layer[5].is_none() {
            if let Some(value) = consume_longhand(P::BackgroundAttachment, stream, context) {
                layer[5] = Some(value);
                continue;
            }
        }
        if boxes.len() < 2 {
            if let Some(value) = consume_ident_in(stream, context, P::BackgroundClip.keywords()) {
                boxes.push(value);
                continue;
            }
        }
        return None;
    }
    // "If one <box> value is present then it sets both background-origin
    // and background-clip to that value. If two values are present, then
    // the first sets background-origin and the second background-clip."
    let mut boxes = boxes.into_iter();
    if let Some(origin) = boxes.next() {
        let clip = boxes.next().unwrap_or_else(|| Rc::clone(&origin));
        if origin.is_identifier("text") {
            return None;
        }
        layer[6] = Some(origin);
        layer[7] = Some(clip);
    }
    any.then_some((layer, color))
}

/// [CSS Backgrounds 3 § 3.10](https://www.w3.org/TR/css-backgrounds-3/#background)
///
/// "`<bg-layer>#? , <final-bg-layer>`"
fn consume_background(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let mut columns: Vec<Vec<Rc<CSSValue>>> = vec![Vec::new(); BACKGROUND_LAYER_LONGHANDS.len()];
    let mut color = None;
    loop {
        let (layer, layer_color) = consume_background_layer(stream, context)?;
        if color.is_some() {
            return None;
        }
        color = layer_color;
        for ((column, value), id) in columns.iter_mut().zip(layer).zip(BACKGROUND_LAYER_LONGHANDS) {
            column.push(value.unwrap_or_else(|| layer_initial(id, context)));
        }
        if !matches!(stream.peek(), CSSToken::Comma) {
            break;
        }
        let _ = stream.consume_including_whitespace();
    }
    let mut expansion: Expansion = BACKGROUND_LAYER_LONGHANDS
        .into_iter()
        .zip(columns)
        .map(|(id, column)| (id, CSSValue::comma_list(column)))
        .collect();
    expansion.push((
        P::BackgroundColor,
        color.unwrap_or_else(|| initial_value(P::BackgroundColor, context)),
    ));
    Some(expansion)
}

fn consume_background_position(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    loop {
        let (x, y) = consume_position(stream, context)?;
        xs.push(x);
        ys.push(y);
        if !matches!(stream.peek(), CSSToken::Comma) {
            break;
        }
        let _ = stream.consume_including_whitespace();
    }
    Some(vec![
        (P::BackgroundPositionX, CSSValue::comma_list(xs)),
        (P::BackgroundPositionY, CSSValue::comma_list(ys)),
    ])
}

/// [CSS Transitions 1 § 2.5](https://www.w3.org/TR/css-transitions-1/#transition-shorthand-property)
///
/// "`<single-transition> = [ none | <single-transition-property> ] ||
/// <time> || <easing-function> || <time> || <transition-behavior-value>`"
///
/// "If there is more than one `<single-transition>` in the shorthand, and
/// any of the transitions has `none` as the `<single-transition-property>`,
/// then the declaration is invalid."
fn consume_transition(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let longhands = P::Transition.longhands();
    let mut columns: Vec<Vec<Rc<CSSValue>>> = vec![Vec::new(); longhands.len()];
    let mut has_none = false;
    loop {
        let mut layer: [Option<Rc<CSSValue>>; 5] = Default::default();
        let mut any = false;
        while !stream.at_end() && !matches!(stream.peek(), CSSToken::Comma) {
            any = true;
            if layer[1].is_none() || layer[3].is_none() {
                if let Some(time) = consume_time(stream, context, ValueRange::All) {
                    let slot = if layer[1].is_none() { 1 } else { 3 };
                    if slot == 1 && time.get_double_value() < 0.0 {
                        return None;
                    }
                    layer[slot] = Some(time);
                    continue;
                }
            }
            if layer[2].is_none() {
                if let Some(value) = consume_longhand(P::TransitionTimingFunction, stream, context) {
                    layer[2] = Some(value);
                    continue;
                }
            }
            if layer[4].is_none() {
                if let Some(value) = consume_longhand(P::TransitionBehavior, stream, context) {
                    layer[4] = Some(value);
                    continue;
                }
            }
            if layer[0].is_none() {
                if let Some(value) = consume_longhand(P::TransitionProperty, stream, context) {
                    has_none |= value.is_identifier("none");
                    layer[0] = Some(value);
                    continue;
                }
            }
            return None;
        }
        if !any {
            return None;
        }
        for ((column, value), id) in columns.iter_mut().zip(layer).zip(longhands) {
            column.push(value.unwrap_or_else(|| layer_initial(*id, context)));
        }
        if !matches!(stream.peek(), CSSToken::Comma) {
            break;
        }
        let _ = stream.consume_including_whitespace();
    }
    if has_none && columns[0].len() > 1 {
        return None;
    }
    Some(
        longhands
            .iter()
            .zip(columns)
            .map(|(id, column)| (*id, CSSValue::comma_list(column)))
            .collect(),
    )
}

/// The default end line for an omitted `<grid-line>`: the start's name
/// when it is a lone `<custom-ident>`, otherwise `auto`.
fn grid_line_default(start: &Rc<CSSValue>, context: &ParserContext) -> Rc<CSSValue> {
    if matches!(start.as_ref(), CSSValue::CustomIdent(_)) {
        Rc::clone(start)
    } else {
        context.pool().identifier("auto")
    }
}

/// Up to `maximum` `<grid-line>`s separated by `/`.
fn consume_grid_lines(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    maximum: usize,
) -> Option<Vec<Rc<CSSValue>>> {
    let mut lines = vec![consume_longhand(P::GridRowStart, stream, context)?];
    while lines.len() < maximum && matches!(stream.peek(), CSSToken::Delim('/')) {
        let _ = stream.consume_including_whitespace();
        lines.push(consume_longhand(P::GridRowStart, stream, context)?);
    }
    Some(lines)
}

/// [CSS Grid 2 § 8.4](https://www.w3.org/TR/css-grid-2/#placement-shorthands)
///
/// "`<grid-line> [ / <grid-line> ]?`"
fn consume_grid_line_pair(
    id: PropertyId,
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<Expansion> {
    let [start_id, end_id] = id.longhands() else {
        return None;
    };
    let mut lines = consume_grid_lines(stream, context, 2)?.into_iter();
    let start = lines.next()?;
    let end = lines.next().unwrap_or_else(|| grid_line_default(&start, context));
    Some(vec![(*start_id, start), (*end_id, end)])
}

/// "`<grid-line> [ / <grid-line> ]{0,3}`"
fn consume_grid_area(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let mut lines = consume_grid_lines(stream, context, 4)?.into_iter();
    let row_start = lines.next()?;
    let column_start = lines.next().unwrap_or_else(|| grid_line_default(&row_start, context));
    let row_end = lines.next().unwrap_or_else(|| grid_line_default(&row_start, context));
    let column_end = lines.next().unwrap_or_else(|| grid_line_default(&column_start, context));
    Some(vec![
        (P::GridRowStart, row_start),
        (P::GridColumnStart, column_start),
        (P::GridRowEnd, row_end),
        (P::GridColumnEnd, column_end),
    ])
}

/// Rows and areas from the `<line-names>? <string> <track-size>?
/// <line-names>?` form of `grid-template`.
fn consume_template_areas(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
) -> Option<(Rc<CSSValue>, Rc<CSSValue>)> {
    let mut rows = Vec::new();
    let mut areas = Vec::new();
    while !stream.at_end() && !matches!(stream.peek(), CSSToken::Delim('/')) {
        if matches!(stream.peek(), CSSToken::LeftBracket) {
            rows.push(consume_generic_component(stream, context)?);
            continue;
        }
        areas.push(consume_string(stream)?);
        match stream.peek() {
            CSSToken::String(_) | CSSToken::LeftBracket | CSSToken::Delim('/') => {
                rows.push(context.pool().identifier("auto"));
            }
            _ if stream.at_end() => rows.push(context.pool().identifier("auto")),
            _ => rows.push(consume_generic_component(stream, context)?),
        }
    }
    if areas.is_empty() {
        return None;
    }
    Some((CSSValue::space_list(rows), CSSValue::space_list(areas)))
}

/// [CSS Grid 2 § 7.4](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand)
///
/// "`none | [ <'grid-template-rows'> / <'grid-template-columns'> ] | [
/// <line-names>? <string> <track-size>? <line-names>? ]+ [ /
/// <explicit-track-list> ]?`"
fn consume_grid_template(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let none = || context.pool().identifier("none");
    if stream.peek().is_ident("none") && stream.peek_at(1).is_eof() {
        let _ = stream.consume_including_whitespace();
        return Some(vec![
            (P::GridTemplateRows, none()),
            (P::GridTemplateColumns, none()),
            (P::GridTemplateAreas, none()),
        ]);
    }
    let has_strings = stream
        .remaining()
        .iter()
        .any(|token| matches!(token, CSSToken::String(_)));
    if has_strings {
        let (rows, areas) = consume_template_areas(stream, context)?;
        let columns = if matches!(stream.peek(), CSSToken::Delim('/')) {
            let _ = stream.consume_including_whitespace();
            consume_longhand(P::GridTemplateColumns, stream, context)?
        } else {
            none()
        };
        return Some(vec![
            (P::GridTemplateRows, rows),
            (P::GridTemplateColumns, columns),
            (P::GridTemplateAreas, areas),
        ]);
    }
    let rows = consume_longhand(P::GridTemplateRows, stream, context)?;
    if !matches!(stream.peek(), CSSToken::Delim('/')) {
        return None;
    }
    let _ = stream.consume_including_whitespace();
    let columns = consume_longhand(P::GridTemplateColumns, stream, context)?;
    Some(vec![
        (P::GridTemplateRows, rows),
        (P::GridTemplateColumns, columns),
        (P::GridTemplateAreas, none()),
    ])
}

/// `auto-flow && dense?` with the flow direction `axis`.
fn consume_auto_flow(
    stream: &mut TokenStream<'_>,
    context: &ParserContext,
    axis: &str,
) -> Option<Rc<CSSValue>> {
    let mut guard = stream.save();
    let mut auto_flow = false;
    let mut dense = false;
    loop {
        if !auto_flow && guard.peek().is_ident("auto-flow") {
            auto_flow = true;
        } else if !dense && guard.peek().is_ident("dense") {
            dense = true;
        } else {
            break;
        }
        let _ = guard.consume_including_whitespace();
    }
    if !auto_flow {
        return None;
    }
    guard.release();
    let flow = context.pool().identifier(axis);
    if dense {
        return Some(CSSValue::space_list(vec![flow, context.pool().identifier("dense")]));
    }
    Some(flow)
}

/// [CSS Grid 2 § 7.8](https://www.w3.org/TR/css-grid-2/#grid-shorthand)
///
/// "`<'grid-template'> | <'grid-template-rows'> / [ auto-flow && dense? ]
/// <'grid-auto-columns'>? | [ auto-flow && dense? ] <'grid-auto-rows'>? /
/// <'grid-template-columns'>`"
fn consume_grid(stream: &mut TokenStream<'_>, context: &ParserContext) -> Option<Expansion> {
    let pool = context.pool();
    let initial = |id| initial_value(id, context);

    // `auto-flow` before the slash.
    if let Some(flow) = consume_auto_flow(stream, context, "row") {
        let auto_rows = if matches!(stream.peek(), CSSToken::Delim('/')) {
            initial(P::GridAutoRows)
        } else {
            consume_longhand(P::GridAutoRows, stream, context)?
        };
        if !matches!(stream.peek(), CSSToken::Delim('/')) {
            return None;
        }
        let _ = stream.consume_including_whitespace();
        let columns = consume_longhand(P::GridTemplateColumns, stream, context)?;
        return Some(vec![
            (P::GridTemplateRows, pool.identifier("none")),
            (P::GridTemplateColumns, columns),
            (P::GridTemplateAreas, pool.identifier("none")),
            (P::GridAutoRows, auto_rows),
            (P::GridAutoColumns, initial(P::GridAutoColumns)),
            (P::GridAutoFlow, flow),
        ]);
    }

    let has_auto_flow = stream
        .remaining()
        .iter()
        .any(|token| token.is_ident("auto-flow"));
    if !has_auto_flow {
        let mut expansion = consume_grid_template(stream, context)?;
        expansion.push((P::GridAutoRows, initial(P::GridAutoRows)));
        expansion.push((P::GridAutoColumns, initial(P::GridAutoColumns)));
        expansion.push((P::GridAutoFlow, initial(P::GridAutoFlow)));
        return Some(expansion);
    }

    // `auto-flow` after the slash.
    let rows = consume_longhand(P::GridTemplateRows, stream, context)?;
    if !matches!(stream.peek(), CSSToken::Delim('/')) {
        return None;
    }
    let _ = stream.consume_including_whitespace();
    let flow = consume_auto_flow(stream, context, "column")?;
    let auto_columns = if stream.at_end() {
        initial(P::GridAutoColumns)
    } else {
        consume_longhand(P::GridAutoColumns, stream, context)?
    };
    Some(vec![
        (P::GridTemplateRows, rows),
        (P::GridTemplateColumns, pool.identifier("none")),
        (P::GridTemplateAreas, pool.identifier("none")),
        (P::GridAutoRows, initial(P::GridAutoRows)),
        (P::GridAutoColumns, auto_columns),
        (P::GridAutoFlow, flow),
    ])
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn expand(name: &str, text: &str) -> Option<Vec<(String, String)>> {
        let context = ParserContext::new();
        let tokens = tokenize(text);
        let mut out = Vec::new();
        let name = PropertyName::parse(name)?;
        if !parse_declaration(&name, &tokens, false, &context, &mut out) {
            return None;
        }
        Some(
            out.into_iter()
                .map(|property| (property.name.to_string(), property.value.css_text()))
                .collect(),
        )
    }

    fn value_of(expansion: &[(String, String)], name: &str) -> String {
        expansion
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    #[test]
    fn every_initial_value_parses() {
        let context = ParserContext::new();
        for id in PropertyId::iter().filter(|id| !id.is_shorthand()) {
            let tokens = tokenize(id.initial_text());
            let mut stream = TokenStream::new(&tokens);
            assert!(parse_longhand(id, &mut stream, &context).is_some(), "{id}");
        }
    }

    #[test]
    fn important_is_stripped() {
        let tokens = tokenize("red ! IMPORTANT ");
        let (value, important) = strip_important(&tokens);
        assert!(important);
        assert_eq!(serialize_tokens(value), "red");
        let tokens = tokenize("red important");
        assert!(!strip_important(&tokens).1);
    }

    #[test]
    fn margin_expands_four_sides() {
        let expansion = expand("margin", "1px 2px 3px").unwrap_or_default();
        assert_eq!(value_of(&expansion, "margin-top"), "1px");
        assert_eq!(value_of(&expansion, "margin-right"), "2px");
        assert_eq!(value_of(&expansion, "margin-bottom"), "3px");
        assert_eq!(value_of(&expansion, "margin-left"), "2px");
        assert!(expand("margin", "1px 2px 3px 4px 5px").is_none());
    }

    #[test]
    fn border_resets_border_image() {
        let expansion = expand("border", "solid 2px red").unwrap_or_default();
        assert_eq!(expansion.len(), 17);
        assert_eq!(value_of(&expansion, "border-left-width"), "2px");
        assert_eq!(value_of(&expansion, "border-bottom-style"), "solid");
        assert_eq!(value_of(&expansion, "border-top-color"), "red");
        assert_eq!(value_of(&expansion, "border-image-source"), "none");
        assert_eq!(value_of(&expansion, "border-image-slice"), "100%");
    }

    #[test]
    fn flex_defaults() {
        let expansion = expand("flex", "2").unwrap_or_default();
        assert_eq!(value_of(&expansion, "flex-grow"), "2");
        assert_eq!(value_of(&expansion, "flex-shrink"), "1");
        assert_eq!(value_of(&expansion, "flex-basis"), "0%");
        let expansion = expand("flex", "none").unwrap_or_default();
        assert_eq!(value_of(&expansion, "flex-grow"), "0");
        assert_eq!(value_of(&expansion, "flex-basis"), "auto");
    }

    #[test]
    fn grid_area_defaults_follow_names() {
        let expansion = expand("grid-area", "a").unwrap_or_default();
        assert_eq!(value_of(&expansion, "grid-column-end"), "a");
        let expansion = expand("grid-area", "1 / 2").unwrap_or_default();
        assert_eq!(value_of(&expansion, "grid-row-end"), "auto");
        assert!(expand("grid-row", "0").is_none());
        assert!(expand("grid-row", "span -1").is_none());
    }

    #[test]
    fn var_makes_every_longhand_pending() {
        let expansion = expand("margin", "var(--x) 2px").unwrap_or_default();
        assert_eq!(expansion.len(), 4);
        assert!(expansion.iter().all(|(_, value)| value == "var(--x) 2px"));
    }

    #[test]
    fn all_takes_only_css_wide_keywords() {
        assert_eq!(
            expand("all", "revert-layer"),
            Some(vec![("all".to_owned(), "revert-layer".to_owned())])
        );
        assert!(expand("all", "red").is_none());
    }

    #[test]
    fn transition_rejects_none_in_lists() {
        assert!(expand("transition", "none, opacity 1s").is_none());
        let expansion = expand("transition", "opacity 1s ease-in 2s").unwrap_or_default();
        assert_eq!(value_of(&expansion, "transition-delay"), "2s");
        assert_eq!(value_of(&expansion, "transition-timing-function"), "ease-in");
    }
}
