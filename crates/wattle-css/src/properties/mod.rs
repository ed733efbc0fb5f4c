//! The property table.
//!
//! [CSS Cascade 5 § 1](https://www.w3.org/TR/css-cascade-5/#shorthand)
//!
//! Every property this crate parses has a [`PropertyId`]. Shorthands list
//! their longhands in expansion order; longhands carry their initial value,
//! whether they inherit, the grammar their value follows and the keywords
//! they accept. Custom properties have no id and are named by
//! [`PropertyName::Custom`].

use core::cmp::Reverse;
use core::fmt;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::values::ValueRange;

/// A known CSS property.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(into = "&'static str")]
#[allow(missing_docs)]
pub enum PropertyId {
    // Shorthands
    All,
    Margin,
    MarginBlock,
    MarginInline,
    Padding,
    PaddingBlock,
    PaddingInline,
    Inset,
    InsetBlock,
    InsetInline,
    ScrollMargin,
    ScrollPadding,
    ScrollPaddingBlock,
    ScrollPaddingInline,
    Border,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BorderWidth,
    BorderStyle,
    BorderColor,
    BorderRadius,
    BorderImage,
    BorderSpacing,
    Outline,
    ColumnRule,
    Columns,
    Gap,
    Background,
    BackgroundPosition,
    Transition,
    TextDecoration,
    TextEmphasis,
    Flex,
    FlexFlow,
    Overflow,
    PlaceItems,
    PlaceContent,
    PlaceSelf,
    GridTemplate,
    Grid,
    GridArea,
    GridRow,
    GridColumn,

    // Box model
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    MarginBlockStart,
    MarginBlockEnd,
    MarginInlineStart,
    MarginInlineEnd,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    PaddingBlockStart,
    PaddingBlockEnd,
    PaddingInlineStart,
    PaddingInlineEnd,
    Top,
    Right,
    Bottom,
    Left,
    InsetBlockStart,
    InsetBlockEnd,
    InsetInlineStart,
    InsetInlineEnd,
    ScrollMarginTop,
    ScrollMarginRight,
    ScrollMarginBottom,
    ScrollMarginLeft,
    ScrollPaddingTop,
    ScrollPaddingRight,
    ScrollPaddingBottom,
    ScrollPaddingLeft,
    ScrollPaddingBlockStart,
    ScrollPaddingBlockEnd,
    ScrollPaddingInlineStart,
    ScrollPaddingInlineEnd,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    BlockSize,
    InlineSize,
    MinBlockSize,
    MinInlineSize,
    ShapeMargin,
    OffsetDistance,
    BoxSizing,

    // Borders
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderTopStyle,
    BorderRightStyle,
    BorderBottomStyle,
    BorderLeftStyle,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    BorderBlockStartColor,
    BorderBlockEndColor,
    BorderInlineStartColor,
    BorderInlineEndColor,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomRightRadius,
    BorderBottomLeftRadius,
    BorderImageSource,
    BorderImageSlice,
    BorderImageWidth,
    BorderImageOutset,
    BorderImageRepeat,
    #[strum(to_string = "-webkit-border-horizontal-spacing")]
    WebkitBorderHorizontalSpacing,
    #[strum(to_string = "-webkit-border-vertical-spacing")]
    WebkitBorderVerticalSpacing,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    ColumnRuleWidth,
    ColumnRuleStyle,
    ColumnRuleColor,
    ColumnWidth,
    ColumnCount,
    RowGap,
    ColumnGap,

    // Backgrounds
    BackgroundColor,
    BackgroundImage,
    BackgroundPositionX,
    BackgroundPositionY,
    BackgroundSize,
    BackgroundRepeat,
    BackgroundAttachment,
    BackgroundOrigin,
    BackgroundClip,

    // Transitions
    TransitionProperty,
    TransitionDuration,
    TransitionTimingFunction,
    TransitionDelay,
    TransitionBehavior,

    // Text
    Color,
    CaretColor,
    FontSize,
    FontStyle,
    TextAlign,
    TextTransform,
    WhiteSpace,
    TextDecorationLine,
    TextDecorationStyle,
    TextDecorationColor,
    TextDecorationThickness,
    TextEmphasisStyle,
    TextEmphasisColor,
    #[strum(to_string = "-webkit-text-fill-color")]
    WebkitTextFillColor,
    #[strum(to_string = "-webkit-text-stroke-color")]
    WebkitTextStrokeColor,
    Direction,
    UnicodeBidi,

    // Flexbox and alignment
    FlexGrow,
    FlexShrink,
    FlexBasis,
    FlexDirection,
    FlexWrap,
    AlignItems,
    JustifyItems,
    AlignContent,
    JustifyContent,
    AlignSelf,
    JustifySelf,

    // Grid
    GridTemplateRows,
    GridTemplateColumns,
    GridTemplateAreas,
    GridAutoRows,
    GridAutoColumns,
    GridAutoFlow,
    GridRowStart,
    GridRowEnd,
    GridColumnStart,
    GridColumnEnd,

    // Display and positioning
    Display,
    Position,
    Float,
    Clear,
    Visibility,
    OverflowX,
    OverflowY,
    ZIndex,
    Opacity,
    Transform,
    PointerEvents,
    TableLayout,

    // SVG
    Fill,
    Stroke,
    FloodColor,
    LightingColor,
    StopColor,
    R,
    Rx,
    Ry,
    Cx,
    Cy,
    X,
    Y,
}

/// The grammar a longhand's value follows, beyond its keywords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grammar {
    /// Only the keywords in [`PropertyId::keywords`].
    Keywords,
    /// `<length-percentage>`
    LengthPercentage(ValueRange),
    /// `<length>`
    Length(ValueRange),
    /// `<color>`
    Color,
    /// `<number>`
    Number(ValueRange),
    /// `<number> | <percentage>`, as `opacity` takes.
    NumberOrPercent,
    /// `<integer>` no smaller than the minimum.
    Integer(i32),
    /// `<time>`
    Time(ValueRange),
    /// `<image>`
    Image,
    /// `<transform-list>`
    Transform,
    /// One or two `<length-percentage>`s for a corner.
    Radius,
    /// `<grid-line>`
    GridLine,
    /// `<track-list>` and other grid templates, kept as written.
    GridTemplate,
    /// `grid-template-areas`: strings.
    GridAreas,
    /// `[underline || overline || line-through || blink]`
    TextDecorationLine,
    /// `[filled | open] || <shape>` or a string.
    TextEmphasisStyle,
    /// `none | all | <custom-ident>`
    TransitionProperty,
    /// `<easing-function>`
    TimingFunction,
    /// `<bg-size>`
    BackgroundSize,
    /// `<repeat-style>`
    BackgroundRepeat,
    /// `[ <number> | <percentage> ]{1,4} && fill?`
    BorderImageSlice,
    /// `[ <length-percentage> | <number> | auto ]{1,4}`
    BorderImageQuad,
    /// `[ stretch | repeat | round | space ]{1,2}`
    BorderImageRepeat,
    /// `<length-percentage>` with the side keywords of one axis.
    PositionComponent,
    /// `[ row | column ] || dense`
    GridAutoFlow,
    /// Anything, stored as generic component values.
    Generic,
}

/// A property name as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PropertyName {
    /// A property from the table.
    Known(PropertyId),
    /// `--name`, case preserved.
    Custom(String),
}

impl PropertyName {
    /// Look up `name`: a custom property when it starts with `--`, otherwise
    /// a known property (ASCII case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        if name.starts_with("--") {
            return Some(Self::Custom(name.to_owned()));
        }
        name.parse().ok().map(Self::Known)
    }

    /// The id, if this is a known property.
    #[must_use]
    pub const fn id(&self) -> Option<PropertyId> {
        match self {
            Self::Known(id) => Some(*id),
            Self::Custom(_) => None,
        }
    }

    /// True for custom properties.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Custom properties are not affected by `all`.
    #[must_use]
    pub fn is_affected_by_all(&self) -> bool {
        self.id().is_some_and(PropertyId::is_affected_by_all)
    }
}

impl From<PropertyId> for PropertyName {
    fn from(id: PropertyId) -> Self {
        Self::Known(id)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(id) => f.write_str(id.into_static()),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

use PropertyId as P;

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "inset", "groove", "outset", "ridge", "dotted", "dashed", "solid", "double",
];
const LINE_WIDTHS: &[&str] = &["thin", "medium", "thick"];
const AUTO: &[&str] = &["auto"];
const NONE: &[&str] = &["none"];
const NORMAL: &[&str] = &["normal"];
const SIZING: &[&str] = &["auto", "min-content", "max-content", "fit-content"];
const MAX_SIZING: &[&str] = &["none", "min-content", "max-content", "fit-content"];
const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto", "overlay"];
const BOX: &[&str] = &["border-box", "padding-box", "content-box"];
const SELF_ALIGNMENT: &[&str] = &[
    "auto", "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end", "left", "right",
];
const CONTENT_ALIGNMENT: &[&str] = &[
    "normal", "baseline", "center", "start", "end", "flex-start", "flex-end", "left", "right",
    "space-between", "space-around", "space-evenly", "stretch",
];
const ITEMS_ALIGNMENT: &[&str] = &[
    "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end", "left", "right", "legacy",
];

impl PropertyId {
    /// The name as written in style sheets.
    #[must_use]
    pub fn into_static(self) -> &'static str {
        self.into()
    }

    /// The longhands of a shorthand, in expansion order. Empty for longhands.
    #[must_use]
    pub const fn longhands(self) -> &'static [Self] {
        match self {
            P::Margin => &[P::MarginTop, P::MarginRight, P::MarginBottom, P::MarginLeft],
            P::MarginBlock => &[P::MarginBlockStart, P::MarginBlockEnd],
            P::MarginInline => &[P::MarginInlineStart, P::MarginInlineEnd],
            P::Padding => &[P::PaddingTop, P::PaddingRight, P::PaddingBottom, P::PaddingLeft],
            P::PaddingBlock => &[P::PaddingBlockStart, P::PaddingBlockEnd],
            P::PaddingInline => &[P::PaddingInlineStart, P::PaddingInlineEnd],
            P::Inset => &[P::Top, P::Right, P::Bottom, P::Left],
            P::InsetBlock => &[P::InsetBlockStart, P::InsetBlockEnd],
            P::InsetInline => &[P::InsetInlineStart, P::InsetInlineEnd],
            P::ScrollMargin => &[
                P::ScrollMarginTop,
                P::ScrollMarginRight,
                P::ScrollMarginBottom,
                P::ScrollMarginLeft,
            ],
            P::ScrollPadding => &[
                P::ScrollPaddingTop,
                P::ScrollPaddingRight,
                P::ScrollPaddingBottom,
                P::ScrollPaddingLeft,
            ],
            P::ScrollPaddingBlock => &[P::ScrollPaddingBlockStart, P::ScrollPaddingBlockEnd],
            P::ScrollPaddingInline => &[P::ScrollPaddingInlineStart, P::ScrollPaddingInlineEnd],
            P::Border => &[
                P::BorderTopWidth,
                P::BorderRightWidth,
                P::BorderBottomWidth,
                P::BorderLeftWidth,
                P::BorderTopStyle,
                P::BorderRightStyle,
                P::BorderBottomStyle,
                P::BorderLeftStyle,
                P::BorderTopColor,
                P::BorderRightColor,
                P::BorderBottomColor,
                P::BorderLeftColor,
                P::BorderImageSource,
                P::BorderImageSlice,
                P::BorderImageWidth,
                P::BorderImageOutset,
                P::BorderImageRepeat,
            ],
            P::BorderTop => &[P::BorderTopWidth, P::BorderTopStyle, P::BorderTopColor],
            P::BorderRight => &[P::BorderRightWidth, P::BorderRightStyle, P::BorderRightColor],
            P::BorderBottom => &[P::BorderBottomWidth, P::BorderBottomStyle, P::BorderBottomColor],
            P::BorderLeft => &[P::BorderLeftWidth, P::BorderLeftStyle, P::BorderLeftColor],
            P::BorderWidth => &[
                P::BorderTopWidth,
                P::BorderRightWidth,
                P::BorderBottomWidth,
                P::BorderLeftWidth,
            ],
            P::BorderStyle => &[
                P::BorderTopStyle,
                P::BorderRightStyle,
                P::BorderBottomStyle,
                P::BorderLeftStyle,
            ],
            P::BorderColor => &[
                P::BorderTopColor,
                P::BorderRightColor,
                P::BorderBottomColor,
                P::BorderLeftColor,
            ],
            P::BorderRadius => &[
                P::BorderTopLeftRadius,
                P::BorderTopRightRadius,
                P::BorderBottomRightRadius,
                P::BorderBottomLeftRadius,
            ],
            P::BorderImage => &[
                P::BorderImageSource,
                P::BorderImageSlice,
                P::BorderImageWidth,
                P::BorderImageOutset,
                P::BorderImageRepeat,
            ],
            P::BorderSpacing => &[P::WebkitBorderHorizontalSpacing, P::WebkitBorderVerticalSpacing],
            P::Outline => &[P::OutlineColor, P::OutlineStyle, P::OutlineWidth],
            P::ColumnRule => &[P::ColumnRuleWidth, P::ColumnRuleStyle, P::ColumnRuleColor],
            P::Columns => &[P::ColumnWidth, P::ColumnCount],
            P::Gap => &[P::RowGap, P::ColumnGap],
            P::Background => &[
                P::BackgroundImage,
                P::BackgroundPositionX,
                P::BackgroundPositionY,
                P::BackgroundSize,
                P::BackgroundRepeat,
                P::BackgroundAttachment,
                P::BackgroundOrigin,
                P::BackgroundClip,
                P::BackgroundColor,
            ],
            P::BackgroundPosition => &[P::BackgroundPositionX, P::BackgroundPositionY],
            P::Transition => &[
                P::TransitionProperty,
                P::TransitionDuration,
                P::TransitionTimingFunction,
                P::TransitionDelay,
                P::TransitionBehavior,
            ],
            P::TextDecoration => &[
                P::TextDecorationLine,
                P::TextDecorationThickness,
                P::TextDecorationStyle,
                P::TextDecorationColor,
            ],
            P::TextEmphasis => &[P::TextEmphasisStyle, P::TextEmphasisColor],
            P::Flex => &[P::FlexGrow, P::FlexShrink, P::FlexBasis],
            P::FlexFlow => &[P::FlexDirection, P::FlexWrap],
            P::Overflow => &[P::OverflowX, P::OverflowY],
            P::PlaceItems => &[P::AlignItems, P::JustifyItems],
            P::PlaceContent => &[P::AlignContent, P::JustifyContent],
            P::PlaceSelf => &[P::AlignSelf, P::JustifySelf],
            P::GridTemplate => &[P::GridTemplateRows, P::GridTemplateColumns, P::GridTemplateAreas],
            P::Grid => &[
                P::GridTemplateRows,
                P::GridTemplateColumns,
                P::GridTemplateAreas,
                P::GridAutoRows,
                P::GridAutoColumns,
                P::GridAutoFlow,
            ],
            P::GridArea => &[P::GridRowStart, P::GridColumnStart, P::GridRowEnd, P::GridColumnEnd],
            P::GridRow => &[P::GridRowStart, P::GridRowEnd],
            P::GridColumn => &[P::GridColumnStart, P::GridColumnEnd],
            _ => &[],
        }
    }

    /// True for shorthands, including `all`.
    #[must_use]
    pub const fn is_shorthand(self) -> bool {
        matches!(self, P::All) || !self.longhands().is_empty()
    }

    /// Shorthands whose longhands hold one item per comma-separated layer.
    #[must_use]
    pub const fn is_layered_shorthand(self) -> bool {
        matches!(self, P::Background | P::BackgroundPosition | P::Transition)
    }

    /// Shorthands that include this longhand, those with the most longhands
    /// first.
    #[must_use]
    pub fn shorthands(self) -> Vec<Self> {
        let mut shorthands: Vec<Self> = Self::iter()
            .filter(|shorthand| shorthand.longhands().contains(&self))
            .collect();
        shorthands.sort_by_key(|shorthand| Reverse(shorthand.longhands().len()));
        shorthands
    }

    /// Longhands whose value is always a comma-separated list of layers.
    #[must_use]
    pub const fn is_layered(self) -> bool {
        matches!(
            self,
            P::BackgroundImage
                | P::BackgroundPositionX
                | P::BackgroundPositionY
                | P::BackgroundSize
                | P::BackgroundRepeat
                | P::BackgroundAttachment
                | P::BackgroundOrigin
                | P::BackgroundClip
                | P::TransitionProperty
                | P::TransitionDuration
                | P::TransitionTimingFunction
                | P::TransitionDelay
                | P::TransitionBehavior
        )
    }

    /// [CSS Cascade 5 § 3.2](https://www.w3.org/TR/css-cascade-5/#all-shorthand)
    ///
    /// "The all property is a shorthand that resets all CSS properties except
    /// direction and unicode-bidi."
    #[must_use]
    pub const fn is_affected_by_all(self) -> bool {
        !matches!(self, P::Direction | P::UnicodeBidi | P::All) && !self.is_shorthand()
    }

    /// [CSS Cascade 5 § 4.1](https://www.w3.org/TR/css-cascade-5/#inherited-property)
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        matches!(
            self,
            P::Color
                | P::CaretColor
                | P::FontSize
                | P::FontStyle
                | P::TextAlign
                | P::TextTransform
                | P::WhiteSpace
                | P::TextEmphasisStyle
                | P::TextEmphasisColor
                | P::WebkitTextFillColor
                | P::WebkitTextStrokeColor
                | P::Direction
                | P::Visibility
                | P::PointerEvents
                | P::WebkitBorderHorizontalSpacing
                | P::WebkitBorderVerticalSpacing
                | P::Fill
                | P::Stroke
        )
    }

    /// The initial value, as CSS text.
    #[must_use]
    pub const fn initial_text(self) -> &'static str {
        match self {
            P::MarginTop
            | P::MarginRight
            | P::MarginBottom
            | P::MarginLeft
            | P::MarginBlockStart
            | P::MarginBlockEnd
            | P::MarginInlineStart
            | P::MarginInlineEnd
            | P::PaddingTop
            | P::PaddingRight
            | P::PaddingBottom
            | P::PaddingLeft
            | P::PaddingBlockStart
            | P::PaddingBlockEnd
            | P::PaddingInlineStart
            | P::PaddingInlineEnd
            | P::ScrollMarginTop
            | P::ScrollMarginRight
            | P::ScrollMarginBottom
            | P::ScrollMarginLeft
            | P::ShapeMargin
            | P::OffsetDistance
            | P::WebkitBorderHorizontalSpacing
            | P::WebkitBorderVerticalSpacing
            | P::BorderTopLeftRadius
            | P::BorderTopRightRadius
            | P::BorderBottomRightRadius
            | P::BorderBottomLeftRadius
            | P::R
            | P::Cx
            | P::Cy
            | P::X
            | P::Y => "0px",
            P::FlexGrow | P::BorderImageOutset => "0",
            P::FlexShrink => "1",
            P::Rx | P::Ry => "auto",
            P::BorderTopWidth
            | P::BorderRightWidth
            | P::BorderBottomWidth
            | P::BorderLeftWidth
            | P::OutlineWidth
            | P::ColumnRuleWidth => "medium",
            P::BorderTopStyle
            | P::BorderRightStyle
            | P::BorderBottomStyle
            | P::BorderLeftStyle
            | P::OutlineStyle
            | P::ColumnRuleStyle
            | P::TextDecorationLine
            | P::TextEmphasisStyle
            | P::BorderImageSource
            | P::BackgroundImage
            | P::MaxWidth
            | P::MaxHeight
            | P::Transform
            | P::GridTemplateRows
            | P::GridTemplateColumns
            | P::GridTemplateAreas
            | P::Float
            | P::Clear => "none",
            P::BorderTopColor
            | P::BorderRightColor
            | P::BorderBottomColor
            | P::BorderLeftColor
            | P::BorderBlockStartColor
            | P::BorderBlockEndColor
            | P::BorderInlineStartColor
            | P::BorderInlineEndColor
            | P::OutlineColor
            | P::ColumnRuleColor
            | P::TextDecorationColor
            | P::TextEmphasisColor
            | P::WebkitTextFillColor
            | P::WebkitTextStrokeColor => "currentcolor",
            P::CaretColor => "auto",
            P::BorderImageSlice => "100%",
            P::BorderImageWidth => "1",
            P::BorderImageRepeat => "stretch",
            P::BackgroundColor => "transparent",
            P::LightingColor => "white",
            P::BackgroundPositionX | P::BackgroundPositionY => "0%",
            P::BackgroundRepeat => "repeat",
            P::BackgroundAttachment => "scroll",
            P::BackgroundOrigin => "padding-box",
            P::BackgroundClip => "border-box",
            P::TransitionProperty => "all",
            P::TransitionDuration | P::TransitionDelay => "0s",
            P::TransitionTimingFunction => "ease",
            P::TransitionBehavior
            | P::RowGap
            | P::ColumnGap
            | P::AlignContent
            | P::JustifyContent
            | P::AlignItems
            | P::JustifyItems
            | P::WhiteSpace
            | P::FontStyle
            | P::UnicodeBidi => "normal",
            P::Color | P::StopColor | P::FloodColor | P::Fill => "black",
            P::Stroke => "none",
            P::FontSize => "medium",
            P::TextAlign => "start",
            P::TextTransform => "none",
            P::TextDecorationStyle => "solid",
            P::Direction => "ltr",
            P::FlexBasis
            | P::Top
            | P::Right
            | P::Bottom
            | P::Left
            | P::InsetBlockStart
            | P::InsetBlockEnd
            | P::InsetInlineStart
            | P::InsetInlineEnd
            | P::ScrollPaddingTop
            | P::ScrollPaddingRight
            | P::ScrollPaddingBottom
            | P::ScrollPaddingLeft
            | P::ScrollPaddingBlockStart
            | P::ScrollPaddingBlockEnd
            | P::ScrollPaddingInlineStart
            | P::ScrollPaddingInlineEnd
            | P::Width
            | P::Height
            | P::MinWidth
            | P::MinHeight
            | P::BlockSize
            | P::InlineSize
            | P::MinBlockSize
            | P::MinInlineSize
            | P::ColumnWidth
            | P::ColumnCount
            | P::TextDecorationThickness
            | P::BackgroundSize
            | P::AlignSelf
            | P::JustifySelf
            | P::GridAutoRows
            | P::GridAutoColumns
            | P::GridRowStart
            | P::GridRowEnd
            | P::GridColumnStart
            | P::GridColumnEnd
            | P::ZIndex
            | P::PointerEvents
            | P::TableLayout => "auto",
            P::FlexDirection | P::GridAutoFlow => "row",
            P::FlexWrap => "nowrap",
            P::BoxSizing => "content-box",
            P::Display => "inline",
            P::Position => "static",
            P::Visibility => "visible",
            P::OverflowX | P::OverflowY => "visible",
            P::Opacity => "1",
            // Shorthands have no initial value of their own.
            _ => "",
        }
    }

    /// The grammar of a longhand's value. Shorthands report
    /// [`Grammar::Generic`].
    #[must_use]
    pub const fn grammar(self) -> Grammar {
        match self {
            P::MarginTop
            | P::MarginRight
            | P::MarginBottom
            | P::MarginLeft
            | P::MarginBlockStart
            | P::MarginBlockEnd
            | P::MarginInlineStart
            | P::MarginInlineEnd
            | P::Top
            | P::Right
            | P::Bottom
            | P::Left
            | P::InsetBlockStart
            | P::InsetBlockEnd
            | P::InsetInlineStart
            | P::InsetInlineEnd
            | P::OffsetDistance
            | P::Cx
            | P::Cy
            | P::X
            | P::Y => Grammar::LengthPercentage(ValueRange::All),
            P::PaddingTop
            | P::PaddingRight
            | P::PaddingBottom
            | P::PaddingLeft
            | P::PaddingBlockStart
            | P::PaddingBlockEnd
            | P::PaddingInlineStart
            | P::PaddingInlineEnd
            | P::ScrollPaddingTop
            | P::ScrollPaddingRight
            | P::ScrollPaddingBottom
            | P::ScrollPaddingLeft
            | P::ScrollPaddingBlockStart
            | P::ScrollPaddingBlockEnd
            | P::ScrollPaddingInlineStart
            | P::ScrollPaddingInlineEnd
            | P::Width
            | P::Height
            | P::MinWidth
            | P::MinHeight
            | P::MaxWidth
            | P::MaxHeight
            | P::BlockSize
            | P::InlineSize
            | P::MinBlockSize
            | P::MinInlineSize
            | P::ShapeMargin
            | P::FontSize
            | P::FlexBasis
            | P::RowGap
            | P::ColumnGap
            | P::TextDecorationThickness
            | P::R
            | P::Rx
            | P::Ry => Grammar::LengthPercentage(ValueRange::NonNegative),
            P::ScrollMarginTop | P::ScrollMarginRight | P::ScrollMarginBottom | P::ScrollMarginLeft => {
                Grammar::Length(ValueRange::All)
            }
            P::BorderTopWidth
            | P::BorderRightWidth
            | P::BorderBottomWidth
            | P::BorderLeftWidth
            | P::OutlineWidth
            | P::ColumnRuleWidth
            | P::ColumnWidth
            | P::WebkitBorderHorizontalSpacing
            | P::WebkitBorderVerticalSpacing => Grammar::Length(ValueRange::NonNegative),
            P::BorderTopColor
            | P::BorderRightColor
            | P::BorderBottomColor
            | P::BorderLeftColor
            | P::BorderBlockStartColor
            | P::BorderBlockEndColor
            | P::BorderInlineStartColor
            | P::BorderInlineEndColor
            | P::OutlineColor
            | P::ColumnRuleColor
            | P::BackgroundColor
            | P::Color
            | P::CaretColor
            | P::TextDecorationColor
            | P::TextEmphasisColor
            | P::WebkitTextFillColor
            | P::WebkitTextStrokeColor
            | P::Fill
            | P::Stroke
            | P::FloodColor
            | P::LightingColor
            | P::StopColor => Grammar::Color,
            P::FlexGrow | P::FlexShrink => Grammar::Number(ValueRange::NonNegative),
            P::Opacity => Grammar::NumberOrPercent,
            P::ZIndex => Grammar::Integer(i32::MIN),
            P::ColumnCount => Grammar::Integer(1),
            P::TransitionDuration => Grammar::Time(ValueRange::NonNegative),
            P::TransitionDelay => Grammar::Time(ValueRange::All),
            P::BackgroundImage | P::BorderImageSource => Grammar::Image,
            P::Transform => Grammar::Transform,
            P::BorderTopLeftRadius
            | P::BorderTopRightRadius
            | P::BorderBottomRightRadius
            | P::BorderBottomLeftRadius => Grammar::Radius,
            P::GridRowStart | P::GridRowEnd | P::GridColumnStart | P::GridColumnEnd => {
                Grammar::GridLine
            }
            P::GridTemplateRows
            | P::GridTemplateColumns
            | P::GridAutoRows
            | P::GridAutoColumns => Grammar::GridTemplate,
            P::GridTemplateAreas => Grammar::GridAreas,
            P::GridAutoFlow => Grammar::GridAutoFlow,
            P::TextDecorationLine => Grammar::TextDecorationLine,
            P::TextEmphasisStyle => Grammar::TextEmphasisStyle,
            P::TransitionProperty => Grammar::TransitionProperty,
            P::TransitionTimingFunction => Grammar::TimingFunction,
            P::BackgroundSize => Grammar::BackgroundSize,
            P::BackgroundRepeat => Grammar::BackgroundRepeat,
            P::BorderImageSlice => Grammar::BorderImageSlice,
            P::BorderImageWidth | P::BorderImageOutset => Grammar::BorderImageQuad,
            P::BorderImageRepeat => Grammar::BorderImageRepeat,
            P::BackgroundPositionX | P::BackgroundPositionY => Grammar::PositionComponent,
            P::BorderTopStyle
            | P::BorderRightStyle
            | P::BorderBottomStyle
            | P::BorderLeftStyle
            | P::OutlineStyle
            | P::ColumnRuleStyle
            | P::BoxSizing
            | P::BackgroundAttachment
            | P::BackgroundOrigin
            | P::BackgroundClip
            | P::TransitionBehavior
            | P::FontStyle
            | P::TextAlign
            | P::TextTransform
            | P::WhiteSpace
            | P::TextDecorationStyle
            | P::Direction
            | P::UnicodeBidi
            | P::FlexDirection
            | P::FlexWrap
            | P::AlignItems
            | P::JustifyItems
            | P::AlignContent
            | P::JustifyContent
            | P::AlignSelf
            | P::JustifySelf
            | P::Display
            | P::Position
            | P::Float
            | P::Clear
            | P::Visibility
            | P::OverflowX
            | P::OverflowY
            | P::PointerEvents
            | P::TableLayout => Grammar::Keywords,
            _ => Grammar::Generic,
        }
    }

    /// The keywords a longhand accepts besides the CSS-wide keywords.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            P::MarginTop
            | P::MarginRight
            | P::MarginBottom
            | P::MarginLeft
            | P::MarginBlockStart
            | P::MarginBlockEnd
            | P::MarginInlineStart
            | P::MarginInlineEnd
            | P::Top
            | P::Right
            | P::Bottom
            | P::Left
            | P::InsetBlockStart
            | P::InsetBlockEnd
            | P::InsetInlineStart
            | P::InsetInlineEnd
            | P::ScrollPaddingTop
            | P::ScrollPaddingRight
            | P::ScrollPaddingBottom
            | P::ScrollPaddingLeft
            | P::ScrollPaddingBlockStart
            | P::ScrollPaddingBlockEnd
            | P::ScrollPaddingInlineStart
            | P::ScrollPaddingInlineEnd
            | P::ColumnWidth
            | P::ColumnCount
            | P::ZIndex
            | P::CaretColor
            | P::Rx
            | P::Ry => AUTO,
            P::Width
            | P::Height
            | P::MinWidth
            | P::MinHeight
            | P::BlockSize
            | P::InlineSize
            | P::MinBlockSize
            | P::MinInlineSize => SIZING,
            P::MaxWidth | P::MaxHeight => MAX_SIZING,
            P::FlexBasis => &["auto", "content", "min-content", "max-content", "fit-content"],
            P::FontSize => &[
                "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
                "xxx-large", "larger", "smaller", "math",
            ],
            P::BorderTopWidth
            | P::BorderRightWidth
            | P::BorderBottomWidth
            | P::BorderLeftWidth
            | P::OutlineWidth
            | P::ColumnRuleWidth => LINE_WIDTHS,
            P::BorderTopStyle
            | P::BorderRightStyle
            | P::BorderBottomStyle
            | P::BorderLeftStyle
            | P::ColumnRuleStyle => BORDER_STYLES,
            P::OutlineStyle => &[
                "auto", "none", "inset", "groove", "outset", "ridge", "dotted", "dashed", "solid",
                "double",
            ],
            P::RowGap | P::ColumnGap => NORMAL,
            P::TransitionBehavior => &["normal", "allow-discrete"],
            P::TextDecorationThickness => &["auto", "from-font"],
            P::Opacity | P::FlexGrow | P::FlexShrink => &[],
            P::Stroke | P::Fill => NONE,
            P::BackgroundImage
            | P::BorderImageSource
            | P::Transform
            | P::TextEmphasisStyle
            | P::TextDecorationLine
            | P::GridTemplateRows
            | P::GridTemplateColumns
            | P::GridTemplateAreas => NONE,
            P::BoxSizing => &["content-box", "border-box"],
            P::BackgroundAttachment => &["scroll", "fixed", "local"],
            P::BackgroundOrigin => BOX,
            P::BackgroundClip => &["border-box", "padding-box", "content-box", "text"],
            P::FontStyle => &["normal", "italic", "oblique"],
            P::TextAlign => &[
                "start", "end", "left", "right", "center", "justify", "match-parent",
                "-webkit-auto", "-webkit-left", "-webkit-right", "-webkit-center",
            ],
            P::TextTransform => &["none", "capitalize", "uppercase", "lowercase", "full-width"],
            P::WhiteSpace => &["normal", "pre", "nowrap", "pre-wrap", "pre-line", "break-spaces"],
            P::TextDecorationStyle => &["solid", "double", "dotted", "dashed", "wavy"],
            P::Direction => &["ltr", "rtl"],
            P::UnicodeBidi => &[
                "normal", "embed", "isolate", "bidi-override", "isolate-override", "plaintext",
            ],
            P::FlexDirection => &["row", "row-reverse", "column", "column-reverse"],
            P::FlexWrap => &["nowrap", "wrap", "wrap-reverse"],
            P::AlignItems | P::JustifyItems => ITEMS_ALIGNMENT,
            P::AlignContent | P::JustifyContent => CONTENT_ALIGNMENT,
            P::AlignSelf | P::JustifySelf => SELF_ALIGNMENT,
            P::Display => &[
                "inline", "block", "list-item", "inline-block", "table", "inline-table",
                "table-row-group", "table-header-group", "table-footer-group", "table-row",
                "table-column-group", "table-column", "table-cell", "table-caption", "flex",
                "inline-flex", "grid", "inline-grid", "contents", "flow-root", "none",
            ],
            P::Position => &["static", "relative", "absolute", "fixed", "sticky"],
            P::Float => &["none", "left", "right", "inline-start", "inline-end"],
            P::Clear => &["none", "left", "right", "both", "inline-start", "inline-end"],
            P::Visibility => &["visible", "hidden", "collapse"],
            P::OverflowX | P::OverflowY => OVERFLOW,
            P::PointerEvents => &[
                "auto", "none", "visiblepainted", "visiblefill", "visiblestroke", "visible",
                "painted", "fill", "stroke", "all", "bounding-box",
            ],
            P::TableLayout => &["auto", "fixed"],
            P::BackgroundSize => &["auto", "cover", "contain"],
            P::BackgroundRepeat => &["repeat-x", "repeat-y", "repeat", "space", "round", "no-repeat"],
            P::BorderImageRepeat => &["stretch", "repeat", "round", "space"],
            P::GridRowStart | P::GridRowEnd | P::GridColumnStart | P::GridColumnEnd => AUTO,
            P::GridAutoRows | P::GridAutoColumns => AUTO,
            P::TransitionProperty => &["none", "all"],
            P::TransitionTimingFunction => &[
                "ease", "linear", "ease-in", "ease-out", "ease-in-out", "step-start", "step-end",
            ],
            P::BackgroundPositionX => &["left", "center", "right"],
            P::BackgroundPositionY => &["top", "center", "bottom"],
            P::GridAutoFlow => &["row", "column", "dense"],
            _ => &[],
        }
    }

    /// [Quirks § 3.9](https://quirks.spec.whatwg.org/#the-unitless-length-quirk)
    ///
    /// Properties where quirks mode reads a bare number as `px`.
    #[must_use]
    pub const fn allows_unitless_quirk(self) -> bool {
        matches!(
            self,
            P::MarginTop
                | P::MarginRight
                | P::MarginBottom
                | P::MarginLeft
                | P::PaddingTop
                | P::PaddingRight
                | P::PaddingBottom
                | P::PaddingLeft
                | P::Top
                | P::Right
                | P::Bottom
                | P::Left
                | P::Width
                | P::Height
                | P::MinWidth
                | P::MinHeight
                | P::MaxWidth
                | P::MaxHeight
                | P::FontSize
                | P::BorderTopWidth
                | P::BorderRightWidth
                | P::BorderBottomWidth
                | P::BorderLeftWidth
                | P::WebkitBorderHorizontalSpacing
                | P::WebkitBorderVerticalSpacing
                | P::BackgroundPositionX
                | P::BackgroundPositionY
                | P::BorderTopLeftRadius
                | P::BorderTopRightRadius
                | P::BorderBottomRightRadius
                | P::BorderBottomLeftRadius
        )
    }

    /// [Quirks § 3.8](https://quirks.spec.whatwg.org/#the-hashless-hex-color-quirk)
    ///
    /// Properties where quirks mode accepts hex colors without the `#`.
    #[must_use]
    pub const fn allows_quirky_color(self) -> bool {
        matches!(
            self,
            P::Color
                | P::BackgroundColor
                | P::BorderTopColor
                | P::BorderRightColor
                | P::BorderBottomColor
                | P::BorderLeftColor
        )
    }

    /// Properties that only exist as SVG geometry attributes.
    #[must_use]
    pub const fn is_svg_geometry(self) -> bool {
        matches!(self, P::R | P::Rx | P::Ry | P::Cx | P::Cy | P::X | P::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for id in PropertyId::iter() {
            let name = id.to_string();
            assert_eq!(name.parse::<PropertyId>().ok(), Some(id), "{name}");
        }
        assert_eq!(
            "-WEBKIT-text-fill-color".parse::<PropertyId>().ok(),
            Some(PropertyId::WebkitTextFillColor)
        );
        assert_eq!(PropertyId::BorderTopLeftRadius.to_string(), "border-top-left-radius");
    }

    #[test]
    fn every_longhand_has_an_initial_value() {
        for id in PropertyId::iter().filter(|id| !id.is_shorthand()) {
            assert!(!id.initial_text().is_empty(), "{id}");
        }
    }

    #[test]
    fn shorthands_expand_to_longhands() {
        for id in PropertyId::iter().filter(|id| *id != PropertyId::All) {
            for longhand in id.longhands() {
                assert!(!longhand.is_shorthand(), "{id} -> {longhand}");
            }
        }
    }

    #[test]
    fn all_skips_direction() {
        assert!(!PropertyId::Direction.is_affected_by_all());
        assert!(!PropertyId::UnicodeBidi.is_affected_by_all());
        assert!(PropertyId::Color.is_affected_by_all());
        assert!(!PropertyName::Custom("--x".into()).is_affected_by_all());
    }

    #[test]
    fn custom_names_keep_case() {
        assert_eq!(
            PropertyName::parse("--MyVar"),
            Some(PropertyName::Custom("--MyVar".into()))
        );
        assert_eq!(
            PropertyName::parse("Margin-Top"),
            Some(PropertyName::Known(PropertyId::MarginTop))
        );
        assert_eq!(PropertyName::parse("bogus"), None);
    }
}
