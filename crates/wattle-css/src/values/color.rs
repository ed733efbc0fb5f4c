//! CSS colors.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use std::fmt::Write as _;

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// "CSS defines a large set of named colors, so that common colors can be
/// written and read more easily." Values are `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

/// [§ 6.2 System Colors](https://www.w3.org/TR/css-color-4/#css-system-colors)
const SYSTEM_COLORS: &[&str] = &[
    "accentcolor",
    "accentcolortext",
    "activetext",
    "buttonborder",
    "buttonface",
    "buttontext",
    "canvas",
    "canvastext",
    "field",
    "fieldtext",
    "graytext",
    "highlight",
    "highlighttext",
    "linktext",
    "mark",
    "marktext",
    "selecteditem",
    "selecteditemtext",
    "visitedtext",
];

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn from_packed(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
    /// consists of 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
        let pair = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
        match hex.len() {
            // "The three-digit RGB notation (#RGB) is converted into six-digit
            // form (#RRGGBB) by replicating digits, not by adding zeros."
            3 | 4 => {
                let a = if hex.len() == 4 { digit(3)? * 17 } else { 255 };
                Some(Self::rgba(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, a))
            }
            6 | 8 => {
                let a = if hex.len() == 8 { pair(6)? } else { 255 };
                Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, a))
            }
            _ => None,
        }
    }

    /// A named color or `transparent`, ignoring ASCII case.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, rgb)| Self::from_packed(*rgb))
    }

    /// True for the system color keywords, which resolve only at used-value
    /// time and are kept as identifiers.
    #[must_use]
    pub fn is_system_color(name: &str) -> bool {
        SYSTEM_COLORS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    /// Hex notation (`#rrggbb`, or `#rrggbbaa` when translucent).
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// [CSSOM § 6.7.2 Serializing CSS values](https://drafts.csswg.org/cssom/#serializing-css-values)
    ///
    /// "If the value is an sRGB color with alpha 1, serialize as `rgb()`,
    /// otherwise as `rgba()`." Alpha uses the shortest of two or three
    /// decimals that maps back to the same 8-bit value.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        if self.a == 255 {
            let _ = write!(out, "rgb({}, {}, {})", self.r, self.g, self.b);
        } else {
            let _ = write!(
                out,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                alpha_text(self.a)
            );
        }
        out
    }

    /// Linear interpolation in sRGB with premultiplied alpha, as
    /// `color-mix(in srgb, …)` does.
    ///
    /// `weight` is the share of `self`, in `0.0..=1.0`.
    #[must_use]
    pub fn mix_srgb(&self, other: &Self, weight: f64) -> Self {
        let alpha_a = f64::from(self.a) / 255.0;
        let alpha_b = f64::from(other.a) / 255.0;
        let alpha = alpha_a * weight + alpha_b * (1.0 - weight);
        let channel = |a: u8, b: u8| {
            if alpha == 0.0 {
                return 0;
            }
            let premultiplied =
                f64::from(a) * alpha_a * weight + f64::from(b) * alpha_b * (1.0 - weight);
            unit_to_u8(premultiplied / alpha / 255.0)
        };
        Self::rgba(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            unit_to_u8(alpha),
        )
    }
}

/// Map `0.0..=1.0` onto `0..=255`, clamping out-of-range input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_text(alpha: u8) -> String {
    let fraction = f64::from(alpha) / 255.0;
    let two_places = (fraction * 100.0).round() / 100.0;
    let rounded = if unit_to_u8(two_places) == alpha {
        two_places
    } else {
        (fraction * 1000.0).round() / 1000.0
    };
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

/// [§ 7.1 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// `hue` in degrees (wraps), `saturation` and `lightness` in `0.0..=1.0`.
/// Returns the channels in `0.0..=1.0`.
#[must_use]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let hue = hue.rem_euclid(360.0);
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);
    let channel = |n: f64| {
        let k = (n + hue / 30.0) % 12.0;
        let a = saturation * lightness.min(1.0 - lightness);
        lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

/// [§ 8.1 HWB-to-RGB](https://www.w3.org/TR/css-color-4/#hwb-to-rgb)
///
/// "If white + black is greater than or equal to 100%, it defines an
/// achromatic color."
#[must_use]
pub fn hwb_to_rgb(hue: f64, whiteness: f64, blackness: f64) -> (f64, f64, f64) {
    let whiteness = whiteness.clamp(0.0, 1.0);
    let blackness = blackness.clamp(0.0, 1.0);
    if whiteness + blackness >= 1.0 {
        let gray = whiteness / (whiteness + blackness);
        return (gray, gray, gray);
    }
    let (r, g, b) = hsl_to_rgb(hue, 1.0, 0.5);
    let scale = |channel: f64| channel * (1.0 - whiteness - blackness) + whiteness;
    (scale(r), scale(g), scale(b))
}

type Matrix = [[f64; 3]; 3];

fn multiply(matrix: &Matrix, (x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
    let row = |coefficients: &[f64; 3]| {
        coefficients[0] * x + coefficients[1] * y + coefficients[2] * z
    };
    (row(&matrix[0]), row(&matrix[1]), row(&matrix[2]))
}

const D50_WHITE: (f64, f64, f64) = (0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585);

/// Bradford chromatic adaptation from D50 to D65.
const D50_TO_D65: Matrix = [
    [0.955_473_421_488_075, -0.023_098_454_948_764_7, 0.063_259_243_200_570_7],
    [-0.028_369_709_333_863_7, 1.009_995_398_081_3, 0.021_041_441_191_917_3],
    [0.012_314_014_864_482, -0.020_507_649_298_899, 1.330_365_926_242_12],
];

const XYZ_D65_TO_LINEAR_SRGB: Matrix = [
    [3.240_969_941_904_52, -1.537_383_177_570_09, -0.498_610_760_293_003],
    [-0.969_243_636_280_88, 1.875_967_501_507_72, 0.041_555_057_407_175_6],
    [0.055_630_079_696_993_7, -0.203_976_958_888_977, 1.056_971_514_242_88],
];

const LINEAR_P3_TO_XYZ_D65: Matrix = [
    [0.486_570_948_648_216, 0.265_667_693_169_093, 0.198_217_285_234_362],
    [0.228_974_564_069_749, 0.691_738_521_836_506, 0.079_286_914_093_745],
    [0.0, 0.045_113_381_858_902_6, 1.043_944_368_900_98],
];

const LINEAR_A98_TO_XYZ_D65: Matrix = [
    [0.576_669_042_910_131, 0.185_558_237_906_546, 0.188_228_646_234_995],
    [0.297_344_975_250_536, 0.627_363_566_255_466, 0.075_291_458_493_997_9],
    [0.027_031_361_386_412_3, 0.070_688_852_535_827_2, 0.991_337_536_837_639],
];

const LINEAR_REC2020_TO_XYZ_D65: Matrix = [
    [0.636_958_048_301_291, 0.144_616_903_586_208, 0.168_880_975_164_172],
    [0.262_700_212_011_267, 0.677_998_071_518_871, 0.059_301_716_469_862],
    [0.0, 0.028_072_693_049_087_4, 1.060_985_057_710_79],
];

const LINEAR_PROPHOTO_TO_XYZ_D50: Matrix = [
    [0.797_760_489_672_303, 0.135_185_837_175_74, 0.031_349_349_581_524_8],
    [0.288_071_128_229_293, 0.711_843_217_810_101, 0.000_085_653_960_605_259],
    [0.0, 0.0, 0.825_104_602_510_46],
];

/// Apply `curve` to the magnitude, keeping the sign.
fn signed(value: f64, curve: impl Fn(f64) -> f64) -> f64 {
    curve(value.abs()).copysign(value)
}

fn srgb_encode(linear: f64) -> f64 {
    signed(linear, |v| {
        if v > 0.003_130_8 {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        } else {
            12.92 * v
        }
    })
}

fn srgb_decode(encoded: f64) -> f64 {
    signed(encoded, |v| {
        if v <= 0.040_45 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    })
}

fn encode_linear_srgb((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    (srgb_encode(r), srgb_encode(g), srgb_encode(b))
}

fn xyz_d65_to_srgb(xyz: (f64, f64, f64)) -> (f64, f64, f64) {
    encode_linear_srgb(multiply(&XYZ_D65_TO_LINEAR_SRGB, xyz))
}

fn xyz_d50_to_srgb(xyz: (f64, f64, f64)) -> (f64, f64, f64) {
    xyz_d65_to_srgb(multiply(&D50_TO_D65, xyz))
}

/// [§ 9.3 Lab to sRGB](https://www.w3.org/TR/css-color-4/#color-conversion-code)
///
/// CIE Lab relative to D50. Returns gamma-encoded sRGB channels, which may
/// fall outside `0.0..=1.0` for colors out of the sRGB gamut.
#[must_use]
#[allow(clippy::similar_names)]
pub fn lab_to_rgb(lightness: f64, a: f64, b: f64) -> (f64, f64, f64) {
    const KAPPA: f64 = 24_389.0 / 27.0;
    const EPSILON: f64 = 216.0 / 24_389.0;
    let f1 = (lightness + 16.0) / 116.0;
    let f0 = a / 500.0 + f1;
    let f2 = f1 - b / 200.0;
    let component = |value: f64| {
        let cubed = value.powi(3);
        if cubed > EPSILON {
            cubed
        } else {
            (116.0 * value - 16.0) / KAPPA
        }
    };
    let luminance = if lightness > KAPPA * EPSILON {
        f1.powi(3)
    } else {
        lightness / KAPPA
    };
    let xyz = (
        component(f0) * D50_WHITE.0,
        luminance * D50_WHITE.1,
        component(f2) * D50_WHITE.2,
    );
    xyz_d50_to_srgb(xyz)
}

/// Cartesian `(a, b)` for a polar chroma and hue in degrees.
#[must_use]
pub fn polar_to_ab(chroma: f64, hue: f64) -> (f64, f64) {
    let radians = hue.rem_euclid(360.0).to_radians();
    (chroma * radians.cos(), chroma * radians.sin())
}

/// [OKLab](https://bottosson.github.io/posts/oklab/) to gamma-encoded sRGB.
#[must_use]
pub fn oklab_to_rgb(lightness: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let long = (lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b).powi(3);
    let medium = (lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b).powi(3);
    let short = (lightness - 0.089_484_177_5 * a - 1.291_485_548 * b).powi(3);
    encode_linear_srgb((
        4.076_741_662_1 * long - 3.307_711_591_3 * medium + 0.230_969_929_2 * short,
        -1.268_438_004_6 * long + 2.609_757_401_1 * medium - 0.341_319_396_5 * short,
        -0.004_196_086_3 * long - 0.703_418_614_7 * medium + 1.707_614_701 * short,
    ))
}

/// True for the colorspaces `color()` accepts.
#[must_use]
pub fn is_predefined_colorspace(name: &str) -> bool {
    matches!(
        name,
        "srgb"
            | "srgb-linear"
            | "display-p3"
            | "a98-rgb"
            | "prophoto-rgb"
            | "rec2020"
            | "xyz"
            | "xyz-d50"
            | "xyz-d65"
    )
}

/// [§ 10 Predefined color spaces](https://www.w3.org/TR/css-color-4/#predefined)
///
/// Converts the three channels of `color(<space> ...)` to gamma-encoded
/// sRGB. `None` for an unknown colorspace.
#[must_use]
pub fn predefined_to_rgb(space: &str, channels: (f64, f64, f64)) -> Option<(f64, f64, f64)> {
    let each = |curve: fn(f64) -> f64| (curve(channels.0), curve(channels.1), curve(channels.2));
    let rgb = match space {
        "srgb" => channels,
        "srgb-linear" => encode_linear_srgb(channels),
        "display-p3" => xyz_d65_to_srgb(multiply(&LINEAR_P3_TO_XYZ_D65, each(srgb_decode))),
        "a98-rgb" => xyz_d65_to_srgb(multiply(
            &LINEAR_A98_TO_XYZ_D65,
            each(|v| signed(v, |v| v.powf(563.0 / 256.0))),
        )),
        "prophoto-rgb" => xyz_d50_to_srgb(multiply(
            &LINEAR_PROPHOTO_TO_XYZ_D50,
            each(|v| signed(v, |v| if v <= 16.0 / 512.0 { v / 16.0 } else { v.powf(1.8) })),
        )),
        "rec2020" => xyz_d65_to_srgb(multiply(
            &LINEAR_REC2020_TO_XYZ_D65,
            each(|v| {
                const ALPHA: f64 = 1.099_296_826_809_44;
                const BETA: f64 = 0.018_053_968_510_807;
                signed(v, |v| {
                    if v < BETA * 4.5 {
                        v / 4.5
                    } else {
                        ((v + ALPHA - 1.0) / ALPHA).powf(1.0 / 0.45)
                    }
                })
            }),
        )),
        "xyz" | "xyz-d65" => xyz_d65_to_srgb(channels),
        "xyz-d50" => xyz_d50_to_srgb(channels),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(ColorValue::from_hex("#f00"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(
            ColorValue::from_hex("f008"),
            Some(ColorValue::rgba(255, 0, 0, 0x88))
        );
        assert_eq!(ColorValue::from_hex("#12345678").map(|c| c.a), Some(0x78));
        assert_eq!(ColorValue::from_hex("#12345"), None);
        assert_eq!(ColorValue::from_hex("#gg0000"), None);
    }

    #[test]
    fn named_table_is_complete() {
        assert_eq!(NAMED_COLORS.len(), 148);
        assert_eq!(
            ColorValue::from_named("RebeccaPurple"),
            Some(ColorValue::rgb(0x66, 0x33, 0x99))
        );
        assert_eq!(ColorValue::from_named("transparent"), Some(ColorValue::TRANSPARENT));
    }

    #[test]
    fn alpha_uses_shortest_round_trip() {
        assert_eq!(ColorValue::rgba(255, 0, 0, 128).css_text(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(ColorValue::rgba(0, 0, 0, 0).css_text(), "rgba(0, 0, 0, 0)");
        assert_eq!(ColorValue::rgba(0, 0, 0, 1).css_text(), "rgba(0, 0, 0, 0.004)");
        assert_eq!(ColorValue::rgb(1, 2, 3).css_text(), "rgb(1, 2, 3)");
    }

    #[test]
    fn hsl_primary_hues() {
        let (r, g, b) = hsl_to_rgb(120.0, 1.0, 0.5);
        assert_eq!((unit_to_u8(r), unit_to_u8(g), unit_to_u8(b)), (0, 255, 0));
        let (r, g, b) = hwb_to_rgb(0.0, 0.6, 0.6);
        assert_eq!((unit_to_u8(r), unit_to_u8(g), unit_to_u8(b)), (128, 128, 128));
    }

    fn to_u8((r, g, b): (f64, f64, f64)) -> (u8, u8, u8) {
        (unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    #[test]
    fn lab_and_oklab_white_points() {
        assert_eq!(to_u8(lab_to_rgb(100.0, 0.0, 0.0)), (255, 255, 255));
        assert_eq!(to_u8(lab_to_rgb(50.0, 0.0, 0.0)), (119, 119, 119));
        assert_eq!(to_u8(oklab_to_rgb(1.0, 0.0, 0.0)), (255, 255, 255));
        assert_eq!(to_u8(oklab_to_rgb(0.0, 0.0, 0.0)), (0, 0, 0));
    }

    #[test]
    fn predefined_spaces() {
        let red = (1.0, 0.0, 0.0);
        assert_eq!(predefined_to_rgb("srgb", red).map(to_u8), Some((255, 0, 0)));
        assert_eq!(predefined_to_rgb("srgb-linear", red).map(to_u8), Some((255, 0, 0)));
        // Wider-gamut red clips to sRGB red.
        assert_eq!(predefined_to_rgb("display-p3", red).map(to_u8), Some((255, 0, 0)));
        assert_eq!(
            predefined_to_rgb("xyz-d65", (0.9505, 1.0, 1.089)).map(to_u8),
            Some((255, 255, 255))
        );
        assert!(predefined_to_rgb("cmyk", red).is_none());
    }
}
