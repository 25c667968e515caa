//!
//! # Layer Graphics
//!
//! How a [crate::Layer] is drawn: its color, its transparency plane,
//! and its 16x16 stipple pattern.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::utils::{enumstr, EnumStr};

/// Highest transparent-layer index. Index zero means "opaque".
pub const MAX_TRANSPARENT_LAYER: u8 = 12;

/// # RGB Color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

enumstr!(
    /// # Outline Styles
    ///
    /// Drawn around patterned areas.
    Outline {
        NoPattern: "None",
        Solid: "Solid",
        SolidThick: "Solid-Thick",
        SolidThicker: "Solid-Thicker",
        DottedClose: "Dotted-Close",
        DottedFar: "Dotted-Far",
        DashedShort: "Dashed-Short",
        DashedLong: "Dashed-Long",
        DottedDashedShort: "Dotted-Dashed-Short",
        DottedDashedLong: "Dotted-Dashed-Long",
        DottedCloseThick: "Dotted-Close-Thick",
        DottedFarThick: "Dotted-Far-Thick",
        DashedThick: "Dashed-Thick",
        DottedCloseThicker: "Dotted-Close-Thicker",
        DottedFarThicker: "Dotted-Far-Thicker",
    }
);
impl Outline {
    /// Bit-pattern along the outline. Low `len` bits are significant.
    pub fn pattern(&self) -> u32 {
        use Outline::*;
        match self {
            NoPattern => 0,
            Solid | SolidThick | SolidThicker => u32::MAX,
            DottedClose => 0x55,
            DottedFar => 0x11,
            DashedShort => 0x33,
            DashedLong => 0xF,
            DottedDashedShort => 0x39,
            DottedDashedLong => 0xF3,
            DottedCloseThick => 0xF,
            DottedFarThick => 0xF,
            DashedThick => 0x1FFFF,
            DottedCloseThicker => 0x1F,
            DottedFarThicker => 0x7F,
        }
    }
    /// Length of the repeating pattern, in pixels
    pub fn len(&self) -> u32 {
        use Outline::*;
        match self {
            NoPattern | Solid | SolidThick | SolidThicker => 32,
            DashedLong | DottedCloseThick => 6,
            DottedDashedLong => 10,
            DashedThick => 19,
            DottedFarThicker => 9,
            _ => 8,
        }
    }
    /// Line thickness, in pixels
    pub fn thickness(&self) -> u32 {
        use Outline::*;
        match self {
            SolidThick | DottedCloseThick | DottedFarThick | DashedThick => 3,
            SolidThicker | DottedCloseThicker | DottedFarThicker => 5,
            _ => 1,
        }
    }
    /// Boolean indication of an unbroken line
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid | Self::SolidThick | Self::SolidThicker)
    }
}
impl Default for Outline {
    fn default() -> Self {
        Self::NoPattern
    }
}

/// # Stipple Pattern
///
/// Sixteen rows of sixteen pixels. Bit 15 of each row is its leftmost pixel.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stipple(pub [u16; 16]);
impl Stipple {
    pub const EMPTY: Stipple = Stipple([0; 16]);
    pub const SOLID: Stipple = Stipple([0xFFFF; 16]);

    /// Create from an eight-row pattern, repeated twice vertically
    pub fn tiled(rows: [u16; 8]) -> Self {
        let mut all = [0; 16];
        for (i, row) in all.iter_mut().enumerate() {
            *row = rows[i % 8];
        }
        Self(all)
    }
    /// Get row `i`, wrapping every sixteen rows
    pub fn row(&self, i: usize) -> u16 {
        self.0[i % 16]
    }
    /// Boolean indication of whether pixel (`x`, `y`) is set. Both wrap every sixteen.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.row(y) & (0x8000 >> (x % 16)) != 0
    }
    /// Boolean indication of whether no pixels are set
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|r| *r == 0)
    }
    /// Render as sixteen lines of `X` and space characters
    pub fn render(&self) -> String {
        let mut s = String::with_capacity(17 * 16);
        for y in 0..16 {
            for x in 0..16 {
                s.push(if self.is_set(x, y) { 'X' } else { ' ' });
            }
            s.push('\n');
        }
        s
    }
}

/// # Layer Graphics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphics {
    /// Whether the stipple pattern is used on displays. Solid fill if not.
    pub display_patterned: bool,
    /// Whether the stipple pattern is used on printers
    pub print_patterned: bool,
    /// Outline drawn around patterned areas
    pub outline: Outline,
    /// Transparent plane, `1..=12`. `None` for opaque layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_layer: Option<u8>,
    pub color: Color,
    /// Zero (invisible) through one (opaque)
    pub opacity: f64,
    /// Whether drawn in the foreground
    pub foreground: bool,
    pub pattern: Stipple,
}
impl Graphics {
    /// Opacity applied by the constructors
    pub const DEFAULT_OPACITY: f64 = 0.8;

    /// Create graphics drawn on transparent plane `transparent_layer`.
    /// Plane zero creates an opaque layer, drawn in `color`.
    pub fn new(transparent_layer: u8, color: Color, pattern: Stipple) -> Self {
        Self {
            display_patterned: false,
            print_patterned: false,
            outline: Outline::NoPattern,
            transparent_layer: if transparent_layer == 0 {
                None
            } else {
                Some(transparent_layer)
            },
            color,
            opacity: Self::DEFAULT_OPACITY,
            foreground: true,
            pattern,
        }
    }
    /// Create opaque graphics in `color`, with an empty pattern
    pub fn opaque(color: Color) -> Self {
        Self::new(0, color, Stipple::EMPTY)
    }
    /// Builder-style setter of the display and print patterning, and their outline
    pub fn patterned(mut self, display: bool, print: bool, outline: Outline) -> Self {
        self.display_patterned = display;
        self.print_patterned = print;
        self.outline = outline;
        self
    }
    /// Builder-style setter of opacity
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
    /// Builder-style setter of foreground-ness
    pub fn with_foreground(mut self, foreground: bool) -> Self {
        self.foreground = foreground;
        self
    }
    /// Boolean indication of whether we're drawn on a transparent plane
    pub fn is_transparent(&self) -> bool {
        self.transparent_layer.is_some()
    }
}
