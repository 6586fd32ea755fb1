//! Segment color slots and color space conversion helpers.
//!
//! WLED segments carry four color slots, each a `[r, g, b, w]` channel array.
//! [`Rgbw`] models one slot. The HSV helpers go through `palette` like the rest
//! of the color handling, so hue wheels and rainbow layouts can be written in
//! the more intuitive color space and land on the wire as 8-bit channels.

use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of color slots on a segment.
pub const COLOR_SLOTS: usize = 4;

/// A single 8-bit RGBW color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Creates a color with the white channel off.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0)
    }

    /// Converts a floating point `Srgb` (0.0-1.0 range) to 8-bit channels.
    ///
    /// Out of range components are clamped. The white channel is left off.
    pub fn from_srgb(color: Srgb) -> Self {
        let clamped = Srgb::new(
            color.red.clamp(0.0, 1.0),
            color.green.clamp(0.0, 1.0),
            color.blue.clamp(0.0, 1.0),
        );
        Self::from(clamped.into_format::<u8>())
    }

    /// Returns the channels in wire order.
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }
}

impl From<[u8; 4]> for Rgbw {
    fn from([r, g, b, w]: [u8; 4]) -> Self {
        Self::new(r, g, b, w)
    }
}

impl From<Rgbw> for [u8; 4] {
    fn from(color: Rgbw) -> Self {
        color.channels()
    }
}

impl From<Srgb<u8>> for Rgbw {
    fn from(color: Srgb<u8>) -> Self {
        Self::rgb(color.red, color.green, color.blue)
    }
}

impl From<Rgbw> for Value {
    fn from(color: Rgbw) -> Self {
        Value::Array(color.channels().iter().map(|&c| Value::from(c)).collect())
    }
}

pub const BLACK: Rgbw = Rgbw::new(0, 0, 0, 0);
pub const WHITE: Rgbw = Rgbw::new(0, 0, 0, 255);
pub const RED: Rgbw = Rgbw::rgb(255, 0, 0);
pub const GREEN: Rgbw = Rgbw::rgb(0, 255, 0);
pub const BLUE: Rgbw = Rgbw::rgb(0, 0, 255);

/// Color slots a fresh segment starts with: all black.
pub const DEFAULT_COLORS: [Rgbw; COLOR_SLOTS] = [BLACK; COLOR_SLOTS];

/// Encodes a full set of color slots as the `col` attribute value.
pub fn slots_to_value(colors: &[Rgbw; COLOR_SLOTS]) -> Value {
    Value::Array(colors.iter().map(|&c| Value::from(c)).collect())
}

/// Creates an RGBW color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Rgbw {
    let hsv = Hsv::new(hue, saturation, value);
    Rgbw::from_srgb(Srgb::from_color(hsv))
}

/// Creates an RGBW color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Rgbw {
    hsv(hue, 1.0, 1.0)
}
