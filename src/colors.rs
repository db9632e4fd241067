//! Surface and background colors.
//!
//! Colors are RGBA8, matching the pixels of the rendered [`image::RgbaImage`].

use image::Rgba;

pub type Color = Rgba<u8>;

/// Pixels no ray reaches keep this value.
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const RED: Color = Rgba([255, 0, 0, 255]);
pub const GREEN: Color = Rgba([0, 255, 0, 255]);
pub const BLUE: Color = Rgba([0, 0, 255, 255]);

/// Default solid fill.
pub const FILL: Color = RED;
/// Default edge and corner highlight.
pub const EDGE: Color = BLACK;
