/*
 *  display/color.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed RGB settings colors and the fixed accent palette
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

/// A user-selected color as it travels over the wire and into storage:
/// 0xRRGGBB in the low 24 bits.
///
/// The panel only has 2 bits per channel, so conversion to a drawable
/// color snaps each channel onto the 64-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const LIGHT_GRAY: Color = Color(0xAAAAAA);
    pub const DARK_GRAY: Color = Color(0x555555);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);

    /// Anything above 24 bits is dropped.
    pub const fn from_hex(hex: u32) -> Self {
        Color(hex & 0x00FF_FFFF)
    }

    /// Wire integers are signed; reinterpret the bits.
    pub const fn from_wire(value: i32) -> Self {
        Self::from_hex(value as u32)
    }

    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Snap to the 64-color palette
    pub fn to_rgb(self) -> Rgb888 {
        let quantize = |shift: u32| -> u8 { (((self.0 >> shift) & 0xFF) as u8 >> 6) * 85 };
        Rgb888::new(quantize(16), quantize(8), quantize(0))
    }
}

/// Colors that do not follow user settings
pub mod accent {
    use super::Color;

    pub const DIAL_BORDER: Color = Color::RED;
    pub const BATTERY_ARC: Color = Color::GREEN;
    pub const SECOND_HAND: Color = Color::RED;
    pub const LOW_BATTERY_MARK: Color = Color::RED;
}
