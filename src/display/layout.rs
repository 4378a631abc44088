/*
 *  display/layout.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed face layout derived from the screen bounds
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::traits::DisplayCapabilities;

/// Gap between the dial edge and the innermost hand, and between hands
pub const HAND_STEP: i32 = 5;

/// Battery arc stroke width
pub const BATTERY_ARC_WIDTH: u32 = 3;

/// Every position the face draws at, computed once per screen size.
///
/// The dial is a circle of two thirds the half-extent of the screen, hands
/// radiate outward from just beyond it and the three text bands sit
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceLayout {
    /// Full screen
    pub bounds: Rectangle,

    pub center: Point,

    /// Half the shorter screen side
    pub radius: i32,

    /// Radius of the painted dial circle, also where the battery arc runs
    pub dial_radius: i32,

    pub second_hand_radius: i32,
    pub minute_hand_radius: i32,
    pub hour_hand_radius: i32,

    /// Graduation ticks run between these two radii
    pub graduation_inner: i32,
    pub graduation_outer: i32,

    /// Time text, above the center
    pub time_band: Rectangle,

    /// Weather glyph, straddling the center
    pub glyph_band: Rectangle,

    /// Temperature text, below the center
    pub temperature_band: Rectangle,
}

impl FaceLayout {
    pub fn for_display(caps: &DisplayCapabilities) -> Self {
        let (w, h) = (caps.width as i32, caps.height as i32);
        let center = Point::new(w / 2, h / 2);
        let radius = w.min(h) / 2;
        let dial_radius = radius * 2 / 3;

        let band_left = center.x - dial_radius;
        let band_width = (dial_radius * 4 / 3).max(0) as u32;
        let half = radius / 2;

        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(caps.width, caps.height)),
            center,
            radius,
            dial_radius,
            second_hand_radius: dial_radius + HAND_STEP,
            minute_hand_radius: dial_radius + 2 * HAND_STEP,
            hour_hand_radius: dial_radius + 3 * HAND_STEP,
            graduation_inner: (dial_radius - 6).max(0),
            graduation_outer: (dial_radius - 2).max(0),
            time_band: Rectangle::new(
                Point::new(band_left, center.y - half - 5),
                Size::new(band_width, half.max(0) as u32),
            ),
            glyph_band: Rectangle::new(
                Point::new(band_left, center.y - 15),
                Size::new(band_width, half.max(0) as u32),
            ),
            temperature_band: Rectangle::new(
                Point::new(band_left, center.y + 15),
                Size::new(band_width, (half - 15).max(0) as u32),
            ),
        }
    }

    /// Diameter of the dial circle
    pub fn dial_diameter(&self) -> u32 {
        (self.dial_radius * 2).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_144x168() {
        let layout = FaceLayout::for_display(&DisplayCapabilities::rect(144, 168));
        assert_eq!(layout.center, Point::new(72, 84));
        assert_eq!(layout.radius, 72);
        assert_eq!(layout.dial_radius, 48);
        assert_eq!(layout.second_hand_radius, 53);
        assert_eq!(layout.hour_hand_radius, 63);
        assert_eq!(layout.time_band.top_left, Point::new(24, 43));
        assert_eq!(layout.time_band.size, Size::new(64, 36));
        assert_eq!(layout.temperature_band.size.height, 21);
    }

    #[test]
    fn test_layout_round_180() {
        let layout = FaceLayout::for_display(&DisplayCapabilities::round(180));
        assert_eq!(layout.center, Point::new(90, 90));
        assert_eq!(layout.dial_diameter(), 120);
        assert!(layout.graduation_inner < layout.graduation_outer);
    }
}
