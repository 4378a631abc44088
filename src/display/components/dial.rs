/*
 *  display/components/dial.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Static dial: base fill and bordered circle
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
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder};

use crate::display::color::accent;
use crate::display::layout::FaceLayout;

/// Paint the whole background layer. This is what the snapshot holds.
pub fn draw_dial<D>(target: &mut D, layout: &FaceLayout, background: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.fill_solid(&layout.bounds, background)?;

    let style = PrimitiveStyleBuilder::new()
        .fill_color(background)
        .stroke_color(accent::DIAL_BORDER.to_rgb())
        .stroke_width(1)
        .build();

    Circle::with_center(layout.center, layout.dial_diameter())
        .into_styled(style)
        .draw(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::traits::DisplayCapabilities;
    use crate::vframebuf::VarFrameBuf;

    #[test]
    fn border_is_red_inside_is_background() {
        let layout = FaceLayout::for_display(&DisplayCapabilities::rect(144, 168));
        let mut fb = VarFrameBuf::new(144, 168, Rgb888::WHITE);
        draw_dial(&mut fb, &layout, Rgb888::BLACK).unwrap();

        assert_eq!(fb.pixel(Point::new(0, 0)), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(layout.center), Some(Rgb888::BLACK));

        // somewhere on the rim straight above center
        let rim = (layout.center.y - layout.dial_radius - 1..=layout.center.y - layout.dial_radius + 1)
            .any(|y| fb.pixel(Point::new(layout.center.x, y)) == Some(Rgb888::RED));
        assert!(rim);
    }
}
