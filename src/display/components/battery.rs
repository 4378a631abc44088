/*
 *  display/components/battery.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Battery arc and graduation marks
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

use embedded_graphics::geometry::Angle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Line, PrimitiveStyle};

use crate::display::color::accent;
use crate::display::layout::{FaceLayout, BATTERY_ARC_WIDTH};
use crate::trig::{battery_sweep_deg, graduation_angles, graduation_mark};

/// Graduation stroke width
const GRADUATION_WIDTH: u32 = 2;

/// Arc angles in embedded-graphics start at 3 o'clock; the watch reads from 12.
const ARC_START_DEG: f32 = -90.0;

/// Mark color: highlighted once the battery sweep no longer reaches it.
pub fn graduation_color(angle_deg: i32, sweep_deg: i32, normal: Rgb888) -> Rgb888 {
    if angle_deg >= sweep_deg { accent::LOW_BATTERY_MARK.to_rgb() } else { normal }
}

pub fn draw_battery<D>(target: &mut D, layout: &FaceLayout, percent: u8, mark_color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let sweep = battery_sweep_deg(percent);

    if sweep > 0 {
        Arc::with_center(
            layout.center,
            layout.dial_diameter(),
            Angle::from_degrees(ARC_START_DEG),
            Angle::from_degrees(sweep as f32),
        )
        .into_styled(PrimitiveStyle::with_stroke(accent::BATTERY_ARC.to_rgb(), BATTERY_ARC_WIDTH))
        .draw(target)?;
    }

    for angle in graduation_angles() {
        let (inner, outer) = graduation_mark(layout.center, angle, layout.graduation_inner, layout.graduation_outer);
        Line::new(inner, outer)
            .into_styled(PrimitiveStyle::with_stroke(graduation_color(angle, sweep, mark_color), GRADUATION_WIDTH))
            .draw(target)?;
    }
    Ok(())
}
