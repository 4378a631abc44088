/*
 *  display/components/hands.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Hour, minute and second hands
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
use embedded_graphics::primitives::{PrimitiveStyle, Triangle};

use crate::clock::ClockState;
use crate::display::color::accent;
use crate::display::layout::FaceLayout;
use crate::trig::{
    hand_quad, hour_angle, minute_angle, second_angle,
    HOUR_HAND_MARGIN_DEG, MINUTE_HAND_MARGIN_DEG, SECOND_HAND_MARGIN_DEG,
};

/// Fill one shard-shaped hand. The quad is split along its 0-2 diagonal.
pub fn draw_hand<D>(
    target: &mut D,
    center: Point,
    radius: i32,
    angle_deg: i32,
    margin_deg: i32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let [a, b, c, d] = hand_quad(center, radius, angle_deg, margin_deg);
    let style = PrimitiveStyle::with_fill(color);
    Triangle::new(a, b, c).into_styled(style).draw(target)?;
    Triangle::new(a, c, d).into_styled(style).draw(target)
}

/// Second hand (when enabled) goes down first so the others sit on top.
pub fn draw_hands<D>(
    target: &mut D,
    layout: &FaceLayout,
    clock: &ClockState,
    show_seconds: bool,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if show_seconds {
        draw_hand(
            target,
            layout.center,
            layout.second_hand_radius,
            second_angle(clock.seconds),
            SECOND_HAND_MARGIN_DEG,
            accent::SECOND_HAND.to_rgb(),
        )?;
    }
    draw_hand(target, layout.center, layout.minute_hand_radius, minute_angle(clock.minutes), MINUTE_HAND_MARGIN_DEG, color)?;
    draw_hand(target, layout.center, layout.hour_hand_radius, hour_angle(clock.hours), HOUR_HAND_MARGIN_DEG, color)
}
