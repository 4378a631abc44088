/*
 *  display/components/mod.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  One module per layer of the face
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

pub mod dial;
pub mod battery;
pub mod hands;
pub mod text;

pub use dial::draw_dial;
pub use battery::draw_battery;
pub use hands::draw_hands;
pub use text::{draw_condition, draw_temperature, draw_time};
