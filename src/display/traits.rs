/*
 *  display/traits.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canvas abstraction and display capabilities
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
use serde::{Deserialize, Serialize};

/// Raster bytes per pixel for the RGB canvas.
pub const BYTES_PER_PIXEL: usize = 3;

/// Physical outline of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayShape {
    /// Rectangular panel, the dial is inset
    #[default]
    Rect,

    /// Round panel, the dial is the screen
    Round,
}

/// Display capabilities and metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    pub shape: DisplayShape,
}

impl DisplayCapabilities {
    pub const fn rect(width: u32, height: u32) -> Self {
        Self { width, height, shape: DisplayShape::Rect }
    }

    pub const fn round(diameter: u32) -> Self {
        Self { width: diameter, height: diameter, shape: DisplayShape::Round }
    }

    pub fn is_round(&self) -> bool {
        self.shape == DisplayShape::Round
    }
}

/// What the host hands the face each frame: something to draw on, plus
/// direct access to the pixels behind it so the dial can be captured and
/// copied back wholesale.
///
/// The raster is row-major, `row_stride()` bytes per row.
pub trait Canvas: DrawTarget<Color = Rgb888> + OriginDimensions {
    fn row_stride(&self) -> usize;

    fn raster(&self) -> &[Rgb888];

    fn raster_mut(&mut self) -> &mut [Rgb888];

    /// Bytes covered by a full-screen capture
    fn capture_size(&self) -> usize {
        self.row_stride() * self.size().height as usize
    }
}
