/*
 *  glyphs.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	8x8 symbol font for the weather condition glyph
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

/// Glyph cell edge in font pixels
pub const GLYPH_SIZE: u32 = 8;

// one byte per row, MSB is the leftmost pixel
pub const GLYPH_NONE: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,];
pub const GLYPH_CLEAR: [u8; 8] = [0x18, 0x42, 0x3c, 0xbd, 0xbd, 0x3c, 0x42, 0x18,];
pub const GLYPH_PARTLY_CLOUDY: [u8; 8] = [0x20, 0xa8, 0x70, 0x2c, 0x1e, 0x7f, 0x7f, 0x00,];
pub const GLYPH_CLOUDY: [u8; 8] = [0x00, 0x0c, 0x3e, 0x7f, 0xff, 0xff, 0x7e, 0x00,];
pub const GLYPH_SNOW: [u8; 8] = [0x00, 0x54, 0x38, 0xfe, 0x38, 0x54, 0x00, 0x00,];
pub const GLYPH_LIGHT_RAIN: [u8; 8] = [0x1c, 0x3e, 0x7f, 0x7f, 0x00, 0x24, 0x00, 0x48,];
pub const GLYPH_HEAVY_RAIN: [u8; 8] = [0x1c, 0x3e, 0x7f, 0x7f, 0x00, 0x55, 0xaa, 0x55,];
pub const GLYPH_THUNDER: [u8; 8] = [0x1c, 0x3e, 0x7f, 0x7f, 0x18, 0x30, 0x18, 0x10,];
pub const GLYPH_HAZE: [u8; 8] = [0x00, 0xee, 0x00, 0x77, 0x00, 0xee, 0x00, 0x77,];

/// Look up the bitmap for a symbol-font character. Characters outside the
/// font render blank.
pub fn glyph_for_symbol(symbol: char) -> &'static [u8; 8] {
    match symbol {
        'N' => &GLYPH_CLEAR,
        'C' => &GLYPH_PARTLY_CLOUDY,
        'S' => &GLYPH_CLOUDY,
        'a' => &GLYPH_SNOW,
        'L' => &GLYPH_LIGHT_RAIN,
        'b' => &GLYPH_HEAVY_RAIN,
        'V' => &GLYPH_THUNDER,
        '!' => &GLYPH_HAZE,
        _ => &GLYPH_NONE,
    }
}

/// Draw a glyph with each font pixel blown up to `scale` x `scale`.
pub fn draw_glyph<D>(
    target: &mut D,
    glyph: &[u8; 8],
    top_left: Point,
    scale: u32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let style = PrimitiveStyle::with_fill(color);
    let step = scale as i32;
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE as i32 {
            if bits & (0x80 >> col) != 0 {
                Rectangle::new(
                    top_left + Point::new(col * step, row as i32 * step),
                    Size::new(scale, scale),
                )
                .into_styled(style)
                .draw(target)?;
            }
        }
    }
    Ok(())
}
