/*
 *  display/components/text.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Time, temperature and condition glyph overlays
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

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::{style::TextBoxStyleBuilder, TextBox};

use crate::glyphs::{draw_glyph, glyph_for_symbol, GLYPH_SIZE};

/// Weather glyphs are drawn at twice the bitmap size
pub const GLYPH_SCALE: u32 = 2;

/// Centered single-band text; anything that does not fit is clipped.
fn draw_centered<D>(target: &mut D, text: &str, band: Rectangle, font: &MonoFont<'_>, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if text.is_empty() || band.size.width == 0 || band.size.height == 0 {
        return Ok(());
    }
    let text_style = MonoTextStyle::new(font, color);
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Middle)
        .build();
    TextBox::with_textbox_style(text, band, text_style, textbox_style).draw(target)?;
    Ok(())
}

pub fn draw_time<D>(target: &mut D, band: Rectangle, text: &str, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_centered(target, text, band, &FONT_10X20, color)
}

pub fn draw_temperature<D>(target: &mut D, band: Rectangle, text: &str, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_centered(target, text, band, &FONT_9X15, color)
}

/// Top-left corner that centers a scaled glyph in `band`
pub fn glyph_origin(band: Rectangle) -> Point {
    let side = (GLYPH_SIZE * GLYPH_SCALE) as i32;
    band.center() - Point::new(side / 2, side / 2)
}

/// Condition glyph: the cached text holds a single symbol character.
pub fn draw_condition<D>(target: &mut D, band: Rectangle, symbol_text: &str, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some(symbol) = symbol_text.chars().next() else {
        return Ok(());
    };
    draw_glyph(target, glyph_for_symbol(symbol), glyph_origin(band), GLYPH_SCALE, color)
}
