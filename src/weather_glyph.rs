/*
 *  weather_glyph.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Condition code to display glyph
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

/// One glyph per meteorological category. Codes follow the
/// OpenWeatherMap condition taxonomy (2xx thunder, 5xx rain, 6xx snow,
/// 7xx atmosphere, 800 clear, 80x clouds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGlyph {
    Clear,
    PartlyCloudy,
    Cloudy,
    Snow,
    LightRain,
    HeavyRain,
    Thunderstorm,
    Haze,
    Blank,
}

impl WeatherGlyph {
    pub fn from_condition(code: i32) -> Self {
        match code {
            800 => WeatherGlyph::Clear,
            801 => WeatherGlyph::PartlyCloudy,
            802..=804 => WeatherGlyph::Cloudy,
            600 | 601 | 602 | 611 | 612 | 615 | 616 | 620 | 621 | 622 => WeatherGlyph::Snow,
            500..=504 => WeatherGlyph::LightRain,
            511 | 520 | 521 | 522 | 531 => WeatherGlyph::HeavyRain,
            200 | 201 | 202 | 210 | 211 | 212 | 221 | 230 | 231 | 232 => WeatherGlyph::Thunderstorm,
            701 | 711 | 721 | 731 | 741 | 751 | 761 | 762 | 771 | 781 => WeatherGlyph::Haze,
            _ => WeatherGlyph::Blank,
        }
    }

    /// Character in the symbol font
    pub fn symbol(self) -> char {
        match self {
            WeatherGlyph::Clear => 'N',
            WeatherGlyph::PartlyCloudy => 'C',
            WeatherGlyph::Cloudy => 'S',
            WeatherGlyph::Snow => 'a',
            WeatherGlyph::LightRain => 'L',
            WeatherGlyph::HeavyRain => 'b',
            WeatherGlyph::Thunderstorm => 'V',
            WeatherGlyph::Haze => '!',
            WeatherGlyph::Blank => ' ',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_lookup() {
        assert_eq!(WeatherGlyph::from_condition(800), WeatherGlyph::Clear);
        assert_eq!(WeatherGlyph::from_condition(500), WeatherGlyph::LightRain);
        assert_eq!(WeatherGlyph::from_condition(200), WeatherGlyph::Thunderstorm);
        assert_eq!(WeatherGlyph::from_condition(622), WeatherGlyph::Snow);
        assert_eq!(WeatherGlyph::from_condition(531), WeatherGlyph::HeavyRain);
        assert_eq!(WeatherGlyph::from_condition(781), WeatherGlyph::Haze);
        assert_eq!(WeatherGlyph::from_condition(803), WeatherGlyph::Cloudy);
    }

    #[test]
    fn unmapped_is_blank() {
        assert_eq!(WeatherGlyph::from_condition(999), WeatherGlyph::Blank);
        assert_eq!(WeatherGlyph::from_condition(505), WeatherGlyph::Blank);
        assert_eq!(WeatherGlyph::from_condition(-1), WeatherGlyph::Blank);
        assert_eq!(WeatherGlyph::from_condition(999).symbol(), ' ');
    }
}
