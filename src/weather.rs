/*
 *  weather.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Weather reading lifecycle and the fetch request to the phone
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

use std::fmt::{self, Display};

use log::{error, info};

use crate::host::WatchHost;
use crate::message::OutboundMessage;
use crate::settings::{copy_truncated, SettingsState, TemperatureText};

/// Which remote source the phone should query.
///
/// Ids outside the known set are kept as-is and forwarded; the phone decides
/// what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherProvider {
    #[default]
    OpenWeatherMap,
    WeatherUnderground,
    Yahoo,
    Other(u8),
}

impl WeatherProvider {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => WeatherProvider::OpenWeatherMap,
            1 => WeatherProvider::WeatherUnderground,
            2 => WeatherProvider::Yahoo,
            n => WeatherProvider::Other(n),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            WeatherProvider::OpenWeatherMap => 0,
            WeatherProvider::WeatherUnderground => 1,
            WeatherProvider::Yahoo => 2,
            WeatherProvider::Other(n) => n,
        }
    }
}

impl Display for WeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherProvider::OpenWeatherMap => write!(f, "OpenWeatherMap"),
            WeatherProvider::WeatherUnderground => write!(f, "Weather Underground"),
            WeatherProvider::Yahoo => write!(f, "Yahoo"),
            WeatherProvider::Other(n) => write!(f, "provider #{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherStatus {
    /// Nothing trustworthy; a fetch is due
    #[default]
    Invalid,
    /// Request sent, waiting on the phone
    InProgress,
    /// Temperature and condition arrived together
    Valid,
}

/// Last raw values from the phone. Only the derived strings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherReading {
    temperature: Option<i32>,
    condition: Option<i32>,
    status: WeatherStatus,
}

impl WeatherReading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> WeatherStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status == WeatherStatus::Valid
    }

    /// Celsius
    pub fn temperature(&self) -> Option<i32> {
        self.temperature
    }

    pub fn condition(&self) -> Option<i32> {
        self.condition
    }

    pub fn invalidate(&mut self) {
        self.status = WeatherStatus::Invalid;
    }

    pub(crate) fn mark_in_progress(&mut self) {
        self.status = WeatherStatus::InProgress;
    }

    /// Both halves of a reading arrived in one message
    pub(crate) fn accept(&mut self, temperature: i32, condition: i32) {
        self.temperature = Some(temperature);
        self.condition = Some(condition);
        self.status = WeatherStatus::Valid;
    }
}

/// Render a Celsius reading in the configured unit, e.g. "20°C" or "68°F".
/// Fahrenheit uses integer arithmetic, truncating toward zero.
pub fn format_temperature(celsius: i32, metric_units: bool) -> TemperatureText {
    let text = if metric_units {
        format!("{}°C", celsius)
    } else {
        let fahrenheit = celsius as i64 * 9 / 5 + 32;
        format!("{}°F", fahrenheit)
    };
    let mut out = TemperatureText::new();
    copy_truncated(&mut out, &text);
    out
}

/// Ask the phone for fresh weather. Fire and forget: the answer, if any,
/// comes back later as an ordinary inbound message.
pub fn request_weather<H: WatchHost>(host: &mut H, settings: &SettingsState, reading: &mut WeatherReading) {
    info!("Update weather ({})", settings.weather_provider);
    let message = OutboundMessage::weather_request(settings);
    if let Err(e) = host.send_message(&message) {
        error!("Weather request not sent: {}", e);
    }
    reading.mark_in_progress();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    #[test]
    fn celsius_and_fahrenheit() {
        assert_eq!(format_temperature(20, true).as_str(), "20°C");
        assert_eq!(format_temperature(20, false).as_str(), "68°F");
        assert_eq!(format_temperature(-40, false).as_str(), "-40°F");
        assert_eq!(format_temperature(0, false).as_str(), "32°F");
        assert_eq!(format_temperature(-5, true).as_str(), "-5°C");
    }

    #[test]
    fn oversized_reading_is_truncated() {
        let text = format_temperature(i32::MIN, true);
        assert!(text.len() <= crate::settings::TEMPERATURE_TEXT_CAPACITY);
        assert!(text.starts_with("-214748"));
    }

    #[test]
    fn provider_ids() {
        for id in 0..=5u8 {
            assert_eq!(WeatherProvider::from_id(id).id(), id);
        }
        assert_eq!(WeatherProvider::from_id(2), WeatherProvider::Yahoo);
        assert_eq!(WeatherProvider::default().id(), 0);
    }

    #[test]
    fn reading_lifecycle() {
        let mut r = WeatherReading::new();
        assert_eq!(r.status(), WeatherStatus::Invalid);
        r.mark_in_progress();
        assert_eq!(r.status(), WeatherStatus::InProgress);
        r.accept(12, 800);
        assert!(r.is_valid());
        assert_eq!(r.temperature(), Some(12));
        r.invalidate();
        assert_eq!(r.status(), WeatherStatus::Invalid);
        // raw values survive invalidation for unit re-formatting
        assert_eq!(r.temperature(), Some(12));
    }

    #[test]
    fn request_sets_in_progress_even_if_send_fails() {
        let mut host = MockHost::new();
        host.state.fail_sends = true;
        let mut reading = WeatherReading::new();
        request_weather(&mut host, &SettingsState::default(), &mut reading);
        assert_eq!(reading.status(), WeatherStatus::InProgress);
        assert!(host.state.sent.is_empty());
        assert_eq!(host.state.send_attempts, 1);
    }
}
