/*
 *  ingest.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Merge partial updates from the phone into the face settings
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

use log::{debug, info, warn};

use crate::clock::TickUnit;
use crate::display::color::Color;
use crate::message::{InboundMessage, MessageKey, TupleValue};
use crate::settings::{copy_truncated, ConditionText, SettingsState};
use crate::weather::{format_temperature, WeatherProvider, WeatherReading};
use crate::weather_glyph::WeatherGlyph;

/// What a merge changed, so the caller can carry out the side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Keys that were understood and applied
    pub applied: usize,
    pub background_invalidated: bool,
    /// New cadence when the second hand was toggled
    pub tick_unit_changed: Option<TickUnit>,
    pub fetch_requested: bool,
    pub weather_updated: bool,
    pub units_changed: bool,
}

impl IngestOutcome {
    /// Anything applied means persist and redraw
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Apply every recognized key in `msg`. Absent keys leave state untouched;
/// keys with values of the wrong shape are skipped with a warning.
pub fn apply_message(settings: &mut SettingsState, reading: &mut WeatherReading, msg: &InboundMessage) -> IngestOutcome {
    let mut out = IngestOutcome::default();

    if let Some(v) = msg.get(MessageKey::TemperatureUnits) {
        match v.as_flag() {
            Some(metric) => {
                out.applied += 1;
                if metric != settings.metric_units {
                    settings.metric_units = metric;
                    out.units_changed = true;
                    // re-render the held reading in the new unit
                    if let Some(t) = reading.temperature() {
                        settings.cached_temperature_text = format_temperature(t, metric);
                    }
                }
                debug!("metric units {}", metric);
            }
            None => warn!("TEMPERATURE_UNITS: unusable value {:?}", v),
        }
    }

    for (key, slot) in [
        (MessageKey::BackgroundColor, &mut settings.background_color),
        (MessageKey::ForegroundColor, &mut settings.foreground_color),
        (MessageKey::SecondaryForegroundColor, &mut settings.secondary_foreground_color),
    ] {
        if let Some(v) = msg.get(key) {
            match v.as_int() {
                Some(raw) => {
                    *slot = Color::from_wire(raw);
                    out.applied += 1;
                    out.background_invalidated = true;
                    debug!("{} = #{:06X}", key.name(), slot.hex());
                }
                None => warn!("{}: unusable value {:?}", key.name(), v),
            }
        }
    }

    if let Some(v) = msg.get(MessageKey::SecondsTick) {
        match v.as_flag() {
            Some(enabled) => {
                out.applied += 1;
                if enabled != settings.second_hand_enabled {
                    out.tick_unit_changed = Some(TickUnit::for_second_hand(enabled));
                }
                settings.second_hand_enabled = enabled;
            }
            None => warn!("SECONDS_TICK: unusable value {:?}", v),
        }
    }

    if let Some(v) = msg.get(MessageKey::WeatherProvider) {
        match v.as_int().and_then(|n| u8::try_from(n).ok()) {
            Some(id) => {
                out.applied += 1;
                let provider = WeatherProvider::from_id(id);
                if provider != settings.weather_provider {
                    info!("Weather provider {} -> {}", settings.weather_provider, provider);
                    settings.weather_provider = provider;
                    out.fetch_requested = true;
                }
            }
            None => warn!("WEATHER_PROVIDER: unusable value {:?}", v),
        }
    }

    if let Some(v) = msg.get(MessageKey::WeatherApiKey) {
        let text = match v {
            TupleValue::Str(s) => s.clone(),
            TupleValue::Int(n) => n.to_string(),
        };
        let before = settings.weather_api_key;
        if copy_truncated(&mut settings.weather_api_key, &text) {
            warn!("WEATHERAPI_KEY truncated to {} bytes", settings.weather_api_key.len());
        }
        out.applied += 1;
        if before != settings.weather_api_key {
            debug!("weather api key updated");
            out.fetch_requested = true;
        }
    }

    match (msg.get(MessageKey::Temperature), msg.get(MessageKey::Conditions)) {
        (Some(t), Some(c)) => match (t.as_int(), c.as_int()) {
            (Some(celsius), Some(code)) => {
                reading.accept(celsius, code);
                settings.cached_temperature_text = format_temperature(celsius, settings.metric_units);
                let mut glyph = ConditionText::new();
                glyph.push(WeatherGlyph::from_condition(code).symbol());
                settings.cached_condition_text = glyph;
                out.applied += 2;
                out.weather_updated = true;
                info!("Weather {} (code {})", settings.cached_temperature_text, code);
            }
            _ => warn!("weather pair ignored: {:?} / {:?}", t, c),
        },
        (Some(_), None) | (None, Some(_)) => {
            debug!("partial weather reading ignored");
        }
        (None, None) => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherStatus;

    fn fresh() -> (SettingsState, WeatherReading) {
        (SettingsState::default(), WeatherReading::new())
    }

    #[test]
    fn empty_message_changes_nothing() {
        let (mut s, mut r) = fresh();
        r.mark_in_progress();
        let before = (s.clone(), r);
        let out = apply_message(&mut s, &mut r, &InboundMessage::from_pairs([(77, TupleValue::Int(1))]));
        assert_eq!(out, IngestOutcome::default());
        assert!(!out.changed());
        assert_eq!((s, r), before);
    }

    #[test]
    fn colors_invalidate_background() {
        let (mut s, mut r) = fresh();
        let msg = InboundMessage::new().with(MessageKey::ForegroundColor, 0xFF0000);
        let out = apply_message(&mut s, &mut r, &msg);
        assert!(out.background_invalidated);
        assert_eq!(s.foreground_color, Color::from_hex(0xFF0000));
        assert_eq!(out.applied, 1);
    }

    #[test]
    fn same_color_still_invalidates() {
        let (mut s, mut r) = fresh();
        let msg = InboundMessage::new().with(MessageKey::BackgroundColor, 0);
        assert!(apply_message(&mut s, &mut r, &msg).background_invalidated);
    }

    #[test]
    fn weather_needs_both_halves() {
        let (mut s, mut r) = fresh();
        let out = apply_message(&mut s, &mut r, &InboundMessage::new().with(MessageKey::Temperature, 20));
        assert!(!out.weather_updated);
        assert_eq!(r.status(), WeatherStatus::Invalid);

        let msg = InboundMessage::new()
            .with(MessageKey::Temperature, 20)
            .with(MessageKey::Conditions, 800);
        let out = apply_message(&mut s, &mut r, &msg);
        assert!(out.weather_updated);
        assert!(r.is_valid());
        assert_eq!(s.cached_temperature_text.as_str(), "20°C");
        assert_eq!(s.cached_condition_text.as_str(), WeatherGlyph::Clear.symbol().to_string());
    }

    #[test]
    fn fahrenheit_and_units_switch() {
        let (mut s, mut r) = fresh();
        let msg = InboundMessage::new()
            .with(MessageKey::TemperatureUnits, "0")
            .with(MessageKey::Temperature, 20)
            .with(MessageKey::Conditions, 500);
        let out = apply_message(&mut s, &mut r, &msg);
        assert!(out.units_changed);
        assert_eq!(s.cached_temperature_text.as_str(), "68°F");

        let out = apply_message(&mut s, &mut r, &InboundMessage::new().with(MessageKey::TemperatureUnits, "1"));
        assert!(out.units_changed);
        assert_eq!(s.cached_temperature_text.as_str(), "20°C");
    }

    #[test]
    fn seconds_tick_reports_only_changes() {
        let (mut s, mut r) = fresh();
        let on = InboundMessage::new().with(MessageKey::SecondsTick, 1);
        assert_eq!(apply_message(&mut s, &mut r, &on).tick_unit_changed, None);

        let off = InboundMessage::new().with(MessageKey::SecondsTick, 0);
        assert_eq!(apply_message(&mut s, &mut r, &off).tick_unit_changed, Some(TickUnit::Minute));
        assert!(!s.second_hand_enabled);
        assert_eq!(apply_message(&mut s, &mut r, &on).tick_unit_changed, Some(TickUnit::Second));
    }

    #[test]
    fn provider_change_requests_fetch() {
        let (mut s, mut r) = fresh();
        let same = InboundMessage::new().with(MessageKey::WeatherProvider, "0");
        assert!(!apply_message(&mut s, &mut r, &same).fetch_requested);

        let yahoo = InboundMessage::new().with(MessageKey::WeatherProvider, "2");
        assert!(apply_message(&mut s, &mut r, &yahoo).fetch_requested);
        assert_eq!(s.weather_provider, WeatherProvider::Yahoo);

        let bogus = InboundMessage::new().with(MessageKey::WeatherProvider, "-3");
        let out = apply_message(&mut s, &mut r, &bogus);
        assert_eq!(out.applied, 0);
        assert_eq!(s.weather_provider, WeatherProvider::Yahoo);
    }

    #[test]
    fn api_key_truncates_and_fetches_on_change() {
        let (mut s, mut r) = fresh();
        let long = "k".repeat(50);
        let msg = InboundMessage::new()
            .with(MessageKey::WeatherApiKey, long.as_str())
            .with(MessageKey::WeatherProvider, "1");
        let out = apply_message(&mut s, &mut r, &msg);
        assert!(out.fetch_requested);
        assert_eq!(s.weather_api_key.len(), crate::settings::API_KEY_CAPACITY);

        let again = InboundMessage::new().with(MessageKey::WeatherApiKey, long.as_str());
        assert!(!apply_message(&mut s, &mut r, &again).fetch_requested);
    }

    #[test]
    fn unmapped_condition_is_blank() {
        let (mut s, mut r) = fresh();
        let msg = InboundMessage::new()
            .with(MessageKey::Temperature, -3)
            .with(MessageKey::Conditions, 999);
        apply_message(&mut s, &mut r, &msg);
        assert_eq!(s.cached_condition_text.as_str(), WeatherGlyph::Blank.symbol().to_string());
        assert_eq!(s.cached_temperature_text.as_str(), "-3°C");
    }
}
