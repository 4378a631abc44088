/*
 *  message.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Key/value wire contract with the phone companion
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

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::settings::{ApiKey, SettingsState};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message is not a key/value object")]
    NotAnObject,
}

/// Field ids shared with the phone side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    Temperature = 0,
    Conditions = 1,
    BackgroundColor = 2,
    ForegroundColor = 3,
    SecondaryForegroundColor = 4,
    SecondsTick = 5,
    TemperatureUnits = 6,
    WeatherProvider = 7,
    WeatherApiKey = 8,
}

impl MessageKey {
    pub const ALL: [MessageKey; 9] = [
        MessageKey::Temperature,
        MessageKey::Conditions,
        MessageKey::BackgroundColor,
        MessageKey::ForegroundColor,
        MessageKey::SecondaryForegroundColor,
        MessageKey::SecondsTick,
        MessageKey::TemperatureUnits,
        MessageKey::WeatherProvider,
        MessageKey::WeatherApiKey,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.id() == id)
    }

    /// Name used by the companion's message-key table
    pub fn name(self) -> &'static str {
        match self {
            MessageKey::Temperature => "TEMPERATURE",
            MessageKey::Conditions => "CONDITIONS",
            MessageKey::BackgroundColor => "BACKGROUND_COLOR",
            MessageKey::ForegroundColor => "FOREGROUND_COLOR",
            MessageKey::SecondaryForegroundColor => "SECONDARY_FOREGROUND_COLOR",
            MessageKey::SecondsTick => "SECONDS_TICK",
            MessageKey::TemperatureUnits => "TEMPERATURE_UNITS",
            MessageKey::WeatherProvider => "WEATHER_PROVIDER",
            MessageKey::WeatherApiKey => "WEATHERAPI_KEY",
        }
    }

    /// Accepts the key name or its numeric id
    pub fn parse(key: &str) -> Option<Self> {
        if let Ok(id) = key.parse::<u32>() {
            return Self::from_id(id);
        }
        Self::ALL.iter().copied().find(|k| k.name() == key)
    }
}

/// One value in a message: the transport only carries integers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TupleValue {
    Int(i32),
    Str(String),
}

impl TupleValue {
    /// Integers as-is, strings when they hold a decimal integer
    pub fn as_int(&self) -> Option<i32> {
        match self {
            TupleValue::Int(n) => Some(*n),
            TupleValue::Str(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TupleValue::Str(s) => Some(s),
            TupleValue::Int(_) => None,
        }
    }

    /// 1 / "1" / "true" are on; any other recognizable value is off
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            TupleValue::Int(n) => Some(*n == 1),
            TupleValue::Str(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) => Some(n == 1),
                    Err(_) if s.eq_ignore_ascii_case("true") => Some(true),
                    Err(_) if s.eq_ignore_ascii_case("false") => Some(false),
                    Err(_) => None,
                }
            }
        }
    }
}

impl From<i32> for TupleValue {
    fn from(n: i32) -> Self {
        TupleValue::Int(n)
    }
}

impl From<&str> for TupleValue {
    fn from(s: &str) -> Self {
        TupleValue::Str(s.to_string())
    }
}

/// An inbound update from the phone. Any subset of keys may be present;
/// keys the face does not know are dropped at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    tuples: BTreeMap<MessageKey, TupleValue>,
    ignored: usize,
}

impl InboundMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: MessageKey, value: impl Into<TupleValue>) -> Self {
        self.tuples.insert(key, value.into());
        self
    }

    /// Build from raw (field id, value) pairs as a transport delivers them
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, TupleValue)>,
    {
        let mut msg = Self::new();
        for (id, value) in pairs {
            match MessageKey::from_id(id) {
                Some(key) => { msg.tuples.insert(key, value); }
                None => msg.ignored += 1,
            }
        }
        msg
    }

    /// Decode a JSON object such as `{"TEMPERATURE": 20, "CONDITIONS": 800}`.
    /// Keys may be names or numeric ids; booleans become 0/1.
    pub fn from_json(text: &str) -> Result<Self, MessageError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(map) = value else {
            return Err(MessageError::NotAnObject);
        };

        let mut msg = Self::new();
        for (name, raw) in map {
            let Some(key) = MessageKey::parse(&name) else {
                debug!("ignoring unknown key {}", name);
                msg.ignored += 1;
                continue;
            };
            let value = match raw {
                Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()).map(TupleValue::Int),
                Value::String(s) => Some(TupleValue::Str(s)),
                Value::Bool(b) => Some(TupleValue::Int(b as i32)),
                _ => None,
            };
            match value {
                Some(v) => { msg.tuples.insert(key, v); }
                None => {
                    debug!("ignoring {} with unusable value", name);
                    msg.ignored += 1;
                }
            }
        }
        Ok(msg)
    }

    pub fn get(&self, key: MessageKey) -> Option<&TupleValue> {
        self.tuples.get(&key)
    }

    pub fn contains(&self, key: MessageKey) -> bool {
        self.tuples.contains_key(&key)
    }

    /// Recognized keys present
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Keys dropped while decoding
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

/// The one message the face sends: a weather request naming the provider
/// and, when the user set one, their API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub provider: u8,
    pub api_key: Option<ApiKey>,
}

impl OutboundMessage {
    pub fn weather_request(settings: &SettingsState) -> Self {
        Self {
            provider: settings.weather_provider.id(),
            api_key: (!settings.weather_api_key.is_empty()).then_some(settings.weather_api_key),
        }
    }

    pub fn tuples(&self) -> Vec<(MessageKey, TupleValue)> {
        let mut out = vec![(MessageKey::WeatherProvider, TupleValue::Int(self.provider as i32))];
        if let Some(key) = &self.api_key {
            out.push((MessageKey::WeatherApiKey, TupleValue::Str(key.to_string())));
        }
        out
    }

    pub fn to_json(&self) -> Result<String, MessageError> {
        let mut map = Map::new();
        for (key, value) in self.tuples() {
            map.insert(key.name().to_string(), serde_json::to_value(value)?);
        }
        Ok(serde_json::to_string(&Value::Object(map))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::copy_truncated;

    #[test]
    fn keys_by_name_and_id() {
        for key in MessageKey::ALL {
            assert_eq!(MessageKey::from_id(key.id()), Some(key));
            assert_eq!(MessageKey::parse(key.name()), Some(key));
        }
        assert_eq!(MessageKey::parse("7"), Some(MessageKey::WeatherProvider));
        assert_eq!(MessageKey::parse("NOPE"), None);
        assert_eq!(MessageKey::from_id(99), None);
    }

    #[test]
    fn flags_and_ints() {
        assert_eq!(TupleValue::from("1").as_flag(), Some(true));
        assert_eq!(TupleValue::from("0").as_flag(), Some(false));
        assert_eq!(TupleValue::Int(1).as_flag(), Some(true));
        assert_eq!(TupleValue::Int(2).as_flag(), Some(false));
        assert_eq!(TupleValue::from("maybe").as_flag(), None);
        assert_eq!(TupleValue::from(" 2 ").as_int(), Some(2));
        assert_eq!(TupleValue::from("x").as_int(), None);
    }

    #[test]
    fn json_decode_skips_unknown() {
        let msg = InboundMessage::from_json(
            r#"{"TEMPERATURE": 20, "CONDITIONS": 800, "BOGUS": 1, "SECONDS_TICK": true, "3": 16777215}"#,
        ).unwrap();
        assert_eq!(msg.len(), 4);
        assert_eq!(msg.ignored(), 1);
        assert_eq!(msg.get(MessageKey::Temperature), Some(&TupleValue::Int(20)));
        assert_eq!(msg.get(MessageKey::SecondsTick), Some(&TupleValue::Int(1)));
        assert_eq!(msg.get(MessageKey::ForegroundColor), Some(&TupleValue::Int(0xFFFFFF)));
    }

    #[test]
    fn json_must_be_object() {
        assert!(matches!(InboundMessage::from_json("[1,2]"), Err(MessageError::NotAnObject)));
        assert!(matches!(InboundMessage::from_json("{"), Err(MessageError::Json(_))));
    }

    #[test]
    fn pairs_decode() {
        let msg = InboundMessage::from_pairs([(0, TupleValue::Int(5)), (42, TupleValue::Int(1))]);
        assert_eq!(msg.len(), 1);
        assert_eq!(msg.ignored(), 1);
    }

    #[test]
    fn outbound_omits_empty_key() {
        let mut settings = SettingsState::default();
        let msg = OutboundMessage::weather_request(&settings);
        assert_eq!(msg.tuples().len(), 1);
        assert_eq!(msg.to_json().unwrap(), r#"{"WEATHER_PROVIDER":0}"#);

        copy_truncated(&mut settings.weather_api_key, "secret");
        let msg = OutboundMessage::weather_request(&settings);
        assert_eq!(msg.tuples().len(), 2);
        let json: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(json["WEATHERAPI_KEY"], "secret");
    }
}
