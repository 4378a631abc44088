/*
 *  settings.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Persisted face settings and cached weather strings
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

use arrayvec::ArrayString;
use log::{debug, error, warn};

use crate::display::color::Color;
use crate::storage::{BlobStore, StorageError};
use crate::weather::WeatherProvider;

/// Usable bytes for each bounded text field. Storage reserves one more
/// byte per field for the terminating nul.
pub const API_KEY_CAPACITY: usize = 31;
pub const TEMPERATURE_TEXT_CAPACITY: usize = 7;
pub const CONDITION_TEXT_CAPACITY: usize = 7;

pub type ApiKey = ArrayString<API_KEY_CAPACITY>;
pub type TemperatureText = ArrayString<TEMPERATURE_TEXT_CAPACITY>;
pub type ConditionText = ArrayString<CONDITION_TEXT_CAPACITY>;

const SETTINGS_MAGIC: u32 = 0x3144_4853; // "SHD1"
const SETTINGS_VERSION: u8 = 1;

const FLAG_SECOND_HAND: u8 = 1 << 0;
const FLAG_METRIC: u8 = 1 << 1;

/// Size of the persisted image
pub const SETTINGS_BLOB_LEN: usize = 4 + 1 + 3 * 4 + 1 + 1
    + (API_KEY_CAPACITY + 1)
    + (TEMPERATURE_TEXT_CAPACITY + 1)
    + (CONDITION_TEXT_CAPACITY + 1);

/// Replace `dst` with as much of `src` as fits, never splitting a
/// character. Returns true when something was cut.
pub fn copy_truncated<const N: usize>(dst: &mut ArrayString<N>, src: &str) -> bool {
    dst.clear();
    let mut end = src.len().min(N);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    dst.push_str(&src[..end]);
    end < src.len()
}

/// Everything the face remembers across restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub background_color: Color,
    pub foreground_color: Color,
    pub secondary_foreground_color: Color,

    /// Draw the second hand and tick every second
    pub second_hand_enabled: bool,

    /// Celsius when set, Fahrenheit otherwise
    pub metric_units: bool,

    pub weather_provider: WeatherProvider,
    pub weather_api_key: ApiKey,

    /// Last good weather, kept so the face shows something right after boot
    pub cached_temperature_text: TemperatureText,
    pub cached_condition_text: ConditionText,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            background_color: Color::BLACK,
            foreground_color: Color::WHITE,
            secondary_foreground_color: Color::LIGHT_GRAY,
            second_hand_enabled: true,
            metric_units: true,
            weather_provider: WeatherProvider::default(),
            weather_api_key: ApiKey::new(),
            cached_temperature_text: TemperatureText::new(),
            cached_condition_text: ConditionText::new(),
        }
    }
}

impl SettingsState {
    /// Read the stored blob, falling back to defaults when there is none
    /// or it cannot be decoded.
    pub fn load<S: BlobStore>(store: &mut S) -> Self {
        match store.load() {
            Ok(Some(blob)) => match Self::from_blob(&blob) {
                Ok(settings) => {
                    debug!("settings restored ({} bytes)", blob.len());
                    settings
                }
                Err(e) => {
                    warn!("Stored settings unreadable, using defaults: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                error!("Settings load failed, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Write the whole struct in one go. Failures are logged only.
    pub fn save<S: BlobStore>(&self, store: &mut S) {
        if let Err(e) = store.save(&self.to_blob()) {
            error!("Settings save failed: {}", e);
        }
    }

    pub fn to_blob(&self) -> [u8; SETTINGS_BLOB_LEN] {
        let mut out = [0u8; SETTINGS_BLOB_LEN];
        let mut w = BlobWriter { buf: &mut out, pos: 0 };

        w.put(&SETTINGS_MAGIC.to_le_bytes());
        w.put(&[SETTINGS_VERSION]);
        w.put(&self.background_color.hex().to_le_bytes());
        w.put(&self.foreground_color.hex().to_le_bytes());
        w.put(&self.secondary_foreground_color.hex().to_le_bytes());

        let mut flags = 0u8;
        if self.second_hand_enabled { flags |= FLAG_SECOND_HAND; }
        if self.metric_units { flags |= FLAG_METRIC; }
        w.put(&[flags, self.weather_provider.id()]);

        w.put_text(&self.weather_api_key);
        w.put_text(&self.cached_temperature_text);
        w.put_text(&self.cached_condition_text);
        out
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self, StorageError> {
        if blob.len() != SETTINGS_BLOB_LEN {
            return Err(StorageError::SizeMismatch { expected: SETTINGS_BLOB_LEN, actual: blob.len() });
        }
        let mut r = BlobReader { buf: blob, pos: 0 };

        let magic = r.u32();
        if magic != SETTINGS_MAGIC {
            return Err(StorageError::BadMagic(magic));
        }
        let version = r.u8();
        if version != SETTINGS_VERSION {
            return Err(StorageError::UnsupportedVersion(version));
        }

        let background_color = Color::from_hex(r.u32());
        let foreground_color = Color::from_hex(r.u32());
        let secondary_foreground_color = Color::from_hex(r.u32());
        let flags = r.u8();
        let weather_provider = WeatherProvider::from_id(r.u8());

        Ok(Self {
            background_color,
            foreground_color,
            secondary_foreground_color,
            second_hand_enabled: flags & FLAG_SECOND_HAND != 0,
            metric_units: flags & FLAG_METRIC != 0,
            weather_provider,
            weather_api_key: r.text("weather_api_key")?,
            cached_temperature_text: r.text("cached_temperature_text")?,
            cached_condition_text: r.text("cached_condition_text")?,
        })
    }
}

struct BlobWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl BlobWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// N text bytes, zero padded, plus the terminator slot
    fn put_text<const N: usize>(&mut self, text: &ArrayString<N>) {
        let field = &mut self.buf[self.pos..self.pos + N + 1];
        field[..text.len()].copy_from_slice(text.as_bytes());
        self.pos += N + 1;
    }
}

struct BlobReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl BlobReader<'_> {
    fn take(&mut self, n: usize) -> &[u8] {
        let s = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        s
    }

    fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    fn u32(&mut self) -> u32 {
        let b = self.take(4);
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    fn text<const N: usize>(&mut self, field: &'static str) -> Result<ArrayString<N>, StorageError> {
        let raw = self.take(N + 1);
        // the terminator slot is never part of the text
        let end = raw[..N].iter().position(|&b| b == 0).unwrap_or(N);
        let s = std::str::from_utf8(&raw[..end]).map_err(|_| StorageError::InvalidText(field))?;
        let mut out = ArrayString::new();
        copy_truncated(&mut out, s);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_match_first_run() {
        let s = SettingsState::default();
        assert_eq!(s.background_color, Color::BLACK);
        assert_eq!(s.foreground_color, Color::WHITE);
        assert_eq!(s.secondary_foreground_color, Color::LIGHT_GRAY);
        assert!(s.second_hand_enabled);
        assert!(s.metric_units);
        assert!(s.weather_api_key.is_empty());
        assert!(s.cached_temperature_text.is_empty());
    }

    #[test]
    fn truncation_respects_capacity_and_chars() {
        let mut key = ApiKey::new();
        assert!(copy_truncated(&mut key, &"k".repeat(40)));
        assert_eq!(key.len(), API_KEY_CAPACITY);

        let mut t = TemperatureText::new();
        // '°' is two bytes; "12345°" would need 7 bytes and fits exactly
        assert!(!copy_truncated(&mut t, "12345°"));
        // one more digit would split the degree sign, so it goes entirely
        assert!(copy_truncated(&mut t, "123456°"));
        assert_eq!(t.as_str(), "123456");
    }

    #[test]
    fn blob_restores_everything() {
        let mut s = SettingsState::default();
        s.background_color = Color::from_hex(0x0055AA);
        s.second_hand_enabled = false;
        s.metric_units = false;
        s.weather_provider = WeatherProvider::Yahoo;
        copy_truncated(&mut s.weather_api_key, "abc123");
        copy_truncated(&mut s.cached_temperature_text, "68°F");
        copy_truncated(&mut s.cached_condition_text, "N");

        let blob = s.to_blob();
        assert_eq!(blob.len(), SETTINGS_BLOB_LEN);
        assert_eq!(SettingsState::from_blob(&blob).unwrap(), s);
    }

    #[test]
    fn text_fields_are_terminated() {
        let mut s = SettingsState::default();
        copy_truncated(&mut s.weather_api_key, &"x".repeat(64));
        let blob = s.to_blob();
        // key field starts after header, colors, flags and provider
        let key_start = 4 + 1 + 12 + 2;
        assert_eq!(blob[key_start + API_KEY_CAPACITY], 0);
    }

    #[test]
    fn corrupt_blob_falls_back_to_defaults() {
        let mut bad = SettingsState::default().to_blob();
        bad[0] ^= 0xFF;
        assert!(matches!(SettingsState::from_blob(&bad), Err(StorageError::BadMagic(_))));

        let mut store = MemoryStore::with_blob(bad.to_vec());
        assert_eq!(SettingsState::load(&mut store), SettingsState::default());

        let mut short = MemoryStore::with_blob(vec![1, 2, 3]);
        assert_eq!(SettingsState::load(&mut short), SettingsState::default());
    }

    #[test]
    fn save_writes_whole_blob_once() {
        let mut store = MemoryStore::new();
        SettingsState::default().save(&mut store);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.blob().map(|b| b.len()), Some(SETTINGS_BLOB_LEN));
    }
}
