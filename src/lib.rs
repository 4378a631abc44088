/*
 *  lib.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Core of the face: rendering, settings sync and the tick driver.
 *	The surrounding shell owns the event loop and implements `WatchHost`.
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

pub mod trig;
pub mod vframebuf;
pub mod display;
pub mod glyphs;
pub mod weather_glyph;
pub mod settings;
pub mod storage;
pub mod message;
pub mod weather;
pub mod clock;
pub mod ingest;
pub mod host;
pub mod face;
pub mod config;

pub use face::WatchFace;
pub use host::{MockHost, TransportError, WatchHost};
pub use message::{InboundMessage, MessageKey, OutboundMessage, TupleValue};
pub use settings::SettingsState;
pub use storage::{BlobStore, FileStore, MemoryStore};
pub use weather::{WeatherProvider, WeatherStatus};
