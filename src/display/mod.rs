/*
 *  display/mod.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem: canvas, dial snapshot and frame pipeline
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// Screen geometry
pub mod layout;

// Dial snapshot
pub mod background;

// Per-layer drawing
pub mod components;

// Frame pipeline
pub mod renderer;

// Re-exports for convenience
pub use traits::{Canvas, DisplayCapabilities, DisplayShape};
pub use error::DisplayError;
pub use color::Color;
pub use layout::FaceLayout;
pub use background::{BackgroundCache, CacheStats};
pub use renderer::{BackgroundSource, FrameInputs, WatchFaceRenderer};
