/*
 *  display/renderer.rs
 *
 *  Shards - analog watch face
 *  (c) 2020-26 Stuart Hunter
 *
 *  Frame pipeline: background, battery, hands, text
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

use std::fmt::Debug;

use log::{debug, warn};

use crate::clock::ClockState;
use crate::display::background::BackgroundCache;
use crate::display::components::{draw_battery, draw_condition, draw_dial, draw_hands, draw_temperature, draw_time};
use crate::display::layout::FaceLayout;
use crate::display::traits::{Canvas, DisplayCapabilities};
use crate::settings::SettingsState;
use crate::weather::WeatherStatus;

/// Everything a frame depends on besides the renderer's own cache
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub clock: &'a ClockState,
    pub settings: &'a SettingsState,
    pub weather_status: WeatherStatus,
    pub battery_percent: u8,
}

/// How the background layer of the last frame was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    /// Copied back from the snapshot
    Cached,
    /// Painted, then captured
    Rebuilt,
    /// Painted without a snapshot (round panel, or capture failed)
    Painted,
}

/// Owns the screen layout and the dial snapshot.
#[derive(Debug)]
pub struct WatchFaceRenderer {
    caps: DisplayCapabilities,
    layout: FaceLayout,
    cache: BackgroundCache,
}

impl WatchFaceRenderer {
    pub fn new(caps: DisplayCapabilities) -> Self {
        Self::with_cache(caps, BackgroundCache::new())
    }

    /// Renderer whose snapshot may not exceed `limit` bytes
    pub fn with_cache_limit(caps: DisplayCapabilities, limit: usize) -> Self {
        Self::with_cache(caps, BackgroundCache::with_limit(limit))
    }

    fn with_cache(caps: DisplayCapabilities, cache: BackgroundCache) -> Self {
        Self { layout: FaceLayout::for_display(&caps), caps, cache }
    }

    pub fn capabilities(&self) -> &DisplayCapabilities {
        &self.caps
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    pub fn cache(&self) -> &BackgroundCache {
        &self.cache
    }

    /// Color settings changed: the snapshot no longer matches.
    pub fn invalidate_background(&mut self) {
        self.cache.invalidate();
    }

    /// Free the snapshot at shutdown
    pub fn release(&mut self) {
        self.cache.invalidate();
    }

    /// Draw one complete frame. Never fails: a layer that cannot be drawn
    /// is logged and skipped.
    pub fn draw_frame<C>(&mut self, canvas: &mut C, inputs: &FrameInputs<'_>) -> BackgroundSource
    where
        C: Canvas,
        C::Error: Debug,
    {
        let settings = inputs.settings;
        let source = self.draw_background(canvas, settings);

        let secondary = settings.secondary_foreground_color.to_rgb();
        let foreground = settings.foreground_color.to_rgb();

        if let Err(e) = draw_battery(canvas, &self.layout, inputs.battery_percent, secondary) {
            debug!("battery layer: {:?}", e);
        }
        if let Err(e) = draw_hands(canvas, &self.layout, inputs.clock, settings.second_hand_enabled, foreground) {
            debug!("hands layer: {:?}", e);
        }
        if let Err(e) = draw_time(canvas, self.layout.time_band, &inputs.clock.text, foreground) {
            debug!("time text: {:?}", e);
        }

        // stale weather is shown muted until a fresh reading lands
        let temperature_color = if inputs.weather_status == WeatherStatus::Valid { foreground } else { secondary };
        if let Err(e) = draw_temperature(canvas, self.layout.temperature_band, &settings.cached_temperature_text, temperature_color) {
            debug!("temperature text: {:?}", e);
        }
        if let Err(e) = draw_condition(canvas, self.layout.glyph_band, &settings.cached_condition_text, foreground) {
            debug!("condition glyph: {:?}", e);
        }
        source
    }

    fn draw_background<C>(&mut self, canvas: &mut C, settings: &SettingsState) -> BackgroundSource
    where
        C: Canvas,
        C::Error: Debug,
    {
        if self.cache.is_valid() {
            match self.cache.restore(canvas) {
                Ok(()) => return BackgroundSource::Cached,
                Err(e) => {
                    warn!("{}; repainting dial", e);
                    self.cache.invalidate();
                }
            }
        }

        if let Err(e) = draw_dial(canvas, &self.layout, settings.background_color.to_rgb()) {
            debug!("dial layer: {:?}", e);
        }

        // the round dial is the screen itself, a snapshot buys nothing
        if self.caps.is_round() {
            return BackgroundSource::Painted;
        }

        match self.cache.capture(canvas) {
            Ok(()) => BackgroundSource::Rebuilt,
            Err(e) => {
                warn!("{}; dial will be repainted every frame", e);
                BackgroundSource::Painted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::color::Color;
    use crate::vframebuf::VarFrameBuf;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;

    fn inputs<'a>(clock: &'a ClockState, settings: &'a SettingsState) -> FrameInputs<'a> {
        FrameInputs { clock, settings, weather_status: WeatherStatus::Invalid, battery_percent: 80 }
    }

    #[test]
    fn first_frame_rebuilds_then_hits() {
        let caps = DisplayCapabilities::rect(144, 168);
        let mut r = WatchFaceRenderer::new(caps);
        let mut fb = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        let (clock, settings) = (ClockState::default(), SettingsState::default());

        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Rebuilt);
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Cached);
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Cached);
        assert_eq!(r.cache().stats().rebuilds, 1);
        assert_eq!(r.cache().stats().hits, 2);
        assert_eq!(r.cache().size(), 144 * 3 * 168);
    }

    #[test]
    fn invalidate_forces_one_rebuild() {
        let mut r = WatchFaceRenderer::new(DisplayCapabilities::rect(144, 168));
        let mut fb = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        let clock = ClockState::default();
        let mut settings = SettingsState::default();
        r.draw_frame(&mut fb, &inputs(&clock, &settings));

        settings.background_color = Color::from_hex(0x0000FF);
        r.invalidate_background();
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Rebuilt);
        assert_eq!(fb.pixel(Point::new(0, 0)), Some(Rgb888::BLUE));
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Cached);
        assert_eq!(r.cache().stats().rebuilds, 2);
    }

    #[test]
    fn round_panel_never_caches() {
        let mut r = WatchFaceRenderer::new(DisplayCapabilities::round(180));
        let mut fb = VarFrameBuf::new(180, 180, Rgb888::BLACK);
        let (clock, settings) = (ClockState::default(), SettingsState::default());
        for _ in 0..3 {
            assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Painted);
        }
        assert!(!r.cache().is_valid());
    }

    #[test]
    fn allocation_failure_degrades_to_repaint() {
        let mut r = WatchFaceRenderer::with_cache_limit(DisplayCapabilities::rect(144, 168), 1024);
        let mut fb = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        let (clock, settings) = (ClockState::default(), SettingsState::default());
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Painted);
        assert_eq!(r.draw_frame(&mut fb, &inputs(&clock, &settings)), BackgroundSource::Painted);
        assert_eq!(r.cache().size(), 0);
    }

    #[test]
    fn snapshot_excludes_overlays() {
        let mut r = WatchFaceRenderer::new(DisplayCapabilities::rect(144, 168));
        let mut fb = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        let clock = ClockState { minutes: 15, ..Default::default() };
        let settings = SettingsState::default();
        r.draw_frame(&mut fb, &inputs(&clock, &settings));

        // minute hand at 3 o'clock this frame, gone after it moves
        let probe = r.layout().center + Point::new(r.layout().minute_hand_radius + 4, 0);
        assert_eq!(fb.pixel(probe), Some(Rgb888::WHITE));
        let later = ClockState { minutes: 45, ..Default::default() };
        r.draw_frame(&mut fb, &inputs(&later, &settings));
        assert_eq!(fb.pixel(probe), Some(Rgb888::BLACK));
    }

    #[test]
    fn muted_temperature_until_valid() {
        let mut r = WatchFaceRenderer::new(DisplayCapabilities::rect(144, 168));
        let clock = ClockState::default();
        let mut settings = SettingsState::default();
        settings.foreground_color = Color::from_hex(0x00FFFF);
        crate::settings::copy_truncated(&mut settings.cached_temperature_text, "20°C");
        let band = r.layout().temperature_band;
        let count = |fb: &VarFrameBuf<Rgb888>, c: Rgb888| {
            band.points().filter(|p| fb.pixel(*p) == Some(c)).count()
        };

        let mut stale = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        r.draw_frame(&mut stale, &inputs(&clock, &settings));
        let grey = Color::LIGHT_GRAY.to_rgb();
        assert!(count(&stale, grey) > 0);

        let mut fresh = VarFrameBuf::new(144, 168, Rgb888::BLACK);
        let valid = FrameInputs { weather_status: WeatherStatus::Valid, ..inputs(&clock, &settings) };
        r.draw_frame(&mut fresh, &valid);
        assert!(count(&fresh, Rgb888::CYAN) > count(&stale, Rgb888::CYAN));
    }
}
