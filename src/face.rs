/*
 *  face.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	The face context: lifecycle and host callback entry points
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

use std::fmt::Debug;

use chrono::Timelike;
use log::{debug, error, info};

use crate::clock::{weather_refresh_due, ClockState, TickSubscription, TickUnit};
use crate::display::renderer::{BackgroundSource, FrameInputs, WatchFaceRenderer};
use crate::display::traits::{Canvas, DisplayCapabilities};
use crate::host::{TransportError, WatchHost};
use crate::ingest::{apply_message, IngestOutcome};
use crate::message::InboundMessage;
use crate::settings::SettingsState;
use crate::storage::BlobStore;
use crate::weather::{request_weather, WeatherReading};

/// All state the face owns. The shell holds one of these and forwards each
/// platform event to the matching `on_*` method, one at a time.
#[derive(Debug)]
pub struct WatchFace<S: BlobStore> {
    store: S,
    settings: SettingsState,
    weather: WeatherReading,
    clock: ClockState,
    ticks: TickSubscription,
    renderer: WatchFaceRenderer,
    battery_percent: u8,
    connected: bool,
}

impl<S: BlobStore> WatchFace<S> {
    /// Restore settings from `store`; defaults on first run.
    pub fn new(caps: DisplayCapabilities, store: S) -> Self {
        Self::with_renderer(WatchFaceRenderer::new(caps), store)
    }

    /// Same as `new`, capping the dial snapshot at `limit` bytes
    pub fn with_cache_limit(caps: DisplayCapabilities, store: S, limit: usize) -> Self {
        Self::with_renderer(WatchFaceRenderer::with_cache_limit(caps, limit), store)
    }

    fn with_renderer(renderer: WatchFaceRenderer, mut store: S) -> Self {
        let settings = SettingsState::load(&mut store);
        debug!("settings: {:?}", settings);
        Self {
            store,
            settings,
            weather: WeatherReading::new(),
            clock: ClockState::default(),
            ticks: TickSubscription::new(),
            renderer,
            battery_percent: 0,
            connected: false,
        }
    }

    /// Subscribe ticks, prime the state and ask for weather straight away.
    pub fn start<H, T>(&mut self, host: &mut H, now: &T, battery_percent: u8, connected: bool)
    where
        H: WatchHost,
        T: Timelike,
    {
        info!("Face starting ({}x{})", self.renderer.capabilities().width, self.renderer.capabilities().height);
        self.ticks.subscribe(host, TickUnit::for_second_hand(self.settings.second_hand_enabled));
        self.battery_percent = battery_percent;
        self.connected = connected;
        self.clock.update(now, host.clock_is_24h_style());
        request_weather(host, &self.settings, &mut self.weather);
        host.request_redraw();
    }

    pub fn stop<H: WatchHost>(&mut self, host: &mut H) {
        info!("Face stopping");
        self.ticks.cancel(host);
        self.renderer.release();
    }

    pub fn on_tick<H, T>(&mut self, host: &mut H, now: &T)
    where
        H: WatchHost,
        T: Timelike,
    {
        self.clock.update(now, host.clock_is_24h_style());
        if weather_refresh_due(&mut self.weather, self.clock.minutes, self.clock.seconds, self.connected) {
            request_weather(host, &self.settings, &mut self.weather);
        }
        host.request_redraw();
    }

    pub fn on_battery<H: WatchHost>(&mut self, host: &mut H, percent: u8) {
        if percent != self.battery_percent {
            debug!("battery {}% -> {}%", self.battery_percent, percent);
            self.battery_percent = percent;
            host.request_redraw();
        }
    }

    /// Buzz on disconnect; on reconnect, fetch unless the reading is fresh.
    pub fn on_connectivity<H: WatchHost>(&mut self, host: &mut H, connected: bool) {
        let was = self.connected;
        self.connected = connected;
        if was && !connected {
            info!("Phone disconnected");
            host.vibrate_double_pulse();
        } else if !was && connected {
            info!("Phone connected");
            if !self.weather.is_valid() {
                request_weather(host, &self.settings, &mut self.weather);
            }
        }
    }

    /// Merge an update from the phone and carry out what it implies.
    pub fn on_message<H: WatchHost>(&mut self, host: &mut H, msg: &InboundMessage) -> IngestOutcome {
        info!("Message received ({} keys)", msg.len());
        let outcome = apply_message(&mut self.settings, &mut self.weather, msg);
        if !outcome.changed() {
            debug!("nothing applied ({} ignored)", msg.ignored());
            return outcome;
        }

        if outcome.background_invalidated {
            self.renderer.invalidate_background();
        }
        if let Some(unit) = outcome.tick_unit_changed {
            self.ticks.subscribe(host, unit);
        }
        if outcome.fetch_requested {
            request_weather(host, &self.settings, &mut self.weather);
        }

        self.settings.save(&mut self.store);
        host.request_redraw();
        outcome
    }

    pub fn on_message_dropped(&mut self, reason: &TransportError) {
        error!("Message dropped: {}", reason);
    }

    pub fn on_outbox_failed(&mut self, reason: &TransportError) {
        error!("Outbox send failed: {}", reason);
    }

    pub fn on_outbox_sent(&mut self) {
        info!("Outbox send success");
    }

    /// Render the current state into `canvas`.
    pub fn draw<C>(&mut self, canvas: &mut C) -> BackgroundSource
    where
        C: Canvas,
        C::Error: Debug,
    {
        let inputs = FrameInputs {
            clock: &self.clock,
            settings: &self.settings,
            weather_status: self.weather.status(),
            battery_percent: self.battery_percent,
        };
        self.renderer.draw_frame(canvas, &inputs)
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn weather(&self) -> &WeatherReading {
        &self.weather
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn tick_unit(&self) -> Option<TickUnit> {
        self.ticks.active()
    }

    pub fn renderer(&self) -> &WatchFaceRenderer {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
