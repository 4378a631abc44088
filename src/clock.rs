/*
 *  clock.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Clock state, tick cadence and the weather refresh policy
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

use std::fmt::Write;

use arrayvec::ArrayString;
use chrono::Timelike;
use log::debug;

use crate::host::WatchHost;
use crate::weather::{WeatherReading, WeatherStatus};

pub const TIME_TEXT_CAPACITY: usize = 7;
pub type TimeText = ArrayString<TIME_TEXT_CAPACITY>;

/// Weather is forced stale whenever the minute is a multiple of this.
pub const WEATHER_INVALIDATE_MINUTES: u32 = 30;
/// While a request is outstanding, re-send when the second is a multiple of this.
pub const WEATHER_RETRY_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Minute,
    Second,
}

impl TickUnit {
    pub fn for_second_hand(enabled: bool) -> Self {
        if enabled { TickUnit::Second } else { TickUnit::Minute }
    }
}

/// Time fields as of the last tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockState {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub text: TimeText,
}

impl ClockState {
    pub fn from_time<T: Timelike>(now: &T, clock_24h: bool) -> Self {
        let mut state = Self::default();
        state.update(now, clock_24h);
        state
    }

    /// Recompute from any chrono time value ("%H:%M" or "%I:%M").
    pub fn update<T: Timelike>(&mut self, now: &T, clock_24h: bool) {
        self.hours = now.hour();
        self.minutes = now.minute();
        self.seconds = now.second();

        let shown_hour = if clock_24h { now.hour() } else { now.hour12().1 };
        self.text.clear();
        // "HH:MM" always fits
        let _ = write!(self.text, "{:02}:{:02}", shown_hour, self.minutes);
    }
}

/// Which cadence the face is subscribed at. Changing cadence always goes
/// through here so the host sees exactly one unsubscribe/subscribe pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSubscription {
    active: Option<TickUnit>,
}

impl TickSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<TickUnit> {
        self.active
    }

    /// Returns true when the host subscription actually changed.
    pub fn subscribe<H: WatchHost>(&mut self, host: &mut H, unit: TickUnit) -> bool {
        if self.active == Some(unit) {
            return false;
        }
        if self.active.is_some() {
            host.unsubscribe_ticks();
        }
        host.subscribe_ticks(unit);
        debug!("tick cadence now {:?}", unit);
        self.active = Some(unit);
        true
    }

    pub fn cancel<H: WatchHost>(&mut self, host: &mut H) {
        if self.active.take().is_some() {
            host.unsubscribe_ticks();
        }
    }
}

/// Apply the per-tick refresh policy and say whether a fetch should go out.
///
/// On the half hour the reading is dropped to Invalid. With the phone
/// reachable, an Invalid reading fetches straight away and an InProgress one
/// re-sends on every thirtieth second. Note the half hour rule fires on every
/// tick of that minute, so with second ticks a Valid reading is knocked back
/// and re-fetched repeatedly until the minute rolls over.
pub fn weather_refresh_due(reading: &mut WeatherReading, minutes: u32, seconds: u32, connected: bool) -> bool {
    if minutes % WEATHER_INVALIDATE_MINUTES == 0 {
        reading.invalidate();
    }
    if !connected {
        return false;
    }
    match reading.status() {
        WeatherStatus::Invalid => true,
        WeatherStatus::InProgress => seconds % WEATHER_RETRY_SECONDS == 0,
        WeatherStatus::Valid => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn time_text_24h_and_12h() {
        let c = ClockState::from_time(&at(15, 7, 42), true);
        assert_eq!((c.hours, c.minutes, c.seconds), (15, 7, 42));
        assert_eq!(c.text.as_str(), "15:07");

        let c = ClockState::from_time(&at(15, 7, 42), false);
        assert_eq!(c.text.as_str(), "03:07");
        assert_eq!(c.hours, 15);

        let c = ClockState::from_time(&at(0, 5, 0), false);
        assert_eq!(c.text.as_str(), "12:05");
    }

    #[test]
    fn unit_for_second_hand() {
        assert_eq!(TickUnit::for_second_hand(true), TickUnit::Second);
        assert_eq!(TickUnit::for_second_hand(false), TickUnit::Minute);
    }

    #[test]
    fn resubscribe_once_per_change() {
        let mut host = MockHost::new();
        let mut sub = TickSubscription::new();

        assert!(sub.subscribe(&mut host, TickUnit::Minute));
        assert_eq!(host.state.subscribe_calls, 1);
        assert_eq!(host.state.unsubscribe_calls, 0);

        assert!(!sub.subscribe(&mut host, TickUnit::Minute));
        assert_eq!(host.state.subscribe_calls, 1);

        assert!(sub.subscribe(&mut host, TickUnit::Second));
        assert_eq!(host.state.subscribe_calls, 2);
        assert_eq!(host.state.unsubscribe_calls, 1);
        assert_eq!(host.state.current_unit, Some(TickUnit::Second));

        sub.cancel(&mut host);
        sub.cancel(&mut host);
        assert_eq!(host.state.unsubscribe_calls, 2);
        assert_eq!(sub.active(), None);
    }

    #[test]
    fn half_hour_invalidates_any_status() {
        let mut r = WeatherReading::new();
        r.accept(10, 800);
        assert!(!weather_refresh_due(&mut r, 29, 0, true));
        assert!(r.is_valid());

        // disconnected: still invalidated, but nothing sent
        assert!(!weather_refresh_due(&mut r, 30, 5, false));
        assert_eq!(r.status(), WeatherStatus::Invalid);

        r.accept(10, 800);
        assert!(weather_refresh_due(&mut r, 0, 5, true));
    }

    #[test]
    fn in_progress_retries_on_thirty_seconds() {
        let mut r = WeatherReading::new();
        r.mark_in_progress();
        assert!(!weather_refresh_due(&mut r, 12, 29, true));
        assert!(weather_refresh_due(&mut r, 12, 30, true));
        assert!(weather_refresh_due(&mut r, 12, 0, true));
        assert!(!weather_refresh_due(&mut r, 12, 0, false));
    }
}
