/*
 *  host.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Services the watch platform provides to the face
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

use thiserror::Error;

use crate::clock::TickUnit;
use crate::message::OutboundMessage;

/// Outbox failures as the platform reports them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("phone not connected")]
    NotConnected,
    #[error("outbox busy")]
    Busy,
    #[error("outbox buffer overflow")]
    BufferOverflow,
    #[error("send timed out")]
    Timeout,
    #[error("transport closed")]
    Closed,
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Platform services the face calls out to.
///
/// Everything here is synchronous from the face's point of view; results of
/// a send arrive later through the outbox callbacks.
pub trait WatchHost {
    /// Replace any current tick subscription with one at `unit`
    fn subscribe_ticks(&mut self, unit: TickUnit);

    fn unsubscribe_ticks(&mut self);

    /// Queue one outbound message
    fn send_message(&mut self, message: &OutboundMessage) -> Result<(), TransportError>;

    /// Ask for a draw pass at the next opportunity
    fn request_redraw(&mut self);

    fn vibrate_double_pulse(&mut self);

    /// User preference for 24-hour time
    fn clock_is_24h_style(&self) -> bool;
}

/// Recorded host interactions, inspected by tests
#[derive(Debug, Default, Clone)]
pub struct MockHostState {
    pub subscribe_calls: usize,
    pub unsubscribe_calls: usize,
    pub current_unit: Option<TickUnit>,
    pub sent: Vec<OutboundMessage>,
    pub send_attempts: usize,
    pub redraws: usize,
    pub vibrations: usize,
    /// Make every send fail with `Busy`
    pub fail_sends: bool,
    pub clock_24h: bool,
}

/// Host that records calls instead of talking to hardware.
#[derive(Debug, Default, Clone)]
pub struct MockHost {
    pub state: MockHostState,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_24h_clock(mut self) -> Self {
        self.state.clock_24h = true;
        self
    }

    /// Forget recorded traffic, keeping configuration and subscription
    pub fn reset_counters(&mut self) {
        let s = &mut self.state;
        s.subscribe_calls = 0;
        s.unsubscribe_calls = 0;
        s.sent.clear();
        s.send_attempts = 0;
        s.redraws = 0;
        s.vibrations = 0;
    }
}

impl WatchHost for MockHost {
    fn subscribe_ticks(&mut self, unit: TickUnit) {
        self.state.subscribe_calls += 1;
        self.state.current_unit = Some(unit);
    }

    fn unsubscribe_ticks(&mut self) {
        self.state.unsubscribe_calls += 1;
        self.state.current_unit = None;
    }

    fn send_message(&mut self, message: &OutboundMessage) -> Result<(), TransportError> {
        self.state.send_attempts += 1;
        if self.state.fail_sends {
            return Err(TransportError::Busy);
        }
        self.state.sent.push(message.clone());
        Ok(())
    }

    fn request_redraw(&mut self) {
        self.state.redraws += 1;
    }

    fn vibrate_double_pulse(&mut self) {
        self.state.vibrations += 1;
    }

    fn clock_is_24h_style(&self) -> bool {
        self.state.clock_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsState;

    #[test]
    fn mock_records_traffic() {
        let mut host = MockHost::new();
        host.subscribe_ticks(TickUnit::Second);
        host.unsubscribe_ticks();
        host.request_redraw();
        host.vibrate_double_pulse();
        let msg = OutboundMessage::weather_request(&SettingsState::default());
        assert!(host.send_message(&msg).is_ok());

        assert_eq!(host.state.subscribe_calls, 1);
        assert_eq!(host.state.unsubscribe_calls, 1);
        assert_eq!(host.state.current_unit, None);
        assert_eq!(host.state.sent, vec![msg]);
        assert_eq!(host.state.redraws, 1);
        assert_eq!(host.state.vibrations, 1);

        host.reset_counters();
        assert_eq!(host.state.send_attempts, 0);
    }

    #[test]
    fn failing_sends() {
        let mut host = MockHost::new();
        host.state.fail_sends = true;
        let msg = OutboundMessage::weather_request(&SettingsState::default());
        assert_eq!(host.send_message(&msg), Err(TransportError::Busy));
        assert!(host.state.sent.is_empty());
        assert!(!host.clock_is_24h_style());
        assert!(MockHost::new().with_24h_clock().clock_is_24h_style());
    }
}
