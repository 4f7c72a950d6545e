// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The playback progress indicator.
//!
//! Tracks the duration and position the controller publishes
//! ([`Event::SongRange`] / [`Event::SongProgress`]) and renders them as an
//! elapsed/remaining gauge. Seek keys publish [`Event::SongReprogress`]
//! back towards the controller.

use crossterm::event::{KeyCode, KeyEvent};

use crate::bus::{Event, EventBus, EventKind, Mailbox};

/// How far one seek keypress jumps, in milliseconds.
const SEEK_STEP_MS: u64 = 5_000;

pub(crate) struct ProgressBar {
    bus: EventBus,
    mailbox: Mailbox,
    pub(crate) duration_ms: u64,
    pub(crate) position_ms: u64,
}

impl ProgressBar {
    pub(crate) fn new(bus: EventBus) -> Self {
        let mailbox = bus.register();
        bus.subscribe(
            mailbox.id(),
            &[EventKind::SongRange, EventKind::SongProgress],
        );

        Self {
            bus,
            mailbox,
            duration_ms: 0,
            position_ms: 0,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if self.duration_ms == 0 {
            return;
        }
        match key.code {
            KeyCode::Left => {
                let target = self.position_ms.saturating_sub(SEEK_STEP_MS);
                self.bus.publish(Event::SongReprogress(target));
            }
            KeyCode::Right => {
                let target = (self.position_ms + SEEK_STEP_MS).min(self.duration_ms);
                self.bus.publish(Event::SongReprogress(target));
            }
            _ => {}
        }
    }

    pub(crate) fn pump(&mut self) {
        while let Some(event) = self.mailbox.try_recv() {
            match event {
                // A new song: reset the gauge to its full range.
                Event::SongRange(duration_ms) => {
                    self.duration_ms = duration_ms;
                    self.position_ms = 0;
                }
                Event::SongProgress(position_ms) => {
                    self.position_ms = position_ms.min(self.duration_ms);
                }
                _ => {}
            }
        }
    }

    /// Completed fraction of the current song, `0.0..=1.0`.
    pub(crate) fn ratio(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            self.position_ms as f64 / self.duration_ms as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drain(mailbox: &Mailbox) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = mailbox.try_recv() {
            events.push(event);
        }
        events
    }

    fn fixture() -> (EventBus, ProgressBar) {
        let bus = EventBus::new();
        (bus.clone(), ProgressBar::new(bus))
    }

    #[test]
    fn range_resets_the_gauge() {
        let (bus, mut progress) = fixture();
        bus.publish(Event::SongProgress(5_000));
        bus.publish(Event::SongRange(60_000));
        progress.pump();

        assert_eq!(progress.duration_ms, 60_000);
        assert_eq!(progress.position_ms, 0);
    }

    #[test]
    fn progress_moves_the_gauge() {
        let (bus, mut progress) = fixture();
        bus.publish(Event::SongRange(60_000));
        bus.publish(Event::SongProgress(15_000));
        progress.pump();

        assert!((progress.ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn seek_keys_publish_clamped_requests() {
        let (bus, mut progress) = fixture();
        let observer = bus.register();
        bus.subscribe(observer.id(), &[EventKind::SongReprogress]);

        bus.publish(Event::SongRange(10_000));
        bus.publish(Event::SongProgress(8_000));
        progress.pump();

        progress.handle_key(key(KeyCode::Right));
        progress.handle_key(key(KeyCode::Left));

        assert_eq!(
            drain(&observer),
            vec![Event::SongReprogress(10_000), Event::SongReprogress(3_000)]
        );
    }

    #[test]
    fn seek_is_inert_without_a_song() {
        let (bus, mut progress) = fixture();
        let observer = bus.register();
        bus.subscribe(observer.id(), &[EventKind::SongReprogress]);

        progress.handle_key(key(KeyCode::Right));

        assert!(drain(&observer).is_empty());
    }
}
