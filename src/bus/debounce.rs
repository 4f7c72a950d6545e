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

//! Single-shot, reset-on-change debounce timer.
//!
//! The tree components fire their selection events through a [`Debouncer`]
//! so rapid navigation does not rebuild the file tables on every keypress.
//! Each change *restarts* the countdown; the timer fires once the input has
//! settled for the full delay. The debouncer is polled from the owning
//! component's processing turn — it never runs on another thread.

use std::time::{Duration, Instant};

/// The settle time used by the tree components.
pub(crate) const TREE_DEBOUNCE: Duration = Duration::from_millis(500);

pub(crate) struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restarts the countdown. Called on every input change.
    pub(crate) fn touch(&mut self) {
        self.touch_at(Instant::now());
    }

    pub(crate) fn touch_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` exactly once when the countdown has settled.
    pub(crate) fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn does_not_fire_before_the_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.touch_at(start);

        assert!(!debouncer.fire_at(start + Duration::from_millis(499)));
    }

    #[test]
    fn fires_once_after_the_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.touch_at(start);

        assert!(debouncer.fire_at(start + DELAY));
        assert!(!debouncer.fire_at(start + DELAY * 2));
    }

    #[test]
    fn each_touch_restarts_the_countdown() {
        // Three changes in quick succession must yield a single firing, timed
        // from the last change.
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.touch_at(start);
        debouncer.touch_at(start + Duration::from_millis(200));
        debouncer.touch_at(start + Duration::from_millis(400));

        assert!(!debouncer.fire_at(start + Duration::from_millis(700)));
        assert!(debouncer.fire_at(start + Duration::from_millis(900)));
        assert!(!debouncer.fire_at(start + Duration::from_millis(1400)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(DELAY);
        assert!(!debouncer.fire_at(Instant::now() + DELAY));
    }
}
