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

//! Common utilities.
//!
//! Display formatting for playback times and the OSC escape sequences used
//! to manage the terminal emulator's background color. The OSC codes (11 to
//! set, 111 to reset) are supported by the common modern emulators.

use std::io::{self, Write};

/// Formats a millisecond count as a `MM:SS` clock string.
///
/// Used for the elapsed/remaining labels around the progress gauge.
pub(crate) fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Sets the terminal background color to the given hex string via OSC 11.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    print!("\x1b]11;{}\x07", hex_color);
    let _ = io::stdout().flush();
}

/// Reverts the terminal background to the user's configuration via OSC 111.
///
/// Called during cleanup so the user's terminal is left as it was found.
pub(crate) fn reset_terminal_bg() {
    print!("\x1b]111\x07");
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65_000), "01:05");
        assert_eq!(format_clock(65_999), "01:05");
        assert_eq!(format_clock(3_600_000), "60:00");
    }
}
