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

//! Icon glyphs used across the interface.

pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";

// Text-style variant (Variation Selector-15) so terminals render the glyph
// as monochrome text rather than an emoji.
pub(crate) const ICON_MUTED: &str = "\u{1F507}\u{FE0E}";

pub(crate) const ICON_NOW_PLAYING: &str = "\u{266A}";

pub(crate) const CHECK_CHECKED: &str = "[x]";
pub(crate) const CHECK_PARTIAL: &str = "[~]";
pub(crate) const CHECK_EMPTY: &str = "[ ]";
