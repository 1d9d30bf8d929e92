//! Per-frame controller and touch snapshots.

use bitflags::bitflags;

use crate::geometry::{Vec2, Vec4};

bitflags! {
    /// Controller buttons, laid out like the console's npad button word.
    ///
    /// A value may hold several buttons; the `ANY_*` masks match any of
    /// their members. Ordering follows the raw bits, which is the order in
    /// which a [`crate::Widget`] walks its bindings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Button: u64 {
        const A          = 1;
        const B          = 1 << 1;
        const X          = 1 << 2;
        const Y          = 1 << 3;
        const L3         = 1 << 4;
        const R3         = 1 << 5;
        const L          = 1 << 6;
        const R          = 1 << 7;
        const L2         = 1 << 8;
        const R2         = 1 << 9;
        const START      = 1 << 10;
        const SELECT     = 1 << 11;
        const DPAD_LEFT  = 1 << 12;
        const DPAD_UP    = 1 << 13;
        const DPAD_RIGHT = 1 << 14;
        const DPAD_DOWN  = 1 << 15;
        const LS_LEFT    = 1 << 16;
        const LS_UP      = 1 << 17;
        const LS_RIGHT   = 1 << 18;
        const LS_DOWN    = 1 << 19;
        const RS_LEFT    = 1 << 20;
        const RS_UP      = 1 << 21;
        const RS_RIGHT   = 1 << 22;
        const RS_DOWN    = 1 << 23;

        const ANY_LEFT   = Self::DPAD_LEFT.bits() | Self::LS_LEFT.bits() | Self::RS_LEFT.bits();
        const ANY_RIGHT  = Self::DPAD_RIGHT.bits() | Self::LS_RIGHT.bits() | Self::RS_RIGHT.bits();
        const ANY_UP     = Self::DPAD_UP.bits() | Self::LS_UP.bits() | Self::RS_UP.bits();
        const ANY_DOWN   = Self::DPAD_DOWN.bits() | Self::LS_DOWN.bits() | Self::RS_DOWN.bits();
        const ANY_HORIZONTAL = Self::ANY_LEFT.bits() | Self::ANY_RIGHT.bits();
        const ANY_VERTICAL   = Self::ANY_UP.bits() | Self::ANY_DOWN.bits();
        const ANY_DIRECTION  = Self::ANY_HORIZONTAL.bits() | Self::ANY_VERTICAL.bits();
        /// Buttons whose press plays the focus sound. Directions are left out,
        /// list scrolling plays its own sound.
        const ANY_BUTTON = Self::A.bits() | Self::B.bits() | Self::X.bits() | Self::Y.bits()
                         | Self::L.bits() | Self::R.bits() | Self::L2.bits() | Self::R2.bits()
                         | Self::L3.bits() | Self::R3.bits()
                         | Self::START.bits() | Self::SELECT.bits();
    }
}

/// Glyphs from the system font's private-use area, one per physical button.
const GLYPHS: &[(Button, &str)] = &[
    (Button::A, "\u{E0E0}"),
    (Button::B, "\u{E0E1}"),
    (Button::X, "\u{E0E2}"),
    (Button::Y, "\u{E0E3}"),
    (Button::L3, "\u{E104}"),
    (Button::R3, "\u{E105}"),
    (Button::L, "\u{E0E4}"),
    (Button::R, "\u{E0E5}"),
    (Button::L2, "\u{E0E6}"),
    (Button::R2, "\u{E0E7}"),
    (Button::START, "\u{E0EF}"),
    (Button::SELECT, "\u{E0F0}"),
    (Button::DPAD_LEFT, "\u{E0ED}"),
    (Button::DPAD_UP, "\u{E0EB}"),
    (Button::DPAD_RIGHT, "\u{E0EE}"),
    (Button::DPAD_DOWN, "\u{E0EC}"),
    (Button::LS_LEFT, "\u{E0C1}"),
    (Button::LS_UP, "\u{E0C1}"),
    (Button::LS_RIGHT, "\u{E0C1}"),
    (Button::LS_DOWN, "\u{E0C1}"),
    (Button::RS_LEFT, "\u{E0C2}"),
    (Button::RS_UP, "\u{E0C2}"),
    (Button::RS_RIGHT, "\u{E0C2}"),
    (Button::RS_DOWN, "\u{E0C2}"),
];

impl Button {
    /// Font glyph for the button. Masks use the glyph of their lowest bit.
    pub fn glyph(self) -> &'static str {
        if self.is_empty() {
            return "";
        }
        let lowest = Button::from_bits_retain(1 << self.bits().trailing_zeros());
        GLYPHS
            .iter()
            .find(|(button, _)| *button == lowest)
            .map(|(_, glyph)| *glyph)
            .unwrap_or("")
    }
}

bitflags! {
    /// Which controller transitions trigger an [`crate::Action`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActionType: u8 {
        /// Button went down this frame.
        const DOWN = 1;
        /// Button went up this frame.
        const UP   = 1 << 1;
        /// Button is being held.
        const HELD = 1 << 2;
    }
}

impl Default for ActionType {
    fn default() -> Self {
        Self::DOWN
    }
}

/// Controller state for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    pub down: Button,
    pub up: Button,
    pub held: Button,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            down: Button::empty(),
            up: Button::empty(),
            held: Button::empty(),
        }
    }
}

impl Controller {
    /// Derive press/release edges from two consecutive held-button samples.
    pub fn from_held(previous: Button, current: Button) -> Self {
        Self {
            down: current.difference(previous),
            up: previous.difference(current),
            held: current,
        }
    }

    /// Snapshot where `buttons` were pressed this frame.
    pub fn pressed(buttons: Button) -> Self {
        Self::from_held(Button::empty(), buttons)
    }

    pub fn got_down(&self, button: Button) -> bool {
        self.down.intersects(button)
    }

    pub fn got_up(&self, button: Button) -> bool {
        self.up.intersects(button)
    }

    pub fn got_held(&self, button: Button) -> bool {
        self.held.intersects(button)
    }
}

/// Touch state for a single frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TouchInfo {
    /// A tap was released this frame.
    pub is_clicked: bool,
    pub position: Vec2,
}

impl TouchInfo {
    pub fn click(position: Vec2) -> Self {
        Self {
            is_clicked: true,
            position,
        }
    }

    pub fn in_range(&self, rect: &Vec4) -> bool {
        rect.contains(self.position)
    }
}
