//! Building blocks for controller-driven widgets.
//!
//! A [`Widget`] owns a table of [`Action`]s keyed by [`Button`]. Each frame
//! the owner feeds it a [`Controller`] and [`TouchInfo`] snapshot through
//! [`Widget::update`], which resolves at most one binding, and then draws
//! the button-hint bar derived from the same table with [`Widget::draw`].
//!
//! Services that live outside a widget (screen stack, sound, option storage,
//! translations, font metrics) are reached through [`AppContext`], passed
//! explicitly on every call that may need them. Drawing goes through the
//! [`Renderer`] trait borrowed inside a [`DrawFrame`].
//!
//! The [`headless`] module provides a recording renderer and an in-memory
//! app context for tests and offline tooling.

mod action;
mod context;
mod error;
mod geometry;
mod hints;
mod i18n;
mod input;
mod render;
mod theme;
mod widget;

pub mod headless;
pub mod options;

pub use action::Action;
pub use context::{AppContext, ListPicker, SoundEffect, TextScrollSpeed};
pub use error::{Error, Result};
pub use geometry::{SCREEN_HEIGHT, SCREEN_WIDTH, Vec2, Vec4};
pub use hints::{GLYPH_FONT_SIZE, HINT_FONT_SIZE, UiButton, ui_buttons};
pub use i18n::I18n;
pub use input::{ActionType, Button, Controller, TouchInfo};
pub use options::{OptionBool, OptionLong, OptionStore};
pub use render::{DrawFrame, Renderer, TextAlign, TextMeasure};
pub use theme::{Colour, Theme, ThemeEntry, parse_hex_color};
pub use widget::{PopHandle, Widget};
