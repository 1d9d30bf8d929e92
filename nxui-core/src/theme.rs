use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Colour slots widgets draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Background,
    Sidebar,
    Line,
    LineSeparator,
    Text,
    TextInfo,
    TextSelected,
    Selected,
    Scrollbar,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Background,
        ThemeEntry::Sidebar,
        ThemeEntry::Line,
        ThemeEntry::LineSeparator,
        ThemeEntry::Text,
        ThemeEntry::TextInfo,
        ThemeEntry::TextSelected,
        ThemeEntry::Selected,
        ThemeEntry::Scrollbar,
    ];

    fn default_hex(self) -> &'static str {
        match self {
            ThemeEntry::Background => "#2d2d2d",
            ThemeEntry::Sidebar => "#323232",
            ThemeEntry::Line => "#ffffff",
            ThemeEntry::LineSeparator => "#515151",
            ThemeEntry::Text => "#ffffff",
            ThemeEntry::TextInfo => "#808080",
            ThemeEntry::TextSelected => "#00ffdd",
            ThemeEntry::Selected => "#00ffdd",
            ThemeEntry::Scrollbar => "#808080",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colour lookup by [`ThemeEntry`].
#[derive(Debug, Clone)]
pub struct Theme {
    colours: HashMap<ThemeEntry, Colour>,
}

impl Default for Theme {
    fn default() -> Self {
        let colours = ThemeEntry::ALL
            .iter()
            .map(|entry| {
                let colour = parse_hex_color(entry.default_hex())
                    .unwrap_or(Colour::rgb(255, 255, 255));
                (*entry, colour)
            })
            .collect();
        Self { colours }
    }
}

impl Theme {
    /// Default palette with `overrides` applied. Unparsable values are
    /// skipped with a warning.
    pub fn with_overrides(overrides: &HashMap<ThemeEntry, String>) -> Self {
        let mut theme = Theme::default();
        for (entry, value) in overrides {
            match parse_hex_color(value) {
                Some(colour) => theme.set_colour(*entry, colour),
                None => {
                    log::warn!("theme ignores invalid colour {entry:?}={value}")
                },
            }
        }
        theme
    }

    /// Load overrides from a JSON object of `slot: "#rrggbb"` pairs. A
    /// missing file yields the default palette.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Theme::default());
            },
            Err(err) => return Err(err.into()),
        };
        let overrides: HashMap<ThemeEntry, String> =
            serde_json::from_str(&data)?;
        Ok(Theme::with_overrides(&overrides))
    }

    pub fn colour(&self, entry: ThemeEntry) -> Colour {
        self.colours.get(&entry).copied().unwrap_or_default()
    }

    pub fn set_colour(&mut self, entry: ThemeEntry, colour: Colour) {
        self.colours.insert(entry, colour);
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(value: &str) -> Option<Colour> {
    let hex = value.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16);
    match hex.len() {
        6 => Some(Colour::rgb(
            channel(0).ok()?,
            channel(2).ok()?,
            channel(4).ok()?,
        )),
        8 => Some(Colour {
            r: channel(0).ok()?,
            g: channel(2).ok()?,
            b: channel(4).ok()?,
            a: channel(6).ok()?,
        }),
        _ => None,
    }
}
