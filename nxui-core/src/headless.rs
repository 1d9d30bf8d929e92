//! Renderer and application stand-ins that need no display.
//!
//! [`DrawRecorder`] keeps every draw call as a [`DrawCommand`], and
//! [`HeadlessApp`] records sounds, navigation requests and pushed pickers.
//! Both measure text with [`FixedMetrics`], where every character is half
//! as wide as the font size.

use crate::context::{AppContext, ListPicker, SoundEffect, TextScrollSpeed};
use crate::geometry::{Vec2, Vec4};
use crate::i18n::I18n;
use crate::options::OptionStore;
use crate::render::{Renderer, TextAlign, TextMeasure};
use crate::theme::Colour;

/// Monospace metrics: `chars * font_size / 2` wide, wrapped by width.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics;

impl TextMeasure for FixedMetrics {
    fn text_width(&self, font_size: f32, text: &str) -> f32 {
        text.chars().count() as f32 * font_size * 0.5
    }

    fn text_box_height(
        &self,
        font_size: f32,
        line_height: f32,
        width: f32,
        text: &str,
    ) -> f32 {
        let total = self.text_width(font_size, text);
        let lines = if width > 0.0 {
            (total / width).ceil().max(1.0)
        } else {
            1.0
        };
        lines * font_size * line_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Vec4,
        colour: Colour,
        radius: f32,
    },
    Outline {
        rect: Vec4,
        thickness: f32,
        colour: Colour,
    },
    Text {
        pos: Vec2,
        font_size: f32,
        align: TextAlign,
        colour: Colour,
        text: String,
    },
    TextBox {
        pos: Vec2,
        font_size: f32,
        width: f32,
        colour: Colour,
        text: String,
    },
    Save,
    Restore,
    Scissor(Vec4),
    IntersectScissor(Vec4),
}

/// Renderer that records draw calls instead of rasterising them.
#[derive(Debug, Default, Clone)]
pub struct DrawRecorder {
    commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every single-line text run with its colour, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Colour)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, colour, .. } => {
                Some((text.as_str(), *colour))
            },
            _ => None,
        })
    }

    pub fn text_colour(&self, needle: &str) -> Option<Colour> {
        self.texts()
            .find(|(text, _)| *text == needle)
            .map(|(_, colour)| colour)
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.text_colour(needle).is_some()
    }
}

impl TextMeasure for DrawRecorder {
    fn text_width(&self, font_size: f32, text: &str) -> f32 {
        FixedMetrics.text_width(font_size, text)
    }

    fn text_box_height(
        &self,
        font_size: f32,
        line_height: f32,
        width: f32,
        text: &str,
    ) -> f32 {
        FixedMetrics.text_box_height(font_size, line_height, width, text)
    }
}

impl Renderer for DrawRecorder {
    fn draw_rect(&mut self, rect: Vec4, colour: Colour, radius: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            colour,
            radius,
        });
    }

    fn draw_rect_outline(&mut self, rect: Vec4, thickness: f32, colour: Colour) {
        self.commands.push(DrawCommand::Outline {
            rect,
            thickness,
            colour,
        });
    }

    fn draw_text(
        &mut self,
        pos: Vec2,
        font_size: f32,
        align: TextAlign,
        colour: Colour,
        text: &str,
    ) {
        self.commands.push(DrawCommand::Text {
            pos,
            font_size,
            align,
            colour,
            text: text.to_string(),
        });
    }

    fn draw_text_box(
        &mut self,
        pos: Vec2,
        font_size: f32,
        _line_height: f32,
        width: f32,
        colour: Colour,
        text: &str,
    ) {
        self.commands.push(DrawCommand::TextBox {
            pos,
            font_size,
            width,
            colour,
            text: text.to_string(),
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn scissor(&mut self, rect: Vec4) {
        self.commands.push(DrawCommand::Scissor(rect));
    }

    fn intersect_scissor(&mut self, rect: Vec4) {
        self.commands.push(DrawCommand::IntersectScissor(rect));
    }
}

/// Application context without a screen stack or audio device.
#[derive(Debug, Default)]
pub struct HeadlessApp {
    options: OptionStore,
    i18n: I18n,
    fonts: FixedMetrics,
    sounds: Vec<SoundEffect>,
    pickers: Vec<ListPicker>,
    pops_to_menu: usize,
}

impl HeadlessApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: OptionStore) -> Self {
        self.options = options;
        self
    }

    pub fn with_i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    pub fn sounds(&self) -> &[SoundEffect] {
        &self.sounds
    }

    pub fn pickers(&self) -> &[ListPicker] {
        &self.pickers
    }

    /// Remove the most recently pushed picker, as if its screen closed.
    pub fn take_picker(&mut self) -> Option<ListPicker> {
        self.pickers.pop()
    }

    pub fn pops_to_menu(&self) -> usize {
        self.pops_to_menu
    }
}

impl AppContext for HeadlessApp {
    fn play_sound(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    fn push_list_picker(&mut self, picker: ListPicker) {
        log::debug!("push list picker: {}", picker.title);
        self.pickers.push(picker);
    }

    fn pop_to_menu(&mut self) {
        self.pops_to_menu += 1;
    }

    fn text_scroll_speed(&self) -> TextScrollSpeed {
        self.options.text_scroll_speed()
    }

    fn options_mut(&mut self) -> &mut OptionStore {
        &mut self.options
    }

    fn i18n(&self) -> &I18n {
        &self.i18n
    }

    fn fonts(&self) -> &dyn TextMeasure {
        &self.fonts
    }
}
