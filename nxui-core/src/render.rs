//! Drawing surface consumed by widgets.
//!
//! Widgets never own a renderer. A [`DrawFrame`] borrows one for the
//! duration of a single draw pass together with the colour theme and
//! translations used to resolve text.

use bitflags::bitflags;

use crate::context::TextScrollSpeed;
use crate::geometry::{Vec2, Vec4};
use crate::i18n::I18n;
use crate::theme::{Colour, Theme, ThemeEntry};

bitflags! {
    /// Anchor of a text run relative to its draw position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextAlign: u8 {
        const LEFT   = 1;
        const CENTER = 1 << 1;
        const RIGHT  = 1 << 2;
        const TOP    = 1 << 3;
        const MIDDLE = 1 << 4;
        const BOTTOM = 1 << 5;
    }
}

/// Font metrics used for layout.
pub trait TextMeasure {
    /// Advance width of `text` rendered at `font_size`.
    fn text_width(&self, font_size: f32, text: &str) -> f32;

    /// Height of `text` once wrapped into a box `width` wide.
    fn text_box_height(
        &self,
        font_size: f32,
        line_height: f32,
        width: f32,
        text: &str,
    ) -> f32;
}

/// Immediate-mode vector drawing context.
pub trait Renderer: TextMeasure {
    fn draw_rect(&mut self, rect: Vec4, colour: Colour, radius: f32);

    fn draw_rect_outline(&mut self, rect: Vec4, thickness: f32, colour: Colour);

    fn draw_text(
        &mut self,
        pos: Vec2,
        font_size: f32,
        align: TextAlign,
        colour: Colour,
        text: &str,
    );

    /// Draw `text` wrapped into a box `width` wide, top-left anchored.
    fn draw_text_box(
        &mut self,
        pos: Vec2,
        font_size: f32,
        line_height: f32,
        width: f32,
        colour: Colour,
        text: &str,
    );

    /// Push the current clip state.
    fn save(&mut self);

    /// Pop the clip state pushed by the matching [`Renderer::save`].
    fn restore(&mut self);

    /// Replace the clip region.
    fn scissor(&mut self, rect: Vec4);

    /// Shrink the clip region to its intersection with `rect`.
    fn intersect_scissor(&mut self, rect: Vec4);
}

/// Everything a widget needs for one draw pass.
pub struct DrawFrame<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub theme: &'a Theme,
    pub i18n: &'a I18n,
    pub scroll_speed: TextScrollSpeed,
}

impl<'a> DrawFrame<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        theme: &'a Theme,
        i18n: &'a I18n,
        scroll_speed: TextScrollSpeed,
    ) -> Self {
        Self {
            renderer,
            theme,
            i18n,
            scroll_speed,
        }
    }

    pub fn colour(&self, entry: ThemeEntry) -> Colour {
        self.theme.colour(entry)
    }

    /// Draw a single line of text in a theme colour.
    pub fn text(
        &mut self,
        pos: Vec2,
        font_size: f32,
        align: TextAlign,
        entry: ThemeEntry,
        text: &str,
    ) {
        let colour = self.theme.colour(entry);
        self.renderer.draw_text(pos, font_size, align, colour, text);
    }

    pub fn rect(&mut self, rect: Vec4, entry: ThemeEntry) {
        let colour = self.theme.colour(entry);
        self.renderer.draw_rect(rect, colour, 0.0);
    }
}
