//! Application services reachable from widgets and their actions.

use std::fmt;

use crate::i18n::I18n;
use crate::options::OptionStore;
use crate::render::TextMeasure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Button press on a focusable widget.
    Focus,
    /// Selection moved inside a list.
    Scroll,
    /// Selection hit the end of a list.
    Limit,
}

/// Global marquee speed for text that overflows its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextScrollSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl TextScrollSpeed {
    /// Map the stored option value; anything unknown is `Normal`.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => TextScrollSpeed::Slow,
            2 => TextScrollSpeed::Fast,
            _ => TextScrollSpeed::Normal,
        }
    }

    pub fn index(self) -> i64 {
        match self {
            TextScrollSpeed::Slow => 0,
            TextScrollSpeed::Normal => 1,
            TextScrollSpeed::Fast => 2,
        }
    }

    pub fn pixels_per_frame(self) -> f32 {
        match self {
            TextScrollSpeed::Slow => 0.5,
            TextScrollSpeed::Normal => 1.0,
            TextScrollSpeed::Fast => 1.5,
        }
    }
}

type PickerCallback = Box<dyn FnOnce(&mut dyn AppContext, Option<usize>)>;

/// Request to show a modal list picker.
///
/// The picker screen calls [`ListPicker::confirm`] once it closes, with the
/// app context and the chosen row, or `None` when dismissed.
pub struct ListPicker {
    pub title: String,
    pub items: Vec<String>,
    pub index: usize,
    on_select: PickerCallback,
}

impl ListPicker {
    pub fn new(
        title: impl Into<String>,
        items: Vec<String>,
        index: usize,
        on_select: impl FnOnce(&mut dyn AppContext, Option<usize>) + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            items,
            index,
            on_select: Box::new(on_select),
        }
    }

    pub fn confirm(self, ctx: &mut dyn AppContext, choice: Option<usize>) {
        (self.on_select)(ctx, choice);
    }
}

impl fmt::Debug for ListPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPicker")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Navigation stack, audio, settings and text services of the running app.
pub trait AppContext {
    fn play_sound(&mut self, effect: SoundEffect);

    /// Push a list picker screen above the current one.
    fn push_list_picker(&mut self, picker: ListPicker);

    /// Pop every layer above the menu root.
    fn pop_to_menu(&mut self);

    fn text_scroll_speed(&self) -> TextScrollSpeed;

    fn options_mut(&mut self) -> &mut OptionStore;

    fn i18n(&self) -> &I18n;

    fn fonts(&self) -> &dyn TextMeasure;
}
