//! Button-hint bar generated from a widget's bindings.

use crate::action::Action;
use crate::geometry::{Vec2, Vec4};
use crate::i18n::I18n;
use crate::input::Button;
use crate::render::{DrawFrame, TextAlign, TextMeasure};
use crate::theme::ThemeEntry;

pub const HINT_FONT_SIZE: f32 = 20.0;
pub const GLYPH_FONT_SIZE: f32 = 26.0;
const HINT_TO_GLYPH_GAP: f32 = 8.0;
const BETWEEN_HINTS_GAP: f32 = 34.0;
const TOUCH_PAD_LEFT: f32 = 40.0;
const TOUCH_PAD_RIGHT: f32 = 25.0;
const TOUCH_PAD_Y: f32 = 18.0;

/// Shoulder pairs whose hints collapse into one slot when bound in order.
const PAIRED_BUTTONS: [(Button, Button); 2] =
    [(Button::L, Button::R), (Button::L2, Button::R2)];

/// One glyph + label pair in the hint bar.
#[derive(Debug, Clone, PartialEq)]
pub struct UiButton {
    pub button: Button,
    pub glyph: &'static str,
    pub hint: String,
    /// Right-aligned label box.
    pub hint_pos: Vec4,
    /// Right-aligned glyph box.
    pub button_pos: Vec4,
    /// Touch target.
    pub pos: Vec4,
}

impl UiButton {
    fn new(button: Button, hint: &str) -> Self {
        Self {
            button,
            glyph: button.glyph(),
            hint: hint.to_string(),
            hint_pos: Vec4::default(),
            button_pos: Vec4::default(),
            pos: Vec4::default(),
        }
    }

    pub fn draw(&self, frame: &mut DrawFrame<'_>) {
        let align = TextAlign::RIGHT | TextAlign::TOP;
        frame.text(
            Vec2::new(self.hint_pos.x, self.hint_pos.y),
            HINT_FONT_SIZE,
            align,
            ThemeEntry::Text,
            &self.hint,
        );
        frame.text(
            Vec2::new(self.button_pos.x, self.button_pos.y),
            GLYPH_FONT_SIZE,
            align,
            ThemeEntry::Text,
            self.glyph,
        );
    }
}

/// Build the hint bar for `actions`, packed right to left from `anchor`.
///
/// Hidden actions and actions without hint text are skipped. When the right
/// half of a shoulder pair directly follows its left half, the left half's
/// slot is taken over by the right button's glyph and hint.
pub fn ui_buttons<'a, I, M>(
    actions: I,
    anchor: Vec2,
    fonts: &M,
    i18n: &I18n,
) -> Vec<UiButton>
where
    I: IntoIterator<Item = (Button, &'a Action)>,
    M: TextMeasure + ?Sized,
{
    let mut buttons: Vec<UiButton> = Vec::new();

    for (button, action) in actions {
        if action.is_hidden() || action.hint().is_empty() {
            continue;
        }
        let hint = i18n.get(action.hint());

        let pairs_with_last = PAIRED_BUTTONS.iter().any(|(left, right)| {
            button == *right
                && buttons.last().is_some_and(|last| last.button == *left)
        });

        if !pairs_with_last {
            buttons.push(UiButton::new(button, hint));
        } else if let Some(last) = buttons.last_mut() {
            last.button = button;
            last.glyph = button.glyph();
            last.hint = hint.to_string();
        }
    }

    layout(&mut buttons, anchor, fonts);
    buttons
}

fn layout<M: TextMeasure + ?Sized>(
    buttons: &mut [UiButton],
    anchor: Vec2,
    fonts: &M,
) {
    let Vec2 { mut x, y } = anchor;

    for button in buttons {
        let hint_w = fonts.text_width(HINT_FONT_SIZE, &button.hint);
        button.hint_pos = Vec4::new(x, y, hint_w, HINT_FONT_SIZE);
        x -= hint_w + HINT_TO_GLYPH_GAP;

        let glyph_w = fonts.text_width(GLYPH_FONT_SIZE, button.glyph);
        button.button_pos = Vec4::new(x, y - 4.0, glyph_w, GLYPH_FONT_SIZE);
        x -= glyph_w + BETWEEN_HINTS_GAP;

        button.pos = Vec4::new(
            button.button_pos.x - TOUCH_PAD_LEFT,
            button.button_pos.y - TOUCH_PAD_Y,
            button.hint_pos.x - button.button_pos.x + glyph_w + TOUCH_PAD_RIGHT,
            GLYPH_FONT_SIZE + TOUCH_PAD_Y * 2.0,
        );
    }
}
