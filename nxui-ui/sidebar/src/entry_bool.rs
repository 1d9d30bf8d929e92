use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use nxui_core::{
    Action, AppContext, Button, DrawFrame, OptionBool, OptionStore, TextAlign,
    ThemeEntry, Vec2,
};

use crate::entry::{
    ENTRY_FONT_SIZE, ENTRY_PAD_X, EntryBase, EntryLayout, SidebarEntry,
};

const DEFAULT_TRUE_LABEL: &str = "On";
const DEFAULT_FALSE_LABEL: &str = "Off";

/// On/off toggle bound to A.
pub struct SidebarEntryBool {
    base: EntryBase,
    value: Rc<Cell<bool>>,
    true_label: String,
    false_label: String,
}

impl SidebarEntryBool {
    /// Toggle starting at `value` that reports every change to `callback`.
    pub fn new(
        title: impl Into<String>,
        value: bool,
        mut callback: impl FnMut(bool) + 'static,
        info: impl Into<String>,
    ) -> Self {
        Self::build(title, value, info, move |_, value| callback(value))
    }

    /// Toggle that mirrors its value into `storage`.
    pub fn with_storage(
        title: impl Into<String>,
        storage: Rc<Cell<bool>>,
        info: impl Into<String>,
    ) -> Self {
        let value = storage.get();
        Self::build(title, value, info, move |_, value| storage.set(value))
    }

    /// Toggle backed by an option; each change is written to the app's
    /// option store.
    pub fn with_option(
        title: impl Into<String>,
        options: &OptionStore,
        option: OptionBool,
        info: impl Into<String>,
    ) -> Self {
        Self::with_option_callback(title, options, option, |_| {}, info)
    }

    /// Like [`SidebarEntryBool::with_option`], running `callback` before the
    /// new value is stored.
    pub fn with_option_callback(
        title: impl Into<String>,
        options: &OptionStore,
        option: OptionBool,
        mut callback: impl FnMut(bool) + 'static,
        info: impl Into<String>,
    ) -> Self {
        let value = options.get_bool(&option);
        Self::build(title, value, info, move |ctx, value| {
            callback(value);
            if let Err(err) = ctx.options_mut().set_bool(&option, value) {
                log::warn!("failed to store option {}: {err}", option.key());
            }
        })
    }

    fn build(
        title: impl Into<String>,
        value: bool,
        info: impl Into<String>,
        callback: impl FnMut(&mut dyn AppContext, bool) + 'static,
    ) -> Self {
        let mut base = EntryBase::new(title, info);
        let value = Rc::new(Cell::new(value));

        let enabled = base.enabled_flag();
        let state = value.clone();
        let callback = RefCell::new(callback);
        base.widget_mut().set_action(
            Button::A,
            Action::new("OK", move |ctx| {
                if !enabled.get() {
                    return;
                }
                let toggled = !state.get();
                state.set(toggled);
                (callback.borrow_mut())(ctx, toggled);
            }),
        );

        Self {
            base,
            value,
            true_label: DEFAULT_TRUE_LABEL.to_string(),
            false_label: DEFAULT_FALSE_LABEL.to_string(),
        }
    }

    pub fn with_labels(
        mut self,
        true_label: impl Into<String>,
        false_label: impl Into<String>,
    ) -> Self {
        self.true_label = true_label.into();
        self.false_label = false_label.into();
        self
    }

    pub fn value(&self) -> bool {
        self.value.get()
    }
}

impl fmt::Debug for SidebarEntryBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarEntryBool")
            .field("title", &self.base.title())
            .field("value", &self.value.get())
            .field("true_label", &self.true_label)
            .field("false_label", &self.false_label)
            .finish_non_exhaustive()
    }
}

impl SidebarEntry for SidebarEntryBool {
    fn base(&self) -> &EntryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntryBase {
        &mut self.base
    }

    fn draw(&mut self, frame: &mut DrawFrame<'_>, layout: &EntryLayout) {
        self.base.draw(frame, layout);
        self.base.draw_title(frame);

        let (label, colour) = if self.value.get() {
            (&self.true_label, ThemeEntry::TextSelected)
        } else {
            (&self.false_label, ThemeEntry::Text)
        };
        let pos = self.base.pos();
        let i18n = frame.i18n;
        let label = i18n.get(label);
        frame.text(
            Vec2::new(pos.right() - ENTRY_PAD_X, self.base.text_anchor_y()),
            ENTRY_FONT_SIZE,
            TextAlign::RIGHT | TextAlign::MIDDLE,
            colour,
            label,
        );
    }
}
