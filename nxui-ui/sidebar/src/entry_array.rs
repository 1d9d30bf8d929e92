use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use nxui_core::{
    Action, AppContext, Button, DrawFrame, ListPicker, OptionLong, OptionStore,
    TextAlign, ThemeEntry, Vec2, Vec4,
};

use crate::entry::{
    ENTRY_FONT_SIZE, ENTRY_PAD_X, EntryBase, EntryLayout, SidebarEntry,
};
use crate::marquee::{MARQUEE_GAP, Marquee};

/// Space between the title and the start of the value column.
const VALUE_GAP: f32 = 50.0;

type SelectFn = dyn FnMut(&mut dyn AppContext, usize);
type SelectCallback = Rc<RefCell<Box<SelectFn>>>;

/// Selector over a list of labels, edited through a list picker.
pub struct SidebarEntryArray {
    base: EntryBase,
    items: Rc<Vec<String>>,
    index: Rc<Cell<usize>>,
    marquee: Marquee,
}

impl SidebarEntryArray {
    /// Selector starting at `index`; an out-of-range index falls back to 0.
    pub fn new(
        title: impl Into<String>,
        items: Vec<String>,
        mut callback: impl FnMut(usize) + 'static,
        index: usize,
        info: impl Into<String>,
    ) -> Self {
        Self::build(title, items, index, info, move |_, index| callback(index))
    }

    /// Selector starting at the first item equal to `label`, or at 0.
    pub fn with_selected(
        title: impl Into<String>,
        items: Vec<String>,
        callback: impl FnMut(usize) + 'static,
        label: &str,
        info: impl Into<String>,
    ) -> Self {
        let index = items.iter().position(|item| item == label).unwrap_or(0);
        Self::new(title, items, callback, index, info)
    }

    pub fn with_selected_label(
        title: impl Into<String>,
        items: Vec<String>,
        label: &str,
        info: impl Into<String>,
    ) -> Self {
        Self::with_selected(title, items, |_| {}, label, info)
    }

    /// Selector whose index is an option; each confirmed choice is written
    /// to the app's option store.
    pub fn with_option(
        title: impl Into<String>,
        items: Vec<String>,
        options: &OptionStore,
        option: OptionLong,
        info: impl Into<String>,
    ) -> Self {
        Self::with_option_callback(title, items, options, option, |_| {}, info)
    }

    /// Like [`SidebarEntryArray::with_option`], running `callback` before the
    /// new index is stored.
    pub fn with_option_callback(
        title: impl Into<String>,
        items: Vec<String>,
        options: &OptionStore,
        option: OptionLong,
        mut callback: impl FnMut(usize) + 'static,
        info: impl Into<String>,
    ) -> Self {
        let index = usize::try_from(options.get_long(&option)).unwrap_or(0);
        Self::build(title, items, index, info, move |ctx, index| {
            callback(index);
            let stored = ctx.options_mut().set_long(&option, index as i64);
            if let Err(err) = stored {
                log::warn!("failed to store option {}: {err}", option.key());
            }
        })
    }

    fn build(
        title: impl Into<String>,
        items: Vec<String>,
        index: usize,
        info: impl Into<String>,
        callback: impl FnMut(&mut dyn AppContext, usize) + 'static,
    ) -> Self {
        let title = title.into();
        let index = if index < items.len() {
            index
        } else {
            if !items.is_empty() {
                log::warn!(
                    "{title}: index {index} out of range for {} items",
                    items.len()
                );
            }
            0
        };

        let mut base = EntryBase::new(title, info);
        let items = Rc::new(items);
        let index = Rc::new(Cell::new(index));
        let callback: Box<SelectFn> = Box::new(callback);
        let callback: SelectCallback = Rc::new(RefCell::new(callback));

        let enabled = base.enabled_flag();
        let picker_title = base.title().to_string();
        let picker_items = items.clone();
        let picker_index = index.clone();
        base.widget_mut().set_action(
            Button::A,
            Action::new("OK", move |ctx| {
                if !enabled.get() {
                    return;
                }
                let index = picker_index.clone();
                let callback = callback.clone();
                let count = picker_items.len();
                ctx.push_list_picker(ListPicker::new(
                    picker_title.clone(),
                    picker_items.as_ref().clone(),
                    picker_index.get(),
                    move |ctx, choice| {
                        let Some(choice) = choice else {
                            return;
                        };
                        if choice >= count {
                            log::warn!(
                                "picker choice {choice} out of range for \
                                 {count} items"
                            );
                            return;
                        }
                        index.set(choice);
                        (callback.borrow_mut())(ctx, choice);
                    },
                ));
            }),
        );

        Self {
            base,
            items,
            index,
            marquee: Marquee::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.index.get()).map(String::as_str)
    }

    pub fn scroll_offset(&self) -> f32 {
        self.marquee.offset()
    }
}

impl fmt::Debug for SidebarEntryArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarEntryArray")
            .field("title", &self.base.title())
            .field("items", &self.items)
            .field("index", &self.index.get())
            .finish_non_exhaustive()
    }
}

impl SidebarEntry for SidebarEntryArray {
    fn base(&self) -> &EntryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntryBase {
        &mut self.base
    }

    fn draw(&mut self, frame: &mut DrawFrame<'_>, layout: &EntryLayout) {
        self.base.draw(frame, layout);

        let pos = self.base.pos();
        let label = self.selected().unwrap_or_default().to_string();
        let i18n = frame.i18n;
        let title_w = frame
            .renderer
            .text_width(ENTRY_FONT_SIZE, i18n.get(self.base.title()));
        let start_x = title_w + VALUE_GAP;
        let max_width = (pos.w - start_x - ENTRY_PAD_X).max(0.0);
        let label_w = frame.renderer.text_width(ENTRY_FONT_SIZE, &label);

        let mut value = label.clone();
        if label_w > max_width && self.base.has_focus() {
            value.push_str(MARQUEE_GAP);
            let loop_w = frame.renderer.text_width(ENTRY_FONT_SIZE, &value);
            self.marquee
                .advance(loop_w, frame.scroll_speed.pixels_per_frame());
            value.push_str(&label);
        } else {
            self.marquee.reset();
        }

        let x = pos.right() - ENTRY_PAD_X - max_width.min(label_w);
        let y = self.base.text_anchor_y();

        self.base.draw_title(frame);

        frame.renderer.save();
        frame
            .renderer
            .intersect_scissor(Vec4::new(x, pos.y, max_width, pos.h));
        frame.text(
            Vec2::new(x - self.marquee.offset(), y),
            ENTRY_FONT_SIZE,
            TextAlign::LEFT | TextAlign::MIDDLE,
            ThemeEntry::TextSelected,
            &value,
        );
        frame.renderer.restore();
    }

    fn on_focus_lost(&mut self) {
        self.base.on_focus_lost();
        self.marquee.reset();
    }
}

#[cfg(test)]
mod tests {
    use nxui_core::headless::{DrawRecorder, HeadlessApp};
    use nxui_core::options::TEXT_SCROLL_SPEED;
    use nxui_core::{ActionType, I18n, TextScrollSpeed, Theme};

    use super::*;
    use crate::marquee::MARQUEE_DWELL_FRAMES;
    use crate::sidebar::Side;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn draw_frames(entry: &mut SidebarEntryArray, frames: u32) {
        let mut recorder = DrawRecorder::new();
        let theme = Theme::default();
        let i18n = I18n::default();
        let mut frame =
            DrawFrame::new(&mut recorder, &theme, &i18n, TextScrollSpeed::Fast);
        let layout = EntryLayout {
            root: Vec4::new(830.0, 0.0, 450.0, 720.0),
            side: Side::Right,
        };
        for _ in 0..frames {
            entry.draw(&mut frame, &layout);
        }
    }

    #[test]
    fn given_label_in_list_when_constructed_then_index_matches() {
        let entry = SidebarEntryArray::with_selected_label(
            "Theme",
            labels(&["a", "b", "c", "d", "e"]),
            "c",
            "",
        );

        assert_eq!(entry.index(), 2);
        assert_eq!(entry.selected(), Some("c"));
    }

    #[test]
    fn given_unknown_label_when_constructed_then_index_is_zero() {
        let entry = SidebarEntryArray::with_selected_label(
            "Theme",
            labels(&["a", "b", "c"]),
            "missing",
            "",
        );

        assert_eq!(entry.index(), 0);
    }

    #[test]
    fn given_out_of_range_index_when_constructed_then_index_is_zero() {
        let entry =
            SidebarEntryArray::new("Theme", labels(&["a", "b"]), |_| {}, 5, "");

        assert_eq!(entry.index(), 0);
    }

    #[test]
    fn given_picker_when_confirmed_then_index_and_callback_update() {
        let mut app = HeadlessApp::new();
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let entry = SidebarEntryArray::new(
            "Theme",
            labels(&["a", "b", "c"]),
            move |index| sink.set(Some(index)),
            0,
            "",
        );

        entry
            .base()
            .widget()
            .fire_action(Button::A, ActionType::DOWN, &mut app);
        let picker = app.take_picker().expect("picker should be pushed");
        assert_eq!(picker.title, "Theme");
        assert_eq!(picker.items, labels(&["a", "b", "c"]));
        assert_eq!(picker.index, 0);
        picker.confirm(&mut app, Some(1));

        assert_eq!(entry.index(), 1);
        assert_eq!(seen.get(), Some(1));
    }

    #[test]
    fn given_out_of_range_choice_when_confirmed_then_it_is_rejected() {
        let mut app = HeadlessApp::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let entry = SidebarEntryArray::new(
            "Theme",
            labels(&["a", "b"]),
            move |_| counter.set(counter.get() + 1),
            1,
            "",
        );

        entry
            .base()
            .widget()
            .fire_action(Button::A, ActionType::DOWN, &mut app);
        let picker = app.take_picker().expect("picker should be pushed");
        picker.confirm(&mut app, Some(7));

        assert_eq!(entry.index(), 1);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn given_disabled_selector_when_pressed_then_no_picker_is_pushed() {
        let mut app = HeadlessApp::new();
        let entry =
            SidebarEntryArray::with_selected_label("Theme", labels(&["a"]), "a", "");
        entry.base().set_enabled(false);

        entry
            .base()
            .widget()
            .fire_action(Button::A, ActionType::DOWN, &mut app);

        assert!(app.pickers().is_empty());
    }

    #[test]
    fn given_scrolling_value_when_focus_lost_then_offset_resets() {
        let long = "An extremely long value label that cannot fit in the row";
        let mut entry = SidebarEntryArray::with_selected_label(
            "Theme",
            labels(&[long]),
            long,
            "",
        );
        entry
            .base_mut()
            .widget_mut()
            .set_pos(Vec4::new(860.0, 170.0, 390.0, 70.0));
        entry.on_focus_gained();

        draw_frames(&mut entry, MARQUEE_DWELL_FRAMES + 5);
        assert!(entry.scroll_offset() > 0.0);

        entry.on_focus_lost();

        assert_eq!(entry.scroll_offset(), 0.0);
    }

    #[test]
    fn given_short_value_when_focused_then_it_never_scrolls() {
        let mut entry = SidebarEntryArray::with_selected_label(
            "Theme",
            labels(&["Dark"]),
            "Dark",
            "",
        );
        entry
            .base_mut()
            .widget_mut()
            .set_pos(Vec4::new(860.0, 170.0, 390.0, 70.0));
        entry.on_focus_gained();

        draw_frames(&mut entry, MARQUEE_DWELL_FRAMES + 5);

        assert_eq!(entry.scroll_offset(), 0.0);
    }

    #[test]
    fn given_option_backed_selector_when_confirmed_then_choice_is_stored() {
        let option = OptionLong::new(TEXT_SCROLL_SPEED, 1);
        let mut app = HeadlessApp::new().with_options(OptionStore::in_memory());
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let entry = SidebarEntryArray::with_option_callback(
            "Text scroll speed",
            labels(&["Slow", "Normal", "Fast"]),
            app.options(),
            option.clone(),
            move |index| sink.set(Some(index)),
            "",
        );
        assert_eq!(entry.index(), 1);

        entry
            .base()
            .widget()
            .fire_action(Button::A, ActionType::DOWN, &mut app);
        let picker = app.take_picker().expect("picker should be pushed");
        picker.confirm(&mut app, Some(2));

        assert_eq!(entry.index(), 2);
        assert_eq!(seen.get(), Some(2));
        assert_eq!(app.options().get_long(&option), 2);
        assert_eq!(app.text_scroll_speed(), TextScrollSpeed::Fast);
    }

    #[test]
    fn given_negative_stored_index_when_constructed_then_index_is_zero() {
        let option = OptionLong::new("theme_index", 0);
        let mut store = OptionStore::in_memory();
        store
            .set_long(&option, -3)
            .expect("in-memory store never fails");

        let entry = SidebarEntryArray::with_option(
            "Theme",
            labels(&["a", "b"]),
            &store,
            option,
            "",
        );

        assert_eq!(entry.index(), 0);
    }

    #[test]
    fn debug_output_names_items_and_index() {
        let entry =
            SidebarEntryArray::new("Theme", labels(&["a", "b"]), |_| {}, 1, "");

        let debug = format!("{entry:?}");

        assert!(debug.starts_with("SidebarEntryArray {"));
        assert!(debug.contains("items: [\"a\", \"b\"]"));
        assert!(debug.contains("index: 1"));
        assert!(debug.ends_with(".. }"));
    }
}
