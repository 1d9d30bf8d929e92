use nxui_core::{
    Action, ActionType, AppContext, Button, Controller, DrawFrame, SCREEN_HEIGHT,
    SCREEN_WIDTH, TextAlign, ThemeEntry, TouchInfo, Vec2, Vec4, Widget,
};

use crate::entry::{EntryLayout, SidebarEntry};
use crate::list::ListView;

const SIDEBAR_WIDTH: f32 = 450.0;
const DIVIDER_TOP_Y: f32 = 86.0;
const DIVIDER_BOTTOM_Y: f32 = 646.0;
const DIVIDER_INSET: f32 = 15.0;
const TITLE_Y: f32 = 40.0;
const TITLE_FONT_SIZE: f32 = 28.0;
const SUBTITLE_FONT_SIZE: f32 = 16.0;
const CONTENT_PAD_X: f32 = 30.0;
const ROW_Y: f32 = 170.0;
const ROW_HEIGHT: f32 = 70.0;
const PAGE_ROWS: usize = 6;
const HINT_INSET_X: f32 = 60.0;
const HINT_Y: f32 = 675.0;
const SCROLLBAR_INSET_X: f32 = 20.0;
const SCROLLBAR_Y: f32 = 160.0;
const SCROLLBAR_WIDTH: f32 = 2.0;
const SCROLLBAR_HEIGHT: f32 = 438.0;

/// Screen edge a sidebar is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Full-height panel listing focusable entries.
///
/// The sidebar owns its entries and mirrors the focused entry's bindings in
/// its own widget, with B always bound to closing the panel.
pub struct Sidebar {
    widget: Widget,
    title: String,
    subtitle: String,
    side: Side,
    entries: Vec<Box<dyn SidebarEntry>>,
    index: usize,
    top_bar: Vec4,
    bottom_bar: Vec4,
    title_pos: Vec2,
    list: ListView,
}

impl Sidebar {
    pub fn new(title: impl Into<String>, side: Side) -> Self {
        Self::with_subtitle(title, String::new(), side)
    }

    pub fn with_subtitle(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        side: Side,
    ) -> Self {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => SCREEN_WIDTH - SIDEBAR_WIDTH,
        };
        let pos = Vec4::new(x, 0.0, SIDEBAR_WIDTH, SCREEN_HEIGHT);

        let mut widget = Widget::new();
        widget.set_pos(pos);
        widget.set_ui_button_pos(Vec2::new(pos.right() - HINT_INSET_X, HINT_Y));

        let divider_w = pos.w - DIVIDER_INSET * 2.0;
        let mut list = ListView::new(
            Vec4::new(
                x + CONTENT_PAD_X,
                ROW_Y,
                pos.w - CONTENT_PAD_X * 2.0,
                ROW_HEIGHT,
            ),
            PAGE_ROWS,
        );
        list.set_scrollbar(Vec4::new(
            pos.right() - SCROLLBAR_INSET_X,
            SCROLLBAR_Y,
            SCROLLBAR_WIDTH,
            SCROLLBAR_HEIGHT,
        ));

        let mut sidebar = Self {
            widget,
            title: title.into(),
            subtitle: subtitle.into(),
            side,
            entries: Vec::new(),
            index: 0,
            top_bar: Vec4::new(x + DIVIDER_INSET, DIVIDER_TOP_Y, divider_w, 1.0),
            bottom_bar: Vec4::new(
                x + DIVIDER_INSET,
                DIVIDER_BOTTOM_Y,
                divider_w,
                1.0,
            ),
            title_pos: Vec2::new(x + CONTENT_PAD_X, TITLE_Y),
            list,
        };
        sidebar.setup_buttons();
        sidebar
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&dyn SidebarEntry> {
        self.entries.get(index).map(|entry| entry.as_ref())
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut dyn SidebarEntry> {
        match self.entries.get_mut(index) {
            Some(entry) => Some(entry.as_mut()),
            None => None,
        }
    }

    pub fn should_pop(&self) -> bool {
        self.widget.should_pop()
    }

    /// Append an entry. The first one added takes focus.
    pub fn add<E>(&mut self, entry: E) -> &mut dyn SidebarEntry
    where
        E: SidebarEntry + 'static,
    {
        let mut entry: Box<dyn SidebarEntry> = Box::new(entry);
        let slot = self.entries.len();
        let row = self.list.area();
        entry.base_mut().widget_mut().set_pos(Vec4::new(
            row.x,
            row.y + slot as f32 * ROW_HEIGHT,
            row.w,
            ROW_HEIGHT,
        ));

        if self.entries.is_empty() {
            entry.on_focus_gained();
            self.entries.push(entry);
            self.setup_buttons();
        } else {
            self.entries.push(entry);
        }

        self.entries[slot].as_mut()
    }

    /// Move focus to `index`. The current index and out-of-range indices are
    /// ignored.
    pub fn set_index(&mut self, index: usize) {
        if index == self.index {
            return;
        }
        if index >= self.entries.len() {
            log::warn!(
                "sidebar {}: index {index} out of range for {} entries",
                self.title,
                self.entries.len()
            );
            return;
        }

        log::debug!("sidebar {}: focus {} -> {index}", self.title, self.index);
        if let Some(entry) = self.entries.get_mut(self.index) {
            entry.on_focus_lost();
        }
        self.index = index;
        self.entries[index].on_focus_gained();
        self.setup_buttons();
        self.list.scroll_to(index, self.entries.len());
    }

    fn setup_buttons(&mut self) {
        self.widget.remove_actions();
        if let Some(entry) = self.entries.get(self.index) {
            for (button, action) in entry.base().widget().actions() {
                self.widget.set_action(button, action.clone());
            }
        }

        let pop = self.widget.pop_handle();
        self.widget
            .set_action(Button::B, Action::new("Back", move |_| pop.request()));
    }

    pub fn update(
        &mut self,
        controller: &Controller,
        touch: &TouchInfo,
        ctx: &mut dyn AppContext,
    ) {
        self.widget.update(controller, touch, ctx);

        if touch.is_clicked && !touch.in_range(&self.widget.pos()) {
            log::debug!("sidebar {}: tap outside, leaving", self.title);
            ctx.pop_to_menu();
        } else {
            let event = self.list.update(
                controller,
                touch,
                self.index,
                self.entries.len(),
                ctx,
            );
            if let Some(event) = event {
                self.set_index(event.index);
                if event.touched {
                    self.widget.fire_action(Button::A, ActionType::DOWN, ctx);
                }
            }
        }

        let entry_pops = self
            .entries
            .get(self.index)
            .is_some_and(|entry| entry.base().widget().should_pop());
        if entry_pops {
            self.widget.set_pop();
        }
    }

    pub fn draw(&mut self, frame: &mut DrawFrame<'_>) {
        if self.widget.is_hidden() {
            return;
        }

        let pos = self.widget.pos();
        frame.rect(pos, ThemeEntry::Sidebar);

        let i18n = frame.i18n;
        frame.text(
            self.title_pos,
            TITLE_FONT_SIZE,
            TextAlign::LEFT | TextAlign::TOP,
            ThemeEntry::Text,
            i18n.get(&self.title),
        );
        if !self.subtitle.is_empty() {
            frame.text(
                Vec2::new(
                    pos.right() - CONTENT_PAD_X,
                    self.title_pos.y + 10.0,
                ),
                SUBTITLE_FONT_SIZE,
                TextAlign::TOP | TextAlign::RIGHT,
                ThemeEntry::TextInfo,
                i18n.get(&self.subtitle),
            );
        }

        frame.rect(self.top_bar, ThemeEntry::Line);
        frame.rect(self.bottom_bar, ThemeEntry::Line);

        self.widget.draw(frame);

        let count = self.entries.len();
        let layout = EntryLayout {
            root: pos,
            side: self.side,
        };
        for (index, row) in self.list.rows(count) {
            if index + 1 < count {
                frame.rect(
                    Vec4::new(row.x, row.bottom(), row.w, 1.0),
                    ThemeEntry::LineSeparator,
                );
            }
            let entry = &mut self.entries[index];
            entry.base_mut().widget_mut().set_y(row.y);
            entry.draw(frame, &layout);
        }

        self.list.draw_scrollbar(frame, count);
    }

    pub fn on_focus_gained(&mut self) {
        self.widget.set_hidden(false);
        self.widget.on_focus_gained();
    }

    pub fn on_focus_lost(&mut self) {
        self.widget.set_hidden(true);
        self.widget.on_focus_lost();
    }
}
