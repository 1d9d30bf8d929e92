//! Shared state and drawing for sidebar rows.

use std::cell::Cell;
use std::rc::Rc;

use nxui_core::{DrawFrame, TextAlign, ThemeEntry, Vec2, Vec4, Widget};

use crate::marquee::ScrollingText;
use crate::sidebar::Side;

pub(crate) const ENTRY_FONT_SIZE: f32 = 20.0;
pub(crate) const ENTRY_PAD_X: f32 = 15.0;
const FOCUS_OUTLINE: f32 = 4.0;

const INFO_BOX_Y: f32 = 86.0;
const INFO_BOX_W: f32 = 400.0;
const INFO_BOX_GAP: f32 = 10.0;
const INFO_PAD: f32 = 30.0;
const INFO_TITLE_FONT_SIZE: f32 = 18.0;
const INFO_FONT_SIZE: f32 = 18.0;
const INFO_LINE_HEIGHT: f32 = 1.7;

/// Where the owning sidebar sits, used to place the info panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryLayout {
    pub root: Vec4,
    pub side: Side,
}

/// Row behaviour the sidebar dispatches to.
///
/// Bindings live in the entry's [`Widget`]; the sidebar copies them into its
/// own table whenever the entry gains focus.
pub trait SidebarEntry {
    fn base(&self) -> &EntryBase;

    fn base_mut(&mut self) -> &mut EntryBase;

    fn draw(&mut self, frame: &mut DrawFrame<'_>, layout: &EntryLayout);

    fn on_focus_gained(&mut self) {
        self.base_mut().on_focus_gained();
    }

    fn on_focus_lost(&mut self) {
        self.base_mut().on_focus_lost();
    }
}

/// Title, info text, enabled state and bindings common to every entry.
#[derive(Debug)]
pub struct EntryBase {
    widget: Widget,
    title: String,
    info: String,
    depends_info: String,
    enabled: Rc<Cell<bool>>,
    scrolling_title: ScrollingText,
}

impl EntryBase {
    pub fn new(title: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            widget: Widget::new(),
            title: title.into(),
            info: info.into(),
            depends_info: String::new(),
            enabled: Rc::new(Cell::new(true)),
            scrolling_title: ScrollingText::default(),
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    /// Text shown in the info panel while the entry is disabled, usually
    /// naming the option it depends on.
    pub fn depends_info(&self) -> &str {
        &self.depends_info
    }

    pub fn set_depends_info(&mut self, info: impl Into<String>) {
        self.depends_info = info.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Shared enabled state. The entry's own actions check it before
    /// acting; other entries may hold it to enable or disable this one.
    pub fn enabled_flag(&self) -> Rc<Cell<bool>> {
        self.enabled.clone()
    }

    pub fn has_focus(&self) -> bool {
        self.widget.has_focus()
    }

    pub fn pos(&self) -> Vec4 {
        self.widget.pos()
    }

    pub fn on_focus_gained(&mut self) {
        self.widget.on_focus_gained();
    }

    pub fn on_focus_lost(&mut self) {
        self.widget.on_focus_lost();
        self.scrolling_title.reset();
    }

    fn active_info(&self) -> &str {
        if self.is_enabled() {
            &self.info
        } else {
            &self.depends_info
        }
    }

    pub(crate) fn title_colour(&self) -> ThemeEntry {
        if self.is_enabled() {
            ThemeEntry::Text
        } else {
            ThemeEntry::TextInfo
        }
    }

    /// Vertical centre line of the row, where its text is anchored.
    pub(crate) fn text_anchor_y(&self) -> f32 {
        let pos = self.pos();
        pos.y + pos.h / 2.0
    }

    pub(crate) fn draw_title(&self, frame: &mut DrawFrame<'_>) {
        let pos = self.pos();
        let i18n = frame.i18n;
        frame.text(
            Vec2::new(pos.x + ENTRY_PAD_X, self.text_anchor_y()),
            ENTRY_FONT_SIZE,
            TextAlign::LEFT | TextAlign::MIDDLE,
            self.title_colour(),
            i18n.get(&self.title),
        );
    }

    /// Focus outline plus, when there is something to say, the info panel
    /// beside the sidebar.
    pub fn draw(&mut self, frame: &mut DrawFrame<'_>, layout: &EntryLayout) {
        if !self.has_focus() {
            return;
        }

        let outline = frame.colour(ThemeEntry::Selected);
        frame
            .renderer
            .draw_rect_outline(self.pos(), FOCUS_OUTLINE, outline);

        if self.active_info().is_empty() {
            return;
        }

        // The panel lies outside the sidebar, so lift the row clip.
        frame.renderer.save();
        frame.renderer.scissor(Vec4::screen());

        let x = match layout.side {
            Side::Left => layout.root.right() + INFO_BOX_GAP,
            Side::Right => layout.root.x - INFO_BOX_W - INFO_BOX_GAP,
        };
        let pad_after_title = INFO_TITLE_FONT_SIZE + INFO_PAD;
        let text_x = x + INFO_PAD;
        let text_w = INFO_BOX_W - INFO_PAD * 2.0;

        let info = if self.enabled.get() {
            &self.info
        } else {
            &self.depends_info
        };
        let text_h = frame.renderer.text_box_height(
            INFO_FONT_SIZE,
            INFO_LINE_HEIGHT,
            text_w,
            info,
        );
        let info_box = Vec4::new(
            x,
            INFO_BOX_Y,
            INFO_BOX_W,
            pad_after_title + INFO_PAD * 2.0 + text_h,
        );
        let background = frame.colour(ThemeEntry::Sidebar);
        frame.renderer.draw_rect(info_box, background, 5.0);

        let mut y = info_box.y + INFO_PAD;
        self.scrolling_title.draw(
            frame,
            true,
            Vec2::new(text_x, y),
            text_w,
            INFO_TITLE_FONT_SIZE,
            TextAlign::LEFT | TextAlign::TOP,
            ThemeEntry::Text,
            &self.title,
        );

        y += pad_after_title;
        let colour = frame.colour(ThemeEntry::Text);
        frame.renderer.draw_text_box(
            Vec2::new(text_x, y),
            INFO_FONT_SIZE,
            INFO_LINE_HEIGHT,
            text_w,
            colour,
            info,
        );

        frame.renderer.restore();
    }
}

/// Entry that only shows its title and info text.
#[derive(Debug)]
pub struct SidebarEntryInfo {
    base: EntryBase,
}

impl SidebarEntryInfo {
    pub fn new(title: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            base: EntryBase::new(title, info),
        }
    }
}

impl SidebarEntry for SidebarEntryInfo {
    fn base(&self) -> &EntryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntryBase {
        &mut self.base
    }

    fn draw(&mut self, frame: &mut DrawFrame<'_>, layout: &EntryLayout) {
        self.base.draw(frame, layout);
        self.base.draw_title(frame);
    }
}

#[cfg(test)]
mod tests {
    use nxui_core::headless::{DrawCommand, DrawRecorder};
    use nxui_core::{I18n, TextScrollSpeed, Theme};

    use super::*;

    fn draw(entry: &mut dyn SidebarEntry, side: Side) -> DrawRecorder {
        let mut recorder = DrawRecorder::new();
        let theme = Theme::default();
        let i18n = I18n::default();
        let mut frame = DrawFrame::new(
            &mut recorder,
            &theme,
            &i18n,
            TextScrollSpeed::Normal,
        );
        let layout = EntryLayout {
            root: Vec4::new(830.0, 0.0, 450.0, 720.0),
            side,
        };
        entry.draw(&mut frame, &layout);
        recorder
    }

    fn panel(recorder: &DrawRecorder) -> Option<Vec4> {
        recorder.commands().iter().find_map(|command| match command {
            DrawCommand::Rect { rect, radius, .. } if *radius == 5.0 => {
                Some(*rect)
            },
            _ => None,
        })
    }

    #[test]
    fn given_unfocused_entry_when_drawn_then_no_outline_or_panel() {
        let mut entry = SidebarEntryInfo::new("Title", "Some info");

        let recorder = draw(&mut entry, Side::Right);

        assert!(panel(&recorder).is_none());
        assert!(
            !recorder
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Outline { .. }))
        );
        assert!(recorder.has_text("Title"));
    }

    #[test]
    fn given_right_sidebar_when_focused_then_panel_opens_to_the_left() {
        let mut entry = SidebarEntryInfo::new("Title", "Some info");
        entry.on_focus_gained();

        let recorder = draw(&mut entry, Side::Right);

        let panel = panel(&recorder).expect("info panel should be drawn");
        assert_eq!(panel.x, 830.0 - 400.0 - 10.0);
        assert_eq!(panel.y, 86.0);
        assert_eq!(panel.w, 400.0);
        // One wrapped line of 18px text at line height 1.7.
        assert!((panel.h - (48.0 + 60.0 + 18.0 * 1.7)).abs() < 1e-3);
        assert!(
            recorder
                .commands()
                .contains(&DrawCommand::Scissor(Vec4::screen()))
        );
    }

    #[test]
    fn given_left_sidebar_when_focused_then_panel_opens_to_the_right() {
        let mut entry = SidebarEntryInfo::new("Title", "Some info");
        entry.on_focus_gained();
        let mut recorder = DrawRecorder::new();
        let theme = Theme::default();
        let i18n = I18n::default();
        let mut frame = DrawFrame::new(
            &mut recorder,
            &theme,
            &i18n,
            TextScrollSpeed::Normal,
        );
        let layout = EntryLayout {
            root: Vec4::new(0.0, 0.0, 450.0, 720.0),
            side: Side::Left,
        };

        entry.draw(&mut frame, &layout);

        assert_eq!(panel(&recorder).map(|p| p.x), Some(460.0));
    }

    #[test]
    fn given_disabled_entry_when_focused_then_dependency_info_is_shown() {
        let mut entry = SidebarEntryInfo::new("Title", "Normal info");
        entry.base_mut().set_depends_info("Requires networking");
        entry.base().set_enabled(false);
        entry.on_focus_gained();

        let recorder = draw(&mut entry, Side::Right);

        let boxed: Vec<&str> = recorder
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::TextBox { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(boxed, vec!["Requires networking"]);
        let dimmed = Theme::default().colour(ThemeEntry::TextInfo);
        assert!(
            recorder
                .texts()
                .any(|(text, colour)| text == "Title" && colour == dimmed)
        );
    }

    #[test]
    fn given_focused_entry_without_info_when_drawn_then_only_outline_is_drawn() {
        let mut entry = SidebarEntryInfo::new("Title", "");
        entry.on_focus_gained();

        let recorder = draw(&mut entry, Side::Left);

        assert!(panel(&recorder).is_none());
        assert!(
            recorder
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Outline { .. }))
        );
    }
}
