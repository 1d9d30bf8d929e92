//! Fixed-row virtual list shared by scrollable panels.

use nxui_core::{
    AppContext, Button, Controller, DrawFrame, SoundEffect, ThemeEntry,
    TouchInfo, Vec4,
};

const SCROLLBAR_RADIUS: f32 = 2.0;

/// Selection change reported by [`ListView::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEvent {
    pub index: usize,
    /// The row was tapped rather than reached with the d-pad.
    pub touched: bool,
}

/// Window of `page` rows over a longer list.
///
/// Rows are laid out downwards from the template rectangle; the first
/// visible row follows the selection so it is always on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    row: Vec4,
    page: usize,
    top: usize,
    scrollbar: Vec4,
}

impl ListView {
    pub fn new(row: Vec4, page: usize) -> Self {
        Self {
            row,
            page: page.max(1),
            top: 0,
            scrollbar: Vec4::default(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Index of the first visible row.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Area covered by a full page of rows.
    pub fn area(&self) -> Vec4 {
        Vec4::new(
            self.row.x,
            self.row.y,
            self.row.w,
            self.row.h * self.page as f32,
        )
    }

    pub fn set_scrollbar(&mut self, track: Vec4) {
        self.scrollbar = track;
    }

    /// Move the window so `index` is visible.
    pub fn scroll_to(&mut self, index: usize, count: usize) {
        if index < self.top {
            self.top = index;
        } else if index >= self.top + self.page {
            self.top = index + 1 - self.page;
        }
        let max_top = count.saturating_sub(self.page);
        self.top = self.top.min(max_top);
    }

    /// Visible rows with their rectangles, top to bottom.
    pub fn rows(&self, count: usize) -> Vec<(usize, Vec4)> {
        let end = count.min(self.top + self.page);
        (self.top..end)
            .map(|index| {
                let slot = (index - self.top) as f32;
                let rect = Vec4::new(
                    self.row.x,
                    self.row.y + slot * self.row.h,
                    self.row.w,
                    self.row.h,
                );
                (index, rect)
            })
            .collect()
    }

    /// Translate d-pad presses and row taps into a new selection.
    pub fn update(
        &mut self,
        controller: &Controller,
        touch: &TouchInfo,
        index: usize,
        count: usize,
        ctx: &mut dyn AppContext,
    ) -> Option<ListEvent> {
        if count == 0 {
            return None;
        }

        if touch.is_clicked {
            let tapped = self
                .rows(count)
                .into_iter()
                .find(|(_, rect)| touch.in_range(rect))
                .map(|(index, _)| index);
            if let Some(index) = tapped {
                self.scroll_to(index, count);
                return Some(ListEvent {
                    index,
                    touched: true,
                });
            }
            return None;
        }

        let next = if controller.got_down(Button::ANY_DOWN) {
            index.checked_add(1).filter(|next| *next < count)
        } else if controller.got_down(Button::ANY_UP) {
            index.checked_sub(1)
        } else {
            return None;
        };

        match next {
            Some(next) => {
                ctx.play_sound(SoundEffect::Scroll);
                self.scroll_to(next, count);
                Some(ListEvent {
                    index: next,
                    touched: false,
                })
            },
            None => {
                ctx.play_sound(SoundEffect::Limit);
                None
            },
        }
    }

    pub fn draw_scrollbar(&self, frame: &mut DrawFrame<'_>, count: usize) {
        if count <= self.page {
            return;
        }

        let track = self.scrollbar;
        let thumb_h = track.h * self.page as f32 / count as f32;
        let thumb_y = track.y + track.h * self.top as f32 / count as f32;
        let colour = frame.colour(ThemeEntry::Scrollbar);
        frame.renderer.draw_rect(
            Vec4::new(track.x, thumb_y, track.w, thumb_h),
            colour,
            SCROLLBAR_RADIUS,
        );
    }
}
