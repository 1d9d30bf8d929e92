use std::cell::RefCell;
use std::fmt;

use nxui_core::{Action, AppContext, Button, DrawFrame};

use crate::entry::{EntryBase, EntryLayout, SidebarEntry};

/// Row that runs a closure when A is pressed.
pub struct SidebarEntryCallback {
    base: EntryBase,
    pop_on_click: bool,
}

impl SidebarEntryCallback {
    pub fn new(
        title: impl Into<String>,
        callback: impl FnMut(&mut dyn AppContext) + 'static,
        info: impl Into<String>,
    ) -> Self {
        Self::with_pop(title, callback, false, info)
    }

    /// With `pop_on_click`, the entry asks its sidebar to close after the
    /// closure has run.
    pub fn with_pop(
        title: impl Into<String>,
        callback: impl FnMut(&mut dyn AppContext) + 'static,
        pop_on_click: bool,
        info: impl Into<String>,
    ) -> Self {
        let mut base = EntryBase::new(title, info);

        let enabled = base.enabled_flag();
        let pop = base.widget().pop_handle();
        let callback = RefCell::new(callback);
        base.widget_mut().set_action(
            Button::A,
            Action::new("OK", move |ctx| {
                if !enabled.get() {
                    return;
                }
                (callback.borrow_mut())(ctx);
                if pop_on_click {
                    pop.request();
                }
            }),
        );

        Self { base, pop_on_click }
    }

    pub fn pops_on_click(&self) -> bool {
        self.pop_on_click
    }
}

impl fmt::Debug for SidebarEntryCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarEntryCallback")
            .field("title", &self.base.title())
            .field("pop_on_click", &self.pop_on_click)
            .finish_non_exhaustive()
    }
}

impl SidebarEntry for SidebarEntryCallback {
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
