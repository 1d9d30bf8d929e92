use std::cell::Cell;
use std::rc::Rc;

use nxui_core::options::TEXT_SCROLL_SPEED;
use nxui_core::{OptionBool, OptionLong, OptionStore, TextScrollSpeed};
use nxui_ui_sidebar::{
    Side, Sidebar, SidebarEntry, SidebarEntryArray, SidebarEntryBool,
    SidebarEntryCallback, SidebarEntryInfo,
};

pub const SCROLL_SPEED_LABELS: [&str; 3] = ["Slow", "Normal", "Fast"];

/// Settings sidebar exercising every entry kind.
pub fn settings_sidebar(options: &OptionStore) -> Sidebar {
    let mut sidebar = Sidebar::with_subtitle(
        "Settings",
        env!("CARGO_PKG_VERSION"),
        Side::Right,
    );

    let music = OptionBool::new("theme_music", true);
    sidebar.add(SidebarEntryBool::with_option_callback(
        "Theme music",
        options,
        music,
        |enabled| log::info!("theme music enabled: {enabled}"),
        "Play background music while browsing.",
    ));

    let mut hidden_files = SidebarEntryBool::with_storage(
        "Hidden files",
        Rc::new(Cell::new(false)),
        "Show entries whose name starts with a dot.",
    )
    .with_labels("Shown", "Hidden");
    hidden_files
        .base_mut()
        .set_depends_info("Requires the file browser.");

    // Hidden files only make sense while the file browser is on.
    let browser = OptionBool::new("file_browser", true);
    let hidden_enabled = hidden_files.base().enabled_flag();
    hidden_enabled.set(options.get_bool(&browser));
    sidebar.add(SidebarEntryBool::with_option_callback(
        "File browser",
        options,
        browser,
        move |enabled| hidden_enabled.set(enabled),
        "Browse the SD card from the main menu.",
    ));
    sidebar.add(hidden_files);

    let speed = OptionLong::new(
        TEXT_SCROLL_SPEED,
        TextScrollSpeed::default().index(),
    );
    sidebar.add(SidebarEntryArray::with_option_callback(
        "Text scroll speed",
        SCROLL_SPEED_LABELS.iter().map(|label| label.to_string()).collect(),
        options,
        speed,
        |index| {
            let label = SCROLL_SPEED_LABELS[index];
            log::info!("text scroll speed set to {label}");
        },
        "How fast long titles scroll while selected.",
    ));

    sidebar.add(SidebarEntryInfo::new(
        "About",
        "Sidebar demo driven by scripted controller input.",
    ));

    sidebar.add(SidebarEntryCallback::with_pop(
        "Back to menu",
        |ctx| ctx.pop_to_menu(),
        true,
        "",
    ));

    sidebar
}

#[cfg(test)]
mod tests {
    use nxui_core::headless::HeadlessApp;
    use nxui_core::{AppContext, Button, Controller, TouchInfo};

    use super::*;

    const BROWSER_ROW: usize = 1;
    const HIDDEN_FILES_ROW: usize = 2;
    const SPEED_ROW: usize = 3;
    const BACK_ROW: usize = 5;

    fn press(sidebar: &mut Sidebar, app: &mut HeadlessApp, button: Button) {
        sidebar.update(&Controller::pressed(button), &TouchInfo::default(), app);
    }

    fn hidden_files_enabled(sidebar: &Sidebar) -> bool {
        sidebar
            .entry(HIDDEN_FILES_ROW)
            .is_some_and(|entry| entry.base().is_enabled())
    }

    #[test]
    fn given_settings_sidebar_when_built_then_first_row_is_focused() {
        let sidebar = settings_sidebar(&OptionStore::in_memory());

        assert_eq!(sidebar.len(), 6);
        assert_eq!(sidebar.index(), 0);
        assert!(sidebar.widget().has_action(Button::A));
    }

    #[test]
    fn given_last_row_when_pressed_then_menu_and_sidebar_pop() {
        let mut app = HeadlessApp::new();
        let mut sidebar = settings_sidebar(app.options());

        sidebar.set_index(BACK_ROW);
        press(&mut sidebar, &mut app, Button::A);

        assert_eq!(app.pops_to_menu(), 1);
        assert!(sidebar.should_pop());
    }

    #[test]
    fn given_speed_row_when_choice_confirmed_then_scroll_speed_is_stored() {
        let mut app = HeadlessApp::new();
        let mut sidebar = settings_sidebar(app.options());
        assert_eq!(app.text_scroll_speed(), TextScrollSpeed::Normal);

        sidebar.set_index(SPEED_ROW);
        press(&mut sidebar, &mut app, Button::A);
        let picker = app.take_picker().expect("speed row opens a picker");
        assert_eq!(picker.index, 1);
        picker.confirm(&mut app, Some(2));

        assert_eq!(app.text_scroll_speed(), TextScrollSpeed::Fast);

        sidebar.set_index(SPEED_ROW);
        press(&mut sidebar, &mut app, Button::A);
        let picker = app.take_picker().expect("speed row opens a picker");
        assert_eq!(picker.index, 2);
    }

    #[test]
    fn given_browser_turned_off_when_toggled_then_hidden_files_is_disabled() {
        let mut app = HeadlessApp::new();
        let mut sidebar = settings_sidebar(app.options());
        assert!(hidden_files_enabled(&sidebar));

        sidebar.set_index(BROWSER_ROW);
        press(&mut sidebar, &mut app, Button::A);
        assert!(!hidden_files_enabled(&sidebar));

        press(&mut sidebar, &mut app, Button::A);
        assert!(hidden_files_enabled(&sidebar));
    }

    #[test]
    fn given_browser_stored_off_when_built_then_hidden_files_starts_disabled() {
        let mut store = OptionStore::in_memory();
        store
            .set_bool(&OptionBool::new("file_browser", true), false)
            .expect("in-memory store never fails");
        assert!(!hidden_files_enabled(&settings_sidebar(&store)));
    }
}
