mod demo;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::Env;
use nxui_core::headless::{DrawRecorder, HeadlessApp};
use nxui_core::options::{LoadStatus, default_config_dir};
use nxui_core::{
    AppContext, Button, Controller, DrawFrame, I18n, OptionStore, Theme,
};
use serde_json::json;

const OPTIONS_FILE: &str = "options.json";
const I18N_FILE: &str = "i18n.json";
const THEME_FILE: &str = "theme.json";

/// Usage: `nxui [config-dir] [script.json]`
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let config_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_dir);
    let frames = match args.next() {
        Some(path) => script::load(&PathBuf::from(path))?,
        None => script::builtin(),
    };

    let (options, status) = OptionStore::open(config_dir.join(OPTIONS_FILE))
        .context("opening option store")?;
    match status {
        LoadStatus::Loaded => {
            log::info!("options loaded from {}", config_dir.display())
        },
        LoadStatus::Missing => log::info!("no options file, using defaults"),
        LoadStatus::Invalid(reason) => {
            log::warn!("options file unreadable, using defaults: {reason}")
        },
    }
    let i18n = I18n::load(&config_dir.join(I18N_FILE))
        .context("loading translations")?;
    let theme =
        Theme::load(&config_dir.join(THEME_FILE)).context("loading theme")?;

    let mut app = HeadlessApp::new()
        .with_options(options)
        .with_i18n(i18n.clone());
    let mut sidebar = demo::settings_sidebar(app.options());
    sidebar.on_focus_gained();

    let mut held = Button::empty();
    let mut report = Vec::with_capacity(frames.len());
    for (frame_no, frame) in frames.iter().enumerate() {
        let current = frame.held()?;
        let controller = Controller::from_held(held, current);
        held = current;

        sidebar.update(&controller, &frame.touch(), &mut app);

        // Nothing shows the picker, so accept the row after the current one.
        if let Some(picker) = app.take_picker() {
            let choice = (picker.index + 1) % picker.items.len().max(1);
            log::info!("picker {:?}: choosing {choice}", picker.title);
            picker.confirm(&mut app, Some(choice));
        }

        let mut recorder = DrawRecorder::new();
        let speed = app.text_scroll_speed();
        let mut draw = DrawFrame::new(&mut recorder, &theme, &i18n, speed);
        sidebar.draw(&mut draw);

        let texts: Vec<&str> =
            recorder.texts().map(|(text, _)| text).collect();
        log::debug!(
            "frame {frame_no}: {} draw commands",
            recorder.commands().len()
        );
        report.push(json!({
            "frame": frame_no,
            "focus": sidebar.index(),
            "texts": texts,
        }));

        if sidebar.should_pop() || app.pops_to_menu() > 0 {
            log::info!("sidebar closed after frame {frame_no}");
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
