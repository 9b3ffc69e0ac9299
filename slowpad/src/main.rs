//! slowPad - a minimal plain-text notepad for the Slow Computer
//!
//! Usage: `slowpad [locale]`, where the optional locale (`en`, `ru`,
//! `ru_RU.UTF-8`, ...) overrides the system one.

mod app;
mod clipboard;
mod command;
mod dialogs;
mod document;
mod locale;
mod print;
mod settings;
mod state;

use app::SlowPadApp;
use clipboard::SystemClipboard;
use eframe::NativeOptions;
use locale::Locale;
use padcore::storage::{config_dir, RecentFiles};
use padcore::SlowTheme;
use settings::{Settings, APP_ID};
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let locale = Locale::detect(std::env::args().nth(1));
    let settings = Settings::load(Settings::default_path());
    let geometry = settings.window;
    info!(?locale, config = %settings.path().display(), "starting slowPad");

    let recent_path = config_dir(APP_ID).join("recent.json");
    let recent = RecentFiles::load(&recent_path).unwrap_or_default();
    let state = AppState::new(settings, locale.strings(), Box::new(SystemClipboard::new()))
        .with_recent(recent, recent_path);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([geometry.width as f32, geometry.height as f32])
            .with_position([geometry.x as f32, geometry.y as f32])
            .with_min_inner_size([320.0, 200.0])
            .with_title(state.title()),
        ..Default::default()
    };

    eframe::run_native(
        "slowPad",
        options,
        Box::new(move |cc| {
            SlowTheme::default().apply(&cc.egui_ctx);
            Box::new(SlowPadApp::new(cc, state))
        }),
    )
}
