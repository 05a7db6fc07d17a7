use eframe::egui;
use std::path::PathBuf;

use socguide::page::PageSnapshot;
use socguide::storage::PreferenceStore;

mod app;
mod ui;

use app::GuideApp;

const SAMPLE_PAGE: &str = include_str!("../assets/sample_page.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let page_path = std::env::args().nth(1).map(PathBuf::from);
    let page = match &page_path {
        Some(path) => PageSnapshot::load(path)?,
        None => PageSnapshot::from_json(SAMPLE_PAGE)?,
    };

    let prefs = PreferenceStore::open(PreferenceStore::default_path()).unwrap_or_else(|e| {
        log::warn!("Preferences unavailable, using in-memory store: {}", e);
        PreferenceStore::in_memory()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SOC Analyst Guide")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SOC Analyst Guide",
        options,
        Box::new(move |cc| Ok(Box::new(GuideApp::new(cc, page, page_path, prefs)))),
    )?;

    Ok(())
}
