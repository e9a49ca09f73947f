//! Lazy Tree Demo
//!
//! A small desktop app exercising the egui_lazytree widget against a
//! pretend backend that serves children with one second of latency.

mod app;
mod theme;

use eframe::egui;
use tracing_subscriber;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_title("Lazy Tree Demo"),
        persist_window: true, // Persist window state and egui memory between sessions
        ..Default::default()
    };

    eframe::run_native(
        "Lazy Tree Demo",
        options,
        Box::new(|cc| Ok(Box::new(app::DemoApp::new(cc)))),
    )
}
