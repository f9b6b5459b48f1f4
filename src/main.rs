mod app;
mod constants;
mod controls;
mod math;
mod render;
mod scene;
mod types;

use app::App;
use constants::*;
use eframe::egui::{Vec2, ViewportBuilder};
use eframe::{run_native, NativeOptions, Result};

fn main() -> Result {
    env_logger::init();

    let width = GUI_VIEWPORT_WIDTH + GUI_SIDEBAR_WIDTH + GUI_VIEWPORT_PADDING * 2.0;
    let height = GUI_VIEWPORT_HEIGHT + GUI_VIEWPORT_PADDING * 2.0;

    let options = NativeOptions {
        viewport: ViewportBuilder {
            inner_size: Some(Vec2::new(width, height)),
            ..Default::default()
        },
        ..Default::default()
    };

    run_native(
        "Vector Visualizer",
        options,
        Box::new(|_cc| Ok(Box::<App>::default())),
    )
}
