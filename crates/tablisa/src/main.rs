use eframe::{
    NativeOptions,
    egui::{ViewportBuilder, Visuals},
};
use tracing_subscriber::EnvFilter;

mod app;

const APP_TITLE: &str = "Tablisa";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_min_inner_size([640.0, 480.0])
            .with_inner_size([1000.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(Visuals::dark());
            Ok(Box::new(app::TablisaApp::new()))
        }),
    )
}
