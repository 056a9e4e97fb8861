mod app;
pub mod profiling;

pub use app::PrismaticViewer;

/// Run the interactive viewer
pub fn run() -> Result<(), eframe::Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title("Prismatic Ray Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Prismatic Ray Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(PrismaticViewer::new()))),
    )
}
