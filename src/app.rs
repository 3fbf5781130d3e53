use std::path::PathBuf;

use crate::config::config::*;
use crate::ui::editor::ConfigEditorApp;

pub fn run() {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };

    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| {
            let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let mut app = ConfigEditorApp::new(base_dir);
            app.init(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    );

    // Manejo de errores silencioso en release
    if let Err(_e) = result {
        #[cfg(debug_assertions)]
        eprintln!("Error al iniciar la aplicación: {}", _e);

        // En release, salimos silenciosamente
        #[cfg(not(debug_assertions))]
        std::process::exit(1);
    }
}
