mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::Context;
use app::LaunchboardApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded at startup when no path is given on the command line.
const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut state = AppState::default();

    // An explicit path, or the default file when it exists. A load failure
    // here is fatal: the window never opens over a broken dataset.
    let path = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        let default = Path::new(DEFAULT_DATASET);
        default.exists().then(|| default.to_path_buf())
    });

    match path {
        Some(path) => {
            let dataset = data::loader::load_file(&path)
                .with_context(|| format!("loading dataset {}", path.display()))?;
            log::info!(
                "Loaded {} launch records from {}",
                dataset.len(),
                path.display()
            );
            state.set_dataset(dataset);
        }
        None => {
            log::warn!("{DEFAULT_DATASET} not found, starting without a dataset");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 850.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launchboard – Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
