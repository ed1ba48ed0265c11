//! Vector tank demo — W/S to drive, A/D to turn, Escape to quit.
//!
//! Usage: `vector-tank [config.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use vector_tank::app;
use vector_tank::config::DemoConfig;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match DemoConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => DemoConfig::default(),
    };

    match app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
