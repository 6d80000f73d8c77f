//! CLI inspection entry point.
//!
//! # Responsibility
//! - Verify `resireg_core` linkage with a deterministic probe.
//! - Summarize a registry data file: counts and vacant rooms.
//!
//! Usage: `resireg_cli [config.json]`. Without a config the default data file
//! in the working directory is used.

use resireg_core::view::predicates::vacant_rooms;
use resireg_core::{
    init_logging, CoreConfig, ReadOnlyDataset, RegistryService, SqliteDatasetRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("resireg_core ping={}", resireg_core::ping());
    println!("resireg_core version={}", resireg_core::core_version());

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), Box<dyn Error>> {
    let config = match config_path {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(dir) = &config.log_dir {
        init_logging(config.log_level, &dir.to_string_lossy())?;
    }

    let conn = resireg_core::db::open_db(&config.data_file)?;
    let repo = SqliteDatasetRepository::try_new(&conn)?;
    let mut service = RegistryService::load_from(&repo)?;
    log::info!(
        "event=cli_inspect module=cli status=ok data_file={}",
        config.data_file.display()
    );

    let data = service.snapshot_view();
    println!("data_file={}", config.data_file.display());
    println!(
        "students={} rooms={} allocations={}",
        data.students().len(),
        data.rooms().len(),
        data.allocations().len()
    );

    service.update_room_filter(vacant_rooms());
    for room in service.filtered_rooms() {
        println!("vacant {room}");
    }
    Ok(())
}
