mod containers;
mod format;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use models::Session;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let data_dir = get_data_dir()?;
    init_logging(&data_dir.join("billtui.log"))?;

    let mut store = store::SqliteStore::open(
        &data_dir.join("billtui.db"),
        &data_dir.join("receipts"),
    )?;
    let session_path = data_dir.join("user.json");

    match args.len() {
        1 => match Session::load(&session_path)? {
            Some(session) => run::as_tui(&mut store, session),
            None => {
                eprintln!("Aucune session active.");
                eprintln!("Connectez-vous d'abord: billtui login <email>");
                Ok(())
            }
        },
        _ => run::as_cli(&args, &mut store, &session_path),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "billtui", "BillTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Logs go to a file under the data directory. The terminal is owned by the
/// TUI, so nothing is ever written to stderr while it runs.
fn init_logging(log_path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}
