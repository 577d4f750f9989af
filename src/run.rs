pub(crate) mod cli;
pub(crate) mod tui;

pub(crate) use cli::as_cli;
pub(crate) use tui::as_tui;
