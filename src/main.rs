mod agg;
mod app;
mod cli;
mod color;
mod event;
mod identity;
mod store;
mod tui;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let store = store::Store::open(&store::default_store_path())?;
    let cli_opts = cli::Cli::parse();
    if let Some(command) = cli_opts.command {
        return cli::run(command, &store);
    }

    let mut app = app::App::new(store);
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
