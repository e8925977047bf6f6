use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use rand::Rng as _;
use stackfall_engine::PieceSeed;

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece generator (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Write debug logs to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Print the final game statistics as JSON on exit
    #[clap(long)]
    pub(crate) summary: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        log_file,
        summary,
    } = arg;

    if let Some(path) = log_file {
        util::init_file_logger(path)?;
    }

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("piece seed: {seed}");

    let mut app = PlayApp::new(seed);
    Tui::new().run(&mut app)?;

    if *summary {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, app.stats())
            .context("Failed to write game summary")?;
        writeln!(stdout).context("Failed to write game summary")?;
    }

    Ok(())
}
