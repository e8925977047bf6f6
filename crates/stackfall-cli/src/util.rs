use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Routes `log` records to `path`.
///
/// The terminal belongs to the TUI while the game runs, so records never go to
/// stderr. Defaults to `debug`; `RUST_LOG` overrides the filter.
pub fn init_file_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
