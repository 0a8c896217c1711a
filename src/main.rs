use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lifecanvas::app::App;
use lifecanvas::config::Config;
use lifecanvas::scheduler::FrameScheduler;
use lifecanvas::universe::UniverseFactory;

use term::TerminalHost;

mod events;
mod io;
mod term;

/// How often the terminal is redrawn. Ticks happen at most this often.
const FRAMETIME: Duration = Duration::new(0, 1_000_000_000u32 / 60);

fn main() -> anyhow::Result<()> {
    // the terminal belongs to the board, so logs go to stderr (redirect it to keep them)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = Config::path_from_env();
    let config = Config::load(path.as_deref()).context("Failed to load config")?;
    let rules = config.rules().context("Failed to parse rules")?;

    let mut app = App::new(&config, UniverseFactory::new(rules, config.seed));

    let mut host = TerminalHost::new(FRAMETIME).context("Failed to set up the terminal")?;
    let mut scheduler = FrameScheduler::new(Instant::now());

    scheduler.run(&mut app, &mut host)
}
