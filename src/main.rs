// mserve: a zero-configuration personal media server
// main entry point with minimal bootstrap logic

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use mserve::config::{load_configuration, Cli};
use mserve::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    // parse command line arguments (and MSERVE_MEDIA_DIR)
    let cli = Cli::parse();

    // initialize logging based on verbosity flags
    init_logging(cli.verbose, cli.quiet);

    // load and merge configuration from defaults, file and cli
    let config = load_configuration(&cli)?;

    // start the http server
    start_server(config).await
}

/// -qq .. -vv around the default info level
const LOG_LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

/// initialize compact tracing output at the level picked by -v / -q
fn init_logging(verbose_count: u8, quiet_count: u8) {
    let index = (2 + i16::from(verbose_count) - i16::from(quiet_count)).clamp(0, 4) as usize;
    let level = LOG_LEVELS[index];

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    info!("logging at {}", level);
}
