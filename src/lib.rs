pub mod cli;
pub mod error;
pub mod error_log;
pub mod io_utils;
pub mod session;
pub mod store;

use std::{
    env,
    io::{self, IsTerminal},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::Cli,
    error_log::{ErrorLog, LogMode},
    session::Session,
    store::FileStore,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_keeper", LevelFilter::Warn);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mode: LogMode = cli.log_mode.parse()?;
    let log = ErrorLog::new(mode, &cli.log_file);
    let store = FileStore::open(&cli.root, log)
        .with_context(|| format!("Preparing data files under {:?}", cli.root))?;
    info!("Store ready, errors logged to {:?}", store.error_log().sink());

    let stdout = io::stdout();
    let clear_screen = !cli.no_clear && stdout.is_terminal();
    Session::new(&store, io::stdin().lock(), stdout.lock())
        .clear_screen(clear_screen)
        .run()
}
