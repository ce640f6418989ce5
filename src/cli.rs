use std::path::PathBuf;

use clap::Parser;

use crate::error_log::DEFAULT_LOG_FILE;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Read, rewrite, or append rows of a plain CSV file from an interactive menu",
    long_about = None
)]
pub struct Cli {
    /// Directory holding the `input/` and `output/` data folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Where store errors are logged ('console' or 'file')
    #[arg(long = "log-mode", default_value = "file")]
    pub log_mode: String,
    /// Error log written in file mode
    #[arg(long = "log-file", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
    /// Never clear the terminal between screens
    #[arg(long = "no-clear")]
    pub no_clear: bool,
}
