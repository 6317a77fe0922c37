use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Trailing 1y/2y/4y moving averages for monthly price data")]
pub struct Cli {
    /// JSON input with rows of [year, month, price, change, percent]
    pub input: PathBuf,

    /// JSON output with rows of [year, month, ma1y, ma2y, ma4y]
    pub output: PathBuf,
}
