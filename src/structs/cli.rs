use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "gpulab")]
#[clap(about = "GPU lab portal client", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
