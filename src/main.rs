//! CLI entry point for compositing PNG layers through a tile provider stack

use clap::Parser;
use tilestack::io::cli::{Cli, SceneProcessor};

fn main() -> tilestack::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = SceneProcessor::new(cli);
    processor.process()
}
