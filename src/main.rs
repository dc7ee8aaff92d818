use std::io;

use clap::Parser;

use llstr::app;
use llstr::utils::config::Config;

type Result<T> = anyhow::Result<T>;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    app::run(&config, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
