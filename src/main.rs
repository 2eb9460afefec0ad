use std::io::{self, Write};

use clap::Parser;
use cohort_roster::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}
