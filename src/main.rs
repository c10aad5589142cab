//! `excise` removes a range of lines from a text file.

use clap::Parser;
use excise::cli;
use excise::ExciseOpts;
use excise::TracingOpts;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    let mut opts = cli::Opts::parse();
    opts.init();
    TracingOpts::from_cli(&opts).install()?;

    ExciseOpts::from_cli(&opts).run(&mut std::io::stdout().lock())?;

    Ok(())
}
