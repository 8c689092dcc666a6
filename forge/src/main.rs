mod commands;
mod ops;
mod reports;
mod store;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    cli.run()
}

/// Log to stderr; `RUST_LOG` adds directives on top of the default level.
fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose {
        "botforge=debug"
    } else {
        "botforge=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}
