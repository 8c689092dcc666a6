mod bake;
mod check;
mod fragments;
mod init;

use bake::BakeCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use eyre::Result;
use fragments::FragmentsCommand;
use init::InitCommand;

/// Extension trait for exiting on request errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for botforge_request::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "forge")]
#[command(version)]
#[command(about = "Generate telegram bot modules from TOML requests")]
pub(crate) struct Cli {
    /// Log fragment lookups and other details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Fragments(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter bot.toml
    Init(InitCommand),

    /// Generate a bot module from bot.toml
    Bake(BakeCommand),

    /// Validate bot.toml without writing anything
    Check(CheckCommand),

    /// Inspect or seed fragment stores
    Fragments(FragmentsCommand),
}
