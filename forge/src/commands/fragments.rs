use std::path::PathBuf;

use clap::{Args, Subcommand};
use eyre::Result;

use crate::{
    ops::fragments,
    reports::{Report, TerminalOutput},
    store::StoreArgs,
};

#[derive(Args)]
pub struct FragmentsCommand {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    action: FragmentsAction,
}

#[derive(Subcommand)]
enum FragmentsAction {
    /// List the fragments of the store and their slots
    List,

    /// Print one fragment template
    Show {
        /// Fragment id (e.g. code_start)
        id: String,
    },

    /// Copy the store's fragments into a SQLite database
    Seed {
        /// Database to create or update
        database: PathBuf,
    },
}

impl FragmentsCommand {
    pub fn run(&self) -> Result<()> {
        let store = self.store.open()?;
        let mut out = TerminalOutput::new();

        match &self.action {
            FragmentsAction::List => fragments::list(store.as_ref())?.render(&mut out),
            FragmentsAction::Show { id } => fragments::show(store.as_ref(), id)?.render(&mut out),
            FragmentsAction::Seed { database } => {
                fragments::seed(store.as_ref(), database)?.render(&mut out)
            }
        }
        Ok(())
    }
}
