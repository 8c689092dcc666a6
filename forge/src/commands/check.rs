use std::path::PathBuf;

use botforge_codegen::DEFAULT_EXTENSION;
use botforge_request::{REQUEST_FILE, RequestFile};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
    store::StoreArgs,
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the request file
    #[arg(default_value = REQUEST_FILE)]
    pub request: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = RequestFile::open(&self.request).unwrap_or_exit();
        let store = self.store.open()?;

        let report = ops::check(
            file.request(),
            store.as_ref(),
            DEFAULT_EXTENSION,
            file.path(),
        );
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
