use std::path::PathBuf;

use botforge_codegen::DEFAULT_EXTENSION;
use botforge_request::{REQUEST_FILE, RequestFile};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, bake::BakeOptions},
    reports::{Report, TerminalOutput},
    store::StoreArgs,
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to the request file
    #[arg(default_value = REQUEST_FILE)]
    pub request: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Extension of the generated module
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Preview the generated module without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let file = RequestFile::open(&self.request).unwrap_or_exit();
        let store = self.store.open()?;

        let report = ops::bake(
            file.request(),
            store.as_ref(),
            BakeOptions {
                output_dir: &self.output,
                extension: &self.extension,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
