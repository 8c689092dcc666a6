//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod bake;
mod check;
mod fragments;
mod init;
mod output;

pub use bake::{BakeReport, GenerationResult, PreviewFile, WrittenResult};
pub use check::CheckReport;
pub use fragments::{FragmentSummary, ListReport, SeedReport, ShowReport};
pub use init::InitReport;
pub use output::{Report, TerminalOutput};
