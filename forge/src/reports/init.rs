//! Init command report data structures.

use std::path::PathBuf;

use botforge_core::WriteResult;

use super::output::{Output, Report};

/// Report data from writing a starter request.
#[derive(Debug)]
pub struct InitReport {
    pub path: PathBuf,
    pub write: WriteResult,
    /// Directory holding the request, when it is not the current one.
    pub directory: Option<PathBuf>,
}

impl Report for InitReport {
    fn render(&self, out: &mut dyn Output) {
        let verb = match self.write {
            WriteResult::Created => "Created",
            WriteResult::Replaced => "Replaced",
        };
        out.preformatted(&format!("{} {}", verb, self.path.display()));
        out.newline();

        out.section("Next steps");
        if let Some(directory) = &self.directory {
            out.preformatted(&format!("  cd {}", directory.display()));
        }
        out.preformatted("  forge check");
        out.preformatted("  forge bake");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_init_report_in_subdirectory() {
        let report = InitReport {
            path: PathBuf::from("weather/bot.toml"),
            write: WriteResult::Created,
            directory: Some(PathBuf::from("weather")),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "Created weather/bot.toml",
                "",
                "Next steps:",
                "  cd weather",
                "  forge check",
                "  forge bake",
            ]
        );
    }
}
