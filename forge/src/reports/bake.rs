//! Bake command report data structures.

use std::path::PathBuf;

use botforge_core::WriteResult;

use super::output::{Level, Output, Report};

/// Report data from bot generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Class name of the generated bot.
    pub class_name: String,

    /// Names of the composed features, in composition order.
    pub features: Vec<String>,

    /// Warning messages, already formatted with their location.
    pub warnings: Vec<String>,

    /// Informational messages.
    pub infos: Vec<String>,

    /// Generation result (file written or preview).
    pub result: GenerationResult,
}

/// Result of generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The artifact was written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewFile),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub path: PathBuf,
    pub write: WriteResult,
}

/// The artifact in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.diagnostic(Level::Warning, warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BakeReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&self.class_name);
        out.newline();

        self.render_features(out);

        let verb = match written.write {
            WriteResult::Created => "Created",
            WriteResult::Replaced => "Replaced",
        };
        out.key_value(verb, &written.path.display().to_string());

        for info in &self.infos {
            out.diagnostic(Level::Info, info);
        }
    }

    fn render_features(&self, out: &mut dyn Output) {
        if self.features.is_empty() {
            out.preformatted("Features: none");
        } else {
            out.section(&format!("Features ({})", self.features.len()));
            for feature in &self.features {
                out.list_item(feature);
            }
        }
        out.newline();
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewFile) {
        out.code(&preview.path, &preview.content);

        out.divider("Summary");
        out.preformatted(&format!("{} would be generated", preview.path));
        for info in &self.infos {
            out.diagnostic(Level::Info, info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    fn report(result: GenerationResult) -> BakeReport {
        BakeReport {
            class_name: "NotificationsBot".into(),
            features: vec!["notifications".into()],
            warnings: vec!["unsupported modules value\n  --> bot.modules".into()],
            infos: vec![],
            result,
        }
    }

    #[test]
    fn test_render_written() {
        let mut out = RecordingOutput::default();
        report(GenerationResult::Written(WrittenResult {
            path: PathBuf::from("out/notifications_bot.py"),
            write: WriteResult::Created,
        }))
        .render(&mut out);

        let text = out.text();
        assert!(text.starts_with("[stderr] warning: unsupported modules value"));
        assert!(text.contains("Features (1):\n  - notifications"));
        assert!(text.ends_with("Created: out/notifications_bot.py"));
    }

    #[test]
    fn test_infos_follow_the_summary() {
        let mut report = report(GenerationResult::Preview(PreviewFile {
            path: "bot_1.py".into(),
            content: "pass\n".into(),
        }));
        report.warnings.clear();
        report
            .infos
            .push("no notif_func given\n  --> notifications.notif_func".into());

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("info: no notif_func given\n  --> notifications.notif_func")
        );
        assert!(out.lines.iter().all(|line| !line.starts_with("[stderr]")));
    }

    #[test]
    fn test_render_preview() {
        let mut out = RecordingOutput::default();
        report(GenerationResult::Preview(PreviewFile {
            path: "bot_1.py".into(),
            content: "class Bot_1_bot: ...".into(),
        }))
        .render(&mut out);

        assert_eq!(
            out.lines[1..],
            [
                "── bot_1.py ──",
                "class Bot_1_bot: ...",
                "── Summary ──",
                "bot_1.py would be generated",
            ]
        );
    }
}
