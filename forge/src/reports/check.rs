//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Level, Output, Report};

/// Report data from request validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the request file.
    pub request_path: PathBuf,
    /// Class name the request resolves to.
    pub class_name: String,
    /// Output file relative to the output directory.
    pub artifact: String,
    /// Names of the requested features.
    pub features: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.diagnostic(Level::Error, error);
        }

        for warning in &self.warnings {
            out.diagnostic(Level::Warning, warning);
        }

        for info in &self.infos {
            out.diagnostic(Level::Info, info);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.request_path.display()));
        out.newline();
        out.key_value("  Class", &self.class_name);
        out.key_value("  Output", &self.artifact);
        if self.features.is_empty() {
            out.key_value("  Features", "none");
        } else {
            out.key_value("  Features", &self.features.join(", "));
        }
    }
}
