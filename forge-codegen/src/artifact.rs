use std::path::{Path, PathBuf};

use botforge_core::GeneratedFile;

/// The rendered bot module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotFile {
    file_name: String,
    extension: String,
    content: String,
}

impl BotFile {
    pub fn new(
        file_name: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            extension: extension.into(),
            content: content.into(),
        }
    }

    /// Path relative to the output directory, e.g. `weather.py`.
    pub fn relative_path(&self) -> String {
        format!("{}.{}", self.file_name, self.extension)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl GeneratedFile for BotFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.relative_path())
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
