use std::path::{Path, PathBuf};

use super::{GenerationRequest, parse::parse_request};
use crate::{Error, Result};

/// A bot.toml file with both raw content and parsed request.
///
/// Relative `users` file paths are resolved against the file's directory.
#[derive(Debug)]
pub struct RequestFile {
    path: PathBuf,
    content: String,
    request: GenerationRequest,
}

impl RequestFile {
    /// Open and parse a request file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let mut request = parse_request(&content, &path.display().to_string())?;
        if let Some(base) = path.parent() {
            request.resolve_paths(base);
        }

        Ok(Self {
            path,
            content,
            request,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn into_request(self) -> GenerationRequest {
        self.request
    }
}
