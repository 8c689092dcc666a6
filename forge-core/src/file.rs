use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any previous content atomically
    fn write(&self, base: &Path) -> io::Result<WriteResult> {
        self.write_with(base, &AtomicWriter)
    }

    /// Write the file through the given persistence port
    fn write_with(&self, base: &Path, persist: &dyn Persist) -> io::Result<WriteResult> {
        persist.persist(&self.path(base), &self.render())
    }
}

/// Port for putting rendered text on disk.
///
/// Implementations must either store the whole content or leave the
/// target untouched.
pub trait Persist {
    fn persist(&self, path: &Path, content: &str) -> io::Result<WriteResult>;
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// No file existed at the path before
    Created,
    /// A previous file was replaced
    Replaced,
}

/// Writes through a synced temporary sibling file and a rename.
///
/// The temporary file lives next to the target (`.<name>.tmp`) so the
/// rename never crosses a filesystem boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicWriter;

impl Persist for AtomicWriter {
    fn persist(&self, path: &Path, content: &str) -> io::Result<WriteResult> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let existed = path.exists();
        let temp_path = temp_path_for(path)?;

        if let Err(e) = write_and_sync(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        tracing::debug!(path = %path.display(), bytes = content.len(), "artifact persisted");

        Ok(if existed {
            WriteResult::Replaced
        } else {
            WriteResult::Created
        })
    }
}

fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", path.display()),
        )
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn write_and_sync(path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Note {
        name: &'static str,
        text: &'static str,
    }

    impl GeneratedFile for Note {
        fn path(&self, base: &Path) -> PathBuf {
            base.join(self.name)
        }

        fn render(&self) -> String {
            self.text.to_string()
        }
    }

    #[test]
    fn test_persist_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bot.py");

        let result = AtomicWriter.persist(&path, "hello").unwrap();

        assert_eq!(result, WriteResult::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_persist_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("bot.py");

        AtomicWriter.persist(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_persist_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bot.py");

        fs::write(&path, "a much longer original body").unwrap();
        let result = AtomicWriter.persist(&path, "second").unwrap();

        assert_eq!(result, WriteResult::Replaced);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bot.py");

        AtomicWriter.persist(&path, "content").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["bot.py".to_string()]);
    }

    #[test]
    fn test_persist_rejects_path_without_file_name() {
        let temp = TempDir::new().unwrap();
        let err = AtomicWriter.persist(&temp.path().join(".."), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();
        let note = Note {
            name: "note.txt",
            text: "rendered",
        };

        assert_eq!(note.write(temp.path()).unwrap(), WriteResult::Created);
        assert_eq!(note.write(temp.path()).unwrap(), WriteResult::Replaced);
        assert_eq!(
            fs::read_to_string(temp.path().join("note.txt")).unwrap(),
            "rendered"
        );
    }
}
