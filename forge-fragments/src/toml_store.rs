//! Fragment store backed by a TOML document.
//!
//! ```toml
//! [fragments]
//! launch = """
//! if __name__ == '__main__':
//! {own_code}"""
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Fragment, FragmentError, FragmentStore, Result};

const BUILTIN: &str = include_str!("../fragments/builtin.toml");

#[derive(Debug, Deserialize)]
struct FragmentFile {
    #[serde(default)]
    fragments: IndexMap<String, String>,
}

/// Fragment store holding templates in memory, loaded from TOML.
#[derive(Debug, Clone)]
pub struct TomlStore {
    fragments: IndexMap<String, String>,
    location: String,
}

impl TomlStore {
    /// The fragment set shipped with botforge.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN, "built-in fragments")
    }

    /// Load fragments from a TOML file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FragmentError::unavailable(&location, e))?;
        Self::from_toml_str(&content, location)
    }

    /// Parse fragments from TOML text; `location` is used in diagnostics.
    pub fn from_toml_str(content: &str, location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let file: FragmentFile =
            toml::from_str(content).map_err(|e| FragmentError::unavailable(&location, e))?;
        Ok(Self {
            fragments: file.fragments,
            location,
        })
    }

    /// Build a store from `(id, template)` pairs.
    pub fn from_pairs<I, K, V>(location: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fragments: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            location: location.into(),
        }
    }

    /// Replace or add a single template.
    pub fn with_fragment(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.fragments.insert(id.into(), template.into());
        self
    }

    /// Remove a template.
    pub fn without_fragment(mut self, id: &str) -> Self {
        self.fragments.shift_remove(id);
        self
    }
}

impl FragmentStore for TomlStore {
    fn get(&self, id: &str) -> Result<Fragment> {
        match self.fragments.get(id) {
            Some(template) => {
                tracing::debug!(id, store = %self.location, "fragment resolved");
                Fragment::parse(id, template.as_str())
            }
            None => Err(FragmentError::NotFound {
                id: id.to_string(),
                store: self.location.clone(),
            }),
        }
    }

    fn ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.fragments.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::Slots;

    #[test]
    fn test_builtin_fragments_parse() {
        let store = TomlStore::builtin().unwrap();
        let ids = store.ids().unwrap();
        assert_eq!(
            ids,
            vec!["code_start", "def_init", "launch", "trigger", "user_list_func"]
        );
        for id in &ids {
            store.get(id).unwrap();
        }
    }

    #[test]
    fn test_builtin_code_start_slots() {
        let store = TomlStore::builtin().unwrap();
        let fragment = store.get("code_start").unwrap();
        let names: Vec<_> = fragment.slots().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["modules", "class_name", "class_doc", "init_args", "init_code"]
        );
    }

    #[test]
    fn test_builtin_launch_renders() {
        let store = TomlStore::builtin().unwrap();
        let out = store
            .get("launch")
            .unwrap()
            .render(&Slots::new().with("own_code", "    run()\n"))
            .unwrap();
        assert_eq!(out, "if __name__ == '__main__':\n    run()\n");
    }

    #[test]
    fn test_open_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fragments.toml");
        std::fs::write(&path, "[fragments]\ngreet = \"hello {name}\"\n").unwrap();

        let store = TomlStore::open(&path).unwrap();
        let out = store
            .get("greet")
            .unwrap()
            .render(&Slots::new().with("name", "bot"))
            .unwrap();
        assert_eq!(out, "hello bot");
        assert_eq!(store.location(), path.display().to_string());
    }

    #[test]
    fn test_open_missing_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let err = TomlStore::open(temp.path().join("missing.toml")).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_invalid_toml_is_unavailable() {
        let err = TomlStore::from_toml_str("[fragments\n", "broken").unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_not_found() {
        let store = TomlStore::from_pairs("memory", [("a", "x")]);
        let err = store.get("b").unwrap_err();
        assert!(matches!(err, FragmentError::NotFound { ref id, .. } if id == "b"));
    }

    #[test]
    fn test_with_and_without_fragment() {
        let store = TomlStore::from_pairs("memory", [("a", "x")])
            .with_fragment("b", "y")
            .without_fragment("a");
        assert_eq!(store.ids().unwrap(), vec!["b"]);
    }
}
