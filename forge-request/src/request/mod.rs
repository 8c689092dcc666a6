//! The validated bot generation request.

mod file;
mod notifications;
mod parse;
mod starter;

use std::{collections::BTreeSet, fmt, path::Path};

use botforge_core::capitalize;
use indexmap::IndexMap;

pub use file::RequestFile;
pub use notifications::{NotificationSettings, Recipients, UsersSource};
pub use parse::parse_request;
pub use starter::{REQUEST_FILE, StarterRequest};

/// Class name used when a request has none: `weather` becomes `Weather_bot`.
pub fn default_class_name(file_name: &str) -> String {
    format!("{}_bot", capitalize(file_name))
}

/// Optional capability a generated bot can carry.
///
/// Ordering follows the numeric id; composition runs in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    Notifications = 0,
    Listening = 1,
    Events = 2,
}

impl FeatureId {
    pub const ALL: [FeatureId; 3] = [
        FeatureId::Notifications,
        FeatureId::Listening,
        FeatureId::Events,
    ];

    /// Numeric id used in requests.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FeatureId::Notifications => "notifications",
            FeatureId::Listening => "listening",
            FeatureId::Events => "events",
        }
    }
}

impl TryFrom<i64> for FeatureId {
    type Error = i64;

    fn try_from(id: i64) -> std::result::Result<Self, i64> {
        FeatureId::ALL
            .into_iter()
            .find(|feature| i64::from(feature.id()) == id)
            .ok_or(id)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Import statements requested for the bot module.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modules {
    /// No `modules` key.
    #[default]
    Absent,
    /// Module names, one `import` line each.
    List(Vec<String>),
    /// Import block inserted verbatim.
    Text(String),
    /// A value of another type; carries the type name for the warning.
    Unsupported(String),
}

impl Modules {
    pub(crate) fn from_toml(value: Option<toml::Value>) -> Self {
        let Some(value) = value else {
            return Modules::Absent;
        };
        match value {
            toml::Value::String(text) => Modules::Text(text),
            toml::Value::Array(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        toml::Value::String(name) => names.push(name.clone()),
                        other => {
                            return Modules::Unsupported(format!(
                                "array of {}",
                                botforge_core::toml_value_type(other)
                            ));
                        }
                    }
                }
                Modules::List(names)
            }
            other => Modules::Unsupported(botforge_core::toml_value_type(&other).to_string()),
        }
    }
}

/// Parameters of a generated method beyond the ones the generator emits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgSpec {
    /// Names in order; may include `*args` and `**kwargs`.
    pub positional: Vec<String>,
    /// Keyword parameters with the Python literal text of their default.
    pub defaults: IndexMap<String, String>,
}

impl ArgSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, name: impl Into<String>) -> Self {
        self.positional.push(name.into());
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, literal: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), literal.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.defaults.is_empty()
    }
}

/// A validated description of one bot to generate.
///
/// Requests parsed from TOML are checked once at parse time. Requests built
/// in code are trusted as given; the generator still rejects shapes it
/// cannot render.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Stem of the generated file.
    pub file_name: String,
    pub features: BTreeSet<FeatureId>,
    pub modules: Modules,
    /// Defaults to the capitalized file name plus `_bot`.
    pub class_name: Option<String>,
    pub class_doc: Option<String>,
    /// Replaces the default `__init__` body.
    pub init_code: Option<String>,
    pub init_args: ArgSpec,
    /// Body of the `if __name__ == '__main__':` block.
    pub launch_code: Option<String>,
    pub notifications: Option<NotificationSettings>,
}

impl GenerationRequest {
    /// A request with no features and every optional part absent.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            features: BTreeSet::new(),
            modules: Modules::Absent,
            class_name: None,
            class_doc: None,
            init_code: None,
            init_args: ArgSpec::default(),
            launch_code: None,
            notifications: None,
        }
    }

    /// The class name, falling back to [`default_class_name`].
    pub fn resolved_class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| default_class_name(&self.file_name))
    }

    pub fn has_feature(&self, feature: FeatureId) -> bool {
        self.features.contains(&feature)
    }

    /// Resolve relative paths in the request against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(NotificationSettings {
            users: UsersSource::File(path),
            ..
        }) = &mut self.notifications
            && path.is_relative()
        {
            *path = base.join(&*path);
        }
    }
}
