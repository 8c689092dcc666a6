//! Validation utilities for bot requests

use miette::SourceSpan;

use crate::{Error, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Tracks the current path through the request (e.g. `["notifications",
/// "notif_func_args"]`) so errors can say where a bad name was found.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// The raw TOML source content
    src: &'a str,
    /// The filename for error reporting
    filename: &'a str,
    /// Path segments for nested validation
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'bot.init_args'" or just "parameter".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    fn source(&self) -> SourceContext {
        SourceContext::new(self.src, self.filename)
    }

    /// Validation error labelled at `key`'s assignment, when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, key: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.source().named_source(),
            span: find_key_span(self.src, key),
            message: message.into(),
        })
    }

    pub fn unknown_feature_error(&self, id: i64) -> Box<Error> {
        Box::new(Error::UnknownFeature {
            src: self.source().named_source(),
            span: find_key_span(self.src, "features"),
            id,
        })
    }

    pub fn reserved_name_error(&self, name: &str) -> Box<Error> {
        Box::new(Error::ReservedName {
            src: self.source().named_source(),
            span: find_name_span(self.src, name),
            name: name.to_string(),
            context: format!("'{}'", self.path_string()),
        })
    }

    pub fn invalid_identifier_error(&self, name: &str, kind: &str, reason: &str) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.source().named_source(),
            span: find_name_span(self.src, name),
            name: name.to_string(),
            context: self.context_for(kind),
            reason: reason.to_string(),
        })
    }

    /// Validate that a name is a usable Python identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> crate::Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(self.invalid_identifier_error(name, kind, reason)),
            None => Ok(()),
        }
    }

    /// Validate a parameter name, rejecting names the generator emits itself.
    ///
    /// `*args` and `**kwargs` are accepted. A bare `*` is not: it is moved
    /// behind the keyword parameters and would end the signature.
    pub fn validate_parameter(&self, name: &str, reserved: &[&str]) -> crate::Result<()> {
        if reserved.contains(&name) {
            return Err(self.reserved_name_error(name));
        }
        let bare = name
            .strip_prefix("**")
            .or_else(|| name.strip_prefix('*'))
            .unwrap_or(name);
        match validate_identifier(bare) {
            Some(reason) => Err(self.invalid_identifier_error(name, "parameter", reason)),
            None => Ok(()),
        }
    }
}

/// Python keywords that cannot be used as identifiers
pub(crate) const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

pub(crate) fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Find the span of a key assignment (`key = ...`) or table header (`[key]`).
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            return Some(SourceSpan::from((offset + indent, key.len())));
        }
        offset += line.len();
    }

    for pattern in [format!("[{key}]"), format!(".{key}]")] {
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, key.len())));
        }
    }

    None
}

/// Find the span of a name in the TOML source.
///
/// Prefers quoted occurrences (`"name"` in an array), then key assignments,
/// then any occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    find_key_span(src, name).or_else(|| {
        src.find(name)
            .map(|pos| SourceSpan::from((pos, name.len())))
    })
}

/// Validate that a name is a valid Python identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    if is_python_keyword(name) {
        return Some("name is a Python keyword");
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Validate a bot file name (the artifact stem, imported as a Python module).
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_file_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("file name must start with a letter or underscore"),
        None => return Some("file name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("file name must contain only letters, numbers, and underscores");
    }

    None
}
