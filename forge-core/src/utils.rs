//! Shared utility functions for code generation.

use crate::PyLiteral;

/// Uppercase the first character and lowercase the rest
/// (e.g., "my_Bot" -> "My_bot")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Replace every tab with four spaces
pub fn expand_tabs(s: &str) -> String {
    s.replace('\t', "    ")
}

/// Convert a TOML value to the literal text of a parameter default.
///
/// Strings are taken verbatim as code, everything else renders as the
/// equivalent Python literal.
pub fn toml_value_to_literal_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => PyLiteral::from_toml(other).to_string(),
    }
}

/// Human readable name of a TOML value's type
pub fn toml_value_type(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::String(_) => "string",
        toml::Value::Integer(_) => "integer",
        toml::Value::Float(_) => "float",
        toml::Value::Boolean(_) => "boolean",
        toml::Value::Datetime(_) => "datetime",
        toml::Value::Array(_) => "array",
        toml::Value::Table(_) => "table",
    }
}
