//! Python literal values rendered with `repr` conventions.

use std::fmt;

use indexmap::IndexMap;

/// A value that renders as a Python literal.
#[derive(Debug, Clone, PartialEq)]
pub enum PyLiteral {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<PyLiteral>),
    Dict(IndexMap<String, PyLiteral>),
}

impl PyLiteral {
    /// Build a list of string literals.
    pub fn str_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::Str(s.into())).collect())
    }

    /// Convert a TOML value. Datetimes become strings.
    pub fn from_toml(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s.clone()),
            toml::Value::Integer(i) => Self::Int(*i),
            toml::Value::Float(f) => Self::Float(*f),
            toml::Value::Boolean(b) => Self::Bool(*b),
            toml::Value::Datetime(d) => Self::Str(d.to_string()),
            toml::Value::Array(items) => Self::List(items.iter().map(Self::from_toml).collect()),
            toml::Value::Table(table) => Self::Dict(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_toml(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for PyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyLiteral::None => f.write_str("None"),
            PyLiteral::Bool(true) => f.write_str("True"),
            PyLiteral::Bool(false) => f.write_str("False"),
            PyLiteral::Int(i) => write!(f, "{i}"),
            PyLiteral::Float(x) => write_float(f, *x),
            PyLiteral::Str(s) => write_str_repr(f, s),
            PyLiteral::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            PyLiteral::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_str_repr(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("float('nan')")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "float('inf')" } else { "-float('inf')" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

/// Quote like Python's `repr(str)`: single quotes unless the text holds a
/// single quote and no double quote.
fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    f.write_str(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_list() {
        let users = PyLiteral::str_list(["000000", "111111"]);
        assert_eq!(users.to_string(), "['000000', '111111']");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(PyLiteral::List(vec![]).to_string(), "[]");
        assert_eq!(PyLiteral::Dict(IndexMap::new()).to_string(), "{}");
    }

    #[test]
    fn test_dict_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert(
            "000000".to_string(),
            PyLiteral::str_list(["user", "admin"]),
        );
        map.insert("111111".to_string(), PyLiteral::str_list(["user"]));

        assert_eq!(
            PyLiteral::Dict(map).to_string(),
            "{'000000': ['user', 'admin'], '111111': ['user']}"
        );
    }

    #[test]
    fn test_scalars() {
        assert_eq!(PyLiteral::Bool(true).to_string(), "True");
        assert_eq!(PyLiteral::Bool(false).to_string(), "False");
        assert_eq!(PyLiteral::None.to_string(), "None");
        assert_eq!(PyLiteral::Int(-7).to_string(), "-7");
        assert_eq!(PyLiteral::Float(2.0).to_string(), "2.0");
        assert_eq!(PyLiteral::Float(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(PyLiteral::Str("it's".into()).to_string(), "\"it's\"");
        assert_eq!(
            PyLiteral::Str("say \"hi\" it's".into()).to_string(),
            "'say \"hi\" it\\'s'"
        );
        assert_eq!(PyLiteral::Str("a\nb\\c".into()).to_string(), "'a\\nb\\\\c'");
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Table = toml::from_str("v = [1, 'x', true, 1.5]").unwrap();
        let literal = PyLiteral::from_toml(&table["v"]);
        assert_eq!(literal.to_string(), "[1, 'x', True, 1.5]");
    }
}
