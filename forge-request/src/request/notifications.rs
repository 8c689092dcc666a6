use std::path::PathBuf;

use botforge_core::PyLiteral;
use indexmap::IndexMap;

use super::ArgSpec;

/// Settings for the notifications feature.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSettings {
    pub users: UsersSource,
    /// Access labels; when declared, inline users map ids to labels.
    pub accesses: Option<Vec<String>>,
    /// Body of the generated trigger method.
    pub notif_func: Option<String>,
    pub notif_func_args: ArgSpec,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            users: UsersSource::Inline(Recipients::List(Vec::new())),
            accesses: None,
            notif_func: None,
            notif_func_args: ArgSpec::default(),
        }
    }
}

/// Where the recipient list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersSource {
    /// Recipients written into the request (`users_type = 0`).
    Inline(Recipients),
    /// A file read at generation time, one id per line (`users_type = 1`).
    File(PathBuf),
    /// Python code that computes the list at bot start-up (`users_type = 2`).
    Code(String),
}

impl UsersSource {
    /// The numeric `users_type` this source corresponds to.
    pub fn users_type(&self) -> u8 {
        match self {
            UsersSource::Inline(_) => 0,
            UsersSource::File(_) => 1,
            UsersSource::Code(_) => 2,
        }
    }
}

/// Inline recipients.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    /// Plain user ids.
    List(Vec<PyLiteral>),
    /// User id to access labels, used when accesses are declared.
    Map(IndexMap<String, Vec<String>>),
}

impl Recipients {
    pub fn len(&self) -> usize {
        match self {
            Recipients::List(users) => users.len(),
            Recipients::Map(users) => users.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The Python literal assigned to `self.users`.
    pub fn to_literal(&self) -> PyLiteral {
        match self {
            Recipients::List(users) => PyLiteral::List(users.clone()),
            Recipients::Map(users) => PyLiteral::Dict(
                users
                    .iter()
                    .map(|(id, labels)| (id.clone(), PyLiteral::str_list(labels.iter().cloned())))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_type() {
        assert_eq!(UsersSource::Inline(Recipients::List(vec![])).users_type(), 0);
        assert_eq!(UsersSource::File("users.txt".into()).users_type(), 1);
        assert_eq!(UsersSource::Code("return []".into()).users_type(), 2);
    }

    #[test]
    fn test_recipients_literal() {
        let list = Recipients::List(vec![
            PyLiteral::Str("000000".into()),
            PyLiteral::Int(111111),
        ]);
        assert_eq!(list.to_literal().to_string(), "['000000', 111111]");

        let mut users = IndexMap::new();
        users.insert("000000".to_string(), vec!["user".to_string(), "admin".to_string()]);
        users.insert("111111".to_string(), vec!["user".to_string()]);
        let map = Recipients::Map(users);
        assert_eq!(
            map.to_literal().to_string(),
            "{'000000': ['user', 'admin'], '111111': ['user']}"
        );
        assert_eq!(map.len(), 2);
    }
}
