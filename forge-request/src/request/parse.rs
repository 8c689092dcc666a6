//! Request parsing from bot.toml.
//!
//! ```toml
//! [bot]
//! file_name = "weather"
//! features = [0]
//! modules = ["os", "time"]
//!
//! [bot.init_args]
//! positional = ["users"]
//!
//! [notifications]
//! users_type = 0
//! users = ["000000", "111111"]
//! ```

use std::{collections::BTreeSet, path::PathBuf, str::FromStr};

use botforge_core::{PyLiteral, toml_value_to_literal_text, toml_value_type};
use indexmap::IndexMap;
use serde::Deserialize;

use super::{
    ArgSpec, FeatureId, GenerationRequest, Modules, NotificationSettings, Recipients, UsersSource,
};
use crate::{
    Error, Result,
    error::SourceContext,
    validate::{ParseContext, validate_file_name},
};

/// Parameter names `__init__` always receives.
const INIT_RESERVED: &[&str] = &["self", "token"];
/// Parameter names the trigger method always receives.
const TRIGGER_RESERVED: &[&str] = &["self"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    bot: RawBot,
    notifications: Option<RawNotifications>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBot {
    file_name: String,
    #[serde(default)]
    features: Vec<i64>,
    modules: Option<toml::Value>,
    class_name: Option<String>,
    class_doc: Option<String>,
    init_code: Option<String>,
    launch_code: Option<String>,
    #[serde(default)]
    init_args: RawArgSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawArgSpec {
    #[serde(default)]
    positional: Vec<String>,
    #[serde(default)]
    defaults: IndexMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNotifications {
    users_type: Option<i64>,
    users: Option<toml::Value>,
    accesses: Option<Vec<String>>,
    notif_func: Option<String>,
    #[serde(default)]
    notif_func_args: RawArgSpec,
}

impl FromStr for GenerationRequest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_request(s, "bot.toml")
    }
}

impl GenerationRequest {
    /// Parse a request with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_request(content, filename)
    }
}

/// Parse and validate a request from TOML content.
pub fn parse_request(content: &str, filename: &str) -> Result<GenerationRequest> {
    let source_ctx = SourceContext::new(content, filename);
    let raw: RawRequest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    let ctx = ParseContext::new(content, filename);
    raw.validate(&ctx)
}

impl RawRequest {
    fn validate(self, ctx: &ParseContext<'_>) -> Result<GenerationRequest> {
        let bot = self.bot;
        let bot_ctx = ctx.push("bot");

        if let Some(reason) = validate_file_name(&bot.file_name) {
            return Err(bot_ctx.validation_error(
                format!("invalid file name '{}': {reason}", bot.file_name),
                "file_name",
            ));
        }

        let features = bot
            .features
            .iter()
            .map(|&id| FeatureId::try_from(id).map_err(|id| bot_ctx.unknown_feature_error(id)))
            .collect::<Result<BTreeSet<_>>>()?;

        if let Some(class_name) = &bot.class_name {
            bot_ctx.validate_name(class_name, "class name")?;
        }

        if let Some(doc) = &bot.class_doc
            && doc.contains("'''")
        {
            return Err(bot_ctx.validation_error(
                "class_doc cannot contain ''' (it closes the docstring)",
                "class_doc",
            ));
        }

        let init_args = bot
            .init_args
            .validate(&bot_ctx.push("init_args"), INIT_RESERVED)?;

        let notifications = self
            .notifications
            .map(|raw| raw.validate(&ctx.push("notifications")))
            .transpose()?;

        Ok(GenerationRequest {
            file_name: bot.file_name,
            features,
            modules: Modules::from_toml(bot.modules),
            class_name: bot.class_name,
            class_doc: bot.class_doc,
            init_code: bot.init_code,
            init_args,
            launch_code: bot.launch_code,
            notifications,
        })
    }
}

impl RawArgSpec {
    fn validate(self, ctx: &ParseContext<'_>, reserved: &[&str]) -> Result<ArgSpec> {
        for name in &self.positional {
            ctx.validate_parameter(name, reserved)?;
        }

        let mut defaults = IndexMap::with_capacity(self.defaults.len());
        for (name, value) in &self.defaults {
            if reserved.contains(&name.as_str()) {
                return Err(ctx.reserved_name_error(name));
            }
            ctx.validate_name(name, "keyword parameter")?;
            defaults.insert(name.clone(), toml_value_to_literal_text(value));
        }

        Ok(ArgSpec {
            positional: self.positional,
            defaults,
        })
    }
}

impl RawNotifications {
    fn validate(self, ctx: &ParseContext<'_>) -> Result<NotificationSettings> {
        let users_type = self.users_type.unwrap_or(0);
        let users = match users_type {
            0 => UsersSource::Inline(inline_recipients(
                self.users,
                self.accesses.is_some(),
                ctx,
            )?),
            1 => UsersSource::File(PathBuf::from(require_text(self.users, users_type, ctx)?)),
            2 => UsersSource::Code(require_text(self.users, users_type, ctx)?),
            other => {
                return Err(ctx.validation_error(
                    format!("users_type must be 0, 1 or 2, found {other}"),
                    "users_type",
                ));
            }
        };

        let notif_func_args = self
            .notif_func_args
            .validate(&ctx.push("notif_func_args"), TRIGGER_RESERVED)?;

        Ok(NotificationSettings {
            users,
            accesses: self.accesses,
            notif_func: self.notif_func,
            notif_func_args,
        })
    }
}

fn inline_recipients(
    users: Option<toml::Value>,
    with_accesses: bool,
    ctx: &ParseContext<'_>,
) -> Result<Recipients> {
    match (users, with_accesses) {
        (None, false) => Ok(Recipients::List(Vec::new())),
        (None, true) => Ok(Recipients::Map(IndexMap::new())),
        (Some(toml::Value::Array(items)), false) => Ok(Recipients::List(
            items.iter().map(PyLiteral::from_toml).collect(),
        )),
        (Some(toml::Value::Table(table)), true) => {
            let mut users = IndexMap::with_capacity(table.len());
            for (id, labels) in &table {
                users.insert(id.clone(), access_labels(id, labels, ctx)?);
            }
            Ok(Recipients::Map(users))
        }
        (Some(toml::Value::Array(_)), true) => Err(ctx.validation_error(
            "users must be a table of user id to access labels when accesses are declared",
            "users",
        )),
        (Some(toml::Value::Table(_)), false) => Err(ctx.validation_error(
            "users maps ids to access labels but no accesses are declared",
            "users",
        )),
        (Some(other), _) => Err(ctx.validation_error(
            format!(
                "users_type = 0 expects users to be an array or table, found {}",
                toml_value_type(&other)
            ),
            "users",
        )),
    }
}

fn access_labels(id: &str, labels: &toml::Value, ctx: &ParseContext<'_>) -> Result<Vec<String>> {
    let invalid = || {
        ctx.validation_error(
            format!("access labels for user '{id}' must be an array of strings"),
            "users",
        )
    };

    let toml::Value::Array(items) = labels else {
        return Err(invalid());
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn require_text(
    users: Option<toml::Value>,
    users_type: i64,
    ctx: &ParseContext<'_>,
) -> Result<String> {
    let expected = if users_type == 1 {
        "a path to a file of user ids"
    } else {
        "Python code that computes the users list"
    };

    match users {
        Some(toml::Value::String(text)) => Ok(text),
        Some(other) => Err(ctx.validation_error(
            format!(
                "users_type = {users_type} expects users to be {expected}, found {}",
                toml_value_type(&other)
            ),
            "users",
        )),
        None => Err(ctx.validation_error(
            format!("users_type = {users_type} requires users: {expected}"),
            "users_type",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<GenerationRequest> {
        src.parse()
    }

    #[test]
    fn test_minimal_request() {
        let request = parse("[bot]\nfile_name = \"bot_1\"\n").unwrap();
        assert_eq!(request, GenerationRequest::new("bot_1"));
    }

    #[test]
    fn test_full_request() {
        let request = parse(
            r#"
[bot]
file_name = "weather"
features = [0]
modules = ["os", "time"]
class_name = "WeatherBot"
class_doc = "Sends the forecast"
launch_code = "bot = WeatherBot('TOKEN')\nbot.start()"

[bot.init_args]
positional = ["users"]
defaults = { retries = 3, verbose = false, greeting = "'hi'" }

[notifications]
users_type = 0
users = ["000000", 111111]
notif_func = "return 0"

[notifications.notif_func_args]
positional = ["filename"]
"#,
        )
        .unwrap();

        assert_eq!(request.file_name, "weather");
        assert!(request.has_feature(FeatureId::Notifications));
        assert_eq!(
            request.modules,
            Modules::List(vec!["os".into(), "time".into()])
        );
        assert_eq!(request.class_name.as_deref(), Some("WeatherBot"));
        assert_eq!(request.init_args.positional, vec!["users"]);
        let defaults: Vec<_> = request
            .init_args
            .defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            defaults,
            vec![("retries", "3"), ("verbose", "False"), ("greeting", "'hi'")]
        );

        let notifications = request.notifications.unwrap();
        assert_eq!(
            notifications.users,
            UsersSource::Inline(Recipients::List(vec![
                PyLiteral::Str("000000".into()),
                PyLiteral::Int(111111),
            ]))
        );
        assert_eq!(notifications.notif_func.as_deref(), Some("return 0"));
        assert_eq!(notifications.notif_func_args.positional, vec!["filename"]);
    }

    #[test]
    fn test_features_are_ordered_and_deduplicated() {
        let request = parse("[bot]\nfile_name = \"b\"\nfeatures = [2, 0, 2]\n").unwrap();
        let features: Vec<_> = request.features.into_iter().collect();
        assert_eq!(features, vec![FeatureId::Notifications, FeatureId::Events]);
    }

    #[test]
    fn test_unknown_feature() {
        let err = parse("[bot]\nfile_name = \"b\"\nfeatures = [7]\n").unwrap_err();
        assert!(matches!(*err, Error::UnknownFeature { id: 7, .. }));
    }

    #[test]
    fn test_invalid_file_name() {
        let err = parse("[bot]\nfile_name = \"../bot\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid file name"));
    }

    #[test]
    fn test_dashed_file_name_is_rejected() {
        // Would render `class My-bot_bot` and an unimportable module
        let err = parse("[bot]\nfile_name = \"my-bot\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("invalid file name 'my-bot'"));

        let request = parse("[bot]\nfile_name = \"my_bot\"\n").unwrap();
        assert_eq!(request.resolved_class_name(), "My_bot_bot");
    }

    #[test]
    fn test_bare_star_parameter_is_rejected() {
        let err = parse(
            "[bot]\nfile_name = \"b\"\n[bot.init_args]\npositional = [\"a\", \"*\"]\ndefaults = { kw = 1 }\n",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { ref name, .. } if name == "*"));

        let request = parse(
            "[bot]\nfile_name = \"b\"\n[bot.init_args]\npositional = [\"a\", \"*rest\"]\n",
        )
        .unwrap();
        assert_eq!(request.init_args.positional, ["a", "*rest"]);
    }

    #[test]
    fn test_missing_file_name_is_parse_error() {
        let err = parse("[bot]\nfeatures = [0]\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = parse("[bot]\nfile_name = \"b\"\nfeature = [0]\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_reserved_init_args() {
        for name in ["self", "token"] {
            let src = format!(
                "[bot]\nfile_name = \"b\"\n[bot.init_args]\npositional = [\"{name}\"]\n"
            );
            let err = parse(&src).unwrap_err();
            assert!(
                matches!(*err, Error::ReservedName { name: ref n, .. } if n == name),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_reserved_default_name() {
        let err = parse("[bot]\nfile_name = \"b\"\n[bot.init_args]\ndefaults = { token = 1 }\n")
            .unwrap_err();
        assert!(matches!(*err, Error::ReservedName { .. }));
    }

    #[test]
    fn test_trigger_args_reject_self_only() {
        let ok = parse(
            "[bot]\nfile_name = \"b\"\n[notifications.notif_func_args]\npositional = [\"token\"]\n",
        );
        assert!(ok.is_ok());

        let err = parse(
            "[bot]\nfile_name = \"b\"\n[notifications.notif_func_args]\npositional = [\"self\"]\n",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::ReservedName { .. }));
    }

    #[test]
    fn test_invalid_class_name() {
        let err = parse("[bot]\nfile_name = \"b\"\nclass_name = \"class\"\n").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_class_doc_cannot_close_docstring() {
        let err = parse("[bot]\nfile_name = \"b\"\nclass_doc = \"a ''' b\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_modules_text_and_unsupported() {
        let request = parse("[bot]\nfile_name = \"b\"\nmodules = \"import os\"\n").unwrap();
        assert_eq!(request.modules, Modules::Text("import os".into()));

        let request = parse("[bot]\nfile_name = \"b\"\nmodules = 3\n").unwrap();
        assert_eq!(request.modules, Modules::Unsupported("integer".into()));
    }

    #[test]
    fn test_users_defaults() {
        let request = parse("[bot]\nfile_name = \"b\"\n[notifications]\n").unwrap();
        assert_eq!(
            request.notifications.unwrap().users,
            UsersSource::Inline(Recipients::List(vec![]))
        );

        let request =
            parse("[bot]\nfile_name = \"b\"\n[notifications]\naccesses = [\"admin\"]\n").unwrap();
        assert_eq!(
            request.notifications.unwrap().users,
            UsersSource::Inline(Recipients::Map(IndexMap::new()))
        );
    }

    #[test]
    fn test_users_with_accesses_keeps_order() {
        let request = parse(
            r#"
[bot]
file_name = "b"

[notifications]
accesses = ["user", "admin"]

[notifications.users]
"111111" = ["user"]
"000000" = ["user", "admin"]
"#,
        )
        .unwrap();

        let UsersSource::Inline(Recipients::Map(users)) = request.notifications.unwrap().users
        else {
            panic!("expected access map");
        };
        let ids: Vec<_> = users.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["111111", "000000"]);
        assert_eq!(users["000000"], vec!["user", "admin"]);
    }

    #[test]
    fn test_users_shape_mismatch() {
        let err = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\naccesses = [\"a\"]\nusers = [\"1\"]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("accesses are declared"));

        let err = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\nusers = { \"1\" = [\"a\"] }\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("no accesses are declared"));

        let err = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\naccesses = [\"a\"]\nusers = { \"1\" = \"a\" }\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("array of strings"));
    }

    #[test]
    fn test_users_file_and_code() {
        let request = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\nusers_type = 1\nusers = \"users.txt\"\n",
        )
        .unwrap();
        assert_eq!(
            request.notifications.unwrap().users,
            UsersSource::File("users.txt".into())
        );

        let request = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\nusers_type = 2\nusers = \"return ['1']\"\n",
        )
        .unwrap();
        assert_eq!(
            request.notifications.unwrap().users,
            UsersSource::Code("return ['1']".into())
        );
    }

    #[test]
    fn test_users_type_errors() {
        let err = parse("[bot]\nfile_name = \"b\"\n[notifications]\nusers_type = 3\n").unwrap_err();
        assert!(err.to_string().contains("users_type must be 0, 1 or 2"));

        let err = parse("[bot]\nfile_name = \"b\"\n[notifications]\nusers_type = 1\n").unwrap_err();
        assert!(err.to_string().contains("requires users"));

        let err = parse(
            "[bot]\nfile_name = \"b\"\n[notifications]\nusers_type = 2\nusers = [\"1\"]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("found array"));
    }

    #[test]
    fn test_error_carries_filename() {
        let err = GenerationRequest::from_str_with_filename(
            "[bot]\nfile_name = \"b\"\nfeatures = [9]\n",
            "custom.toml",
        )
        .unwrap_err();
        let Error::UnknownFeature { src, span, .. } = *err else {
            panic!("expected unknown feature");
        };
        assert_eq!(src.name(), "custom.toml");
        assert_eq!(span.map(|s| s.offset()), Some(22));
    }
}
