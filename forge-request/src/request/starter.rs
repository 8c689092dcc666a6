//! Starter bot.toml written by `forge init`.

use std::path::{Path, PathBuf};

use botforge_core::GeneratedFile;

/// File name of a request.
pub const REQUEST_FILE: &str = "bot.toml";

/// A commented request for a notifications bot.
pub struct StarterRequest {
    pub file_name: String,
    pub class_doc: String,
}

impl StarterRequest {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            class_doc: "Sends notifications to its users".to_string(),
        }
    }

    pub fn with_class_doc(mut self, class_doc: impl Into<String>) -> Self {
        self.class_doc = class_doc.into();
        self
    }
}

impl GeneratedFile for StarterRequest {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(REQUEST_FILE)
    }

    fn render(&self) -> String {
        format!(
            r#"[bot]
file_name = {}
# 0 notifications, 1 listening, 2 events
features = [0]
modules = ["time"]
class_doc = {}
launch_code = """
bot = {}('TOKEN')
while True:
    bot.notificationTrigger()
    time.sleep(60)"""

# Extra parameters of __init__ (self and token are always present):
# [bot.init_args]
# positional = ["users"]
# defaults = {{ parse_mode = "None" }}

[notifications]
# 0 inline list, 1 path to a file of ids, 2 Python code run in __init__
users_type = 0
users = []
# Declare accesses to map each user id to labels instead:
# accesses = ["user", "admin"]
# users = {{ "000000" = ["user", "admin"] }}
notif_func = """
for user in self.users:
    self.api.send_message(user, 'ping')
return 0"""
"#,
            toml::Value::String(self.file_name.clone()),
            toml::Value::String(self.class_doc.clone()),
            super::default_class_name(&self.file_name),
        )
    }
}
