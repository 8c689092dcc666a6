//! Bot generation requests for botforge.
//!
//! A request is read from a `bot.toml` file, validated once and handed to
//! the generator as a [`GenerationRequest`]:
//!
//! ```
//! use botforge_request::{FeatureId, GenerationRequest};
//!
//! let request: GenerationRequest = r#"
//! [bot]
//! file_name = "weather"
//! features = [0]
//! "#
//! .parse()
//! .unwrap();
//!
//! assert!(request.has_feature(FeatureId::Notifications));
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod request;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use request::{
    ArgSpec, FeatureId, GenerationRequest, Modules, NotificationSettings, REQUEST_FILE,
    Recipients, RequestFile, StarterRequest, UsersSource, default_class_name, parse_request,
};
