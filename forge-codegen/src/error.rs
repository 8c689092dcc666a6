use std::path::PathBuf;

use botforge_fragments::FragmentError;
use botforge_request::FeatureId;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors that abort a generation request.
///
/// None of them leave a partial artifact behind.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fragment(#[from] FragmentError),

    #[error("feature '{}' (id {}) is not implemented", .feature, .feature.id())]
    #[diagnostic(
        code(botforge::not_implemented),
        help("remove it from `features` or register a composer for it")
    )]
    NotImplemented { feature: FeatureId },

    #[error("failed to read users file '{path}'")]
    #[diagnostic(
        code(botforge::users_file),
        help("users_type = 1 reads one user id per line from this file")
    )]
    UsersFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(botforge::persist))]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
