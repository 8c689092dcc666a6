use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for fragment lookups and rendering
pub type Result<T> = std::result::Result<T, FragmentError>;

/// Boxed cause of a store failure (SQLite, I/O or TOML errors).
pub type StoreCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, Diagnostic)]
pub enum FragmentError {
    #[error("fragment '{id}' not found in {store}")]
    #[diagnostic(
        code(botforge::fragment_not_found),
        help("run 'forge fragments list' to see the fragments this store provides")
    )]
    NotFound { id: String, store: String },

    #[error("fragment store '{store}' is unavailable")]
    #[diagnostic(
        code(botforge::store_unavailable),
        help("check the --fragments path, or omit it to use the built-in fragments")
    )]
    Unavailable {
        store: String,
        #[source]
        source: StoreCause,
    },

    #[error("fragment '{id}' has a malformed template: {reason}")]
    #[diagnostic(code(botforge::malformed_fragment))]
    Malformed {
        id: String,
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
    },

    #[error("fragment '{id}' requires slot '{slot}'")]
    #[diagnostic(
        code(botforge::missing_slot),
        help("the fragment declares '{{{slot}}}' but the generator did not supply it")
    )]
    MissingSlot { id: String, slot: String },

    #[error("fragment '{id}' has no slot '{slot}'")]
    #[diagnostic(
        code(botforge::unknown_slot),
        help("add '{{{slot}}}' to the fragment, or '{{{slot}?}}' if it may stay empty")
    )]
    UnknownSlot { id: String, slot: String },
}

impl FragmentError {
    /// Create an unavailable-store error from any underlying cause.
    pub fn unavailable(
        store: impl Into<String>,
        source: impl Into<StoreCause>,
    ) -> Self {
        FragmentError::Unavailable {
            store: store.into(),
            source: source.into(),
        }
    }

    pub(crate) fn malformed(
        id: &str,
        template: &str,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        FragmentError::Malformed {
            id: id.to_string(),
            reason: reason.into(),
            src: NamedSource::new(id, template.to_string()),
            span: span.into(),
        }
    }

    /// Whether this error means the store itself could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FragmentError::Unavailable { .. })
    }
}
