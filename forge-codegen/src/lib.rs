//! Bot artifact generation for botforge.
//!
//! A [`Generator`] reads fragments from a [`FragmentStore`](botforge_fragments::FragmentStore),
//! asks one [`FeatureComposer`] per requested feature for its code and
//! writes a single module per request.
//!
//! # Module Organization
//!
//! - [`Generator`] - orchestration, preview and persistence
//! - [`features`] - feature composers and their registry
//! - [`Signature`] - parameter lists for generated methods
//! - [`testing`] - test doubles (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod artifact;
mod diagnostic;
mod error;
pub mod features;
mod generator;
mod signature;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use artifact::BotFile;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{GenerateError, Result};
pub use features::{ComposerRegistry, Contribution, FeatureComposer, NotificationsComposer};
pub use generator::{
    DEFAULT_CLASS_DOC, DEFAULT_EXTENSION, GenerateResult, Generator, PreviewFile, Rendered,
};
pub use signature::Signature;
