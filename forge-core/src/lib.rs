//! Core utilities and types for the botforge generator.
//!
//! This crate provides the text primitives and file plumbing shared
//! across the botforge crates.

mod file;
mod indent;
mod literal;
mod utils;

// File operations
pub use file::{AtomicWriter, GeneratedFile, Persist, WriteResult};
// Text layout
pub use indent::indent;
// Python literal rendering
pub use literal::PyLiteral;
// String utilities
pub use utils::{capitalize, expand_tabs, toml_value_to_literal_text, toml_value_type};
