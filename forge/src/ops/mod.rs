//! Core operations.
//!
//! This module contains the business logic for forge commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
pub mod fragments;

pub use bake::bake;
pub use check::check;

use botforge_codegen::Diagnostic;
use botforge_request::GenerationRequest;

/// A diagnostic message followed by its request location, if any.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

/// Split diagnostics into formatted warnings and infos.
fn partition(diagnostics: &[Diagnostic]) -> (Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in diagnostics {
        if diag.severity.is_warning() {
            warnings.push(describe(diag));
        } else {
            infos.push(describe(diag));
        }
    }
    (warnings, infos)
}

fn feature_names(request: &GenerationRequest) -> Vec<String> {
    request
        .features
        .iter()
        .map(|feature| feature.name().to_string())
        .collect()
}
