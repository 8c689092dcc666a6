//! Check operation - request validation.

use std::path::Path;

use botforge_codegen::Generator;
use botforge_fragments::FragmentStore;
use botforge_request::GenerationRequest;

use super::{feature_names, partition};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Renders the request against the store without writing, so missing
/// fragments and unimplemented features surface as errors.
pub fn check(
    request: &GenerationRequest,
    store: &dyn FragmentStore,
    extension: &str,
    request_path: &Path,
) -> CheckReport {
    let generator = Generator::new(store).with_extension(extension);

    let (errors, warnings, infos) = match generator.preview(request) {
        Ok(preview) => {
            let (warnings, infos) = partition(&preview.diagnostics);
            (Vec::new(), warnings, infos)
        }
        Err(err) => (vec![err.to_string()], Vec::new(), Vec::new()),
    };

    CheckReport {
        request_path: request_path.to_path_buf(),
        class_name: request.resolved_class_name(),
        artifact: format!("{}.{}", request.file_name, generator.extension()),
        features: feature_names(request),
        errors,
        warnings,
        infos,
    }
}
