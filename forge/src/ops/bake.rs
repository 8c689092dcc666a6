//! Bake operation - bot generation from a request.

use std::path::Path;

use botforge_codegen::Generator;
use botforge_fragments::FragmentStore;
use botforge_request::GenerationRequest;
use eyre::{Context, Result};

use super::{feature_names, partition};
use crate::reports::{BakeReport, GenerationResult, PreviewFile, WrittenResult};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory for the generated module.
    pub output_dir: &'a Path,
    /// Extension of the generated module, without the dot.
    pub extension: &'a str,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
pub fn bake(
    request: &GenerationRequest,
    store: &dyn FragmentStore,
    opts: BakeOptions,
) -> Result<BakeReport> {
    let generator = Generator::new(store).with_extension(opts.extension);

    let (result, diagnostics) = if opts.dry_run {
        let preview = generator
            .preview(request)
            .wrap_err("Failed to render bot")?;
        (
            GenerationResult::Preview(PreviewFile {
                path: preview.path,
                content: preview.content,
            }),
            preview.diagnostics,
        )
    } else {
        let generated = generator
            .generate(request, opts.output_dir)
            .wrap_err("Failed to generate bot")?;
        (
            GenerationResult::Written(WrittenResult {
                path: generated.path,
                write: generated.write,
            }),
            generated.diagnostics,
        )
    };

    let (warnings, infos) = partition(&diagnostics);

    Ok(BakeReport {
        class_name: request.resolved_class_name(),
        features: feature_names(request),
        warnings,
        infos,
        result,
    })
}
