//! Bot generation: fragments, request and composers in, one artifact out.

use std::path::{Path, PathBuf};

use botforge_core::{AtomicWriter, GeneratedFile, Persist, WriteResult, expand_tabs, indent};
use botforge_fragments::{FragmentStore, Slots, ids};
use botforge_request::{FeatureId, GenerationRequest, Modules};

use crate::{BotFile, ComposerRegistry, Diagnostic, GenerateError, Result, Signature};

/// Extension of generated bot modules.
pub const DEFAULT_EXTENSION: &str = "py";

/// Docstring used when the request has no `class_doc`.
pub const DEFAULT_CLASS_DOC: &str = "A class generated by botforge";

/// Indentation of `__init__` and launch code statements.
const BLOCK_BODY: usize = 4;

/// Leading parameters of the generated `__init__`.
const INIT_LEADING: [&str; 2] = ["self", "token"];

/// A rendered artifact that has not been written yet.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub file: BotFile,
    pub diagnostics: Vec<Diagnostic>,
}

/// A generated file for preview.
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    pub content: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of writing an artifact.
#[derive(Debug)]
pub struct GenerateResult {
    pub path: PathBuf,
    pub write: WriteResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders bots from a fragment store.
///
/// The store is only read. Each call renders the whole artifact before
/// anything touches the output directory.
pub struct Generator<'a> {
    store: &'a dyn FragmentStore,
    registry: ComposerRegistry,
    extension: String,
}

impl<'a> Generator<'a> {
    pub fn new(store: &'a dyn FragmentStore) -> Self {
        Self {
            store,
            registry: ComposerRegistry::with_defaults(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different artifact extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a custom composer registry.
    pub fn with_registry(mut self, registry: ComposerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Compose the artifact text for `request`.
    pub fn render(&self, request: &GenerationRequest) -> Result<Rendered> {
        let mut diagnostics = Vec::new();

        let class_name = request.resolved_class_name();
        let class_doc = request.class_doc.as_deref().unwrap_or(DEFAULT_CLASS_DOC);

        let modules = import_block(&request.modules, &mut diagnostics);

        let mut init_code = match &request.init_code {
            Some(code) => indent(&expand_tabs(code), BLOCK_BODY),
            None => self.store.get(ids::DEF_INIT)?.render(&Slots::new())?,
        };
        init_code.push_str("\n\n");

        let init_args = Signature::build(&INIT_LEADING, &request.init_args).to_string();

        if request.notifications.is_some() && !request.has_feature(FeatureId::Notifications) {
            tracing::warn!(
                file_name = %request.file_name,
                "notification settings ignored: feature 0 not requested"
            );
            diagnostics.push(
                Diagnostic::warning(
                    "features",
                    "notification settings are ignored because feature 0 is not requested",
                )
                .at("notifications"),
            );
        }

        let mut body = String::new();
        for &feature in &request.features {
            let composer = self
                .registry
                .get(feature)
                .ok_or(GenerateError::NotImplemented { feature })?;
            let contribution = composer.compose(request, self.store)?;
            init_code.push_str(&contribution.init);
            body.push_str(&contribution.body);
            diagnostics.extend(contribution.diagnostics);
            tracing::debug!(%feature, "feature composed");
        }

        let mut content = self.store.get(ids::CODE_START)?.render(
            &Slots::new()
                .with("modules", &modules)
                .with("class_name", &class_name)
                .with("class_doc", class_doc)
                .with("init_args", &init_args)
                .with("init_code", &init_code),
        )?;
        content.push_str(&body);

        if let Some(code) = &request.launch_code {
            let own_code = indent(&expand_tabs(code), BLOCK_BODY);
            let launch = self
                .store
                .get(ids::LAUNCH)?
                .render(&Slots::new().with("own_code", &own_code))?;
            content.push_str(&launch);
        }

        Ok(Rendered {
            file: BotFile::new(&request.file_name, &self.extension, content),
            diagnostics,
        })
    }

    /// Render without writing anything.
    pub fn preview(&self, request: &GenerationRequest) -> Result<PreviewFile> {
        let rendered = self.render(request)?;
        Ok(PreviewFile {
            path: rendered.file.relative_path(),
            content: rendered.file.into_content(),
            diagnostics: rendered.diagnostics,
        })
    }

    /// Render and atomically write `<output_dir>/<file_name>.<extension>`.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        output_dir: &Path,
    ) -> Result<GenerateResult> {
        self.generate_with(request, output_dir, &AtomicWriter)
    }

    /// Render and write through `persist`.
    pub fn generate_with(
        &self,
        request: &GenerationRequest,
        output_dir: &Path,
        persist: &dyn Persist,
    ) -> Result<GenerateResult> {
        let Rendered { file, diagnostics } = self.render(request)?;
        let path = file.path(output_dir);

        let write = file
            .write_with(output_dir, persist)
            .map_err(|source| GenerateError::Persist {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), ?write, "bot generated");

        Ok(GenerateResult {
            path,
            write,
            diagnostics,
        })
    }
}

/// Import statements for the module header.
fn import_block(modules: &Modules, diagnostics: &mut Vec<Diagnostic>) -> String {
    match modules {
        Modules::Absent => String::new(),
        Modules::List(names) => names.iter().map(|name| format!("import {name}\n")).collect(),
        Modules::Text(text) => format!("{text}\n"),
        Modules::Unsupported(found) => {
            tracing::warn!(found = %found, "unsupported modules value, no modules imported");
            diagnostics.push(
                Diagnostic::warning(
                    "modules",
                    format!(
                        "modules must be a list of names or import text, found {found}; no modules were imported"
                    ),
                )
                .at("bot.modules"),
            );
            String::new()
        }
    }
}
