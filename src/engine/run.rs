use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use serde_json::Value;

use crate::config::{FanoutRule, GenerationConfig};
use crate::error::Error;
use crate::render::Renderer;
use crate::storage::Storage;
use crate::templates::TemplateStore;
use crate::transform::ModelTransformer;

use super::fanout;

/// Outcome of a successful generation run.
///
/// Paths are absolute-or-relative exactly as written, all under
/// `<outputDir>/<configName>/`.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// Root the run populated: `<outputDir>/<configName>/`.
    pub output_root: PathBuf,
    /// Files written by static actions, the license step, and fan-out.
    pub written: Vec<PathBuf>,
    /// Touch targets created empty because nothing existed there.
    pub touched: Vec<PathBuf>,
    /// Touch targets left alone because a file already existed.
    pub preserved: Vec<PathBuf>,
}

/// The generation engine: turns a raw model plus a named configuration into
/// a rendered file tree.
///
/// Collaborators are injected: the storage backend, the renderer, and the
/// model transformer. A single engine can run many configurations; each
/// [`Engine::generate`] call is one single-pass, strictly sequential run
/// with no retries and no rollback.
pub struct Engine {
    storage: Arc<dyn Storage>,
    renderer: Box<dyn Renderer>,
    transformer: Box<dyn ModelTransformer>,
    template_root: PathBuf,
}

impl Engine {
    pub fn new(
        storage: Arc<dyn Storage>,
        renderer: Box<dyn Renderer>,
        transformer: Box<dyn ModelTransformer>,
    ) -> Self {
        Self {
            storage,
            renderer,
            transformer,
            template_root: PathBuf::from("./templates"),
        }
    }

    /// Override the template root (default `./templates`).
    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }

    /// Run one generation: transform the raw input, load templates, reset
    /// the output directory, then render static actions, touch files, the
    /// license, and the three fan-out dimensions.
    ///
    /// Destructive: the contents of `<outputDir>/<configName>/` are removed
    /// before anything is written. On failure the error surfaces once and
    /// whatever was already written stays on disk.
    pub fn generate(
        &self,
        raw: &Value,
        config: &GenerationConfig,
        config_name: &str,
    ) -> Result<GenerationSummary, Error> {
        let verbose = config.verbose();

        // Step 1: transform. The configuration name is injected into the
        // defaults before the transformer sees them, and the same injected
        // map flows into the per-API overlay contexts below.
        let mut options = config.defaults.clone();
        options.insert(
            "configName".to_string(),
            Value::String(config_name.to_string()),
        );
        let model = self
            .transformer
            .transform(raw, &options)
            .map_err(Error::Transform)?;

        // Step 2: load partials, then every static action's template body.
        let store = TemplateStore::new(self.storage.clone(), &self.template_root, config_name);
        if verbose {
            for file in config.partials.values() {
                info!("processing partial {file}");
            }
        }
        let partials = store.load_partials(&config.partials)?;

        let mut actions = Vec::new();
        for tx in &config.transformations {
            if let Some(input) = &tx.input {
                if verbose {
                    info!("processing template {input}");
                }
                actions.push((tx.output.clone(), store.load_template(input)?));
            }
        }

        // Step 3: reset the output directory.
        let output_root = Path::new(&config.output_dir).join(config_name);
        if verbose {
            info!("making/cleaning output directory {}", output_root.display());
        }
        self.storage.ensure_dir(&output_root)?;
        self.storage.remove_tree(&output_root)?;

        // Step 4: declared subdirectories, before any write.
        for dir in &config.directories {
            self.storage.ensure_dir_sync(&output_root.join(dir))?;
        }

        let mut summary = GenerationSummary {
            output_root: output_root.clone(),
            ..Default::default()
        };

        // Step 5: static actions, literal output names.
        for (output, body) in &actions {
            if verbose {
                info!("rendering {output}");
            }
            let content = self.renderer.render(output, body, &model, &partials)?;
            let path = output_root.join(output);
            self.storage.write_text(&path, &content)?;
            summary.written.push(path);
        }

        // Step 6: touch files, created empty only where nothing exists.
        if let Some(touch) = &config.touch {
            let list = self.renderer.render("touch", touch, &model, &partials)?;
            for line in list.lines() {
                let file = line.trim();
                if file.is_empty() {
                    continue;
                }
                let path = output_root.join(file);
                if self.storage.exists(&path) {
                    summary.preserved.push(path);
                } else {
                    self.storage.write_text(&path, "")?;
                    summary.touched.push(path);
                }
            }
        }

        // Step 7: license, copied verbatim from the common set.
        let license = if config.apache {
            store.load_common("LICENSE")?
        } else {
            store.load_common("UNLICENSE")?
        };
        let license_path = output_root.join("LICENSE");
        self.storage.write_text(&license_path, &license)?;
        summary.written.push(license_path);

        // Step 8: fan-out, one file per rule x item.
        let api_contexts = fanout::per_api_contexts(&model, &options);
        self.render_fanout(&config.per_api, &api_contexts, &store, &partials, verbose, &output_root, &mut summary)?;

        let model_contexts = fanout::per_model_contexts(&model);
        self.render_fanout(&config.per_model, &model_contexts, &store, &partials, verbose, &output_root, &mut summary)?;

        let operation_contexts = fanout::per_operation_contexts(&model);
        self.render_fanout(&config.per_operation, &operation_contexts, &store, &partials, verbose, &output_root, &mut summary)?;

        Ok(summary)
    }

    /// Render one fan-out dimension: for each rule and each context, the
    /// output filename is itself rendered, then the rule's template is
    /// loaded fresh and rendered against the same context.
    #[allow(clippy::too_many_arguments)]
    fn render_fanout(
        &self,
        rules: &[FanoutRule],
        contexts: &[Value],
        store: &TemplateStore,
        partials: &std::collections::BTreeMap<String, String>,
        verbose: bool,
        output_root: &Path,
        summary: &mut GenerationSummary,
    ) -> Result<(), Error> {
        for rule in rules {
            for context in contexts {
                let filename = self
                    .renderer
                    .render(&rule.output, &rule.output, context, partials)?;
                let filename = filename.trim();
                let template = store.load_template(&rule.input)?;
                if verbose {
                    info!("rendering {filename} (dynamic)");
                }
                let content = self
                    .renderer
                    .render(&rule.input, &template, context, partials)?;
                let path = output_root.join(filename);
                self.storage.write_text(&path, &content)?;
                summary.written.push(path);
            }
        }
        Ok(())
    }
}
