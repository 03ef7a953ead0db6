use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use dvc_cli::config::Config;
use dvc_cli::pipeline::{PatternWarning, ResolveReport, load_model, pattern_warnings, resolve};
use dvc_model::Layer;
use dvc_store::{ImportError, ImportMode, LayerDocument, LayerPatch, LayerStore};

use crate::cli::{LayerCommand, ResolveArgs, ValidateArgs};

/// Resolves the model against the layer document. Returns the layers alongside
/// the report for display.
pub fn run_resolve(args: &ResolveArgs, config: &Config) -> Result<(ResolveReport, Vec<Layer>)> {
    let options = args.engine.overrides().apply(config.engine);
    let elements = load_model(&args.model)?;
    let document = LayerDocument::load(&args.layers, ImportMode::Strict)
        .with_context(|| format!("load layers {}", args.layers.display()))?;
    let report = resolve(&elements, &document.layers, options, args.with_ancestors);
    info!(
        visible = report.visible.len(),
        hidden = report.hidden.len(),
        "resolved visibility"
    );
    Ok((report, document.layers))
}

/// Outcome of `dvc validate`.
pub struct ValidateReport {
    pub layers: usize,
    pub error: Option<ImportError>,
    pub pattern_warnings: Vec<PatternWarning>,
}

impl ValidateReport {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateReport> {
    let mode = if args.lenient {
        ImportMode::Lenient
    } else {
        ImportMode::Strict
    };
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read layers {}", args.file.display()))?;
    Ok(match LayerDocument::from_json(&text, mode) {
        Ok(document) => ValidateReport {
            layers: document.layers.len(),
            error: None,
            pattern_warnings: pattern_warnings(&document.layers),
        },
        Err(error) => ValidateReport {
            layers: 0,
            error: Some(error),
            pattern_warnings: Vec::new(),
        },
    })
}

/// What a `dvc layer` command did.
pub enum LayerOutcome {
    Listed(LayerStore),
    Added(String),
    Edited,
}

pub fn run_layer(command: &LayerCommand) -> Result<LayerOutcome> {
    match command {
        LayerCommand::List { file } => load_store(file).map(LayerOutcome::Listed),
        LayerCommand::Add {
            file,
            name,
            mode,
            inactive,
        } => {
            let mut store = open_or_create(file)?;
            let id = store.add_layer();
            let mut patch = LayerPatch::default()
                .with_mode((*mode).into())
                .with_active(!inactive);
            patch.name.clone_from(name);
            store.update_layer(&id, &patch);
            save(&store, file)?;
            info!(layer = %id, path = %file.display(), "added layer");
            Ok(LayerOutcome::Added(id))
        }
        LayerCommand::Delete { file, layer_id } => {
            edit(file, |store| store.delete_layer(layer_id), || {
                format!("no layer with id '{layer_id}'")
            })
        }
        LayerCommand::Toggle { file, layer_id } => {
            edit(file, |store| store.toggle_layer(layer_id), || {
                format!("no layer with id '{layer_id}'")
            })
        }
        LayerCommand::Reorder { file, from, to } => edit(
            file,
            |store| store.reorder_layers(*from, *to),
            || format!("cannot move layer {from} to {to}"),
        ),
        LayerCommand::Rename {
            file,
            layer_id,
            name,
        } => edit(
            file,
            |store| {
                let exists = store.layer(layer_id).is_some();
                store.update_layer(layer_id, &LayerPatch::name(name.as_str()));
                exists
            },
            || format!("no layer with id '{layer_id}'"),
        ),
    }
}

fn load_store(file: &Path) -> Result<LayerStore> {
    let mut store = LayerStore::new();
    store
        .import_from_path(file, ImportMode::Strict)
        .with_context(|| format!("load layers {}", file.display()))?;
    Ok(store)
}

fn open_or_create(file: &Path) -> Result<LayerStore> {
    if file.exists() {
        load_store(file)
    } else {
        Ok(LayerStore::new())
    }
}

fn edit(
    file: &Path,
    change: impl FnOnce(&mut LayerStore) -> bool,
    missing: impl FnOnce() -> String,
) -> Result<LayerOutcome> {
    let mut store = load_store(file)?;
    if !change(&mut store) {
        bail!(missing());
    }
    save(&store, file)?;
    Ok(LayerOutcome::Edited)
}

fn save(store: &LayerStore, file: &Path) -> Result<()> {
    store
        .export_to_path(file)
        .with_context(|| format!("write layers {}", file.display()))
}
