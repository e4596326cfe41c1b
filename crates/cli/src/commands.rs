use crate::cli::PipelineArgs;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;
use strand_core::error::{Result, StrandError};
use strand_core::pipeline::serializer;
use strand_core::pipeline::{
    NodeStatus, OptionKind, PipelineEngine, PipelineStore, SharedPipeline, TransformRegistry,
};
use strand_core::saved::SavedPipelines;
use strand_transforms::{find_template, templates};
use tracing::{debug, info, warn};

/// Build a store from the command line: base pipeline, appended steps, options and input
pub fn build_pipeline(
    args: &PipelineArgs,
    library: &Path,
    registry: &TransformRegistry,
) -> Result<PipelineStore> {
    let store = PipelineStore::new();
    let mut has_input = false;

    if let Some(config) = &args.config {
        let shared = decode_config(config)
            .ok_or_else(|| StrandError::invalid_config("config could not be decoded"))?;
        debug!("Loaded {} nodes from config", shared.nodes.len());
        store.load_pipeline(shared.nodes, shared.input);
        has_input = true;
    } else if let Some(id) = &args.template {
        let template = find_template(id)
            .ok_or_else(|| StrandError::invalid_config(format!("Template '{}' not found", id)))?;
        template.load_into(&store);
        has_input = true;
    } else if let Some(name) = &args.saved {
        let saved = SavedPipelines::load(library)?;
        let pipeline = saved.get(name).ok_or_else(|| {
            StrandError::invalid_config(format!("Saved pipeline '{}' not found", name))
        })?;
        pipeline.load_into(&store);
        has_input = true;
    }

    for transform_id in &args.transforms {
        if !registry.contains(transform_id) {
            warn!("Transform '{}' is not registered", transform_id);
        }
        store.add_node(transform_id.as_str());
    }

    let nodes = store.snapshot().nodes;
    for option in &args.options {
        let node = nodes.get(option.step - 1).ok_or_else(|| {
            StrandError::invalid_config(format!(
                "Option '{}' targets step {} but the pipeline has {} steps",
                option.key,
                option.step,
                nodes.len()
            ))
        })?;
        store.set_node_option(node.id, option.key.as_str(), option.value.clone());
    }

    if let Some(input) = &args.input {
        store.set_input(input.as_str());
    } else if let Some(path) = &args.input_file {
        store.set_input(std::fs::read_to_string(path)?);
    } else if !has_input && !std::io::stdin().is_terminal() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        store.set_input(input);
    }

    Ok(store)
}

/// Accept either a share link or a bare encoded config
fn decode_config(config: &str) -> Option<SharedPipeline> {
    if config.contains('#') {
        serializer::from_share_url(config)
    } else {
        serializer::decode(config)
    }
}

pub fn list_command(registry: &TransformRegistry) {
    for transform in registry.list_all() {
        println!(
            "{:<16} {} - {}",
            transform.id(),
            transform.name(),
            transform.description()
        );
        for option in transform.options() {
            let kind = match &option.kind {
                OptionKind::Text => "text".to_string(),
                OptionKind::Number => "number".to_string(),
                OptionKind::Boolean => "boolean".to_string(),
                OptionKind::Select { choices } => choices.join("|"),
            };
            println!(
                "{:<16}   {}: {} [{}, default {}]",
                "", option.key, option.label, kind, option.default
            );
        }
    }
}

pub async fn run_command(
    registry: Arc<TransformRegistry>,
    args: &PipelineArgs,
    library: &Path,
    quiet: bool,
    save: Option<String>,
) -> Result<()> {
    let store = build_pipeline(args, library, &registry)?;
    if store.is_empty() {
        return Err(StrandError::invalid_config(
            "Pipeline has no steps, add some with --transform",
        ));
    }

    let engine = PipelineEngine::new(registry);
    engine.run(&store).await;
    let state = store.snapshot();

    if !quiet {
        for (index, node) in state.nodes.iter().enumerate() {
            match (&node.status, &node.error) {
                (NodeStatus::Error, Some(error)) => {
                    eprintln!("[{}] {}: {} ({})", index + 1, node.transform_id, node.status, error)
                }
                _ => eprintln!("[{}] {}: {}", index + 1, node.transform_id, node.status),
            }
        }
    }

    if let Some(name) = save {
        let mut saved = SavedPipelines::load(library)?;
        saved.save(name.as_str(), state.node_configs(), state.input.as_str());
        saved.persist(library)?;
        info!("Saved pipeline '{}' to {:?}", name, library);
    }

    if let Some(output) = state.final_output() {
        println!("{output}");
        return Ok(());
    }

    let failed = state
        .nodes
        .iter()
        .enumerate()
        .find(|(_, node)| node.status == NodeStatus::Error);
    match failed {
        Some((index, node)) => Err(StrandError::pipeline(format!(
            "Step {} ({}) failed: {}",
            index + 1,
            node.transform_id,
            node.error.as_deref().unwrap_or_default()
        ))),
        None => Err(StrandError::pipeline("Pipeline produced no output")),
    }
}

pub fn share_command(
    registry: &TransformRegistry,
    args: &PipelineArgs,
    library: &Path,
    raw: bool,
    base_url: &str,
) -> Result<()> {
    let state = build_pipeline(args, library, registry)?.snapshot();

    if raw {
        println!("{}", serializer::encode(&state.nodes, &state.input)?);
        return Ok(());
    }

    let url = serializer::share_url_with_base(base_url, &state.nodes, &state.input);
    if url.is_empty() {
        return Err(StrandError::other(
            "Pipeline is too large for a share link, use --raw instead",
        ));
    }
    println!("{url}");
    Ok(())
}

pub fn decode_command(config: &str) -> Result<()> {
    let shared = decode_config(config)
        .ok_or_else(|| StrandError::invalid_config("config could not be decoded"))?;
    println!("{}", serde_json::to_string_pretty(&shared)?);
    Ok(())
}

pub fn templates_command() {
    for template in templates() {
        let steps: Vec<&str> = template
            .nodes
            .iter()
            .map(|node| node.transform_id.as_str())
            .collect();
        println!("{:<16} {} - {}", template.id, template.name, template.description);
        println!("{:<16}   {}", "", steps.join(" -> "));
    }
}

pub fn saved_list_command(library: &Path) -> Result<()> {
    let saved = SavedPipelines::load(library)?;
    if saved.is_empty() {
        info!("No saved pipelines in {:?}", library);
        return Ok(());
    }
    for pipeline in saved.list() {
        let steps: Vec<&str> = pipeline
            .nodes
            .iter()
            .map(|node| node.transform_id.as_str())
            .collect();
        println!("{:<16} {}", pipeline.name, steps.join(" -> "));
    }
    Ok(())
}

pub fn saved_delete_command(library: &Path, name: &str) -> Result<()> {
    let mut saved = SavedPipelines::load(library)?;
    if !saved.delete(name) {
        return Err(StrandError::invalid_config(format!(
            "Saved pipeline '{}' not found",
            name
        )));
    }
    saved.persist(library)?;
    info!("Deleted saved pipeline '{}'", name);
    Ok(())
}
