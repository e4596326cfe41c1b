// Pipeline engine - sequential, short-circuiting execution of the node chain
use super::node::{NodeStatus, NodeUpdate};
use super::registry::TransformRegistry;
use super::store::PipelineStore;
use super::transform::{OptionMap, Transform};
use crate::config::constants::FALLBACK_ERROR_MESSAGE;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, debug, info_span, warn};

/// Runs the pipeline held by a [`PipelineStore`].
///
/// A run never returns an error: every failure is recorded on the node that
/// raised it, and all later nodes are marked `upstream-error`. Runs are not
/// guarded against each other; two overlapping runs on one store interleave
/// their writes and the last write per node wins.
pub struct PipelineEngine {
    registry: Arc<TransformRegistry>,
    runs: AtomicU64,
}

impl PipelineEngine {
    pub fn new(registry: Arc<TransformRegistry>) -> Self {
        Self {
            registry,
            runs: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    /// Recompute every node from the store's current input
    pub async fn run(&self, store: &PipelineStore) {
        let state = store.snapshot();
        if state.nodes.is_empty() {
            debug!("Pipeline is empty, nothing to run");
            return;
        }

        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        let span = info_span!("pipeline_run", run, nodes = state.nodes.len());

        async move {
            store.set_all_node_statuses(NodeStatus::Idle);

            let mut current = state.input;
            let mut upstream_failed = false;

            for (index, node) in state.nodes.iter().enumerate() {
                if upstream_failed {
                    debug!("Skipping node {} ({}): upstream failed", index + 1, node.id);
                    store.update_node_result(node.id, NodeUpdate::upstream_error());
                    continue;
                }

                let Some(transform) = self.registry.lookup(&node.transform_id) else {
                    let message = format!("Transform \"{}\" not found", node.transform_id);
                    warn!("Node {} ({}): {}", index + 1, node.id, message);
                    store.update_node_result(node.id, NodeUpdate::failure(message));
                    upstream_failed = true;
                    continue;
                };

                debug!("Processing node {}: '{}'", index + 1, node.transform_id);
                store.update_node_result(node.id, NodeUpdate::status(NodeStatus::Running));

                match execute(transform, &current, &node.options).await {
                    Ok(output) => {
                        debug!("Node '{}' processed successfully", node.transform_id);
                        store.update_node_result(node.id, NodeUpdate::success(output.clone()));
                        current = output;
                    }
                    Err(message) => {
                        warn!("Node {} ('{}') failed: {}", index + 1, node.transform_id, message);
                        store.update_node_result(node.id, NodeUpdate::failure(message));
                        upstream_failed = true;
                    }
                }
            }

            debug!("Pipeline run finished");
        }
        .instrument(span)
        .await
    }
}

/// Run one transform on the caller's task, turning a panic into a node failure
async fn execute(
    transform: Arc<dyn Transform>,
    input: &str,
    options: &OptionMap,
) -> Result<String, String> {
    let result = AssertUnwindSafe(transform.run(input, options))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) => Err(failure_message(err.to_string())),
        Err(payload) => Err(failure_message(panic_message(payload))),
    }
}

fn failure_message(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}
