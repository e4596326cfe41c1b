// Pipeline state store - observable owner of the node chain
use super::node::{NodeConfig, NodeId, NodeStatus, NodeUpdate, PipelineNode, PipelineState};
use super::transform::{OptionMap, OptionValue};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::trace;

/// In-memory container for a pipeline's nodes and input.
///
/// Every transition runs under the channel's write lock, so readers never
/// observe a half-applied change. Subscribers are woken only by transitions
/// that actually modified the state. Operations on unknown ids or
/// out-of-range indices are no-ops and report `false`.
pub struct PipelineStore {
    state: watch::Sender<PipelineState>,
    next_id: AtomicU64,
}

impl PipelineStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            state,
            next_id: AtomicU64::new(1),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Watch for state changes
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn input(&self) -> String {
        self.state.borrow().input.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().nodes.is_empty()
    }

    /// Current nodes projected to their persisted form
    pub fn node_configs(&self) -> Vec<NodeConfig> {
        self.state.borrow().node_configs()
    }

    fn fresh_id(&self) -> NodeId {
        NodeId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn set_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.state.send_if_modified(|state| {
            if state.input == input {
                return false;
            }
            state.input = input;
            true
        });
    }

    /// Append an idle node with empty options
    pub fn add_node(&self, transform_id: impl Into<String>) -> NodeId {
        let id = self.fresh_id();
        let transform_id = transform_id.into();
        trace!("Adding {} ({})", id, transform_id);
        self.state.send_modify(|state| {
            state
                .nodes
                .push(PipelineNode::new(id, transform_id, OptionMap::new()));
        });
        id
    }

    pub fn remove_node(&self, id: NodeId) -> bool {
        self.state.send_if_modified(|state| match state.position(id) {
            Some(index) => {
                state.nodes.remove(index);
                true
            }
            None => false,
        })
    }

    /// Move the node at `from` so that it ends up at index `to`
    pub fn move_node(&self, from: usize, to: usize) -> bool {
        self.state.send_if_modified(|state| {
            let len = state.nodes.len();
            if from >= len || to >= len || from == to {
                return false;
            }
            let node = state.nodes.remove(from);
            state.nodes.insert(to, node);
            true
        })
    }

    /// Merge a single option into a node's options
    pub fn set_node_option(
        &self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> bool {
        let key = key.into();
        let value = value.into();
        self.state
            .send_if_modified(|state| match state.nodes.iter_mut().find(|n| n.id == id) {
                Some(node) => {
                    node.options.insert(key, value);
                    true
                }
                None => false,
            })
    }

    /// Merge an execution result into a node
    pub fn update_node_result(&self, id: NodeId, update: NodeUpdate) -> bool {
        self.state
            .send_if_modified(|state| match state.nodes.iter_mut().find(|n| n.id == id) {
                Some(node) => {
                    update.apply(node);
                    true
                }
                None => false,
            })
    }

    /// Set every node's status and clear all outputs and errors
    pub fn set_all_node_statuses(&self, status: NodeStatus) {
        self.state.send_if_modified(|state| {
            for node in &mut state.nodes {
                node.status = status;
                node.output = None;
                node.error = None;
            }
            !state.nodes.is_empty()
        });
    }

    pub fn clear_pipeline(&self) {
        self.state.send_modify(|state| {
            state.nodes.clear();
            state.input.clear();
        });
    }

    /// Replace the whole pipeline with fresh idle nodes built from `configs`
    pub fn load_pipeline<I>(&self, configs: I, input: impl Into<String>)
    where
        I: IntoIterator<Item = NodeConfig>,
    {
        let nodes: Vec<PipelineNode> = configs
            .into_iter()
            .map(|config| PipelineNode::new(self.fresh_id(), config.transform_id, config.options))
            .collect();
        let input = input.into();
        self.state.send_modify(|state| {
            state.nodes = nodes;
            state.input = input;
        });
    }
}

impl Default for PipelineStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let store = PipelineStore::new();
        let a = store.add_node("a");
        store.clear_pipeline();
        let b = store.add_node("b");
        store.load_pipeline([NodeConfig::new("c")], "");
        let c = store.snapshot().nodes[0].id;

        assert!(a < b && b < c);
    }

    #[test]
    fn test_unchanged_input_does_not_notify() {
        let store = PipelineStore::new();
        store.set_input("same");
        let rx = store.subscribe();
        store.set_input("same");
        assert!(!rx.has_changed().unwrap());
        store.set_input("other");
        assert!(rx.has_changed().unwrap());
    }
}
