// Pipeline node and state types shared by the store, engine and serializer
use super::transform::{OptionMap, OptionValue};
use crate::config::constants::UPSTREAM_ERROR_MESSAGE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime handle of a node. Assigned by the store, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
    UpstreamError,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
            Self::UpstreamError => "upstream-error",
        }
    }

    /// Whether the node stopped the chain, either itself or through an earlier node
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::UpstreamError)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the pipeline together with its last result
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineNode {
    pub id: NodeId,
    pub transform_id: String,
    pub options: OptionMap,
    pub output: Option<String>,
    pub error: Option<String>,
    pub status: NodeStatus,
}

impl PipelineNode {
    pub(crate) fn new(id: NodeId, transform_id: String, options: OptionMap) -> Self {
        Self {
            id,
            transform_id,
            options,
            output: None,
            error: None,
            status: NodeStatus::Idle,
        }
    }
}

/// Persisted projection of a node: what it runs and how it is configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub transform_id: String,
    #[serde(default)]
    pub options: OptionMap,
}

impl NodeConfig {
    pub fn new(transform_id: impl Into<String>) -> Self {
        Self {
            transform_id: transform_id.into(),
            options: OptionMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key, value);
        self
    }
}

impl From<&PipelineNode> for NodeConfig {
    fn from(node: &PipelineNode) -> Self {
        Self {
            transform_id: node.transform_id.clone(),
            options: node.options.clone(),
        }
    }
}

/// Partial result written by the engine; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub status: Option<NodeStatus>,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl NodeUpdate {
    pub fn status(status: NodeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: Some(NodeStatus::Success),
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Some(NodeStatus::Error),
            output: None,
            error: Some(message.into()),
        }
    }

    pub fn upstream_error() -> Self {
        Self {
            status: Some(NodeStatus::UpstreamError),
            output: None,
            error: Some(UPSTREAM_ERROR_MESSAGE.to_string()),
        }
    }

    /// Merge into `node`. A terminal status also clears whichever of
    /// `output`/`error` it does not carry, so the two never coexist.
    pub(crate) fn apply(self, node: &mut PipelineNode) {
        if let Some(status) = self.status {
            node.status = status;
            match status {
                NodeStatus::Success => node.error = None,
                NodeStatus::Error | NodeStatus::UpstreamError => node.output = None,
                NodeStatus::Idle | NodeStatus::Running => {}
            }
        }
        if let Some(output) = self.output {
            node.output = Some(output);
        }
        if let Some(error) = self.error {
            node.error = Some(error);
        }
    }
}

/// Ordered node chain plus the raw text fed to its first node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    pub nodes: Vec<PipelineNode>,
    pub input: String,
}

impl PipelineState {
    pub fn node(&self, id: NodeId) -> Option<&PipelineNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Output of the whole chain: the last node's output, if it succeeded
    pub fn final_output(&self) -> Option<&str> {
        self.nodes
            .last()
            .filter(|node| node.status == NodeStatus::Success)
            .and_then(|node| node.output.as_deref())
    }

    pub fn node_configs(&self) -> Vec<NodeConfig> {
        self.nodes.iter().map(NodeConfig::from).collect()
    }
}
