//! Named pipelines saved by the user
use crate::error::Result;
use crate::pipeline::{NodeConfig, PipelineStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPipeline {
    pub id: String,
    pub name: String,
    pub nodes: Vec<NodeConfig>,
    pub input: String,
    /// Milliseconds since the Unix epoch
    pub saved_at: u64,
}

impl SavedPipeline {
    /// Replace the store's pipeline with this one
    pub fn load_into(&self, store: &PipelineStore) {
        store.load_pipeline(self.nodes.iter().cloned(), self.input.clone());
    }
}

/// Saved pipelines keyed by name, most recently saved first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedPipelines {
    entries: Vec<SavedPipeline>,
}

impl SavedPipelines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file. A missing file is an empty library.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let saved: Self = serde_json::from_str(&content)?;
                debug!("Loaded {} saved pipelines from {:?}", saved.len(), path);
                Ok(saved)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved pipelines at {:?}", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!("Wrote {} saved pipelines to {:?}", self.len(), path);
        Ok(())
    }

    /// Save under `name`, replacing any pipeline with the same name
    pub fn save(
        &mut self,
        name: impl Into<String>,
        nodes: Vec<NodeConfig>,
        input: impl Into<String>,
    ) -> &SavedPipeline {
        let name = name.into();
        let saved_at = now_millis();
        self.entries.retain(|entry| entry.name != name);
        info!("Saving pipeline '{}' ({} nodes)", name, nodes.len());
        let id = self.unique_id(saved_at);
        self.entries.insert(
            0,
            SavedPipeline {
                id,
                name,
                nodes,
                input: input.into(),
                saved_at,
            },
        );
        &self.entries[0]
    }

    pub fn get(&self, name: &str) -> Option<&SavedPipeline> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != before
    }

    pub fn list(&self) -> &[SavedPipeline] {
        &self.entries
    }

    /// Hex timestamp, suffixed when another record already took it
    fn unique_id(&self, saved_at: u64) -> String {
        let base = format!("{saved_at:x}");
        let taken = |id: &str| self.entries.iter().any(|entry| entry.id == id);
        if !taken(&base) {
            return base;
        }
        (1u64..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| !taken(id))
            .unwrap_or(base)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
