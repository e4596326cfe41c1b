// Transform registry - resolves transform ids to callable units
use super::transform::Transform;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collects transforms at startup. Consumed by [`build`](Self::build).
pub struct TransformRegistryBuilder {
    transforms: IndexMap<String, Arc<dyn Transform>>,
}

impl TransformRegistryBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self {
            transforms: IndexMap::new(),
        }
    }

    /// Register a transform under its own id.
    ///
    /// Registering an id twice replaces the earlier transform but keeps its
    /// position in the listing order.
    pub fn register<T>(&mut self, transform: T) -> &mut Self
    where
        T: Transform + 'static,
    {
        self.register_shared(Arc::new(transform))
    }

    /// Register an already shared transform
    pub fn register_shared(&mut self, transform: Arc<dyn Transform>) -> &mut Self {
        let id = transform.id().to_string();
        if self.transforms.insert(id.clone(), transform).is_some() {
            warn!("Transform '{}' registered twice, keeping the latest", id);
        } else {
            debug!("Registered transform '{}'", id);
        }
        self
    }

    /// Freeze the registry
    pub fn build(self) -> TransformRegistry {
        TransformRegistry {
            transforms: self.transforms,
        }
    }
}

impl Default for TransformRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup table of transforms
pub struct TransformRegistry {
    transforms: IndexMap<String, Arc<dyn Transform>>,
}

impl TransformRegistry {
    pub fn builder() -> TransformRegistryBuilder {
        TransformRegistryBuilder::new()
    }

    /// Resolve a transform by id. Unknown ids are not an error here.
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Transform>> {
        self.transforms.get(id).cloned()
    }

    /// Check if a transform is registered
    pub fn contains(&self, id: &str) -> bool {
        self.transforms.contains_key(id)
    }

    /// All transforms in registration order
    pub fn list_all(&self) -> impl Iterator<Item = &Arc<dyn Transform>> {
        self.transforms.values()
    }

    /// All registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.transforms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        TransformRegistryBuilder::new().build()
    }
}
