// Transform registration for the built-in set
use std::sync::Arc;
use strand_core::pipeline::{TransformRegistry, TransformRegistryBuilder};

use crate::encoding::{Base64DecodeTransform, Base64EncodeTransform, JsonFormatTransform};
use crate::hash::Sha256Transform;
use crate::text::{
    LowercaseTransform, RegexReplaceTransform, ReverseTransform, TrimTransform, UppercaseTransform,
};

/// Register all built-in transforms
pub fn register_transforms(registry: &mut TransformRegistryBuilder) {
    // Text
    registry
        .register(UppercaseTransform)
        .register(LowercaseTransform)
        .register(ReverseTransform)
        .register(TrimTransform)
        .register(RegexReplaceTransform);

    // Encoding
    registry
        .register(Base64EncodeTransform)
        .register(Base64DecodeTransform)
        .register(JsonFormatTransform);

    // Hashing
    registry.register(Sha256Transform);
}

/// Registry holding exactly the built-in transforms
pub fn default_registry() -> Arc<TransformRegistry> {
    let mut builder = TransformRegistry::builder();
    register_transforms(&mut builder);
    Arc::new(builder.build())
}
