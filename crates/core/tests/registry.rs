// Unit tests for TransformRegistry
mod common;

use common::{Append, Upper};
use strand_core::pipeline::{TransformRegistry, TransformRegistryBuilder};

#[test]
fn test_registry_new() {
    let registry = TransformRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_registry_register_and_lookup() {
    let mut builder = TransformRegistryBuilder::new();
    builder.register(Upper);
    let registry = builder.build();

    assert!(registry.contains("upper"));
    assert_eq!(registry.len(), 1);

    let transform = registry.lookup("upper");
    assert!(transform.is_some());
    assert_eq!(transform.unwrap().name(), "Upper");
}

#[test]
fn test_registry_lookup_nonexistent() {
    let registry = TransformRegistry::default();
    assert!(registry.lookup("nonexistent").is_none());
}

#[test]
fn test_registry_lists_in_registration_order() {
    let mut builder = TransformRegistry::builder();
    builder.register(Append).register(Upper);
    let registry = builder.build();

    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, vec!["append", "upper"]);

    let names: Vec<&str> = registry.list_all().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Append", "Upper"]);
}

#[test]
fn test_registry_duplicate_id_keeps_position() {
    let mut builder = TransformRegistry::builder();
    builder.register(Upper).register(Append).register(Upper);
    let registry = builder.build();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["upper", "append"]);
}
