// Integration tests for PipelineEngine
mod common;

use std::sync::Arc;
use strand_core::config::constants::{FALLBACK_ERROR_MESSAGE, UPSTREAM_ERROR_MESSAGE};
use strand_core::pipeline::{NodeConfig, NodeStatus, PipelineEngine, PipelineStore};

fn engine() -> PipelineEngine {
    PipelineEngine::new(common::registry())
}

#[tokio::test]
async fn test_empty_pipeline_is_noop() {
    let store = PipelineStore::new();
    store.set_input("untouched");
    let rx = store.subscribe();

    engine().run(&store).await;

    assert!(!rx.has_changed().unwrap());
    assert_eq!(store.snapshot().input, "untouched");
}

#[tokio::test]
async fn test_chain_is_left_fold() {
    let store = PipelineStore::new();
    store.load_pipeline(
        vec![
            NodeConfig::new("append").with_option("suffix", " world"),
            NodeConfig::new("upper"),
            NodeConfig::new("append"),
        ],
        "hello",
    );

    engine().run(&store).await;

    let state = store.snapshot();
    let outputs: Vec<_> = state.nodes.iter().map(|n| n.output.as_deref()).collect();
    assert_eq!(
        outputs,
        vec![Some("hello world"), Some("HELLO WORLD"), Some("HELLO WORLD!")]
    );
    assert!(state.nodes.iter().all(|n| n.status == NodeStatus::Success));
    assert!(state.nodes.iter().all(|n| n.error.is_none()));
    assert_eq!(state.final_output(), Some("HELLO WORLD!"));
}

#[tokio::test]
async fn test_failure_marks_downstream_as_upstream_error() {
    let store = PipelineStore::new();
    store.load_pipeline(
        vec![
            NodeConfig::new("upper"),
            NodeConfig::new("fail").with_option("message", "bad input"),
            NodeConfig::new("append"),
            NodeConfig::new("upper"),
        ],
        "x",
    );

    engine().run(&store).await;

    let state = store.snapshot();
    assert_eq!(state.nodes[0].status, NodeStatus::Success);
    assert_eq!(state.nodes[1].status, NodeStatus::Error);
    assert_eq!(state.nodes[1].error.as_deref(), Some("bad input"));
    assert!(state.nodes[1].output.is_none());
    for node in &state.nodes[2..] {
        assert_eq!(node.status, NodeStatus::UpstreamError);
        assert_eq!(node.error.as_deref(), Some(UPSTREAM_ERROR_MESSAGE));
        assert!(node.output.is_none());
    }
    assert_eq!(state.final_output(), None);
}

#[tokio::test]
async fn test_unknown_transform_is_node_error() {
    let store = PipelineStore::new();
    store.load_pipeline(
        vec![NodeConfig::new("nonexistent-transform"), NodeConfig::new("upper")],
        "x",
    );

    engine().run(&store).await;

    let state = store.snapshot();
    assert_eq!(state.nodes[0].status, NodeStatus::Error);
    let message = state.nodes[0].error.as_deref().unwrap();
    assert!(message.contains("not found"));
    assert!(message.contains("nonexistent-transform"));
    assert_eq!(state.nodes[1].status, NodeStatus::UpstreamError);
}

#[tokio::test]
async fn test_empty_failure_message_uses_fallback() {
    let store = PipelineStore::new();
    store.load_pipeline([NodeConfig::new("fail").with_option("message", "")], "x");

    engine().run(&store).await;

    assert_eq!(
        store.snapshot().nodes[0].error.as_deref(),
        Some(FALLBACK_ERROR_MESSAGE)
    );
}

#[tokio::test]
async fn test_panicking_transform_becomes_node_error() {
    let store = PipelineStore::new();
    store.load_pipeline(vec![NodeConfig::new("panicky"), NodeConfig::new("upper")], "x");

    engine().run(&store).await;

    let state = store.snapshot();
    assert_eq!(state.nodes[0].status, NodeStatus::Error);
    assert_eq!(state.nodes[0].error.as_deref(), Some("transform blew up"));
    assert_eq!(state.nodes[1].status, NodeStatus::UpstreamError);
}

#[tokio::test]
async fn test_rerun_recomputes_from_scratch() {
    let store = PipelineStore::new();
    store.load_pipeline(vec![NodeConfig::new("fail"), NodeConfig::new("upper")], "abc");
    let engine = engine();
    engine.run(&store).await;

    let first = store.snapshot().nodes[0].id;
    store.remove_node(first);
    engine.run(&store).await;

    let state = store.snapshot();
    assert_eq!(state.nodes.len(), 1);
    assert_eq!(state.nodes[0].status, NodeStatus::Success);
    assert_eq!(state.nodes[0].output.as_deref(), Some("ABC"));
    assert!(state.nodes[0].error.is_none());
}

#[tokio::test]
async fn test_nodes_report_running_before_result() {
    let store = Arc::new(PipelineStore::new());
    store.load_pipeline([NodeConfig::new("slow").with_option("ms", 50i64)], "x");
    let mut rx = store.subscribe();
    let engine = Arc::new(engine());

    let run = tokio::spawn({
        let store = store.clone();
        let engine = engine.clone();
        async move { engine.run(&store).await }
    });

    let mut seen = Vec::new();
    while rx.changed().await.is_ok() {
        let status = rx.borrow_and_update().nodes[0].status;
        if seen.last() != Some(&status) {
            seen.push(status);
        }
        if status == NodeStatus::Success {
            break;
        }
    }
    run.await.unwrap();

    assert!(seen.contains(&NodeStatus::Running));
    assert_eq!(seen.last(), Some(&NodeStatus::Success));
}

#[tokio::test]
async fn test_overlapping_runs_last_write_wins() {
    let store = PipelineStore::new();
    store.set_input("x");
    let node = store.add_node("slow");
    store.set_node_option(node, "ms", 40i64);
    store.set_node_option(node, "tag", "-first");
    let engine = engine();

    let first = engine.run(&store);
    let second = async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.set_node_option(node, "tag", "-second");
        store.set_node_option(node, "ms", 5i64);
        engine.run(&store).await;
    };
    tokio::join!(first, second);

    // The second run finishes first; the slower first run lands last.
    let state = store.snapshot();
    assert_eq!(state.nodes[0].status, NodeStatus::Success);
    assert_eq!(state.nodes[0].output.as_deref(), Some("x-first"));
}

#[tokio::test]
async fn test_overlapping_runs_keep_output_and_error_exclusive() {
    let store = PipelineStore::new();
    store.set_input("x");
    let node = store.add_node("slow");
    store.set_node_option(node, "ms", 40i64);
    let engine = engine();

    let first = engine.run(&store);
    let second = async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.set_node_option(node, "fail", true);
        store.set_node_option(node, "ms", 1i64);
        engine.run(&store).await;
    };
    tokio::join!(first, second);

    // The failing second run lands first, then the slow success overwrites it.
    let state = store.snapshot();
    let node = &state.nodes[0];
    assert_eq!(node.status, NodeStatus::Success);
    assert_eq!(node.output.as_deref(), Some("x"));
    assert!(node.error.is_none());
}

#[test]
fn test_run_without_a_runtime() {
    let store = PipelineStore::new();
    store.load_pipeline(
        vec![NodeConfig::new("append"), NodeConfig::new("panicky"), NodeConfig::new("upper")],
        "hi",
    );

    futures::executor::block_on(engine().run(&store));

    let state = store.snapshot();
    assert_eq!(state.nodes[0].output.as_deref(), Some("hi!"));
    assert_eq!(state.nodes[1].status, NodeStatus::Error);
    assert_eq!(state.nodes[1].error.as_deref(), Some("transform blew up"));
    assert_eq!(state.nodes[2].status, NodeStatus::UpstreamError);
}
