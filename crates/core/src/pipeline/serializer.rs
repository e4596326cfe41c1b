// Pipeline serializer - compact, URL-safe codec for sharing and saving pipelines
use super::node::{NodeConfig, PipelineNode};
use crate::config::constants::{
    MAX_DECODED_BYTES, MAX_SHARE_URL_LEN, SHARE_BASE_URL, SHARE_FRAGMENT_KEY,
};
use crate::error::Result;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Shareable form of a pipeline. Carries no runtime node state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedPipeline {
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub input: String,
}

/// Encode store nodes and input
pub fn encode(nodes: &[PipelineNode], input: &str) -> Result<String> {
    let configs: Vec<NodeConfig> = nodes.iter().map(NodeConfig::from).collect();
    encode_configs(&configs, input)
}

/// Encode node configs and input. Same arguments always give the same text.
pub fn encode_configs(nodes: &[NodeConfig], input: &str) -> Result<String> {
    let payload = SharedPipeline {
        nodes: nodes.to_vec(),
        input: input.to_string(),
    };
    let json = serde_json::to_string(&payload)?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(json.as_bytes())?;
    let compressed = encoder.finish()?;

    let encoded = URL_SAFE_NO_PAD.encode(compressed);
    debug!(
        "Encoded {} nodes: {} bytes of JSON into {} characters",
        nodes.len(),
        json.len(),
        encoded.len()
    );
    Ok(encoded)
}

/// Decode text produced by [`encode`].
///
/// Any failure along the way yields `None`; a partial pipeline is never
/// returned.
pub fn decode(text: &str) -> Option<SharedPipeline> {
    let compressed = URL_SAFE_NO_PAD.decode(text.trim()).ok()?;

    let mut json = String::new();
    let read = DeflateDecoder::new(compressed.as_slice())
        .take(MAX_DECODED_BYTES + 1)
        .read_to_string(&mut json)
        .ok()?;
    if read as u64 > MAX_DECODED_BYTES {
        debug!("Encoded pipeline inflates past {} bytes", MAX_DECODED_BYTES);
        return None;
    }

    let value: Value = serde_json::from_str(&json).ok()?;
    if !value.get("nodes").is_some_and(Value::is_array) {
        debug!("Encoded pipeline has no node list");
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Share link for store nodes on the default base URL.
///
/// Returns an empty string when no usable link can be produced.
pub fn share_url(nodes: &[PipelineNode], input: &str) -> String {
    share_url_with_base(SHARE_BASE_URL, nodes, input)
}

pub fn share_url_with_base(base: &str, nodes: &[PipelineNode], input: &str) -> String {
    let configs: Vec<NodeConfig> = nodes.iter().map(NodeConfig::from).collect();
    share_url_for_configs(base, &configs, input)
}

pub fn share_url_for_configs(base: &str, nodes: &[NodeConfig], input: &str) -> String {
    let encoded = match encode_configs(nodes, input) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to encode pipeline for sharing: {}", e);
            return String::new();
        }
    };

    let url = format!("{base}#{SHARE_FRAGMENT_KEY}{encoded}");
    if url.chars().count() > MAX_SHARE_URL_LEN {
        debug!(
            "Share URL too long ({} > {} characters)",
            url.chars().count(),
            MAX_SHARE_URL_LEN
        );
        return String::new();
    }
    url
}

/// Extract and decode the pipeline carried in a share link's fragment
pub fn from_share_url(url: &str) -> Option<SharedPipeline> {
    let (_, fragment) = url.split_once('#')?;
    let encoded = fragment
        .split('&')
        .find_map(|part| part.strip_prefix(SHARE_FRAGMENT_KEY))?;
    decode(encoded)
}
