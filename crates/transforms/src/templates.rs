// Preset pipelines for quick starts
use strand_core::pipeline::{NodeConfig, PipelineStore};

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub nodes: Vec<NodeConfig>,
    pub sample_input: &'static str,
}

impl Template {
    /// Replace the store's pipeline with this preset and its sample input
    pub fn load_into(&self, store: &PipelineStore) {
        store.load_pipeline(self.nodes.iter().cloned(), self.sample_input);
    }
}

/// All presets, in display order
pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "shout-encode",
            name: "Shout and encode",
            description: "Uppercase the text, then Base64 encode it",
            nodes: vec![
                NodeConfig::new("to-uppercase"),
                NodeConfig::new("base64-encode"),
            ],
            sample_input: "hello world",
        },
        Template {
            id: "decode-base64",
            name: "Decode Base64",
            description: "Trim stray whitespace and decode Base64",
            nodes: vec![NodeConfig::new("trim"), NodeConfig::new("base64-decode")],
            sample_input: "  aGVsbG8gd29ybGQ=\n",
        },
        Template {
            id: "normalize-hash",
            name: "Normalize and hash",
            description: "Trim, lowercase and collapse whitespace before hashing",
            nodes: vec![
                NodeConfig::new("trim"),
                NodeConfig::new("to-lowercase"),
                NodeConfig::new("regex-replace")
                    .with_option("pattern", r"\s+")
                    .with_option("replacement", " "),
                NodeConfig::new("sha256"),
            ],
            sample_input: "  Hello    World  ",
        },
        Template {
            id: "minify-json",
            name: "Minify JSON",
            description: "Strip whitespace from a JSON document",
            nodes: vec![NodeConfig::new("json-format").with_option("indent", 0i64)],
            sample_input: "{\n  \"name\": \"strand\",\n  \"tags\": [1, 2, 3]\n}",
        },
    ]
}

pub fn find_template(id: &str) -> Option<Template> {
    templates().into_iter().find(|template| template.id == id)
}
