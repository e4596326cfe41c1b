// Digest transforms
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use strand_core::error::TransformResult;
use strand_core::pipeline::{OptionMap, OptionSchema, Transform};

pub struct Sha256Transform;

#[async_trait]
impl Transform for Sha256Transform {
    fn id(&self) -> &str {
        "sha256"
    }

    fn name(&self) -> &str {
        "SHA-256"
    }

    fn description(&self) -> &str {
        "Hex-encoded SHA-256 digest of the text"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![OptionSchema::boolean("uppercase", "Uppercase hex", false)]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let digest = Sha256::digest(input.as_bytes());
        if options.boolean("uppercase")?.unwrap_or(false) {
            Ok(hex::encode_upper(digest))
        } else {
            Ok(hex::encode(digest))
        }
    }
}
