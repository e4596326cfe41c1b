// Encoding and formatting transforms
use async_trait::async_trait;
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE},
};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use strand_core::error::{TransformError, TransformResult};
use strand_core::pipeline::{OptionMap, OptionSchema, Transform};

pub struct Base64EncodeTransform;

#[async_trait]
impl Transform for Base64EncodeTransform {
    fn id(&self) -> &str {
        "base64-encode"
    }

    fn name(&self) -> &str {
        "Base64 Encode"
    }

    fn description(&self) -> &str {
        "Encode UTF-8 text as Base64"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![OptionSchema::boolean("urlSafe", "URL-safe alphabet", false)]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let url_safe = options.boolean("urlSafe")?.unwrap_or(false);
        let engine = if url_safe { &URL_SAFE } else { &STANDARD };
        Ok(engine.encode(input.as_bytes()))
    }
}

pub struct Base64DecodeTransform;

#[async_trait]
impl Transform for Base64DecodeTransform {
    fn id(&self) -> &str {
        "base64-decode"
    }

    fn name(&self) -> &str {
        "Base64 Decode"
    }

    fn description(&self) -> &str {
        "Decode Base64 into UTF-8 text"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![OptionSchema::boolean("urlSafe", "URL-safe alphabet", false)]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let url_safe = options.boolean("urlSafe")?.unwrap_or(false);
        let engine = if url_safe { &URL_SAFE } else { &STANDARD };
        let bytes = engine
            .decode(input.trim())
            .map_err(|e| TransformError::invalid_input(format!("not valid Base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|_| TransformError::invalid_input("decoded bytes are not valid UTF-8"))
    }
}

pub struct JsonFormatTransform;

#[async_trait]
impl Transform for JsonFormatTransform {
    fn id(&self) -> &str {
        "json-format"
    }

    fn name(&self) -> &str {
        "JSON Format"
    }

    fn description(&self) -> &str {
        "Pretty-print or minify JSON"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![OptionSchema::number("indent", "Indent (0 to minify)", 2.0)]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let indent = options.number("indent")?.unwrap_or(2.0);
        if !(0.0..=16.0).contains(&indent) || indent.fract() != 0.0 {
            return Err(TransformError::invalid_option(
                "indent",
                "expected a whole number between 0 and 16",
            ));
        }

        let value: Value = serde_json::from_str(input)
            .map_err(|e| TransformError::invalid_input(format!("not valid JSON: {e}")))?;

        if indent == 0.0 {
            return Ok(value.to_string());
        }

        let indent = " ".repeat(indent as usize);
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
        value
            .serialize(&mut serializer)
            .map_err(|e| TransformError::failed(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TransformError::failed(e.to_string()))
    }
}
