// Plain text transforms
use async_trait::async_trait;
use regex::Regex;
use strand_core::error::{TransformError, TransformResult};
use strand_core::pipeline::{OptionMap, OptionSchema, Transform};
use tracing::trace;

pub struct UppercaseTransform;

#[async_trait]
impl Transform for UppercaseTransform {
    fn id(&self) -> &str {
        "to-uppercase"
    }

    fn name(&self) -> &str {
        "Uppercase"
    }

    fn description(&self) -> &str {
        "Convert text to upper case"
    }

    async fn run(&self, input: &str, _options: &OptionMap) -> TransformResult<String> {
        Ok(input.to_uppercase())
    }
}

pub struct LowercaseTransform;

#[async_trait]
impl Transform for LowercaseTransform {
    fn id(&self) -> &str {
        "to-lowercase"
    }

    fn name(&self) -> &str {
        "Lowercase"
    }

    fn description(&self) -> &str {
        "Convert text to lower case"
    }

    async fn run(&self, input: &str, _options: &OptionMap) -> TransformResult<String> {
        Ok(input.to_lowercase())
    }
}

pub struct ReverseTransform;

#[async_trait]
impl Transform for ReverseTransform {
    fn id(&self) -> &str {
        "reverse"
    }

    fn name(&self) -> &str {
        "Reverse"
    }

    fn description(&self) -> &str {
        "Reverse the characters of the text"
    }

    async fn run(&self, input: &str, _options: &OptionMap) -> TransformResult<String> {
        Ok(input.chars().rev().collect())
    }
}

pub struct TrimTransform;

#[async_trait]
impl Transform for TrimTransform {
    fn id(&self) -> &str {
        "trim"
    }

    fn name(&self) -> &str {
        "Trim"
    }

    fn description(&self) -> &str {
        "Remove leading and trailing whitespace"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![OptionSchema::select(
            "mode",
            "Mode",
            ["both", "start", "end"],
            "both",
        )]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let mode = options.text("mode").unwrap_or_else(|| "both".to_string());
        match mode.as_str() {
            "both" => Ok(input.trim().to_string()),
            "start" => Ok(input.trim_start().to_string()),
            "end" => Ok(input.trim_end().to_string()),
            other => Err(TransformError::invalid_option(
                "mode",
                format!("unknown mode \"{other}\""),
            )),
        }
    }
}

pub struct RegexReplaceTransform;

#[async_trait]
impl Transform for RegexReplaceTransform {
    fn id(&self) -> &str {
        "regex-replace"
    }

    fn name(&self) -> &str {
        "Regex Replace"
    }

    fn description(&self) -> &str {
        "Replace matches of a regular expression"
    }

    fn options(&self) -> Vec<OptionSchema> {
        vec![
            OptionSchema::text("pattern", "Pattern", ""),
            OptionSchema::text("replacement", "Replacement", ""),
            OptionSchema::boolean("global", "Replace all matches", true),
        ]
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let pattern = options.text("pattern").unwrap_or_default();
        if pattern.is_empty() {
            return Err(TransformError::invalid_option("pattern", "a pattern is required"));
        }
        let regex = Regex::new(&pattern)
            .map_err(|e| TransformError::invalid_option("pattern", e.to_string()))?;
        let replacement = options.text("replacement").unwrap_or_default();
        let global = options.boolean("global")?.unwrap_or(true);

        trace!("Replacing /{}/ (global: {})", pattern, global);
        let output = if global {
            regex.replace_all(input, replacement.as_str())
        } else {
            regex.replace(input, replacement.as_str())
        };
        Ok(output.into_owned())
    }
}
