// Test transforms shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use strand_core::error::{TransformError, TransformResult};
use strand_core::pipeline::{OptionMap, Transform, TransformRegistry};

/// Uppercases its input
pub struct Upper;

#[async_trait]
impl Transform for Upper {
    fn id(&self) -> &str {
        "upper"
    }

    fn name(&self) -> &str {
        "Upper"
    }

    fn description(&self) -> &str {
        "Uppercase the input"
    }

    async fn run(&self, input: &str, _options: &OptionMap) -> TransformResult<String> {
        Ok(input.to_uppercase())
    }
}

/// Appends the `suffix` option (default "!")
pub struct Append;

#[async_trait]
impl Transform for Append {
    fn id(&self) -> &str {
        "append"
    }

    fn name(&self) -> &str {
        "Append"
    }

    fn description(&self) -> &str {
        "Append a suffix"
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let suffix = options.text("suffix").unwrap_or_else(|| "!".to_string());
        Ok(format!("{input}{suffix}"))
    }
}

/// Always fails with the `message` option (default "boom")
pub struct Fail;

#[async_trait]
impl Transform for Fail {
    fn id(&self) -> &str {
        "fail"
    }

    fn name(&self) -> &str {
        "Fail"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn run(&self, _input: &str, options: &OptionMap) -> TransformResult<String> {
        let message = options.text("message").unwrap_or_else(|| "boom".to_string());
        Err(TransformError::failed(message))
    }
}

pub struct Panicky;

#[async_trait]
impl Transform for Panicky {
    fn id(&self) -> &str {
        "panicky"
    }

    fn name(&self) -> &str {
        "Panicky"
    }

    fn description(&self) -> &str {
        "Panics while running"
    }

    async fn run(&self, _input: &str, _options: &OptionMap) -> TransformResult<String> {
        panic!("transform blew up");
    }
}

/// Sleeps for `ms` milliseconds, then tags the input with the `tag` option.
/// With `fail` set it errors after the delay instead.
pub struct Slow;

#[async_trait]
impl Transform for Slow {
    fn id(&self) -> &str {
        "slow"
    }

    fn name(&self) -> &str {
        "Slow"
    }

    fn description(&self) -> &str {
        "Delays before echoing its input"
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String> {
        let ms = options.number("ms")?.unwrap_or(10.0) as u64;
        tokio::time::sleep(Duration::from_millis(ms)).await;
        let tag = options.text("tag").unwrap_or_default();
        if options.boolean("fail")?.unwrap_or(false) {
            return Err(TransformError::failed(format!("slow{tag} failed")));
        }
        Ok(format!("{input}{tag}"))
    }
}

pub fn registry() -> Arc<TransformRegistry> {
    let mut builder = TransformRegistry::builder();
    builder
        .register(Upper)
        .register(Append)
        .register(Fail)
        .register(Panicky)
        .register(Slow);
    Arc::new(builder.build())
}
