// Transform contract - the opaque unit a pipeline node executes

use crate::error::{TransformError, TransformResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single option value. Serialized as a plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Interpret a command-line style literal: booleans and finite numbers
    /// are recognised, everything else stays text.
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => match raw.parse::<f64>() {
                Ok(number) if number.is_finite() => Self::Number(number),
                _ => Self::Text(raw.to_string()),
            },
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Open, insertion-ordered option bag attached to a node.
///
/// The store and engine never interpret the values; each transform reads
/// them through the typed accessors below and rejects what it cannot use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(IndexMap<String, OptionValue>);

impl OptionMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    /// Read a text option. Numbers and booleans are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// Read a boolean option. Accepts the text forms `"true"` and `"false"`.
    pub fn boolean(&self, key: &str) -> TransformResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Boolean(value)) => Ok(Some(*value)),
            Some(OptionValue::Text(text)) => match text.as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(TransformError::invalid_option(
                    key,
                    format!("expected a boolean, got \"{other}\""),
                )),
            },
            Some(OptionValue::Number(_)) => Err(TransformError::invalid_option(
                key,
                "expected a boolean, got a number",
            )),
        }
    }

    /// Read a numeric option. Accepts numeric text.
    pub fn number(&self, key: &str) -> TransformResult<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Number(value)) => Ok(Some(*value)),
            Some(OptionValue::Text(text)) => text.trim().parse::<f64>().map(Some).map_err(|_| {
                TransformError::invalid_option(key, format!("expected a number, got \"{text}\""))
            }),
            Some(OptionValue::Boolean(_)) => Err(TransformError::invalid_option(
                key,
                "expected a number, got a boolean",
            )),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OptionMap
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Kind of value an option expects, used for discovery
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OptionKind {
    Text,
    Number,
    Boolean,
    Select { choices: Vec<String> },
}

/// Declared option of a transform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSchema {
    pub key: String,
    pub label: String,
    pub kind: OptionKind,
    pub default: OptionValue,
}

impl OptionSchema {
    pub fn text(key: impl Into<String>, label: impl Into<String>, default: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: OptionKind::Text,
            default: default.into(),
        }
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>, default: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: OptionKind::Number,
            default: default.into(),
        }
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: OptionKind::Boolean,
            default: default.into(),
        }
    }

    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, choices: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            label: label.into(),
            kind: OptionKind::Select {
                choices: choices.into_iter().map(Into::into).collect(),
            },
            default: default.into(),
        }
    }
}

/// A named text transform.
///
/// `run` must be pure with respect to its input and options; the engine
/// recomputes every node on each run and never caches results.
#[async_trait]
pub trait Transform: Send + Sync {
    /// Unique identifier used by pipeline nodes
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn options(&self) -> Vec<OptionSchema> {
        Vec::new()
    }

    async fn run(&self, input: &str, options: &OptionMap) -> TransformResult<String>;
}
