//! Generic configuration tree
//!
//! Hosts hand the engine already-parsed configuration. Any serde format can
//! produce a [`ConfigValue`]; the typed accessors below carry the lenient
//! defaulting rules used while turning the tree into reward definitions.

use crate::error::{Result, TrialRewardsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the configuration tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Parse a configuration tree from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a mapping node from key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigValue)>,
    {
        ConfigValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Strict boolean: only an actual boolean node counts
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numbers as-is, strings parsed, everything else falls back to `default`
    pub fn to_f64_or(&self, default: f64) -> f64 {
        match self {
            ConfigValue::Int(i) => *i as f64,
            ConfigValue::Float(f) => *f,
            ConfigValue::String(s) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Numbers truncated toward zero, strings parsed, everything else falls
    /// back to `default`
    pub fn to_i32_or(&self, default: i32) -> i32 {
        match self {
            ConfigValue::Int(i) => *i as i32,
            ConfigValue::Float(f) => *f as i32,
            ConfigValue::String(s) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Render a scalar as text. Null, lists and maps have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Int(i) => Some(i.to_string()),
            ConfigValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{:.1}", f)),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::Null | ConfigValue::List(_) | ConfigValue::Map(_) => None,
        }
    }

    // ── keyed accessors, valid on mapping nodes ──

    /// Look up a key. Non-mapping nodes have no keys.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Whether the key is present, even when it holds null
    pub fn contains_key(&self, key: &str) -> bool {
        self.as_map().is_some_and(|map| map.contains_key(key))
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).map_or(default, |v| v.to_f64_or(default))
    }

    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.get(key).map_or(default, |v| v.to_i32_or(default))
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(ConfigValue::as_bool).unwrap_or(default)
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(ConfigValue::to_text)
    }

    pub fn get_list(&self, key: &str) -> Option<&[ConfigValue]> {
        self.get(key).and_then(ConfigValue::as_list)
    }

    pub fn get_section(&self, key: &str) -> Option<&ConfigValue> {
        self.get(key).filter(|v| v.as_map().is_some())
    }

    /// Require a mapping node, used at the loading boundary
    pub fn expect_map(&self, what: &str) -> Result<&BTreeMap<String, ConfigValue>> {
        self.as_map()
            .ok_or_else(|| TrialRewardsError::InvalidConfig(format!("{} must be a mapping", what)))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        ConfigValue::List(value.into_iter().map(Into::into).collect())
    }
}
