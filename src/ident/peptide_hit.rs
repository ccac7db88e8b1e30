use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::chemistry::model::Peptide;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetaValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            MetaValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Int(v) => write!(f, "{}", v),
            MetaValue::Float(v) => write!(f, "{}", v),
            MetaValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self { MetaValue::Float(v) }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self { MetaValue::Int(v) }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self { MetaValue::Text(v) }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self { MetaValue::Text(v.to_string()) }
}

/// A peptide-spectrum match as reported by a search engine.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PeptideHit {
    pub sequence: Peptide,
    pub score: f64,
    pub charge: Option<i8>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetaValue>,
}

impl PeptideHit {
    pub fn new(sequence: Peptide, score: f64, charge: Option<i8>) -> PeptideHit {
        PeptideHit { sequence, score, charge, metadata: BTreeMap::new() }
    }

    pub fn set_meta_value<V: Into<MetaValue>>(&mut self, key: &str, value: V) {
        self.metadata.insert(key.to_string(), value.into());
    }

    pub fn get_meta_value(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }
}
