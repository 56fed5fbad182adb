use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DeviceId, Domain};

/// A normalized payload value: numeric (unit-normalized) or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Number(f64),
    Text(String),
}

impl PayloadValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PayloadValue::Number(value) => Some(*value),
            PayloadValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PayloadValue::Number(_) => None,
            PayloadValue::Text(value) => Some(value),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, PayloadValue::Number(_))
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Number(value) => write!(f, "{value}"),
            PayloadValue::Text(value) => f.write_str(value),
        }
    }
}

/// Sensor readings keyed by normalized field name.
pub type Payload = BTreeMap<String, PayloadValue>;

/// The common output record every domain transformer emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub device_id: DeviceId,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub domain: Domain,
    pub payload: Payload,
    /// Fraction of the domain's declared fields present in this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<f64>,
}

impl NormalizedRecord {
    pub fn new(device_id: DeviceId, timestamp: i64, domain: Domain, payload: Payload) -> Self {
        Self {
            device_id,
            timestamp,
            domain,
            payload,
            data_quality: None,
        }
    }

    pub fn with_data_quality(mut self, score: f64) -> Self {
        self.data_quality = Some(score);
        self
    }
}
