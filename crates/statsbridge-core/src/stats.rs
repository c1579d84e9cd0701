//! Statistics document (wire contract between the target and the fetcher).
//!
//! The target serializes integer counters; the fetcher parses them back as
//! floats, which is what the exposition side works with.

use serde::{Deserialize, Serialize};

use crate::counters::CounterSnapshot;
use crate::error::{BridgeError, Result};

/// Path of the statistics endpoint on the target.
pub const STATS_PATH: &str = "/stats";

/// Serialized form produced by the target's `/stats` handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsDocument {
    #[serde(rename = "http200Requestcounter")]
    pub http200: u64,
    #[serde(rename = "http500Requestcounter")]
    pub http500: u64,
}

impl From<CounterSnapshot> for StatsDocument {
    fn from(s: CounterSnapshot) -> Self {
        Self { http200: s.success, http500: s.error }
    }
}

impl StatsDocument {
    /// Compact JSON, fields in wire order.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| BridgeError::Parse(format!("stats document encode failed: {e}")))
    }
}

/// Deserialized statistics as seen by the fetcher.
///
/// Unknown fields are ignored; both counters are required.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatsSnapshot {
    #[serde(rename = "http200Requestcounter")]
    pub success: f64,
    #[serde(rename = "http500Requestcounter")]
    pub error: f64,
}

impl StatsSnapshot {
    /// Parse and validate a raw stats body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let snap: StatsSnapshot = serde_json::from_slice(body)
            .map_err(|e| BridgeError::Parse(format!("invalid stats document: {e}")))?;
        snap.validate()?;
        Ok(snap)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("http200Requestcounter", self.success),
            ("http500Requestcounter", self.error),
        ];
        for (field, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(BridgeError::Parse(format!(
                    "{field} must be a non-negative number, got {v}"
                )));
            }
        }
        Ok(())
    }
}
