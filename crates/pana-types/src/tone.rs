use serde::{Deserialize, Serialize};

/// Whether a query falls within the book's subject domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneResult {
    pub is_in_tone: bool,
    /// Always within `[0, 1]`
    pub confidence: f64,
    pub reasoning: String,
}

impl ToneResult {
    pub fn new(is_in_tone: bool, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            is_in_tone,
            confidence: clamp_unit(confidence),
            reasoning: reasoning.into(),
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
