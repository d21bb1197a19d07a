use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Status tag the prediction service uses for a positive detection.
pub const DETECTED: &str = "detected";

/// Tumor class value the service sends when nothing was classified.
pub const NO_CLASS: &str = "None";

/// Shown wherever a confidence value is missing from a payload.
pub const CONFIDENCE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumorStatus {
    Detected,
    NotDetected,
}

impl TumorStatus {
    pub fn from_tag(tag: &str) -> Self {
        if tag == DETECTED {
            TumorStatus::Detected
        } else {
            TumorStatus::NotDetected
        }
    }
}

/// Body returned by `POST /predict`.
///
/// Error payloads only carry `error`, so every other field defaults when
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub confidence: Option<Number>,
    #[serde(default)]
    pub tumor_class: Option<String>,
    #[serde(default)]
    pub result_path: String,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResult {
    pub fn status(&self) -> TumorStatus {
        TumorStatus::from_tag(&self.status)
    }

    /// The server-reported error, if it is truthy (present and non-empty).
    pub fn server_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// The classified tumor type, ignoring the service's `"None"` placeholder.
    pub fn tumor_class(&self) -> Option<&str> {
        self.tumor_class
            .as_deref()
            .filter(|c| !c.is_empty() && *c != NO_CLASS)
    }

    /// Confidence exactly as the server sent it, without rounding.
    pub fn confidence_display(&self) -> String {
        self.confidence
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| CONFIDENCE_UNAVAILABLE.to_string())
    }

    pub fn extracted_text(&self) -> &str {
        self.extracted_text.as_deref().unwrap_or_default()
    }
}
