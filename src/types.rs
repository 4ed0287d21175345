use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// A ripeness class as the model indexes it: internal name plus the
/// human-readable label shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: &'static str,
    pub label: &'static str,
}

const fn entry(name: &'static str, label: &'static str) -> ClassEntry {
    ClassEntry { name, label }
}

/// Class names must match the frontend's RipenessClass values.
pub const AVOCADO_CLASSES: &[ClassEntry] = &[
    entry("underripe", "Underripe"),
    entry("breaking", "Breaking"),
    entry("ripe_stage_1", "Ripe (Stage 1)"),
    entry("ripe_stage_2", "Ripe (Stage 2)"),
    entry("overripe", "Overripe"),
];

pub const BANANA_CLASSES: &[ClassEntry] = &[
    entry("unripe", "Unripe"),
    entry("ripe", "Ripe"),
    entry("overripe", "Overripe"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProduceType {
    Avocado,
    Banana,
}

impl ProduceType {
    pub const ALL: &'static [ProduceType] = &[ProduceType::Avocado, ProduceType::Banana];

    pub fn as_str(self) -> &'static str {
        match self {
            ProduceType::Avocado => "avocado",
            ProduceType::Banana => "banana",
        }
    }

    /// Ordered index → class mapping for this produce type. The model's
    /// output vector must be the same length as this table.
    pub fn class_table(self) -> &'static [ClassEntry] {
        match self {
            ProduceType::Avocado => AVOCADO_CLASSES,
            ProduceType::Banana => BANANA_CLASSES,
        }
    }
}

impl fmt::Display for ProduceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProduceType {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avocado" => Ok(ProduceType::Avocado),
            "banana" => Ok(ProduceType::Banana),
            other => Err(ClassifyError::UnsupportedProduceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationRequest {
    /// Base64-encoded image data, optionally with a data-URL prefix.
    pub image: String,
    #[serde(default = "default_produce_type")]
    pub produce_type: String,
}

fn default_produce_type() -> String {
    "avocado".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionItem {
    pub class_name: String,
    pub class_label: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub success: bool,
    pub produce_type: String,
    pub predicted_class: String,
    pub predicted_label: String,
    pub confidence: f32,
    pub all_predictions: Vec<PredictionItem>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
