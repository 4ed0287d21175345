use crate::types::{ClassificationResponse, PredictionItem, ProduceType};

/// Map a raw probability vector onto the produce type's class table and
/// shape the API response.
///
/// Total function: indices past the table synthesize placeholder names so
/// the builder never fails, even on a misshapen vector that slipped past
/// the predictor's check.
pub fn build(probs: &[f32], produce_type: ProduceType) -> ClassificationResponse {
    let table = produce_type.class_table();

    let mut all_predictions: Vec<PredictionItem> = probs
        .iter()
        .enumerate()
        .map(|(idx, &confidence)| match table.get(idx) {
            Some(entry) => PredictionItem {
                class_name: entry.name.to_string(),
                class_label: entry.label.to_string(),
                confidence,
            },
            None => PredictionItem {
                class_name: format!("class_{idx}"),
                class_label: format!("Class {idx}"),
                confidence,
            },
        })
        .collect();

    // Stable sort keeps equal confidences in index order, so mock outputs
    // stay deterministic.
    all_predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let top = all_predictions.first().cloned().unwrap_or(PredictionItem {
        class_name: "unknown".to_string(),
        class_label: "Unknown".to_string(),
        confidence: 0.0,
    });

    ClassificationResponse {
        success: true,
        produce_type: produce_type.to_string(),
        predicted_class: top.class_name,
        predicted_label: top.class_label,
        confidence: top.confidence,
        all_predictions,
    }
}
