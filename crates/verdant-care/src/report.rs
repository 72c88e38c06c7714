//! Health report derivation.
//!
//! Fuses disease-detection and identification outputs into a single
//! 0-100 health score and a unified recommendation list. The score is a
//! deterministic, additive heuristic, not a calibrated probability.

use crate::disease::DiseaseAnalysis;
use crate::identify::IdentificationOutcome;
use crate::remedies;
use serde::Serialize;
use verdant_core::{Severity, Timestamp};

/// Flat bonus added when the top identification match is confident.
const IDENTIFICATION_BONUS: i64 = 5;

/// Relative urgency of a merged recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Routine guidance
    Normal,
    /// High-severity disease; act now
    Urgent,
}

/// One entry in the unified recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// What this entry addresses (disease display name or care-tips label)
    pub label: String,
    /// Relative urgency
    pub priority: Priority,
    /// Suggested actions
    pub actions: Vec<String>,
}

/// Aggregate health report derived from one analysis pass.
///
/// Derived data only; the orchestration layer never persists reports.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Health score in [0, 100]
    pub score: u8,
    /// Disease detection result
    pub disease: DiseaseAnalysis,
    /// Species identification result
    pub identification: IdentificationOutcome,
    /// Unified recommendations: disease entries first, care tips last
    pub recommendations: Vec<Recommendation>,
    /// When the report was derived
    pub generated_at: Timestamp,
}

/// Derive the 0-100 health score.
///
/// Starts at 100, subtracts a severity-indexed penalty per detection,
/// adds a flat bonus when the top identification match's confidence
/// exceeds `bonus_threshold`, and clamps to [0, 100].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_health_score(
    disease: &DiseaseAnalysis,
    identification: &IdentificationOutcome,
    bonus_threshold: f64,
) -> u8 {
    let mut score: i64 = 100;

    for detection in &disease.detections {
        if detection.severity == Severity::Unrecognized {
            tracing::warn!(
                kind = %detection.kind,
                "unrecognized severity; applying default penalty"
            );
        }
        score -= i64::from(detection.severity.penalty());
    }

    if identification
        .top_match()
        .is_some_and(|top| top.confidence > bonus_threshold)
    {
        score += IDENTIFICATION_BONUS;
    }

    score.clamp(0, 100) as u8
}

/// Build the unified recommendation list.
///
/// One entry per disease detection, in detection order, marked urgent
/// for high severity; when identification returned care tips, a single
/// further entry flattens the tips map. Disease entries always precede
/// the care-tips entry.
#[must_use]
pub fn merge_recommendations(
    disease: &DiseaseAnalysis,
    identification: &IdentificationOutcome,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = disease
        .detections
        .iter()
        .map(|detection| Recommendation {
            label: detection.kind.display_name().to_string(),
            priority: if detection.severity == Severity::High {
                Priority::Urgent
            } else {
                Priority::Normal
            },
            actions: remedies::actions(&detection.kind)
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        })
        .collect();

    if let Some(tips) = &identification.care_tips {
        if !tips.is_empty() {
            recommendations.push(Recommendation {
                label: "Plant care tips".to_string(),
                priority: Priority::Normal,
                actions: tips
                    .iter()
                    .map(|(topic, tip)| format!("{topic}: {tip}"))
                    .collect(),
            });
        }
    }

    recommendations
}
