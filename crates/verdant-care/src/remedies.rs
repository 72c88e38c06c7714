//! Static remedy tables keyed by disease class.
//!
//! Both lookups are total matches over [`DiseaseKind`], so adding a
//! variant without a remedy entry fails to compile instead of silently
//! defaulting. Unrecognized classes route to a generic
//! isolate-and-monitor bucket.

use verdant_core::DiseaseKind;

/// Treatment actions for an unrecognized disease class.
pub const FALLBACK_ACTIONS: &[&str] = &[
    "Isolate the plant from others immediately",
    "Monitor daily for spreading symptoms",
    "Photograph the affected areas and re-scan in a few days",
];

/// Prevention guidance for an unrecognized disease class.
pub const FALLBACK_PREVENTION: &[&str] = &[
    "Quarantine new plants for two weeks before mixing them in",
    "Inspect leaves and stems weekly",
];

/// Treatment actions for a disease class.
#[must_use]
pub fn actions(kind: &DiseaseKind) -> &'static [&'static str] {
    match kind {
        DiseaseKind::LeafSpot => &[
            "Remove and discard affected leaves",
            "Apply a copper-based fungicide",
            "Switch to watering at soil level",
        ],
        DiseaseKind::PowderyMildew => &[
            "Prune the coated foliage",
            "Spray with neem oil or potassium bicarbonate",
            "Reduce humidity around the foliage",
        ],
        DiseaseKind::RootRot => &[
            "Unpot and trim away blackened roots",
            "Repot in fresh, well-draining mix",
            "Cut watering frequency in half",
        ],
        DiseaseKind::Blight => &[
            "Remove and destroy infected tissue",
            "Apply a copper fungicide to remaining growth",
            "Keep infected material out of compost",
        ],
        DiseaseKind::Rust => &[
            "Remove leaves showing pustules",
            "Apply a sulfur-based fungicide",
            "Keep foliage dry between waterings",
        ],
        DiseaseKind::Anthracnose => &[
            "Prune infected stems below the lesion",
            "Apply fungicide during cool, wet spells",
            "Collect and destroy fallen debris",
        ],
        DiseaseKind::MosaicVirus => &[
            "Isolate the plant immediately",
            "Remove the infected plant; there is no cure",
            "Control aphids and other sap-sucking insects",
        ],
        DiseaseKind::Unknown(_) => FALLBACK_ACTIONS,
    }
}

/// Prevention guidance for a disease class.
#[must_use]
pub fn prevention(kind: &DiseaseKind) -> &'static [&'static str] {
    match kind {
        DiseaseKind::LeafSpot => &[
            "Water at soil level, not over the leaves",
            "Improve air circulation around the plant",
        ],
        DiseaseKind::PowderyMildew => &[
            "Give the plant more light",
            "Avoid crowding plants together",
        ],
        DiseaseKind::RootRot => &[
            "Use pots with drainage holes",
            "Let the top of the soil dry out between waterings",
        ],
        DiseaseKind::Blight => &[
            "Keep foliage dry; water in the morning",
            "Sterilize tools between plants",
        ],
        DiseaseKind::Rust => &[
            "Space plants for airflow",
            "Choose rust-resistant varieties where possible",
        ],
        DiseaseKind::Anthracnose => &[
            "Rake up and discard fallen leaves each season",
            "Avoid handling plants while they are wet",
        ],
        DiseaseKind::MosaicVirus => &[
            "Wash hands and sterilize tools after handling plants",
            "Buy certified disease-free stock",
        ],
        DiseaseKind::Unknown(_) => FALLBACK_PREVENTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_kind_has_remedies() {
        let kinds = [
            DiseaseKind::LeafSpot,
            DiseaseKind::PowderyMildew,
            DiseaseKind::RootRot,
            DiseaseKind::Blight,
            DiseaseKind::Rust,
            DiseaseKind::Anthracnose,
            DiseaseKind::MosaicVirus,
        ];

        for kind in kinds {
            assert!(!actions(&kind).is_empty(), "no actions for {kind}");
            assert!(!prevention(&kind).is_empty(), "no prevention for {kind}");
        }
    }

    #[test]
    fn test_unknown_kind_uses_fallback_without_panicking() {
        let kind = DiseaseKind::Unknown("crown_gall".to_string());
        assert_eq!(actions(&kind), FALLBACK_ACTIONS);
        assert_eq!(prevention(&kind), FALLBACK_PREVENTION);
    }
}
