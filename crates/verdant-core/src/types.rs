//! Shared types used across the Verdant AI layer.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Error produced when a validated newtype rejects its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error: {0}")]
pub struct ValidationError(pub String);

/// Newtype for plant identifiers with validation.
///
/// Plant IDs must be lowercase alphanumeric with hyphens, 3-64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlantId(String);

impl PlantId {
    /// Create a new `PlantId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate plant ID format: lowercase alphanumeric with hyphens, 3-64 chars.
    fn validate(id: &str) -> Result<(), ValidationError> {
        static PLANT_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PLANT_REGEX
            .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,62}[a-z0-9]$").expect("valid regex"));

        if id.len() < 3 || id.len() > 64 {
            return Err(ValidationError(format!(
                "invalid plant ID: must be 3-64 characters, got {} characters",
                id.len()
            )));
        }

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(ValidationError(format!(
                "invalid plant ID: must be lowercase alphanumeric with hyphens, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque bearer credential handed in by the session/auth layer.
///
/// The AI layer never mints, refreshes, or persists credentials; it only
/// attaches this token to outgoing requests. `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a credential supplied by the caller.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw credential for request signing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// An opaque image attachment submitted for analysis.
///
/// The AI layer imposes no size or format validation; that is the
/// caller's responsibility.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageData {
    /// Create an image attachment from raw bytes and a MIME type.
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Raw image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type reported by the caller (e.g. `image/jpeg`).
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Severity reported for a single disease detection.
///
/// Unknown wire spellings deserialize into [`Severity::Unrecognized`]
/// instead of failing the whole response; scoring treats that case with a
/// mid-range penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Early or cosmetic damage
    Low,
    /// Spreading damage that needs treatment
    Moderate,
    /// Plant-threatening damage
    High,
    /// Wire value the classifier version does not map to a known level
    #[serde(other)]
    Unrecognized,
}

impl Severity {
    /// Health-score penalty applied per detection at this severity.
    #[must_use]
    pub fn penalty(&self) -> u32 {
        match self {
            Self::Low => 5,
            Self::Moderate => 15,
            Self::High => 30,
            Self::Unrecognized => 10,
        }
    }

    /// Get a human-readable display name for the severity.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Closed enumeration of disease classes the remote classifier emits.
///
/// The wire format is a free-form string; known spellings map to a
/// variant so downstream remedy tables are total matches, and anything
/// else is preserved verbatim in [`DiseaseKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiseaseKind {
    /// Fungal or bacterial leaf spotting
    LeafSpot,
    /// White powdery fungal coating
    PowderyMildew,
    /// Root decay from overwatering or soil fungus
    RootRot,
    /// Rapid browning and tissue death
    Blight,
    /// Orange-brown pustules on leaves and stems
    Rust,
    /// Dark sunken lesions on leaves and fruit
    Anthracnose,
    /// Mottled light/dark viral discoloration
    MosaicVirus,
    /// A class this client version does not recognize; carries the raw label
    Unknown(String),
}

impl DiseaseKind {
    /// Wire spelling for this kind.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::LeafSpot => "leaf_spot",
            Self::PowderyMildew => "powdery_mildew",
            Self::RootRot => "root_rot",
            Self::Blight => "blight",
            Self::Rust => "rust",
            Self::Anthracnose => "anthracnose",
            Self::MosaicVirus => "mosaic_virus",
            Self::Unknown(label) => label,
        }
    }

    /// Get a human-readable display name for the disease.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::LeafSpot => "Leaf spot",
            Self::PowderyMildew => "Powdery mildew",
            Self::RootRot => "Root rot",
            Self::Blight => "Blight",
            Self::Rust => "Rust",
            Self::Anthracnose => "Anthracnose",
            Self::MosaicVirus => "Mosaic virus",
            Self::Unknown(label) => label,
        }
    }
}

impl From<String> for DiseaseKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "leaf_spot" => Self::LeafSpot,
            "powdery_mildew" => Self::PowderyMildew,
            "root_rot" => Self::RootRot,
            "blight" => Self::Blight,
            "rust" => Self::Rust,
            "anthracnose" => Self::Anthracnose,
            "mosaic_virus" => Self::MosaicVirus,
            _ => Self::Unknown(value),
        }
    }
}

impl From<DiseaseKind> for String {
    fn from(kind: DiseaseKind) -> Self {
        kind.as_wire().to_string()
    }
}

impl fmt::Display for DiseaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_id_valid() {
        let valid_ids = vec!["monstera-deliciosa", "ficus-01", "basil", "snake-plant-2"];

        for id in valid_ids {
            assert!(PlantId::new(id).is_ok(), "Failed for: {id}");
        }
    }

    #[test]
    fn test_plant_id_invalid() {
        let too_long = "a".repeat(65);
        let invalid_ids = vec![
            "ab",              // Too short
            "Monstera",        // Uppercase
            "snake_plant",     // Underscore
            "snake plant",     // Space
            "-basil",          // Starts with hyphen
            "basil-",          // Ends with hyphen
            too_long.as_str(), // Too long
        ];

        for id in invalid_ids {
            assert!(PlantId::new(id).is_err(), "Should fail for: {id}");
        }
    }

    #[test]
    fn test_auth_token_debug_redacts() {
        let token = AuthToken::new("super-secret-session-token");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.expose(), "super-secret-session-token");
    }

    #[test]
    fn test_image_data_debug_omits_bytes() {
        let image = ImageData::new(vec![0xFF; 1024], "image/jpeg");
        let debug = format!("{image:?}");
        assert!(debug.contains("1024 bytes"));
        assert!(debug.contains("image/jpeg"));
        assert!(!debug.contains("255"));
    }

    #[test]
    fn test_severity_penalties() {
        assert_eq!(Severity::Low.penalty(), 5);
        assert_eq!(Severity::Moderate.penalty(), 15);
        assert_eq!(Severity::High.penalty(), 30);
        assert_eq!(Severity::Unrecognized.penalty(), 10);
    }

    #[test]
    fn test_severity_unknown_wire_value() {
        let severity: Severity = serde_json::from_str("\"catastrophic\"").expect("deserialize");
        assert_eq!(severity, Severity::Unrecognized);

        let severity: Severity = serde_json::from_str("\"moderate\"").expect("deserialize");
        assert_eq!(severity, Severity::Moderate);
    }

    #[test]
    fn test_disease_kind_round_trip() {
        for wire in [
            "leaf_spot",
            "powdery_mildew",
            "root_rot",
            "blight",
            "rust",
            "anthracnose",
            "mosaic_virus",
        ] {
            let kind = DiseaseKind::from(wire.to_string());
            assert!(!matches!(kind, DiseaseKind::Unknown(_)), "unknown: {wire}");
            assert_eq!(kind.as_wire(), wire);
        }
    }

    #[test]
    fn test_disease_kind_unknown_preserves_label() {
        let kind = DiseaseKind::from("crown_gall".to_string());
        assert_eq!(kind, DiseaseKind::Unknown("crown_gall".to_string()));
        assert_eq!(kind.display_name(), "crown_gall");

        let json = serde_json::to_string(&kind).expect("serialize");
        assert_eq!(json, "\"crown_gall\"");
    }

    #[test]
    fn test_disease_kind_serde() {
        let kind: DiseaseKind = serde_json::from_str("\"root_rot\"").expect("deserialize");
        assert_eq!(kind, DiseaseKind::RootRot);

        let json = serde_json::to_string(&DiseaseKind::MosaicVirus).expect("serialize");
        assert_eq!(json, "\"mosaic_virus\"");
    }

    #[test]
    fn test_timestamp_now() {
        let ts = Timestamp::now();
        assert!(ts.timestamp() > 0);
    }

    #[test]
    fn test_timestamp_ordering() {
        let ts1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();
        assert!(ts2 > ts1);
    }
}
