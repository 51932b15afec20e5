//! SkillTwin Types - Core types shared across the SkillTwin workspace
//!
//! This module defines the detections produced by the skill matcher, the
//! career readiness assessment built on top of them and the skill twin
//! snapshot that bundles both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category reported for skills missing from the category table
pub const DEFAULT_CATEGORY: &str = "other";

/// Maximum number of characters of a proof kept in a skill twin
pub const PROOF_SUMMARY_LIMIT: usize = 500;

// ============================================================================
// Detection Types
// ============================================================================

/// Coarse confidence bucket of a detection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Lowest confidence that still counts as `high`
    pub const HIGH_THRESHOLD: f64 = 0.7;
    /// Lowest confidence that still counts as `medium`
    pub const MEDIUM_THRESHOLD: f64 = 0.4;

    /// Bucket a confidence score
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            Tier::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill recognized in a piece of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    /// Canonical skill name, always a vocabulary entry
    pub name: String,
    pub category: String,
    /// Score in `[0, 1]`, rounded to two decimals
    pub confidence: f64,
    pub tier: Tier,
    /// Reinforced by repetition or by a heading/section line
    #[serde(default)]
    pub important: bool,
}

impl Detection {
    /// Create a detection. The confidence is clamped, rounded and the tier
    /// derived from the rounded value, so `tier` always agrees with `confidence`.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        confidence: f64,
        important: bool,
    ) -> Self {
        let confidence = round_confidence(confidence);
        Self {
            name: name.into(),
            category: category.into(),
            confidence,
            tier: Tier::from_confidence(confidence),
            important,
        }
    }
}

fn round_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

// ============================================================================
// Career Readiness Types
// ============================================================================

/// How close a profile is to a target role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReadinessStatus {
    #[serde(rename = "Ready!")]
    Ready,
    #[serde(rename = "Almost There!")]
    AlmostThere,
    #[serde(rename = "Halfway There")]
    HalfwayThere,
    #[serde(rename = "Getting Started")]
    GettingStarted,
}

impl ReadinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessStatus::Ready => "Ready!",
            ReadinessStatus::AlmostThere => "Almost There!",
            ReadinessStatus::HalfwayThere => "Halfway There",
            ReadinessStatus::GettingStarted => "Getting Started",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated time until a profile covers its target role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Timeline {
    #[serde(rename = "0–1 month")]
    UpToOneMonth,
    #[serde(rename = "2–3 months")]
    TwoToThreeMonths,
    #[serde(rename = "4–6 months")]
    FourToSixMonths,
    /// Used when the target role is unknown
    #[serde(rename = "6+ months")]
    OverSixMonths,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::UpToOneMonth => "0–1 month",
            Timeline::TwoToThreeMonths => "2–3 months",
            Timeline::FourToSixMonths => "4–6 months",
            Timeline::OverSixMonths => "6+ months",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness of a set of detected skills against a target role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CareerReadiness {
    pub target_role: String,
    /// Share of the role's core skills already owned, `0..=100`
    pub percentage: u8,
    pub status: ReadinessStatus,
    pub timeline: Timeline,
}

impl CareerReadiness {
    /// Assessment for a goal that matches no known role
    pub fn unknown_role(target_role: impl Into<String>) -> Self {
        Self {
            target_role: target_role.into(),
            percentage: 0,
            status: ReadinessStatus::GettingStarted,
            timeline: Timeline::OverSixMonths,
        }
    }
}

/// Skills to pick up within one projection window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowthPeriod {
    pub percentage: u8,
    pub skills: Vec<String>,
}

/// 30/60/90 day growth plan towards a target role
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub thirty_days: Vec<GrowthPeriod>,
    pub sixty_days: Vec<GrowthPeriod>,
    pub ninety_days: Vec<GrowthPeriod>,
}

impl GrowthProjection {
    pub fn is_empty(&self) -> bool {
        self.thirty_days.is_empty() && self.sixty_days.is_empty() && self.ninety_days.is_empty()
    }
}

// ============================================================================
// Skill Twin
// ============================================================================

/// Where the proof text of a skill twin came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProofSource {
    /// Text passed inline or piped through stdin
    Text,
    /// Text read from a document on disk
    File,
}

/// Snapshot of a user's detected skills and their readiness for a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTwin {
    pub id: Uuid,
    pub proof_source: ProofSource,
    /// Leading part of the proof, at most [`PROOF_SUMMARY_LIMIT`] characters
    pub proof_summary: String,
    pub skills: Vec<Detection>,
    pub career_readiness: CareerReadiness,
    pub growth_projection: GrowthProjection,
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

impl SkillTwin {
    /// Current record layout version
    pub const VERSION: u32 = 1;

    pub fn new(
        proof_source: ProofSource,
        proof: &str,
        skills: Vec<Detection>,
        career_readiness: CareerReadiness,
        growth_projection: GrowthProjection,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            proof_source,
            proof_summary: summarize_proof(proof),
            skills,
            career_readiness,
            growth_projection,
            version: Self::VERSION,
            created_at: Utc::now(),
        }
    }
}

/// Keep the first [`PROOF_SUMMARY_LIMIT`] characters of a proof
pub fn summarize_proof(proof: &str) -> String {
    proof.chars().take(PROOF_SUMMARY_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_confidence(1.0), Tier::High);
        assert_eq!(Tier::from_confidence(0.7), Tier::High);
        assert_eq!(Tier::from_confidence(0.69), Tier::Medium);
        assert_eq!(Tier::from_confidence(0.4), Tier::Medium);
        assert_eq!(Tier::from_confidence(0.39), Tier::Low);
        assert_eq!(Tier::from_confidence(0.0), Tier::Low);
    }

    #[test]
    fn test_detection_rounds_before_tiering() {
        // 0.696 rounds up to 0.7, so the tier must follow the rounded value
        let detection = Detection::new("rust", "language", 0.696, false);
        assert_eq!(detection.confidence, 0.7);
        assert_eq!(detection.tier, Tier::High);
    }

    #[test]
    fn test_detection_clamps_confidence() {
        assert_eq!(Detection::new("go", "language", 3.5, true).confidence, 1.0);
        assert_eq!(Detection::new("go", "language", -1.0, false).confidence, 0.0);
        assert_eq!(Detection::new("go", "language", f64::NAN, false).confidence, 0.0);
    }

    #[test]
    fn test_detection_serialization() {
        let detection = Detection::new("redis", "database", 1.0, true);
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(json["name"], "redis");
        assert_eq!(json["tier"], "high");
        assert_eq!(json["important"], true);
    }

    #[test]
    fn test_readiness_serialization_uses_display_labels() {
        let readiness = CareerReadiness::unknown_role("astronaut");
        let json = serde_json::to_value(&readiness).unwrap();
        assert_eq!(json["targetRole"], "astronaut");
        assert_eq!(json["status"], "Getting Started");
        assert_eq!(json["timeline"], "6+ months");
    }

    #[test]
    fn test_summarize_proof_respects_char_boundaries() {
        let proof = "é".repeat(PROOF_SUMMARY_LIMIT + 10);
        let summary = summarize_proof(&proof);
        assert_eq!(summary.chars().count(), PROOF_SUMMARY_LIMIT);

        assert_eq!(summarize_proof("short"), "short");
    }

    #[test]
    fn test_skill_twin_new() {
        let twin = SkillTwin::new(
            ProofSource::Text,
            "I build APIs with node",
            vec![Detection::new("node", "runtime", 0.5, false)],
            CareerReadiness::unknown_role("chef"),
            GrowthProjection::default(),
        );
        assert_eq!(twin.version, SkillTwin::VERSION);
        assert_eq!(twin.proof_summary, "I build APIs with node");
        assert!(twin.growth_projection.is_empty());

        let json = serde_json::to_value(&twin).unwrap();
        assert_eq!(json["proofSource"], "text");
        assert!(json["careerReadiness"].is_object());
    }
}
