use serde::{Deserialize, Serialize};

pub const DEFAULT_SCORE: f64 = 5.0;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;
pub const DEFAULT_CHANNEL: &str = "email";
pub const DEFAULT_FEEDBACK: &str = "No overall feedback was provided.";

/// Whether the email was written by the user (outgoing) or received by
/// them (incoming). The two directions use different analysis schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDirection {
    Incoming,
    #[default]
    Outgoing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    #[default]
    Compliant,
    Concerning,
    Violation,
    Unknown,
    Error,
}

impl ComplianceStatus {
    /// Lenient mapping from model output. Unrecognised labels become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "compliant" | "fully_compliant" => ComplianceStatus::Compliant,
            "concerning" | "concerns" | "minor_concerns" | "needs_review" => {
                ComplianceStatus::Concerning
            }
            "violation" | "non_compliant" | "noncompliant" => ComplianceStatus::Violation,
            "error" => ComplianceStatus::Error,
            _ => ComplianceStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Unrecognised labels fall back to `Low`, the documented default.
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "medium" | "moderate" => RiskLevel::Medium,
            "high" | "critical" | "severe" => RiskLevel::High,
            _ => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "critical" => Severity::Critical,
            "high" | "important" => Severity::High,
            "low" | "minor" => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub status: ComplianceStatus,
    pub issues: Vec<String>,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecommendation {
    pub recommended_channel: String,
    pub email_appropriate: bool,
    /// Incoming direction only; empty otherwise.
    pub response_tone: String,
    /// Incoming direction only; empty otherwise.
    pub suggested_approach: String,
    pub key_points: Vec<String>,
}

impl Default for ChannelRecommendation {
    fn default() -> Self {
        Self {
            recommended_channel: DEFAULT_CHANNEL.to_string(),
            email_appropriate: true,
            response_tone: String::new(),
            suggested_approach: String::new(),
            key_points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub severity: Severity,
    pub category: String,
    pub text: String,
    pub rationale: String,
}

/// The fixed-shape analysis record. Identical regardless of which analyzer
/// produced it; only `provenance` and `fallback_note` differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub direction: EmailDirection,
    /// Always within [`MIN_SCORE`, `MAX_SCORE`].
    pub overall_score: f64,
    pub overall_feedback: String,
    pub compliance: ComplianceReport,
    pub channel: ChannelRecommendation,
    pub suggestions: Vec<Suggestion>,
    pub strengths: Vec<String>,
    pub provenance: Provenance,
    /// Why the fallback was used. `None` for model results.
    pub fallback_note: Option<String>,
}

/// Optional context about the colleague on the other side of the email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColleagueInfo {
    pub name: Option<String>,
    pub role: Option<String>,
    pub communication_style: Option<String>,
}

impl ColleagueInfo {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.role, &self.communication_style]
            .iter()
            .all(|f| f.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return DEFAULT_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_labels_map_leniently() {
        assert_eq!(
            ComplianceStatus::from_label("Compliant"),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            ComplianceStatus::from_label("minor concerns"),
            ComplianceStatus::Concerning
        );
        assert_eq!(
            ComplianceStatus::from_label("non-compliant"),
            ComplianceStatus::Violation
        );
        assert_eq!(
            ComplianceStatus::from_label("???"),
            ComplianceStatus::Unknown
        );
    }

    #[test]
    fn test_risk_labels_default_to_low() {
        assert_eq!(RiskLevel::from_label("HIGH"), RiskLevel::High);
        assert_eq!(RiskLevel::from_label("moderate"), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_label("whatever"), RiskLevel::Low);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(0.0), MIN_SCORE);
        assert_eq!(clamp_score(14.0), MAX_SCORE);
        assert_eq!(clamp_score(7.5), 7.5);
        assert_eq!(clamp_score(f64::NAN), DEFAULT_SCORE);
    }

    #[test]
    fn test_colleague_info_emptiness() {
        assert!(ColleagueInfo::default().is_empty());
        assert!(ColleagueInfo {
            name: Some(" ".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!ColleagueInfo {
            role: Some("Manager".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_direction_serde_is_snake_case() {
        let d: EmailDirection = serde_json::from_str(r#""incoming""#).unwrap();
        assert_eq!(d, EmailDirection::Incoming);
        assert_eq!(EmailDirection::default(), EmailDirection::Outgoing);
    }
}
