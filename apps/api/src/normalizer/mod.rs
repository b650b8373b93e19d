//! Response normalization: turns raw model text into the shapes callers use.
//!
//! Conversational replies pass through [`extract_reply`]. Analysis replies go
//! through a two-stage parse in [`parse_analysis`]: locate a `{...}` span,
//! then strict-parse it. Each stage has its own failure kind so callers and
//! logs can tell "the model wrote prose" from "the model wrote broken JSON".

pub mod json_span;

use serde_json::Value;
use thiserror::Error;

use crate::analysis::models::{
    clamp_score, AnalysisResult, ChannelRecommendation, ComplianceReport, ComplianceStatus,
    EmailDirection, Provenance, RiskLevel, Severity, Suggestion, DEFAULT_CHANNEL,
    DEFAULT_FEEDBACK, DEFAULT_SCORE,
};

pub use json_span::find_json_span;

const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no structured payload found in model output")]
    NoStructuredPayloadFound,

    #[error("structured payload could not be parsed: {0}")]
    UnparseableStructuredPayload(#[from] serde_json::Error),
}

/// Source field names for one email direction.
struct FieldMap {
    score: &'static str,
    status: &'static str,
    channel_root: &'static str,
    suggestions: &'static str,
}

const OUTGOING_FIELDS: FieldMap = FieldMap {
    score: "/overall_assessment/effectiveness_score",
    status: "/code_of_conduct_compliance/compliance_status",
    channel_root: "/communication_channel",
    suggestions: "/improvements",
};

const INCOMING_FIELDS: FieldMap = FieldMap {
    score: "/overall_assessment/appropriateness_score",
    status: "/code_of_conduct_compliance/overall_compliance",
    channel_root: "/response_strategy",
    suggestions: "/recommendations",
};

impl EmailDirection {
    fn field_map(self) -> &'static FieldMap {
        match self {
            EmailDirection::Outgoing => &OUTGOING_FIELDS,
            EmailDirection::Incoming => &INCOMING_FIELDS,
        }
    }
}

/// Conversational replies are used as-is, minus surrounding whitespace.
pub fn extract_reply(raw: &str) -> String {
    raw.trim().to_string()
}

/// Parses a model analysis reply into an [`AnalysisResult`].
///
/// Every field absent from the payload gets its documented default, so the
/// result never depends on how complete the model's JSON was.
pub fn parse_analysis(
    raw: &str,
    direction: EmailDirection,
) -> Result<AnalysisResult, NormalizeError> {
    let span = find_json_span(raw).ok_or(NormalizeError::NoStructuredPayloadFound)?;
    let payload: Value = serde_json::from_str(span)?;
    Ok(map_analysis(&payload, direction))
}

fn map_analysis(payload: &Value, direction: EmailDirection) -> AnalysisResult {
    let fields = direction.field_map();

    let overall_score = number_at(payload, fields.score)
        .map(clamp_score)
        .unwrap_or(DEFAULT_SCORE);

    let overall_feedback = string_at(payload, "/overall_assessment/overall_feedback")
        .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string());

    let compliance = ComplianceReport {
        status: string_at(payload, fields.status)
            .map(|s| ComplianceStatus::from_label(&s))
            .unwrap_or_default(),
        issues: string_list_at(payload, "/code_of_conduct_compliance/issues"),
        risk_level: string_at(payload, "/code_of_conduct_compliance/risk_level")
            .map(|s| RiskLevel::from_label(&s))
            .unwrap_or_default(),
    };

    let channel = map_channel(payload, fields.channel_root, direction);
    let suggestions = suggestion_list_at(payload, fields.suggestions);
    let strengths = string_list_at(payload, "/strengths");

    AnalysisResult {
        direction,
        overall_score,
        overall_feedback,
        compliance,
        channel,
        suggestions,
        strengths,
        provenance: Provenance::Model,
        fallback_note: None,
    }
}

fn map_channel(payload: &Value, root: &str, direction: EmailDirection) -> ChannelRecommendation {
    let field = |name: &str| format!("{root}/{name}");

    let recommended_channel = string_at(payload, &field("recommended_channel"))
        .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

    match direction {
        EmailDirection::Outgoing => ChannelRecommendation {
            recommended_channel,
            email_appropriate: bool_at(payload, &field("email_appropriate")).unwrap_or(true),
            ..Default::default()
        },
        EmailDirection::Incoming => ChannelRecommendation {
            recommended_channel,
            email_appropriate: true,
            response_tone: string_at(payload, &field("response_tone")).unwrap_or_default(),
            suggested_approach: string_at(payload, &field("suggested_approach"))
                .unwrap_or_default(),
            key_points: string_list_at(payload, &field("key_points_to_address")),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field readers
// ────────────────────────────────────────────────────────────────────────────

fn string_at(payload: &Value, pointer: &str) -> Option<String> {
    match payload.pointer(pointer)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts numbers and numeric strings such as `"7"` or `"7.5/10"`.
fn number_at(payload: &Value, pointer: &str) -> Option<f64> {
    match payload.pointer(pointer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let end = trimmed[sign_len..]
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(i, _)| sign_len + i);
    trimmed[..end].parse().ok()
}

fn bool_at(payload: &Value, pointer: &str) -> Option<bool> {
    match payload.pointer(pointer)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Collects strings from an array. Object items contribute their first
/// text-like field, so `[{"issue": "..."}]` reads the same as `["..."]`.
fn string_list_at(payload: &Value, pointer: &str) -> Vec<String> {
    let Some(Value::Array(items)) = payload.pointer(pointer) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(_) => first_text(item, &["text", "issue", "description", "point"]),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn suggestion_list_at(payload: &Value, pointer: &str) -> Vec<Suggestion> {
    let Some(Value::Array(items)) = payload.pointer(pointer) else {
        return Vec::new();
    };
    items.iter().filter_map(to_suggestion).collect()
}

fn to_suggestion(item: &Value) -> Option<Suggestion> {
    match item {
        Value::String(s) if !s.trim().is_empty() => Some(Suggestion {
            severity: Severity::default(),
            category: DEFAULT_CATEGORY.to_string(),
            text: s.trim().to_string(),
            rationale: String::new(),
        }),
        Value::Object(_) => {
            let text = first_text(
                item,
                &["suggestion", "text", "recommendation", "improvement"],
            )?;
            Some(Suggestion {
                severity: first_text(item, &["severity", "priority"])
                    .map(|s| Severity::from_label(&s))
                    .unwrap_or_default(),
                category: first_text(item, &["category", "area"])
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                text,
                rationale: first_text(item, &["rationale", "reason", "explanation"])
                    .unwrap_or_default(),
            })
        }
        _ => None,
    }
}

fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| item.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{MAX_SCORE, MIN_SCORE};

    const OUTGOING_REPLY: &str = r#"Sure, here is the analysis you asked for:
{
  "overall_assessment": {
    "effectiveness_score": 8,
    "overall_feedback": "Clear and courteous."
  },
  "code_of_conduct_compliance": {
    "compliance_status": "compliant",
    "issues": [],
    "risk_level": "low"
  },
  "communication_channel": {
    "recommended_channel": "phone",
    "email_appropriate": false
  },
  "improvements": [
    {"severity": "high", "category": "clarity", "suggestion": "State the deadline", "rationale": "Avoids follow-up"},
    "Shorten the second paragraph"
  ],
  "strengths": ["Polite greeting"]
}
Let me know if you need anything else."#;

    const INCOMING_REPLY: &str = r#"{
  "overall_assessment": {"appropriateness_score": "3/10", "overall_feedback": "Hostile tone."},
  "code_of_conduct_compliance": {
    "overall_compliance": "violation",
    "issues": ["Insulting language", {"issue": "Threatening escalation"}],
    "risk_level": "high"
  },
  "response_strategy": {
    "recommended_channel": "face_to_face",
    "response_tone": "calm and factual",
    "suggested_approach": "Acknowledge, then set boundaries",
    "key_points_to_address": ["Timeline", "Conduct expectations"]
  },
  "recommendations": [{"priority": "critical", "area": "conduct", "recommendation": "Escalate to your manager"}]
}"#;

    #[test]
    fn test_extract_reply_trims() {
        assert_eq!(extract_reply("  Hello there.\n"), "Hello there.");
    }

    #[test]
    fn test_outgoing_fields_recovered_from_prose() {
        let result = parse_analysis(OUTGOING_REPLY, EmailDirection::Outgoing).unwrap();
        assert_eq!(result.overall_score, 8.0);
        assert_eq!(result.overall_feedback, "Clear and courteous.");
        assert_eq!(result.compliance.status, ComplianceStatus::Compliant);
        assert_eq!(result.compliance.risk_level, RiskLevel::Low);
        assert_eq!(result.channel.recommended_channel, "phone");
        assert!(!result.channel.email_appropriate);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[0].severity, Severity::High);
        assert_eq!(result.suggestions[0].category, "clarity");
        assert_eq!(result.suggestions[0].rationale, "Avoids follow-up");
        assert_eq!(result.suggestions[1].text, "Shorten the second paragraph");
        assert_eq!(result.suggestions[1].category, DEFAULT_CATEGORY);
        assert_eq!(result.strengths, vec!["Polite greeting".to_string()]);
        assert_eq!(result.provenance, Provenance::Model);
        assert!(result.fallback_note.is_none());
    }

    #[test]
    fn test_incoming_fields_use_incoming_names() {
        let result = parse_analysis(INCOMING_REPLY, EmailDirection::Incoming).unwrap();
        assert_eq!(result.direction, EmailDirection::Incoming);
        assert_eq!(result.overall_score, 3.0);
        assert_eq!(result.compliance.status, ComplianceStatus::Violation);
        assert_eq!(result.compliance.risk_level, RiskLevel::High);
        assert_eq!(
            result.compliance.issues,
            vec![
                "Insulting language".to_string(),
                "Threatening escalation".to_string()
            ]
        );
        assert_eq!(result.channel.recommended_channel, "face_to_face");
        assert_eq!(result.channel.response_tone, "calm and factual");
        assert_eq!(result.channel.key_points.len(), 2);
        assert_eq!(result.suggestions[0].severity, Severity::Critical);
        assert_eq!(result.suggestions[0].text, "Escalate to your manager");
    }

    #[test]
    fn test_direction_mismatch_falls_back_to_defaults() {
        // Outgoing field names read with the incoming map find nothing.
        let result = parse_analysis(OUTGOING_REPLY, EmailDirection::Incoming).unwrap();
        assert_eq!(result.overall_score, DEFAULT_SCORE);
        assert_eq!(result.compliance.status, ComplianceStatus::Compliant);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_empty_object_gets_every_default() {
        let result = parse_analysis("{}", EmailDirection::Outgoing).unwrap();
        assert_eq!(result.overall_score, DEFAULT_SCORE);
        assert_eq!(result.overall_feedback, DEFAULT_FEEDBACK);
        assert_eq!(result.compliance.status, ComplianceStatus::Compliant);
        assert_eq!(result.compliance.risk_level, RiskLevel::Low);
        assert!(result.compliance.issues.is_empty());
        assert_eq!(result.channel, ChannelRecommendation::default());
        assert!(result.suggestions.is_empty());
        assert!(result.strengths.is_empty());
        assert_eq!(result.provenance, Provenance::Model);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let high = r#"{"overall_assessment": {"effectiveness_score": 42}}"#;
        let low = r#"{"overall_assessment": {"effectiveness_score": -3}}"#;
        assert_eq!(
            parse_analysis(high, EmailDirection::Outgoing)
                .unwrap()
                .overall_score,
            MAX_SCORE
        );
        assert_eq!(
            parse_analysis(low, EmailDirection::Outgoing)
                .unwrap()
                .overall_score,
            MIN_SCORE
        );
    }

    #[test]
    fn test_unknown_status_label_maps_to_unknown() {
        let raw = r#"{"code_of_conduct_compliance": {"compliance_status": "it depends"}}"#;
        let result = parse_analysis(raw, EmailDirection::Outgoing).unwrap();
        assert_eq!(result.compliance.status, ComplianceStatus::Unknown);
    }

    #[test]
    fn test_prose_only_is_no_payload() {
        let err = parse_analysis("I'm sorry, I can't help with that.", EmailDirection::Outgoing)
            .unwrap_err();
        assert!(matches!(err, NormalizeError::NoStructuredPayloadFound));
    }

    #[test]
    fn test_broken_json_is_unparseable() {
        let err = parse_analysis(
            "Result: {overall_assessment: {score: 7,}}",
            EmailDirection::Outgoing,
        )
        .unwrap_err();
        assert!(matches!(err, NormalizeError::UnparseableStructuredPayload(_)));
    }

    #[test]
    fn test_leading_number_parsing() {
        assert_eq!(leading_number("7.5/10"), Some(7.5));
        assert_eq!(leading_number(" 9 "), Some(9.0));
        assert_eq!(leading_number("high"), None);
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("+7/10"), Some(7.0));
        assert_eq!(leading_number("-"), None);
    }

    #[test]
    fn test_negative_string_score_clamps_like_number() {
        let text = r#"{"overall_assessment": {"effectiveness_score": "-3"}}"#;
        let number = r#"{"overall_assessment": {"effectiveness_score": -3}}"#;
        let from_text = parse_analysis(text, EmailDirection::Outgoing).unwrap();
        let from_number = parse_analysis(number, EmailDirection::Outgoing).unwrap();
        assert_eq!(from_text.overall_score, MIN_SCORE);
        assert_eq!(from_text.overall_score, from_number.overall_score);
    }

    #[test]
    fn test_email_appropriate_accepts_yes_no_strings() {
        let raw = r#"{"communication_channel": {"email_appropriate": "no"}}"#;
        let result = parse_analysis(raw, EmailDirection::Outgoing).unwrap();
        assert!(!result.channel.email_appropriate);
    }
}
