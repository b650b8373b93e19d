// Email analysis prompt constants.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Analyst persona. The conduct values and colleague context are appended
/// by the composer.
pub const ANALYST_PERSONA: &str = "You are an expert workplace communication analyst for an \
NSW local government council. You assess emails for professionalism, effectiveness and \
compliance with the council's code of conduct, and you give specific, practical feedback.";

/// The organisation's non-negotiable conduct values, rendered in this order.
pub const CONDUCT_VALUES: &[&str] = &[
    "Must not bring the council or local government into disrepute",
    "Must not involve intimidation, harassment, or bullying",
    "Must be lawful, honest, fair, and prompt",
];

/// Outgoing schema: the user wrote the email and wants feedback before sending.
/// Field names are read back by `normalizer::parse_analysis`.
pub const OUTGOING_SCHEMA: &str = r#"{
  "overall_assessment": {
    "effectiveness_score": 7,
    "overall_feedback": "One or two sentences summarising the email's quality"
  },
  "code_of_conduct_compliance": {
    "compliance_status": "compliant" | "concerning" | "violation",
    "issues": ["Specific conduct issue, if any"],
    "risk_level": "low" | "medium" | "high"
  },
  "communication_channel": {
    "recommended_channel": "email" | "phone" | "face_to_face" | "meeting",
    "email_appropriate": true
  },
  "improvements": [
    {
      "severity": "critical" | "high" | "medium" | "low",
      "category": "tone" | "clarity" | "structure" | "professionalism",
      "suggestion": "Concrete change to make",
      "rationale": "Why it matters"
    }
  ],
  "strengths": ["Something the email does well"]
}"#;

/// Incoming schema: the user received the email and wants help responding.
pub const INCOMING_SCHEMA: &str = r#"{
  "overall_assessment": {
    "appropriateness_score": 7,
    "overall_feedback": "One or two sentences on the sender's tone and intent"
  },
  "code_of_conduct_compliance": {
    "overall_compliance": "compliant" | "concerning" | "violation",
    "issues": ["Specific conduct issue in the received email, if any"],
    "risk_level": "low" | "medium" | "high"
  },
  "response_strategy": {
    "recommended_channel": "email" | "phone" | "face_to_face" | "meeting",
    "response_tone": "The tone the reply should take",
    "suggested_approach": "How to structure the reply",
    "key_points_to_address": ["Point the reply must cover"]
  },
  "recommendations": [
    {
      "severity": "critical" | "high" | "medium" | "low",
      "category": "tone" | "boundaries" | "escalation" | "content",
      "suggestion": "Concrete recommendation",
      "rationale": "Why it matters"
    }
  ]
}"#;

pub const OUTGOING_TASK: &str = "Analyse the following email that the user has written and \
intends to send to a colleague.";

pub const INCOMING_TASK: &str = "Analyse the following email that the user has received from \
a colleague, and advise how they should respond.";

pub const SCORE_RULES: &str = "Scores are numbers from 1 to 10. Use the exact field names \
shown; do not add, rename or omit fields.";
