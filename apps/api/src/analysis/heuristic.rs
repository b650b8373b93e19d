//! Heuristic email analyzer. Rule based, never calls the model.
//!
//! Used whenever the model path fails. Produces the same `AnalysisResult`
//! shape as the model path, tagged `Provenance::Fallback`.
//!
//! Algorithm:
//! 1. Start at 5.0.
//! 2. +0.5 greeting, +0.5 closing, +1.0 politeness marker,
//!    +0.5 body length in (50, 300) chars, +0.5 subject longer than 5 chars.
//! 3. −3.0 if any concerning pattern matches (denylist word, 4+ capitals
//!    in a row, or 2+ consecutive `!`).
//! 4. Clamp to [1, 10].

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::models::{
    clamp_score, AnalysisResult, ChannelRecommendation, ComplianceReport, ComplianceStatus,
    EmailDirection, Provenance, RiskLevel, Severity, Suggestion, DEFAULT_CHANNEL,
};

const BASELINE_SCORE: f64 = 5.0;
const GREETING_BONUS: f64 = 0.5;
const CLOSING_BONUS: f64 = 0.5;
const POLITENESS_BONUS: f64 = 1.0;
const LENGTH_BONUS: f64 = 0.5;
const SUBJECT_BONUS: f64 = 0.5;
const CONCERNING_PENALTY: f64 = 3.0;

const MIN_BODY_CHARS: usize = 50;
const MAX_BODY_CHARS: usize = 300;
const MIN_SUBJECT_CHARS: usize = 5;

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hi|hello|dear|good morning|good afternoon)\b").unwrap()
});
static CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(regards|thanks|sincerely|best|cheers)\b").unwrap());
static POLITENESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(please|thank you|would you|could you)\b").unwrap());
static DEROGATORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(stupid|idiot|incompetent|useless|pathetic|ridiculous|moron|dumb)\b")
        .unwrap()
});
static SHOUTING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{4,}").unwrap());
static REPEATED_EXCLAMATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!{2,}").unwrap());

/// Which rubric signals were found. Kept separate from scoring so the
/// suggestion and feedback text can be derived from the same facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub greeting: bool,
    pub closing: bool,
    pub politeness: bool,
    pub good_length: bool,
    pub descriptive_subject: bool,
    pub derogatory: bool,
    pub shouting: bool,
    pub repeated_exclamation: bool,
}

impl Signals {
    pub fn detect(subject: &str, body: &str) -> Self {
        let full_text = format!("{subject}\n{body}");
        let body_chars = body.chars().count();

        Self {
            greeting: GREETING.is_match(body),
            closing: CLOSING.is_match(body),
            politeness: POLITENESS.is_match(body),
            good_length: body_chars > MIN_BODY_CHARS && body_chars < MAX_BODY_CHARS,
            descriptive_subject: subject.trim().chars().count() > MIN_SUBJECT_CHARS,
            derogatory: DEROGATORY.is_match(&full_text),
            shouting: SHOUTING.is_match(&full_text),
            repeated_exclamation: REPEATED_EXCLAMATION.is_match(&full_text),
        }
    }

    pub fn concerning(&self) -> bool {
        self.derogatory || self.shouting || self.repeated_exclamation
    }

    pub fn score(&self) -> f64 {
        let mut score = BASELINE_SCORE;
        if self.greeting {
            score += GREETING_BONUS;
        }
        if self.closing {
            score += CLOSING_BONUS;
        }
        if self.politeness {
            score += POLITENESS_BONUS;
        }
        if self.good_length {
            score += LENGTH_BONUS;
        }
        if self.descriptive_subject {
            score += SUBJECT_BONUS;
        }
        if self.concerning() {
            score -= CONCERNING_PENALTY;
        }
        clamp_score(score)
    }
}

/// Scores an email without the model. Total: never fails, for any input.
pub fn analyze_heuristically(subject: &str, body: &str) -> AnalysisResult {
    let signals = Signals::detect(subject, body);
    let concerning = signals.concerning();
    let overall_score = signals.score();

    let compliance = if concerning {
        ComplianceReport {
            status: ComplianceStatus::Concerning,
            issues: concerning_issues(&signals),
            risk_level: RiskLevel::High,
        }
    } else {
        ComplianceReport {
            status: ComplianceStatus::Compliant,
            issues: Vec::new(),
            risk_level: RiskLevel::Low,
        }
    };

    let channel = if concerning {
        ChannelRecommendation {
            recommended_channel: "face_to_face".to_string(),
            email_appropriate: false,
            ..Default::default()
        }
    } else {
        ChannelRecommendation {
            recommended_channel: DEFAULT_CHANNEL.to_string(),
            ..Default::default()
        }
    };

    AnalysisResult {
        direction: EmailDirection::default(),
        overall_score,
        overall_feedback: build_feedback(overall_score, concerning),
        compliance,
        channel,
        suggestions: build_suggestions(&signals),
        strengths: build_strengths(&signals),
        provenance: Provenance::Fallback,
        fallback_note: None,
    }
}

fn concerning_issues(signals: &Signals) -> Vec<String> {
    let mut issues = Vec::new();
    if signals.derogatory {
        issues.push("Contains derogatory language".to_string());
    }
    if signals.shouting {
        issues.push("Uses capital letters that read as shouting".to_string());
    }
    if signals.repeated_exclamation {
        issues.push("Uses repeated exclamation marks".to_string());
    }
    issues
}

/// Suggestions in fixed order: tone review, greeting, closing.
fn build_suggestions(signals: &Signals) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if signals.concerning() {
        suggestions.push(Suggestion {
            severity: Severity::Critical,
            category: "professionalism".to_string(),
            text: "Review this email for professional tone before sending.".to_string(),
            rationale: "Derogatory words, shouting in capitals or repeated exclamation marks \
                can amount to intimidation or bullying under the code of conduct."
                .to_string(),
        });
    }
    if !signals.greeting {
        suggestions.push(Suggestion {
            severity: Severity::Low,
            category: "structure".to_string(),
            text: "Consider adding a greeting.".to_string(),
            rationale: "Opening with the recipient's name sets a respectful tone.".to_string(),
        });
    }
    if !signals.closing {
        suggestions.push(Suggestion {
            severity: Severity::Low,
            category: "structure".to_string(),
            text: "Add a professional closing.".to_string(),
            rationale: "A closing such as 'Kind regards' signals courtesy and finishes the \
                message clearly."
                .to_string(),
        });
    }

    suggestions
}

fn build_strengths(signals: &Signals) -> Vec<String> {
    let mut strengths = Vec::new();
    if signals.greeting {
        strengths.push("Opens with a greeting".to_string());
    }
    if signals.politeness {
        strengths.push("Uses courteous language".to_string());
    }
    if signals.closing {
        strengths.push("Ends with a professional closing".to_string());
    }
    if signals.good_length {
        strengths.push("Concise length".to_string());
    }
    if signals.descriptive_subject {
        strengths.push("Descriptive subject line".to_string());
    }
    strengths
}

fn build_feedback(score: f64, concerning: bool) -> String {
    if concerning {
        format!(
            "Tone concerns detected ({score:.1}/10). Rewrite before sending to keep the message \
             consistent with the code of conduct."
        )
    } else if score >= 7.5 {
        format!("Professional and courteous ({score:.1}/10).")
    } else {
        format!("Acceptable ({score:.1}/10), with room to improve structure and courtesy.")
    }
}
