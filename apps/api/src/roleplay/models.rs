use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARACTER_NAME: &str = "Colleague";
pub const DEFAULT_CHARACTER_ROLE: &str = "Council Officer";
pub const DEFAULT_PERSONALITY: &str = "A professional local government colleague.";
pub const DEFAULT_COMMUNICATION_STYLE: &str = "professional";
pub const DEFAULT_SCENARIO_DESCRIPTION: &str = "A general workplace conversation.";

/// DISC trait scores, each on an independent 0–100 axis.
/// Only rendered as flavour text in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscProfile {
    pub dominance: u32,
    pub influence: u32,
    pub steadiness: u32,
    pub compliance: u32,
}

impl DiscProfile {
    pub const fn new(dominance: u32, influence: u32, steadiness: u32, compliance: u32) -> Self {
        Self {
            dominance,
            influence,
            steadiness,
            compliance,
        }
    }

    fn clamped(self) -> Self {
        Self {
            dominance: self.dominance.min(100),
            influence: self.influence.min(100),
            steadiness: self.steadiness.min(100),
            compliance: self.compliance.min(100),
        }
    }

    fn axes(&self) -> [(&'static str, u32); 4] {
        [
            ("Dominance", self.dominance),
            ("Influence", self.influence),
            ("Steadiness", self.steadiness),
            ("Compliance", self.compliance),
        ]
    }

    /// Highest-scoring axis. Ties resolve in D, I, S, C order.
    pub fn primary_style(&self) -> &'static str {
        let axes = self.axes();
        let mut best = axes[0];
        for axis in &axes[1..] {
            if axis.1 > best.1 {
                best = *axis;
            }
        }
        best.0
    }

    pub fn describe(&self) -> String {
        let scores: Vec<String> = self
            .axes()
            .iter()
            .map(|(name, score)| format!("{name} {score}/100"))
            .collect();
        format!(
            "{} (primary style: {})",
            scores.join(", "),
            self.primary_style()
        )
    }
}

/// The persona the model is asked to play. Every optional field has a
/// default applied once, in [`Character::normalized`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Catalog id when the character came from a preset.
    pub id: Option<String>,
    pub name: String,
    pub role: String,
    /// Free-text personality and behaviour description.
    pub personality: String,
    pub objectives: Vec<String>,
    pub communication_style: String,
    pub disc: Option<DiscProfile>,
    pub background: Option<String>,
    pub department: Option<String>,
    /// e.g. "junior", "senior", "elected official".
    pub seniority_level: Option<String>,
    pub triggers: Vec<String>,
    pub strengths: Vec<String>,
}

impl Character {
    pub fn normalized(self) -> Self {
        Self {
            id: non_blank(self.id),
            name: or_default(self.name, DEFAULT_CHARACTER_NAME),
            role: or_default(self.role, DEFAULT_CHARACTER_ROLE),
            personality: or_default(self.personality, DEFAULT_PERSONALITY),
            objectives: non_blank_items(self.objectives),
            communication_style: or_default(
                self.communication_style,
                DEFAULT_COMMUNICATION_STYLE,
            ),
            disc: self.disc.map(DiscProfile::clamped),
            background: non_blank(self.background),
            department: non_blank(self.department),
            seniority_level: non_blank(self.seniority_level),
            triggers: non_blank_items(self.triggers),
            strengths: non_blank_items(self.strengths),
        }
    }
}

/// Optional structured scenario fields, rendered as labeled prompt sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDetails {
    pub title: Option<String>,
    pub background: Option<String>,
    /// What the practising user is trying to achieve.
    pub objective: Option<String>,
    pub challenges: Vec<String>,
    pub category: Option<String>,
}

impl ScenarioDetails {
    fn normalized(self) -> Option<Self> {
        let details = Self {
            title: non_blank(self.title),
            background: non_blank(self.background),
            objective: non_blank(self.objective),
            challenges: non_blank_items(self.challenges),
            category: non_blank(self.category),
        };
        let empty = details.title.is_none()
            && details.background.is_none()
            && details.objective.is_none()
            && details.challenges.is_empty()
            && details.category.is_none();
        (!empty).then_some(details)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub description: String,
    pub details: Option<ScenarioDetails>,
}

impl Scenario {
    #[cfg(test)]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            details: None,
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            description: or_default(self.description, DEFAULT_SCENARIO_DESCRIPTION),
            details: self.details.and_then(ScenarioDetails::normalized),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    User,
    #[serde(alias = "ai_personality", alias = "assistant")]
    Character,
}

/// One replayed turn. Never stored by the service; the caller sends the
/// history back on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: SpeakerRole,
    pub content: String,
    #[serde(default)]
    pub ordinal: u32,
}

#[cfg(test)]
impl ConversationTurn {
    pub fn user(ordinal: u32, content: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::User,
            content: content.into(),
            ordinal,
        }
    }

    pub fn character(ordinal: u32, content: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Character,
            content: content.into(),
            ordinal,
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}
