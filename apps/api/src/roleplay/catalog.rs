//! Preset characters and scenarios.
//!
//! One data table per kind, consumed by the single prompt renderer in
//! `composer`. Adding a character means adding a row here, never a new
//! code path.

use serde::Serialize;

use crate::roleplay::models::{Character, DiscProfile, Scenario, ScenarioDetails};

pub struct CharacterPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub trait_description: &'static str,
    pub objectives: &'static [&'static str],
    pub communication_style: &'static str,
    pub disc: DiscProfile,
    pub background: &'static str,
    pub department: &'static str,
    pub seniority_level: &'static str,
    pub triggers: &'static [&'static str],
    pub strengths: &'static [&'static str],
}

impl CharacterPreset {
    pub fn to_character(&self) -> Character {
        Character {
            id: Some(self.id.to_string()),
            name: self.name.to_string(),
            role: self.role.to_string(),
            personality: self.trait_description.to_string(),
            objectives: to_strings(self.objectives),
            communication_style: self.communication_style.to_string(),
            disc: Some(self.disc),
            background: Some(self.background.to_string()),
            department: Some(self.department.to_string()),
            seniority_level: Some(self.seniority_level.to_string()),
            triggers: to_strings(self.triggers),
            strengths: to_strings(self.strengths),
        }
        .normalized()
    }
}

pub const CHARACTER_PRESETS: &[CharacterPreset] = &[
    CharacterPreset {
        id: "infrastructure_engineer",
        name: "David Walsh",
        role: "Senior Infrastructure Engineer",
        trait_description: "Confident and results-driven. Speaks plainly, wants decisions made \
            quickly and gets impatient with process that does not fix roads or drains.",
        objectives: &[
            "Get capital works approved on schedule",
            "Protect the maintenance budget",
            "Avoid scope creep from other departments",
        ],
        communication_style: "direct and brief",
        disc: DiscProfile::new(85, 35, 30, 55),
        background: "Civil engineer with twenty years in council works depots and project delivery.",
        department: "Infrastructure Services",
        seniority_level: "senior",
        triggers: &["Vague requirements", "Last-minute changes", "Meetings without decisions"],
        strengths: &["Technical depth", "Delivery under pressure"],
    },
    CharacterPreset {
        id: "budget_director",
        name: "Karen Mitchell",
        role: "Director of Finance",
        trait_description: "Decisive and numbers-focused. Challenges every cost, expects \
            business cases and is comfortable delivering unwelcome news.",
        objectives: &[
            "Hold the line on the operating budget",
            "Secure savings without cutting frontline services",
            "Keep the council's audit record clean",
        ],
        communication_style: "direct and formal",
        disc: DiscProfile::new(80, 30, 35, 70),
        background: "Chartered accountant who moved from state treasury into local government.",
        department: "Corporate Services",
        seniority_level: "executive",
        triggers: &["Unfunded proposals", "Cost overruns", "Consultant fees"],
        strengths: &["Financial analysis", "Clear decisions"],
    },
    CharacterPreset {
        id: "community_engagement",
        name: "Priya Sharma",
        role: "Community Engagement Officer",
        trait_description: "Warm, enthusiastic and people-centred. Builds rapport easily, \
            but can drift off topic and dislikes conversations that feel cold or transactional.",
        objectives: &[
            "Make sure residents' voices shape decisions",
            "Build goodwill with community groups",
            "Get visible support for engagement events",
        ],
        communication_style: "friendly and expressive",
        disc: DiscProfile::new(30, 85, 60, 30),
        background: "Former youth worker who runs the council's consultation program.",
        department: "Community Services",
        seniority_level: "mid-level",
        triggers: &["Being dismissed", "Decisions made without consultation"],
        strengths: &["Building rapport", "Reading the room"],
    },
    CharacterPreset {
        id: "strategic_planner",
        name: "Emma Fraser",
        role: "Strategic Planner",
        trait_description: "Energetic and visionary. Talks about the big picture and future \
            growth, persuades with enthusiasm and gets frustrated by short-term thinking.",
        objectives: &[
            "Advance the community strategic plan",
            "Win support for long-term projects",
            "Connect departmental work to council's vision",
        ],
        communication_style: "enthusiastic and persuasive",
        disc: DiscProfile::new(45, 80, 35, 45),
        background: "Urban planner with a background in regional growth strategies.",
        department: "Planning and Environment",
        seniority_level: "senior",
        triggers: &["Short-term thinking", "Siloed decision making"],
        strengths: &["Long-range thinking", "Persuasion"],
    },
    CharacterPreset {
        id: "councillor_thompson",
        name: "Councillor Helen Thompson",
        role: "Elected Councillor",
        trait_description: "Patient, steady and loyal to her ward. Listens carefully, avoids \
            conflict, and resists sudden change that unsettles long-standing residents.",
        objectives: &[
            "Protect services her ward relies on",
            "Keep residents informed and reassured",
            "Avoid surprises before council meetings",
        ],
        communication_style: "calm and considered",
        disc: DiscProfile::new(25, 50, 85, 55),
        background: "Retired school principal serving her second term on council.",
        department: "Council",
        seniority_level: "elected official",
        triggers: &["Rushed decisions", "Being surprised in public", "Pressure tactics"],
        strengths: &["Listening", "Ward knowledge"],
    },
    CharacterPreset {
        id: "union_rep",
        name: "Gary Holden",
        role: "Union Delegate",
        trait_description: "Precise and assertive. Knows the award and enterprise agreement \
            clause by clause, insists on correct process and documents everything.",
        objectives: &[
            "Protect members' conditions",
            "Ensure consultation obligations are met",
            "Get commitments in writing",
        ],
        communication_style: "formal and exacting",
        disc: DiscProfile::new(60, 30, 40, 85),
        background: "Outdoor staff team leader and workplace delegate for fifteen years.",
        department: "Operations",
        seniority_level: "team leader",
        triggers: &["Process shortcuts", "Verbal-only promises", "Changes to rosters"],
        strengths: &["Industrial instruments", "Record keeping"],
    },
    CharacterPreset {
        id: "skeptical_councillor",
        name: "Councillor Margaret Stevens",
        role: "Elected Councillor",
        trait_description: "Skeptical, budget-focused, community-oriented and direct. \
            Presses for specifics and does not accept vague answers.",
        objectives: &["Protect ratepayer money", "Ensure transparency", "Challenge spending"],
        communication_style: "formal but challenging",
        disc: DiscProfile::new(75, 40, 30, 70),
        background: "Former small business owner, elected 3 terms, represents ratepayer interests.",
        department: "Council",
        seniority_level: "elected official",
        triggers: &["Vague answers", "Cost overruns", "Consultant fees"],
        strengths: &["Financial scrutiny", "Community connection"],
    },
    CharacterPreset {
        id: "frustrated_resident",
        name: "Robert Chen",
        role: "Local Resident",
        trait_description: "Frustrated, detail-oriented, persistent and taxpayer-focused. \
            Emotional but articulate, and quick to escalate if he feels brushed off.",
        objectives: &[
            "Get problems fixed",
            "Receive value for rates",
            "Be heard and respected",
        ],
        communication_style: "emotional but articulate",
        disc: DiscProfile::new(70, 55, 25, 60),
        background: "Local business owner, rates payer for 15 years, active in community.",
        department: "Community",
        seniority_level: "ratepayer",
        triggers: &["Bureaucratic responses", "Delays", "Being dismissed"],
        strengths: &["Knows local issues", "Passionate about community"],
    },
];

pub struct ScenarioPreset {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub user_role: &'static str,
    pub description: &'static str,
    pub background: &'static str,
    pub objective: &'static str,
    pub challenges: &'static [&'static str],
    /// Skills the practising user is meant to build.
    pub learning_objectives: &'static [&'static str],
    pub suggested_character: &'static str,
}

impl ScenarioPreset {
    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            description: self.description.to_string(),
            details: Some(ScenarioDetails {
                title: Some(self.title.to_string()),
                background: Some(self.background.to_string()),
                objective: Some(self.objective.to_string()),
                challenges: to_strings(self.challenges),
                category: Some(self.category.to_string()),
            }),
        }
        .normalized()
    }
}

pub const SCENARIO_PRESETS: &[ScenarioPreset] = &[
    ScenarioPreset {
        id: "budget_cut",
        title: "Budget Cut Discussion",
        category: "leadership",
        user_role: "Director",
        description: "You are a Director who needs to inform a Department Manager that their \
            budget is being cut by 15% due to reduced state funding.",
        background: "The manager's team is already stretched thin and morale is low.",
        objective: "Deliver the bad news clearly but compassionately, help them find ways to \
            maintain service levels and keep their trust and motivation.",
        challenges: &[
            "The manager may be defensive or frustrated",
            "Concerns about staff workload",
            "Worry about the team's future",
        ],
        learning_objectives: &[
            "Deliver difficult news with empathy",
            "Guide problem-solving without being directive",
            "Maintain relationships during tough conversations",
            "Balance organisational needs with team concerns",
        ],
        suggested_character: "budget_director",
    },
    ScenarioPreset {
        id: "angry_resident",
        title: "Angry Resident Call",
        category: "customer_service",
        user_role: "Customer Service Officer",
        description: "A longtime resident is calling about their rates notice, which has \
            increased significantly.",
        background: "They are upset about the increase while local roads have potholes and \
            library hours were reduced. They feel they are not getting value for money.",
        objective: "Listen respectfully, explain the rates increase clearly, address the \
            service complaints and leave them feeling heard.",
        challenges: &[
            "Threats to complain to the mayor and local media",
            "Strong emotion and interruptions",
            "Complaints outside your direct control",
        ],
        learning_objectives: &[
            "De-escalate emotional situations",
            "Explain complex policy in simple terms",
            "Show empathy while maintaining boundaries",
            "Turn complaints into constructive dialogue",
        ],
        suggested_character: "frustrated_resident",
    },
];

/// Catalog listing entry returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub communication_style: &'static str,
    pub primary_style: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub user_role: &'static str,
    pub learning_objectives: &'static [&'static str],
    pub suggested_character: &'static str,
}

pub fn find_character(id: &str) -> Option<Character> {
    CHARACTER_PRESETS
        .iter()
        .find(|p| p.id == id)
        .map(CharacterPreset::to_character)
}

pub fn find_scenario(id: &str) -> Option<Scenario> {
    SCENARIO_PRESETS
        .iter()
        .find(|p| p.id == id)
        .map(ScenarioPreset::to_scenario)
}

pub fn list_characters() -> Vec<CharacterSummary> {
    CHARACTER_PRESETS
        .iter()
        .map(|p| CharacterSummary {
            id: p.id,
            name: p.name,
            role: p.role,
            communication_style: p.communication_style,
            primary_style: p.disc.primary_style(),
        })
        .collect()
}

pub fn list_scenarios() -> Vec<ScenarioSummary> {
    SCENARIO_PRESETS
        .iter()
        .map(|p| ScenarioSummary {
            id: p.id,
            title: p.title,
            category: p.category,
            user_role: p.user_role,
            learning_objectives: p.learning_objectives,
            suggested_character: p.suggested_character,
        })
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_character_ids_are_unique() {
        let ids: HashSet<_> = CHARACTER_PRESETS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), CHARACTER_PRESETS.len());
    }

    #[test]
    fn test_every_scenario_suggests_a_known_character() {
        for scenario in SCENARIO_PRESETS {
            assert!(
                find_character(scenario.suggested_character).is_some(),
                "{} suggests unknown character {}",
                scenario.id,
                scenario.suggested_character
            );
        }
    }

    #[test]
    fn test_find_character_returns_normalized_record() {
        let c = find_character("union_rep").unwrap();
        assert_eq!(c.id.as_deref(), Some("union_rep"));
        assert_eq!(c.name, "Gary Holden");
        assert!(!c.objectives.is_empty());
        assert_eq!(c.disc.unwrap().primary_style(), "Compliance");
    }

    #[test]
    fn test_unknown_ids_return_none() {
        assert!(find_character("nobody").is_none());
        assert!(find_scenario("nothing").is_none());
    }

    #[test]
    fn test_scenario_preset_carries_structured_details() {
        let s = find_scenario("budget_cut").unwrap();
        let details = s.details.unwrap();
        assert_eq!(details.title.as_deref(), Some("Budget Cut Discussion"));
        assert_eq!(details.challenges.len(), 3);
    }

    #[test]
    fn test_presets_carry_strengths_and_seniority() {
        for preset in CHARACTER_PRESETS {
            let c = preset.to_character();
            assert!(c.seniority_level.is_some(), "{} has no seniority", preset.id);
            assert!(!c.strengths.is_empty(), "{} has no strengths", preset.id);
        }
        let resident = find_character("frustrated_resident").unwrap();
        assert_eq!(resident.seniority_level.as_deref(), Some("ratepayer"));
    }

    #[test]
    fn test_scenario_listing_exposes_learning_objectives() {
        let listed = list_scenarios();
        let angry = listed.iter().find(|s| s.id == "angry_resident").unwrap();
        assert_eq!(angry.learning_objectives.len(), 4);
        assert!(angry
            .learning_objectives
            .contains(&"De-escalate emotional situations"));

        let json = serde_json::to_value(&listed).unwrap();
        assert!(json[0]["learning_objectives"].is_array());
    }

    #[test]
    fn test_listing_covers_every_preset() {
        assert_eq!(list_characters().len(), CHARACTER_PRESETS.len());
        assert_eq!(list_scenarios().len(), SCENARIO_PRESETS.len());
    }
}
