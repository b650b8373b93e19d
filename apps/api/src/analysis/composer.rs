//! Email analysis prompt composition. Pure and deterministic.

use std::fmt::Write as _;

use crate::analysis::models::{ColleagueInfo, EmailDirection};
use crate::analysis::prompts::{
    ANALYST_PERSONA, CONDUCT_VALUES, INCOMING_SCHEMA, INCOMING_TASK, OUTGOING_SCHEMA,
    OUTGOING_TASK, SCORE_RULES,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// A system/user prompt pair. `system` travels in the API's dedicated
/// system field; `user` is the single user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPrompt {
    pub system: String,
    pub user: String,
}

pub fn compose_email_analysis_prompt(
    subject: &str,
    body: &str,
    colleague: Option<&ColleagueInfo>,
    direction: EmailDirection,
) -> EmailPrompt {
    EmailPrompt {
        system: compose_system(colleague),
        user: compose_user(subject, body, direction),
    }
}

fn compose_system(colleague: Option<&ColleagueInfo>) -> String {
    let mut system = String::with_capacity(1024);
    system.push_str(ANALYST_PERSONA);
    system.push_str("\n\nCODE OF CONDUCT VALUES (non-negotiable):\n");
    for value in CONDUCT_VALUES {
        let _ = writeln!(system, "- {value}");
    }

    if let Some(colleague) = colleague.filter(|c| !c.is_empty()) {
        system.push_str("\nCOLLEAGUE CONTEXT:\n");
        if let Some(name) = non_blank(&colleague.name) {
            let _ = writeln!(system, "Name: {name}");
        }
        if let Some(role) = non_blank(&colleague.role) {
            let _ = writeln!(system, "Role: {role}");
        }
        if let Some(style) = non_blank(&colleague.communication_style) {
            let _ = writeln!(system, "Communication style: {style}");
        }
        system.push_str("Take this colleague's role and style into account.\n");
    }

    system
}

fn compose_user(subject: &str, body: &str, direction: EmailDirection) -> String {
    let (task, schema) = match direction {
        EmailDirection::Outgoing => (OUTGOING_TASK, OUTGOING_SCHEMA),
        EmailDirection::Incoming => (INCOMING_TASK, INCOMING_SCHEMA),
    };

    let mut user = String::with_capacity(2048 + body.len());
    user.push_str(task);
    user.push_str("\n\nEMAIL SUBJECT:\n");
    user.push_str(subject);
    user.push_str("\n\nEMAIL BODY:\n");
    user.push_str(body);
    user.push_str("\n\nReturn a JSON object with this EXACT schema:\n");
    user.push_str(schema);
    user.push_str("\n\n");
    user.push_str(SCORE_RULES);
    user.push('\n');
    user.push_str(JSON_ONLY_INSTRUCTION);
    user
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
