//! Character prompt composition. Pure: no I/O, no clock, no randomness.
//!
//! Inputs are expected to be normalized (see `Character::normalized`);
//! `conversation` applies that at its boundary.

use std::fmt::Write as _;

use crate::llm_client::prompts::ORGANISATION_CONTEXT;
use crate::roleplay::models::{Character, ConversationTurn, Scenario};
use crate::roleplay::prompts::{
    NO_HISTORY_MARKER, OPENING_INSTRUCTION, REPLY_INSTRUCTION, ROLEPLAY_INSTRUCTIONS,
    SETTING_REMINDER,
};
use crate::roleplay::session::{recent_turns, render_turns};

/// An ongoing conversation: the replayed history and the newest user message.
#[derive(Debug, Clone, Copy)]
pub struct Continuation<'a> {
    pub history: &'a [ConversationTurn],
    pub user_message: &'a str,
}

/// Builds the full roleplay prompt.
///
/// Sections, in order: role sentence, CHARACTER DETAILS, SCENARIO,
/// ROLEPLAY INSTRUCTIONS, then either the opening instruction or the
/// truncated history followed by the user's message.
pub fn compose_character_prompt(
    character: &Character,
    scenario: &Scenario,
    continuation: Option<Continuation<'_>>,
) -> String {
    let mut prompt = String::with_capacity(2048);

    // `write!` into a String cannot fail.
    let _ = writeln!(
        prompt,
        "You are {}, a {} in {}.",
        character.name, character.role, ORGANISATION_CONTEXT
    );
    prompt.push('\n');

    push_character_details(&mut prompt, character);
    push_scenario(&mut prompt, scenario);

    prompt.push_str("ROLEPLAY INSTRUCTIONS:\n");
    for (i, instruction) in ROLEPLAY_INSTRUCTIONS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, instruction);
    }
    prompt.push('\n');
    prompt.push_str(SETTING_REMINDER);
    prompt.push_str("\n\n");

    match continuation {
        None => prompt.push_str(OPENING_INSTRUCTION),
        Some(c) => {
            prompt.push_str("CONVERSATION HISTORY:\n");
            let turns = recent_turns(c.history);
            if turns.is_empty() {
                prompt.push_str(NO_HISTORY_MARKER);
                prompt.push('\n');
            } else {
                prompt.push_str(&render_turns(turns, &character.name));
            }
            let _ = writeln!(prompt, "\nUSER: {}\n", c.user_message.trim());
            prompt.push_str(REPLY_INSTRUCTION);
        }
    }

    prompt
}

fn push_character_details(prompt: &mut String, character: &Character) {
    prompt.push_str("CHARACTER DETAILS:\n");
    let _ = writeln!(prompt, "Name: {}", character.name);
    let _ = writeln!(prompt, "Role: {}", character.role);
    if let Some(department) = &character.department {
        let _ = writeln!(prompt, "Department: {department}");
    }
    if let Some(seniority) = &character.seniority_level {
        let _ = writeln!(prompt, "Seniority level: {seniority}");
    }
    let _ = writeln!(prompt, "Personality: {}", character.personality);
    let _ = writeln!(
        prompt,
        "Communication style: {}",
        character.communication_style
    );
    if let Some(background) = &character.background {
        let _ = writeln!(prompt, "Background: {background}");
    }
    if let Some(disc) = &character.disc {
        let _ = writeln!(prompt, "Behavioural profile (DISC): {}", disc.describe());
    }

    prompt.push_str("Motivations:\n");
    if character.objectives.is_empty() {
        prompt.push_str("- Do your job well and be treated fairly\n");
    } else {
        for objective in &character.objectives {
            let _ = writeln!(prompt, "- {objective}");
        }
    }

    if !character.triggers.is_empty() {
        let _ = writeln!(
            prompt,
            "What frustrates you: {}",
            character.triggers.join(", ")
        );
    }
    if !character.strengths.is_empty() {
        let _ = writeln!(
            prompt,
            "Your strengths: {}",
            character.strengths.join(", ")
        );
    }
    prompt.push('\n');
}

fn push_scenario(prompt: &mut String, scenario: &Scenario) {
    prompt.push_str("SCENARIO:\n");
    if let Some(details) = &scenario.details {
        if let Some(title) = &details.title {
            let _ = writeln!(prompt, "Title: {title}");
        }
        if let Some(background) = &details.background {
            let _ = writeln!(prompt, "Background: {background}");
        }
        if let Some(objective) = &details.objective {
            let _ = writeln!(prompt, "The other person's objective: {objective}");
        }
        if !details.challenges.is_empty() {
            prompt.push_str("Expected challenges:\n");
            for challenge in &details.challenges {
                let _ = writeln!(prompt, "- {challenge}");
            }
        }
    }
    let _ = writeln!(prompt, "Situation: {}", scenario.description);
    prompt.push('\n');
}
