//! Shape of the conversation history a caller replays on each request.
//!
//! Nothing here is stored. The composer only truncates (oldest first) and
//! re-renders turns with the right speaker labels.

use thiserror::Error;

use crate::roleplay::models::{ConversationTurn, SpeakerRole};

/// Number of most recent turns replayed into a prompt.
pub const MAX_HISTORY_TURNS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("turn {index} has empty content")]
    EmptyTurn { index: usize },

    #[error("turn {index} has ordinal {ordinal}, which is before the previous turn's {previous}")]
    OutOfOrder {
        index: usize,
        ordinal: u32,
        previous: u32,
    },
}

/// Checks the caller-supplied ordering. Ordinals may repeat (clients that
/// omit them send all zeros) but must never decrease.
pub fn validate_turns(turns: &[ConversationTurn]) -> Result<(), SessionError> {
    let mut previous: Option<u32> = None;
    for (index, turn) in turns.iter().enumerate() {
        if turn.content.trim().is_empty() {
            return Err(SessionError::EmptyTurn { index });
        }
        if let Some(prev) = previous {
            if turn.ordinal < prev {
                return Err(SessionError::OutOfOrder {
                    index,
                    ordinal: turn.ordinal,
                    previous: prev,
                });
            }
        }
        previous = Some(turn.ordinal);
    }
    Ok(())
}

/// The last [`MAX_HISTORY_TURNS`] turns, in their original order.
pub fn recent_turns(turns: &[ConversationTurn]) -> &[ConversationTurn] {
    let start = turns.len().saturating_sub(MAX_HISTORY_TURNS);
    &turns[start..]
}

/// Renders turns one per line: `USER: ...` or `{character_name}: ...`.
pub fn render_turns(turns: &[ConversationTurn], character_name: &str) -> String {
    let mut out = String::new();
    for turn in turns {
        let label = match turn.role {
            SpeakerRole::User => "USER",
            SpeakerRole::Character => character_name,
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(turn.content.trim());
        out.push('\n');
    }
    out
}
