// Shared prompt constants.
// Each workflow that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Minimal prompt used by the connectivity probe.
pub const CONNECTIVITY_PROBE: &str =
    "Hello! Please respond with 'API connection successful' if you can see this message.";

/// Instruction appended to prompts whose output is machine-parsed.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Organisational setting shared by every roleplay and analysis prompt.
pub const ORGANISATION_CONTEXT: &str = "NSW local government";
