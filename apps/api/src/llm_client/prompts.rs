// Shared prompt fragments and prompt-building utilities.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Instruction appended to system prompts whose output is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Appends the JSON-only instruction to a feature's system prompt.
pub fn with_json_only(system: &str) -> String {
    format!("{system} {JSON_ONLY_INSTRUCTION}")
}
