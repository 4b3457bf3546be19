// LLM prompt constants for grammar checks.

/// System prompt for the grammar checker. `with_json_only` is appended at call time.
pub const GRAMMAR_CHECK_SYSTEM: &str = "You are a grammar and spelling assistant. \
    Identify grammar and spelling errors in the provided text. \
    Return a JSON object with the following format: \
    {\"errors\": [{\"word\": \"incorrectWord\", \"startIndex\": 0, \"endIndex\": 10, \
    \"suggestion\": \"correctedWord\", \"reason\": \"brief explanation\"}]}. \
    startIndex and endIndex are character offsets into the text, endIndex exclusive. \
    Return {\"errors\": []} when the text has no errors.";

pub const GRAMMAR_CHECK_TEMPERATURE: f32 = 0.2;

pub fn grammar_user_prompt(text: &str) -> String {
    format!("Check this text for grammar and spelling errors: \"{text}\"")
}
