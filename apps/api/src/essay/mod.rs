// Essay feedback: counselor prompt, heading-based sectioning, downloads.
// All LLM calls go through llm_client.

pub mod export;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod sections;
