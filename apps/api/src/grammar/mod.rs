// Grammar checking: Groq-backed span detection plus the offset-safe
// highlight overlay and correction helpers the essay editor uses.
// Debouncing keystrokes is the client's job; nothing here holds timer state.

pub mod handlers;
pub mod highlight;
pub mod models;
pub mod prompts;
