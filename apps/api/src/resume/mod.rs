// Résumé builder: form composition, reviewer feedback, Word export.

pub mod export;
pub mod form;
pub mod handlers;
pub mod prompts;
pub mod sections;
