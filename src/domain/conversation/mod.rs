//! Conversation domain module.
//!
//! The append-only turn log of an interview, the prompt templates, and the
//! assembly of stored turns into the dialogue sent to the model.

mod context;
mod prompts;
mod turn;

pub use context::{attach_code, ContextAssembler, DEFAULT_CODE_LANGUAGE};
pub use prompts::{
    evaluation_prompt, greeting_prompt, interviewer_instruction, review_prompt,
    FALLBACK_GREETING, PRIMING_ACKNOWLEDGEMENT,
};
pub use turn::{sort_chronologically, Turn, TurnRole};
