use serde::{Deserialize, Serialize};

/// A dialogue row as handed over by the corpus producer, before sanitizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDialogue {
    pub character: String,
    pub title: String,
    /// Free-form year cell ("1999", "1999/I", ...).
    pub year: String,
    pub utterance: String,
}

/// A sanitized line of dialogue with its load-time identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub line_id: u64,
    pub character_raw: String,
    pub title: String,
    pub year: i32,
    pub utterance: String,
}
