mod assignment;
mod cast;
mod dialogue;

pub use assignment::{CandidateAssignment, ResolvedAssignment};
pub use cast::{CastRecord, RawCast};
pub use dialogue::{DialogueLine, RawDialogue};
