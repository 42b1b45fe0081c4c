use serde::{Deserialize, Serialize};

/// A tentative line -> performer link produced by one merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAssignment {
    pub line_id: u64,
    pub performer: String,
    pub title: String,
    pub year: i32,
    pub utterance: String,
}

/// The single performer assigned to a line after conflict resolution.
///
/// Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssignment {
    pub line_id: u64,
    pub performer: String,
    pub performer_line_count: u64,
    pub title: String,
    pub year: i32,
    pub utterance: String,
}
