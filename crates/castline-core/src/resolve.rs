use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use crate::models::{CandidateAssignment, ResolvedAssignment};

/// Collapse candidates to exactly one row per line id.
///
/// Every performer is weighted by how many candidate rows name them,
/// counted over the whole duplicate-laden set. Rows are stably sorted by
/// that count, then by performer name, both descending, and the first row
/// seen for each line wins. The returned order is that sorted order.
#[tracing::instrument(name = "resolve", skip_all, fields(candidates = candidates.len()))]
pub fn resolve(candidates: &[CandidateAssignment]) -> Vec<ResolvedAssignment> {
    let counts = performer_line_counts(candidates);

    let mut ranked: Vec<ResolvedAssignment> = candidates
        .iter()
        .map(|c| ResolvedAssignment {
            line_id: c.line_id,
            performer: c.performer.clone(),
            performer_line_count: counts[c.performer.as_str()],
            title: c.title.clone(),
            year: c.year,
            utterance: c.utterance.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| {
        (Reverse(a.performer_line_count), Reverse(&a.performer))
            .cmp(&(Reverse(b.performer_line_count), Reverse(&b.performer)))
    });

    let mut seen = HashSet::with_capacity(ranked.len());
    ranked.retain(|row| seen.insert(row.line_id));

    tracing::debug!(resolved = ranked.len(), "Conflicts resolved");
    ranked
}

/// Number of candidate rows naming each performer.
pub fn performer_line_counts(candidates: &[CandidateAssignment]) -> HashMap<&str, u64> {
    let mut counts = HashMap::new();
    for c in candidates {
        *counts.entry(c.performer.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Number of candidate rows whose line id appears more than once.
///
/// Zero when every line has a single candidate.
pub fn ambiguous_line_count(candidates: &[CandidateAssignment]) -> usize {
    let mut per_line: HashMap<u64, usize> = HashMap::new();
    for c in candidates {
        *per_line.entry(c.line_id).or_insert(0) += 1;
    }
    per_line.values().filter(|&&n| n > 1).sum()
}
