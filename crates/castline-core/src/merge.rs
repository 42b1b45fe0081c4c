use std::collections::{HashMap, HashSet};

use crate::models::{CandidateAssignment, CastRecord, DialogueLine};

/// Cast fields used as join keys, in pass order.
///
/// Earlier keys are more precise. Once a line is matched by one pass, later
/// passes never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKey {
    Raw,
    First,
    Last,
    FirstLast,
    Full,
}

impl VariantKey {
    pub const ALL: &[VariantKey] = &[
        Self::Raw,
        Self::First,
        Self::Last,
        Self::FirstLast,
        Self::Full,
    ];

    /// Cast table column the key is read from.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Raw => "character_raw",
            Self::First => "character_first",
            Self::Last => "character_last",
            Self::FirstLast => "character_first_last",
            Self::Full => "character_full",
        }
    }

    /// The record's value for this key, if it has one.
    pub fn field<'a>(&self, record: &'a CastRecord) -> Option<&'a str> {
        match self {
            Self::Raw => Some(record.character_raw.as_str()),
            Self::First => record.name_first.as_deref(),
            Self::Last => record.name_last.as_deref(),
            Self::FirstLast => record.name_first_last.as_deref(),
            Self::Full => Some(record.name_full.as_str()),
        }
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_column())
    }
}

/// Line ids already matched by an earlier pass.
pub type ClaimedLines = HashSet<u64>;

/// Counters for one merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassStats {
    pub key: VariantKey,
    /// Unclaimed lines entering the pass.
    pub lines_considered: usize,
    /// Candidate rows produced, duplicates included.
    pub rows_matched: usize,
    /// Distinct lines the pass claimed.
    pub lines_claimed: usize,
}

/// Result of running every merge pass.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub candidates: Vec<CandidateAssignment>,
    pub passes: Vec<PassStats>,
}

impl MergeOutcome {
    /// Number of distinct lines with at least one candidate.
    pub fn lines_matched(&self) -> usize {
        self.passes.iter().map(|p| p.lines_claimed).sum()
    }
}

/// Join dialogue lines to cast records over every [`VariantKey`] in order.
///
/// Row order is pass order, then dialogue order, then cast order.
#[tracing::instrument(name = "merge", skip_all, fields(lines = dialogue.len(), cast = cast.len()))]
pub fn merge(dialogue: &[DialogueLine], cast: &[CastRecord]) -> MergeOutcome {
    let mut claimed = ClaimedLines::new();
    let mut outcome = MergeOutcome::default();

    for &key in VariantKey::ALL {
        let lines_considered = dialogue
            .iter()
            .filter(|line| !claimed.contains(&line.line_id))
            .count();
        let before = claimed.len();

        let rows = merge_pass(dialogue, cast, key, &mut claimed);

        let stats = PassStats {
            key,
            lines_considered,
            rows_matched: rows.len(),
            lines_claimed: claimed.len() - before,
        };
        tracing::debug!(
            key = %key,
            considered = stats.lines_considered,
            rows = stats.rows_matched,
            claimed = stats.lines_claimed,
            "Merge pass finished"
        );
        outcome.passes.push(stats);
        outcome.candidates.extend(rows);
    }

    outcome
}

/// Run a single pass: join the lines not yet in `claimed` against `cast` on
/// `(key field, title, year)`, then claim every matched line.
///
/// A line matching several records under the same key yields one row per
/// record. Claims are applied after the whole pass, so they only exclude
/// lines from later passes.
pub fn merge_pass(
    dialogue: &[DialogueLine],
    cast: &[CastRecord],
    key: VariantKey,
    claimed: &mut ClaimedLines,
) -> Vec<CandidateAssignment> {
    let index = build_index(cast, key);

    let mut rows = Vec::new();
    for line in dialogue.iter().filter(|l| !claimed.contains(&l.line_id)) {
        let lookup = (line.character_raw.as_str(), line.title.as_str(), line.year);
        let Some(records) = index.get(&lookup) else {
            continue;
        };
        for record in records {
            rows.push(CandidateAssignment {
                line_id: line.line_id,
                performer: record.performer.clone(),
                title: line.title.clone(),
                year: line.year,
                utterance: line.utterance.clone(),
            });
        }
    }

    claimed.extend(rows.iter().map(|r| r.line_id));
    rows
}

type JoinKey<'a> = (&'a str, &'a str, i32);

/// Index cast records by `(key field, title, year)`, keeping input order
/// within each bucket. Records without a value for `key` are left out.
fn build_index(cast: &[CastRecord], key: VariantKey) -> HashMap<JoinKey<'_>, Vec<&CastRecord>> {
    let mut index: HashMap<JoinKey<'_>, Vec<&CastRecord>> = HashMap::new();
    for record in cast {
        if let Some(name) = key.field(record) {
            index
                .entry((name, record.title.as_str(), record.year))
                .or_default()
                .push(record);
        }
    }
    index
}
