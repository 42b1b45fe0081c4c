//! Load-or-compute orchestration of the full pipeline.
//!
//! Flow: validate config → cached dataset (if present) or
//! read catalogs → merge → resolve → optional export.

use std::path::Path;

use crate::catalog;
use crate::config::PipelineConfig;
use crate::dataset;
use crate::error::CastlineError;
use crate::merge::{merge, PassStats};
use crate::models::{CastRecord, DialogueLine, ResolvedAssignment};
use crate::resolve::{ambiguous_line_count, resolve};

/// Where a [`Dataset`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Cache,
    Computed,
}

/// The final line -> performer table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<ResolvedAssignment>,
    pub source: DatasetSource,
    /// Present only when the dataset was computed in this run.
    pub stats: Option<RunStats>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(utterance, performer)` pair at `index`, the shape a classifier
    /// consumer samples.
    pub fn pair(&self, index: usize) -> Option<(&str, &str)> {
        self.rows
            .get(index)
            .map(|r| (r.utterance.as_str(), r.performer.as_str()))
    }
}

/// Counters collected while computing a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub dialogue_lines: usize,
    pub cast_records: usize,
    pub passes: Vec<PassStats>,
    /// Candidate rows sharing a line id with another row.
    pub ambiguous_rows: usize,
    pub resolved_lines: usize,
}

impl RunStats {
    /// Share of dialogue lines that were linked to a performer, in percent.
    pub fn coverage(&self) -> f64 {
        if self.dialogue_lines == 0 {
            return 0.0;
        }
        100.0 * self.resolved_lines as f64 / self.dialogue_lines as f64
    }
}

/// Merge and resolve already prepared tables.
pub fn run(dialogue: &[DialogueLine], cast: &[CastRecord]) -> (Vec<ResolvedAssignment>, RunStats) {
    let outcome = merge(dialogue, cast);

    let ambiguous_rows = ambiguous_line_count(&outcome.candidates);
    tracing::info!(ambiguous_rows, "Assigning lines with conflicting performers");

    let rows = resolve(&outcome.candidates);
    let stats = RunStats {
        dialogue_lines: dialogue.len(),
        cast_records: cast.len(),
        passes: outcome.passes,
        ambiguous_rows,
        resolved_lines: rows.len(),
    };
    tracing::info!(
        lines = stats.resolved_lines,
        coverage = format_args!("{:.2}%", stats.coverage()),
        "Lines after performer merge"
    );
    (rows, stats)
}

/// Produce the dataset described by `config`.
///
/// Nothing is read or written when the config is invalid. The export is
/// only written after the dataset has been fully built or loaded.
#[tracing::instrument(name = "build_dataset", skip_all)]
pub fn build_dataset(config: &PipelineConfig) -> Result<Dataset, CastlineError> {
    config.validate()?;

    let cached = match &config.dataset.cache {
        Some(path) => load_cache(path)?,
        None => None,
    };

    let dataset = match cached {
        Some(rows) => Dataset {
            rows,
            source: DatasetSource::Cache,
            stats: None,
        },
        None => compute(config)?,
    };

    if let Some(export) = &config.dataset.export {
        tracing::info!(path = %export.display(), rows = dataset.len(), "Exporting dataset");
        dataset::save(&dataset.rows, export)?;
    }

    Ok(dataset)
}

fn load_cache(path: &Path) -> Result<Option<Vec<ResolvedAssignment>>, CastlineError> {
    let rows = dataset::load(path)?;
    if let Some(rows) = &rows {
        tracing::info!(path = %path.display(), rows = rows.len(), "Loaded dataset from cache");
    }
    Ok(rows)
}

fn compute(config: &PipelineConfig) -> Result<Dataset, CastlineError> {
    tracing::info!("Creating performer lines dataset");

    let cast = catalog::read_cast(&config.sources.cast)?;
    let dialogue = catalog::prepare_dialogue(catalog::read_dialogue(&config.sources.dialogue)?);

    let (rows, stats) = run(&dialogue, &cast);
    Ok(Dataset {
        rows,
        source: DatasetSource::Computed,
        stats: Some(stats),
    })
}
