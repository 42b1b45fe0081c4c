//! Reading and preparing the two source catalogs.
//!
//! Both catalogs arrive as TSV tables from external producers. Columns are
//! looked up by name; a missing column is a [`CastlineError::SchemaMismatch`].

use std::path::Path;

use serde::Deserialize;

use crate::error::CastlineError;
use crate::merge::VariantKey;
use crate::models::{CastRecord, DialogueLine, RawCast, RawDialogue};
use crate::normalize::{extract_year, normalize, sanitize, NormalizeOptions};
use crate::table;

/// Required columns of the dialogue table.
pub const DIALOGUE_COLUMNS: &[&str] = &["character", "title", "year", "utterance"];

/// Required columns of the cast table.
pub const CAST_COLUMNS: &[&str] = &[
    "character_raw",
    "character_first",
    "character_last",
    "character_first_last",
    "character_full",
    "performer",
    "title",
    "year",
];

/// Read the dialogue table as-is. Sanitizing and id assignment happen in
/// [`prepare_dialogue`].
pub fn read_dialogue(path: &Path) -> Result<Vec<RawDialogue>, CastlineError> {
    let mut reader = table::open_reader(path)?;
    table::require_columns(&mut reader, path, DIALOGUE_COLUMNS)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawDialogue>() {
        rows.push(result.map_err(|e| table::row_error(path, e))?);
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "Dialogue table read");
    Ok(rows)
}

/// One row of the cast table, keyed by the column names in [`CAST_COLUMNS`].
#[derive(Debug, Deserialize)]
struct CastRow {
    character_raw: String,
    character_first: Option<String>,
    character_last: Option<String>,
    character_first_last: Option<String>,
    character_full: String,
    performer: String,
    title: String,
    year: i32,
}

impl From<CastRow> for CastRecord {
    fn from(row: CastRow) -> Self {
        Self {
            character_raw: row.character_raw,
            name_first: row.character_first,
            name_last: row.character_last,
            name_first_last: row.character_first_last,
            name_full: row.character_full,
            performer: row.performer,
            title: row.title,
            year: row.year,
        }
    }
}

/// Read the cast table. Variant columns are taken as the producer wrote
/// them; empty cells are absent variants.
pub fn read_cast(path: &Path) -> Result<Vec<CastRecord>, CastlineError> {
    let mut reader = table::open_reader(path)?;
    table::require_columns(&mut reader, path, CAST_COLUMNS)?;

    let mut records = Vec::new();
    for result in reader.deserialize::<CastRow>() {
        let row = result.map_err(|e| table::row_error(path, e))?;
        records.push(CastRecord::from(row));
    }
    tracing::info!(path = %path.display(), rows = records.len(), "Cast table read");
    Ok(records)
}

/// Sanitize dialogue rows and assign dense line ids in input order.
///
/// Character and title are fully sanitized; utterances only have their
/// whitespace collapsed. Rows whose year cell holds no four-digit year are
/// dropped before ids are assigned.
pub fn prepare_dialogue(rows: Vec<RawDialogue>) -> Vec<DialogueLine> {
    let mut lines = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let Some(year) = extract_year(&row.year) else {
            dropped += 1;
            continue;
        };
        lines.push(DialogueLine {
            line_id: lines.len() as u64,
            character_raw: sanitize(&row.character),
            title: sanitize(&row.title),
            year,
            utterance: normalize(&row.utterance, NormalizeOptions::WHITESPACE),
        });
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Dialogue rows without a year skipped");
    }
    lines
}

/// Sanitize raw credits and derive the name variants of each character.
///
/// Credits without a usable year are dropped.
pub fn prepare_cast(rows: Vec<RawCast>) -> Vec<CastRecord> {
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let Some(year) = extract_year(&row.year) else {
            dropped += 1;
            continue;
        };
        records.push(CastRecord::from_character(
            sanitize(&row.character),
            sanitize(&row.performer),
            sanitize(&row.title),
            year,
        ));
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Cast credits without a year skipped");
    }
    records
}

/// Write cast records in the cast table layout, so prepared credits can be
/// handed to [`read_cast`] later.
pub fn write_cast(records: &[CastRecord], path: &Path) -> Result<(), CastlineError> {
    let mut writer = table::writer(std::fs::File::create(path)?);
    writer.write_record(CAST_COLUMNS)?;
    for record in records {
        let variant = |key: VariantKey| key.field(record).unwrap_or_default();
        let year = record.year.to_string();
        writer.write_record([
            variant(VariantKey::Raw),
            variant(VariantKey::First),
            variant(VariantKey::Last),
            variant(VariantKey::FirstLast),
            variant(VariantKey::Full),
            record.performer.as_str(),
            record.title.as_str(),
            year.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
