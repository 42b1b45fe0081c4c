//! Persisted line -> performer dataset.
//!
//! The dataset is a TSV with a header row, written atomically so a reader
//! never sees a half-written file. Loading it is a full substitute for
//! rerunning the pipeline.

use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::CastlineError;
use crate::models::ResolvedAssignment;
use crate::table;

/// Persisted column names, in write order.
pub const COLUMNS: &[&str] = &[
    "line_id",
    "performer",
    "performer_line_count",
    "title",
    "year",
    "utterance",
];

/// Load a persisted dataset. Returns `Ok(None)` when `path` does not exist.
pub fn load(path: &Path) -> Result<Option<Vec<ResolvedAssignment>>, CastlineError> {
    if !path.is_file() {
        return Ok(None);
    }

    let mut reader = table::open_reader(path)?;
    table::require_columns(&mut reader, path, COLUMNS)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<ResolvedAssignment>() {
        rows.push(result.map_err(|e| table::row_error(path, e))?);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "Dataset loaded");
    Ok(Some(rows))
}

/// Write `rows` to `path`, replacing any existing file.
///
/// The table is written to a temporary file next to `path` and renamed
/// into place once complete. On Unix the file ends up with mode 0644, the
/// temporary file's owner-only mode is not kept.
pub fn save(rows: &[ResolvedAssignment], path: &Path) -> Result<(), CastlineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = table::writer(tmp.as_file_mut());
        // Explicit header so an empty dataset still carries its schema.
        writer.write_record(COLUMNS)?;
        for row in rows {
            writer.write_record(&[
                row.line_id.to_string(),
                row.performer.clone(),
                row.performer_line_count.to_string(),
                row.title.clone(),
                row.year.to_string(),
                row.utterance.clone(),
            ])?;
        }
        writer.flush()?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "Dataset saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line_id: u64, performer: &str, utterance: &str) -> ResolvedAssignment {
        ResolvedAssignment {
            line_id,
            performer: performer.into(),
            performer_line_count: 2,
            title: "TWELVE MONKEYS".into(),
            year: 1995,
            utterance: utterance.into(),
        }
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.tsv")).unwrap().is_none());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.tsv");
        let rows = vec![
            row(3, "BRUCE WILLIS", "All I see are dead people."),
            row(1, "BRAD PITT", "He said \"nobody\" knows."),
            row(2, "MADELEINE STOWE", ""),
        ];
        save(&rows, &path).unwrap();
        assert_eq!(load(&path).unwrap().unwrap(), rows);
    }

    #[test]
    fn test_numeric_text_stays_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.tsv");
        let rows = vec![row(0, "1234", "007"), row(1, "X", "1e5")];
        save(&rows, &path).unwrap();
        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded[0].performer, "1234");
        assert_eq!(loaded[0].utterance, "007");
        assert_eq!(loaded[1].utterance, "1e5");
    }

    #[test]
    fn test_empty_dataset_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        save(&[], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), COLUMNS.join("\t"));
        assert_eq!(load(&path).unwrap().unwrap(), vec![]);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/lines.tsv");
        save(&[row(0, "A", "hi")], &path).unwrap();
        assert!(path.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_dataset_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.tsv");
        save(&[row(0, "A", "hi")], &path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        std::fs::write(&path, "line_id\tperformer\ttitle\tyear\tutterance\n0\tA\tT\t2000\thi\n").unwrap();
        match load(&path) {
            Err(CastlineError::SchemaMismatch { column, .. }) => {
                assert_eq!(column, "performer_line_count");
            }
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        std::fs::write(
            &path,
            "line_id\tperformer\tperformer_line_count\ttitle\tyear\tutterance\nx\tA\t1\tT\t2000\thi\n",
        )
        .unwrap();
        assert!(matches!(load(&path), Err(CastlineError::Parse { .. })));
    }
}
