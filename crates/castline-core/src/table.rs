//! Shared helpers for tab-separated tables with a header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CastlineError;

/// Open a TSV file for reading. Any failure to open is reported as
/// [`CastlineError::SourceUnavailable`].
pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<File>, CastlineError> {
    let file = File::open(path).map_err(|source| CastlineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(file))
}

/// TSV writer with the same dialect [`open_reader`] reads.
pub(crate) fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(inner)
}

/// Fail with [`CastlineError::SchemaMismatch`] naming the first column in
/// `required` that the header row lacks. Column order is not checked.
pub(crate) fn require_columns<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
    required: &[&str],
) -> Result<(), CastlineError> {
    let headers = reader.headers()?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(CastlineError::SchemaMismatch {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Map a row-level deserialization failure to [`CastlineError::Parse`].
pub(crate) fn row_error(path: &Path, err: csv::Error) -> CastlineError {
    let row = err.position().map(|p| p.line()).unwrap_or(0);
    if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) {
        CastlineError::Parse {
            path: path.to_path_buf(),
            row,
            message: err.to_string(),
        }
    } else {
        CastlineError::Csv(err)
    }
}
