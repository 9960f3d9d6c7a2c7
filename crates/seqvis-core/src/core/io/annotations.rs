use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const REQUIRED_COLUMNS: usize = 5;

/// One row of an annotation table: a closed, 0-based interval of residues within a
/// chain carrying a raw value for a named track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub chain_id: String,
    pub track_name: String,
    pub start: usize,
    pub end: usize,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Line {line}: expected at least 5 tab-separated columns, found {found}")]
    MissingColumns { line: u64, found: usize },
    #[error("Line {line}: column '{column}' must be a non-negative integer, got '{value}'")]
    InvalidCoordinate {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("Line {line}: interval end {end} is before start {start}")]
    InvertedInterval { line: u64, start: usize, end: usize },
}

/// Reads a tab-separated annotation table with a header row.
///
/// Columns are taken by position: chain id, track name, start, end, value. Columns
/// beyond the fifth are ignored and surrounding whitespace is trimmed.
pub fn read_annotations_from<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<AnnotationRecord>, AnnotationError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| AnnotationError::Csv {
            path: source_name.to_string(),
            source: e,
        })?;
        records.push(parse_row(&row)?);
    }
    Ok(records)
}

pub fn read_annotations(path: &Path) -> Result<Vec<AnnotationRecord>, AnnotationError> {
    let file = std::fs::File::open(path).map_err(|e| AnnotationError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_annotations_from(file, &path.to_string_lossy())
}

fn parse_row(row: &StringRecord) -> Result<AnnotationRecord, AnnotationError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    if row.len() < REQUIRED_COLUMNS {
        return Err(AnnotationError::MissingColumns {
            line,
            found: row.len(),
        });
    }

    let coordinate = |index: usize, column: &'static str| -> Result<usize, AnnotationError> {
        let raw = &row[index];
        raw.parse::<usize>()
            .map_err(|_| AnnotationError::InvalidCoordinate {
                line,
                column,
                value: raw.to_string(),
            })
    };
    let start = coordinate(2, "start")?;
    let end = coordinate(3, "end")?;
    if end < start {
        return Err(AnnotationError::InvertedInterval { line, start, end });
    }

    Ok(AnnotationRecord {
        chain_id: row[0].to_string(),
        track_name: row[1].to_string(),
        start,
        end,
        value: row[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_rows_by_position_after_header() {
        let table = "chain_id\ttrack_name\tstart\tend\tvalue\n\
                     A\tDisorder\t0\t9\t0.85\n\
                     B\tDomains\t5\t5\tKinase\n";
        let records = read_annotations_from(table.as_bytes(), "inline").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            AnnotationRecord {
                chain_id: "A".into(),
                track_name: "Disorder".into(),
                start: 0,
                end: 9,
                value: "0.85".into(),
            }
        );
        assert_eq!(records[1].track_name, "Domains");
        assert_eq!(records[1].start, records[1].end);
    }

    #[test]
    fn trims_whitespace_and_ignores_extra_columns() {
        let table = "c\tt\ts\te\tv\textra\n A \t IDR \t 1 \t 2 \t high \tnote\n";
        let records = read_annotations_from(table.as_bytes(), "inline").unwrap();
        assert_eq!(records[0].chain_id, "A");
        assert_eq!(records[0].track_name, "IDR");
        assert_eq!(records[0].value, "high");
    }

    #[test]
    fn header_only_table_yields_no_records() {
        let records = read_annotations_from("c\tt\ts\te\tv\n".as_bytes(), "inline").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let table = "c\tt\ts\te\tv\nA\tIDR\t1\t2\n";
        let result = read_annotations_from(table.as_bytes(), "inline");
        assert!(matches!(
            result,
            Err(AnnotationError::MissingColumns { line: 2, found: 4 })
        ));
    }

    #[test]
    fn non_integer_or_negative_coordinates_are_rejected() {
        let table = "c\tt\ts\te\tv\nA\tIDR\tone\t2\t0.5\n";
        let result = read_annotations_from(table.as_bytes(), "inline");
        assert!(matches!(
            result,
            Err(AnnotationError::InvalidCoordinate { column: "start", .. })
        ));

        let table = "c\tt\ts\te\tv\nA\tIDR\t1\t-2\t0.5\n";
        let result = read_annotations_from(table.as_bytes(), "inline");
        assert!(matches!(
            result,
            Err(AnnotationError::InvalidCoordinate { column: "end", .. })
        ));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let table = "c\tt\ts\te\tv\nA\tIDR\t5\t2\t0.5\n";
        let result = read_annotations_from(table.as_bytes(), "inline");
        assert!(matches!(
            result,
            Err(AnnotationError::InvertedInterval { start: 5, end: 2, .. })
        ));
    }

    #[test]
    fn read_annotations_loads_file_and_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tracks.tsv");
        fs::write(&path, "c\tt\ts\te\tv\nA\tIDR\t0\t3\t1.0\n").unwrap();
        assert_eq!(read_annotations(&path).unwrap().len(), 1);

        let missing = dir.path().join("missing.tsv");
        assert!(matches!(
            read_annotations(&missing),
            Err(AnnotationError::Io { .. })
        ));
    }
}
