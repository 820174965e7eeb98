//! Band-merge text loader.
//!
//! A band-merge file opens with a fixed block of epoch lines, followed by one
//! whitespace-separated row per detection. The first six columns are
//! `ra_h dec_h ra_j dec_j ra_k dec_k` in degrees. Extra columns are ignored,
//! blank lines and `#` comments are skipped.
//!
//! Every data row gets `idx`, its 0-based position among data rows. Rows not
//! measured in the selected band are then dropped, so surviving records keep
//! the index they had in the full file.

use std::fs;
use std::path::Path;

use bandmerge_core::constants::{COORDINATE_COLUMNS, DEFAULT_HEADER_LINES};
use bandmerge_core::{Band, BandMergeError, BandMergeResult, Catalog, SourceRecord};

/// How to read a band-merge file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rows not measured in this band are dropped.
    pub band: Band,
    /// Leading lines skipped before any data row.
    pub header_lines: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            band: Band::default(),
            header_lines: DEFAULT_HEADER_LINES,
        }
    }
}

impl LoadOptions {
    pub fn for_band(band: Band) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }
}

/// Read and parse a band-merge file. The catalog is labelled with the file name.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or a parse error for the
/// first malformed row.
pub fn read_catalog(path: impl AsRef<Path>, options: &LoadOptions) -> BandMergeResult<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_catalog(&label, &content, options)
}

/// Parse band-merge text already in memory.
pub fn parse_catalog(label: &str, content: &str, options: &LoadOptions) -> BandMergeResult<Catalog> {
    let mut records = Vec::new();
    let mut rows_read = 0;

    for (line_no, line) in content.lines().enumerate().skip(options.header_lines) {
        let data = strip_comment(line).trim();
        if data.is_empty() {
            continue;
        }

        let columns = parse_columns(label, line_no + 1, data)?;
        let record = SourceRecord::from_columns(rows_read, &columns)
            .map_err(|err| BandMergeError::parse(label, line_no + 1, &err.to_string()))?;
        rows_read += 1;

        if record.is_measured(options.band) {
            records.push(record);
        }
    }

    Ok(Catalog::new(label, records).with_rows_read(rows_read))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_columns(label: &str, line: usize, data: &str) -> BandMergeResult<[f64; COORDINATE_COLUMNS]> {
    let mut columns = [0.0; COORDINATE_COLUMNS];
    let mut fields = data.split_whitespace();

    for (i, slot) in columns.iter_mut().enumerate() {
        let field = fields.next().ok_or_else(|| {
            BandMergeError::parse(
                label,
                line,
                &format!("expected at least {} columns, got {}", COORDINATE_COLUMNS, i),
            )
        })?;
        *slot = parse_f64(label, line, field)?;
    }

    Ok(columns)
}

fn parse_f64(label: &str, line: usize, field: &str) -> BandMergeResult<f64> {
    let value: f64 = field
        .parse()
        .map_err(|_| BandMergeError::parse(label, line, &format!("invalid number '{}'", field)))?;
    if !value.is_finite() {
        return Err(BandMergeError::parse(
            label,
            line,
            &format!("non-finite coordinate '{}'", field),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandmerge_core::{Positioned, SkyPosition};

    const SAMPLE: &str = "\
epoch 1
epoch 2
epoch 3
10.0 20.0 10.1 20.1 10.2 20.2
-9999.0 -9999.0 11.1 21.1 -9999.0 -9999.0

# comment line
12.0 22.0 12.1 22.1 12.2 22.2 7 extra columns
";

    #[test]
    fn test_parse_drops_unmeasured_rows_keeps_indices() {
        let cat = parse_catalog("sample", SAMPLE, &LoadOptions::default()).unwrap();
        assert_eq!(cat.rows_read(), 3);
        assert_eq!(cat.indices(), vec![0, 2]);
        assert_eq!(cat[1].position(Band::K), Some(SkyPosition::new(12.2, 22.2)));
        assert_eq!(cat[1].position(Band::H), Some(SkyPosition::new(12.0, 22.0)));
    }

    #[test]
    fn test_band_selects_filter() {
        let cat = parse_catalog("sample", SAMPLE, &LoadOptions::for_band(Band::J)).unwrap();
        assert_eq!(cat.indices(), vec![0, 1, 2]);
        assert!(!cat[1].is_measured(Band::H));
    }

    #[test]
    fn test_header_lines_are_skipped_verbatim() {
        // A numeric first line would be a data row if not skipped.
        let content = "1 2 3 4 5 6\n\n\n7 8 9 10 11 12\n";
        let cat = parse_catalog("h", content, &LoadOptions::default()).unwrap();
        assert_eq!(cat.len(), 1);
        assert_eq!(cat[0].position(Band::K), Some(SkyPosition::new(11.0, 12.0)));

        let options = LoadOptions {
            header_lines: 0,
            ..LoadOptions::default()
        };
        assert_eq!(parse_catalog("h", content, &options).unwrap().len(), 2);
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let content = "a\nb\nc\n1.0 2.0 3.0 4.0\n";
        let err = parse_catalog("short.dat", content, &LoadOptions::default()).unwrap_err();
        match err {
            BandMergeError::Parse { line, message, .. } => {
                assert_eq!(line, 4);
                assert!(message.contains("got 4"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let content = "a\nb\nc\n1.0 2.0 3.0 4.0 x 6.0\n";
        let err = parse_catalog("bad.dat", content, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("invalid number 'x'"));
    }

    #[test]
    fn test_nan_is_parse_error() {
        let content = "a\nb\nc\n1.0 2.0 3.0 4.0 NaN 6.0\n";
        assert!(parse_catalog("nan.dat", content, &LoadOptions::default()).is_err());
    }

    #[test]
    fn test_mixed_sentinel_is_parse_error() {
        let content = "a\nb\nc\n1.0 2.0 3.0 4.0 5.0 -9999.0\n";
        let err = parse_catalog("mixed.dat", content, &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("band k"));
    }

    #[test]
    fn test_header_only_file_is_empty_catalog() {
        let cat = parse_catalog("empty", "a\nb\nc\n", &LoadOptions::default()).unwrap();
        assert!(cat.is_empty());
        assert_eq!(cat.rows_read(), 0);
    }
}
