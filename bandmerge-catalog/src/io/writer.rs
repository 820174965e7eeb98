//! Result writers.
//!
//! The text layout matches band-merge tables: integer id columns first
//! (`bm_idx idx` for a union, `idx` for a difference), then the six
//! coordinate columns in scientific notation with 18 fractional digits.
//! Unmeasured bands are written back as the sentinel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bandmerge_core::{
    Band, BandMergeError, BandMergeResult, Catalog, MergedCatalog, Positioned, SkyPosition,
    SourceRecord,
};
use serde::Serialize;

/// Formats like C's `%1.18e`: mantissa with 18 digits, signed two-digit exponent.
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

fn write_coordinates<W: Write>(writer: &mut W, record: &SourceRecord) -> BandMergeResult<()> {
    for value in record.to_columns() {
        write!(writer, " {}", format_scientific(value))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes one line per record: `idx` then the coordinate columns.
pub fn write_catalog_text<W: Write>(writer: &mut W, catalog: &Catalog) -> BandMergeResult<()> {
    for record in catalog {
        write!(writer, "{}", record.idx())?;
        write_coordinates(writer, record)?;
    }
    Ok(())
}

/// Writes one line per record: `bm_idx idx` then the coordinate columns.
pub fn write_merged_text<W: Write>(writer: &mut W, merged: &MergedCatalog) -> BandMergeResult<()> {
    for tagged in merged {
        write!(writer, "{} {}", tagged.bm_idx(), tagged.record().idx())?;
        write_coordinates(writer, tagged.record())?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    bm_idx: Option<usize>,
    idx: usize,
    h: Option<SkyPosition>,
    j: Option<SkyPosition>,
    k: Option<SkyPosition>,
}

impl JsonRecord {
    fn new(bm_idx: Option<usize>, record: &SourceRecord) -> Self {
        Self {
            bm_idx,
            idx: record.idx(),
            h: record.position(Band::H),
            j: record.position(Band::J),
            k: record.position(Band::K),
        }
    }
}

fn write_json<W: Write>(writer: &mut W, records: &[JsonRecord]) -> BandMergeResult<()> {
    serde_json::to_writer_pretty(&mut *writer, records)
        .map_err(|e| BandMergeError::Serialization(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a JSON array of records; unmeasured bands are `null`.
pub fn write_catalog_json<W: Write>(writer: &mut W, catalog: &Catalog) -> BandMergeResult<()> {
    let records: Vec<JsonRecord> = catalog.iter().map(|r| JsonRecord::new(None, r)).collect();
    write_json(writer, &records)
}

/// Like [`write_catalog_json`], with a `bm_idx` field on every record.
pub fn write_merged_json<W: Write>(writer: &mut W, merged: &MergedCatalog) -> BandMergeResult<()> {
    let records: Vec<JsonRecord> = merged
        .iter()
        .map(|t| JsonRecord::new(Some(t.bm_idx()), t.record()))
        .collect();
    write_json(writer, &records)
}

/// Creates `path` and hands a buffered writer to `write`, flushing at the end.
pub fn write_to_path<F>(path: impl AsRef<Path>, write: F) -> BandMergeResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> BandMergeResult<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
