//! Source records and catalogs.
//!
//! A [`SourceRecord`] is one detection with an optional position in each of
//! the h, j and k bands. A band whose ra and dec both hold the sentinel
//! value is stored as `None`. A pair that mixes a sentinel with a real value,
//! or holds a non-finite coordinate, is rejected at construction.
//!
//! Records are immutable once built. Downstream code only filters and
//! recombines sequences of them: [`Catalog`] for loaded input,
//! [`MergedCatalog`] for union output where each record carries its
//! catalog of origin.

use std::ops::Index;

use serde::Serialize;
use thiserror::Error;

use crate::band::Band;
use crate::constants::{COORDINATE_COLUMNS, SENTINEL};
use crate::errors::{BandMergeError, BandMergeResult};

/// Why a raw (ra, dec) column pair is not a valid position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("mixes a sentinel with a measured value")]
    MixedSentinel,
    #[error("has a non-finite coordinate")]
    NonFinite,
}

/// A [`PositionError`] in one band of a record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("band {band} {kind}")]
pub struct BandColumnError {
    pub band: Band,
    pub kind: PositionError,
}

/// A right ascension / declination pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyPosition {
    pub ra: f64,
    pub dec: f64,
}

impl SkyPosition {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Interprets a raw column pair. Both sentinel means "not measured".
    pub fn from_columns(ra: f64, dec: f64) -> Result<Option<Self>, PositionError> {
        match (ra == SENTINEL, dec == SENTINEL) {
            (true, true) => Ok(None),
            (false, false) if ra.is_finite() && dec.is_finite() => Ok(Some(Self { ra, dec })),
            (false, false) => Err(PositionError::NonFinite),
            _ => Err(PositionError::MixedSentinel),
        }
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.ra, self.dec)
    }
}

impl From<(f64, f64)> for SkyPosition {
    fn from((ra, dec): (f64, f64)) -> Self {
        Self { ra, dec }
    }
}

/// Anything that has a position per band. Lets the matching engines work
/// on plain and provenance-tagged records alike.
pub trait Positioned {
    fn position(&self, band: Band) -> Option<SkyPosition>;
}

/// One celestial detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRecord {
    idx: usize,
    bands: [Option<SkyPosition>; 3],
}

impl SourceRecord {
    pub fn new(
        idx: usize,
        h: Option<SkyPosition>,
        j: Option<SkyPosition>,
        k: Option<SkyPosition>,
    ) -> Self {
        Self {
            idx,
            bands: [h, j, k],
        }
    }

    /// Builds a record from the six raw coordinate columns
    /// `ra_h dec_h ra_j dec_j ra_k dec_k`.
    ///
    /// The error names the first band whose pair is invalid.
    pub fn from_columns(
        idx: usize,
        columns: &[f64; COORDINATE_COLUMNS],
    ) -> Result<Self, BandColumnError> {
        let mut bands = [None; 3];
        for (slot, band) in bands.iter_mut().zip(Band::ALL) {
            let offset = band.column_offset();
            *slot = SkyPosition::from_columns(columns[offset], columns[offset + 1])
                .map_err(|kind| BandColumnError { band, kind })?;
        }
        Ok(Self { idx, bands })
    }

    /// Six raw coordinate columns, with unmeasured bands written as the sentinel.
    pub fn to_columns(&self) -> [f64; COORDINATE_COLUMNS] {
        let mut columns = [SENTINEL; COORDINATE_COLUMNS];
        for (position, band) in self.bands.iter().zip(Band::ALL) {
            if let Some(p) = position {
                columns[band.column_offset()] = p.ra;
                columns[band.column_offset() + 1] = p.dec;
            }
        }
        columns
    }

    /// Row position within the originating catalog file.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn is_measured(&self, band: Band) -> bool {
        self.position(band).is_some()
    }
}

impl Positioned for SourceRecord {
    fn position(&self, band: Band) -> Option<SkyPosition> {
        let slot = match band {
            Band::H => 0,
            Band::J => 1,
            Band::K => 2,
        };
        self.bands[slot]
    }
}

/// An ordered, index-addressable sequence of source records.
///
/// Order is load order and is significant: difference preserves it and
/// union resolves duplicates first-seen-wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    label: String,
    rows_read: usize,
    records: Vec<SourceRecord>,
}

impl Catalog {
    pub fn new(label: impl Into<String>, records: Vec<SourceRecord>) -> Self {
        let rows_read = records.len();
        Self {
            label: label.into(),
            rows_read,
            records,
        }
    }

    /// Builds a catalog from bare positions, all in one band, indexed 0..n.
    /// Handy for synthetic catalogs and tests.
    ///
    /// A sentinel pair gives a record unmeasured in `band`.
    ///
    /// # Errors
    /// Returns a configuration error for a mixed sentinel pair or a
    /// non-finite coordinate.
    pub fn from_positions(
        label: impl Into<String>,
        band: Band,
        positions: impl IntoIterator<Item = (f64, f64)>,
    ) -> BandMergeResult<Self> {
        let records = positions
            .into_iter()
            .enumerate()
            .map(|(idx, (ra, dec))| {
                let p = SkyPosition::from_columns(ra, dec).map_err(|kind| {
                    BandMergeError::configuration(
                        "positions",
                        &format!("row {} {}", idx, BandColumnError { band, kind }),
                    )
                })?;
                Ok(match band {
                    Band::H => SourceRecord::new(idx, p, None, None),
                    Band::J => SourceRecord::new(idx, None, p, None),
                    Band::K => SourceRecord::new(idx, None, None, p),
                })
            })
            .collect::<BandMergeResult<Vec<_>>>()?;
        Ok(Self::new(label, records))
    }

    /// Records how many data rows the source held before sentinel filtering.
    pub fn with_rows_read(mut self, rows_read: usize) -> Self {
        self.rows_read = rows_read;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&SourceRecord> {
        self.records.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceRecord> {
        self.records.iter()
    }

    /// Original row indices, in catalog order.
    pub fn indices(&self) -> Vec<usize> {
        self.records.iter().map(SourceRecord::idx).collect()
    }

    pub fn into_records(self) -> Vec<SourceRecord> {
        self.records
    }
}

impl Index<usize> for Catalog {
    type Output = SourceRecord;

    fn index(&self, i: usize) -> &Self::Output {
        &self.records[i]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SourceRecord;
    type IntoIter = std::slice::Iter<'a, SourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A source record together with the position of its input catalog
/// (`bm_idx`) in a union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedRecord {
    bm_idx: usize,
    record: SourceRecord,
}

impl TaggedRecord {
    pub fn new(bm_idx: usize, record: SourceRecord) -> Self {
        Self { bm_idx, record }
    }

    pub fn bm_idx(&self) -> usize {
        self.bm_idx
    }

    pub fn record(&self) -> &SourceRecord {
        &self.record
    }
}

impl Positioned for TaggedRecord {
    fn position(&self, band: Band) -> Option<SkyPosition> {
        self.record.position(band)
    }
}

/// Union output: records from several catalogs, each tagged with its origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedCatalog {
    records: Vec<TaggedRecord>,
}

impl MergedCatalog {
    pub fn new(records: Vec<TaggedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TaggedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedRecord> {
        self.records.iter()
    }

    /// Number of records that came from input catalog `bm_idx`.
    pub fn count_from(&self, bm_idx: usize) -> usize {
        self.records.iter().filter(|r| r.bm_idx == bm_idx).count()
    }

    pub fn into_records(self) -> Vec<TaggedRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a MergedCatalog {
    type Item = &'a TaggedRecord;
    type IntoIter = std::slice::Iter<'a, TaggedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
