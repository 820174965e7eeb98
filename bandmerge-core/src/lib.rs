//! Shared data model for band-merge catalog cross-matching.
//!
//! A band-merge catalog is an ordered list of detections, each with an
//! (ra, dec) pair in up to three photometric bands (h, j, k). This crate
//! holds the types every other crate agrees on:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`record`] | [`SourceRecord`], [`Catalog`], [`TaggedRecord`], [`MergedCatalog`] |
//! | [`band`] | [`Band`] selector |
//! | [`radius`] | [`Radius`], a validated match radius in degrees |
//! | [`constants`] | Sentinel value, default radius, file layout constants |
//! | [`errors`] | [`BandMergeError`] and [`BandMergeResult`] |

pub mod band;
pub mod constants;
pub mod errors;
pub mod radius;
pub mod record;

pub use band::Band;
pub use errors::{BandMergeError, BandMergeResult};
pub use radius::Radius;
pub use record::{
    BandColumnError, Catalog, MergedCatalog, PositionError, Positioned, SkyPosition, SourceRecord,
    TaggedRecord,
};
