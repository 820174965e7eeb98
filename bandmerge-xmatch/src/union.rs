//! Catalog union: greedy left-to-right merge with provenance tags.
//!
//! The first catalog seeds the accumulator. Every later catalog is matched
//! against the accumulator as it stands at that point. Its confirmed
//! duplicates are dropped and its remaining sources appended. Every record
//! carries `bm_idx`, the position of the catalog it came from.
//!
//! Deduplication only looks at what has already been accumulated, so the
//! result depends on catalog order. Two close sources in catalogs `k` and
//! `k + 2` both survive when nothing accumulated before them sits nearby
//! to absorb either. Each step needs the previous step's output, so the
//! catalogs are folded strictly in sequence.

use std::collections::HashSet;

use bandmerge_core::{
    Band, BandMergeError, BandMergeResult, Catalog, MergedCatalog, Radius, TaggedRecord,
};

use crate::matcher::{CrossMatcher, MatchConfig};
use crate::observer::UnionStep;
use crate::select::exclude_positions;

fn tag(catalog: &Catalog, bm_idx: usize) -> Vec<TaggedRecord> {
    catalog
        .iter()
        .map(|record| TaggedRecord::new(bm_idx, *record))
        .collect()
}

impl CrossMatcher {
    /// Merges `catalogs` in order, keeping first-seen sources.
    ///
    /// # Errors
    /// Returns a configuration error if `catalogs` is empty.
    pub fn union(&self, catalogs: &[Catalog]) -> BandMergeResult<MergedCatalog> {
        let (first, rest) = catalogs.split_first().ok_or_else(|| {
            BandMergeError::configuration("catalogs", "union needs at least one catalog")
        })?;

        let mut united = tag(first, 0);
        self.observer().on_union_step(&UnionStep {
            bm_idx: 0,
            label: first.label().to_string(),
            incoming: first.len(),
            dropped: 0,
            accumulated: united.len(),
        });

        for (offset, catalog) in rest.iter().enumerate() {
            let bm_idx = offset + 1;
            let incoming = tag(catalog, bm_idx);

            let duplicates: HashSet<usize> = self
                .match_records(&united, &incoming)
                .into_iter()
                .map(|(_, j)| j)
                .collect();

            let survivors = exclude_positions(&incoming, &duplicates);
            united.extend(survivors);

            self.observer().on_union_step(&UnionStep {
                bm_idx,
                label: catalog.label().to_string(),
                incoming: incoming.len(),
                dropped: duplicates.len(),
                accumulated: united.len(),
            });
        }

        Ok(MergedCatalog::new(united))
    }
}

/// Union on `band` with the default backend and no observer.
///
/// # Errors
/// Returns a configuration error if `radius` is not strictly positive or
/// `catalogs` is empty.
pub fn union(catalogs: &[Catalog], band: Band, radius: f64) -> BandMergeResult<MergedCatalog> {
    let config = MatchConfig {
        band,
        ..MatchConfig::new(Radius::new(radius)?)
    };
    CrossMatcher::from_config(config).union(catalogs)
}
