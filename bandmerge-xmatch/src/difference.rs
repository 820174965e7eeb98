//! Catalog difference: drop every base source that a filter catalog confirms.
//!
//! Each filter is matched against the full base independently. The base-side
//! indices of all matches form one removal set, and the result is the base
//! with those rows removed. Order and every field of the surviving records
//! are kept as-is.

use std::collections::HashSet;

use bandmerge_core::{Band, BandMergeResult, Catalog, Radius};

use crate::matcher::{CrossMatcher, MatchConfig};
use crate::observer::{DifferenceSummary, FilterSummary};
use crate::select::exclude_positions;

impl CrossMatcher {
    /// Removes from `base` every source that mutually matches a source of
    /// any catalog in `filters`.
    ///
    /// With no filters the result equals `base`. A source matched by several
    /// filters is removed once.
    pub fn difference(&self, base: &Catalog, filters: &[Catalog]) -> Catalog {
        let mut to_remove: HashSet<usize> = HashSet::new();

        for (filter_index, filter) in filters.iter().enumerate() {
            let pairs = self.match_records(base.records(), filter.records());
            self.observer().on_filter(&FilterSummary {
                filter_index,
                label: filter.label().to_string(),
                matched: pairs.len(),
            });
            to_remove.extend(pairs.into_iter().map(|(i, _)| i));
        }

        let kept = exclude_positions(base.records(), &to_remove);
        self.observer().on_difference(&DifferenceSummary {
            base_len: base.len(),
            removed: to_remove.len(),
            kept: kept.len(),
        });

        Catalog::new(base.label(), kept).with_rows_read(base.rows_read())
    }
}

/// Difference on `band` with the default backend and no observer.
///
/// # Errors
/// Returns a configuration error if `radius` is not strictly positive.
pub fn difference(
    base: &Catalog,
    filters: &[Catalog],
    band: Band,
    radius: f64,
) -> BandMergeResult<Catalog> {
    let config = MatchConfig {
        band,
        ..MatchConfig::new(Radius::new(radius)?)
    };
    Ok(CrossMatcher::from_config(config).difference(base, filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandmerge_core::{Positioned, SkyPosition};

    const R: f64 = 2.778e-4;

    fn catalog(label: &str, points: &[(f64, f64)]) -> Catalog {
        Catalog::from_positions(label, Band::K, points.iter().copied()).unwrap()
    }

    #[test]
    fn test_removes_matched_source() {
        let base = catalog("ibm", &[(10.0, 20.0), (11.0, 21.0), (50.0, 50.0)]);
        let filter = catalog("flt0", &[(10.00005, 20.00004)]);

        let diff = difference(&base, &[filter], Band::K, R).unwrap();
        assert_eq!(diff.indices(), vec![1, 2]);
        assert_eq!(diff[0], base[1]);
        assert_eq!(diff[1], base[2]);
    }

    #[test]
    fn test_no_filters_is_identity() {
        let base = catalog("ibm", &[(10.0, 20.0), (11.0, 21.0)]).with_rows_read(5);
        let diff = difference(&base, &[], Band::K, R).unwrap();
        assert_eq!(diff, base);
    }

    #[test]
    fn test_empty_base() {
        let base = catalog("ibm", &[]);
        let filter = catalog("flt0", &[(1.0, 1.0)]);
        let diff = difference(&base, &[filter], Band::K, R).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn test_matched_by_two_filters_removed_once() {
        let base = catalog("ibm", &[(10.0, 20.0), (30.0, 40.0)]);
        let f0 = catalog("flt0", &[(10.0, 20.0001)]);
        let f1 = catalog("flt1", &[(10.0001, 20.0)]);

        let diff = difference(&base, &[f0, f1], Band::K, R).unwrap();
        assert_eq!(diff.indices(), vec![1]);
    }

    #[test]
    fn test_each_filter_matched_independently() {
        let base = catalog("ibm", &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let f0 = catalog("flt0", &[(3.0, 3.0001)]);
        let f1 = catalog("flt1", &[(1.0001, 1.0)]);

        let diff = difference(&base, &[f0, f1], Band::K, R).unwrap();
        assert_eq!(diff.indices(), vec![1]);
    }

    #[test]
    fn test_other_bands_carried_through() {
        let p = |ra, dec| Some(SkyPosition::new(ra, dec));
        let base = Catalog::new(
            "ibm",
            vec![
                bandmerge_core::SourceRecord::new(0, p(1.0, 2.0), None, p(10.0, 20.0)),
                bandmerge_core::SourceRecord::new(4, p(3.0, 4.0), p(5.0, 6.0), p(11.0, 21.0)),
            ],
        );
        let filter = catalog("flt0", &[(10.0, 20.0)]);

        let diff = difference(&base, &[filter], Band::K, R).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].idx(), 4);
        assert_eq!(diff[0].position(Band::J), Some(SkyPosition::new(5.0, 6.0)));
    }

    #[test]
    fn test_sentinel_rows_are_never_matched() {
        use bandmerge_core::constants::SENTINEL;

        let base = catalog("ibm", &[(SENTINEL, SENTINEL), (1.0, 1.0)]);
        let filter = catalog("flt0", &[(SENTINEL, SENTINEL)]);
        assert!(!base[0].is_measured(Band::K));

        let diff = difference(&base, &[filter], Band::K, R).unwrap();
        assert_eq!(diff.indices(), vec![0, 1]);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let base = catalog("ibm", &[(1.0, 1.0)]);
        assert!(difference(&base, &[], Band::K, 0.0).is_err());
    }
}
