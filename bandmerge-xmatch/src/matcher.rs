//! Mutual nearest-neighbour coordinate matching.
//!
//! For two point sets A and B and a radius, every point of A looks up its
//! nearest neighbour in B and every point of B its nearest in A, both bounded
//! by the radius. A pair `(i, j)` is a match only when `A[i]` and `B[j]`
//! picked each other. Being within the radius of each other is not enough.
//!
//! The lookups run when a [`MatchSet`] is computed. Pairs are confirmed
//! lazily by [`MatchIter`], which can be restarted any number of times from
//! the same set.

use std::fmt;

use bandmerge_core::{Band, BandMergeResult, Positioned, Radius, SkyPosition};
use rayon::prelude::*;

use crate::observer::{MatchObserver, MatchSummary, NoopObserver};
use crate::spatial::{NearestNeighbor, Neighbor, SearchStrategy};

/// Parameters shared by match, difference and union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub radius: Radius,
    pub band: Band,
    pub strategy: SearchStrategy,
    /// Run the per-point lookups of a single match on the rayon pool.
    pub parallel: bool,
}

impl MatchConfig {
    pub fn new(radius: Radius) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            radius: Radius::default(),
            band: Band::default(),
            strategy: SearchStrategy::default(),
            parallel: true,
        }
    }
}

/// Nearest-neighbour lookups in both directions between two point sets.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet {
    a_to_b: Vec<Option<Neighbor>>,
    b_to_a: Vec<Option<Neighbor>>,
}

impl MatchSet {
    pub fn compute(a: &[SkyPosition], b: &[SkyPosition], config: &MatchConfig) -> Self {
        let a_points: Vec<(f64, f64)> = a.iter().map(|p| p.as_tuple()).collect();
        let b_points: Vec<(f64, f64)> = b.iter().map(|p| p.as_tuple()).collect();

        let a_index = config.strategy.index(&a_points);
        let b_index = config.strategy.index(&b_points);

        let a_to_b = nearest_for_each(&a_points, b_index.as_ref(), config);
        let b_to_a = nearest_for_each(&b_points, a_index.as_ref(), config);

        Self { a_to_b, b_to_a }
    }

    /// Nearest B neighbour of `A[i]` within the radius.
    pub fn nearest_in_b(&self, i: usize) -> Option<Neighbor> {
        self.a_to_b.get(i).copied().flatten()
    }

    /// Nearest A neighbour of `B[j]` within the radius.
    pub fn nearest_in_a(&self, j: usize) -> Option<Neighbor> {
        self.b_to_a.get(j).copied().flatten()
    }

    /// Confirmed pairs, ordered by their index in B.
    pub fn iter(&self) -> MatchIter<'_> {
        MatchIter { set: self, next_b: 0 }
    }

    /// Number of confirmed pairs. Walks the whole set.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<(usize, usize)> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = (usize, usize);
    type IntoIter = MatchIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn nearest_for_each(
    queries: &[(f64, f64)],
    index: &dyn NearestNeighbor,
    config: &MatchConfig,
) -> Vec<Option<Neighbor>> {
    if config.parallel {
        queries
            .par_iter()
            .map(|&q| index.nearest_within(q, config.radius))
            .collect()
    } else {
        queries
            .iter()
            .map(|&q| index.nearest_within(q, config.radius))
            .collect()
    }
}

/// Yields `(index_in_a, index_in_b)` for each mutually confirmed pair.
#[derive(Debug, Clone)]
pub struct MatchIter<'a> {
    set: &'a MatchSet,
    next_b: usize,
}

impl Iterator for MatchIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_b < self.set.b_to_a.len() {
            let j = self.next_b;
            self.next_b += 1;

            let Some(from_b) = self.set.b_to_a[j] else {
                continue;
            };
            let confirmed = self
                .set
                .nearest_in_b(from_b.index)
                .is_some_and(|from_a| from_a.index == j);
            if confirmed {
                return Some((from_b.index, j));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.b_to_a.len() - self.next_b;
        (0, Some(remaining.min(self.set.a_to_b.len())))
    }
}

/// Match two raw position sets with the default backend.
///
/// Rejects a non-positive or non-finite radius before any search.
///
/// ```
/// use bandmerge_core::SkyPosition;
/// use bandmerge_xmatch::cross_match;
///
/// let a = [SkyPosition::new(0.0, 0.0)];
/// let b = [SkyPosition::new(0.0, 0.0), SkyPosition::new(0.0, 0.001)];
/// let pairs = cross_match(&a, &b, 0.0005).unwrap().to_vec();
/// assert_eq!(pairs, vec![(0, 0)]);
/// ```
pub fn cross_match(a: &[SkyPosition], b: &[SkyPosition], radius: f64) -> BandMergeResult<MatchSet> {
    let config = MatchConfig::new(Radius::new(radius)?);
    Ok(MatchSet::compute(a, b, &config))
}

/// Configured matching engine: radius, band, backend and an observer.
///
/// Difference and union are built on [`CrossMatcher::match_records`].
pub struct CrossMatcher {
    config: MatchConfig,
    observer: Box<dyn MatchObserver>,
}

impl fmt::Debug for CrossMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossMatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CrossMatcher {
    fn default() -> Self {
        Self::from_config(MatchConfig::default())
    }
}

impl CrossMatcher {
    /// # Errors
    /// Returns a configuration error if `radius` is not strictly positive.
    pub fn new(radius: f64) -> BandMergeResult<Self> {
        Ok(Self::from_config(MatchConfig::new(Radius::new(radius)?)))
    }

    pub fn from_config(config: MatchConfig) -> Self {
        Self {
            config,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.config.band = band;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn with_observer(mut self, observer: impl MatchObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub(crate) fn observer(&self) -> &dyn MatchObserver {
        self.observer.as_ref()
    }

    /// Match two position sets under this configuration.
    pub fn match_positions(&self, a: &[SkyPosition], b: &[SkyPosition]) -> MatchSet {
        let set = MatchSet::compute(a, b, &self.config);
        self.observer.on_match(&MatchSummary {
            band: self.config.band,
            radius: self.config.radius,
            left_len: a.len(),
            right_len: b.len(),
            pairs: set.count(),
        });
        set
    }

    /// Match two record sequences on the configured band.
    ///
    /// Records not measured in that band never match. Returned indices are
    /// positions in `a` and `b`, ordered by position in `b`.
    pub fn match_records<A, B>(&self, a: &[A], b: &[B]) -> Vec<(usize, usize)>
    where
        A: Positioned,
        B: Positioned,
    {
        let (a_slots, a_positions) = measured(a, self.config.band);
        let (b_slots, b_positions) = measured(b, self.config.band);

        self.match_positions(&a_positions, &b_positions)
            .iter()
            .map(|(i, j)| (a_slots[i], b_slots[j]))
            .collect()
    }
}

/// Positions measured in `band`, with the slot each came from.
fn measured<T: Positioned>(records: &[T], band: Band) -> (Vec<usize>, Vec<SkyPosition>) {
    records
        .iter()
        .enumerate()
        .filter_map(|(slot, r)| r.position(band).map(|p| (slot, p)))
        .unzip()
}
