//! Nearest-neighbour backends for the coordinate matcher.
//!
//! Both backends answer the same question: which indexed point is closest
//! to a query, provided it lies within the radius? They must agree exactly,
//! so they share [`planar_distance`] and the tie-break in [`Neighbor::is_closer_than`].
//!
//! Distances are planar Euclidean on (ra, dec) in degrees. That is only a
//! fair stand-in for angular separation at arcsecond-scale radii.

mod kdtree;


use bandmerge_core::Radius;

pub use kdtree::KdTree;

/// Closest candidate found for a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the searched point set.
    pub index: usize,
    /// Planar distance to the query, in degrees.
    pub distance: f64,
}

impl Neighbor {
    /// Strict ordering on (distance, index): equidistant candidates resolve
    /// to the lower index.
    #[inline]
    pub fn is_closer_than(&self, other: &Neighbor) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.index < other.index)
    }
}

/// Planar Euclidean distance between two (ra, dec) pairs.
#[inline]
pub fn planar_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// A searchable point set.
pub trait NearestNeighbor: Sync {
    /// Closest point to `query` with distance `<= radius`, lowest index on ties.
    fn nearest_within(&self, query: (f64, f64), radius: Radius) -> Option<Neighbor>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Linear scan over every point. O(n) per query.
#[derive(Debug, Clone, Copy)]
pub struct BruteForce<'a> {
    points: &'a [(f64, f64)],
}

impl<'a> BruteForce<'a> {
    pub fn new(points: &'a [(f64, f64)]) -> Self {
        Self { points }
    }
}

impl NearestNeighbor for BruteForce<'_> {
    fn nearest_within(&self, query: (f64, f64), radius: Radius) -> Option<Neighbor> {
        let mut best: Option<Neighbor> = None;
        for (index, &point) in self.points.iter().enumerate() {
            let candidate = Neighbor {
                index,
                distance: planar_distance(query, point),
            };
            if !radius.contains(candidate.distance) {
                continue;
            }
            if best.map_or(true, |b| candidate.is_closer_than(&b)) {
                best = Some(candidate);
            }
        }
        best
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Which backend the matcher builds over each point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    BruteForce,
    #[default]
    KdTree,
}

impl SearchStrategy {
    /// Builds the chosen backend over `points`.
    pub fn index<'a>(self, points: &'a [(f64, f64)]) -> Box<dyn NearestNeighbor + 'a> {
        match self {
            SearchStrategy::BruteForce => Box::new(BruteForce::new(points)),
            SearchStrategy::KdTree => Box::new(KdTree::build(points)),
        }
    }
}
