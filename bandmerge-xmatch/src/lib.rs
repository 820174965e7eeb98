//! Mutual nearest-neighbour cross-matching of band-merge catalogs.
//!
//! Two sources from different catalogs are the same object when each is the
//! other's nearest neighbour within a radius. Two set operations are built
//! on that one rule:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matcher`] | [`MatchSet`] / [`cross_match`], [`CrossMatcher`] and [`MatchConfig`] |
//! | [`difference`] | Remove base sources confirmed by any filter catalog |
//! | [`union`] | Greedy merge of several catalogs with provenance tags |
//! | [`spatial`] | Brute-force and k-d tree nearest-neighbour backends |
//! | [`observer`] | Injectable progress hook, no-op by default |
//!
//! # Quick Start
//!
//! ```
//! use bandmerge_core::{Band, Catalog};
//! use bandmerge_xmatch::CrossMatcher;
//!
//! let base = Catalog::from_positions("ibm", Band::K, [(10.0, 20.0), (11.0, 21.0)])?;
//! let filter = Catalog::from_positions("flt", Band::K, [(10.00005, 20.00004)])?;
//!
//! let matcher = CrossMatcher::new(2.778e-4)?.with_band(Band::K);
//! let diff = matcher.difference(&base, &[filter]);
//! assert_eq!(diff.indices(), vec![1]);
//! # Ok::<(), bandmerge_core::BandMergeError>(())
//! ```
//!
//! Distances are planar on (ra, dec) in degrees, which is only meaningful
//! for small radii. Equidistant candidates resolve to the lower index, and a
//! separation equal to the radius counts as a match.

pub mod difference;
pub mod matcher;
pub mod observer;
pub mod select;
pub mod spatial;
pub mod union;

pub use difference::difference;
pub use matcher::{cross_match, CrossMatcher, MatchConfig, MatchIter, MatchSet};
pub use observer::{LogObserver, MatchObserver, NoopObserver};
pub use spatial::SearchStrategy;
pub use union::union;
