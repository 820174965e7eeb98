//! Progress reporting hook.
//!
//! The engines never log on their own. They report to a [`MatchObserver`]
//! supplied by the caller, which does nothing unless overridden.
//! [`LogObserver`] forwards every event to the `log` facade.

use bandmerge_core::{Band, Radius};

/// Outcome of one cross-match between two point sets.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub band: Band,
    pub radius: Radius,
    pub left_len: usize,
    pub right_len: usize,
    pub pairs: usize,
}

/// Matches found against one filter catalog during a difference.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSummary {
    pub filter_index: usize,
    pub label: String,
    pub matched: usize,
}

/// Final tally of a difference.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceSummary {
    pub base_len: usize,
    pub removed: usize,
    pub kept: usize,
}

/// One catalog folded into the union accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionStep {
    pub bm_idx: usize,
    pub label: String,
    pub incoming: usize,
    pub dropped: usize,
    pub accumulated: usize,
}

pub trait MatchObserver: Send + Sync {
    fn on_match(&self, _summary: &MatchSummary) {}

    fn on_filter(&self, _summary: &FilterSummary) {}

    fn on_difference(&self, _summary: &DifferenceSummary) {}

    fn on_union_step(&self, _step: &UnionStep) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Reports events through `log`: per-match detail at debug, the rest at info.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl MatchObserver for LogObserver {
    fn on_match(&self, s: &MatchSummary) {
        log::debug!(
            "- Matching band {} with max distance {}: {} x {} positions",
            s.band,
            s.radius,
            s.left_len,
            s.right_len
        );
    }

    fn on_filter(&self, s: &FilterSummary) {
        log::info!(
            "{} sources matched against filter #{} ({})",
            s.matched,
            s.filter_index,
            s.label
        );
    }

    fn on_difference(&self, s: &DifferenceSummary) {
        log::info!("[FILTERING]");
        log::info!("{} unique sources to remove", s.removed);
        log::info!("{}/{} sources kept", s.kept, s.base_len);
    }

    fn on_union_step(&self, s: &UnionStep) {
        log::info!(
            "Catalog #{} ({}): {} sources, {} duplicates dropped, {} united",
            s.bm_idx,
            s.label,
            s.incoming,
            s.dropped,
            s.accumulated
        );
    }
}
