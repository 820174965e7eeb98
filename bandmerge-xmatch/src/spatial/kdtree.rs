//! A 2D k-d tree over (ra, dec) positions.

use bandmerge_core::Radius;

use super::{planar_distance, NearestNeighbor, Neighbor};

/// A 2D k-d tree answering radius-bounded nearest-neighbour queries.
///
/// Built once per point set with median splits, then queried once per point
/// of the other catalog. Results are identical to a linear scan, including
/// the lowest-index tie-break.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into the points array
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    /// Split dimension (0 = ra, 1 = dec)
    split_dim: usize,
}

#[inline]
fn coord(point: (f64, f64), dim: usize) -> f64 {
    if dim == 0 {
        point.0
    } else {
        point.1
    }
}

impl KdTree {
    /// Build a tree over `points`. An empty slice gives an empty tree that
    /// never returns a neighbour.
    ///
    /// Points with a non-finite coordinate are left out of the tree. They can
    /// never lie within a finite radius, and a NaN split value would prune
    /// subtrees that hold real matches.
    pub fn build(points: &[(f64, f64)]) -> Self {
        let points_vec: Vec<(f64, f64)> = points.to_vec();
        let mut indices: Vec<usize> = (0..points.len())
            .filter(|&i| points[i].0.is_finite() && points[i].1.is_finite())
            .collect();
        let mut nodes = Vec::with_capacity(indices.len());

        Self::build_recursive(&points_vec, &mut indices, 0, &mut nodes);

        Self {
            nodes,
            points: points_vec,
        }
    }

    fn build_recursive(
        points: &[(f64, f64)],
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let split_dim = depth % 2;
        let median = indices.len() / 2;

        // Left of the median holds coordinates <= the split value, right holds >=.
        indices.select_nth_unstable_by(median, |&a, &b| {
            coord(points[a], split_dim).total_cmp(&coord(points[b], split_dim))
        });
        let point_idx = indices[median];

        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx,
            left: None,
            right: None,
            split_dim,
        });

        let (left_indices, right_part) = indices.split_at_mut(median);
        let right_indices = &mut right_part[1..];

        let left = Self::build_recursive(points, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, right_indices, depth + 1, nodes);

        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    fn nearest_recursive(
        &self,
        node_idx: usize,
        query: (f64, f64),
        radius: Radius,
        best: &mut Option<Neighbor>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];

        let candidate = Neighbor {
            index: node.point_idx,
            distance: planar_distance(query, point),
        };
        if radius.contains(candidate.distance) && best.map_or(true, |b| candidate.is_closer_than(&b))
        {
            *best = Some(candidate);
        }

        let diff = coord(query, node.split_dim) - coord(point, node.split_dim);
        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(first_idx) = first {
            self.nearest_recursive(first_idx, query, radius, best);
        }

        // Every point across the split is at least |diff| away. Equality still
        // descends so an equidistant lower index can win the tie.
        let bound = best.map_or(radius.degrees(), |b| b.distance);
        if let Some(second_idx) = second {
            if diff.abs() <= bound {
                self.nearest_recursive(second_idx, query, radius, best);
            }
        }
    }
}

impl NearestNeighbor for KdTree {
    fn nearest_within(&self, query: (f64, f64), radius: Radius) -> Option<Neighbor> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best = None;
        self.nearest_recursive(0, query, radius, &mut best);
        best
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
