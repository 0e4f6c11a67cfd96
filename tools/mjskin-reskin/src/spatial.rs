//! Nearest-vertex lookup
//!
//! A k-d tree over a fixed point set. Queries return the index of the
//! closest point by squared Euclidean distance; among points at exactly the
//! same distance the lowest index wins, matching [`nearest_brute_force`].

use std::fmt;

use glam::Vec3;
use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use rayon::prelude::*;

use crate::error::ReskinError;

/// Best candidate seen so far during a query
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    distance: f32,
}

impl Candidate {
    const NONE: Self = Self {
        index: usize::MAX,
        distance: f32::INFINITY,
    };

    /// Keep `index` if it is closer, or equally close with a lower index.
    /// NaN distances rank as infinitely far.
    fn offer(&mut self, index: usize, distance: f32) {
        let distance = if distance.is_nan() {
            f32::INFINITY
        } else {
            distance
        };
        if distance < self.distance || (distance == self.distance && index < self.index) {
            self.index = index;
            self.distance = distance;
        }
    }
}

fn scan(points: &[Vec3], query: Vec3) -> Candidate {
    let query = query.to_array();
    let mut best = Candidate::NONE;
    for (index, point) in points.iter().enumerate() {
        best.offer(index, squared_euclidean(&point.to_array(), &query));
    }
    best
}

/// Index of the point nearest to `query` by linear scan.
///
/// Reference implementation for [`SpatialIndex`]; the tie-break on equal
/// squared distance is explicit rather than left to iterator order.
pub fn nearest_brute_force(points: &[Vec3], query: Vec3) -> Result<usize, ReskinError> {
    if points.is_empty() {
        return Err(ReskinError::EmptySourceSet);
    }
    Ok(scan(points, query).index)
}

/// Immutable nearest-neighbor index over a point set
pub struct SpatialIndex {
    points: Vec<Vec3>,
    /// Finite points only, keyed by their index in `points`
    tree: KdTree<f32, usize, [f32; 3]>,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("points", &self.points.len())
            .field("indexed", &self.tree.size())
            .finish()
    }
}

impl SpatialIndex {
    /// Build over `points`. Duplicate coordinates are kept as distinct points.
    pub fn build(points: &[Vec3]) -> Result<Self, ReskinError> {
        if points.is_empty() {
            return Err(ReskinError::EmptySourceSet);
        }

        let mut tree = KdTree::new(3);
        let mut skipped = 0;
        for (index, point) in points.iter().enumerate() {
            // The tree rejects NaN and infinite coordinates
            if tree.add(point.to_array(), index).is_err() {
                skipped += 1;
            }
        }

        tracing::debug!(
            "Built spatial index: {} points, {} non-finite",
            points.len(),
            skipped
        );
        Ok(Self {
            points: points.to_vec(),
            tree,
        })
    }

    /// Index of the point nearest to `query`
    pub fn nearest(&self, query: Vec3) -> usize {
        self.nearest_with_distance(query).0
    }

    /// Index of the nearest point and its squared distance
    pub fn nearest_with_distance(&self, query: Vec3) -> (usize, f32) {
        let q = query.to_array();
        let closest = match self.tree.nearest(&q, 1, &squared_euclidean) {
            Ok(found) => found.first().map(|&(distance, _)| distance),
            Err(_) => None,
        };

        // Non-finite queries and distances fall back to a full scan
        let Some(distance) = closest.filter(|d| d.is_finite()) else {
            let best = scan(&self.points, query);
            return (best.index, best.distance);
        };

        // The tree returns one of the equally close points; collect them all
        let mut best = Candidate::NONE;
        if let Ok(ties) = self.tree.within(&q, distance, &squared_euclidean) {
            for (d, &index) in ties {
                best.offer(index, d);
            }
        }
        (best.index, best.distance)
    }

    /// Nearest point for every query, in query order.
    ///
    /// Queries run in parallel; each is independent and read-only.
    pub fn nearest_all(&self, queries: &[Vec3]) -> Vec<(usize, f32)> {
        queries
            .par_iter()
            .map(|&q| self.nearest_with_distance(q))
            .collect()
    }
}
