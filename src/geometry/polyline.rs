//! Closed polylines and their intrinsic length/angle decomposition.

use nalgebra::{Point3, Vector3};

use crate::error::{FlowError, Result};
use crate::geometry::vector;

/// An immutable closed polyline.
///
/// The point list is stored with the first vertex duplicated at the end, so
/// a polyline with `n` distinct vertices stores `n + 1` points. Construction
/// accepts either open or pre-closed input and normalizes to the stored form.
/// Vertex indices used throughout the API range over the `n` distinct
/// vertices and wrap around the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPolyline {
    points: Vec<Point3<f64>>,
}

impl ClosedPolyline {
    /// Builds a closed polyline from an ordered point list.
    ///
    /// If the first and last input points coincide the input is treated as
    /// pre-closed; otherwise the closing duplicate is appended. Fails with
    /// [`FlowError::TooFewVertices`] when fewer than three distinct vertices
    /// remain.
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        let mut points = points;
        match points.first() {
            None => return Err(FlowError::TooFewVertices { count: 0 }),
            Some(first) => {
                let first = *first;
                let closed = points
                    .last()
                    .map(|last| (last - first).norm() < vector::DEGENERATE_LENGTH)
                    .unwrap_or(false);
                if !closed {
                    points.push(first);
                }
            }
        }
        if points.len() < 4 {
            return Err(FlowError::TooFewVertices {
                count: points.len() - 1,
            });
        }
        Ok(ClosedPolyline { points })
    }

    /// Number of distinct vertices (the closing duplicate is not counted).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len() - 1
    }

    /// The stored point list, including the closing duplicate.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// The distinct vertices, without the closing duplicate.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.points[..self.points.len() - 1]
    }

    /// The vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= vertex_count()`.
    #[inline]
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        debug_assert!(index < self.vertex_count());
        self.points[index]
    }

    /// The ring index at signed `offset` from `index`, wrapping around.
    #[inline]
    pub fn offset_index(&self, index: usize, offset: isize) -> usize {
        let count = self.vertex_count() as isize;
        (((index as isize + offset) % count + count) % count) as usize
    }

    /// The previous and next vertex indices around the ring.
    #[inline]
    pub fn neighbors(&self, index: usize) -> (usize, usize) {
        (self.offset_index(index, -1), self.offset_index(index, 1))
    }

    /// The outgoing edge vector at `index`, pointing to the next vertex.
    #[inline]
    pub fn edge(&self, index: usize) -> Vector3<f64> {
        self.points[index + 1] - self.points[index]
    }

    /// Length of the outgoing edge at `index`.
    #[inline]
    pub fn edge_length(&self, index: usize) -> f64 {
        self.edge(index).norm()
    }

    /// Total length of the ring.
    pub fn perimeter(&self) -> f64 {
        (0..self.vertex_count()).map(|i| self.edge_length(i)).sum()
    }

    /// Mean of the distinct vertices.
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices()
            .iter()
            .fold(Vector3::zeros(), |sum, point| sum + point.coords);
        Point3::from(sum / self.vertex_count() as f64)
    }

    /// Measures the polyline into edge lengths and turn angles.
    ///
    /// Entry `i` of the returned pair holds the length of the outgoing edge
    /// at vertex `i` and the unsigned turn angle at vertex `i` (between the
    /// incoming and outgoing edges). Fails on zero-length edges.
    pub fn decompose(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        let count = self.vertex_count();
        let mut lengths = Vec::with_capacity(count);
        let mut angles = Vec::with_capacity(count);
        for index in 0..count {
            let incoming = self.edge(self.offset_index(index, -1));
            let outgoing = self.edge(index);
            angles.push(vector::angle_between(&incoming, &outgoing)?);
            lengths.push(outgoing.norm());
        }
        Ok((lengths, angles))
    }

    /// Integrates a polyline back from intrinsic length/angle data.
    ///
    /// The first edge is `first_edge` rescaled to `lengths[0]`; each further
    /// edge is the previous one rotated counterclockwise about the z axis by
    /// the turn angle at its base vertex and rescaled to its length. The
    /// last vertex is placed where the final two edges meet at their
    /// measured lengths, so every edge length is honored exactly and the
    /// turn angles at the two closure vertices absorb whatever gap the
    /// replayed angles leave open. Of the two closure candidates the one
    /// nearer the pure angle replay is kept; for angle data measured by
    /// [`decompose`](Self::decompose) on a convex counterclockwise ring that
    /// is the measured ring itself and the round trip is exact.
    ///
    /// Planar (xy) data only. `angles[0]` describes the closure at `start`
    /// and is not replayed. Fails when the final two lengths cannot reach
    /// back to `start` from the replayed chain.
    pub fn from_lengths_and_angles(
        start: Point3<f64>,
        first_edge: &Vector3<f64>,
        lengths: &[f64],
        angles: &[f64],
    ) -> Result<Self> {
        if angles.len() != lengths.len() {
            return Err(FlowError::invalid_param(
                "angles",
                angles.len(),
                "must match the number of edge lengths",
            ));
        }
        let count = lengths.len();
        if count < 3 {
            return Err(FlowError::TooFewVertices { count });
        }

        let mut edge = vector::resize(first_edge, lengths[0], "orienting the first replayed edge")?;
        let mut vertices = Vec::with_capacity(count);
        vertices.push(start);
        let mut cursor = start + edge;
        vertices.push(cursor);
        for index in 1..count - 2 {
            edge = vector::resize(
                &vector::rotate_about_z(&edge, angles[index]),
                lengths[index],
                "replaying an edge from intrinsic data",
            )?;
            cursor += edge;
            vertices.push(cursor);
        }

        let predicted = cursor
            + vector::resize(
                &vector::rotate_about_z(&edge, angles[count - 2]),
                lengths[count - 2],
                "replaying an edge from intrinsic data",
            )?;
        vertices.push(close_ring(
            cursor,
            start,
            lengths[count - 2],
            lengths[count - 1],
            predicted,
        )?);
        ClosedPolyline::new(vertices)
    }
}

/// Slack allowed on the closure discriminant before the ring is rejected.
const CLOSURE_TOLERANCE: f64 = 1e-9;

/// Places the last ring vertex so the final two edges close exactly.
///
/// The vertex lies on the circle of radius `reach` around `chain_end` and
/// on the circle of radius `closing` around `start`, both in the xy plane;
/// of the two intersections the one nearer `predicted` is returned.
fn close_ring(
    chain_end: Point3<f64>,
    start: Point3<f64>,
    reach: f64,
    closing: f64,
    predicted: Point3<f64>,
) -> Result<Point3<f64>> {
    let gap = start - chain_end;
    let distance = (gap.x * gap.x + gap.y * gap.y).sqrt();
    if distance < vector::DEGENERATE_LENGTH {
        return Err(FlowError::degenerate(
            "closing a replayed ring onto its start",
        ));
    }

    let along = (reach * reach - closing * closing + distance * distance) / (2.0 * distance);
    let offset_squared = reach * reach - along * along;
    if offset_squared < -CLOSURE_TOLERANCE {
        return Err(FlowError::invalid_param(
            "lengths",
            distance,
            "the final two edges cannot close the ring",
        ));
    }
    let offset = offset_squared.max(0.0).sqrt();

    let unit_x = gap.x / distance;
    let unit_y = gap.y / distance;
    let base = Point3::new(
        chain_end.x + along * unit_x,
        chain_end.y + along * unit_y,
        start.z,
    );
    let side = Vector3::new(-unit_y * offset, unit_x * offset, 0.0);

    let first = base + side;
    let second = base - side;
    if (first - predicted).norm_squared() <= (second - predicted).norm_squared() {
        Ok(first)
    } else {
        Ok(second)
    }
}
