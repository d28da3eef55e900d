// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: ring triangulation
//!
//! Ear clipping over an ordered vertex ring. The algorithm is defined for
//! simple (non-self-intersecting) polygons only; self-intersecting input may
//! produce degenerate or overlapping triangles.

use crate::types::Vec2;
use smallvec::SmallVec;

/// Triangulate a closed vertex ring into a flat triangle list.
///
/// Returns three consecutive points per triangle, covering the ring's
/// interior. A simple ring of `n >= 3` vertices yields exactly `n - 2`
/// triangles. Rings with fewer than three vertices yield nothing. Both
/// clockwise and counter-clockwise input windings are accepted.
pub fn triangulate_ring(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    if n < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((n - 2) * 3);
    if n == 3 {
        out.extend_from_slice(ring);
        return out;
    }

    // Work on an index ring, normalized to counter-clockwise order.
    let mut idx: SmallVec<[usize; 32]> = if signed_area(ring) < 0.0 {
        (0..n).rev().collect()
    } else {
        (0..n).collect()
    };

    let mut guard = n * n;
    while idx.len() > 3 && guard > 0 {
        guard -= 1;
        let m = idx.len();
        let mut clipped = false;

        for i in 0..m {
            let prev = idx[(i + m - 1) % m];
            let curr = idx[i];
            let next = idx[(i + 1) % m];
            if is_ear(ring, &idx, prev, curr, next) {
                out.push(ring[prev]);
                out.push(ring[curr]);
                out.push(ring[next]);
                idx.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            // No ear left: non-simple or degenerate ring.
            break;
        }
    }

    if idx.len() == 3 {
        out.push(ring[idx[0]]);
        out.push(ring[idx[1]]);
        out.push(ring[idx[2]]);
    }
    out
}

/// Twice the signed area of the ring, positive for counter-clockwise winding.
fn signed_area(ring: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

/// An ear tip is convex and its triangle holds no other remaining vertex.
fn is_ear(ring: &[Vec2], idx: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    let a = ring[prev];
    let b = ring[curr];
    let c = ring[next];

    if cross(a, b, c) <= 0.0 {
        return false;
    }

    for &k in idx {
        if k == prev || k == curr || k == next {
            continue;
        }
        if point_in_triangle(ring[k], a, b, c) {
            return false;
        }
    }
    true
}

/// Cross product of `(b - a)` and `(c - a)`.
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(p, a, b);
    let d2 = cross(p, b, c);
    let d3 = cross(p, c, a);
    let any_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let any_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(any_neg && any_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        cross(a, b, c).abs() * 0.5
    }

    fn total_area(points: &[Vec2]) -> f32 {
        points
            .chunks(3)
            .map(|t| triangle_area(t[0], t[1], t[2]))
            .sum()
    }

    #[test]
    fn square_splits_into_two_triangles() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = triangulate_ring(&square);
        assert_eq!(tris.len(), 6);
        assert!((total_area(&tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clockwise_ring_is_accepted() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        let tris = triangulate_ring(&square);
        assert_eq!(tris.len(), 6);
        assert!((total_area(&tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn concave_l_shape() {
        let l_shape = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let tris = triangulate_ring(&l_shape);
        assert_eq!(tris.len(), 12);
        assert!((total_area(&tris) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn triangle_passes_through() {
        let tri = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 3.0),
        ];
        let out = triangulate_ring(&tri);
        assert_eq!(out, tri.to_vec());
    }

    #[test]
    fn short_rings_yield_nothing() {
        assert!(triangulate_ring(&[]).is_empty());
        assert!(triangulate_ring(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]).is_empty());
    }

    #[test]
    fn collinear_ring_terminates() {
        let flat = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ];
        // Degenerate input: only termination matters, not the output.
        let tris = triangulate_ring(&flat);
        assert_eq!(tris.len() % 3, 0);
    }
}
