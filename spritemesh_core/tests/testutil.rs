// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
use proptest::prelude::*;
use spritemesh_core::types::Vec2;

/// Simple polygons: vertices at evenly spaced angles around the origin with
/// a random radius each. Radial rings never self-intersect.
pub fn radial_ring_strategy() -> impl Strategy<Value = Vec<Vec2>> {
    proptest::collection::vec(1.0f32..100.0, 3..20).prop_map(|radii| {
        let n = radii.len() as f32;
        radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let angle = i as f32 * std::f32::consts::TAU / n;
                Vec2::new(r * angle.cos(), r * angle.sin())
            })
            .collect()
    })
}

/// Shoelace area of a closed ring.
pub fn ring_area(ring: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() * 0.5
}

/// Summed area of a flat triangle list, three points per triangle.
pub fn triangles_area(points: &[Vec2]) -> f32 {
    points
        .chunks(3)
        .map(|t| {
            ((t[1].x - t[0].x) * (t[2].y - t[0].y) - (t[1].y - t[0].y) * (t[2].x - t[0].x)).abs()
                * 0.5
        })
        .sum()
}
