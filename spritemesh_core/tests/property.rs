// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
use proptest::prelude::*;
use spritemesh_core::geometry::triangulate_ring;
mod testutil;

proptest! {
    #[test]
    fn simple_ring_yields_n_minus_two_triangles(ring in testutil::radial_ring_strategy()) {
        let points = triangulate_ring(&ring);
        prop_assert_eq!(points.len(), 3 * (ring.len() - 2));
    }
}

proptest! {
    #[test]
    fn triangulation_preserves_area(ring in testutil::radial_ring_strategy()) {
        let points = triangulate_ring(&ring);
        let expected = testutil::ring_area(&ring);
        let actual = testutil::triangles_area(&points);
        prop_assert!((actual - expected).abs() <= expected * 1e-3 + 1e-3);
    }
}
