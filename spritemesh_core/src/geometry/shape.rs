// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: polygon outline representation

use crate::types::Vec2;
use serde::{Deserialize, Serialize};

/// One traced polygon outline: an ordered vertex ring.
///
/// While `closed` is false the shape is a work-in-progress open boundary and
/// may hold any number of vertices. Callers only set `closed` once the ring
/// has at least three vertices; from then on the boundary is cyclic, the last
/// vertex connecting back to the first.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Ring vertices, insertion order = boundary order
    pub vertices: Vec<Vec2>,
    /// Whether the ring is closed
    pub closed: bool,
}

impl Shape {
    /// Create a new empty, open shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed shape from a complete ring.
    pub fn from_ring(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }

    /// Number of vertices in the ring.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the ring is closed.
    pub fn is_ring_closed(&self) -> bool {
        self.closed
    }

    /// Insert a vertex at `index`, shifting later vertices one slot up.
    pub fn insert_vertex(&mut self, index: usize, point: Vec2) {
        self.vertices.insert(index, point);
    }

    /// Remove and return the vertex at `index`.
    pub fn remove_vertex(&mut self, index: usize) -> Vec2 {
        self.vertices.remove(index)
    }
}
