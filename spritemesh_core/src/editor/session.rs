// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: interactive editing state machine
//!
//! Turns raw pointer events into vertex mutations on a [`SpriteMesh`]:
//! shape creation, point selection, drag-move, midpoint insertion, deletion
//! and rectangle multi-select. One session exists per active mesh; switching
//! the active mesh means dropping the session and starting a fresh one.

use crate::geometry::Shape;
use crate::types::{SpriteMesh, Vec2, VertexId};
use std::collections::HashSet;

/// Hit-test radius in world units at zoom 1.
const PICK_RADIUS: f32 = 10.0;

/// Editing mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Append new vertices to grow an open shape until it is closed
    #[default]
    Creation,
    /// Select, move, insert and remove existing vertices
    Edition,
}

/// Pointer gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress
    #[default]
    Idle,
    /// Rectangle selection spanned by two corners
    RectSelect {
        /// Anchor corner, fixed at pointer-down
        p1: Vec2,
        /// Moving corner, tracking the cursor
        p2: Vec2,
    },
    /// Translation of the selection, anchored at the grabbed vertex
    Drag {
        /// The vertex grabbed at pointer-down; each drag sample translates
        /// the selection by the cursor's offset from this vertex
        anchor: VertexId,
    },
}

/// Transient editing state for one active [`SpriteMesh`].
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Current editing mode
    pub mode: Mode,
    /// Viewport zoom factor scaling the hit-test radius
    pub zoom: f32,
    selection: HashSet<VertexId>,
    nearest: Option<VertexId>,
    next_point: Option<Vec2>,
    gesture: Gesture,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create a session in creation mode at zoom 1.
    pub fn new() -> Self {
        Self {
            mode: Mode::Creation,
            zoom: 1.0,
            selection: HashSet::new(),
            nearest: None,
            next_point: None,
            gesture: Gesture::Idle,
        }
    }

    /// Currently selected vertices.
    pub fn selection(&self) -> &HashSet<VertexId> {
        &self.selection
    }

    /// Vertex under the cursor, if any.
    pub fn nearest(&self) -> Option<VertexId> {
        self.nearest
    }

    /// Cursor position, shown as the creation preview point.
    pub fn next_point(&self) -> Option<Vec2> {
        self.next_point
    }

    /// Gesture in progress, for drawing selection rectangles.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Switch mode, discarding all transient state.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.selection.clear();
        self.nearest = None;
        self.next_point = None;
        self.gesture = Gesture::Idle;
    }

    /// Cycle to the other mode.
    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            Mode::Creation => Mode::Edition,
            Mode::Edition => Mode::Creation,
        };
        self.set_mode(next);
    }

    /// Track the cursor: update the preview point and the nearest vertex.
    ///
    /// The nearest vertex is found by a linear scan over every shape's
    /// vertices in order; the last vertex within `10 * zoom` world units
    /// wins.
    pub fn pointer_move(&mut self, mesh: &SpriteMesh, p: Vec2, _modifier: bool) {
        self.next_point = Some(p);
        self.nearest = None;
        let radius = PICK_RADIUS * self.zoom;
        for (s, shape) in mesh.shapes.iter().enumerate() {
            for (v, vertex) in shape.vertices.iter().enumerate() {
                if vertex.distance(p) < radius {
                    self.nearest = Some(VertexId::new(s, v));
                }
            }
        }
    }

    /// Handle a pointer press.
    pub fn pointer_down(&mut self, mesh: &mut SpriteMesh, p: Vec2, modifier: bool) {
        self.gesture = Gesture::Idle;
        match self.mode {
            Mode::Creation => self.creation_down(mesh, p),
            Mode::Edition => self.edition_down(p, modifier),
        }
    }

    /// Handle a pointer drag sample.
    pub fn pointer_drag(&mut self, mesh: &mut SpriteMesh, p: Vec2, modifier: bool) {
        if self.mode != Mode::Edition {
            return;
        }
        match self.gesture {
            Gesture::Drag { anchor } if !modifier => {
                if let Some(a) = mesh.vertex(anchor) {
                    let dx = p.x - a.x;
                    let dy = p.y - a.y;
                    for id in &self.selection {
                        if let Some(v) = mesh.vertex_mut(*id) {
                            v.x += dx;
                            v.y += dy;
                        }
                    }
                    // Re-triangulation is deferred until pointer-up.
                    mesh.clear_triangle_cache();
                }
            }
            Gesture::RectSelect { p1, .. } => {
                self.gesture = Gesture::RectSelect { p1, p2: p };
            }
            _ => {}
        }
    }

    /// Handle a pointer release.
    pub fn pointer_up(&mut self, mesh: &mut SpriteMesh, _p: Vec2, modifier: bool) {
        if self.mode != Mode::Edition {
            self.gesture = Gesture::Idle;
            return;
        }
        if let Gesture::RectSelect { p1, p2 } = self.gesture {
            let picked = self.vertices_in_rect(mesh, p1, p2);
            if modifier {
                for id in picked {
                    self.toggle(id);
                }
            } else {
                self.selection = picked.into_iter().collect();
            }
        }
        self.gesture = Gesture::Idle;
        mesh.triangulate();
    }

    /// Drop the selection and every shape of the mesh.
    pub fn clear_all(&mut self, mesh: &mut SpriteMesh) {
        self.selection.clear();
        self.nearest = None;
        mesh.clear();
    }

    /// Insert a midpoint vertex on every ring edge whose two endpoints are
    /// both selected, wrapping from the last vertex back to the first.
    ///
    /// Newly inserted vertices join the selection; previously selected
    /// vertices keep their selection under the shifted indices.
    pub fn insert_between_selected(&mut self, mesh: &mut SpriteMesh) {
        if !self.insert_enabled(mesh) {
            return;
        }
        let mut new_selection = HashSet::new();
        for (s, shape) in mesh.shapes.iter_mut().enumerate() {
            let n = shape.vertex_count();
            let mut rebuilt = Vec::with_capacity(n);
            for i in 0..n {
                let selected = self.selection.contains(&VertexId::new(s, i));
                if selected {
                    new_selection.insert(VertexId::new(s, rebuilt.len()));
                }
                rebuilt.push(shape.vertices[i]);
                let j = (i + 1) % n;
                if selected && self.selection.contains(&VertexId::new(s, j)) {
                    new_selection.insert(VertexId::new(s, rebuilt.len()));
                    rebuilt.push(shape.vertices[i].midpoint(shape.vertices[j]));
                }
            }
            shape.vertices = rebuilt;
        }
        self.selection = new_selection;
        self.nearest = None;
        mesh.triangulate();
    }

    /// Remove every selected vertex; shapes left with fewer than three
    /// vertices are deleted entirely.
    pub fn remove_selected(&mut self, mesh: &mut SpriteMesh) {
        if !self.remove_enabled() {
            return;
        }
        let selection = std::mem::take(&mut self.selection);
        let mut kept = Vec::with_capacity(mesh.shapes.len());
        for (s, mut shape) in std::mem::take(&mut mesh.shapes).into_iter().enumerate() {
            let mut i = 0;
            shape.vertices.retain(|_| {
                let keep = !selection.contains(&VertexId::new(s, i));
                i += 1;
                keep
            });
            if shape.vertex_count() >= 3 {
                kept.push(shape);
            }
        }
        mesh.shapes = kept;
        self.nearest = None;
        mesh.triangulate();
    }

    /// Whether the clear-all command has anything to clear.
    pub fn clear_enabled(&self, mesh: &SpriteMesh) -> bool {
        !mesh.shapes.is_empty()
    }

    /// Whether some ring edge has both endpoints selected.
    pub fn insert_enabled(&self, mesh: &SpriteMesh) -> bool {
        if self.selection.len() <= 1 {
            return false;
        }
        for (s, shape) in mesh.shapes.iter().enumerate() {
            let n = shape.vertex_count();
            for i in 0..n {
                let j = (i + 1) % n;
                if self.selection.contains(&VertexId::new(s, i))
                    && self.selection.contains(&VertexId::new(s, j))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the remove command has anything to remove.
    pub fn remove_enabled(&self) -> bool {
        !self.selection.is_empty()
    }

    fn creation_down(&mut self, mesh: &mut SpriteMesh, p: Vec2) {
        let count = mesh.shapes.len();
        let last_open = mesh.shapes.last().map_or(false, |s| !s.closed);
        if !last_open {
            let mut shape = Shape::new();
            shape.vertices.push(p);
            mesh.shapes.push(shape);
            return;
        }
        let first = VertexId::new(count - 1, 0);
        if mesh.shapes[count - 1].vertex_count() > 2 && self.nearest == Some(first) {
            // Closing click: the ring closes without a new vertex.
            mesh.shapes[count - 1].closed = true;
            mesh.triangulate();
        } else {
            mesh.shapes[count - 1].vertices.push(p);
        }
    }

    fn edition_down(&mut self, p: Vec2, modifier: bool) {
        match self.nearest {
            Some(id) => {
                if modifier {
                    self.toggle(id);
                } else if !self.selection.contains(&id) {
                    self.selection.clear();
                    self.selection.insert(id);
                }
                self.gesture = Gesture::Drag { anchor: id };
            }
            None => {
                if !modifier {
                    self.selection.clear();
                }
                self.gesture = Gesture::RectSelect { p1: p, p2: p };
            }
        }
    }

    fn toggle(&mut self, id: VertexId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    fn vertices_in_rect(&self, mesh: &SpriteMesh, p1: Vec2, p2: Vec2) -> Vec<VertexId> {
        let min_x = p1.x.min(p2.x);
        let max_x = p1.x.max(p2.x);
        let min_y = p1.y.min(p2.y);
        let max_y = p1.y.max(p2.y);
        let mut picked = Vec::new();
        for (s, shape) in mesh.shapes.iter().enumerate() {
            for (v, vertex) in shape.vertices.iter().enumerate() {
                if vertex.x >= min_x && vertex.x <= max_x && vertex.y >= min_y && vertex.y <= max_y
                {
                    picked.push(VertexId::new(s, v));
                }
            }
        }
        picked
    }
}
