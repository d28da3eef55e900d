// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: type definitions

use crate::error::Error;
use crate::geometry::{triangulate_ring, Shape};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 2D vector in image space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vec2 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Vec2 {
    /// Create a vector from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }
}

/// Handle naming one vertex of one shape by index.
///
/// Handles stay valid as long as no vertex is inserted or removed before the
/// indexed position; operations that reshuffle indices rebuild or drop the
/// handles they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId {
    /// Index of the shape in [`SpriteMesh::shapes`]
    pub shape: usize,
    /// Index of the vertex within the shape's ring
    pub vertex: usize,
}

impl VertexId {
    /// Create a handle from a shape index and a vertex index.
    pub fn new(shape: usize, vertex: usize) -> Self {
        Self { shape, vertex }
    }
}

/// Polygon mesh traced over one sprite image.
///
/// Owns the traced shapes together with the derived triangle and UV caches.
/// The caches are rebuilt wholesale by [`triangulate`](Self::triangulate) and
/// are never edited in place; a mutation that defers re-triangulation marks
/// them dirty via [`clear_triangle_cache`](Self::clear_triangle_cache).
#[derive(Debug, Clone)]
pub struct SpriteMesh {
    /// Canonical path of the backing image
    pub image_path: PathBuf,
    /// Traced polygon outlines in drawing order
    pub shapes: Vec<Shape>,
    /// Flat triangle list, three consecutive points per triangle
    pub triangle_vertices: Vec<Vec2>,
    /// Texture coordinates matching `triangle_vertices` one to one
    pub triangle_uvs: Vec<Vec2>,
    width: f32,
    height: f32,
    dirty: bool,
}

impl SpriteMesh {
    /// Create a mesh for an image whose dimensions are already known.
    pub fn new(image_path: PathBuf, width: f32, height: f32) -> Self {
        Self {
            image_path,
            shapes: Vec::new(),
            triangle_vertices: Vec::new(),
            triangle_uvs: Vec::new(),
            width,
            height,
            dirty: false,
        }
    }

    /// Create a mesh backed by the image at `path`.
    ///
    /// The path is canonicalized and the image header is probed for its
    /// dimensions; the pixel data itself is never decoded here.
    pub fn from_image<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })?;
        let (w, h) =
            image::image_dimensions(&canonical).map_err(|source| Error::ImageDecode {
                path: canonical.clone(),
                source,
            })?;
        Ok(Self::new(canonical, w as f32, h as f32))
    }

    /// Create meshes for a batch of image paths.
    ///
    /// Each failing file produces one error; the remaining files are still
    /// processed.
    pub fn from_images<P: AsRef<Path>>(paths: &[P]) -> (Vec<Self>, Vec<Error>) {
        let mut meshes = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            match Self::from_image(path) {
                Ok(mesh) => meshes.push(mesh),
                Err(err) => errors.push(err),
            }
        }
        (meshes, errors)
    }

    /// Image width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether the triangle caches are stale relative to `shapes`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Look up a vertex by handle.
    pub fn vertex(&self, id: VertexId) -> Option<Vec2> {
        self.shapes
            .get(id.shape)
            .and_then(|s| s.vertices.get(id.vertex))
            .copied()
    }

    /// Look up a vertex by handle for mutation.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vec2> {
        self.shapes
            .get_mut(id.shape)
            .and_then(|s| s.vertices.get_mut(id.vertex))
    }

    /// Rebuild the triangle and UV caches from the current shapes.
    ///
    /// Every closed shape with at least three vertices contributes its
    /// ear-clipping triangulation; open or smaller shapes contribute nothing.
    /// UVs map each triangle vertex to `(x/w, 1 - y/h)` and stay empty for
    /// degenerate image sizes below 0.1 pixels.
    pub fn triangulate(&mut self) {
        self.triangle_vertices.clear();
        self.triangle_uvs.clear();

        for shape in &self.shapes {
            if !shape.closed || shape.vertex_count() < 3 {
                continue;
            }
            self.triangle_vertices
                .extend(triangulate_ring(&shape.vertices));
        }

        if self.width >= 0.1 && self.height >= 0.1 {
            for v in &self.triangle_vertices {
                self.triangle_uvs
                    .push(Vec2::new(v.x / self.width, 1.0 - v.y / self.height));
            }
        }

        self.dirty = false;
        debug!(
            "triangulated {} shape(s) into {} triangle(s)",
            self.shapes.len(),
            self.triangle_vertices.len() / 3
        );
    }

    /// Drop all shapes and both caches.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.triangle_vertices.clear();
        self.triangle_uvs.clear();
        self.dirty = false;
    }

    /// Empty only the derived caches and mark them stale.
    ///
    /// Used while a drag is in progress, when re-triangulating every sample
    /// would be wasted work.
    pub fn clear_triangle_cache(&mut self) {
        self.triangle_vertices.clear();
        self.triangle_uvs.clear();
        self.dirty = true;
    }

    /// Re-triangulate if and only if the caches are stale.
    pub fn reconcile(&mut self) {
        if self.dirty {
            self.triangulate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(w: f32, h: f32) -> SpriteMesh {
        SpriteMesh::new(PathBuf::from("test.png"), w, h)
    }

    fn unit_square() -> Shape {
        Shape::from_ring(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn uv_mapping() {
        let mut m = mesh(2.0, 4.0);
        m.shapes.push(unit_square());
        m.triangulate();
        assert_eq!(m.triangle_vertices.len(), 6);
        assert_eq!(m.triangle_uvs.len(), 6);
        for (v, uv) in m.triangle_vertices.iter().zip(&m.triangle_uvs) {
            assert_eq!(uv.x, v.x / 2.0);
            assert_eq!(uv.y, 1.0 - v.y / 4.0);
        }
    }

    #[test]
    fn degenerate_image_skips_uvs() {
        let mut m = mesh(0.05, 4.0);
        m.shapes.push(unit_square());
        m.triangulate();
        assert_eq!(m.triangle_vertices.len(), 6);
        assert!(m.triangle_uvs.is_empty());
    }

    #[test]
    fn open_shape_contributes_nothing() {
        let mut m = mesh(8.0, 8.0);
        let mut open = unit_square();
        open.closed = false;
        m.shapes.push(open);
        m.triangulate();
        assert!(m.triangle_vertices.is_empty());
        assert!(m.triangle_uvs.is_empty());
    }

    #[test]
    fn clear_drops_shapes_and_caches() {
        let mut m = mesh(8.0, 8.0);
        m.shapes.push(unit_square());
        m.triangulate();
        m.clear();
        assert!(m.shapes.is_empty());
        assert!(m.triangle_vertices.is_empty());
        assert!(m.triangle_uvs.is_empty());
    }

    #[test]
    fn cache_dirty_then_reconcile() {
        let mut m = mesh(8.0, 8.0);
        m.shapes.push(unit_square());
        m.triangulate();
        assert!(!m.is_dirty());
        m.clear_triangle_cache();
        assert!(m.is_dirty());
        assert!(m.triangle_vertices.is_empty());
        m.reconcile();
        assert!(!m.is_dirty());
        assert_eq!(m.triangle_vertices.len(), 6);
    }

    #[test]
    fn vertex_lookup_by_handle() {
        let mut m = mesh(8.0, 8.0);
        m.shapes.push(unit_square());
        assert_eq!(
            m.vertex(VertexId::new(0, 2)),
            Some(Vec2::new(1.0, 1.0))
        );
        assert_eq!(m.vertex(VertexId::new(0, 9)), None);
        assert_eq!(m.vertex(VertexId::new(3, 0)), None);
        if let Some(v) = m.vertex_mut(VertexId::new(0, 0)) {
            v.x = 5.0;
        }
        assert_eq!(m.shapes[0].vertices[0], Vec2::new(5.0, 0.0));
    }
}
