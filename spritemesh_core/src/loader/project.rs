// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: project file persistence
//!
//! Text format, one block per model, blocks separated by `---`. Block lines
//! are recognized by prefix: `i` image path (relative to the project file),
//! `s` one shape ring, `v`/`u` the derived triangle and UV caches. The caches
//! are written for downstream consumers but ignored on load; shapes are
//! always re-triangulated.

use crate::error::Error;
use crate::geometry::Shape;
use crate::types::{SpriteMesh, Vec2};
use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Load every model of a project file.
///
/// A malformed coordinate token or an unreadable image aborts the whole
/// load; no partial model list is returned.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<SpriteMesh>, Error> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let meshes = parse(&input, base)?;
    debug!("loaded {} model(s) from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Parse project text with image paths resolved against `base_dir`.
pub fn parse(input: &str, base_dir: &Path) -> Result<Vec<SpriteMesh>, Error> {
    let mut meshes = Vec::new();
    for block in input.split("---") {
        let mut lines: Vec<&str> = block.trim().lines().collect();
        let rel: PathBuf = take_line(&mut lines, 'i').unwrap_or_default().into();
        let mut mesh = SpriteMesh::from_image(base_dir.join(rel))?;

        while let Some(coords) = take_line(&mut lines, 's') {
            let ring = parse_vertices(&coords)?;
            if ring.len() >= 3 {
                mesh.shapes.push(Shape::from_ring(ring));
            }
        }

        // `v` and `u` cache lines are never authoritative.
        mesh.triangulate();
        meshes.push(mesh);
    }
    Ok(meshes)
}

/// Save every model to a project file, triangulating each first.
pub fn save<P: AsRef<Path>>(path: P, meshes: &mut [SpriteMesh]) -> Result<(), Error> {
    let path = path.as_ref();
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let output = write_project(base, meshes);
    fs::write(path, output).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} model(s) to {}", meshes.len(), path.display());
    Ok(())
}

/// Render project text with image paths relative to `project_dir`.
pub fn write_project(project_dir: &Path, meshes: &mut [SpriteMesh]) -> String {
    let mut out = String::new();
    for (i, mesh) in meshes.iter_mut().enumerate() {
        if i > 0 {
            out.push_str("\n\n---\n\n");
        }
        mesh.triangulate();

        out.push_str("i ");
        out.push_str(&relativize(&mesh.image_path, project_dir));

        for shape in &mesh.shapes {
            out.push_str("\ns ");
            push_coords(&mut out, &shape.vertices);
        }

        out.push_str("\nv ");
        push_coords(&mut out, &mesh.triangle_vertices);
        out.push_str("\nu ");
        push_coords(&mut out, &mesh.triangle_uvs);
    }
    out
}

fn push_coords(out: &mut String, points: &[Vec2]) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
}

fn relativize(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Remove and return the payload of the first line starting with `prefix`.
fn take_line(lines: &mut Vec<&str>, prefix: char) -> Option<String> {
    let pos = lines.iter().position(|l| l.starts_with(prefix))?;
    let line = lines.remove(pos);
    Some(line[prefix.len_utf8()..].trim().to_string())
}

fn parse_vertices(input: &str) -> Result<Vec<Vec2>, Error> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = input.split(',').collect();
    let mut ring = Vec::with_capacity(tokens.len() / 2);
    // An odd trailing token is dropped, never an error.
    for pair in tokens.chunks_exact(2) {
        ring.push(Vec2::new(parse_coord(pair[0])?, parse_coord(pair[1])?));
    }
    Ok(ring)
}

fn parse_coord(token: &str) -> Result<f32, Error> {
    token.trim().parse().map_err(|_| Error::Parse {
        token: token.trim().to_string(),
    })
}
