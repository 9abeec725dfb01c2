// src/validate.rs
// Output mesh diagnostics covering stats, index bounds, and degenerate faces
// Exists to sanity-check generated triangle soup in tests and debug builds
// RELEVANT FILES:src/mesh.rs,src/mesher.rs

use glam::Vec3;

use crate::mesh::MeshBuffers;

/// Basic statistics collected for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub bbox_min: [f32; 3],
    pub bbox_max: [f32; 3],
}

impl Default for MeshStats {
    fn default() -> Self {
        Self {
            vertex_count: 0,
            triangle_count: 0,
            bbox_min: [0.0; 3],
            bbox_max: [0.0; 3],
        }
    }
}

/// Issue categories detected by validation.
///
/// Duplicate coincident vertices are by contract not an issue here: the
/// mesher emits un-deduplicated triangle soup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshValidationIssue {
    IndexOutOfBounds { index: u32 },
    DanglingIndices { remainder: usize },
    DegenerateTriangle { triangle: usize },
}

/// Complete validation report.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshValidationReport {
    pub stats: MeshStats,
    pub issues: Vec<MeshValidationIssue>,
}

impl MeshValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run validation across indices, geometry, and statistics.
pub fn validate_mesh(mesh: &MeshBuffers) -> MeshValidationReport {
    let stats = compute_stats(mesh);
    let mut issues = Vec::new();

    let vertex_count = mesh.vertex_count();
    for &idx in &mesh.indices {
        if idx as usize >= vertex_count {
            issues.push(MeshValidationIssue::IndexOutOfBounds { index: idx });
        }
    }

    let remainder = mesh.indices.len() % 3;
    if remainder != 0 {
        issues.push(MeshValidationIssue::DanglingIndices { remainder });
    }

    detect_degenerate_triangles(mesh, &mut issues);

    MeshValidationReport { stats, issues }
}

fn compute_stats(mesh: &MeshBuffers) -> MeshStats {
    if mesh.positions.is_empty() {
        return MeshStats::default();
    }

    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for pos in &mesh.positions {
        for axis in 0..3 {
            if pos[axis] < min[axis] {
                min[axis] = pos[axis];
            }
            if pos[axis] > max[axis] {
                max[axis] = pos[axis];
            }
        }
    }

    MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        bbox_min: min,
        bbox_max: max,
    }
}

fn detect_degenerate_triangles(mesh: &MeshBuffers, issues: &mut Vec<MeshValidationIssue>) {
    let vertex_count = mesh.vertex_count();
    for (triangle, chunk) in mesh.indices.chunks_exact(3).enumerate() {
        let (i0, i1, i2) = (chunk[0], chunk[1], chunk[2]);
        if i0 as usize >= vertex_count || i1 as usize >= vertex_count || i2 as usize >= vertex_count
        {
            continue; // already reported as out of bounds
        }

        let p0 = Vec3::from(mesh.positions[i0 as usize]);
        let p1 = Vec3::from(mesh.positions[i1 as usize]);
        let p2 = Vec3::from(mesh.positions[i2 as usize]);
        let area = 0.5 * (p1 - p0).cross(p2 - p0).length();
        if area <= f32::EPSILON {
            issues.push(MeshValidationIssue::DegenerateTriangle { triangle });
        }
    }
}
