// src/tessellate.rs
// Cap triangulation behind the PolygonTessellator capability seam
// Exists to turn classified fill and hole loops into planar triangles
// RELEVANT FILES:src/contour.rs,src/mesher.rs,src/mesh.rs

use glam::Vec2;
use lyon_path::math::point;
use lyon_path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use crate::contour::Contour;
use crate::error::TextMeshError;

/// Triangulated planar cap for one fill region of a glyph.
///
/// Triangles are wound counter-clockwise when viewed from +z; the mesher
/// reverses them for the downward-facing side of the extrusion.
#[derive(Debug, Clone, Default)]
pub struct CapTriangles {
    pub vertices: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl CapTriangles {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Capability seam for planar polygon triangulation.
pub trait PolygonTessellator {
    /// Triangulate `outer` minus its nested `holes`. The classifier
    /// guarantees hole loops wind opposite to `outer`, which is what
    /// excludes their interior under the nonzero fill rule.
    fn tessellate_cap(
        &mut self,
        outer: &Contour,
        holes: &[&Contour],
    ) -> Result<CapTriangles, TextMeshError>;
}

/// lyon-backed fill tessellator, reused across caps.
pub struct FillCapTessellator {
    tessellator: FillTessellator,
}

impl FillCapTessellator {
    pub fn new() -> Self {
        Self {
            tessellator: FillTessellator::new(),
        }
    }
}

impl Default for FillCapTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonTessellator for FillCapTessellator {
    fn tessellate_cap(
        &mut self,
        outer: &Contour,
        holes: &[&Contour],
    ) -> Result<CapTriangles, TextMeshError> {
        let mut builder = Path::builder();
        add_ring(&mut builder, outer);
        for hole in holes {
            add_ring(&mut builder, hole);
        }
        let path = builder.build();

        let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
        self.tessellator
            .tessellate_path(
                &path,
                &FillOptions::default().with_fill_rule(FillRule::NonZero),
                &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                    Vec2::new(vertex.position().x, vertex.position().y)
                }),
            )
            .map_err(|err| TextMeshError::tessellation(format!("{err:?}")))?;

        // normalize to counter-clockwise so callers get one fixed winding
        // regardless of the backend's emission order
        for triangle in buffers.indices.chunks_exact_mut(3) {
            let a = buffers.vertices[triangle[0] as usize];
            let b = buffers.vertices[triangle[1] as usize];
            let c = buffers.vertices[triangle[2] as usize];
            if (b - a).perp_dot(c - a) < 0.0 {
                triangle.swap(1, 2);
            }
        }

        Ok(CapTriangles {
            vertices: buffers.vertices,
            indices: buffers.indices,
        })
    }
}

fn add_ring(builder: &mut lyon_path::path::Builder, contour: &Contour) {
    let mut points = contour.points.iter();
    let Some(first) = points.next() else {
        return;
    };
    builder.begin(point(first.x, first.y));
    for p in points {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
}
