// src/mesher.rs
// Text layout, contour classification, and extrusion into a triangle mesh
// Exists to drive the outline and tessellation seams into a solid 3D mesh
// RELEVANT FILES:src/outline.rs,src/tessellate.rs,src/contour.rs,src/mesh.rs

use glam::{vec3, Vec2};

use crate::contour::{CharacterOutline, Contour};
use crate::error::{MesherResult, TextMeshError};
use crate::layout::LayoutState;
use crate::mesh::MeshBuffers;
use crate::outline::{FontOutlineSource, OutlineSource};
use crate::tessellate::{FillCapTessellator, PolygonTessellator};

/// Extruded 3D text mesh generator.
///
/// Owns an outline source (the font) and a polygon tessellator behind
/// capability traits, so the pipeline runs unchanged against test doubles.
/// Generation is strictly sequential: inter-glyph spacing depends on the
/// order characters are laid out, and `generate` takes `&mut self`, so
/// concurrent runs on one instance are rejected at compile time.
pub struct TextMesher {
    source: Box<dyn OutlineSource>,
    tessellator: Box<dyn PolygonTessellator>,
}

impl TextMesher {
    /// Load the font at `font_path` with the nominal `font_height` in
    /// points. On any initialization failure the mesher is created
    /// not-ready and every generate call reports [`TextMeshError::NotReady`]
    /// until a successful [`set_font`](Self::set_font).
    pub fn new(font_path: impl AsRef<std::path::Path>, font_height: f32) -> Self {
        Self {
            source: Box::new(FontOutlineSource::new(font_path, font_height)),
            tessellator: Box::new(FillCapTessellator::new()),
        }
    }

    /// Assemble a mesher from explicit collaborators.
    pub fn from_parts(
        source: Box<dyn OutlineSource>,
        tessellator: Box<dyn PolygonTessellator>,
    ) -> Self {
        Self {
            source,
            tessellator,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_ready()
    }

    /// Replace the loaded font. The prior font's resources are released
    /// before the new face is initialized, so switching fonts never leaks.
    pub fn set_font(&mut self, font_path: impl AsRef<std::path::Path>, font_height: f32) {
        self.source = Box::new(FontOutlineSource::new(font_path, font_height));
    }

    /// Number of straight segments approximating each Bezier arc. Higher
    /// values trade triangle count for smoother curves.
    pub fn set_bezier_steps(&mut self, steps: u32) {
        self.source.set_bezier_steps(steps);
    }

    /// Lay `text` out along the baseline starting at `(x, y)` and extrude
    /// the glyph shapes by `extrude` along +z into a fresh mesh.
    pub fn generate(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        extrude: f32,
    ) -> MesherResult<MeshBuffers> {
        let mut mesh = MeshBuffers::new();
        self.generate_into(&mut mesh, text, x, y, extrude)?;
        Ok(mesh)
    }

    /// Like [`generate`](Self::generate), writing into a caller-supplied
    /// mesh. The mesh is not mutated on the not-ready and no-geometry
    /// failure paths.
    pub fn generate_into(
        &mut self,
        mesh: &mut MeshBuffers,
        text: &str,
        x: f32,
        y: f32,
        extrude: f32,
    ) -> MesherResult<()> {
        if !self.source.is_ready() {
            return Err(TextMeshError::NotReady);
        }

        let characters = self.layout(text, x, y);
        let contour_total: usize = characters.iter().map(|ch| ch.contours.len()).sum();
        if contour_total == 0 {
            log::error!("no contours generated from {text:?} using the loaded font");
            return Err(TextMeshError::NoGeometry);
        }

        self.extrude(mesh, &characters, extrude);
        Ok(())
    }

    /// Sequential per-character layout. Order is semantically significant:
    /// it determines kerning and advance accumulation.
    fn layout(&mut self, text: &str, x: f32, y: f32) -> Vec<CharacterOutline> {
        if !self.source.is_ready() {
            return Vec::new();
        }

        let mut state = LayoutState::new(Vec2::new(x, y));
        text.chars()
            .map(|ch| self.source.next_outline(ch, &mut state))
            .collect()
    }

    fn extrude(&mut self, mesh: &mut MeshBuffers, characters: &[CharacterOutline], extrude: f32) {
        let lift = vec3(0.0, 0.0, extrude);

        for ch in characters {
            for (index, contour) in ch.contours.iter().enumerate() {
                // side walls: one quad per boundary edge of every loop,
                // fills and holes alike, connecting the two rims
                let n = contour.points.len();
                for p in 0..n {
                    let a = contour.points[p].extend(0.0);
                    let b = contour.points[(p + 1) % n].extend(0.0);
                    let c = a + lift;
                    let d = b + lift;
                    mesh.add_triangle(c, b, a);
                    mesh.add_triangle(c, d, b);
                }

                // outer loops run clockwise; only they grow caps
                if !contour.clockwise {
                    continue;
                }

                let holes: Vec<&Contour> = ch
                    .contours
                    .iter()
                    .enumerate()
                    .filter(|(hole_index, candidate)| {
                        *hole_index != index && candidate.is_hole_of(contour)
                    })
                    .map(|(_, candidate)| candidate)
                    .collect();

                let cap = match self.tessellator.tessellate_cap(contour, &holes) {
                    Ok(cap) => cap,
                    Err(err) => {
                        log::warn!("skipping a cap of {:?}: {err}", ch.character);
                        continue;
                    }
                };

                // cap triangles arrive counter-clockwise viewed from +z;
                // the bottom face looks down -z, the lifted copy up +z
                for tri in cap.indices.chunks_exact(3) {
                    let va = cap.vertices[tri[0] as usize].extend(0.0);
                    let vb = cap.vertices[tri[1] as usize].extend(0.0);
                    let vc = cap.vertices[tri[2] as usize].extend(0.0);
                    mesh.add_triangle(vc, vb, va);
                    mesh.add_triangle(va + lift, vb + lift, vc + lift);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellate::CapTriangles;
    use glam::vec2;

    /// Outline source with one fixed square glyph per drawable character.
    struct SquareSource {
        ready: bool,
        side: f32,
        advance: f32,
    }

    impl OutlineSource for SquareSource {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn next_outline(&mut self, ch: char, state: &mut LayoutState) -> CharacterOutline {
            let mut outline = CharacterOutline::new(ch);
            if ch.is_whitespace() {
                state.commit_glyph(1, 0, self.advance);
                return outline;
            }

            let o = state.pen;
            let s = self.side;
            outline.contours.push(Contour::new(vec![
                o,
                o + vec2(0.0, s),
                o + vec2(s, s),
                o + vec2(s, 0.0),
            ]));
            state.commit_glyph(2, 0, self.advance);
            outline
        }
    }

    /// Tessellator that emits exactly one triangle per cap request.
    struct OneTriangleTessellator;

    impl PolygonTessellator for OneTriangleTessellator {
        fn tessellate_cap(
            &mut self,
            outer: &Contour,
            _holes: &[&Contour],
        ) -> Result<CapTriangles, TextMeshError> {
            Ok(CapTriangles {
                vertices: outer.points[..3].to_vec(),
                indices: vec![0, 1, 2],
            })
        }
    }

    fn square_mesher(ready: bool) -> TextMesher {
        TextMesher::from_parts(
            Box::new(SquareSource {
                ready,
                side: 4.0,
                advance: 6.0,
            }),
            Box::new(FillCapTessellator::new()),
        )
    }

    #[test]
    fn not_ready_source_fails_without_touching_the_mesh() {
        let mut mesher = square_mesher(false);
        let mut mesh = MeshBuffers::new();
        let result = mesher.generate_into(&mut mesh, "abc", 0.0, 0.0, 1.0);
        assert!(matches!(result, Err(TextMeshError::NotReady)));
        assert!(mesh.is_empty());
    }

    #[test]
    fn whitespace_only_text_yields_no_geometry() {
        let mut mesher = square_mesher(true);
        let mut mesh = MeshBuffers::new();
        let result = mesher.generate_into(&mut mesh, " \t ", 0.0, 0.0, 1.0);
        assert!(matches!(result, Err(TextMeshError::NoGeometry)));
        assert!(mesh.is_empty());
    }

    #[test]
    fn empty_text_yields_no_geometry() {
        let mut mesher = square_mesher(true);
        assert!(matches!(
            mesher.generate("", 0.0, 0.0, 1.0),
            Err(TextMeshError::NoGeometry)
        ));
    }

    #[test]
    fn one_cap_is_tessellated_per_clockwise_contour() {
        let mut mesher = TextMesher::from_parts(
            Box::new(SquareSource {
                ready: true,
                side: 4.0,
                advance: 6.0,
            }),
            Box::new(OneTriangleTessellator),
        );
        let mesh = mesher.generate("ab c", 0.0, 0.0, 2.0).expect("mesh");

        // 3 drawable glyphs, each with 4 edges * 2 side triangles plus
        // one cap triangle duplicated top and bottom: 3 * (8 + 2)
        assert_eq!(mesh.triangle_count(), 30);
    }

    #[test]
    fn side_walls_come_in_pairs() {
        let mut mesher = square_mesher(true);
        let mesh = mesher.generate("a", 0.0, 0.0, 3.0).expect("mesh");
        assert_eq!(mesh.triangle_count() % 2, 0);
        assert_eq!(mesh.vertex_count(), mesh.indices.len());
    }

    #[test]
    fn set_font_with_a_bad_path_makes_the_mesher_not_ready() {
        let mut mesher = square_mesher(true);
        assert!(mesher.is_ready());
        mesher.set_font("/nonexistent/no-such-font.ttf", 24.0);
        assert!(!mesher.is_ready());
        assert!(matches!(
            mesher.generate("a", 0.0, 0.0, 1.0),
            Err(TextMeshError::NotReady)
        ));
    }
}
