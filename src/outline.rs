// src/outline.rs
// Glyph outline provider turning characters into positioned planar contours
// Exists to wrap ttf-parser behind the OutlineSource capability seam
// RELEVANT FILES:src/layout.rs,src/contour.rs,src/mesher.rs

use std::path::Path;

use glam::{vec2, Vec2};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::contour::{CharacterOutline, Contour, EPSILON};
use crate::error::{MesherResult, TextMeshError};
use crate::layout::LayoutState;

/// Default number of straight segments approximating each Bezier arc.
pub const DEFAULT_BEZIER_STEPS: u32 = 4;

// The resolution assumed for point-to-output-unit conversion, in dpi.
const RESOLUTION: f32 = 96.0;
const POINTS_PER_INCH: f32 = 72.0;

/// Capability seam for glyph outline extraction and pen advancement.
///
/// Implementations fail soft: a character whose glyph cannot be resolved
/// or loaded yields an empty outline and leaves `state` untouched, so one
/// missing glyph never stops the rest of the run.
pub trait OutlineSource {
    /// True when a font is loaded and outlines can be produced.
    fn is_ready(&self) -> bool;

    /// Produce the positioned outline for `ch`, advancing `state` by
    /// kerning, hinting drift, and the glyph's horizontal advance.
    fn next_outline(&mut self, ch: char, state: &mut LayoutState) -> CharacterOutline;

    /// Number of straight segments used per Bezier arc. Sources without
    /// curved outlines may ignore this.
    fn set_bezier_steps(&mut self, _steps: u32) {}
}

/// Distinct per-glyph failure kinds, each logged at most once per source
/// so a run full of missing glyphs cannot flood the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlyphFailure {
    Unmapped = 0,
    BadFace = 1,
}

/// `ttf-parser` backed outline source.
///
/// Owns the raw font bytes and re-parses the zero-copy `Face` view per
/// glyph, which avoids a self-referential field at negligible cost. Glyph
/// outlines are flattened with a fixed subdivision step count and scaled
/// from font units to output units for the configured nominal height.
pub struct FontOutlineSource {
    data: Vec<u8>,
    face_index: u32,
    scale: f32,
    has_kerning: bool,
    bezier_steps: u32,
    ready: bool,
    logged: [bool; 2],
}

impl FontOutlineSource {
    /// Load `font_path` at the nominal `font_height` in points. On any
    /// failure the source is created not-ready and the cause is logged.
    pub fn new(font_path: impl AsRef<Path>, font_height: f32) -> Self {
        let mut source = Self {
            data: Vec::new(),
            face_index: 0,
            scale: 0.0,
            has_kerning: false,
            bezier_steps: DEFAULT_BEZIER_STEPS,
            ready: false,
            logged: [false; 2],
        };
        if let Err(err) = source.load(font_path.as_ref(), font_height) {
            log::error!(
                "failed loading font {}: {err}",
                font_path.as_ref().display()
            );
        }
        source
    }

    pub fn with_bezier_steps(mut self, steps: u32) -> Self {
        self.bezier_steps = steps.max(1);
        self
    }

    fn load(&mut self, path: &Path, font_height: f32) -> MesherResult<()> {
        self.ready = false;

        if !(font_height > 0.0) {
            return Err(TextMeshError::font("nominal font height must be positive"));
        }

        let data = std::fs::read(path)?;
        let face = Face::parse(&data, self.face_index).map_err(TextMeshError::font)?;

        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(TextMeshError::font("font reports zero units per em"));
        }

        self.has_kerning = face.tables().kern.is_some();
        self.scale = font_height * (RESOLUTION / POINTS_PER_INCH) / units_per_em as f32;
        self.data = data;
        self.ready = true;
        Ok(())
    }

    fn kern_offset(&self, face: &Face, left: GlyphId, right: GlyphId) -> f32 {
        let Some(kern) = face.tables().kern else {
            return 0.0;
        };
        for subtable in kern.subtables.into_iter() {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left, right) {
                return value as f32 * self.scale;
            }
        }
        0.0
    }

    fn log_once(&mut self, kind: GlyphFailure, message: &str) {
        let slot = kind as usize;
        if !self.logged[slot] {
            self.logged[slot] = true;
            log::error!("{message}");
        }
    }
}

impl OutlineSource for FontOutlineSource {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn next_outline(&mut self, ch: char, state: &mut LayoutState) -> CharacterOutline {
        let mut outline = CharacterOutline::new(ch);
        if !self.ready {
            return outline;
        }

        let face = match Face::parse(&self.data, self.face_index) {
            Ok(face) => face,
            Err(err) => {
                self.log_once(
                    GlyphFailure::BadFace,
                    &format!("loaded font data no longer parses: {err}"),
                );
                return outline;
            }
        };

        let Some(glyph) = face.glyph_index(ch) else {
            self.log_once(
                GlyphFailure::Unmapped,
                &format!("no glyph for {ch:?} in the loaded font"),
            );
            return outline;
        };

        let kerning = if self.has_kerning && state.has_prev_glyph() {
            self.kern_offset(&face, GlyphId(state.prev_glyph), glyph)
        } else {
            0.0
        };
        // ttf-parser renders unhinted outlines, so both side-bearing
        // deltas are zero here; hinting-aware sources feed real values.
        state.apply_spacing(kerning, 0);

        let mut sink = ContourSink::new(state.pen, self.scale, self.bezier_steps);
        // None for blank glyphs such as the space: no contours, but the
        // advance below still moves the pen
        let _ = face.outline_glyph(glyph, &mut sink);
        outline.contours = sink.finish();

        let advance = face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * self.scale;
        state.commit_glyph(glyph.0, 0, advance);

        outline
    }

    fn set_bezier_steps(&mut self, steps: u32) {
        self.bezier_steps = steps.max(1);
    }
}

/// Flattens outline callbacks into closed polygonal contours using a fixed
/// number of subdivision steps per curve, offset by the pen position.
struct ContourSink {
    contours: Vec<Contour>,
    current: Vec<Vec2>,
    cursor: Vec2,
    offset: Vec2,
    scale: f32,
    steps: u32,
}

impl ContourSink {
    fn new(offset: Vec2, scale: f32, steps: u32) -> Self {
        Self {
            contours: Vec::new(),
            current: Vec::new(),
            cursor: Vec2::ZERO,
            offset,
            scale,
            steps: steps.max(1),
        }
    }

    fn map(&self, x: f32, y: f32) -> Vec2 {
        vec2(self.offset.x + x * self.scale, self.offset.y + y * self.scale)
    }

    fn push(&mut self, p: Vec2) {
        if let Some(last) = self.current.last() {
            if (*last - p).length_squared() < EPSILON * EPSILON {
                return;
            }
        }
        self.current.push(p);
    }

    fn end_contour(&mut self) {
        let ring = std::mem::take(&mut self.current);
        if let Some(contour) = Contour::from_ring(ring) {
            self.contours.push(contour);
        }
    }

    fn finish(mut self) -> Vec<Contour> {
        // fonts close every contour, but a truncated glyph program may not
        self.end_contour();
        self.contours
    }
}

impl OutlineBuilder for ContourSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        let p = self.map(x, y);
        self.current.push(p);
        self.cursor = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.push(p);
        self.cursor = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let from = self.cursor;
        let ctrl = self.map(x1, y1);
        let to = self.map(x, y);
        for step in 1..=self.steps {
            let t = step as f32 / self.steps as f32;
            self.push(quad_point(from, ctrl, to, t));
        }
        self.cursor = to;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let from = self.cursor;
        let ctrl1 = self.map(x1, y1);
        let ctrl2 = self.map(x2, y2);
        let to = self.map(x, y);
        for step in 1..=self.steps {
            let t = step as f32 / self.steps as f32;
            self.push(cubic_point(from, ctrl1, ctrl2, to, t));
        }
        self.cursor = to;
    }

    fn close(&mut self) {
        self.end_contour();
    }
}

fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
