// src/layout.rs
// Pen position and inter-glyph spacing state for one text run
// Exists to keep kerning and hinting carry-over call-scoped and testable
// RELEVANT FILES:src/outline.rs,src/mesher.rs,src/contour.rs

use glam::Vec2;

/// Threshold, in 26.6 fixed-point units, beyond which hinting drift
/// between adjacent glyphs is compensated by one output unit.
const DELTA_THRESHOLD: i32 = 32;

/// Mutable layout cursor carried across the characters of one text run.
///
/// One instance per generate call: created at entry with the starting pen
/// position, discarded at the end. Separate runs therefore cannot leak
/// kerning or hinting state into each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Current pen position on the baseline, in output units.
    pub pen: Vec2,
    /// Glyph id of the previously emitted glyph, 0 when none.
    pub prev_glyph: u16,
    /// Right-side-bearing delta of the previously emitted glyph, in 26.6
    /// fixed-point units. Always 0 for unhinted outline sources.
    pub prev_rsb_delta: i32,
}

impl LayoutState {
    pub fn new(start: Vec2) -> Self {
        Self {
            pen: start,
            prev_glyph: 0,
            prev_rsb_delta: 0,
        }
    }

    /// True when a previous glyph exists to kern against.
    pub fn has_prev_glyph(&self) -> bool {
        self.prev_glyph != 0
    }

    /// Apply the pre-emission spacing corrections for the next glyph: the
    /// kerning offset (already scaled to output units) and the fixed-point
    /// hinting drift rule. The rule subtracts one unit when the previous
    /// glyph's right-side-bearing delta exceeds this glyph's
    /// left-side-bearing delta by the threshold, and adds one unit in the
    /// opposite case, cancelling rounding drift between adjacent glyphs.
    pub fn apply_spacing(&mut self, kerning: f32, lsb_delta: i32) {
        self.pen.x += kerning;

        if self.prev_rsb_delta - lsb_delta >= DELTA_THRESHOLD {
            self.pen.x -= 1.0;
        } else if self.prev_rsb_delta - lsb_delta < -DELTA_THRESHOLD {
            self.pen.x += 1.0;
        }
    }

    /// Commit a successfully emitted glyph: remember it for the next
    /// kerning query and advance the pen. Failed glyphs are never
    /// committed, so they leave spacing state untouched.
    pub fn commit_glyph(&mut self, glyph: u16, rsb_delta: i32, advance: f32) {
        self.prev_glyph = glyph;
        self.prev_rsb_delta = rsb_delta;
        self.pen.x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn starts_with_no_previous_glyph() {
        let state = LayoutState::new(vec2(3.0, 7.0));
        assert_eq!(state.pen, vec2(3.0, 7.0));
        assert!(!state.has_prev_glyph());
        assert_eq!(state.prev_rsb_delta, 0);
    }

    #[test]
    fn kerning_moves_the_pen_before_emission() {
        let mut state = LayoutState::new(Vec2::ZERO);
        state.apply_spacing(-1.5, 0);
        assert_eq!(state.pen.x, -1.5);
    }

    #[test]
    fn drift_rule_fires_exactly_at_the_threshold() {
        let mut state = LayoutState::new(Vec2::ZERO);
        state.prev_rsb_delta = 32;
        state.apply_spacing(0.0, 0); // 32 - 0 >= 32
        assert_eq!(state.pen.x, -1.0);

        let mut state = LayoutState::new(Vec2::ZERO);
        state.prev_rsb_delta = 31;
        state.apply_spacing(0.0, 0); // below threshold, no correction
        assert_eq!(state.pen.x, 0.0);

        let mut state = LayoutState::new(Vec2::ZERO);
        state.prev_rsb_delta = -33;
        state.apply_spacing(0.0, 0); // -33 - 0 < -32
        assert_eq!(state.pen.x, 1.0);

        let mut state = LayoutState::new(Vec2::ZERO);
        state.prev_rsb_delta = -32;
        state.apply_spacing(0.0, 0); // boundary case stays uncorrected
        assert_eq!(state.pen.x, 0.0);
    }

    #[test]
    fn drift_rule_compares_against_current_lsb_delta() {
        let mut state = LayoutState::new(Vec2::ZERO);
        state.prev_rsb_delta = 10;
        state.apply_spacing(0.0, -30); // 10 - (-30) = 40 >= 32
        assert_eq!(state.pen.x, -1.0);
    }

    #[test]
    fn commit_advances_and_remembers_the_glyph() {
        let mut state = LayoutState::new(Vec2::ZERO);
        state.commit_glyph(42, -7, 12.5);
        assert_eq!(state.pen.x, 12.5);
        assert_eq!(state.prev_glyph, 42);
        assert_eq!(state.prev_rsb_delta, -7);
        assert!(state.has_prev_glyph());
    }
}
