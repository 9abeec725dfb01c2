// src/contour.rs
// Planar glyph contour types and containment predicates
// Exists to classify fill and hole loops before cap tessellation
// RELEVANT FILES:src/outline.rs,src/tessellate.rs,src/mesher.rs

use glam::Vec2;

pub(crate) const EPSILON: f32 = 1e-6;

/// One closed loop of a glyph outline, flattened to straight segments.
///
/// Points are kept in traversal order with no duplicate closing point.
/// `clockwise` records the loop orientation computed from its signed area
/// rather than trusted from the outline library; with the y axis up,
/// outer (fill) loops of TrueType outlines run clockwise and nested hole
/// loops run counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Vec2>,
    pub clockwise: bool,
}

impl Contour {
    /// Build a contour from an ordered loop, computing its winding.
    pub fn new(points: Vec<Vec2>) -> Self {
        let clockwise = signed_area(&points) < 0.0;
        Self { points, clockwise }
    }

    /// Build a contour from a raw point ring, dropping consecutive
    /// duplicates and a duplicate closing point. Returns `None` when fewer
    /// than three distinct points remain.
    pub fn from_ring(points: Vec<Vec2>) -> Option<Self> {
        let mut ring: Vec<Vec2> = Vec::with_capacity(points.len());
        for point in points {
            if let Some(last) = ring.last() {
                if (*last - point).length_squared() < EPSILON * EPSILON {
                    continue;
                }
            }
            ring.push(point);
        }

        if ring.len() >= 2 {
            let close_distance = (ring[0] - *ring.last().unwrap()).length_squared();
            if close_distance < EPSILON * EPSILON {
                ring.pop();
            }
        }

        if ring.len() < 3 {
            return None;
        }
        Some(Self::new(ring))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unsigned area enclosed by the loop.
    pub fn area(&self) -> f32 {
        signed_area(&self.points).abs()
    }

    /// Permissive point-in-polygon test: points on the boundary count as
    /// inside, so edges shared through curve subdivision do not open gaps.
    /// Handles non-convex loops.
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            if point_on_segment(p, a, b) {
                return true;
            }
            // ray cast toward +x
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) / (b.y - a.y);
                if a.x + t * (b.x - a.x) > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True when `self` is a hole nested inside `outer`: opposite winding
    /// and every point of `self` inside `outer`. The two loops being
    /// distinct is the caller's concern (loops are compared by index).
    pub fn is_hole_of(&self, outer: &Contour) -> bool {
        if self.clockwise == outer.clockwise {
            return false;
        }
        self.points.iter().all(|&p| outer.contains(p))
    }
}

/// Outline loops discovered for one character, in discovery order.
///
/// Empty for whitespace glyphs and for characters whose glyph failed to
/// resolve or load.
#[derive(Debug, Clone)]
pub struct CharacterOutline {
    pub character: char,
    pub contours: Vec<Contour>,
}

impl CharacterOutline {
    pub fn new(character: char) -> Self {
        Self {
            character,
            contours: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Shoelace signed area; positive for counter-clockwise loops (y up).
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let mut area = 0.0;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        area += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    area * 0.5
}

fn point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let ap = p - a;
    if ab.perp_dot(ap).abs() > EPSILON * ab.length().max(1.0) {
        return false;
    }
    let along = ap.dot(ab);
    along >= -EPSILON && along <= ab.length_squared() + EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn square_ccw(origin: Vec2, side: f32) -> Vec<Vec2> {
        vec![
            origin,
            origin + vec2(side, 0.0),
            origin + vec2(side, side),
            origin + vec2(0.0, side),
        ]
    }

    fn square_cw(origin: Vec2, side: f32) -> Vec<Vec2> {
        let mut points = square_ccw(origin, side);
        points.reverse();
        points
    }

    #[test]
    fn winding_follows_signed_area() {
        let ccw = Contour::new(square_ccw(Vec2::ZERO, 1.0));
        assert!(!ccw.clockwise);
        assert!(signed_area(&ccw.points) > 0.0);

        let cw = Contour::new(square_cw(Vec2::ZERO, 1.0));
        assert!(cw.clockwise);
        assert!(signed_area(&cw.points) < 0.0);
    }

    #[test]
    fn from_ring_drops_duplicate_closing_point() {
        let mut ring = square_ccw(Vec2::ZERO, 1.0);
        ring.push(ring[0]);
        let contour = Contour::from_ring(ring).expect("square ring is valid");
        assert_eq!(contour.len(), 4);
    }

    #[test]
    fn from_ring_rejects_degenerate_loops() {
        assert!(Contour::from_ring(vec![vec2(0.0, 0.0), vec2(1.0, 0.0)]).is_none());
        // collapses to a single point
        assert!(Contour::from_ring(vec![vec2(0.5, 0.5); 5]).is_none());
    }

    #[test]
    fn contains_handles_non_convex_loops() {
        // L-shaped loop; the notch at the upper right is outside
        let l_shape = Contour::new(vec![
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 1.0),
            vec2(1.0, 1.0),
            vec2(1.0, 2.0),
            vec2(0.0, 2.0),
        ]);
        assert!(l_shape.contains(vec2(0.5, 0.5)));
        assert!(l_shape.contains(vec2(0.5, 1.5)));
        assert!(!l_shape.contains(vec2(1.5, 1.5)));
        assert!(!l_shape.contains(vec2(3.0, 0.5)));
    }

    #[test]
    fn boundary_points_count_as_inside() {
        let square = Contour::new(square_ccw(Vec2::ZERO, 2.0));
        assert!(square.contains(vec2(0.0, 1.0))); // on an edge
        assert!(square.contains(vec2(0.0, 0.0))); // on a corner
    }

    #[test]
    fn hole_classification_needs_opposite_winding_and_containment() {
        let outer = Contour::new(square_cw(Vec2::ZERO, 10.0));
        let hole = Contour::new(square_ccw(vec2(3.0, 3.0), 4.0));
        assert!(hole.is_hole_of(&outer));

        // same winding as the outer loop: a sibling fill, not a hole
        let sibling = Contour::new(square_cw(vec2(3.0, 3.0), 4.0));
        assert!(!sibling.is_hole_of(&outer));

        // opposite winding but outside the outer loop
        let outside = Contour::new(square_ccw(vec2(20.0, 20.0), 4.0));
        assert!(!outside.is_hole_of(&outer));
    }
}
