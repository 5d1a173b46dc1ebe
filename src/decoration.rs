//! Trim (tipping) line generation.
//!
//! Cuffs, polo collar tips and the crew neck rib all decorate a band the same
//! way: `count` lines spread evenly *inside* the band at ratios
//! `i / (count + 1)`, so no line ever sits on a band edge. The only thing that
//! differs per band is the edge representation, which [`BandEdge`] abstracts.
//!
//! # Example
//!
//! ```
//! use tailor_renderer::decoration::trim_lines;
//! use tailor_renderer::geometry::{Curve, Point};
//!
//! let hem = Curve::line(Point::new(0.0, 0.0), Point::new(50.0, 0.0));
//! let top = Curve::line(Point::new(0.0, 8.0), Point::new(50.0, 8.0));
//!
//! let lines = trim_lines(&hem, &top, 3);
//! let heights: Vec<f32> = lines.iter().map(|l| l.from().y).collect();
//! assert_eq!(heights, vec![2.0, 4.0, 6.0]);
//! ```

use crate::color::Color;
use crate::config::MAX_TRIM_LINES;
use crate::geometry::{Band, Curve};
use crate::scene::{Node, Role, Shape, ShapeKind, Side, Stroke, Style, TrimBand};

/// An edge of a band that can be blended towards the opposite edge.
pub trait BandEdge: Sized {
    /// Returns the edge `t` of the way from `self` to `other`.
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl BandEdge for Curve {
    /// Segments blend their endpoints. Curves blend every control point, so
    /// the result stays parallel to both edges.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        match (*self, *other) {
            (Curve::Line { from: a0, to: a1 }, Curve::Line { from: b0, to: b1 }) => {
                Curve::line(a0.lerp(b0, t), a1.lerp(b1, t))
            }
            _ => {
                let (a0, ac, a1) = self.as_quad();
                let (b0, bc, b1) = other.as_quad();
                Curve::quad(a0.lerp(b0, t), ac.lerp(bc, t), a1.lerp(b1, t))
            }
        }
    }
}

/// Spreads `count` lines evenly inside the band between `start` and `end`.
///
/// Lines are ordered from `start` towards `end`. `count` is clamped to 3;
/// zero yields no lines at all.
pub fn trim_lines<E: BandEdge>(start: &E, end: &E, count: u32) -> Vec<E> {
    let count = count.min(MAX_TRIM_LINES);
    let divisions = (count + 1) as f32;
    (1..=count)
        .map(|i| start.interpolate(end, i as f32 / divisions))
        .collect()
}

// ============================================================================
// TrimLineSet
// ============================================================================

/// Stroke widths of the tipping lines on each kind of band.
const CUFF_TRIM_WIDTH: f32 = 1.6;
const COLLAR_TRIM_WIDTH: f32 = 2.0;
const RIB_TRIM_WIDTH: f32 = 1.5;

/// The styled tipping lines of one band.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimLineSet {
    pub band: TrimBand,
    pub lines: Vec<Curve>,
    pub color: Color,
    pub width: f32,
}

impl TrimLineSet {
    /// Generates the tipping lines for `band`.
    pub fn generate(kind: TrimBand, band: &Band, count: u32, color: &Color) -> Self {
        let width = match kind {
            TrimBand::Cuff(_) => CUFF_TRIM_WIDTH,
            TrimBand::CollarTip(_) => COLLAR_TRIM_WIDTH,
            TrimBand::NeckRib => RIB_TRIM_WIDTH,
        };
        Self {
            band: kind,
            lines: trim_lines(&band.start, &band.end, count),
            color: color.clone(),
            width,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Converts the set into a scene group, or `None` when there is nothing to draw.
    pub fn into_node(self) -> Option<Node> {
        if self.lines.is_empty() {
            return None;
        }
        let stroke = Stroke::new(self.color, self.width).with_opacity(0.9);
        let children = self
            .lines
            .into_iter()
            .map(|line| {
                Node::Shape(Shape {
                    role: Some(Role::TrimLine),
                    kind: ShapeKind::Path(line.to_path()),
                    style: Style::stroked(stroke.clone()),
                })
            })
            .collect();
        Some(Node::group(Role::TrimLines(self.band), Style::default(), children))
    }
}

/// Cuff trim for one side.
pub fn cuff_trim(side: Side, band: &Band, count: u32, color: &Color) -> TrimLineSet {
    TrimLineSet::generate(TrimBand::Cuff(side), band, count, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn cuff_band() -> (Curve, Curve) {
        (
            Curve::line(Point::new(40.0, 190.0), Point::new(90.0, 215.0)),
            Curve::line(Point::new(44.0, 183.0), Point::new(94.0, 208.0)),
        )
    }

    fn rib_band() -> (Curve, Curve) {
        (
            Curve::quad(Point::new(140.0, 83.0), Point::new(250.0, 128.0), Point::new(360.0, 83.0)),
            Curve::quad(Point::new(140.0, 97.0), Point::new(250.0, 142.0), Point::new(360.0, 97.0)),
        )
    }

    #[test]
    fn count_matches_requested_lines() {
        let (start, end) = cuff_band();
        for count in 0..=3 {
            assert_eq!(trim_lines(&start, &end, count).len(), count as usize);
        }
    }

    #[test]
    fn count_above_three_is_clamped() {
        let (start, end) = rib_band();
        assert_eq!(trim_lines(&start, &end, 9).len(), 3);
    }

    #[test]
    fn no_line_touches_a_band_edge() {
        for (start, end) in [cuff_band(), rib_band()] {
            for count in 1..=3 {
                for line in trim_lines(&start, &end, count) {
                    assert_ne!(line, start);
                    assert_ne!(line, end);
                    assert_ne!(line.from(), start.from());
                    assert_ne!(line.from(), end.from());
                }
            }
        }
    }

    #[test]
    fn single_line_is_centered() {
        let (start, end) = rib_band();
        let lines = trim_lines(&start, &end, 1);
        let (_, ctrl, _) = lines[0].as_quad();
        assert_eq!(ctrl, Point::new(250.0, 135.0));
    }

    #[test]
    fn curved_band_lines_stay_curves_parallel_to_the_band() {
        let (start, end) = rib_band();
        let lines = trim_lines(&start, &end, 2);
        for line in &lines {
            assert!(matches!(line, Curve::Quad { .. }));
            let (from, ctrl, _) = line.as_quad();
            // Sag relative to the endpoints matches the band edges.
            assert!((ctrl.y - from.y - 45.0).abs() < 1e-3);
        }
    }

    #[test]
    fn straight_band_lines_stay_segments() {
        let (start, end) = cuff_band();
        let lines = trim_lines(&start, &end, 1);
        assert_eq!(
            lines[0],
            Curve::line(Point::new(42.0, 186.5), Point::new(92.0, 211.5))
        );
    }

    #[test]
    fn empty_set_renders_nothing() {
        let (start, end) = cuff_band();
        let set = cuff_trim(Side::Left, &Band { start, end }, 0, &Color::new("#fff"));
        assert!(set.is_empty());
        assert!(set.into_node().is_none());
    }

    #[test]
    fn set_becomes_a_group_of_trim_lines() {
        let (start, end) = cuff_band();
        let set = cuff_trim(Side::Right, &Band { start, end }, 2, &Color::new("#f59e0b"));
        let Some(Node::Group(group)) = set.into_node() else {
            panic!("expected a group");
        };
        assert_eq!(group.role, Some(Role::TrimLines(TrimBand::Cuff(Side::Right))));
        assert_eq!(group.children.len(), 2);
    }
}
