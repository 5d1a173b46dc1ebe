//! Path primitives in garment view-box coordinates.

use std::fmt;

/// A point in the 500 x 600 garment view box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Reflects the point across the vertical line `x = axis_x`.
    pub fn mirrored(self, axis_x: f32) -> Point {
        Point::new(2.0 * axis_x - self.x, self.y)
    }

    pub fn translated(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }
}

/// An axis-aligned rectangle in view-box units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ============================================================================
// Paths
// ============================================================================

/// One drawing command of a [`PathData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    Close,
}

impl PathCommand {
    fn map(self, f: &impl Fn(Point) -> Point) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::QuadTo { ctrl, to } => Self::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            Self::Close => Self::Close,
        }
    }
}

/// An outline built from absolute move/line/quadratic commands.
///
/// Paths are built by value:
///
/// ```
/// use tailor_renderer::geometry::PathData;
///
/// let path = PathData::new()
///     .move_to(140.0, 90.0)
///     .quad_to(250.0, 110.0, 360.0, 90.0)
///     .close();
/// assert_eq!(path.to_string(), "M 140,90 Q 250,110 360,90 Z");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over every point of the path, control points included.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { ctrl, to } => vec![ctrl, to],
            PathCommand::Close => Vec::new(),
        })
    }

    /// Applies `f` to every point of the path.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            commands: self.commands.iter().map(|cmd| cmd.map(&f)).collect(),
        }
    }

    /// Reflects the path across the vertical line `x = axis_x`.
    pub fn mirrored(&self, axis_x: f32) -> Self {
        self.map_points(|p| p.mirrored(axis_x))
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        self.map_points(|p| p.translated(dx, dy))
    }

    /// Bounding box of all points, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.points();
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

impl fmt::Display for PathData {
    /// Formats the path as SVG path data (`M 140,90 Q 250,110 360,90 Z`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M {}", FmtPoint(*p))?,
                PathCommand::LineTo(p) => write!(f, "L {}", FmtPoint(*p))?,
                PathCommand::QuadTo { ctrl, to } => {
                    write!(f, "Q {} {}", FmtPoint(*ctrl), FmtPoint(*to))?
                }
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

struct FmtPoint(Point);

impl fmt::Display for FmtPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", fmt_number(self.0.x), fmt_number(self.0.y))
    }
}

/// Formats a coordinate with at most three decimals and no negative zero.
pub(crate) fn fmt_number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

// ============================================================================
// Curves
// ============================================================================

/// An open stroke: a straight segment or a quadratic curve.
///
/// Curves are the edges of trim bands and the trim lines themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Line { from: Point, to: Point },
    Quad { from: Point, ctrl: Point, to: Point },
}

impl Curve {
    pub const fn line(from: Point, to: Point) -> Self {
        Self::Line { from, to }
    }

    pub const fn quad(from: Point, ctrl: Point, to: Point) -> Self {
        Self::Quad { from, ctrl, to }
    }

    pub fn from(&self) -> Point {
        match *self {
            Self::Line { from, .. } | Self::Quad { from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            Self::Line { to, .. } | Self::Quad { to, .. } => to,
        }
    }

    /// Control points as a quadratic; a segment's control sits at its midpoint.
    pub fn as_quad(&self) -> (Point, Point, Point) {
        match *self {
            Self::Line { from, to } => (from, from.midpoint(to), to),
            Self::Quad { from, ctrl, to } => (from, ctrl, to),
        }
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        match *self {
            Self::Line { from, to } => Self::Line {
                from: f(from),
                to: f(to),
            },
            Self::Quad { from, ctrl, to } => Self::Quad {
                from: f(from),
                ctrl: f(ctrl),
                to: f(to),
            },
        }
    }

    pub fn mirrored(&self, axis_x: f32) -> Self {
        self.map_points(|p| p.mirrored(axis_x))
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        self.map_points(|p| p.translated(dx, dy))
    }

    pub fn to_path(&self) -> PathData {
        match *self {
            Self::Line { from, to } => PathData::new().move_to(from.x, from.y).line_to(to.x, to.y),
            Self::Quad { from, ctrl, to } => PathData::new()
                .move_to(from.x, from.y)
                .quad_to(ctrl.x, ctrl.y, to.x, to.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_formats_as_svg_data() {
        let path = PathData::new()
            .move_to(40.0, 190.0)
            .line_to(90.0, 215.0)
            .quad_to(65.0, 205.5, 40.0, 190.0)
            .close();
        assert_eq!(path.to_string(), "M 40,190 L 90,215 Q 65,205.5 40,190 Z");
    }

    #[test]
    fn mirroring_twice_is_identity() {
        let path = PathData::new().move_to(140.0, 90.0).quad_to(120.0, 95.0, 110.0, 105.0);
        assert_eq!(path.mirrored(250.0).mirrored(250.0), path);
        assert_eq!(
            path.mirrored(250.0).commands()[0],
            PathCommand::MoveTo(Point::new(360.0, 90.0))
        );
    }

    #[test]
    fn bounds_cover_control_points() {
        let path = PathData::new().move_to(140.0, 90.0).quad_to(250.0, 135.0, 360.0, 90.0);
        assert_eq!(path.bounds(), Some(Rect::new(140.0, 90.0, 220.0, 45.0)));
        assert_eq!(PathData::new().bounds(), None);
    }

    #[test]
    fn number_formatting_is_stable() {
        assert_eq!(fmt_number(112.000_01), "112");
        assert_eq!(fmt_number(-0.0001), "0");
        assert_eq!(fmt_number(117.5), "117.5");
    }

    #[test]
    fn segment_promotes_to_quad_through_its_midpoint() {
        let line = Curve::line(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(line.as_quad().1, Point::new(5.0, 10.0));
    }
}
