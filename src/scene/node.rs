use crate::color::Color;
use crate::geometry::{PathData, Point, Rect};
use crate::shading::Effect;

use super::Role;

/// One element of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Shape(Shape),
    Image(ImageNode),
    Text(TextNode),
}

impl Node {
    pub fn group(role: impl Into<Option<Role>>, style: Style, children: Vec<Node>) -> Self {
        Self::Group(Group {
            role: role.into(),
            style,
            children,
        })
    }

    pub fn shape(role: impl Into<Option<Role>>, kind: ShapeKind, style: Style) -> Self {
        Self::Shape(Shape {
            role: role.into(),
            kind,
            style,
        })
    }

    /// An unnamed path.
    pub fn path(path: PathData, style: Style) -> Self {
        Self::shape(None, ShapeKind::Path(path), style)
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Group(g) => g.role,
            Self::Shape(s) => s.role,
            Self::Image(i) => i.role,
            Self::Text(t) => t.role,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Group(g) => &g.children,
            _ => &[],
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            Self::Group(g) => Some(&g.style),
            Self::Shape(s) => Some(&s.style),
            Self::Image(i) => Some(&i.style),
            Self::Text(_) => None,
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub role: Option<Role>,
    pub style: Style,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub role: Option<Role>,
    pub kind: ShapeKind,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Path(PathData),
    Rect { bounds: Rect, corner_radius: f32 },
    Circle { center: Point, radius: f32 },
    Ellipse { center: Point, rx: f32, ry: f32 },
}

/// An external bitmap or vector placed in a box, aspect ratio preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub role: Option<Role>,
    pub href: String,
    pub bounds: Rect,
    pub style: Style,
}

/// A single centered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub role: Option<Role>,
    pub position: Point,
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub fill: Color,
    pub bold: bool,
}

// ============================================================================
// Style
// ============================================================================

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(Color),
    /// A gradient from the effect library.
    Effect(Effect),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Color(Color::new(color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Multiply,
    Overlay,
    Screen,
}

impl BlendMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Multiply => "multiply",
            Self::Overlay => "overlay",
            Self::Screen => "screen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Rotation in degrees about a pivot.
    Rotate { degrees: f32, pivot: Point },
    Translate { dx: f32, dy: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    pub opacity: Option<f32>,
    /// Dash and gap lengths.
    pub dash: Option<(f32, f32)>,
    pub round_cap: bool,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
            opacity: None,
            dash: None,
            round_cap: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn dashed(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn round_cap(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

/// Presentation attributes of a node. Unset fields inherit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: Option<f32>,
    pub blend: Option<BlendMode>,
    pub filter: Option<Effect>,
    pub transform: Option<Transform>,
}

impl Style {
    pub fn filled(paint: impl Into<Paint>) -> Self {
        Self {
            fill: Some(paint.into()),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = Some(blend);
        self
    }

    pub fn with_filter(mut self, filter: Effect) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}
