//! The render-ready scene: an ordered stack of layers of styled nodes.
//!
//! A [`Scene`] is pure data. It is produced by [`assemble`] from a
//! configuration, inspected by tests through roles, and serialized with
//! [`Scene::to_svg`].

mod assemble;
mod node;
mod svg;

pub use assemble::{assemble, assemble_with_theme};
pub use node::{
    BlendMode, Group, ImageNode, Node, Paint, Shape, ShapeKind, Stroke, Style, TextNode, Transform,
};

use crate::geometry::Rect;
use crate::shading::Effect;

/// Left or right, from the viewer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A band that carries tipping lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimBand {
    Cuff(Side),
    CollarTip(Side),
    NeckRib,
}

/// What a node depicts. Roles are how callers find parts of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    InnerBack,
    Label,
    InnerNeck,
    Torso,
    HemStitch,
    Sleeve(Side),
    Cuff(Side),
    SleeveOpening(Side),
    ChestStripe,
    Drape,
    Logo,
    BackRib,
    NeckRib,
    CollarStand,
    CollarLeaf(Side),
    Placket,
    Button,
    TrimLines(TrimBand),
    TrimLine,
}

impl Role {
    /// Kebab-case name, written to the `data-role` attribute.
    pub fn name(&self) -> String {
        match self {
            Self::InnerBack => "inner-back".into(),
            Self::Label => "label".into(),
            Self::InnerNeck => "inner-neck".into(),
            Self::Torso => "torso".into(),
            Self::HemStitch => "hem-stitch".into(),
            Self::Sleeve(side) => format!("sleeve-{}", side.name()),
            Self::Cuff(side) => format!("cuff-{}", side.name()),
            Self::SleeveOpening(side) => format!("sleeve-opening-{}", side.name()),
            Self::ChestStripe => "chest-stripe".into(),
            Self::Drape => "drape".into(),
            Self::Logo => "logo".into(),
            Self::BackRib => "back-rib".into(),
            Self::NeckRib => "neck-rib".into(),
            Self::CollarStand => "collar-stand".into(),
            Self::CollarLeaf(side) => format!("collar-leaf-{}", side.name()),
            Self::Placket => "placket".into(),
            Self::Button => "button".into(),
            Self::TrimLines(TrimBand::Cuff(side)) => format!("trim-cuff-{}", side.name()),
            Self::TrimLines(TrimBand::CollarTip(side)) => format!("trim-collar-{}", side.name()),
            Self::TrimLines(TrimBand::NeckRib) => "trim-neck-rib".into(),
            Self::TrimLine => "trim-line".into(),
        }
    }
}

// ============================================================================
// Layers
// ============================================================================

/// Scene layers, declared back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Interior,
    Torso,
    Sleeves,
    ChestStripe,
    Drape,
    Logo,
    Neckline,
}

impl LayerKind {
    /// Fixed paint order, back to front.
    pub const Z_ORDER: [LayerKind; 7] = [
        LayerKind::Interior,
        LayerKind::Torso,
        LayerKind::Sleeves,
        LayerKind::ChestStripe,
        LayerKind::Drape,
        LayerKind::Logo,
        LayerKind::Neckline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Torso => "torso",
            Self::Sleeves => "sleeves",
            Self::ChestStripe => "chest-stripe",
            Self::Drape => "drape",
            Self::Logo => "logo",
            Self::Neckline => "neckline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub nodes: Vec<Node>,
}

impl Layer {
    pub fn new(kind: LayerKind, nodes: Vec<Node>) -> Self {
        Self { kind, nodes }
    }
}

// ============================================================================
// Scene
// ============================================================================

/// A complete garment ready to serialize or rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub view_box: Rect,
    /// Definitions referenced anywhere in the scene.
    pub effects: Vec<Effect>,
    /// Filter applied to the whole garment, if any.
    pub shadow: Option<Effect>,
    /// Present layers in paint order.
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn has_layer(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|layer| layer.kind).collect()
    }

    /// Every node of every layer, depth first, in paint order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for layer in &self.layers {
            for node in &layer.nodes {
                collect(node, &mut out);
            }
        }
        out
    }

    /// The first node in paint order carrying `role`.
    pub fn find(&self, role: Role) -> Option<&Node> {
        self.nodes().into_iter().find(|node| node.role() == Some(role))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.find(role).is_some()
    }

    pub fn count(&self, role: Role) -> usize {
        self.nodes()
            .into_iter()
            .filter(|node| node.role() == Some(role))
            .count()
    }

    /// A copy of the scene with `kind` removed.
    pub fn without_layer(&self, kind: LayerKind) -> Scene {
        Scene {
            layers: self
                .layers
                .iter()
                .filter(|layer| layer.kind != kind)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    out.push(node);
    for child in node.children() {
        collect(child, out);
    }
}
