//! The fixed library of shading effects and the helpers that apply them.
//!
//! Every effect is parameter-free: the same definition is shared by every
//! region it shades, and gradients use bounding-box units so they remap to
//! whatever shape they fill. A scene references effects by id and carries
//! their definitions once.

use crate::color::Color;
use crate::geometry::PathData;
use crate::scene::{BlendMode, Group, Node, Paint, Role, Shape, ShapeKind, Side, Style};

/// Whether an effect is used as a `filter` or as a gradient paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Filter,
    Gradient,
}

/// One reusable visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Fractal-noise multiply texture for cloth grain.
    FabricGrain,
    /// Blurred, offset, 30% alpha copy of the whole garment.
    SoftShadow,
    /// Tight drop shadow under the placket and buttons.
    PlacketShadow,
    /// Faint drop shadow under the logo.
    LogoShadow,
    /// Dark → light → dark across the torso.
    BodyVolume,
    /// Diagonal volume across one sleeve.
    SleeveVolume(Side),
    /// Top-down darkening for recessed seams (collar stand, cuffs, rib).
    InnerDepth,
    /// Shadow cast by the collar fold.
    CollarShadow,
    /// Wide blur for drag lines from the armpits.
    DrapeBlur,
    /// Narrow blur for waist creases.
    CreaseBlur,
    /// Very wide blur for chest highlight patches.
    HighlightBlur,
}

impl Effect {
    /// Every effect, in definition order.
    pub const LIBRARY: [Effect; 12] = [
        Effect::FabricGrain,
        Effect::SoftShadow,
        Effect::PlacketShadow,
        Effect::LogoShadow,
        Effect::BodyVolume,
        Effect::SleeveVolume(Side::Left),
        Effect::SleeveVolume(Side::Right),
        Effect::InnerDepth,
        Effect::CollarShadow,
        Effect::DrapeBlur,
        Effect::CreaseBlur,
        Effect::HighlightBlur,
    ];

    /// The SVG element id of the effect's definition.
    pub fn id(self) -> &'static str {
        match self {
            Self::FabricGrain => "fabricGrain",
            Self::SoftShadow => "softShadow",
            Self::PlacketShadow => "placketShadow",
            Self::LogoShadow => "logoShadow",
            Self::BodyVolume => "volumetricBody",
            Self::SleeveVolume(Side::Left) => "volumetricSleeveLeft",
            Self::SleeveVolume(Side::Right) => "volumetricSleeveRight",
            Self::InnerDepth => "innerDepth",
            Self::CollarShadow => "collarShadow",
            Self::DrapeBlur => "drapeBlur",
            Self::CreaseBlur => "creaseBlur",
            Self::HighlightBlur => "highlightBlur",
        }
    }

    pub fn kind(self) -> EffectKind {
        match self {
            Self::BodyVolume | Self::SleeveVolume(_) | Self::InnerDepth | Self::CollarShadow => {
                EffectKind::Gradient
            }
            _ => EffectKind::Filter,
        }
    }

    /// The effect's SVG definition, ready to go inside `<defs>`.
    pub fn definition(self) -> String {
        let id = self.id();
        match self {
            Self::FabricGrain => format!(
                "<filter id=\"{id}\" x=\"0%\" y=\"0%\" width=\"100%\" height=\"100%\">\
                 <feTurbulence type=\"fractalNoise\" baseFrequency=\"1.2\" numOctaves=\"4\" result=\"noise\"/>\
                 <feColorMatrix type=\"matrix\" values=\"0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0.08 0\" in=\"noise\" result=\"coloredNoise\"/>\
                 <feComposite operator=\"in\" in=\"coloredNoise\" in2=\"SourceGraphic\" result=\"composite\"/>\
                 <feBlend mode=\"multiply\" in=\"composite\" in2=\"SourceGraphic\"/>\
                 </filter>"
            ),
            Self::SoftShadow => format!(
                "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                 <feGaussianBlur in=\"SourceAlpha\" stdDeviation=\"6\"/>\
                 <feOffset dx=\"0\" dy=\"8\" result=\"offsetblur\"/>\
                 <feComponentTransfer><feFuncA type=\"linear\" slope=\"0.3\"/></feComponentTransfer>\
                 <feMerge><feMergeNode/><feMergeNode in=\"SourceGraphic\"/></feMerge>\
                 </filter>"
            ),
            Self::PlacketShadow => drop_shadow(id, 0.0, 1.0, 1.0, 0.3),
            Self::LogoShadow => drop_shadow(id, 1.0, 1.0, 1.0, 0.2),
            Self::BodyVolume => linear_gradient(
                id,
                (0, 0, 100, 0),
                &[
                    (0, "#000", 0.6),
                    (20, "#fff", 0.05),
                    (50, "#fff", 0.1),
                    (80, "#000", 0.1),
                    (100, "#000", 0.6),
                ],
            ),
            Self::SleeveVolume(side) => {
                let direction = match side {
                    Side::Left => (0, 0, 100, 100),
                    Side::Right => (100, 0, 0, 100),
                };
                linear_gradient(
                    id,
                    direction,
                    &[(0, "#000", 0.5), (50, "#fff", 0.1), (100, "#000", 0.4)],
                )
            }
            Self::InnerDepth => {
                linear_gradient(id, (0, 0, 0, 100), &[(0, "#000", 0.9), (100, "#000", 0.3)])
            }
            Self::CollarShadow => {
                linear_gradient(id, (0, 0, 0, 100), &[(0, "#000", 0.3), (100, "#000", 0.0)])
            }
            Self::DrapeBlur => blur(id, 12.0),
            Self::CreaseBlur => blur(id, 8.0),
            Self::HighlightBlur => blur(id, 20.0),
        }
    }
}

fn drop_shadow(id: &str, dx: f32, dy: f32, std_dev: f32, opacity: f32) -> String {
    format!(
        "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
         <feDropShadow dx=\"{dx}\" dy=\"{dy}\" stdDeviation=\"{std_dev}\" flood-opacity=\"{opacity}\"/>\
         </filter>"
    )
}

fn blur(id: &str, std_dev: f32) -> String {
    format!(
        "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
         <feGaussianBlur stdDeviation=\"{std_dev}\"/>\
         </filter>"
    )
}

/// Direction is `(x1, y1, x2, y2)` in percent; stops are `(offset %, color, opacity)`.
fn linear_gradient(id: &str, (x1, y1, x2, y2): (u8, u8, u8, u8), stops: &[(u8, &str, f32)]) -> String {
    let mut out = format!(
        "<linearGradient id=\"{id}\" x1=\"{x1}%\" y1=\"{y1}%\" x2=\"{x2}%\" y2=\"{y2}%\">"
    );
    for (offset, color, opacity) in stops {
        out.push_str(&format!(
            "<stop offset=\"{offset}%\" stop-color=\"{color}\" stop-opacity=\"{opacity}\"/>"
        ));
    }
    out.push_str("</linearGradient>");
    out
}

// ============================================================================
// Region shading
// ============================================================================

/// How a filled garment region is finished on top of its base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finish {
    pub grain_opacity: f32,
    pub grain_blend: BlendMode,
    /// Gradient composited in multiply mode over the region.
    pub volume: Option<Effect>,
    pub base_filter: Option<Effect>,
    pub base_opacity: Option<f32>,
}

impl Finish {
    pub fn body() -> Self {
        Self {
            grain_opacity: 0.5,
            grain_blend: BlendMode::Overlay,
            volume: Some(Effect::BodyVolume),
            base_filter: None,
            base_opacity: None,
        }
    }

    pub fn sleeve(side: Side) -> Self {
        Self {
            volume: Some(Effect::SleeveVolume(side)),
            ..Self::body()
        }
    }

    pub fn stripe() -> Self {
        Self {
            grain_opacity: 0.6,
            grain_blend: BlendMode::Multiply,
            volume: None,
            base_filter: None,
            base_opacity: Some(0.95),
        }
    }

    pub fn placket() -> Self {
        Self {
            grain_opacity: 0.5,
            grain_blend: BlendMode::Overlay,
            volume: None,
            base_filter: Some(Effect::PlacketShadow),
            base_opacity: None,
        }
    }

    /// Grain only; cuffs get their depth from [`inner_depth`].
    pub fn cuff() -> Self {
        Self {
            grain_opacity: 0.4,
            grain_blend: BlendMode::Multiply,
            volume: None,
            base_filter: None,
            base_opacity: None,
        }
    }

    pub fn collar() -> Self {
        Self {
            grain_opacity: 0.4,
            grain_blend: BlendMode::Multiply,
            volume: Some(Effect::CollarShadow),
            base_filter: None,
            base_opacity: None,
        }
    }
}

/// Shades one region: base fill, then fabric grain, then volume.
pub fn shade_region(role: Role, path: &PathData, color: &Color, finish: &Finish) -> Group {
    let mut base = Style::filled(color.clone());
    base.filter = finish.base_filter;
    base.opacity = finish.base_opacity;

    let grain = Style::filled(color.clone())
        .with_filter(Effect::FabricGrain)
        .with_opacity(finish.grain_opacity)
        .with_blend(finish.grain_blend);

    let mut children = vec![region(path, base), region(path, grain)];
    if let Some(volume) = finish.volume {
        children.push(region(
            path,
            Style::filled(volume).with_blend(BlendMode::Multiply),
        ));
    }

    Group {
        role: Some(role),
        style: Style::default(),
        children,
    }
}

/// Darkens a seam region with the inner-depth gradient.
pub fn inner_depth(path: &PathData, opacity: f32) -> Node {
    region(path, Style::filled(Effect::InnerDepth).with_opacity(opacity))
}

fn region(path: &PathData, style: Style) -> Node {
    Node::Shape(Shape {
        role: None,
        kind: ShapeKind::Path(path.clone()),
        style,
    })
}

impl From<Effect> for Paint {
    fn from(effect: Effect) -> Self {
        Paint::Effect(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn effect_ids_are_unique() {
        let ids: HashSet<_> = Effect::LIBRARY.iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), Effect::LIBRARY.len());
    }

    #[test]
    fn definitions_carry_their_ids() {
        for effect in Effect::LIBRARY {
            let def = effect.definition();
            assert!(def.contains(&format!("id=\"{}\"", effect.id())));
            match effect.kind() {
                EffectKind::Gradient => assert!(def.starts_with("<linearGradient")),
                EffectKind::Filter => assert!(def.starts_with("<filter")),
            }
        }
    }

    #[test]
    fn body_region_has_base_grain_and_volume() {
        let path = PathData::new().move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).close();
        let group = shade_region(Role::Torso, &path, &Color::new("#1e293b"), &Finish::body());

        assert_eq!(group.role, Some(Role::Torso));
        assert_eq!(group.children.len(), 3);
        let Node::Shape(volume) = &group.children[2] else {
            panic!("expected a shape");
        };
        assert_eq!(volume.style.fill, Some(Paint::Effect(Effect::BodyVolume)));
        assert_eq!(volume.style.blend, Some(BlendMode::Multiply));
    }

    #[test]
    fn stripe_region_skips_volume() {
        let path = PathData::new().move_to(0.0, 0.0).line_to(10.0, 0.0).close();
        let group = shade_region(Role::ChestStripe, &path, &Color::new("#fff"), &Finish::stripe());
        assert_eq!(group.children.len(), 2);
    }
}
