//! Builds a [`Scene`] from a configuration.
//!
//! Layers are always emitted in [`LayerKind::Z_ORDER`]. Optional layers are
//! left out entirely rather than emitted empty: the chest stripe only when
//! enabled, the logo only when an asset is set.

use log::debug;

use super::node::{BlendMode, ImageNode, Node, ShapeKind, Stroke, Style, TextNode, Transform};
use super::{Layer, LayerKind, Role, Scene, Side, TrimBand};
use crate::color::Color;
use crate::config::{GarmentConfig, LogoAsset};
use crate::decoration::{TrimLineSet, cuff_trim};
use crate::geometry::{
    self, Band, CrewNeck, Curve, GarmentGeometry, LogoSlot, Neckline, Point, PoloNeck, Rect,
    SleeveGeometry, VIEW_BOX,
};
use crate::shading::{Effect, Finish, inner_depth, shade_region};
use crate::theme::Theme;

const LABEL_BOX: Rect = Rect::new(235.0, 65.0, 30.0, 15.0);
const LABEL_TEXT_POSITION: Point = Point::new(250.0, 75.0);

/// Assembles `config` with the default theme.
///
/// ```
/// use tailor_renderer::GarmentConfig;
/// use tailor_renderer::scene::{assemble, LayerKind, Role};
///
/// let scene = assemble(&GarmentConfig::new());
/// assert_eq!(scene.layers[0].kind, LayerKind::Interior);
/// assert!(scene.contains(Role::Placket));
/// ```
pub fn assemble(config: &GarmentConfig) -> Scene {
    assemble_with_theme(config, &Theme::default())
}

/// Assembles `config` into a layered scene.
///
/// Pure: equal inputs give equal scenes.
pub fn assemble_with_theme(config: &GarmentConfig, theme: &Theme) -> Scene {
    let config = config.clamped();
    let geometry = geometry::build(&config);

    let mut layers = Vec::with_capacity(LayerKind::Z_ORDER.len());
    for kind in LayerKind::Z_ORDER {
        let nodes = match kind {
            LayerKind::Interior => Some(interior(&geometry, &config, theme)),
            LayerKind::Torso => Some(torso(&geometry, &config, theme)),
            LayerKind::Sleeves => Some(sleeves(&geometry, &config)),
            LayerKind::ChestStripe => config
                .chest_stripe_enabled
                .then(|| chest_stripe(&geometry, &config)),
            LayerKind::Drape => Some(drape()),
            LayerKind::Logo => config
                .logo_asset
                .as_ref()
                .map(|asset| logo(&geometry.logo_slot, asset)),
            LayerKind::Neckline => Some(neckline(&geometry.neckline, &config, theme)),
        };
        if let Some(nodes) = nodes {
            layers.push(Layer::new(kind, nodes));
        }
    }

    debug!(
        "assembled {:?} garment: {} layers, {} trim lines per band",
        config.garment_variant,
        layers.len(),
        config.trim_line_count
    );

    Scene {
        view_box: VIEW_BOX,
        effects: Effect::LIBRARY.to_vec(),
        shadow: theme.drop_shadow.then_some(Effect::SoftShadow),
        layers,
    }
}

// ============================================================================
// Body layers
// ============================================================================

fn interior(geometry: &GarmentGeometry, config: &GarmentConfig, theme: &Theme) -> Vec<Node> {
    let label = Node::group(
        Role::Label,
        Style::default(),
        vec![
            Node::shape(
                None,
                ShapeKind::Rect {
                    bounds: LABEL_BOX,
                    corner_radius: 2.0,
                },
                Style::filled(theme.label_fill.clone()).with_opacity(0.8),
            ),
            Node::Text(TextNode {
                role: None,
                position: LABEL_TEXT_POSITION,
                content: theme.label_text.clone(),
                font_size: 6.0,
                font_family: "Arial".to_string(),
                fill: theme.label_text_color.clone(),
                bold: true,
            }),
        ],
    );

    vec![
        Node::shape(
            Role::InnerBack,
            ShapeKind::Path(geometry.inner_back.clone()),
            Style::filled(theme.interior.clone()),
        ),
        label,
        Node::shape(
            Role::InnerNeck,
            ShapeKind::Path(geometry.inner_neck.clone()),
            Style::filled(config.base_color.brightness(0.6)),
        ),
    ]
}

fn torso(geometry: &GarmentGeometry, config: &GarmentConfig, theme: &Theme) -> Vec<Node> {
    vec![
        shade_region(Role::Torso, &geometry.torso, &config.base_color, &Finish::body()).into(),
        Node::shape(
            Role::HemStitch,
            ShapeKind::Path(geometry.hem_stitch.to_path()),
            Style::stroked(Stroke::new(theme.stitch.clone(), 1.0).dashed(3.0, 3.0))
                .with_opacity(0.3),
        ),
    ]
}

fn sleeves(geometry: &GarmentGeometry, config: &GarmentConfig) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (side, sleeve) in [
        (Side::Left, &geometry.left_sleeve),
        (Side::Right, &geometry.right_sleeve),
    ] {
        nodes.extend(sleeve_nodes(side, sleeve, config));
    }
    nodes
}

fn sleeve_nodes(side: Side, sleeve: &SleeveGeometry, config: &GarmentConfig) -> Vec<Node> {
    let mut nodes = vec![
        shade_region(
            Role::Sleeve(side),
            &sleeve.outline,
            &config.sleeve_color,
            &Finish::sleeve(side),
        )
        .into(),
    ];

    let mut cuff = shade_region(
        Role::Cuff(side),
        &sleeve.cuff,
        &config.collar_color,
        &Finish::cuff(),
    );
    cuff.children.push(inner_depth(&sleeve.cuff, 0.25));
    nodes.push(cuff.into());

    if let Some(trim) = cuff_trim(
        side,
        &sleeve.cuff_band,
        config.trim_line_count,
        &config.accent_color,
    )
    .into_node()
    {
        nodes.push(trim);
    }

    nodes.push(Node::shape(
        Role::SleeveOpening(side),
        ShapeKind::Path(sleeve.opening.clone()),
        Style::filled("#000").with_opacity(0.4),
    ));
    nodes
}

fn chest_stripe(geometry: &GarmentGeometry, config: &GarmentConfig) -> Vec<Node> {
    vec![
        shade_region(
            Role::ChestStripe,
            &geometry.chest_stripe,
            &config.accent_color,
            &Finish::stripe(),
        )
        .into(),
    ]
}

/// Fixed drag lines, waist bunching and chest highlights.
fn drape() -> Vec<Node> {
    let drag = |curve: Curve, width: f32, blur: Effect, opacity: f32| {
        Node::path(
            curve.to_path(),
            Style::stroked(Stroke::new("#000", width))
                .with_filter(blur)
                .with_opacity(opacity),
        )
    };
    let fold = |from: (f32, f32), ctrl: (f32, f32), to: (f32, f32)| {
        Curve::quad(
            Point::new(from.0, from.1),
            Point::new(ctrl.0, ctrl.1),
            Point::new(to.0, to.1),
        )
    };
    let highlight = |cx: f32| {
        Node::shape(
            None,
            ShapeKind::Ellipse {
                center: Point::new(cx, 180.0),
                rx: 40.0,
                ry: 30.0,
            },
            Style::filled("#fff")
                .with_filter(Effect::HighlightBlur)
                .with_opacity(0.1)
                .with_blend(BlendMode::Screen),
        )
    };

    vec![Node::group(
        Role::Drape,
        Style::default()
            .with_opacity(0.5)
            .with_blend(BlendMode::Multiply),
        vec![
            // Armpit drag lines.
            drag(fold((140.0, 160.0), (180.0, 220.0), (220.0, 280.0)), 15.0, Effect::DrapeBlur, 0.4),
            drag(fold((360.0, 160.0), (320.0, 220.0), (280.0, 280.0)), 15.0, Effect::DrapeBlur, 0.4),
            // Waist bunching.
            drag(fold((120.0, 400.0), (180.0, 420.0), (240.0, 400.0)), 8.0, Effect::CreaseBlur, 0.3),
            drag(fold((380.0, 400.0), (320.0, 420.0), (260.0, 400.0)), 8.0, Effect::CreaseBlur, 0.3),
            highlight(190.0),
            highlight(310.0),
        ],
    )]
}

fn logo(slot: &LogoSlot, asset: &LogoAsset) -> Vec<Node> {
    vec![Node::Image(ImageNode {
        role: Some(Role::Logo),
        href: asset.href().to_string(),
        bounds: slot.bounds(),
        style: Style::default()
            .with_transform(Transform::Rotate {
                degrees: slot.rotation,
                pivot: slot.pivot,
            })
            .with_filter(Effect::LogoShadow),
    })]
}

// ============================================================================
// Neckline
// ============================================================================

fn neckline(neckline: &Neckline, config: &GarmentConfig, theme: &Theme) -> Vec<Node> {
    match neckline {
        Neckline::Crew(crew) => crew_neck(crew, config),
        Neckline::Polo(polo) => polo_neck(polo, config, theme),
    }
}

fn crew_neck(crew: &CrewNeck, config: &GarmentConfig) -> Vec<Node> {
    let rib_stroke = |color: Color| Stroke::new(color, crew.rib_height);

    let mut nodes = vec![
        Node::shape(
            Role::BackRib,
            ShapeKind::Path(crew.back_rib.to_path()),
            Style::stroked(rib_stroke(config.collar_color.brightness(0.8))),
        ),
        Node::shape(
            Role::NeckRib,
            ShapeKind::Path(crew.front_rib.to_path()),
            Style::stroked(rib_stroke(config.collar_color.clone()).round_cap()),
        ),
        // Knit ribbing.
        Node::path(
            crew.front_rib.to_path(),
            Style::stroked(rib_stroke(Color::new("#fff")).dashed(2.0, 3.0))
                .with_opacity(0.1)
                .with_blend(BlendMode::Overlay),
        ),
        Node::path(
            crew.front_rib.to_path(),
            Style::stroked(Stroke::new(Effect::InnerDepth, crew.rib_height)).with_opacity(0.15),
        ),
    ];

    nodes.extend(trim(
        TrimBand::NeckRib,
        &crew.rib_band,
        config.trim_line_count,
        &config.accent_color,
    ));
    nodes
}

fn polo_neck(polo: &PoloNeck, config: &GarmentConfig, theme: &Theme) -> Vec<Node> {
    let placket = &polo.placket;
    let stitch = |opacity: f32| {
        Style::stroked(Stroke::new(theme.stitch.clone(), 0.5)).with_opacity(opacity)
    };

    let mut placket_group = shade_region(
        Role::Placket,
        &placket.outline,
        &config.base_color,
        &Finish::placket(),
    );
    placket_group.children.push(Node::shape(
        None,
        ShapeKind::Rect {
            bounds: placket.stitch_box,
            corner_radius: 0.0,
        },
        stitch(0.3),
    ));
    for line in &placket.stitch_lines {
        placket_group
            .children
            .push(Node::path(line.to_path(), stitch(0.1)));
    }

    let mut nodes: Vec<Node> = vec![placket_group.into()];
    nodes.extend(
        placket
            .buttons
            .iter()
            .map(|button| button_node(button.center, button.radius, config, theme)),
    );

    let mut collar = vec![
        Node::shape(
            Role::CollarStand,
            ShapeKind::Path(polo.stand.clone()),
            Style::filled(Effect::InnerDepth).with_opacity(0.3),
        ),
        shade_region(
            Role::CollarLeaf(Side::Left),
            &polo.left_leaf.outline,
            &config.collar_color,
            &Finish::collar(),
        )
        .into(),
        shade_region(
            Role::CollarLeaf(Side::Right),
            &polo.right_leaf.outline,
            &config.collar_color,
            &Finish::collar(),
        )
        .into(),
    ];
    for (side, leaf) in [(Side::Left, &polo.left_leaf), (Side::Right, &polo.right_leaf)] {
        collar.extend(trim(
            TrimBand::CollarTip(side),
            &leaf.tip_band,
            config.trim_line_count,
            &config.accent_color,
        ));
    }

    nodes.push(Node::group(
        None,
        Style::default().with_filter(Effect::SoftShadow),
        collar,
    ));
    nodes
}

fn button_node(center: Point, radius: f32, config: &GarmentConfig, theme: &Theme) -> Node {
    let thread = |from: Point, to: Point| {
        Node::path(
            Curve::line(from, to).to_path(),
            Style::stroked(Stroke::new(theme.thread.clone(), 1.0)),
        )
    };

    Node::group(
        Role::Button,
        Style::default().with_filter(Effect::PlacketShadow),
        vec![
            Node::shape(
                None,
                ShapeKind::Circle { center, radius },
                Style::filled(config.button_color.clone()),
            ),
            Node::shape(
                None,
                ShapeKind::Circle {
                    center,
                    radius: radius - 1.0,
                },
                Style::stroked(Stroke::new("#000", 1.0).with_opacity(0.1)),
            ),
            Node::shape(
                None,
                ShapeKind::Circle {
                    center: center.translated(-2.0, -2.0),
                    radius: 2.0,
                },
                Style::filled("#fff").with_opacity(0.4),
            ),
            thread(center.translated(-2.0, 0.0), center.translated(2.0, 0.0)),
            thread(center.translated(0.0, -2.0), center.translated(0.0, 2.0)),
        ],
    )
}

fn trim(kind: TrimBand, band: &Band, count: u32, color: &Color) -> Option<Node> {
    TrimLineSet::generate(kind, band, count, color).into_node()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GarmentVariant;
    use crate::scene::Paint;

    fn polo() -> GarmentConfig {
        GarmentConfig::new()
    }

    fn crew() -> GarmentConfig {
        GarmentConfig::new().with_variant(GarmentVariant::Crew)
    }

    fn trim_lines_in(scene: &Scene, band: TrimBand) -> usize {
        scene
            .find(Role::TrimLines(band))
            .map(|node| node.children().len())
            .unwrap_or(0)
    }

    #[test]
    fn default_polo_layers_in_order() {
        let scene = assemble(&polo());
        assert_eq!(
            scene.layer_kinds(),
            vec![
                LayerKind::Interior,
                LayerKind::Torso,
                LayerKind::Sleeves,
                LayerKind::Drape,
                LayerKind::Neckline,
            ]
        );
    }

    #[test]
    fn default_polo_has_collar_placket_and_three_buttons() {
        let scene = assemble(&polo());
        assert!(scene.contains(Role::CollarLeaf(Side::Left)));
        assert!(scene.contains(Role::CollarLeaf(Side::Right)));
        assert!(scene.contains(Role::Placket));
        assert_eq!(scene.count(Role::Button), 3);
        assert_eq!(scene.count(Role::TrimLine), 0);
        assert!(!scene.contains(Role::Logo));
    }

    #[test]
    fn crew_with_trim_and_stripe() {
        let config = crew()
            .with_trim_line_count(2)
            .with_chest_stripe(true)
            .with_accent_color("#f59e0b");
        let scene = assemble(&config);

        assert!(scene.contains(Role::NeckRib));
        assert!(!scene.contains(Role::Placket));
        assert_eq!(scene.count(Role::Button), 0);
        assert_eq!(trim_lines_in(&scene, TrimBand::Cuff(Side::Left)), 2);
        assert_eq!(trim_lines_in(&scene, TrimBand::Cuff(Side::Right)), 2);
        assert_eq!(trim_lines_in(&scene, TrimBand::NeckRib), 2);

        let kinds = scene.layer_kinds();
        let stripe = kinds.iter().position(|k| *k == LayerKind::ChestStripe).unwrap();
        let sleeves = kinds.iter().position(|k| *k == LayerKind::Sleeves).unwrap();
        let drape = kinds.iter().position(|k| *k == LayerKind::Drape).unwrap();
        assert!(sleeves < stripe && stripe < drape);

        let Some(Node::Group(stripe_group)) = scene.find(Role::ChestStripe) else {
            panic!("expected the stripe group");
        };
        let Node::Shape(base) = &stripe_group.children[0] else {
            panic!("expected the stripe base");
        };
        assert_eq!(base.style.fill, Some(Paint::Color(Color::new("#f59e0b"))));
    }

    #[test]
    fn stripe_toggle_only_touches_the_stripe_layer() {
        let config = crew().with_trim_line_count(2).with_chest_stripe(true);
        let with_stripe = assemble(&config);
        let without_stripe = assemble(&config.clone().with_chest_stripe(false));

        assert_eq!(with_stripe.without_layer(LayerKind::ChestStripe), without_stripe);
    }

    #[test]
    fn variants_are_exclusive() {
        for config in [polo(), crew()] {
            let scene = assemble(&config.with_trim_line_count(3));
            let polo_parts = scene.contains(Role::Placket)
                || scene.contains(Role::Button)
                || scene.contains(Role::CollarLeaf(Side::Left))
                || scene.contains(Role::CollarStand);
            let crew_parts = scene.contains(Role::NeckRib)
                || scene.contains(Role::TrimLines(TrimBand::NeckRib));
            assert!(polo_parts != crew_parts);
        }
    }

    #[test]
    fn polo_trims_both_collar_tips() {
        let scene = assemble(&polo().with_trim_line_count(3));
        assert_eq!(trim_lines_in(&scene, TrimBand::CollarTip(Side::Left)), 3);
        assert_eq!(trim_lines_in(&scene, TrimBand::CollarTip(Side::Right)), 3);
        assert!(!scene.contains(Role::TrimLines(TrimBand::NeckRib)));
        // Two cuffs plus two collar tips.
        assert_eq!(scene.count(Role::TrimLine), 12);
    }

    #[test]
    fn trim_count_is_clamped() {
        let scene = assemble(&crew().with_trim_line_count(7));
        assert_eq!(trim_lines_in(&scene, TrimBand::NeckRib), 3);
    }

    #[test]
    fn logo_layer_only_with_asset() {
        let scene = assemble(
            &polo()
                .with_logo(Some(LogoAsset::new("data:image/png;base64,AAAA")))
                .with_logo_scale(1.5),
        );
        let logo_layer = scene.layer(LayerKind::Logo).unwrap();
        let Node::Image(image) = &logo_layer.nodes[0] else {
            panic!("expected an image");
        };
        assert_eq!(image.bounds, Rect::new(300.0, 170.0, 60.0, 60.0));
        assert_eq!(
            image.style.transform,
            Some(Transform::Rotate {
                degrees: -5.0,
                pivot: Point::new(320.0, 190.0)
            })
        );
    }

    #[test]
    fn no_asset_means_no_logo_at_any_scale() {
        for scale in [0.5, 1.0, 2.0] {
            let scene = assemble(&polo().with_logo(None).with_logo_scale(scale));
            assert!(!scene.has_layer(LayerKind::Logo));
            assert!(!scene.contains(Role::Logo));
        }
    }

    #[test]
    fn cuffs_carry_fabric_grain_and_depth() {
        let scene = assemble(&polo().with_collar_color("#ef4444"));
        for side in Side::BOTH {
            let Some(Node::Group(cuff)) = scene.find(Role::Cuff(side)) else {
                panic!("expected the {} cuff", side.name());
            };
            let fills: Vec<_> = cuff
                .children
                .iter()
                .map(|node| node.style().and_then(|style| style.fill.clone()))
                .collect();
            assert_eq!(
                fills,
                vec![
                    Some(Paint::Color(Color::new("#ef4444"))),
                    Some(Paint::Color(Color::new("#ef4444"))),
                    Some(Paint::Effect(Effect::InnerDepth)),
                ]
            );
            assert_eq!(
                cuff.children[1].style().and_then(|style| style.filter),
                Some(Effect::FabricGrain)
            );
        }
    }

    #[test]
    fn theme_drives_interior_and_label() {
        let theme = Theme::daylight().with_label_text("ACME").with_drop_shadow(false);
        let scene = assemble_with_theme(&polo(), &theme);
        assert_eq!(scene.shadow, None);

        let label = scene.find(Role::Label).unwrap();
        let Node::Text(text) = &label.children()[1] else {
            panic!("expected label text");
        };
        assert_eq!(text.content, "ACME");
    }

    #[test]
    fn assembly_is_deterministic() {
        let config = crew().with_trim_line_count(3).with_collar_scale(1.37);
        assert_eq!(assemble(&config), assemble(&config));
        assert_eq!(assemble(&config).to_svg(), assemble(&config).to_svg());
    }

    #[test]
    fn inner_neck_is_a_darker_base() {
        let scene = assemble(&polo().with_base_color("#c86464"));
        let Some(Node::Shape(neck)) = scene.find(Role::InnerNeck) else {
            panic!("expected the inner neck");
        };
        assert_eq!(neck.style.fill, Some(Paint::Color(Color::new("#783c3c"))));
    }
}
