//! Neckline sub-structures: the crew rib and the polo collar.
//!
//! The two variants share nothing beyond the neckline anchor points on the
//! torso, so each owns its own descriptor type and [`Neckline`] tags them.

use super::path::{Curve, PathData, Point, Rect};
use super::{Band, CENTER_X, NECK_Y};
use crate::config::GarmentVariant;

/// Left neckline anchor where the torso opening starts.
const NECK_LEFT: Point = Point::new(140.0, NECK_Y);

/// Depth of the unscaled rib curve's control point.
const RIB_BASELINE_Y: f32 = 115.0;
/// Front rib sag at `collar_scale = 1`.
const BASE_RIB_SPREAD: f32 = 20.0;
/// Back rib sag at `collar_scale = 1`.
const BASE_BACK_RIB_SPREAD: f32 = 10.0;
/// Rib band thickness at `collar_scale = 1`.
const BASE_RIB_HEIGHT: f32 = 14.0;
/// Height of the band along a polo collar tip at `collar_scale = 1`.
const BASE_TIP_BAND_HEIGHT: f32 = 12.0;

const BUTTON_ROWS: [f32; 3] = [120.0, 160.0, 200.0];
const BUTTON_RADIUS: f32 = 6.0;

/// The variant-specific part of the garment.
#[derive(Debug, Clone, PartialEq)]
pub enum Neckline {
    Crew(CrewNeck),
    Polo(PoloNeck),
}

impl Neckline {
    pub fn variant(&self) -> GarmentVariant {
        match self {
            Self::Crew(_) => GarmentVariant::Crew,
            Self::Polo(_) => GarmentVariant::Polo,
        }
    }
}

// ============================================================================
// Crew
// ============================================================================

/// Ribbed round neck, drawn as thick strokes along two curves.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewNeck {
    /// The back half of the rib, visible through the opening.
    pub back_rib: Curve,
    /// Centerline of the front rib.
    pub front_rib: Curve,
    /// Stroke width of both ribs.
    pub rib_height: f32,
    /// The front rib's inner and outer edges.
    pub rib_band: Band,
}

impl CrewNeck {
    pub fn new(collar_scale: f32) -> Self {
        let rib = |spread: f32| {
            Curve::quad(
                NECK_LEFT,
                Point::new(CENTER_X, RIB_BASELINE_Y + spread),
                NECK_LEFT.mirrored(CENTER_X),
            )
        };
        let front_rib = rib(BASE_RIB_SPREAD * collar_scale);
        let rib_height = BASE_RIB_HEIGHT * collar_scale;

        Self {
            back_rib: rib(BASE_BACK_RIB_SPREAD * collar_scale),
            front_rib,
            rib_height,
            rib_band: Band {
                start: front_rib.translated(0.0, -rib_height / 2.0),
                end: front_rib.translated(0.0, rib_height / 2.0),
            },
        }
    }
}

// ============================================================================
// Polo
// ============================================================================

/// Two folded collar leaves over a buttoned placket.
#[derive(Debug, Clone, PartialEq)]
pub struct PoloNeck {
    /// The shadowed stand behind the collar.
    pub stand: PathData,
    pub left_leaf: CollarLeaf,
    pub right_leaf: CollarLeaf,
    pub placket: Placket,
}

/// One collar leaf and the band along its tip edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CollarLeaf {
    pub outline: PathData,
    pub tip_band: Band,
}

impl CollarLeaf {
    pub fn mirrored(&self, axis_x: f32) -> Self {
        Self {
            outline: self.outline.mirrored(axis_x),
            tip_band: self.tip_band.mirrored(axis_x),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placket {
    pub outline: PathData,
    /// Box stitch at the foot of the placket.
    pub stitch_box: Rect,
    /// Edge stitching down both sides.
    pub stitch_lines: [Curve; 2],
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub center: Point,
    pub radius: f32,
}

impl PoloNeck {
    pub fn new(collar_scale: f32) -> Self {
        // The leaf hangs from the neckline; scaling stretches its drop.
        let drop = |p: Point| Point::new(p.x, NECK_Y + (p.y - NECK_Y) * collar_scale);

        let left_outline = PathData::new()
            .move_to(CENTER_X, 100.0)
            .line_to(140.0, 90.0)
            .quad_to(110.0, 70.0, 180.0, 110.0)
            .line_to(235.0, 160.0)
            .quad_to(200.0, 165.0, 145.0, 135.0)
            .line_to(140.0, 90.0)
            .close()
            .map_points(drop);

        let tip_edge = Curve::quad(
            Point::new(145.0, 135.0),
            Point::new(200.0, 165.0),
            Point::new(235.0, 160.0),
        )
        .map_points(drop);

        let left_leaf = CollarLeaf {
            outline: left_outline,
            tip_band: Band {
                start: tip_edge,
                end: tip_edge.translated(0.0, -BASE_TIP_BAND_HEIGHT * collar_scale),
            },
        };
        let right_leaf = left_leaf.mirrored(CENTER_X);

        let stand = PathData::new()
            .move_to(140.0, 90.0)
            .quad_to(CENTER_X, 110.0, 360.0, 90.0)
            .line_to(360.0, 100.0)
            .quad_to(CENTER_X, 120.0, 140.0, 100.0)
            .close();

        Self {
            stand,
            left_leaf,
            right_leaf,
            placket: Placket::new(),
        }
    }
}

impl Placket {
    fn new() -> Self {
        Self {
            outline: PathData::new()
                .move_to(235.0, 90.0)
                .line_to(265.0, 90.0)
                .line_to(265.0, 240.0)
                .quad_to(CENTER_X, 245.0, 235.0, 240.0)
                .close(),
            stitch_box: Rect::new(238.0, 230.0, 24.0, 2.0),
            stitch_lines: [
                Curve::line(Point::new(238.0, 90.0), Point::new(238.0, 230.0)),
                Curve::line(Point::new(262.0, 90.0), Point::new(262.0, 230.0)),
            ],
            buttons: BUTTON_ROWS
                .iter()
                .map(|&y| Button {
                    center: Point::new(CENTER_X, y),
                    radius: BUTTON_RADIUS,
                })
                .collect(),
        }
    }
}
