//! Parametric garment geometry.
//!
//! [`build`] turns a [`GarmentConfig`] into named outlines. The torso, sleeve
//! and cuff outlines are fixed hand-authored curves; only the neckline
//! reflows with `collar_scale`. Right-hand pieces are mirror images of the
//! left-hand ones about the garment centerline.
//!
//! # Example
//!
//! ```
//! use tailor_renderer::{GarmentConfig, GarmentVariant};
//! use tailor_renderer::geometry::{self, Neckline};
//!
//! let config = GarmentConfig::new().with_variant(GarmentVariant::Crew);
//! let geometry = geometry::build(&config);
//! assert!(matches!(geometry.neckline, Neckline::Crew(_)));
//! ```

mod neckline;
mod path;

pub use neckline::{Button, CollarLeaf, CrewNeck, Neckline, Placket, PoloNeck};
pub use path::{Curve, PathCommand, PathData, Point, Rect};
pub(crate) use path::fmt_number;

use crate::config::{GarmentConfig, GarmentVariant};

/// The garment's vertical axis of symmetry.
pub const CENTER_X: f32 = 250.0;

/// Height of the neckline anchors on the torso.
pub const NECK_Y: f32 = 90.0;

/// The view box every coordinate lives in.
pub const VIEW_BOX: Rect = Rect::new(0.0, 0.0, 500.0, 600.0);

const LOGO_ORIGIN: Point = Point::new(300.0, 170.0);
const LOGO_BASE_SIZE: f32 = 40.0;
const LOGO_ROTATION: f32 = -5.0;
const LOGO_PIVOT: Point = Point::new(320.0, 190.0);

// ============================================================================
// Descriptors
// ============================================================================

/// A region between two roughly parallel edges that trim lines are spread across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: Curve,
    pub end: Curve,
}

impl Band {
    pub fn mirrored(&self, axis_x: f32) -> Self {
        Self {
            start: self.start.mirrored(axis_x),
            end: self.end.mirrored(axis_x),
        }
    }
}

/// One sleeve with its cuff.
#[derive(Debug, Clone, PartialEq)]
pub struct SleeveGeometry {
    pub outline: PathData,
    pub cuff: PathData,
    /// Hem edge to top edge of the cuff.
    pub cuff_band: Band,
    /// Shadow sliver inside the sleeve hole.
    pub opening: PathData,
}

impl SleeveGeometry {
    fn left() -> Self {
        let hem = Curve::line(Point::new(40.0, 190.0), Point::new(90.0, 215.0));
        let top = Curve::line(Point::new(44.0, 183.0), Point::new(94.0, 208.0));

        Self {
            outline: PathData::new()
                .move_to(140.0, 90.0)
                .quad_to(120.0, 95.0, 110.0, 105.0)
                .line_to(40.0, 190.0)
                .quad_to(55.0, 210.0, 90.0, 215.0)
                .line_to(108.0, 200.0)
                .line_to(100.0, 190.0)
                .quad_to(120.0, 160.0, 140.0, 155.0)
                .close(),
            cuff: PathData::new()
                .move_to(40.0, 190.0)
                .line_to(90.0, 215.0)
                .line_to(94.0, 208.0)
                .line_to(44.0, 183.0)
                .close(),
            cuff_band: Band { start: hem, end: top },
            opening: PathData::new()
                .move_to(40.0, 190.0)
                .quad_to(65.0, 200.0, 90.0, 215.0)
                .quad_to(65.0, 205.0, 40.0, 190.0)
                .close(),
        }
    }

    pub fn mirrored(&self, axis_x: f32) -> Self {
        Self {
            outline: self.outline.mirrored(axis_x),
            cuff: self.cuff.mirrored(axis_x),
            cuff_band: self.cuff_band.mirrored(axis_x),
            opening: self.opening.mirrored(axis_x),
        }
    }
}

/// Where the chest logo goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSlot {
    /// Top-left corner before rotation.
    pub origin: Point,
    /// Edge length of the square slot.
    pub size: f32,
    /// Rotation in degrees about `pivot`.
    pub rotation: f32,
    pub pivot: Point,
}

impl LogoSlot {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.size, self.size)
    }
}

/// Every outline of one garment.
#[derive(Debug, Clone, PartialEq)]
pub struct GarmentGeometry {
    /// Back panel seen through the neck opening.
    pub inner_back: PathData,
    /// Inside of the front neckline.
    pub inner_neck: PathData,
    pub torso: PathData,
    pub hem_stitch: Curve,
    pub left_sleeve: SleeveGeometry,
    pub right_sleeve: SleeveGeometry,
    pub chest_stripe: PathData,
    pub logo_slot: LogoSlot,
    pub neckline: Neckline,
}

// ============================================================================
// Builder
// ============================================================================

/// Builds the geometry for `config`.
///
/// Total over every input: numeric fields are clamped into their domains
/// first, so out-of-domain values produce the geometry of the nearest bound.
pub fn build(config: &GarmentConfig) -> GarmentGeometry {
    let config = config.clamped();
    let left_sleeve = SleeveGeometry::left();
    let right_sleeve = left_sleeve.mirrored(CENTER_X);

    let neckline = match config.garment_variant {
        GarmentVariant::Crew => Neckline::Crew(CrewNeck::new(config.collar_scale)),
        GarmentVariant::Polo => Neckline::Polo(PoloNeck::new(config.collar_scale)),
    };

    GarmentGeometry {
        inner_back: PathData::new()
            .move_to(140.0, 88.0)
            .quad_to(CENTER_X, 108.0, 360.0, 88.0)
            .line_to(360.0, 50.0)
            .quad_to(CENTER_X, 70.0, 140.0, 50.0)
            .close(),
        inner_neck: PathData::new()
            .move_to(140.0, 90.0)
            .quad_to(CENTER_X, 110.0, 360.0, 90.0)
            .line_to(360.0, 80.0)
            .quad_to(CENTER_X, 100.0, 140.0, 80.0)
            .close(),
        torso: torso(),
        hem_stitch: Curve::quad(
            Point::new(105.0, 445.0),
            Point::new(CENTER_X, 475.0),
            Point::new(395.0, 445.0),
        ),
        left_sleeve,
        right_sleeve,
        chest_stripe: PathData::new()
            .move_to(103.0, 210.0)
            .quad_to(CENTER_X, 230.0, 397.0, 210.0)
            .line_to(398.0, 240.0)
            .quad_to(CENTER_X, 260.0, 104.0, 240.0)
            .close(),
        logo_slot: LogoSlot {
            origin: LOGO_ORIGIN,
            size: LOGO_BASE_SIZE * config.logo_scale,
            rotation: LOGO_ROTATION,
            pivot: LOGO_PIVOT,
        },
        neckline,
    }
}

/// Athletic-fit torso silhouette.
fn torso() -> PathData {
    PathData::new()
        .move_to(140.0, 90.0)
        .quad_to(120.0, 95.0, 110.0, 105.0)
        .quad_to(95.0, 140.0, 100.0, 190.0)
        .quad_to(102.0, 260.0, 105.0, 360.0)
        .line_to(105.0, 460.0)
        .quad_to(CENTER_X, 490.0, 395.0, 460.0)
        .line_to(395.0, 360.0)
        .quad_to(398.0, 260.0, 400.0, 190.0)
        .quad_to(405.0, 140.0, 390.0, 105.0)
        .quad_to(380.0, 95.0, 360.0, 90.0)
        .quad_to(CENTER_X, 110.0, 140.0, 90.0)
        .close()
}
