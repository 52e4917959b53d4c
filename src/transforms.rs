//! types and constants facillitating geometry and transforms
//! CanvasSpace <-> ViewportSpace <-> SchematicSpace

use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the patch of screen being drawn on (f32)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct CanvasSpace;

/// PhantomData tag used to denote the f32 space on which the schematic is drawn
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct ViewportSpace;

/// PhantomData tag used to denote the integer space in which the schematic exists
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct SchematicSpace;

/// CanvasSpace Point
pub type CSPoint = euclid::Point2D<f32, CanvasSpace>;
/// ViewportSpace Point
pub type VSPoint = euclid::Point2D<f32, ViewportSpace>;
/// SchematicSpace Point
pub type SSPoint = euclid::Point2D<i32, SchematicSpace>;

/// ViewportSpace Box
pub type VSBox = euclid::Box2D<f32, ViewportSpace>;
/// SchematicSpace Box
pub type SSBox = euclid::Box2D<i32, SchematicSpace>;

/// ViewportSpace Vector
pub type VSVec = euclid::Vector2D<f32, ViewportSpace>;
/// SchematicSpace Vector
pub type SSVec = euclid::Vector2D<i32, SchematicSpace>;

/// viewport to canvas space transform
pub type VCTransform = euclid::Transform2D<f32, ViewportSpace, CanvasSpace>;
/// canvas to viewport space transform
pub type CVTransform = euclid::Transform2D<f32, CanvasSpace, ViewportSpace>;
/// schematic space transform
pub type SSTransform = euclid::Transform2D<i32, SchematicSpace, SchematicSpace>;

/// identity, no rotation
pub const SST_IDENTITY: SSTransform = SSTransform::new(1, 0, 0, 1, 0, 0);

/// 90 deg clockwise rotation transform
pub const SST_CWR: SSTransform = SSTransform::new(0, -1, 1, 0, 0, 0);

/// 180 deg rotation transform
pub const SST_HALF: SSTransform = SSTransform::new(-1, 0, 0, -1, 0, 0);

/// 90 deg counter clockwise rotation transform
pub const SST_CCWR: SSTransform = SSTransform::new(0, 1, -1, 0, 0, 0);

/// rounds a viewport space coordinate to the nearest multiple of `grid` in schematic space
pub fn snap(vsp: VSPoint, grid: u32) -> SSPoint {
    let g = grid_step(grid);
    let ssp: SSPoint = (vsp / g as f32).round().cast::<i32>().cast_unit();
    ssp * g
}

/// rounds a viewport space vector to the nearest multiple of `grid` in schematic space
pub fn snap_vec(vsv: VSVec, grid: u32) -> SSVec {
    let g = grid_step(grid);
    let ssv: SSVec = (vsv / g as f32).round().cast::<i32>().cast_unit();
    ssv * g
}

/// grid pitch in schematic units, at least 1 and at most i32::MAX
fn grid_step(grid: u32) -> i32 {
    i32::try_from(grid).unwrap_or(i32::MAX).max(1)
}

/// shortest distance from point `p` to the segment `a`-`b`
pub fn distance_to_segment(p: VSPoint, a: VSPoint, b: VSPoint) -> f32 {
    let ab = b - a;
    let len2 = ab.square_length();
    if len2 == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
