pub mod bounds;
pub mod hit_testing;
pub mod transform;

pub use bounds::{content_bounds, element_bounds, exceeds_viewport};
pub use hit_testing::{handle_at, shape_at};
pub use transform::{
    AffineSpace, CoordinateSpace, element_ctm, leading_translate, parent_ctm, parse_transform,
    with_leading_translate,
};

use egui::{Pos2, Rect, pos2};
use glam::{Affine2, Vec2};

pub fn to_glam(p: Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

pub fn to_pos2(v: Vec2) -> Pos2 {
    pos2(v.x, v.y)
}

pub fn transform_point(affine: &Affine2, p: Pos2) -> Pos2 {
    to_pos2(affine.transform_point2(to_glam(p)))
}

/// Axis-aligned box around the four transformed corners of `rect`.
pub fn transform_rect(affine: &Affine2, rect: Rect) -> Rect {
    let corners = [rect.left_top(), rect.right_top(), rect.left_bottom(), rect.right_bottom()];
    Rect::from_points(&corners.map(|c| transform_point(affine, c)))
}
