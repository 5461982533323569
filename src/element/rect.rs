use egui::{Rect, Vec2, pos2, vec2};

use super::common::number_attr;
use super::{AttributeEdit, ControlPoint, PointId, Shape};
use crate::document::{NodeId, SvgDocument};
use crate::overlay::Corner;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectShape {
    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self {
            x: number_attr(doc, node, "x"),
            y: number_attr(doc, node, "y"),
            width: number_attr(doc, node, "width"),
            height: number_attr(doc, node, "height"),
        }
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(pos2(self.x, self.y), vec2(self.width, self.height))
    }
}

impl Shape for RectShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        let r = self.rect();
        Corner::ALL
            .iter()
            .map(|&corner| ControlPoint::anchor(PointId::Corner(corner), corner.of(r)))
            .collect()
    }

    /// Corners resize with the opposite edges held in place.
    fn apply_point_delta(&self, point: PointId, delta: Vec2, min_size: f32) -> Vec<AttributeEdit> {
        let PointId::Corner(corner) = point else {
            return Vec::new();
        };
        let Vec2 { x: dx, y: dy } = delta;
        let RectShape { x, y, width: w, height: h } = *self;
        match corner {
            Corner::TopLeft => vec![
                AttributeEdit::number("x", x + dx),
                AttributeEdit::number("y", y + dy),
                AttributeEdit::number("width", (w - dx).max(min_size)),
                AttributeEdit::number("height", (h - dy).max(min_size)),
            ],
            Corner::TopRight => vec![
                AttributeEdit::number("y", y + dy),
                AttributeEdit::number("width", (w + dx).max(min_size)),
                AttributeEdit::number("height", (h - dy).max(min_size)),
            ],
            Corner::BottomLeft => vec![
                AttributeEdit::number("x", x + dx),
                AttributeEdit::number("width", (w - dx).max(min_size)),
                AttributeEdit::number("height", (h + dy).max(min_size)),
            ],
            Corner::BottomRight => vec![
                AttributeEdit::number("width", (w + dx).max(min_size)),
                AttributeEdit::number("height", (h + dy).max(min_size)),
            ],
        }
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(self.rect())
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["x", "y", "width", "height"]
    }
}
