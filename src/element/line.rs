use egui::{Pos2, Rect, Vec2, pos2};

use super::common::number_attr;
use super::{AttributeEdit, ControlPoint, PointId, Shape};
use crate::document::{NodeId, SvgDocument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub start: Pos2,
    pub end: Pos2,
}

impl LineShape {
    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self {
            start: pos2(number_attr(doc, node, "x1"), number_attr(doc, node, "y1")),
            end: pos2(number_attr(doc, node, "x2"), number_attr(doc, node, "y2")),
        }
    }
}

impl Shape for LineShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        vec![
            ControlPoint::anchor(PointId::LineStart, self.start),
            ControlPoint::anchor(PointId::LineEnd, self.end),
        ]
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, _min_size: f32) -> Vec<AttributeEdit> {
        let (x, y, moved) = match point {
            PointId::LineStart => ("x1", "y1", self.start + delta),
            PointId::LineEnd => ("x2", "y2", self.end + delta),
            _ => return Vec::new(),
        };
        vec![AttributeEdit::number(x, moved.x), AttributeEdit::number(y, moved.y)]
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_two_pos(self.start, self.end))
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["x1", "y1", "x2", "y2"]
    }
}
