use egui::{Rect, Vec2, pos2, vec2};

use super::common::number_attr;
use super::{AttributeEdit, ControlPoint, PointId, Shape};
use crate::document::{NodeId, SvgDocument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
}

impl EllipseShape {
    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self {
            cx: number_attr(doc, node, "cx"),
            cy: number_attr(doc, node, "cy"),
            rx: number_attr(doc, node, "rx"),
            ry: number_attr(doc, node, "ry"),
        }
    }
}

impl Shape for EllipseShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        vec![
            ControlPoint::anchor(PointId::Center, pos2(self.cx, self.cy)),
            ControlPoint::anchor(PointId::RadiusX, pos2(self.cx + self.rx, self.cy)),
            ControlPoint::anchor(PointId::RadiusY, pos2(self.cx, self.cy + self.ry)),
        ]
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, min_size: f32) -> Vec<AttributeEdit> {
        match point {
            PointId::Center => vec![
                AttributeEdit::number("cx", self.cx + delta.x),
                AttributeEdit::number("cy", self.cy + delta.y),
            ],
            PointId::RadiusX => vec![AttributeEdit::number("rx", (self.rx + delta.x).max(min_size))],
            PointId::RadiusY => vec![AttributeEdit::number("ry", (self.ry + delta.y).max(min_size))],
            _ => Vec::new(),
        }
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(pos2(self.cx, self.cy), vec2(self.rx * 2.0, self.ry * 2.0)))
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["cx", "cy", "rx", "ry"]
    }
}
