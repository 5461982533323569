use egui::{Rect, Vec2, pos2};

use super::common::number_attr;
use super::{AttributeEdit, ControlPoint, PointId, Shape};
use crate::document::{NodeId, SvgDocument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl CircleShape {
    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self {
            cx: number_attr(doc, node, "cx"),
            cy: number_attr(doc, node, "cy"),
            r: number_attr(doc, node, "r"),
        }
    }
}

impl Shape for CircleShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        vec![
            ControlPoint::anchor(PointId::Center, pos2(self.cx, self.cy)),
            ControlPoint::anchor(PointId::Radius, pos2(self.cx + self.r, self.cy)),
        ]
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, min_size: f32) -> Vec<AttributeEdit> {
        match point {
            PointId::Center => vec![
                AttributeEdit::number("cx", self.cx + delta.x),
                AttributeEdit::number("cy", self.cy + delta.y),
            ],
            // The radius handle sits on the right edge and only follows x.
            PointId::Radius => vec![AttributeEdit::number("r", (self.r + delta.x).max(min_size))],
            _ => Vec::new(),
        }
    }

    fn local_bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(pos2(self.cx, self.cy), Vec2::splat(self.r * 2.0)))
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["cx", "cy", "r"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn radius_follows_x_and_clamps() {
        let c = CircleShape { cx: 50.0, cy: 50.0, r: 10.0 };
        assert_eq!(
            c.apply_point_delta(PointId::Radius, vec2(5.0, 100.0), 1.0),
            vec![AttributeEdit::new("r", "15")]
        );
        assert_eq!(
            c.apply_point_delta(PointId::Radius, vec2(-30.0, 0.0), 1.0),
            vec![AttributeEdit::new("r", "1")]
        );
    }

    #[test]
    fn center_moves_both_axes() {
        let c = CircleShape { cx: 0.0, cy: 0.0, r: 1.0 };
        let edits = c.apply_point_delta(PointId::Center, vec2(2.0, 3.0), 1.0);
        assert_eq!(edits, vec![AttributeEdit::new("cx", "2"), AttributeEdit::new("cy", "3")]);
    }
}
