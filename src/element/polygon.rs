use egui::{Pos2, Rect, Vec2, pos2};

use super::common::{calculate_bounds, format_point_list, parse_point_list, widen};
use super::{AttributeEdit, ControlPoint, PointId, Shape};
use crate::document::{NodeId, SvgDocument};

/// `<polygon>` or `<polyline>`. Coordinates keep their parsed precision so a
/// vertex drag rewrites only that vertex's numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    coords: Vec<[f64; 2]>,
}

impl PolygonShape {
    pub fn new(coords: Vec<[f64; 2]>) -> Self {
        Self { coords }
    }

    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self::new(parse_point_list(doc.attribute(node, "points").unwrap_or_default()))
    }

    pub fn points(&self) -> Vec<Pos2> {
        self.coords.iter().map(|&[x, y]| pos2(x as f32, y as f32)).collect()
    }
}

impl Shape for PolygonShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        self.points()
            .into_iter()
            .enumerate()
            .map(|(i, p)| ControlPoint::anchor(PointId::Vertex(i), p))
            .collect()
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, _min_size: f32) -> Vec<AttributeEdit> {
        let PointId::Vertex(index) = point else {
            return Vec::new();
        };
        let mut coords = self.coords.clone();
        let Some([x, y]) = coords.get_mut(index) else {
            return Vec::new();
        };
        *x += widen(delta.x);
        *y += widen(delta.y);
        vec![AttributeEdit::new("points", format_point_list(&coords))]
    }

    fn local_bounds(&self) -> Option<Rect> {
        calculate_bounds(&self.points())
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["points"]
    }
}
