use egui::{Rect, Vec2};

use super::common::widen;
use super::{AttributeEdit, ControlPoint, PointId, PointRole, Shape};
use crate::document::{NodeId, SvgDocument};
use crate::path::{CommandKind, PathCommand, parse_path, path_bounds, resolve_points, serialize_path};

#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    commands: Vec<PathCommand>,
}

impl PathShape {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub(crate) fn from_element(doc: &SvgDocument, node: NodeId) -> Self {
        Self::new(parse_path(doc.attribute(node, "d").unwrap_or_default()))
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
}

impl Shape for PathShape {
    fn control_points(&self) -> Vec<ControlPoint> {
        let resolved = resolve_points(&self.commands);
        // Control points first so anchors sit on top of them.
        let controls = resolved.handles.iter().map(|h| ControlPoint {
            id: PointId::PathValue { command: h.command_index, value: h.value_index },
            position: h.position,
            role: PointRole::Control { anchor: h.anchor },
        });
        let anchors = resolved.anchors.iter().map(|a| {
            ControlPoint::anchor(PointId::PathValue { command: a.command_index, value: a.value_index }, a.position)
        });
        controls.chain(anchors).collect()
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, _min_size: f32) -> Vec<AttributeEdit> {
        let PointId::PathValue { command, value } = point else {
            return Vec::new();
        };
        let mut commands = self.commands.clone();
        let Some(cmd) = commands.get_mut(command) else {
            return Vec::new();
        };
        match cmd.kind {
            CommandKind::HorizontalTo => match cmd.values.get_mut(value) {
                Some(v) => *v += widen(delta.x),
                None => return Vec::new(),
            },
            CommandKind::VerticalTo => match cmd.values.get_mut(value) {
                Some(v) => *v += widen(delta.y),
                None => return Vec::new(),
            },
            _ => {
                if value + 1 >= cmd.values.len() {
                    return Vec::new();
                }
                cmd.values[value] += widen(delta.x);
                cmd.values[value + 1] += widen(delta.y);
            }
        }
        vec![AttributeEdit::new("d", serialize_path(&commands))]
    }

    fn local_bounds(&self) -> Option<Rect> {
        path_bounds(&self.commands)
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        &["d"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn shape(d: &str) -> PathShape {
        PathShape::new(parse_path(d))
    }

    #[test]
    fn horizontal_and_vertical_take_one_axis() {
        let s = shape("M0 0 H10 V10");
        let h = s.apply_point_delta(PointId::PathValue { command: 1, value: 0 }, vec2(3.0, 7.0), 1.0);
        assert_eq!(h, vec![AttributeEdit::new("d", "M0 0 H13 V10")]);
        let v = s.apply_point_delta(PointId::PathValue { command: 2, value: 0 }, vec2(3.0, 7.0), 1.0);
        assert_eq!(v, vec![AttributeEdit::new("d", "M0 0 H10 V17")]);
    }

    #[test]
    fn moves_only_the_dragged_pair() {
        let s = shape("M0 0 L10 10 20 20");
        let edits = s.apply_point_delta(PointId::PathValue { command: 1, value: 2 }, vec2(1.0, -1.0), 1.0);
        assert_eq!(edits, vec![AttributeEdit::new("d", "M0 0 L10 10 21 19")]);
    }

    #[test]
    fn fractional_deltas_stay_short() {
        let s = shape("M0 0 L10 10");
        let edits = s.apply_point_delta(PointId::PathValue { command: 1, value: 0 }, vec2(0.3, -0.5), 1.0);
        assert_eq!(edits, vec![AttributeEdit::new("d", "M0 0 L10.3 9.5")]);
    }

    #[test]
    fn out_of_range_points_are_ignored() {
        let s = shape("M0 0 L10 10");
        assert!(s.apply_point_delta(PointId::PathValue { command: 5, value: 0 }, vec2(1.0, 1.0), 1.0).is_empty());
        assert!(s.apply_point_delta(PointId::PathValue { command: 1, value: 1 }, vec2(1.0, 1.0), 1.0).is_empty());
        assert!(s.apply_point_delta(PointId::Center, vec2(1.0, 1.0), 1.0).is_empty());
    }

    #[test]
    fn controls_precede_anchors() {
        let points = shape("M0 0 C1 1 2 2 3 3").control_points();
        assert_eq!(points.len(), 4);
        assert!(matches!(points[0].role, PointRole::Control { .. }));
        assert!(matches!(points[1].role, PointRole::Control { .. }));
        assert_eq!(points[3].role, PointRole::Anchor);
    }
}
