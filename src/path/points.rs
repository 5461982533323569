//! Resolving parsed commands into absolute geometry.
//!
//! Two views are produced from the same walk over the command list:
//! editable points ([`resolve_points`]) and drawable segments
//! ([`path_segments`]). Neither is stored; both are recomputed from the
//! commands whenever needed, since relative commands make every absolute
//! position depend on everything before it.

use egui::{Pos2, Rect, Vec2, pos2};
use lyon::geom::{
    Angle, ArcFlags, Box2D, CubicBezierSegment, Point, QuadraticBezierSegment, SvgArc, point, vector,
};

use super::codec::{CommandKind, PathCommand};

/// A point the path passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub command_index: usize,
    pub value_index: usize,
    pub position: Pos2,
    pub absolute: bool,
}

/// A bezier control point, tethered to the anchor it shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlHandle {
    pub command_index: usize,
    pub value_index: usize,
    pub position: Pos2,
    pub anchor: Pos2,
    pub absolute: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPoints {
    pub anchors: Vec<AnchorPoint>,
    pub handles: Vec<ControlHandle>,
}

/// Running pen state while walking a command list.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    current: Pos2,
    subpath_start: Pos2,
}

impl Cursor {
    fn new() -> Self {
        Self { current: Pos2::ZERO, subpath_start: Pos2::ZERO }
    }

    fn point(&self, absolute: bool, x: f32, y: f32) -> Pos2 {
        if absolute { pos2(x, y) } else { pos2(self.current.x + x, self.current.y + y) }
    }

    fn x(&self, absolute: bool, x: f32) -> f32 {
        if absolute { x } else { self.current.x + x }
    }

    fn y(&self, absolute: bool, y: f32) -> f32 {
        if absolute { y } else { self.current.y + y }
    }
}

/// Command values narrowed to the `f32` geometry types.
fn geometry_values(cmd: &PathCommand) -> Vec<f32> {
    cmd.values.iter().map(|&v| v as f32).collect()
}

/// Compute every anchor and control handle of a path.
pub fn resolve_points(commands: &[PathCommand]) -> ResolvedPoints {
    let mut out = ResolvedPoints::default();
    let mut cursor = Cursor::new();

    for (i, cmd) in commands.iter().enumerate() {
        let abs = cmd.absolute;
        if cmd.kind == CommandKind::ClosePath {
            cursor.current = cursor.subpath_start;
            continue;
        }

        let arity = cmd.kind.arity();
        let values = geometry_values(cmd);
        for (group, v) in values.chunks_exact(arity).enumerate() {
            let j = group * arity;
            let anchor = |value_index: usize, position: Pos2| AnchorPoint {
                command_index: i,
                value_index,
                position,
                absolute: abs,
            };
            let handle = |value_index: usize, position: Pos2, tether: Pos2| ControlHandle {
                command_index: i,
                value_index,
                position,
                anchor: tether,
                absolute: abs,
            };

            let end = match cmd.kind {
                CommandKind::MoveTo => {
                    let p = cursor.point(abs, v[0], v[1]);
                    if group == 0 {
                        cursor.subpath_start = p;
                    }
                    out.anchors.push(anchor(j, p));
                    p
                }
                CommandKind::LineTo | CommandKind::SmoothQuadTo => {
                    let p = cursor.point(abs, v[0], v[1]);
                    out.anchors.push(anchor(j, p));
                    p
                }
                CommandKind::HorizontalTo => {
                    let p = pos2(cursor.x(abs, v[0]), cursor.current.y);
                    out.anchors.push(anchor(j, p));
                    p
                }
                CommandKind::VerticalTo => {
                    let p = pos2(cursor.current.x, cursor.y(abs, v[0]));
                    out.anchors.push(anchor(j, p));
                    p
                }
                CommandKind::CubicTo => {
                    let c1 = cursor.point(abs, v[0], v[1]);
                    let c2 = cursor.point(abs, v[2], v[3]);
                    let p = cursor.point(abs, v[4], v[5]);
                    out.handles.push(handle(j, c1, cursor.current));
                    out.handles.push(handle(j + 2, c2, p));
                    out.anchors.push(anchor(j + 4, p));
                    p
                }
                CommandKind::SmoothCubicTo => {
                    let c2 = cursor.point(abs, v[0], v[1]);
                    let p = cursor.point(abs, v[2], v[3]);
                    out.handles.push(handle(j, c2, p));
                    out.anchors.push(anchor(j + 2, p));
                    p
                }
                CommandKind::QuadTo => {
                    let c = cursor.point(abs, v[0], v[1]);
                    let p = cursor.point(abs, v[2], v[3]);
                    out.handles.push(handle(j, c, cursor.current));
                    out.anchors.push(anchor(j + 2, p));
                    p
                }
                CommandKind::ArcTo => {
                    let p = cursor.point(abs, v[5], v[6]);
                    out.anchors.push(anchor(j + 5, p));
                    p
                }
                CommandKind::ClosePath => unreachable!("close path has no argument groups"),
            };
            cursor.current = end;
        }
    }
    out
}

/// Elliptical arc parameters in endpoint form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub from: Pos2,
    pub radii: Vec2,
    pub x_rotation: f32,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Pos2,
}

/// An absolute drawing segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Start of a subpath. Contributes its point to the bounds.
    Move(Pos2),
    Line(Pos2, Pos2),
    Quad(Pos2, Pos2, Pos2),
    Cubic(Pos2, Pos2, Pos2, Pos2),
    Arc(Arc),
}

/// Expand the command list into absolute segments, applying the `S`/`T`
/// control point reflection.
pub fn path_segments(commands: &[PathCommand]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = Cursor::new();
    // Second control point of the previous cubic, or control of the previous quad.
    let mut last_cubic_ctrl: Option<Pos2> = None;
    let mut last_quad_ctrl: Option<Pos2> = None;

    for cmd in commands {
        let abs = cmd.absolute;
        if cmd.kind == CommandKind::ClosePath {
            if cursor.current != cursor.subpath_start {
                segments.push(Segment::Line(cursor.current, cursor.subpath_start));
            }
            cursor.current = cursor.subpath_start;
            last_cubic_ctrl = None;
            last_quad_ctrl = None;
            continue;
        }

        let arity = cmd.kind.arity();
        let values = geometry_values(cmd);
        for (group, v) in values.chunks_exact(arity).enumerate() {
            let from = cursor.current;
            let reflect = |ctrl: Option<Pos2>| ctrl.map_or(from, |c| from + (from - c));
            let mut cubic_ctrl = None;
            let mut quad_ctrl = None;

            let end = match cmd.kind {
                CommandKind::MoveTo => {
                    let p = cursor.point(abs, v[0], v[1]);
                    if group == 0 {
                        cursor.subpath_start = p;
                        segments.push(Segment::Move(p));
                    } else {
                        segments.push(Segment::Line(from, p));
                    }
                    p
                }
                CommandKind::LineTo => {
                    let p = cursor.point(abs, v[0], v[1]);
                    segments.push(Segment::Line(from, p));
                    p
                }
                CommandKind::HorizontalTo => {
                    let p = pos2(cursor.x(abs, v[0]), from.y);
                    segments.push(Segment::Line(from, p));
                    p
                }
                CommandKind::VerticalTo => {
                    let p = pos2(from.x, cursor.y(abs, v[0]));
                    segments.push(Segment::Line(from, p));
                    p
                }
                CommandKind::CubicTo => {
                    let c1 = cursor.point(abs, v[0], v[1]);
                    let c2 = cursor.point(abs, v[2], v[3]);
                    let p = cursor.point(abs, v[4], v[5]);
                    segments.push(Segment::Cubic(from, c1, c2, p));
                    cubic_ctrl = Some(c2);
                    p
                }
                CommandKind::SmoothCubicTo => {
                    let c1 = reflect(last_cubic_ctrl);
                    let c2 = cursor.point(abs, v[0], v[1]);
                    let p = cursor.point(abs, v[2], v[3]);
                    segments.push(Segment::Cubic(from, c1, c2, p));
                    cubic_ctrl = Some(c2);
                    p
                }
                CommandKind::QuadTo => {
                    let c = cursor.point(abs, v[0], v[1]);
                    let p = cursor.point(abs, v[2], v[3]);
                    segments.push(Segment::Quad(from, c, p));
                    quad_ctrl = Some(c);
                    p
                }
                CommandKind::SmoothQuadTo => {
                    let c = reflect(last_quad_ctrl);
                    let p = cursor.point(abs, v[0], v[1]);
                    segments.push(Segment::Quad(from, c, p));
                    quad_ctrl = Some(c);
                    p
                }
                CommandKind::ArcTo => {
                    let p = cursor.point(abs, v[5], v[6]);
                    segments.push(Segment::Arc(Arc {
                        from,
                        radii: Vec2::new(v[0], v[1]),
                        x_rotation: v[2],
                        large_arc: v[3] != 0.0,
                        sweep: v[4] != 0.0,
                        to: p,
                    }));
                    p
                }
                CommandKind::ClosePath => unreachable!("close path has no argument groups"),
            };
            last_cubic_ctrl = cubic_ctrl;
            last_quad_ctrl = quad_ctrl;
            cursor.current = end;
        }
    }
    segments
}

impl Segment {
    /// Tight bounding box of the drawn segment.
    pub fn bounds(&self) -> Rect {
        match *self {
            Segment::Move(p) => Rect::from_min_max(p, p),
            Segment::Line(a, b) => Rect::from_two_pos(a, b),
            Segment::Quad(p0, p1, p2) => to_rect(
                QuadraticBezierSegment { from: to_point(p0), ctrl: to_point(p1), to: to_point(p2) }
                    .bounding_box(),
            ),
            Segment::Cubic(p0, p1, p2, p3) => to_rect(
                CubicBezierSegment {
                    from: to_point(p0),
                    ctrl1: to_point(p1),
                    ctrl2: to_point(p2),
                    to: to_point(p3),
                }
                .bounding_box(),
            ),
            Segment::Arc(arc) => arc.bounds(),
        }
    }
}

impl Arc {
    /// Bounds of the drawn arc. Degenerate radii draw a straight line.
    pub fn bounds(&self) -> Rect {
        let chord = Rect::from_two_pos(self.from, self.to);
        let arc = SvgArc {
            from: to_point(self.from),
            to: to_point(self.to),
            radii: vector(self.radii.x.abs(), self.radii.y.abs()),
            x_rotation: Angle::degrees(self.x_rotation),
            flags: ArcFlags { large_arc: self.large_arc, sweep: self.sweep },
        };
        if arc.is_straight_line() {
            return chord;
        }
        chord.union(to_rect(arc.to_arc().bounding_box()))
    }
}

/// Bounding box of a whole path, or `None` when it draws nothing.
pub fn path_bounds(commands: &[PathCommand]) -> Option<Rect> {
    path_segments(commands)
        .iter()
        .map(Segment::bounds)
        .reduce(|a, b| a.union(b))
}

fn to_point(p: Pos2) -> Point<f32> {
    point(p.x, p.y)
}

fn to_rect(b: Box2D<f32>) -> Rect {
    Rect::from_min_max(pos2(b.min.x, b.min.y), pos2(b.max.x, b.max.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;

    fn anchors(d: &str) -> Vec<Pos2> {
        resolve_points(&parse_path(d)).anchors.iter().map(|a| a.position).collect()
    }

    #[test]
    fn closed_polyline_has_three_anchors_and_no_handles() {
        let resolved = resolve_points(&parse_path("M 0 0 L 10 0 L 10 10 Z"));
        assert_eq!(resolved.handles.len(), 0);
        let points: Vec<Pos2> = resolved.anchors.iter().map(|a| a.position).collect();
        assert_eq!(points, vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)]);
    }

    #[test]
    fn relative_commands_accumulate() {
        assert_eq!(anchors("M 10 10 l 5 0 l 0 5"), vec![pos2(10.0, 10.0), pos2(15.0, 10.0), pos2(15.0, 15.0)]);
    }

    #[test]
    fn horizontal_and_vertical_keep_other_axis() {
        assert_eq!(anchors("M 1 2 H 5 v 3 h -1 1"), vec![
            pos2(1.0, 2.0),
            pos2(5.0, 2.0),
            pos2(5.0, 5.0),
            pos2(4.0, 5.0),
            pos2(5.0, 5.0),
        ]);
    }

    #[test]
    fn cubic_handles_are_tethered_to_both_ends() {
        let resolved = resolve_points(&parse_path("M 0 0 C 1 1 2 2 3 3"));
        assert_eq!(resolved.anchors.len(), 2);
        assert_eq!(resolved.anchors[1].position, pos2(3.0, 3.0));
        assert_eq!(resolved.anchors[1].value_index, 4);
        assert_eq!(resolved.handles.len(), 2);
        assert_eq!(resolved.handles[0].anchor, pos2(0.0, 0.0));
        assert_eq!(resolved.handles[0].value_index, 0);
        assert_eq!(resolved.handles[1].anchor, pos2(3.0, 3.0));
        assert_eq!(resolved.handles[1].value_index, 2);
    }

    #[test]
    fn quad_handle_is_tethered_to_start_and_smooth_cubic_to_end() {
        let resolved = resolve_points(&parse_path("M 0 0 Q 5 5 10 0 S 15 5 20 0"));
        assert_eq!(resolved.handles[0].anchor, pos2(0.0, 0.0));
        assert_eq!(resolved.handles[1].anchor, pos2(20.0, 0.0));
        assert_eq!(resolved.anchors.last().map(|a| a.value_index), Some(2));
    }

    #[test]
    fn arc_exposes_only_its_endpoint() {
        let resolved = resolve_points(&parse_path("M 0 0 a 5 5 0 0 1 10 0"));
        assert_eq!(resolved.anchors.len(), 2);
        assert_eq!(resolved.anchors[1].value_index, 5);
        assert_eq!(resolved.anchors[1].position, pos2(10.0, 0.0));
        assert!(resolved.handles.is_empty());
    }

    #[test]
    fn close_path_returns_to_subpath_start() {
        assert_eq!(anchors("M 5 5 l 10 0 z l 0 10"), vec![pos2(5.0, 5.0), pos2(15.0, 5.0), pos2(5.0, 15.0)]);
    }

    #[test]
    fn repeated_move_groups_only_set_start_once() {
        assert_eq!(anchors("M 1 1 2 2 z m 1 0"), vec![pos2(1.0, 1.0), pos2(2.0, 2.0), pos2(2.0, 1.0)]);
    }

    #[test]
    fn incomplete_groups_are_ignored() {
        assert_eq!(anchors("M 0 0 L 1 2 3"), vec![pos2(0.0, 0.0), pos2(1.0, 2.0)]);
    }

    #[test]
    fn cubic_bounds_include_bulge() {
        let bounds = path_bounds(&parse_path("M 0 0 C 0 10 10 10 10 0")).unwrap_or(Rect::NOTHING);
        assert!((bounds.max.y - 7.5).abs() < 1e-3);
        assert!((bounds.min.x).abs() < 1e-3 && (bounds.max.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn smooth_quad_reflects_previous_control() {
        let segments = path_segments(&parse_path("M 0 0 Q 5 10 10 0 T 20 0"));
        assert_eq!(segments[2], Segment::Quad(pos2(10.0, 0.0), pos2(15.0, -10.0), pos2(20.0, 0.0)));
    }

    #[test]
    fn half_circle_arc_bounds() {
        let bounds = path_bounds(&parse_path("M 0 0 A 5 5 0 0 1 10 0")).unwrap_or(Rect::NOTHING);
        assert!((bounds.min.y + 5.0).abs() < 0.1, "{bounds:?}");
        assert!((bounds.max.y).abs() < 1e-3);
    }
}
