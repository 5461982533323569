//! Editable shape primitives.
//!
//! Each kind knows which points it exposes and how a drag of one of those
//! points rewrites its attributes. Everything is computed in the shape's own
//! user space; callers handle the transform to and from the root.

use egui::{Pos2, Rect, Vec2};

use crate::document::{NodeId, SvgDocument};
use crate::overlay::Corner;

mod common;
pub(crate) mod circle;
pub(crate) mod ellipse;
pub(crate) mod line;
pub(crate) mod path;
pub(crate) mod polygon;
pub(crate) mod rect;

pub use circle::CircleShape;
pub use common::{MIN_SHAPE_SIZE, format_number};
pub use ellipse::EllipseShape;
pub use line::LineShape;
pub use path::PathShape;
pub use polygon::PolygonShape;
pub use rect::RectShape;

/// Tags that get point handles when selected directly or inside a group.
pub const EDITABLE_TAGS: &[&str] = &["path", "polygon", "polyline", "rect", "circle", "ellipse", "line"];

/// Identifies one draggable point of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointId {
    /// A coordinate pair (or single H/V value) inside a path command.
    PathValue { command: usize, value: usize },
    Corner(Corner),
    Center,
    Radius,
    RadiusX,
    RadiusY,
    LineStart,
    LineEnd,
    Vertex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointRole {
    Anchor,
    /// A bezier control point, drawn with a tether to `anchor`.
    Control { anchor: Pos2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub id: PointId,
    pub position: Pos2,
    pub role: PointRole,
}

impl ControlPoint {
    pub fn anchor(id: PointId, position: Pos2) -> Self {
        Self { id, position, role: PointRole::Anchor }
    }
}

/// One attribute write produced by a point drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEdit {
    pub name: &'static str,
    pub value: String,
}

impl AttributeEdit {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self { name, value: value.into() }
    }

    pub(crate) fn number(name: &'static str, value: f32) -> Self {
        Self::new(name, format_number(value))
    }
}

/// Common behaviour of every editable shape kind.
pub trait Shape {
    /// Draggable points, in local user space.
    fn control_points(&self) -> Vec<ControlPoint>;

    /// Attribute values after dragging `point` by `delta` from this state.
    ///
    /// `self` is the pre-drag snapshot and `delta` the cumulative offset, so
    /// repeated calls during one drag never compound. Unknown points yield
    /// no edits.
    fn apply_point_delta(&self, point: PointId, delta: Vec2, min_size: f32) -> Vec<AttributeEdit>;

    /// Geometric bounds in local user space.
    fn local_bounds(&self) -> Option<Rect>;

    /// Every attribute `apply_point_delta` may write.
    fn edited_attributes(&self) -> &'static [&'static str];
}

/// The closed set of shapes the editor can reshape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Path(PathShape),
    Rect(RectShape),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Line(LineShape),
    /// Both `<polygon>` and `<polyline>`.
    Polygon(PolygonShape),
}

impl ShapeKind {
    /// Read the current attributes of an element. `None` for tags that are
    /// not reshapeable.
    pub fn from_element(doc: &SvgDocument, node: NodeId) -> Option<Self> {
        let tag = doc.tag(node)?.to_ascii_lowercase();
        let shape = match tag.as_str() {
            "path" => ShapeKind::Path(PathShape::from_element(doc, node)),
            "rect" => ShapeKind::Rect(RectShape::from_element(doc, node)),
            "circle" => ShapeKind::Circle(CircleShape::from_element(doc, node)),
            "ellipse" => ShapeKind::Ellipse(EllipseShape::from_element(doc, node)),
            "line" => ShapeKind::Line(LineShape::from_element(doc, node)),
            "polygon" | "polyline" => ShapeKind::Polygon(PolygonShape::from_element(doc, node)),
            _ => return None,
        };
        Some(shape)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeKind::Path(_) => "path",
            ShapeKind::Rect(_) => "rect",
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Ellipse(_) => "ellipse",
            ShapeKind::Line(_) => "line",
            ShapeKind::Polygon(_) => "polygon",
        }
    }
}

impl Shape for ShapeKind {
    fn control_points(&self) -> Vec<ControlPoint> {
        match self {
            ShapeKind::Path(s) => s.control_points(),
            ShapeKind::Rect(s) => s.control_points(),
            ShapeKind::Circle(s) => s.control_points(),
            ShapeKind::Ellipse(s) => s.control_points(),
            ShapeKind::Line(s) => s.control_points(),
            ShapeKind::Polygon(s) => s.control_points(),
        }
    }

    fn apply_point_delta(&self, point: PointId, delta: Vec2, min_size: f32) -> Vec<AttributeEdit> {
        match self {
            ShapeKind::Path(s) => s.apply_point_delta(point, delta, min_size),
            ShapeKind::Rect(s) => s.apply_point_delta(point, delta, min_size),
            ShapeKind::Circle(s) => s.apply_point_delta(point, delta, min_size),
            ShapeKind::Ellipse(s) => s.apply_point_delta(point, delta, min_size),
            ShapeKind::Line(s) => s.apply_point_delta(point, delta, min_size),
            ShapeKind::Polygon(s) => s.apply_point_delta(point, delta, min_size),
        }
    }

    fn local_bounds(&self) -> Option<Rect> {
        match self {
            ShapeKind::Path(s) => s.local_bounds(),
            ShapeKind::Rect(s) => s.local_bounds(),
            ShapeKind::Circle(s) => s.local_bounds(),
            ShapeKind::Ellipse(s) => s.local_bounds(),
            ShapeKind::Line(s) => s.local_bounds(),
            ShapeKind::Polygon(s) => s.local_bounds(),
        }
    }

    fn edited_attributes(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Path(s) => s.edited_attributes(),
            ShapeKind::Rect(s) => s.edited_attributes(),
            ShapeKind::Circle(s) => s.edited_attributes(),
            ShapeKind::Ellipse(s) => s.edited_attributes(),
            ShapeKind::Line(s) => s.edited_attributes(),
            ShapeKind::Polygon(s) => s.edited_attributes(),
        }
    }
}

/// Whether `tag` names a shape that gets point handles.
pub fn is_editable_tag(tag: &str) -> bool {
    EDITABLE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}
