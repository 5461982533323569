use egui::{CursorIcon, Pos2, Rect};

use crate::document::NodeId;
use crate::element::PointId;

/// Represents a corner of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomLeft => "bottom_left",
            Corner::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft => CursorIcon::ResizeNwSe,
            Corner::TopRight => CursorIcon::ResizeNeSw,
            Corner::BottomLeft => CursorIcon::ResizeNeSw,
            Corner::BottomRight => CursorIcon::ResizeNwSe,
        }
    }

    /// Position of this corner on `rect`.
    pub fn of(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleKind {
    /// Drawn as a square.
    Anchor,
    /// Drawn as a circle with a tether line to `anchor` (root space).
    Control { anchor: Pos2 },
}

/// One draggable handle, positioned in root user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub target: NodeId,
    pub point: PointId,
    pub position: Pos2,
    pub kind: HandleKind,
}

impl Handle {
    /// Cursor a host should show while hovering this handle.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self.point {
            PointId::Corner(corner) => corner.cursor_icon(),
            PointId::Radius | PointId::RadiusX => CursorIcon::ResizeHorizontal,
            PointId::RadiusY => CursorIcon::ResizeVertical,
            _ => CursorIcon::Grab,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self.kind, HandleKind::Control { .. })
    }
}
