//! The interaction state machine of the shape editor.
//!
//! One drag at a time, and only ever on the current selection:
//! ```text
//!                       ┌───────────────┐
//!                 ┌─────► MovingElement ├─────┐
//!                 │     └───────────────┘     │
//! ┌──────┐  ┌─────┴────┐                      │
//! │ Idle ├──► Selected ◄──────────────────────┤
//! └──▲───┘  └─────┬────┘                      │
//!    │            │     ┌───────────────┐     │
//!    │            └─────► DraggingPoint ├─────┘
//!    │                  └───────────────┘
//!    └── from any state (deselect, delete, document swap)
//! ```
use egui::{Pos2, Vec2};

use crate::document::NodeId;
use crate::element::ShapeKind;
use crate::geometry::AffineSpace;
use crate::overlay::Handle;

/// Pre-drag values for moving a whole element.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    /// Pointer position in the element's parent space
    pub start: Pos2,
    /// Leading translate of the element when the drag began
    pub origin: Vec2,
    /// Raw `transform` attribute, restored verbatim on a zero-length drag
    pub original_transform: Option<String>,
    /// Parent space to root space
    pub space: AffineSpace,
}

/// Pre-drag values for dragging one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PointDragSession {
    pub handle: Handle,
    /// Pointer position in the shape's local space
    pub start: Pos2,
    /// Shape as it was before the drag; deltas are applied to this
    pub shape: ShapeKind,
    /// Raw values of every attribute the drag may write
    pub originals: Vec<(&'static str, Option<String>)>,
    /// Local space to root space
    pub space: AffineSpace,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// Nothing selected
    #[default]
    Idle,
    Selected {
        element: NodeId,
    },
    MovingElement {
        element: NodeId,
        session: MoveSession,
    },
    DraggingPoint {
        element: NodeId,
        session: PointDragSession,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            // Anything can be dropped back to nothing
            (_, EditorState::Idle) => true,

            (EditorState::Idle, EditorState::Selected { .. }) => true,

            // Reselecting, or starting a drag on the current selection
            (EditorState::Selected { .. }, EditorState::Selected { .. }) => true,
            (EditorState::Selected { element: a }, EditorState::MovingElement { element: b, .. }) => a == b,
            (EditorState::Selected { element: a }, EditorState::DraggingPoint { element: b, .. }) => a == b,

            // Releasing a drag keeps the selection
            (EditorState::MovingElement { element: a, .. }, EditorState::Selected { element: b }) => a == b,
            (EditorState::DraggingPoint { element: a, .. }, EditorState::Selected { element: b }) => a == b,

            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Selected { .. } => "Selected",
            EditorState::MovingElement { .. } => "MovingElement",
            EditorState::DraggingPoint { .. } => "DraggingPoint",
        }
    }

    /// Returns true if nothing is selected
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true while a move or point drag owns the pointer
    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::MovingElement { .. } | EditorState::DraggingPoint { .. })
    }

    /// The selected element, in any non-idle state
    pub fn selected_element(&self) -> Option<NodeId> {
        match self {
            EditorState::Idle => None,
            EditorState::Selected { element }
            | EditorState::MovingElement { element, .. }
            | EditorState::DraggingPoint { element, .. } => Some(*element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SvgDocument;

    #[test]
    fn drags_only_start_from_the_selection() {
        let doc = SvgDocument::parse(r#"<svg><rect/><rect/></svg>"#).unwrap();
        let ids: Vec<NodeId> = doc.child_elements(doc.root()).collect();
        let selected = EditorState::Selected { element: ids[0] };
        let session = MoveSession {
            start: Pos2::ZERO,
            origin: Vec2::ZERO,
            original_transform: None,
            space: AffineSpace::new(glam::Affine2::IDENTITY).unwrap(),
        };
        let moving_same = EditorState::MovingElement { element: ids[0], session: session.clone() };
        let moving_other = EditorState::MovingElement { element: ids[1], session };

        assert!(EditorState::Idle.can_transition_to(&selected));
        assert!(!EditorState::Idle.can_transition_to(&moving_same));
        assert!(selected.can_transition_to(&moving_same));
        assert!(!selected.can_transition_to(&moving_other));
        assert!(moving_same.can_transition_to(&selected));
        assert!(!moving_same.can_transition_to(&EditorState::Selected { element: ids[1] }));
        assert!(moving_same.can_transition_to(&EditorState::Idle));
        assert!(moving_same.is_dragging());
        assert_eq!(moving_same.selected_element(), Some(ids[0]));
    }
}
