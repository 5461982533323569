use egui::Vec2;

use crate::document::NodeId;

/// Why the working document was swapped out wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOrigin {
    /// New text arrived from the host (a new generation, switching results).
    External,
    /// A history snapshot was restored.
    Undo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A mutation was committed. `svg` is the clean serialized document.
    DocumentChanged {
        svg: String,
    },
    DocumentReplaced {
        origin: ReplaceOrigin,
    },
    SelectionChanged {
        selected: Option<NodeId>,
    },
    StateChanged {
        from: &'static str,
        to: &'static str,
    },
    OverflowChanged {
        overflowing: bool,
    },
    ViewChanged {
        zoom_percent: f32,
        pan: Vec2,
    },
    /// The host should blur any focused text input so Delete reaches the editor.
    BlurTextInput,
}
