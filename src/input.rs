use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};

use crate::document::NodeId;

/// Pixels per line for line-based wheel deltas.
const WHEEL_LINE_HEIGHT: f32 = 40.0;

/// Input the editor reacts to. Positions are in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed. `target` is the node under the pointer when
    /// the host already knows it (a DOM event target); otherwise the editor
    /// hit-tests `pos` itself.
    PointerDown { pos: Pos2, target: Option<NodeId> },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2 },
    KeyDown { key: Key, modifiers: Modifiers },
    /// Scroll delta, positive y scrolling down
    Wheel { delta: Vec2, modifiers: Modifiers },
}

impl InputEvent {
    /// Screen position of pointer events
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerMove { pos }
            | InputEvent::PointerUp { pos } => Some(*pos),
            _ => None,
        }
    }

    /// Convert raw egui events for hosts that draw the canvas with egui.
    ///
    /// Only the primary button is tracked. Canvas-relative offsets are the
    /// host's job, through the editor's base screen transform.
    pub fn from_egui(events: &[egui::Event]) -> Vec<InputEvent> {
        events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerButton { pos, button: PointerButton::Primary, pressed, .. } => {
                    Some(if *pressed {
                        InputEvent::PointerDown { pos: *pos, target: None }
                    } else {
                        InputEvent::PointerUp { pos: *pos }
                    })
                }
                egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove { pos: *pos }),
                egui::Event::Key { key, pressed: true, modifiers, .. } => {
                    Some(InputEvent::KeyDown { key: *key, modifiers: *modifiers })
                }
                egui::Event::MouseWheel { unit, delta, modifiers } => {
                    let scale = match unit {
                        egui::MouseWheelUnit::Point => 1.0,
                        egui::MouseWheelUnit::Line => WHEEL_LINE_HEIGHT,
                        egui::MouseWheelUnit::Page => WHEEL_LINE_HEIGHT * 20.0,
                    };
                    // egui reports scroll-up as positive y.
                    Some(InputEvent::Wheel { delta: -*delta * scale, modifiers: *modifiers })
                }
                _ => None,
            })
            .collect()
    }
}
