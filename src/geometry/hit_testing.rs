//! Pointer targeting for hosts that hand the editor positions instead of
//! already-resolved nodes. All positions are in root user space.

use egui::Pos2;

use super::bounds::{element_bounds, is_rendered};
use crate::document::{NodeId, SvgDocument};
use crate::overlay::Handle;

/// Tags that can be hit directly.
const HITTABLE_TAGS: &[&str] = &[
    "path", "rect", "circle", "ellipse", "line", "polygon", "polyline", "image", "use",
];

/// The topmost handle within `radius`, by index into `handles`.
pub fn handle_at(handles: &[Handle], pos: Pos2, radius: f32) -> Option<usize> {
    // Later handles are painted over earlier ones.
    handles
        .iter()
        .enumerate()
        .rev()
        .find(|(_, handle)| handle.position.distance(pos) <= radius)
        .map(|(index, _)| index)
}

/// The topmost drawable element whose box, grown by `tolerance`, holds `pos`.
pub fn shape_at(doc: &SvgDocument, pos: Pos2, overlay_class: &str, tolerance: f32) -> Option<NodeId> {
    let mut hit = None;
    let mut stack = vec![doc.root()];
    while let Some(node) = stack.pop() {
        for child in doc.child_elements(node).collect::<Vec<_>>().into_iter().rev() {
            if is_rendered(doc, child, Some(overlay_class)) {
                stack.push(child);
            }
        }
        let hittable = doc
            .tag(node)
            .is_some_and(|tag| HITTABLE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)));
        if hittable && element_bounds(doc, node).is_some_and(|b| b.expand(tolerance).contains(pos)) {
            // Pre-order visit, so the last match is painted last.
            hit = Some(node);
        }
    }
    hit
}
