//! Handle overlay markup injected into the live document.
//!
//! The overlay is a single `<g>` under the root carrying the reserved class.
//! It is rebuilt from scratch whenever the selection or the geometry changes;
//! handle identity is positional (`data-handle="<index>"`) and only valid
//! until the next rebuild.

mod handle;

pub use handle::{Corner, Handle, HandleKind};

use egui::Rect;

use crate::document::{NodeId, SvgDocument};
use crate::element::{PointRole, Shape, ShapeKind, format_number, is_editable_tag};
use crate::geometry::{AffineSpace, CoordinateSpace, element_ctm};

/// Attribute linking an overlay node back to its handle index.
pub const HANDLE_ATTRIBUTE: &str = "data-handle";

const ACCENT: &str = "#2563eb";
const CONTROL_RADIUS: f32 = 4.0;

/// Handles for the selected shape, or for every editable shape in a group.
pub fn build_handles(doc: &SvgDocument, selected: NodeId) -> Vec<Handle> {
    let is_group = doc.tag(selected).is_some_and(|t| t.eq_ignore_ascii_case("g"));
    let targets: Vec<NodeId> = if is_group {
        doc.descendants(selected)
            .into_iter()
            .filter(|&n| doc.tag(n).is_some_and(is_editable_tag))
            .collect()
    } else {
        vec![selected]
    };

    let mut handles = Vec::new();
    for target in targets {
        let Some(shape) = ShapeKind::from_element(doc, target) else {
            continue;
        };
        let Some(space) = AffineSpace::new(element_ctm(doc, target)) else {
            log::debug!("Skipping handles for {target:?}: transform is not invertible");
            continue;
        };
        handles.extend(shape.control_points().into_iter().map(|cp| Handle {
            target,
            point: cp.id,
            position: space.to_global(cp.position),
            kind: match cp.role {
                PointRole::Anchor => HandleKind::Anchor,
                PointRole::Control { anchor } => HandleKind::Control { anchor: space.to_global(anchor) },
            },
        }));
    }
    handles
}

fn attrs(pairs: &[(&str, String)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
}

/// Append the overlay group to the root and return it.
pub fn inject_overlay(
    doc: &mut SvgDocument,
    handles: &[Handle],
    outline: Option<Rect>,
    overlay_class: &str,
    handle_size: f32,
) -> NodeId {
    let root = doc.root();
    let group = doc.append_element(
        root,
        "g",
        attrs(&[("class", overlay_class.to_owned()), ("pointer-events", "all".to_owned())]),
    );

    if let Some(rect) = outline {
        doc.append_element(
            group,
            "rect",
            attrs(&[
                ("x", format_number(rect.min.x)),
                ("y", format_number(rect.min.y)),
                ("width", format_number(rect.width())),
                ("height", format_number(rect.height())),
                ("fill", "none".to_owned()),
                ("stroke", ACCENT.to_owned()),
                ("stroke-dasharray", "4 2".to_owned()),
                ("vector-effect", "non-scaling-stroke".to_owned()),
                ("pointer-events", "none".to_owned()),
            ]),
        );
    }

    for handle in handles {
        if let HandleKind::Control { anchor } = handle.kind {
            doc.append_element(
                group,
                "line",
                attrs(&[
                    ("x1", format_number(anchor.x)),
                    ("y1", format_number(anchor.y)),
                    ("x2", format_number(handle.position.x)),
                    ("y2", format_number(handle.position.y)),
                    ("stroke", "#94a3b8".to_owned()),
                    ("vector-effect", "non-scaling-stroke".to_owned()),
                    ("pointer-events", "none".to_owned()),
                ]),
            );
        }
    }

    for (index, handle) in handles.iter().enumerate() {
        let p = handle.position;
        let node_attrs = match handle.kind {
            HandleKind::Control { .. } => attrs(&[
                ("cx", format_number(p.x)),
                ("cy", format_number(p.y)),
                ("r", format_number(CONTROL_RADIUS)),
                ("fill", "#ffffff".to_owned()),
                ("stroke", ACCENT.to_owned()),
                (HANDLE_ATTRIBUTE, index.to_string()),
            ]),
            HandleKind::Anchor => attrs(&[
                ("x", format_number(p.x - handle_size / 2.0)),
                ("y", format_number(p.y - handle_size / 2.0)),
                ("width", format_number(handle_size)),
                ("height", format_number(handle_size)),
                ("fill", ACCENT.to_owned()),
                ("stroke", "#ffffff".to_owned()),
                (HANDLE_ATTRIBUTE, index.to_string()),
            ]),
        };
        let tag = if handle.is_control() { "circle" } else { "rect" };
        doc.append_element(group, tag, node_attrs);
    }
    group
}

/// Remove every overlay group from the root.
pub fn clear_overlay(doc: &mut SvgDocument, overlay_class: &str) {
    let root = doc.root();
    let overlays: Vec<NodeId> = doc
        .child_elements(root)
        .filter(|&c| doc.has_class(c, overlay_class))
        .collect();
    for node in overlays {
        doc.remove(node);
    }
}

/// Whether `node` is overlay markup or sits inside it.
pub fn is_overlay_node(doc: &SvgDocument, node: NodeId, overlay_class: &str) -> bool {
    std::iter::once(node)
        .chain(doc.ancestors(node))
        .any(|n| doc.has_class(n, overlay_class))
}

/// Handle index carried by an overlay node, if it is one.
pub fn handle_index(doc: &SvgDocument, node: NodeId, overlay_class: &str) -> Option<usize> {
    if !is_overlay_node(doc, node, overlay_class) {
        return None;
    }
    doc.attribute(node, HANDLE_ATTRIBUTE)?.parse().ok()
}
