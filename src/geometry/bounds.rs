//! Root-space bounding boxes and the overflow check built on them.

use egui::Rect;

use super::transform::element_ctm;
use super::transform_rect;
use crate::document::{NodeId, SvgDocument, ViewBox};
use crate::element::{Shape, ShapeKind};

/// Containers whose children are never painted directly.
pub const NON_RENDERING_TAGS: &[&str] = &[
    "defs",
    "clippath",
    "mask",
    "pattern",
    "marker",
    "symbol",
    "lineargradient",
    "radialgradient",
    "style",
    "metadata",
    "title",
    "desc",
    "script",
];

/// Slack for float noise when comparing against the viewport.
pub const OVERFLOW_TOLERANCE: f32 = 0.01;

/// Whether a node and its subtree take part in rendering.
pub(crate) fn is_rendered(doc: &SvgDocument, node: NodeId, overlay_class: Option<&str>) -> bool {
    let Some(tag) = doc.tag(node) else {
        return false;
    };
    if NON_RENDERING_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        return false;
    }
    if overlay_class.is_some_and(|class| doc.has_class(node, class)) {
        return false;
    }
    if doc.attribute(node, "display").is_some_and(|d| d.trim() == "none") {
        return false;
    }
    let hidden_by_style = doc.attribute(node, "style").is_some_and(|style| {
        style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .any(|(k, v)| k.trim() == "display" && v.trim() == "none")
    });
    !hidden_by_style
}

/// Box of a single node in root user space, children included for containers.
pub fn element_bounds(doc: &SvgDocument, node: NodeId) -> Option<Rect> {
    node_bounds(doc, node, None)
}

fn node_bounds(doc: &SvgDocument, node: NodeId, overlay_class: Option<&str>) -> Option<Rect> {
    let tag = doc.tag(node)?.to_ascii_lowercase();
    if let Some(shape) = ShapeKind::from_element(doc, node) {
        let local = shape.local_bounds()?;
        return Some(transform_rect(&element_ctm(doc, node), local));
    }
    match tag.as_str() {
        "image" | "use" | "foreignobject" => {
            let width = doc.number_attribute(node, "width")?;
            let height = doc.number_attribute(node, "height")?;
            let x = doc.number_attribute(node, "x").unwrap_or(0.0);
            let y = doc.number_attribute(node, "y").unwrap_or(0.0);
            let local = Rect::from_min_size(egui::pos2(x, y), egui::vec2(width, height));
            Some(transform_rect(&element_ctm(doc, node), local))
        }
        "g" | "a" | "switch" | "svg" => children_bounds(doc, node, overlay_class),
        _ => None,
    }
}

fn children_bounds(doc: &SvgDocument, node: NodeId, overlay_class: Option<&str>) -> Option<Rect> {
    doc.child_elements(node)
        .filter(|&child| is_rendered(doc, child, overlay_class))
        .filter_map(|child| node_bounds(doc, child, overlay_class))
        .reduce(|a, b| a.union(b))
}

/// Union of every visible shape, skipping editor overlay markup.
pub fn content_bounds(doc: &SvgDocument, overlay_class: &str) -> Option<Rect> {
    children_bounds(doc, doc.root(), Some(overlay_class))
}

/// Whether content reaches past the declared canvas.
pub fn exceeds_viewport(bounds: Option<Rect>, view_box: Option<ViewBox>) -> bool {
    let (Some(bounds), Some(view_box)) = (bounds, view_box) else {
        return false;
    };
    let canvas = view_box.rect().expand(OVERFLOW_TOLERANCE);
    !canvas.contains_rect(bounds)
}
