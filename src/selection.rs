//! Mapping a pointer target to the element the user means to select.

use crate::document::{NodeId, SvgDocument};
use crate::overlay::is_overlay_node;

/// Structural or non-visual tags that are never selected.
pub const SKIP_TAGS: &[&str] = &[
    "defs",
    "style",
    "metadata",
    "title",
    "desc",
    "clippath",
    "lineargradient",
    "radialgradient",
    "stop",
];

/// Primitives that are selected directly when hit.
pub const SHAPE_TAGS: &[&str] = &[
    "path", "rect", "circle", "ellipse", "line", "polygon", "polyline", "text", "image", "use",
];

fn tag_in(doc: &SvgDocument, node: NodeId, set: &[&str]) -> bool {
    doc.tag(node).is_some_and(|tag| set.iter().any(|t| t.eq_ignore_ascii_case(tag)))
}

/// Find the selectable element for a pointer target.
///
/// A leaf shape always wins over its groups. When the target is not a shape,
/// the nearest shape ancestor is used, and failing that a `<g>` sitting
/// directly under the root. Nested groups are never selected on their own.
pub fn resolve_selectable(doc: &SvgDocument, target: NodeId, overlay_class: &str) -> Option<NodeId> {
    let root = doc.root();
    if target == root || !doc.contains(target) || !doc.is_element(target) {
        return None;
    }
    if is_overlay_node(doc, target, overlay_class) {
        return None;
    }
    if tag_in(doc, target, SKIP_TAGS) {
        return None;
    }
    if tag_in(doc, target, SHAPE_TAGS) {
        return Some(target);
    }

    for ancestor in std::iter::once(target).chain(doc.ancestors(target)) {
        if ancestor == root {
            break;
        }
        if ancestor != target && tag_in(doc, ancestor, SHAPE_TAGS) {
            return Some(ancestor);
        }
        let is_group = doc.tag(ancestor).is_some_and(|t| t.eq_ignore_ascii_case("g"));
        if is_group && doc.parent(ancestor) == Some(root) {
            return Some(ancestor);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS: &str = "svg-editor-overlay";

    fn find(doc: &SvgDocument, id: &str) -> NodeId {
        std::iter::once(doc.root())
            .chain(doc.descendants(doc.root()))
            .find(|&n| doc.attribute(n, "id") == Some(id))
            .unwrap()
    }

    fn sample() -> SvgDocument {
        SvgDocument::parse(concat!(
            r#"<svg>"#,
            r#"<g id="top"><title id="title">t</title><g id="inner"><g id="deep"><path id="leaf" d="M0 0"/></g></g>"#,
            r#"<text id="label"><tspan id="span">x</tspan></text></g>"#,
            r#"<defs id="defs"><linearGradient id="grad"/></defs>"#,
            r#"<g class="svg-editor-overlay"><rect id="handle"/></g>"#,
            r#"<RECT id="upper"/>"#,
            r#"</svg>"#,
        ))
        .unwrap()
    }

    #[test]
    fn leaf_shape_wins_over_groups() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "leaf"), CLASS), Some(find(&doc, "leaf")));
    }

    #[test]
    fn nested_group_falls_back_to_top_level_group() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "deep"), CLASS), Some(find(&doc, "top")));
        assert_eq!(resolve_selectable(&doc, find(&doc, "top"), CLASS), Some(find(&doc, "top")));
    }

    #[test]
    fn non_visual_targets_are_rejected() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "title"), CLASS), None);
        assert_eq!(resolve_selectable(&doc, find(&doc, "grad"), CLASS), None);
        assert_eq!(resolve_selectable(&doc, doc.root(), CLASS), None);
    }

    #[test]
    fn overlay_nodes_are_rejected() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "handle"), CLASS), None);
    }

    #[test]
    fn shape_ancestor_is_found() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "span"), CLASS), Some(find(&doc, "label")));
    }

    #[test]
    fn tags_compare_case_insensitively() {
        let doc = sample();
        assert_eq!(resolve_selectable(&doc, find(&doc, "upper"), CLASS), Some(find(&doc, "upper")));
    }

    #[test]
    fn detached_nodes_are_rejected() {
        let mut doc = sample();
        let leaf = find(&doc, "leaf");
        doc.remove(leaf);
        assert_eq!(resolve_selectable(&doc, leaf, CLASS), None);
    }
}
