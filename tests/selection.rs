use egui::pos2;
use svg_path_editor::config::DEFAULT_OVERLAY_CLASS;
use svg_path_editor::selection::resolve_selectable;
use svg_path_editor::{EditorConfig, Hit, NodeId, SvgDocument, SvgEditor};

fn find(doc: &SvgDocument, id: &str) -> NodeId {
    doc.descendants(doc.root())
        .into_iter()
        .find(|&n| doc.attribute(n, "id") == Some(id))
        .unwrap()
}

fn nested_document() -> SvgDocument {
    SvgDocument::parse(concat!(
        r#"<svg viewBox="0 0 100 100">"#,
        r#"<g id="outer"><title id="title">logo</title>"#,
        r#"<g id="middle"><g id="inner"><path id="leaf" d="M10 10 L40 40"/></g></g>"#,
        r#"<g id="empty"/>"#,
        r#"</g>"#,
        r#"<defs id="defs"><linearGradient id="grad"><stop id="stop"/></linearGradient></defs>"#,
        r#"</svg>"#,
    ))
    .unwrap()
}

#[test]
fn test_leaf_shape_wins_over_groups() {
    let doc = nested_document();
    let leaf = find(&doc, "leaf");
    assert_eq!(resolve_selectable(&doc, leaf, DEFAULT_OVERLAY_CLASS), Some(leaf));
}

#[test]
fn test_non_drawable_children_are_ignored() {
    let doc = nested_document();
    assert_eq!(resolve_selectable(&doc, find(&doc, "title"), DEFAULT_OVERLAY_CLASS), None);
    assert_eq!(resolve_selectable(&doc, find(&doc, "stop"), DEFAULT_OVERLAY_CLASS), None);
    assert_eq!(resolve_selectable(&doc, find(&doc, "defs"), DEFAULT_OVERLAY_CLASS), None);
    assert_eq!(resolve_selectable(&doc, doc.root(), DEFAULT_OVERLAY_CLASS), None);
}

#[test]
fn test_nested_groups_fall_back_to_top_level_group() {
    let doc = nested_document();
    let outer = find(&doc, "outer");
    assert_eq!(resolve_selectable(&doc, find(&doc, "empty"), DEFAULT_OVERLAY_CLASS), Some(outer));
    assert_eq!(resolve_selectable(&doc, find(&doc, "inner"), DEFAULT_OVERLAY_CLASS), Some(outer));
    assert_eq!(resolve_selectable(&doc, outer, DEFAULT_OVERLAY_CLASS), Some(outer));
}

#[test]
fn test_click_inside_group_hits_nested_leaf() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut editor = SvgEditor::new(EditorConfig::default());
    let text = nested_document().serialize(&Default::default()).unwrap();
    assert!(editor.apply_external_document(&text));

    let leaf = find(editor.document().unwrap(), "leaf");
    assert_eq!(editor.hit_test(pos2(25.0, 25.0)), Some(Hit::Element(leaf)));
    assert_eq!(editor.hit_test(pos2(80.0, 80.0)), None);
}

#[test]
fn test_overlay_nodes_are_not_selectable() {
    let mut editor = SvgEditor::new(EditorConfig::default());
    assert!(editor.apply_external_document(
        r#"<svg viewBox="0 0 100 100"><rect id="r" x="10" y="10" width="20" height="20"/></svg>"#
    ));
    let rect = find(editor.document().unwrap(), "r");
    assert!(editor.select(rect));

    let doc = editor.document().unwrap();
    let overlay = doc
        .child_elements(doc.root())
        .find(|&n| doc.has_class(n, DEFAULT_OVERLAY_CLASS))
        .unwrap();
    assert_eq!(resolve_selectable(doc, overlay, DEFAULT_OVERLAY_CLASS), None);
    for node in doc.descendants(overlay) {
        assert_eq!(resolve_selectable(doc, node, DEFAULT_OVERLAY_CLASS), None);
    }
}
