use egui::{Vec2, pos2, vec2};
use svg_path_editor::element::PathShape;
use svg_path_editor::path::{CommandKind, path_bounds};
use svg_path_editor::{PointId, Shape, parse_path, resolve_points, serialize_path};

fn anchors_of(d: &str) -> Vec<egui::Pos2> {
    resolve_points(&parse_path(d)).anchors.iter().map(|a| a.position).collect()
}

#[test]
fn test_serialized_path_resolves_to_same_points() {
    let inputs = [
        "M10 10 L20 20 30 10 Z",
        "m 5,5 l 10 0 0 10 h -10 v -10 z",
        "M0 0 C10 0 20 10 20 20 S30 40 40 40",
        "M0 0 Q5 10 10 0 T20 0 t10 0",
        "M0 0 A5 5 0 0 1 10 10 a5 5 0 1 0 10 10",
        "M1.5 -2.25 L3e1 4 M7 7 l-1 -1",
    ];
    for d in inputs {
        let first = parse_path(d);
        let reparsed = parse_path(&serialize_path(&first));
        assert_eq!(resolve_points(&reparsed), resolve_points(&first), "path {d}");
    }
}

#[test]
fn test_closed_polyline_has_one_anchor_per_point() {
    let resolved = resolve_points(&parse_path("M 1 2 L 3 4 L 5 6 Z"));
    let positions: Vec<_> = resolved.anchors.iter().map(|a| a.position).collect();
    assert_eq!(positions, vec![pos2(1.0, 2.0), pos2(3.0, 4.0), pos2(5.0, 6.0)]);
    assert!(resolved.handles.is_empty());
}

#[test]
fn test_relative_commands_accumulate() {
    assert_eq!(
        anchors_of("M 10 10 l 5 0 l 0 5"),
        vec![pos2(10.0, 10.0), pos2(15.0, 10.0), pos2(15.0, 15.0)]
    );
    // Close path returns the pen to the subpath start.
    assert_eq!(
        anchors_of("m 10 10 l 5 0 z l 0 5"),
        vec![pos2(10.0, 10.0), pos2(15.0, 10.0), pos2(10.0, 15.0)]
    );
}

#[test]
fn test_cubic_handles_are_tethered() {
    let resolved = resolve_points(&parse_path("M 0 0 C 1 1 2 2 3 3"));
    let anchors: Vec<_> = resolved.anchors.iter().map(|a| a.position).collect();
    assert_eq!(anchors, vec![pos2(0.0, 0.0), pos2(3.0, 3.0)]);

    assert_eq!(resolved.handles.len(), 2);
    assert_eq!(resolved.handles[0].position, pos2(1.0, 1.0));
    assert_eq!(resolved.handles[0].anchor, pos2(0.0, 0.0));
    assert_eq!(resolved.handles[1].position, pos2(2.0, 2.0));
    assert_eq!(resolved.handles[1].anchor, pos2(3.0, 3.0));
}

#[test]
fn test_relative_cubic_handles_use_segment_start() {
    let resolved = resolve_points(&parse_path("M 10 10 c 1 0 2 0 3 3"));
    assert_eq!(resolved.handles[0].position, pos2(11.0, 10.0));
    assert_eq!(resolved.handles[1].position, pos2(12.0, 10.0));
    assert_eq!(resolved.anchors[1].position, pos2(13.0, 13.0));
}

#[test]
fn test_point_drag_changes_only_that_pair() {
    let path = PathShape::new(parse_path("M0 0 L10 10 20 20"));
    let edits = path.apply_point_delta(PointId::PathValue { command: 1, value: 2 }, vec2(3.0, -2.0), 1.0);
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].name, "d");
    assert_eq!(edits[0].value, "M0 0 L10 10 23 18");
}

#[test]
fn test_point_drag_keeps_sibling_text_exact() {
    let path = PathShape::new(parse_path("M0 0 L10 10 20 20 L 12.3456789 1234.56789"));
    let edits = path.apply_point_delta(PointId::PathValue { command: 1, value: 2 }, vec2(3.0, -2.0), 1.0);
    assert_eq!(edits[0].value, "M0 0 L10 10 23 18 L12.3456789 1234.56789");
}

#[test]
fn test_stray_values_after_close_path_survive() {
    let commands = parse_path("M0 0 L5 0 Z 5 5");
    assert_eq!(serialize_path(&commands), "M0 0 L5 0 Z5 5");
    assert_eq!(resolve_points(&commands).anchors.len(), 2);
}

#[test]
fn test_horizontal_and_vertical_follow_one_axis() {
    let path = PathShape::new(parse_path("M0 0 H10 V10"));
    let h = path.apply_point_delta(PointId::PathValue { command: 1, value: 0 }, vec2(4.0, 9.0), 1.0);
    assert_eq!(h[0].value, "M0 0 H14 V10");
    let v = path.apply_point_delta(PointId::PathValue { command: 2, value: 0 }, vec2(9.0, -4.0), 1.0);
    assert_eq!(v[0].value, "M0 0 H10 V6");
}

#[test]
fn test_zero_delta_keeps_path_text() {
    let commands = parse_path("M0 0 L10 10");
    let path = PathShape::new(commands.clone());
    let edits = path.apply_point_delta(PointId::PathValue { command: 1, value: 0 }, Vec2::ZERO, 1.0);
    assert_eq!(parse_path(&edits[0].value), commands);
}

#[test]
fn test_bounds_cover_curve_extrema() {
    let commands = parse_path("M0 0 Q10 20 20 0");
    assert_eq!(commands[1].kind, CommandKind::QuadTo);
    let bounds = path_bounds(&commands).unwrap();
    assert!((bounds.max.y - 10.0).abs() < 1e-3);
    assert_eq!(bounds.min, pos2(0.0, 0.0));
    assert_eq!(path_bounds(&[]), None);
}
