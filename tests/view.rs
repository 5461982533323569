use std::cell::RefCell;
use std::rc::Rc;

use egui::{Modifiers, Vec2, pos2, vec2};
use glam::Affine2;
use svg_path_editor::{BackgroundMode, EditorConfig, EditorEvent, InputEvent, SvgEditor, ViewState};

fn editor() -> SvgEditor {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut editor = SvgEditor::new(EditorConfig::default());
    assert!(editor.apply_external_document(
        r#"<svg viewBox="0 0 100 100"><rect x="10" y="10" width="20" height="20"/></svg>"#
    ));
    editor
}

fn view_events(editor: &SvgEditor) -> Rc<RefCell<Vec<(f32, Vec2)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    editor.subscribe(Box::new(move |event: &EditorEvent| {
        if let EditorEvent::ViewChanged { zoom_percent, pan } = event {
            sink.borrow_mut().push((*zoom_percent, *pan));
        }
    }));
    seen
}

#[test]
fn test_zoom_buttons_step_and_clamp() {
    let mut editor = editor();
    let seen = view_events(&editor);
    editor.zoom_in();
    assert_eq!(editor.view().zoom_percent, 125.0);
    editor.zoom_out();
    editor.zoom_out();
    assert_eq!(editor.view().zoom_percent, 75.0);

    editor.set_zoom(10_000.0);
    assert_eq!(editor.view().zoom_percent, 800.0);
    // Already at the limit: no event.
    editor.zoom_in();
    assert_eq!(seen.borrow().len(), 4);

    editor.set_zoom(1.0);
    assert_eq!(editor.view().zoom_percent, 10.0);
}

#[test]
fn test_wheel_pans_or_zooms() {
    let mut editor = editor();
    editor.handle_input(InputEvent::Wheel { delta: vec2(0.0, 30.0), modifiers: Modifiers::NONE });
    assert_eq!(editor.view().pan, vec2(0.0, -30.0));
    assert_eq!(editor.view().zoom_percent, 100.0);

    editor.handle_input(InputEvent::Wheel { delta: vec2(0.0, -50.0), modifiers: Modifiers::COMMAND });
    let zoom = editor.view().zoom_percent;
    assert!((zoom - 100.0 * 0.5f32.exp()).abs() < 1e-2, "zoom was {zoom}");
    assert_eq!(editor.view().pan, vec2(0.0, -30.0));
}

#[test]
fn test_reset_view_keeps_background() {
    let mut editor = editor();
    editor.set_zoom(300.0);
    editor.pan_by(vec2(5.0, 5.0));
    assert_eq!(editor.toggle_background(), BackgroundMode::Checkerboard);

    editor.reset_view();
    assert_eq!(editor.view().zoom_percent, 100.0);
    assert_eq!(editor.view().pan, Vec2::ZERO);
    assert_eq!(editor.view().background, BackgroundMode::Checkerboard);
    assert_eq!(editor.toggle_background(), BackgroundMode::Solid);
}

#[test]
fn test_view_changes_do_not_touch_document() {
    let mut editor = editor();
    let before = editor.serialize();
    editor.zoom_in();
    editor.pan_by(vec2(-20.0, 7.5));
    editor.toggle_background();
    assert_eq!(editor.serialize(), before);
    assert_eq!(editor.history().depth(), 0);
}

#[test]
fn test_drag_deltas_follow_zoom_and_base_transform() {
    let mut editor = editor();
    // Canvas drawn at an offset of (100, 50) pixels, then zoomed.
    editor.set_base_screen_transform(Affine2::from_translation(glam::Vec2::new(100.0, 50.0)));
    editor.set_zoom(200.0);
    // Document (20, 20) lands at screen (240, 140).
    assert_eq!(editor.screen_to_document(pos2(240.0, 140.0)), Some(pos2(20.0, 20.0)));

    editor.handle_input(InputEvent::PointerDown { pos: pos2(240.0, 140.0), target: None });
    editor.handle_input(InputEvent::PointerMove { pos: pos2(260.0, 140.0) });
    editor.handle_input(InputEvent::PointerUp { pos: pos2(260.0, 140.0) });
    assert!(editor.serialize().unwrap().contains(r#"transform="translate(10, 0)""#));
}

#[test]
fn test_view_state_round_trips_through_json() {
    let mut view = ViewState::default();
    view.set_zoom(250.0);
    view.pan_by(vec2(3.0, -4.0));
    view.toggle_background();

    let json = serde_json::to_string(&view).unwrap();
    let restored: ViewState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.zoom_percent, 250.0);
    assert_eq!(restored.pan, vec2(3.0, -4.0));
    assert_eq!(restored.background, BackgroundMode::Checkerboard);
}
