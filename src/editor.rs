//! The editor controller: owns the working document and drives selection,
//! drags, history and the view from host input.

use egui::{Key, Modifiers, Pos2, Vec2, vec2};
use glam::Affine2;

use crate::config::EditorConfig;
use crate::document::{NodeId, SerializeOptions, SvgDocument};
use crate::element::{Shape, ShapeKind};
use crate::error::StateTransitionError;
use crate::event::{EditorEvent, EventBus, EventHandler, ReplaceOrigin};
use crate::geometry::{
    AffineSpace, CoordinateSpace, content_bounds, element_bounds, element_ctm, exceeds_viewport,
    handle_at, leading_translate, parent_ctm, shape_at, with_leading_translate,
};
use crate::history::EditHistory;
use crate::input::InputEvent;
use crate::overlay::{self, Handle};
use crate::selection::resolve_selectable;
use crate::state::{EditorState, MoveSession, PointDragSession};
use crate::view::{BackgroundMode, ViewState};

/// Extra reach, in screen pixels, when hit-testing shapes by position.
const SHAPE_HIT_SLOP: f32 = 2.0;

/// What sits under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into [`SvgEditor::handles`]
    Handle(usize),
    /// The element a click here would select
    Element(NodeId),
}

/// One attribute write: `None` removes the attribute.
type PendingEdit = (NodeId, &'static str, Option<String>);

pub struct SvgEditor {
    config: EditorConfig,
    document: Option<SvgDocument>,
    state: EditorState,
    handles: Vec<Handle>,
    history: EditHistory,
    view: ViewState,
    overflowing: bool,
    /// Root user space to canvas pixels, before zoom and pan
    base_screen: Affine2,
    text_input_focused: bool,
    events: EventBus,
}

impl std::fmt::Debug for SvgEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgEditor")
            .field("state", &self.state.name())
            .field("handles", &self.handles.len())
            .field("history_depth", &self.history.depth())
            .field("overflowing", &self.overflowing)
            .field("view", &self.view)
            .finish()
    }
}

impl Default for SvgEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SvgEditor {
    pub fn new(config: EditorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; falling back to the default editor config");
                EditorConfig::default()
            }
        };
        Self {
            history: EditHistory::new(config.history_depth),
            view: ViewState::new(config.zoom_limits()),
            config,
            document: None,
            state: EditorState::Idle,
            handles: Vec::new(),
            overflowing: false,
            base_screen: Affine2::IDENTITY,
            text_input_focused: false,
            events: EventBus::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Host wiring

    /// Subscribe a handler to every editor event.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    /// Call `callback` with the clean document text after every committed
    /// mutation, including undo.
    pub fn on_change(&self, mut callback: impl FnMut(&str) + 'static) {
        self.events.subscribe(Box::new(move |event: &EditorEvent| {
            if let EditorEvent::DocumentChanged { svg } = event {
                callback(svg.as_str());
            }
        }));
    }

    /// Transform from root user space to canvas pixels, before zoom and pan.
    pub fn set_base_screen_transform(&mut self, transform: Affine2) {
        self.base_screen = transform;
    }

    /// While a text input has focus, Delete, Backspace and undo are left to it.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    // ---------------------------------------------------------------------
    // Document lifecycle

    /// Replace the working document with text supplied by the host.
    ///
    /// Selection, any drag and the history are reset. Text equal to the last
    /// committed state is the host echoing our own output back and is
    /// ignored. Unparseable text leaves the current document in place.
    pub fn apply_external_document(&mut self, text: &str) -> bool {
        if self.document.is_some() && self.history.current() == Some(text) {
            log::debug!("Ignoring external document identical to the committed state");
            return false;
        }
        let document = match SvgDocument::parse(text) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("Rejected external document: {err}");
                return false;
            }
        };
        let clean = match document.serialize(&self.clean_options()) {
            Ok(clean) => clean,
            Err(err) => {
                log::warn!("Rejected external document: {err}");
                return false;
            }
        };

        self.replace_document(document);
        self.history.reset(clean);
        log::info!("Loaded external document");
        self.events.emit(EditorEvent::DocumentReplaced { origin: ReplaceOrigin::External });
        self.recompute_overflow();
        true
    }

    /// Record the live document as a committed change, without reparsing.
    ///
    /// Returns `false` when nothing changed since the last commit.
    pub fn notify_internal_commit(&mut self) -> bool {
        self.recompute_overflow();
        let Some(svg) = self.serialize() else {
            return false;
        };
        if !self.history.commit(svg.clone()) {
            log::debug!("Commit suppressed: document unchanged");
            return false;
        }
        log::debug!("Committed edit ({} undo steps)", self.history.depth());
        self.events.emit(EditorEvent::DocumentChanged { svg });
        true
    }

    /// Restore the previous committed state.
    pub fn undo(&mut self) -> bool {
        if let Err(err) = self.ensure_not_dragging() {
            log::debug!("Undo ignored: {err}");
            return false;
        }
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        let document = match SvgDocument::parse(&snapshot) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("Undo snapshot failed to parse: {err}");
                return false;
            }
        };
        self.replace_document(document);
        log::debug!("Undo ({} steps left)", self.history.depth());
        self.recompute_overflow();
        self.events.emit(EditorEvent::DocumentReplaced { origin: ReplaceOrigin::Undo });
        self.events.emit(EditorEvent::DocumentChanged { svg: snapshot });
        true
    }

    fn replace_document(&mut self, document: SvgDocument) {
        let had_selection = self.state.selected_element().is_some();
        self.set_state(EditorState::Idle);
        self.handles.clear();
        self.document = Some(document);
        if had_selection {
            self.events.emit(EditorEvent::SelectionChanged { selected: None });
        }
    }

    // ---------------------------------------------------------------------
    // Input

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos, target } => self.pointer_down(pos, target),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { pos } => self.pointer_up(pos),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            InputEvent::Wheel { delta, modifiers } => self.wheel(delta, modifiers),
        }
    }

    pub fn pointer_down(&mut self, screen_pos: Pos2, target: Option<NodeId>) {
        if self.state.is_dragging() {
            log::debug!("Pointer down ignored: a drag is already active");
            return;
        }
        let Some(doc_pos) = self.screen_to_document(screen_pos) else {
            log::warn!("Screen transform is not invertible; clearing selection");
            self.deselect();
            return;
        };

        let hit = match target {
            Some(node) => self.resolve_target(node),
            None => self.hit_test(screen_pos),
        };
        match hit {
            Some(Hit::Handle(index)) => self.begin_point_drag(index, doc_pos),
            Some(Hit::Element(element)) => {
                if self.select(element) {
                    self.begin_move(element, doc_pos);
                }
            }
            None => {
                self.deselect();
            }
        }
    }

    pub fn pointer_move(&mut self, screen_pos: Pos2) {
        if !self.state.is_dragging() {
            return;
        }
        let Some(doc_pos) = self.screen_to_document(screen_pos) else {
            return;
        };
        let edits = self.drag_edits(doc_pos);
        self.apply_edits(edits);
        self.refresh_overlay();
    }

    pub fn pointer_up(&mut self, screen_pos: Pos2) {
        let Some(element) = self.state.selected_element().filter(|_| self.state.is_dragging()) else {
            return;
        };
        self.pointer_move(screen_pos);
        if let Err(err) = self.transition_to(EditorState::Selected { element }) {
            log::warn!("Failed to end drag: {err}");
            self.set_state(EditorState::Idle);
        }
        self.notify_internal_commit();
        self.refresh_overlay();
    }

    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        if self.state.is_dragging() {
            return;
        }
        match key {
            Key::Escape => {
                self.deselect();
            }
            Key::Delete | Key::Backspace if !self.text_input_focused => {
                self.delete_selection();
            }
            Key::Z if (modifiers.command || modifiers.ctrl) && !self.text_input_focused => {
                self.undo();
            }
            _ => {}
        }
    }

    pub fn wheel(&mut self, delta: Vec2, modifiers: Modifiers) {
        if self.view.apply_wheel(delta, modifiers) {
            self.emit_view_changed();
        }
    }

    /// What a click at `screen_pos` would grab: a handle first, then the
    /// selectable element under the topmost shape.
    pub fn hit_test(&self, screen_pos: Pos2) -> Option<Hit> {
        let doc = self.document.as_ref()?;
        let doc_pos = self.screen_to_document(screen_pos)?;
        let radius = self.screen_distance_to_document(screen_pos, self.config.handle_hit_radius)?;
        if let Some(index) = handle_at(&self.handles, doc_pos, radius) {
            return Some(Hit::Handle(index));
        }
        let slop = self.screen_distance_to_document(screen_pos, SHAPE_HIT_SLOP)?;
        let shape = shape_at(doc, doc_pos, &self.config.overlay_class, slop)?;
        resolve_selectable(doc, shape, &self.config.overlay_class).map(Hit::Element)
    }

    fn resolve_target(&self, node: NodeId) -> Option<Hit> {
        let doc = self.document.as_ref()?;
        let class = &self.config.overlay_class;
        if let Some(index) = overlay::handle_index(doc, node, class) {
            return (index < self.handles.len()).then_some(Hit::Handle(index));
        }
        resolve_selectable(doc, node, class).map(Hit::Element)
    }

    // ---------------------------------------------------------------------
    // Selection and deletion

    /// Select an element and show its handles.
    pub fn select(&mut self, element: NodeId) -> bool {
        if let Err(err) = self.ensure_not_dragging() {
            log::debug!("Select ignored: {err}");
            return false;
        }
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        if element == doc.root() || !doc.contains(element) {
            return false;
        }
        let previous = self.state.selected_element();
        if let Err(err) = self.transition_to(EditorState::Selected { element }) {
            log::warn!("Select failed: {err}");
            return false;
        }
        if previous != Some(element) {
            log::debug!("Selected {element:?}");
            self.events.emit(EditorEvent::SelectionChanged { selected: Some(element) });
        }
        // Keyboard delete must reach the editor right after a selection.
        self.text_input_focused = false;
        self.events.emit(EditorEvent::BlurTextInput);
        self.refresh_overlay();
        true
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn deselect(&mut self) -> bool {
        if let Err(err) = self.ensure_not_dragging() {
            log::debug!("Deselect ignored: {err}");
            return false;
        }
        if self.state.is_idle() {
            return false;
        }
        self.set_state(EditorState::Idle);
        self.refresh_overlay();
        self.events.emit(EditorEvent::SelectionChanged { selected: None });
        true
    }

    /// Remove the selected element from the document and commit.
    pub fn delete_selection(&mut self) -> bool {
        if let Err(err) = self.ensure_not_dragging() {
            log::debug!("Delete ignored: {err}");
            return false;
        }
        let Some(element) = self.state.selected_element() else {
            return false;
        };
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        // Drop the overlay first so the arena tail can be reclaimed.
        overlay::clear_overlay(doc, &self.config.overlay_class);
        let removed = doc.remove(element);
        self.set_state(EditorState::Idle);
        self.handles.clear();
        self.events.emit(EditorEvent::SelectionChanged { selected: None });
        if removed {
            log::debug!("Deleted {element:?}");
            self.notify_internal_commit();
        }
        removed
    }

    // ---------------------------------------------------------------------
    // Drags

    fn begin_move(&mut self, element: NodeId, doc_pos: Pos2) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        let parent_space = AffineSpace::new(parent_ctm(doc, element));
        let own_space = AffineSpace::new(element_ctm(doc, element));
        let (Some(space), Some(_)) = (parent_space, own_space) else {
            log::warn!("No coordinate transform for {element:?}; aborting move");
            self.deselect();
            return;
        };
        let original_transform = doc.attribute(element, "transform").map(str::to_owned);
        let session = MoveSession {
            start: space.to_local(doc_pos),
            origin: leading_translate(original_transform.as_deref()),
            original_transform,
            space,
        };
        if let Err(err) = self.transition_to(EditorState::MovingElement { element, session }) {
            log::warn!("Move not started: {err}");
        }
    }

    fn begin_point_drag(&mut self, index: usize, doc_pos: Pos2) {
        let Some(element) = self.state.selected_element() else {
            return;
        };
        let Some(&handle) = self.handles.get(index) else {
            return;
        };
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        let Some(shape) = ShapeKind::from_element(doc, handle.target) else {
            return;
        };
        let Some(space) = AffineSpace::new(element_ctm(doc, handle.target)) else {
            log::warn!("No coordinate transform for {:?}; aborting point drag", handle.target);
            self.deselect();
            return;
        };
        let originals = shape
            .edited_attributes()
            .iter()
            .map(|&name| (name, doc.attribute(handle.target, name).map(str::to_owned)))
            .collect();
        let session = PointDragSession {
            handle,
            start: space.to_local(doc_pos),
            shape,
            originals,
            space,
        };
        log::debug!("Dragging {:?} of {:?}", handle.point, handle.target);
        if let Err(err) = self.transition_to(EditorState::DraggingPoint { element, session }) {
            log::warn!("Point drag not started: {err}");
        }
    }

    /// Attribute writes for the active drag at `doc_pos`.
    fn drag_edits(&self, doc_pos: Pos2) -> Vec<PendingEdit> {
        match &self.state {
            EditorState::MovingElement { element, session } => {
                let delta = session.space.to_local(doc_pos) - session.start;
                log::trace!("Moving {element:?} by {delta:?}");
                let value = if delta == Vec2::ZERO {
                    session.original_transform.clone()
                } else {
                    let offset = session.origin + delta;
                    Some(with_leading_translate(session.original_transform.as_deref(), offset))
                };
                vec![(*element, "transform", value)]
            }
            EditorState::DraggingPoint { session, .. } => {
                let target = session.handle.target;
                let delta = session.space.to_local(doc_pos) - session.start;
                log::trace!("Dragging {:?} by {delta:?}", session.handle.point);
                if delta == Vec2::ZERO {
                    return session
                        .originals
                        .iter()
                        .map(|(name, value)| (target, *name, value.clone()))
                        .collect();
                }
                session
                    .shape
                    .apply_point_delta(session.handle.point, delta, self.config.min_shape_size)
                    .into_iter()
                    .map(|edit| (target, edit.name, Some(edit.value)))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn apply_edits(&mut self, edits: Vec<PendingEdit>) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        for (node, name, value) in edits {
            match value {
                Some(value) => doc.set_attribute(node, name, value),
                None => doc.remove_attribute(node, name),
            }
        }
    }

    // ---------------------------------------------------------------------
    // State machine

    fn ensure_not_dragging(&self) -> Result<(), StateTransitionError> {
        if self.state.is_dragging() {
            return Err(StateTransitionError::Busy(self.state.name()));
        }
        Ok(())
    }

    fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        self.set_state(new_state);
        Ok(())
    }

    /// Unchecked; only for edges that are always valid (anything to `Idle`).
    fn set_state(&mut self, new_state: EditorState) {
        let from = self.state.name();
        let to = new_state.name();
        self.state = new_state;
        if from != to {
            log::debug!("State {from} -> {to}");
            self.events.emit(EditorEvent::StateChanged { from, to });
        }
    }

    // ---------------------------------------------------------------------
    // Overlay, bounds and coordinates

    fn refresh_overlay(&mut self) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        let class = &self.config.overlay_class;
        overlay::clear_overlay(doc, class);
        self.handles.clear();
        let Some(element) = self.state.selected_element() else {
            return;
        };
        if !doc.contains(element) {
            return;
        }
        self.handles = overlay::build_handles(doc, element);
        let outline = element_bounds(doc, element);
        overlay::inject_overlay(doc, &self.handles, outline, class, self.config.handle_size);
    }

    fn recompute_overflow(&mut self) {
        let overflowing = self.document.as_ref().is_some_and(|doc| {
            exceeds_viewport(content_bounds(doc, &self.config.overlay_class), doc.view_box())
        });
        if overflowing != self.overflowing {
            self.overflowing = overflowing;
            log::debug!("Overflow is now {overflowing}");
            self.events.emit(EditorEvent::OverflowChanged { overflowing });
        }
    }

    fn screen_space(&self) -> Option<AffineSpace> {
        AffineSpace::new(self.view.transform() * self.base_screen)
    }

    /// Root user space position under a screen position.
    pub fn screen_to_document(&self, screen_pos: Pos2) -> Option<Pos2> {
        Some(self.screen_space()?.to_local(screen_pos))
    }

    fn screen_distance_to_document(&self, screen_pos: Pos2, distance: f32) -> Option<f32> {
        let space = self.screen_space()?;
        let a = space.to_local(screen_pos);
        let b = space.to_local(screen_pos + vec2(distance, 0.0));
        Some(a.distance(b))
    }

    // ---------------------------------------------------------------------
    // View

    pub fn zoom_in(&mut self) {
        if self.view.zoom_in() {
            self.emit_view_changed();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.view.zoom_out() {
            self.emit_view_changed();
        }
    }

    pub fn set_zoom(&mut self, percent: f32) {
        if self.view.set_zoom(percent) {
            self.emit_view_changed();
        }
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        if self.view.pan_by(delta) {
            self.emit_view_changed();
        }
    }

    pub fn reset_view(&mut self) {
        if self.view.reset() {
            self.emit_view_changed();
        }
    }

    pub fn toggle_background(&mut self) -> BackgroundMode {
        self.view.toggle_background()
    }

    fn emit_view_changed(&self) {
        self.events.emit(EditorEvent::ViewChanged {
            zoom_percent: self.view.zoom_percent,
            pan: self.view.pan,
        });
    }

    // ---------------------------------------------------------------------
    // Accessors

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&SvgDocument> {
        self.document.as_ref()
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.state.selected_element()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Handles of the current selection, in overlay order.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Direct access to the view. Changes made here emit no events.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    fn clean_options(&self) -> SerializeOptions<'_> {
        SerializeOptions {
            overlay_class: Some(&self.config.overlay_class),
            ..Default::default()
        }
    }

    /// The document without editor markup, as handed to the change callback.
    pub fn serialize(&self) -> Option<String> {
        let doc = self.document.as_ref()?;
        doc.serialize(&self.clean_options())
            .map_err(|err| log::warn!("Failed to serialize document: {err}"))
            .ok()
    }

    /// Markup for display: overlay included, root `overflow` following the
    /// overflow flag.
    pub fn display_markup(&self) -> Option<String> {
        let doc = self.document.as_ref()?;
        let overflow = if self.overflowing { "visible" } else { "hidden" };
        let options = SerializeOptions {
            overlay_class: Some(&self.config.overlay_class),
            include_overlay: true,
            root_overrides: vec![("overflow", overflow.to_owned())],
        };
        doc.serialize(&options)
            .map_err(|err| log::warn!("Failed to serialize display markup: {err}"))
            .ok()
    }
}
