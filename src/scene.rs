//! Canonical mutable editor state and its synchronous change notification.
//!
//! The [`SceneStore`] is constructed by the session root and passed by
//! reference to everything that reads or mutates the scene; there is no
//! global instance. Every mutation notifies all subscribers exactly once,
//! in registration order, before the mutating call returns.

use std::collections::BTreeSet;
use std::fmt;

use egui::Vec2;
use log::{debug, warn};

use crate::shape::{Shape, ShapeKind};

/// Interaction mode: one of the three drawing modes or select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    Line,
    Rectangle,
    Circle,
    #[default]
    Select,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Line, Mode::Rectangle, Mode::Circle, Mode::Select];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Line => "Line",
            Mode::Rectangle => "Rectangle",
            Mode::Circle => "Circle",
            Mode::Select => "Select",
        }
    }

    /// The kind drawn in this mode, or `None` in select mode.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Mode::Line => Some(ShapeKind::Line),
            Mode::Rectangle => Some(ShapeKind::Rectangle),
            Mode::Circle => Some(ShapeKind::Circle),
            Mode::Select => None,
        }
    }
}

/// Snapshot of everything one editor session holds.
///
/// Object order in `objects` is not significant; draw and hit-test order
/// are governed by `z_index` alone.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    pub objects: Vec<Shape>,
    pub selected_ids: BTreeSet<usize>,
    pub mode: Mode,
}

impl SceneState {
    pub fn find(&self, id: usize) -> Option<&Shape> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    /// The object the property panel edits: the selected shape with the
    /// highest z-index.
    pub fn primary_selected(&self) -> Option<&Shape> {
        self.objects
            .iter()
            .filter(|obj| self.selected_ids.contains(&obj.id))
            .max_by_key(|obj| obj.z_index)
    }
}

/// Token returned by [`SceneStore::subscribe`]; hand it back to
/// [`SceneStore::unsubscribe`] to detach the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&SceneState)>;

/// Owns the scene and fans out one synchronous notification per mutation.
pub struct SceneStore {
    state: SceneState,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: usize,
}

impl fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStore")
            .field("state", &self.state)
            .field("observers", &format!("<{} observers>", self.observers.len()))
            .finish()
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    /// A fresh session: no objects, no selection, select mode.
    pub fn new() -> Self {
        Self {
            state: SceneState::default(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Attach an observer; it is called after every mutation, in
    /// registration order, with the new state.
    pub fn subscribe(&mut self, observer: impl FnMut(&SceneState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Detach a previously registered observer.
    pub fn unsubscribe(&mut self, id: ObserverId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }

    fn changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }

    /// Append a finished object. The id must not already be present; a
    /// duplicate indicates a defect upstream and is rejected.
    pub fn add_object(&mut self, object: Shape) {
        if self.state.find(object.id).is_some() {
            warn!("add_object: id {} already present, rejecting", object.id);
            return;
        }
        self.state.objects.push(object);
        self.changed();
    }

    /// Replace the object with the same id wholesale. An unknown id is
    /// tolerated as a no-op: a gesture may reference an object a delete
    /// already removed.
    pub fn update_object(&mut self, updated: Shape) {
        match self.state.objects.iter_mut().find(|obj| obj.id == updated.id) {
            Some(slot) => *slot = updated,
            None => debug!("update_object: id {} not present, no-op", updated.id),
        }
        self.changed();
    }

    /// Translate every object whose id is in `ids` by `delta`. Unknown ids
    /// are ignored.
    pub fn move_objects(&mut self, ids: &[usize], delta: Vec2) {
        for obj in &mut self.state.objects {
            if ids.contains(&obj.id) {
                obj.translate(delta);
            }
        }
        self.changed();
    }

    /// Remove every object whose id is in `ids`, and prune those ids from
    /// the selection so it never references a deleted object.
    pub fn delete_objects(&mut self, ids: &[usize]) {
        self.state.objects.retain(|obj| !ids.contains(&obj.id));
        self.state.selected_ids.retain(|id| !ids.contains(id));
        self.changed();
    }

    /// Replace the selection wholesale. Union-with-shift semantics live in
    /// the select tool, not here.
    pub fn set_selected_ids(&mut self, ids: impl IntoIterator<Item = usize>) {
        self.state.selected_ids = ids.into_iter().collect();
        self.changed();
    }

    /// Switch the interaction mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.changed();
    }
}
