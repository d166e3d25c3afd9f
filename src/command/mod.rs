//! Undoable mutations against the [`SceneStore`].
//!
//! Each command captures enough information at execute time to reverse
//! itself. Selection changes and mode switches are not commands; they are
//! direct store mutations with no undo semantics.

mod history;
pub use history::CommandHistory;

use egui::Vec2;
use thiserror::Error;

use crate::scene::SceneStore;
use crate::shape::Shape;

/// Errors from history navigation.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// A mutation captured with enough information to reverse it.
#[derive(Clone, Debug)]
pub enum Command {
    /// Insert a finished shape into the scene.
    Create { shape: Shape },
    /// Translate the given objects by a total delta.
    Move { ids: Vec<usize>, delta: Vec2 },
    /// Remove objects. The removed shapes are snapshotted at execute time
    /// so undo can re-add them.
    Delete { ids: Vec<usize>, removed: Vec<Shape> },
    /// Replace one object wholesale. The prior version is snapshotted at
    /// execute time.
    Update { shape: Shape, prior: Option<Shape> },
}

impl Command {
    pub fn create(shape: Shape) -> Self {
        Command::Create { shape }
    }

    pub fn move_by(ids: Vec<usize>, delta: Vec2) -> Self {
        Command::Move { ids, delta }
    }

    pub fn delete(ids: Vec<usize>) -> Self {
        Command::Delete {
            ids,
            removed: Vec::new(),
        }
    }

    pub fn update(shape: Shape) -> Self {
        Command::Update { shape, prior: None }
    }

    /// Short label for history display.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Create { .. } => "Create Shape",
            Command::Move { .. } => "Move Shapes",
            Command::Delete { .. } => "Delete Shapes",
            Command::Update { .. } => "Update Shape",
        }
    }

    /// Apply the command to the store, capturing whatever undo needs.
    pub fn execute(&mut self, store: &mut SceneStore) {
        match self {
            Command::Create { shape } => store.add_object(shape.clone()),
            Command::Move { ids, delta } => store.move_objects(ids, *delta),
            Command::Delete { ids, removed } => {
                *removed = store
                    .state()
                    .objects
                    .iter()
                    .filter(|obj| ids.contains(&obj.id))
                    .cloned()
                    .collect();
                store.delete_objects(ids);
            }
            Command::Update { shape, prior } => {
                *prior = store.state().find(shape.id).cloned();
                store.update_object(shape.clone());
            }
        }
    }

    /// Reverse a previously executed command.
    pub fn undo(&self, store: &mut SceneStore) {
        match self {
            Command::Create { shape } => store.delete_objects(&[shape.id]),
            Command::Move { ids, delta } => store.move_objects(ids, -*delta),
            Command::Delete { removed, .. } => {
                // Objects come back; the selection they may have been in
                // does not.
                for shape in removed {
                    store.add_object(shape.clone());
                }
            }
            Command::Update { prior, .. } => {
                if let Some(prior) = prior {
                    store.update_object(prior.clone());
                }
            }
        }
    }
}
