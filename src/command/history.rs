use log::info;

use super::{Command, CommandError};
use crate::scene::SceneStore;

/// LIFO history of executed commands, with a separate redo stack.
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Execute a command against the store and push it onto the undo
    /// stack. Executing anything new clears the redo stack.
    pub fn execute(&mut self, mut command: Command, store: &mut SceneStore) {
        info!("executing {}", command.label());
        command.execute(store);
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Push a command that has already been applied to the store, so it
    /// participates in undo without running twice. Drag gestures use
    /// this: the store mutates incrementally while the pointer moves, and
    /// one command covering the whole gesture lands here on release.
    pub fn record(&mut self, command: Command) {
        info!("recording {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Pop and reverse the most recent command.
    pub fn undo(&mut self, store: &mut SceneStore) -> Result<(), CommandError> {
        let command = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        info!("undoing {}", command.label());
        command.undo(store);
        self.redo_stack.push(command);
        Ok(())
    }

    /// Re-execute the most recently undone command.
    pub fn redo(&mut self, store: &mut SceneStore) -> Result<(), CommandError> {
        let mut command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        info!("redoing {}", command.label());
        command.execute(store);
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
