//! Linear undo/redo history.

use crate::commands::EditorCommand;
use crate::level::Level;
use std::collections::VecDeque;

/// Done and undone command stacks.
///
/// Executing a new command discards everything that could have been redone;
/// there is no branching history.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    done: VecDeque<EditorCommand>,
    undone: Vec<EditorCommand>,
    max_depth: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(tilekit_core::constants::DEFAULT_HISTORY_DEPTH)
    }
}

impl CommandHistory {
    /// Creates a history keeping at most `max_depth` undo steps; 0 keeps every step.
    pub fn new(max_depth: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Applies a command and records it. Empty commands are dropped.
    ///
    /// Returns true if the command was recorded.
    pub fn execute(&mut self, mut command: EditorCommand, level: &mut Level) -> bool {
        if command.is_empty() {
            tracing::trace!("Skipping empty command '{}'", command.name());
            return false;
        }
        tracing::debug!("Execute: {}", command.name());
        command.apply(level);
        self.done.push_back(command);
        self.undone.clear();

        if self.max_depth > 0 && self.done.len() > self.max_depth {
            self.done.pop_front();
        }
        true
    }

    /// Reverts the most recent command. Returns false if there is nothing to undo.
    pub fn undo(&mut self, level: &mut Level) -> bool {
        match self.done.pop_back() {
            Some(mut command) => {
                tracing::debug!("Undo: {}", command.name());
                command.undo(level);
                self.undone.push(command);
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone command.
    pub fn redo(&mut self, level: &mut Level) -> bool {
        match self.undone.pop() {
            Some(mut command) => {
                tracing::debug!("Redo: {}", command.name());
                command.apply(level);
                self.done.push_back(command);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.done.back().map(EditorCommand::name)
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.undone.last().map(EditorCommand::name)
    }

    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}
