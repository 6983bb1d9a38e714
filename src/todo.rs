use serde::Serialize;

use crate::errors::AppError;
use crate::models::TodoItem;

/// To-do items created from accepted opportunities. Items are only ever
/// added or toggled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when an item with the same id already exists.
    pub fn add(&mut self, item: TodoItem) -> bool {
        if self.items.iter().any(|t| t.id == item.id) {
            log::debug!("To-do {} already present, ignoring", item.id);
            return false;
        }
        self.items.push(item);
        true
    }

    /// Flip the completed flag. Returns the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool, AppError> {
        let item = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::NotFound)?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
