use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// In-memory todo list shared across handlers. Persistence is out of
/// scope for the demo.
#[derive(Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, title: impl Into<String>) -> Todo {
        let todo = Todo {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
        };
        self.write().push(todo.clone());
        todo
    }

    pub fn toggle(&self, id: Uuid) -> Option<Todo> {
        let mut todos = self.write();
        let todo = todos.iter_mut().find(|todo| todo.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<Todo> {
        let mut todos = self.write();
        let index = todos.iter().position(|todo| todo.id == id)?;
        Some(todos.remove(index))
    }

    pub fn all(&self) -> Vec<Todo> {
        self.read().clone()
    }

    /// Number of todos still open.
    pub fn open_count(&self) -> usize {
        self.read().iter().filter(|todo| !todo.completed).count()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Todo>> {
        self.todos.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Todo>> {
        self.todos.write().unwrap_or_else(|e| e.into_inner())
    }
}
