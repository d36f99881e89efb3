use std::sync::Arc;

use serde_json::json;

use weft_push::ChannelRegistry;
use weft_render::{Bindings, FragmentResolver, Renderer};

use crate::config::Config;
use crate::fragments;
use crate::todos::{Todo, TodoStore};

/// Shared application state passed to all handlers.
///
/// All resources are wrapped in Arc for efficient sharing across async
/// tasks; the registry and renderers are created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ChannelRegistry>,
    pub resolver: Arc<dyn FragmentResolver>,
    pub envelope: Arc<Renderer>,
    pub oob: Arc<Renderer>,
    pub todos: Arc<TodoStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver: Arc<dyn FragmentResolver> = Arc::new(fragments::demo_resolver());

        Self {
            config: Arc::new(config),
            registry: Arc::new(ChannelRegistry::new()),
            envelope: Arc::new(Renderer::envelope(Arc::clone(&resolver))),
            oob: Arc::new(Renderer::oob(Arc::clone(&resolver))),
            resolver,
            todos: Arc::new(TodoStore::new()),
        }
    }

    /// Pick the response renderer: out-of-band when the client asked
    /// for it, envelope otherwise.
    pub fn renderer_for(&self, format: Option<&str>) -> &Arc<Renderer> {
        match format {
            Some("oob") => &self.oob,
            _ => &self.envelope,
        }
    }

    /// Bindings for the full index page.
    pub fn page_bindings(&self) -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert("todos".to_string(), json!(self.todos.all()));
        bindings.insert("count".to_string(), json!(self.todos.open_count()));
        bindings
    }

    /// Bindings for partials about one todo.
    pub fn todo_bindings(&self, todo: &Todo) -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert("todo".to_string(), json!(todo));
        bindings.insert("count".to_string(), json!(self.todos.open_count()));
        bindings
    }
}
