use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use weft_core::{FragmentSpec, UpdateSet};
use weft_push::DEFAULT_CHANNEL;
use weft_render::Bindings;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    /// `oob` switches the response body to the out-of-band encoding.
    pub format: Option<String>,
}

/// Full page render.
pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let markup = state
        .resolver
        .resolve(&FragmentSpec::parse("index"), &state.page_bindings())?;

    Ok(Html(markup))
}

/// Create a todo and answer with the partial updates it causes.
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Form(form): Form<CreateTodo>,
) -> ApiResult<Response> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }

    let todo = state.todos.add(title);
    tracing::debug!(todo = %todo.id, "todo created");

    let updates = UpdateSet::new()
        .append("todos").with_fragment("todos :: item")?
        .replace("todo-count").within_template("todos")?;
    let bindings = state.todo_bindings(&todo);

    partial_response(&state, &updates, &bindings, query.format.as_deref()).await
}

/// Toggle a todo's completion state.
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Response> {
    let todo = state
        .todos
        .toggle(id)
        .ok_or_else(|| ApiError::TodoNotFound(id.to_string()))?;

    let updates = UpdateSet::new()
        .replace(format!("todo-{}", todo.id)).with_fragment("todos :: item")?
        .replace("todo-count").within_template("todos")?;
    let bindings = state.todo_bindings(&todo);

    partial_response(&state, &updates, &bindings, query.format.as_deref()).await
}

/// Delete a todo; the partial response removes its list item.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> ApiResult<Response> {
    state
        .todos
        .remove(id)
        .ok_or_else(|| ApiError::TodoNotFound(id.to_string()))?;

    let updates = UpdateSet::new()
        .remove(format!("todo-{}", id))?
        .replace("todo-count").within_template("todos")?;

    let mut bindings = Bindings::new();
    bindings.insert(
        "count".to_string(),
        serde_json::json!(state.todos.open_count()),
    );

    partial_response(&state, &updates, &bindings, query.format.as_deref()).await
}

/// Render the update set as the response body and mirror it to any
/// connected SSE listeners on the default channel.
async fn partial_response(
    state: &AppState,
    updates: &UpdateSet,
    bindings: &Bindings,
    format: Option<&str>,
) -> ApiResult<Response> {
    let renderer = state.renderer_for(format);

    let mut body = Vec::new();
    renderer.render_to(updates, bindings, &mut body)?;

    // Out-of-band mirror is fire-and-forget: nobody connected is fine,
    // and a failed delivery already tore the channel down.
    match state.envelope.render_payload(updates, bindings) {
        Ok(payload) => {
            if let Err(err) = state.registry.broadcast(DEFAULT_CHANNEL, &payload).await {
                tracing::warn!(error = %err, "push delivery failed");
            }
        }
        Err(err) => tracing::warn!(error = %err, "failed to render push payload"),
    }

    Ok(([(header::CONTENT_TYPE, renderer.content_type())], body).into_response())
}
