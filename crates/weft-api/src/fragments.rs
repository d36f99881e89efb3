use serde_json::Value;

use weft_render::{Bindings, FnResolver};

/// Fragment resolver for the demo pages.
///
/// No template engine: each fragment is a render function over the
/// bindings. The identifiers mirror what the handlers build: `"index"`
/// for the full page, `"todos :: item"`, `"todos :: todo-count"` and
/// `"clock :: time"` for the partials.
pub fn demo_resolver() -> FnResolver {
    FnResolver::new()
        .template("index", |bindings| {
            format!(
                "<!DOCTYPE html>\n<html>\n<head><title>weft todos</title></head>\n<body>\n\
                 <h1>Todos</h1>\n{}\n{}\n<time id=\"clock\"></time>\n</body>\n</html>",
                todo_list(bindings),
                todo_count(bindings)
            )
        })
        .fragment("todos", "item", |bindings| {
            todo_item(bindings.get("todo").unwrap_or(&Value::Null))
        })
        .fragment("todos", "todo-count", todo_count)
        .fragment("clock", "time", |bindings| {
            let time = bindings.get("time").and_then(Value::as_str).unwrap_or_default();
            format!("<time id=\"clock\">{}</time>", escape(time))
        })
}

fn todo_list(bindings: &Bindings) -> String {
    let items = bindings
        .get("todos")
        .and_then(Value::as_array)
        .map(|todos| todos.iter().map(todo_item).collect::<String>())
        .unwrap_or_default();

    format!("<ul id=\"todos\">{}</ul>", items)
}

fn todo_item(todo: &Value) -> String {
    let id = todo["id"].as_str().unwrap_or_default();
    let title = todo["title"].as_str().unwrap_or_default();
    let done = todo["completed"].as_bool().unwrap_or(false);

    format!(
        "<li id=\"todo-{}\" class=\"{}\">{}</li>",
        id,
        if done { "completed" } else { "open" },
        escape(title)
    )
}

fn todo_count(bindings: &Bindings) -> String {
    let open = bindings.get("count").and_then(Value::as_u64).unwrap_or(0);

    format!("<span id=\"todo-count\">{} open</span>", open)
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
