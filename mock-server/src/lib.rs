use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub completed: bool,
    pub body: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub completed: bool,
}

/// Todos in insertion order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(complete_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    debug!(count = todos.len(), "listing todos");
    Json(todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Response {
    let Ok(Json(input)) = input else {
        return (StatusCode::BAD_REQUEST, "Error parsing todo").into_response();
    };
    if input.body.is_empty() {
        return (StatusCode::BAD_REQUEST, "Todo body is required").into_response();
    }
    let todo = Todo {
        id: Uuid::new_v4(),
        completed: input.completed,
        body: input.body,
    };
    info!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

/// Marks the todo completed. Unknown ids still answer 200: the update just
/// matches nothing.
async fn complete_todo(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return (StatusCode::BAD_REQUEST, "Invalid todo ID").into_response();
    };
    let mut todos = db.write().await;
    if let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) {
        todo.completed = true;
        info!(%id, "completed todo");
    }
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

/// Unknown ids still answer 200, like completion.
async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid todo ID" })),
        )
            .into_response();
    };
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|todo| todo.id != id);
    if todos.len() < before {
        info!(%id, "deleted todo");
    }
    (StatusCode::OK, Json(json!({ "success delete": true }))).into_response()
}
