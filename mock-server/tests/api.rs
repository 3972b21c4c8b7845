use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty_is_array() {
    let resp = app().oneshot(empty_request("GET", "/api/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: serde_json::Value = body_json(resp).await;
    assert_eq!(todos, serde_json::json!([]));
}

#[tokio::test]
async fn list_accepts_json_content_type_on_get() {
    let resp = app()
        .oneshot(json_request("GET", "/api/todos", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/todos", r#"{"body":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.body, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_without_body_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/todos", r#"{"completed":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await, "Todo body is required");
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/todos", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await, "Error parsing todo");
}

// --- complete ---

#[tokio::test]
async fn complete_todo_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("PATCH", "/api/todos/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await, "Invalid todo ID");
}

#[tokio::test]
async fn complete_unknown_todo_still_succeeds() {
    let resp = app()
        .oneshot(empty_request(
            "PATCH",
            "/api/todos/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"success": true}));
}

// --- delete ---

#[tokio::test]
async fn delete_todo_bad_id_returns_400_json() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/todos/xyz"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": "Invalid todo ID"}));
}

// --- full lifecycle ---

#[tokio::test]
async fn todo_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two, list keeps insertion order
    let mut ids = Vec::new();
    for body in [r#"{"body":"Walk dog"}"#, r#"{"body":"Feed cat"}"#] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/api/todos", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Todo = body_json(resp).await;
        ids.push(created.id);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), ids);
    assert_eq!(todos[0].body, "Walk dog");

    // complete the first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("PATCH", &format!("/api/todos/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos[0].completed);
    assert!(!todos[1].completed);

    // delete the first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/todos/{}", ids[0])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"success delete": true}));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, ids[1]);
}
