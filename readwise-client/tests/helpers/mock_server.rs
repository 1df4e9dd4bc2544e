//! In-process HTTP backend for exercising `ApiClient`

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Requests observed by the mock, as (method path, body or query)
#[derive(Clone, Default)]
pub struct MockBackend {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    authorization: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self, route: &str) -> Option<Value> {
        self.requests()
            .into_iter()
            .rev()
            .find(|(r, _)| r == route)
            .map(|(_, v)| v)
    }

    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }

    fn observe(&self, route: &str, headers: &HeaderMap, payload: Value) {
        self.requests
            .lock()
            .unwrap()
            .push((route.to_string(), payload));
        self.authorization.lock().unwrap().push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
    }
}

async fn onboard_status(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.observe("POST /users/onboardStatus", &headers, body.clone());
    match body.get("userId").and_then(Value::as_str) {
        Some("new_user") => Json(json!({"onboarded": false})).into_response(),
        Some("banned") => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Account suspended"})),
        )
            .into_response(),
        _ => Json(json!({"onboarded": true})).into_response(),
    }
}

async fn recommend(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.observe("POST /recommend_with_reviews", &headers, body);
    Json(json!({
        "recommended": [
            {"type": "fallback", "_id": "b1", "book_id": "100", "title": "T"},
            {"type": "sampled", "book_id": 7, "sampled_reviews": [
                {"_id": "s1", "user_id": "u", "rating": 5, "review_text": "x", "n_votes": 1, "n_comments": 0}
            ]}
        ],
        "isNext": true,
        "totalRecommendations": 30,
        "page": 1,
        "pageSize": 15
    }))
}

async fn interests(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(user): Path<String>,
) -> Json<Value> {
    mock.observe("GET /users/:id/interests", &headers, json!(user));
    if user == "broken" {
        // Object where an array is expected
        return Json(json!({"interests": "fantasy"}));
    }
    Json(json!(["fantasy", "history"]))
}

async fn comment_count(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    mock.observe("GET /getCommentCount", &headers, json!(query));
    Json(json!({"count": 4}))
}

async fn like(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.observe("POST /users/likedBook", &headers, body);
    Json(json!({"message": "liked"}))
}

async fn unlike(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.observe("DELETE /users/likedBook", &headers, body);
    Json(json!({"message": "unliked"}))
}

async fn search(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    mock.observe("GET /books/search", &headers, json!(query));
    Json(json!({"books": [{"book_id": 1, "title": "Dune", "authors_names": "['Frank Herbert']"}], "total": 1}))
}

async fn book(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    mock.observe("GET /books/:id", &headers, json!(id));
    if id == "slow" {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Book not found"})),
    )
        .into_response()
}

async fn rent(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Path(user): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    mock.observe("POST /users/:id/rent", &headers, json!({"user": user, "body": body}));
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
}

/// Start the mock on an ephemeral port
pub async fn spawn_mock_backend() -> (String, MockBackend) {
    let mock = MockBackend::default();
    let app = Router::new()
        .route("/users/onboardStatus", post(onboard_status))
        .route("/recommend_with_reviews", post(recommend))
        .route("/users/:id/interests", get(interests))
        .route("/getCommentCount", get(comment_count))
        .route("/users/likedBook", post(like).delete(unlike))
        .route("/books/search", get(search))
        .route("/books/:id", get(book))
        .route("/users/:id/rent", post(rent))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), mock)
}
