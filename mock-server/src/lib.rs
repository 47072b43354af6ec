use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The session token every state-changing request must present in
/// `X-CSRF-Token`. A real Rails backend issues this per session; a fixed
/// value keeps the tests deterministic.
pub const CSRF_TOKEN: &str = "test-csrf-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
}

#[derive(Deserialize)]
pub struct CreateArticle {
    pub title: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Article>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/{id}", axum::routing::delete(delete_article))
        .route("/ping", get(ping))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Rails-style nested error body: `{"errors": {"<path>": ["<message>"]}}`.
fn error_response(status: StatusCode, path: &str, message: &str) -> Response {
    let mut fields = serde_json::Map::new();
    fields.insert(
        path.to_string(),
        serde_json::Value::Array(vec![serde_json::Value::String(message.to_string())]),
    );
    let mut body = serde_json::Map::new();
    body.insert("errors".to_string(), serde_json::Value::Object(fields));
    (status, Json(serde_json::Value::Object(body))).into_response()
}

fn csrf_ok(headers: &HeaderMap) -> bool {
    headers
        .get("x-csrf-token")
        .and_then(|value| value.to_str().ok())
        == Some(CSRF_TOKEN)
}

async fn list_articles(State(db): State<Db>) -> Json<Vec<Article>> {
    let articles = db.read().await;
    Json(articles.values().cloned().collect())
}

async fn create_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateArticle>,
) -> Response {
    if !csrf_ok(&headers) {
        return error_response(
            StatusCode::FORBIDDEN,
            "session.token",
            "invalid authenticity token",
        );
    }
    if input.title.trim().is_empty() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "article.title",
            "can't be blank",
        );
    }

    let article = Article {
        id: Uuid::new_v4(),
        title: input.title,
    };
    db.write().await.insert(article.id, article.clone());
    (StatusCode::CREATED, Json(article)).into_response()
}

async fn delete_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if !csrf_ok(&headers) {
        return error_response(
            StatusCode::FORBIDDEN,
            "session.token",
            "invalid authenticity token",
        );
    }

    let mut articles = db.write().await;
    match articles.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error_response(StatusCode::NOT_FOUND, "article.id", "not found"),
    }
}

async fn ping() -> &'static str {
    "pong"
}
