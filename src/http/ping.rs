use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub fn router() -> Router {
    Router::new()
        .route("/test", get(health))
        .route("/check-auth", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
