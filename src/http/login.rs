use axum::extract::Extension;
use axum::routing::post;
use axum::{Json, Router};

use crate::http::{ApiContext, Result};

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

#[derive(serde::Deserialize, Debug, Default)]
struct LoginBody {
    password: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    success: bool,
    is_admin: bool,
    message: String,
}

async fn login(
    ctx: Extension<ApiContext>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>> {
    let password = body.password.unwrap_or_default();
    let role = ctx.gate.authenticate(&password)?;

    Ok(Json(LoginResponse {
        success: true,
        is_admin: role.is_admin(),
        message: "login successful".to_string(),
    }))
}
