use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Extension, Multipart, Path};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio_util::io::ReaderStream;

use crate::entities::Media;
use crate::http::{ApiContext, Result};
use crate::store::IncomingFile;

/// Multipart field name carrying uploaded files.
pub const MEDIA_FIELD: &str = "media";

pub fn router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/media", get(get_all_media))
        .route("/media/:filename", get(get_media_file).delete(delete_media))
        .route("/upload", post(upload_media))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn get_all_media(ctx: Extension<ApiContext>) -> Result<Json<Vec<Media>>> {
    let media_vec = ctx.store.list().await?;
    Ok(Json(media_vec))
}

#[derive(serde::Serialize)]
struct UploadResponse {
    success: bool,
    files: Vec<String>,
    count: usize,
}

async fn upload_media(
    ctx: Extension<ApiContext>,
    mut files: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut incoming = Vec::new();
    while let Some(field) = files
        .next_field()
        .await
        .map_err(|x| anyhow::anyhow!("multipart error: {}", x))?
    {
        if field.name() != Some(MEDIA_FIELD) {
            continue;
        }
        let original_filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|x| anyhow::anyhow!("multipart error: {}", x))?
            .to_vec();
        incoming.push(IncomingFile {
            original_filename,
            data,
        });
    }

    let stored = ctx.store.save(incoming).await?;
    let count = stored.len();
    Ok(Json(UploadResponse {
        success: true,
        files: stored,
        count,
    }))
}

async fn get_media_file(
    ctx: Extension<ApiContext>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let (file, len, mime) = ctx.store.open(&filename).await?;
    let stream = ReaderStream::new(file);
    let response = Response::builder()
        .header(CONTENT_TYPE, mime.to_string())
        .header(CONTENT_LENGTH, len)
        .body(Body::from_stream(stream))
        .map_err(|x| anyhow::anyhow!("failed to build response: {}", x))?;
    Ok(response)
}

#[derive(serde::Serialize)]
struct DeleteResponse {
    success: bool,
}

async fn delete_media(
    ctx: Extension<ApiContext>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>> {
    ctx.store.delete(&filename).await?;
    Ok(Json(DeleteResponse { success: true }))
}
