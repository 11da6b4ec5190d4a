use crate::errors::AppError;
use crate::state::ServerState;
use crate::storage::{asset_path, content_type, read_asset};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

pub async fn index(State(state): State<ServerState>) -> Result<Response, AppError> {
    serve(&state, "").await
}

pub async fn asset(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, &path).await
}

async fn serve(state: &ServerState, request: &str) -> Result<Response, AppError> {
    let path = asset_path(&state.site_dir, request)?;
    let (path, body) = read_asset(&path).await?;
    debug!(path = %path.display(), bytes = body.len(), "serving asset");

    Ok(([(header::CONTENT_TYPE, content_type(&path))], body).into_response())
}
