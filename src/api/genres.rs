//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre, GenreDetail, UpdateGenre},
};

use super::{ApiResponse, AppJson};

/// Create a new genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Missing genre name"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<ApiResponse<Genre>>)> {
    let genre = state.services.genres.create(request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Genre created successfully", genre),
    ))
}

/// List all genres sorted by name
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Genre>>>> {
    let genres = state.services.genres.list().await?;
    Ok(ApiResponse::ok("Genres retrieved successfully", genres))
}

/// Get genre detail with its books nested
#[utoipa::path(
    get,
    path = "/genres/{genre_id}",
    tag = "genres",
    params(("genre_id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre detail", body = GenreDetail),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(genre_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<GenreDetail>>> {
    let genre = state.services.genres.get(genre_id).await?;
    Ok(ApiResponse::ok("Genre detail retrieved successfully", genre))
}

/// Partially update a genre
#[utoipa::path(
    patch,
    path = "/genres/{genre_id}",
    tag = "genres",
    params(("genre_id" = Uuid, Path, description = "Genre ID")),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre name already exists")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(genre_id): Path<Uuid>,
    AppJson(request): AppJson<UpdateGenre>,
) -> AppResult<Json<ApiResponse<Genre>>> {
    let genre = state.services.genres.update(genre_id, request).await?;
    Ok(ApiResponse::ok("Genre updated successfully", genre))
}

/// Delete a genre; dependent books get their genre reference nulled
#[utoipa::path(
    delete,
    path = "/genres/{genre_id}",
    tag = "genres",
    params(("genre_id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(genre_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.services.genres.delete(genre_id).await?;
    Ok(ApiResponse::ok("Genre deleted successfully", serde_json::Value::Null))
}
