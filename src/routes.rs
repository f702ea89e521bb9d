use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Movie, NewMovie},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    year: Option<String>,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<Vec<Movie>>> {
    let movies = match q.year.as_deref() {
        // an empty year parameter means no filter, same as leaving it off
        None | Some("") => state.store.list_all().await?,
        Some(raw) => {
            let year: i32 = raw.parse().map_err(|e: std::num::ParseIntError| {
                ApiError::Validation(e.to_string())
            })?;
            state.store.list_by_year(year).await?
        }
    };
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie = state.store.get_by_imdb_id(&imdb_id).await?;
    Ok(Json(movie))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let Json(new) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let movie = state.store.insert(new).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}
