use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Not Found")]
    NotFound,

    #[error("movie already exists")]
    Conflict,

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!(msg))).into_response()
            }
            // "massage" is intentional; existing clients depend on this
            // exact body.
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"massage": "Not Found"}))).into_response()
            }
            ApiError::Conflict => {
                (StatusCode::CONFLICT, Json(json!("movie already exists"))).into_response()
            }
            ApiError::Db(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(err.to_string()))).into_response()
            }
            ApiError::Internal(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(err.to_string()))).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
