pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/movies/{imdb_id}", get(routes::get_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
