use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use moviedb::{
    AppState, app, db,
    store::{DbStore, MemoryStore},
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let conn = db::connect_and_migrate("sqlite::memory:").await.expect("connect");
    app(Arc::new(AppState { store: Arc::new(DbStore::new(conn)) }))
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

fn post_movie(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/movies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn shawshank() -> Value {
    json!({
        "imdb_id": "tt0111161",
        "title": "The Shawshank Redemption",
        "year": 1994,
        "rating": 9.3,
        "is_super_hero": false
    })
}

#[tokio::test]
async fn list_is_empty_before_any_create() {
    let router = test_app().await;
    let (status, body) = send(&router, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_get_and_filter_round_trip() {
    let router = test_app().await;

    let (status, created) = send(&router, post_movie(&shawshank())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["imdb_id"], json!("tt0111161"));
    assert_eq!(created["title"], json!("The Shawshank Redemption"));
    assert_eq!(created["year"], json!(1994));
    assert_eq!(created["rating"], json!(9.3));
    assert_eq!(created["is_super_hero"], json!(false));

    let (status, fetched) = send(&router, get("/movies/tt0111161")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, filtered) = send(&router, get("/movies?year=1994")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered, json!([created]));

    let (status, empty) = send(&router, get("/movies?year=2001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn get_unknown_movie_returns_not_found_body() {
    let router = test_app().await;
    let (status, body) = send(&router, get("/movies/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"massage": "Not Found"}));
}

#[tokio::test]
async fn duplicate_create_conflicts_and_keeps_first_record() {
    let router = test_app().await;

    let (status, first) = send(&router, post_movie(&shawshank())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut second = shawshank();
    second["title"] = json!("Not Shawshank");
    let (status, body) = send(&router, post_movie(&second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!("movie already exists"));

    let (status, kept) = send(&router, get("/movies/tt0111161")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept, first);
}

#[tokio::test]
async fn bad_year_param_is_a_validation_error() {
    let router = test_app().await;
    send(&router, post_movie(&shawshank())).await;

    let (status, body) = send(&router, get("/movies?year=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().is_some_and(|s| !s.is_empty()));

    // storage is untouched by the failed request
    let (status, all) = send(&router, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_body_is_a_validation_error() {
    let router = test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/movies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, body) = send(&router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().is_some_and(|s| !s.is_empty()));

    let (status, all) = send(&router, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn memory_backend_serves_the_same_routes_without_ids() {
    let router = app(Arc::new(AppState { store: Arc::new(MemoryStore::new()) }));

    let (status, created) = send(&router, post_movie(&shawshank())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("id").is_none());

    let (status, fetched) = send(&router, get("/movies/tt0111161")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // duplicates are accepted by this backend
    let (status, _) = send(&router, post_movie(&shawshank())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn creates_list_in_insertion_order() {
    let router = test_app().await;

    for (imdb_id, title, year) in [
        ("tt0111161", "The Shawshank Redemption", 1994),
        ("tt0468569", "The Dark Knight", 2008),
        ("tt0110912", "Pulp Fiction", 1994),
    ] {
        let movie = json!({
            "imdb_id": imdb_id,
            "title": title,
            "year": year,
            "rating": 8.9,
            "is_super_hero": imdb_id == "tt0468569"
        });
        let (status, _) = send(&router, post_movie(&movie)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = send(&router, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = all
        .as_array()
        .expect("array")
        .iter()
        .map(|m| m["imdb_id"].as_str().expect("imdb_id"))
        .collect();
    assert_eq!(ids, ["tt0111161", "tt0468569", "tt0110912"]);

    let (status, from_1994) = send(&router, get("/movies?year=1994")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = from_1994
        .as_array()
        .expect("array")
        .iter()
        .map(|m| m["imdb_id"].as_str().expect("imdb_id"))
        .collect();
    assert_eq!(ids, ["tt0111161", "tt0110912"]);
}
