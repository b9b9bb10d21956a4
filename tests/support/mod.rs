use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use movieshelf::{AppState, config::Config, db, store::MovieStore, tmdb::TmdbClient};
use serde_json::json;
use tower::ServiceExt;

pub const CDN: &str = "https://image.tmdb.org/t/p/w500";

/// Serves `/search/movie` and `/movie/{id}` with two known films.
async fn spawn_stub_tmdb() -> String {
    let app = Router::new()
        .route(
            "/search/movie",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let results = match q.get("query").map(String::as_str) {
                    Some("Inception") => json!([{
                        "id": 27205,
                        "title": "Inception",
                        "release_date": "2010-07-15",
                        "overview": "Cobb steals secrets from dreams.",
                        "poster_path": "/inception.jpg"
                    }]),
                    _ => json!([]),
                };
                Json(json!({ "page": 1, "results": results }))
            }),
        )
        .route(
            "/movie/{id}",
            get(|Path(id): Path<i64>, Query(q): Query<HashMap<String, String>>| async move {
                if q.get("language").map(String::as_str) != Some("en-US") {
                    return StatusCode::BAD_REQUEST.into_response();
                }
                match id {
                    27205 => Json(json!({
                        "id": 27205,
                        "title": "Inception",
                        "release_date": "2010-07-16",
                        "overview": "Cobb steals secrets from dreams.",
                        "poster_path": "/abc.jpg"
                    }))
                    .into_response(),
                    603 => Json(json!({
                        "id": 603,
                        "title": "The Matrix",
                        "release_date": "",
                        "overview": "A hacker learns the truth.",
                        "poster_path": null
                    }))
                    .into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct TestApp {
    pub router: Router,
    pub store: MovieStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let tmdb_base_url = spawn_stub_tmdb().await;
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            tmdb_api_key: "test-key".to_string(),
            tmdb_base_url,
            tmdb_image_base_url: CDN.to_string(),
            tmdb_language: "en-US".to_string(),
            tmdb_rps: 100,
            tmdb_timeout_secs: 5,
            database_url: "sqlite::memory:".to_string(),
        };

        let store = MovieStore::new(db::connect_and_init(&config.database_url).await.unwrap());
        let tmdb = TmdbClient::new(wreq::Client::new(), &config);
        let state = Arc::new(AppState { store: store.clone(), tmdb: Arc::new(tmdb) });

        Self { router: movieshelf::app(state), store }
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

pub fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
