use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    models::{MovieDetails, NewMovie, SearchCandidate},
};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("movie database request failed: {0}")]
    Request(#[from] wreq::Error),
    #[error("movie database response is missing `{0}`")]
    MissingField(&'static str),
}

pub struct TmdbClient {
    client: wreq::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: wreq::Client, config: &Config) -> Self {
        if config.tmdb_api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, movie database lookups will fail");
        }

        let rps = NonZeroU32::new(config.tmdb_rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self {
            client,
            api_key: config.tmdb_api_key.clone(),
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
            image_base_url: config.tmdb_image_base_url.clone(),
            language: config.tmdb_language.clone(),
            limiter,
        }
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Free-text title search. Results are returned as-is, in provider order.
    pub async fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url);
        let resp: SearchResponse = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(query = %title, results = resp.results.len(), "searched movie database");
        Ok(resp.results)
    }

    pub async fn details(&self, tmdb_id: i64) -> Result<MovieDetails, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url, tmdb_id);
        let details: MovieDetails = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(tmdb_id = tmdb_id, title = ?details.title, "fetched movie details");
        Ok(details)
    }

    /// Looks up `tmdb_id` and shapes it into a record ready to be stored.
    pub async fn fetch_new_movie(&self, tmdb_id: i64) -> Result<NewMovie, ProviderError> {
        let details = self.details(tmdb_id).await?;
        to_new_movie(details, &self.image_base_url)
    }
}

pub fn to_new_movie(details: MovieDetails, image_base_url: &str) -> Result<NewMovie, ProviderError> {
    let title = details
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ProviderError::MissingField("title"))?;

    Ok(NewMovie {
        title,
        year: details.release_date.as_deref().and_then(release_year),
        description: details.overview.unwrap_or_default(),
        img_url: details
            .poster_path
            .as_deref()
            .map(|path| poster_url(image_base_url, path))
            .unwrap_or_default(),
    })
}

/// Year of a `YYYY-MM-DD` release date. Partial dates like `2010` or `2010-07` still yield the year.
pub fn release_year(release_date: &str) -> Option<i32> {
    let release_date = release_date.trim();
    if let Ok(date) = release_date.parse::<jiff::civil::Date>() {
        return Some(i32::from(date.year()));
    }

    let head = release_date.split('-').next()?;
    if head.len() != 4 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

/// Empty when the provider has no poster.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    let path = poster_path.trim();
    if path.is_empty() {
        return String::new();
    }
    let base = image_base_url.trim_end_matches('/');
    if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchCandidate>,
}
