use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{AppError, AppResult},
    forms::{AddForm, EditForm},
    ranking, templates,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    id: Option<String>,
}

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let mut movies = state.store.all_by_rating().await?;
    ranking::assign_ranks(&mut movies);
    state.store.save_rankings(&movies).await?;
    debug!(count = movies.len(), "ranked collection");

    movies.reverse();
    Ok(Html(templates::index_page(&movies)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.id).await?;
    let form = EditForm::for_movie(&movie);
    Ok(Html(templates::edit_page(&movie, &form, &[])))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let mut movie = state.store.get(q.id).await?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let body = templates::edit_page(&movie, &form, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        },
    };

    movie.rating = Some(valid.rating);
    movie.review = Some(valid.review);
    state.store.update(&movie).await?;
    info!(id = movie.id, rating = valid.rating, "updated rating");

    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(id = q.id, "deleted movie");
    Ok(Redirect::to("/"))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&AddForm::default(), &[]))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let title = match form.validate() {
        Ok(title) => title,
        Err(errors) => {
            let body = templates::add_page(&form, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        },
    };

    let candidates = state.tmdb.search(&title).await?;
    let body = templates::select_page(&title, &candidates, state.tmdb.image_base_url());
    Ok(Html(body).into_response())
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Redirect> {
    let Some(raw) = q.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Redirect::to("/"));
    };
    let tmdb_id: i64 =
        raw.parse().map_err(|_| AppError::bad_request(format!("invalid movie id {raw:?}")))?;

    let new_movie = state.tmdb.fetch_new_movie(tmdb_id).await?;
    let movie = state.store.create(new_movie).await?;
    info!(id = movie.id, tmdb_id = tmdb_id, title = %movie.title, "added movie");

    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}
