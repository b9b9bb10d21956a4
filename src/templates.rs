use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::{AddForm, EditForm, FieldError, error_for},
    models::{Movie, SearchCandidate},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

/// Home page. `movies` is expected highest rank first.
pub fn index_page(movies: &[Movie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &Movie, form: &EditForm, errors: &[FieldError]) -> String {
    let action = format!("/edit?id={}", movie.id);

    page(
        "Edit Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                        form class="mt-8 space-y-6" method="post" action=(action) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                                input class=(INPUT_CLASS) name="rating" id="rating" value=(form.rating) inputmode="decimal" required;
                                (field_error(errors, "rating"))
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                                input class=(INPUT_CLASS) name="review" id="review" value=(form.review) required;
                                (field_error(errors, "review"))
                            }

                            button class=(BUTTON_CLASS) type="submit" { "Done" }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(form: &AddForm, errors: &[FieldError]) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                                input class=(INPUT_CLASS) name="title" id="title" value=(form.title) required;
                                (field_error(errors, "title"))
                            }

                            button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                        }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[SearchCandidate], image_base_url: &str) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                            p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                    }

                    @if candidates.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No results." }
                        }
                    } @else {
                        ul class="mt-10 space-y-2" {
                            @for candidate in candidates {
                                li class="bg-white shadow rounded-lg p-4" {
                                    a class="flex items-center gap-4 text-gray-900 hover:text-blue-700" href=(format!("/select?id={}", candidate.id)) {
                                        @if let Some(path) = candidate.poster_path.as_deref().filter(|p| !p.is_empty()) {
                                            img class="h-16 w-11 rounded object-cover" src=(crate::tmdb::poster_url(image_base_url, path)) alt="";
                                        }
                                        span class="font-medium" { (candidate.title) }
                                        @if let Some(date) = candidate.release_date.as_deref().filter(|d| !d.is_empty()) {
                                            span class="text-gray-500" { " \u{b7} " (date) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (status) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn field_error(errors: &[FieldError], field: &str) -> Markup {
    html! {
        @if let Some(err) = error_for(errors, field) {
            p class="mt-2 text-sm text-red-600" { (err.message) }
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" data-movie-id=(movie.id) {
            @if movie.img_url.is_empty() {
                div class="h-36 w-24 shrink-0 rounded bg-gray-200" {}
            } @else {
                img class="h-36 w-24 shrink-0 rounded object-cover" src=(movie.img_url) alt=(movie.title);
            }

            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (movie.title)
                        @if let Some(year) = movie.year {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="rounded bg-yellow-100 px-2 py-1 text-sm font-semibold text-yellow-800" { (rating) " / 10" }
                    }
                }

                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }

                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}
