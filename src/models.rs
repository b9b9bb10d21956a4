use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// Snapshot of one row of the collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub rating: Option<f64>,
    /// Position in the last rendered list. Only meaningful right after a list view.
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub img_url: String,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            description: m.description,
            rating: m.rating,
            ranking: m.ranking,
            review: m.review,
            img_url: m.img_url,
        }
    }
}

/// A movie about to be added; rating, review and ranking start unset.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub img_url: String,
}

/// One entry of a provider search result, shown for disambiguation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchCandidate {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}
