use serde::Deserialize;

use crate::models::Movie;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a FieldError> {
    errors.iter().find(|e| e.field == field)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

impl AddForm {
    /// Returns the trimmed title to search for.
    pub fn validate(&self) -> Result<String, Vec<FieldError>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(vec![FieldError::new("title", "Movie title is required")]);
        }
        Ok(title.to_string())
    }
}

/// Raw edit form. Fields stay strings so a bad submission can be echoed back.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingReview {
    pub rating: f64,
    pub review: String,
}

impl EditForm {
    pub fn for_movie(movie: &Movie) -> Self {
        Self {
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
            review: movie.review.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<RatingReview, Vec<FieldError>> {
        let mut errors = Vec::new();

        let rating = self.rating.trim();
        let parsed = if rating.is_empty() {
            errors.push(FieldError::new("rating", "Rating is required"));
            None
        } else {
            match rating.parse::<f64>() {
                Ok(r) if r.is_finite() => Some(r),
                _ => {
                    errors.push(FieldError::new("rating", "Rating must be a number, e.g. 7.5"));
                    None
                },
            }
        };

        let review = self.review.trim();
        if review.is_empty() {
            errors.push(FieldError::new("review", "Review is required"));
        }

        match parsed {
            Some(rating) if errors.is_empty() => {
                Ok(RatingReview { rating, review: review.to_string() })
            },
            _ => Err(errors),
        }
    }
}
