use crate::models::Movie;

/// Assigns ranks by position over a list sorted by ascending rating: the last
/// movie gets rank `N`, the first gets `1`. Equal ratings still get distinct ranks.
pub fn assign_ranks(movies: &mut [Movie]) {
    let total = movies.len();
    for (i, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(i32::try_from(total - i).unwrap_or(i32::MAX));
    }
}
