use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait, Unchanged,
    sea_query::{Expr, NullOrdering, Order},
};
use tracing::debug;

use crate::{
    entities::movie,
    models::{Movie, NewMovie},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("movie {0} not found")]
    NotFound(i32),
    #[error("a movie titled {0:?} is already in the collection")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the movie collection. Every write commits before returning.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewMovie) -> StoreResult<Movie> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let inserted = model.insert(&self.db).await.map_err(|err| conflict_or(err, &title))?;
        debug!(id = inserted.id, title = %inserted.title, "inserted movie");
        Ok(inserted.into())
    }

    /// All movies by rating ascending. Unrated movies come first, ties keep insertion order.
    pub async fn all_by_rating(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_with_nulls(movie::Column::Rating, Order::Asc, NullOrdering::First)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> StoreResult<Movie> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Movie::from)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn update(&self, movie: &Movie) -> StoreResult<Movie> {
        let model = movie::ActiveModel {
            id: Unchanged(movie.id),
            title: Set(movie.title.clone()),
            year: Set(movie.year),
            description: Set(movie.description.clone()),
            rating: Set(movie.rating),
            ranking: Set(movie.ranking),
            review: Set(movie.review.clone()),
            img_url: Set(movie.img_url.clone()),
        };

        match model.update(&self.db).await {
            Ok(updated) => Ok(updated.into()),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => {
                Err(StoreError::NotFound(movie.id))
            },
            Err(err) => Err(conflict_or(err, &movie.title)),
        }
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id = id, "deleted movie");
        Ok(())
    }

    /// Writes back the `ranking` column of every given movie in one transaction.
    pub async fn save_rankings(&self, movies: &[Movie]) -> StoreResult<()> {
        if movies.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for m in movies {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(m.ranking))
                .filter(movie::Column::Id.eq(m.id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(())
    }

    pub async fn count(&self) -> StoreResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }
}

fn conflict_or(err: DbErr, title: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict(title.to_string()),
        _ => StoreError::Db(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn memory_store() -> MovieStore {
        let db = db::connect_and_init("sqlite::memory:").await.unwrap();
        MovieStore::new(db)
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: Some(2010),
            description: format!("{title} overview"),
            img_url: format!("https://image.tmdb.org/t/p/w500/{}.jpg", title.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_leaves_user_fields_unset() {
        let store = memory_store().await;
        let movie = store.create(new_movie("Inception")).await.unwrap();

        assert!(movie.id > 0);
        assert_eq!(movie.rating, None);
        assert_eq!(movie.ranking, None);
        assert_eq!(movie.review, None);
        assert_eq!(store.get(movie.id).await.unwrap(), movie);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict_and_keeps_row_count() {
        let store = memory_store().await;
        store.create(new_movie("Heat")).await.unwrap();

        let err = store.create(new_movie("Heat")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref t) if t == "Heat"), "{err:?}");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_round_trips_rating_and_review_only() {
        let store = memory_store().await;
        let original = store.create(new_movie("Alien")).await.unwrap();

        let mut edited = original.clone();
        edited.rating = Some(7.5);
        edited.review = Some("Great film".to_string());
        store.update(&edited).await.unwrap();

        let read = store.get(original.id).await.unwrap();
        assert_eq!(read.rating, Some(7.5));
        assert_eq!(read.review.as_deref(), Some("Great film"));
        assert_eq!(read.title, original.title);
        assert_eq!(read.year, original.year);
        assert_eq!(read.description, original.description);
        assert_eq!(read.img_url, original.img_url);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = memory_store().await;
        let mut ghost = store.create(new_movie("Ghost")).await.unwrap();
        ghost.id += 100;

        assert!(matches!(store.get(ghost.id).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.update(&ghost).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(ghost.id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = memory_store().await;
        let a = store.create(new_movie("Jaws")).await.unwrap();
        store.create(new_movie("Up")).await.unwrap();

        store.delete(a.id).await.unwrap();

        assert!(matches!(store.get(a.id).await, Err(StoreError::NotFound(id)) if id == a.id));
        assert_eq!(store.all_by_rating().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn all_by_rating_puts_unrated_first_then_ascending() {
        let store = memory_store().await;
        for (title, rating) in [("High", Some(9.0)), ("None", None), ("Low", Some(3.0))] {
            let mut m = store.create(new_movie(title)).await.unwrap();
            m.rating = rating;
            store.update(&m).await.unwrap();
        }

        let titles: Vec<_> =
            store.all_by_rating().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["None", "Low", "High"]);
    }

    #[tokio::test]
    async fn save_rankings_persists_every_rank() {
        let store = memory_store().await;
        store.create(new_movie("One")).await.unwrap();
        store.create(new_movie("Two")).await.unwrap();

        let mut movies = store.all_by_rating().await.unwrap();
        movies[0].ranking = Some(2);
        movies[1].ranking = Some(1);
        store.save_rankings(&movies).await.unwrap();

        for m in &movies {
            assert_eq!(store.get(m.id).await.unwrap().ranking, m.ranking);
        }
    }
}
