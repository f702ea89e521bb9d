use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tokio::sync::Mutex;

use crate::{
    entities::movie,
    error::{ApiError, ApiResult},
    models::{Movie, NewMovie},
};

/// Storage backend for movies. Implementations keep insertion order for
/// the listing operations.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_all(&self) -> ApiResult<Vec<Movie>>;
    async fn list_by_year(&self, year: i32) -> ApiResult<Vec<Movie>>;
    async fn get_by_imdb_id(&self, imdb_id: &str) -> ApiResult<Movie>;
    async fn insert(&self, new: NewMovie) -> ApiResult<Movie>;
}

/// Relational backend. Assigns sequential ids and rejects duplicate
/// `imdb_id`s via the unique index.
#[derive(Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for DbStore {
    async fn list_all(&self) -> ApiResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn list_by_year(&self, year: i32) -> ApiResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .filter(movie::Column::Year.eq(year))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn get_by_imdb_id(&self, imdb_id: &str) -> ApiResult<Movie> {
        movie::Entity::find()
            .filter(movie::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?
            .map(Movie::from)
            .ok_or(ApiError::NotFound)
    }

    async fn insert(&self, new: NewMovie) -> ApiResult<Movie> {
        let model = movie::ActiveModel {
            id: Default::default(),
            imdb_id: Set(new.imdb_id),
            title: Set(new.title),
            year: Set(new.year),
            rating: Set(new.rating),
            is_super_hero: Set(new.is_super_hero),
        };

        match movie::Entity::insert(model).exec_with_returning(&self.db).await {
            Ok(stored) => Ok(Movie::from(stored)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(ApiError::Conflict),
                _ => Err(err.into()),
            },
        }
    }
}

/// In-process backend. Lives for the process; ids are never assigned and
/// duplicate `imdb_id`s are accepted.
#[derive(Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_all(&self) -> ApiResult<Vec<Movie>> {
        Ok(self.movies.lock().await.clone())
    }

    async fn list_by_year(&self, year: i32) -> ApiResult<Vec<Movie>> {
        let movies = self.movies.lock().await;
        Ok(movies.iter().filter(|m| m.year == year).cloned().collect())
    }

    async fn get_by_imdb_id(&self, imdb_id: &str) -> ApiResult<Movie> {
        let movies = self.movies.lock().await;
        movies
            .iter()
            .find(|m| m.imdb_id == imdb_id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn insert(&self, new: NewMovie) -> ApiResult<Movie> {
        let movie = Movie::from(new);
        self.movies.lock().await.push(movie.clone());
        Ok(movie)
    }
}
