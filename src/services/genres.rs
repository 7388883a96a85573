//! Genre management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::genre::{CreateGenre, Genre, GenreDetail, UpdateGenre},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new genre after presence and uniqueness checks
    pub async fn create(&self, request: CreateGenre) -> AppResult<Genre> {
        let Some(name) = request.name.as_deref() else {
            return Err(AppError::BadRequest("Genre name is required".to_string()));
        };
        request.validate()?;

        if self.repository.genres.name_exists(name, None).await? {
            return Err(AppError::Conflict("Genre already exists".to_string()));
        }

        self.repository
            .genres
            .create(name, request.description.as_deref())
            .await
    }

    /// List all genres sorted by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Get a genre with its books nested
    pub async fn get(&self, id: Uuid) -> AppResult<GenreDetail> {
        let genre = self
            .repository
            .genres
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        let books = self.repository.genres.books_for_genre(id).await?;

        Ok(GenreDetail { genre, books })
    }

    /// Apply a partial update; an updated name must stay unique
    pub async fn update(&self, id: Uuid, request: UpdateGenre) -> AppResult<Genre> {
        request.validate()?;

        self.repository
            .genres
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        if let Some(ref name) = request.name {
            if self.repository.genres.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(
                    "Genre name already exists".to_string(),
                ));
            }
        }

        self.repository
            .genres
            .update(
                id,
                request.name.as_deref(),
                request.description.as_ref().map(|d| d.as_deref()),
            )
            .await
    }

    /// Delete a genre; dependent books keep existing with genre_id nulled
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository
            .genres
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        self.repository.genres.delete(id).await?;
        Ok(())
    }
}
