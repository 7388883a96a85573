//! Book catalog service: validation, integrity checks and CRUD

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookQuery, BookWithGenre, CreateBook, Pagination, UpdateBook},
        genre::Genre,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book.
    ///
    /// Write protocol: required fields, then title uniqueness, then genre
    /// existence; the store is only touched after all three pass. The
    /// uniqueness check is advisory, the DB constraint is the authority.
    pub async fn create(&self, request: CreateBook) -> AppResult<BookWithGenre> {
        let (Some(title), Some(_), Some(_), Some(price)) = (
            request.title.as_deref(),
            request.publisher.as_deref(),
            request.publication_year,
            request.price,
        ) else {
            return Err(AppError::BadRequest(
                "Title, publisher, publication_year, and price are required".to_string(),
            ));
        };
        request.validate()?;
        check_non_negative(Some(price), request.stock_quantity)?;

        if self.repository.books.title_exists(title, None).await? {
            return Err(AppError::Conflict(
                "Book with this title already exists".to_string(),
            ));
        }

        if let Some(genre_id) = request.genre_id {
            self.require_genre(genre_id).await?;
        }

        // Writer falls back to the title when not provided
        let writer = request.writer.as_deref().unwrap_or(title);

        let id = self.repository.books.create(&request, title, writer).await?;
        self.get(id).await
    }

    /// List books with filters and pagination
    pub async fn list(&self, query: &BookQuery) -> AppResult<(Vec<BookWithGenre>, Pagination)> {
        let (books, total) = self.repository.books.search(query, None).await?;
        let (page, limit) = query.page_limit();
        Ok((books, Pagination::new(page, limit, total)))
    }

    /// List books of one genre, returning the genre alongside the page
    pub async fn list_by_genre(
        &self,
        genre_id: Uuid,
        query: &BookQuery,
    ) -> AppResult<(Genre, Vec<BookWithGenre>, Pagination)> {
        let genre = self.require_genre(genre_id).await?;

        let (books, total) = self.repository.books.search(query, Some(genre_id)).await?;
        let (page, limit) = query.page_limit();
        Ok((genre, books, Pagination::new(page, limit, total)))
    }

    /// Get book detail by ID
    pub async fn get(&self, id: Uuid) -> AppResult<BookWithGenre> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Apply a partial update with the same write protocol as create
    pub async fn update(&self, id: Uuid, request: UpdateBook) -> AppResult<BookWithGenre> {
        request.validate()?;
        check_non_negative(request.price, request.stock_quantity)?;

        self.get(id).await?;

        if let Some(ref title) = request.title {
            if self.repository.books.title_exists(title, Some(id)).await? {
                return Err(AppError::Conflict(
                    "Book with this title already exists".to_string(),
                ));
            }
        }

        if let Some(Some(genre_id)) = request.genre_id {
            self.require_genre(genre_id).await?;
        }

        self.repository
            .books
            .update(
                id,
                request.title.as_deref(),
                request.writer.as_deref(),
                request.publisher.as_deref(),
                request.publication_year,
                request.description.as_ref().map(|d| d.as_deref()),
                request.price,
                request.stock_quantity,
                request.genre_id,
            )
            .await?;

        self.get(id).await
    }

    /// Delete a book.
    ///
    /// The re-fetch distinguishes 404 from a store failure; a book still
    /// referenced by order items is rejected by the RESTRICT constraint.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get(id).await?;

        self.repository.books.delete(id).await?;
        Ok(())
    }

    async fn require_genre(&self, genre_id: Uuid) -> AppResult<Genre> {
        self.repository
            .genres
            .get_by_id(genre_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }
}

fn check_non_negative(price: Option<Decimal>, stock: Option<i32>) -> AppResult<()> {
    if matches!(price, Some(p) if p < Decimal::ZERO) {
        return Err(AppError::Validation(
            "Price must be non-negative".to_string(),
        ));
    }
    if matches!(stock, Some(s) if s < 0) {
        return Err(AppError::Validation(
            "Stock quantity must be non-negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let price = "-1".parse::<Decimal>().unwrap();
        assert!(check_non_negative(Some(price), None).is_err());
    }

    #[test]
    fn zero_price_and_stock_are_accepted() {
        assert!(check_non_negative(Some(Decimal::ZERO), Some(0)).is_ok());
    }

    #[test]
    fn negative_stock_is_rejected() {
        assert!(check_non_negative(None, Some(-3)).is_err());
    }
}
