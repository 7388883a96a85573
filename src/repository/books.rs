//! Books repository for database operations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, BookWithGenre, CreateBook},
        genre::Genre,
    },
};

/// Flat row for the book/genre join
#[derive(FromRow)]
struct BookGenreRow {
    id: Uuid,
    title: String,
    writer: String,
    publisher: String,
    publication_year: i32,
    description: Option<String>,
    price: Decimal,
    stock_quantity: i32,
    genre_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    genre_name: Option<String>,
    genre_description: Option<String>,
}

impl From<BookGenreRow> for BookWithGenre {
    fn from(row: BookGenreRow) -> Self {
        let genre = match (row.genre_id, row.genre_name) {
            (Some(id), Some(name)) => Some(Genre {
                id,
                name,
                description: row.genre_description,
            }),
            _ => None,
        };

        BookWithGenre {
            book: Book {
                id: row.id,
                title: row.title,
                writer: row.writer,
                publisher: row.publisher,
                publication_year: row.publication_year,
                description: row.description,
                price: row.price,
                stock_quantity: row.stock_quantity,
                genre_id: row.genre_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            genre,
        }
    }
}

const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.writer, b.publisher, b.publication_year,
           b.description, b.price, b.stock_quantity, b.genre_id,
           b.created_at, b.updated_at,
           g.name AS genre_name, g.description AS genre_description
    FROM books b
    LEFT JOIN genres g ON b.genre_id = g.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with its genre joined
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookWithGenre>> {
        let row = sqlx::query_as::<_, BookGenreRow>(&format!("{} WHERE b.id = $1", BOOK_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BookWithGenre::from))
    }

    /// Check if a title already exists, optionally excluding one id (for updates)
    pub async fn title_exists(&self, title: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND id != $2)")
                .bind(title)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?
        };

        Ok(exists)
    }

    /// Search books with filters and pagination, newest first.
    ///
    /// Returns the page slice and the total count matching the filters.
    /// When `genre_id` is set the listing is scoped to that genre.
    pub async fn search(
        &self,
        query: &BookQuery,
        genre_id: Option<Uuid>,
    ) -> AppResult<(Vec<BookWithGenre>, i64)> {
        let (page, limit) = query.page_limit();
        let offset = (page - 1) * limit;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(id) = genre_id {
            params.push(id.to_string());
            conditions.push(format!("b.genre_id = ${}::uuid", params.len()));
        }

        if let Some(ref title) = query.title {
            params.push(format!("%{}%", title));
            conditions.push(format!("b.title ILIKE ${}", params.len()));
        }

        if let Some(ref writer) = query.writer {
            params.push(format!("%{}%", writer));
            conditions.push(format!("b.writer ILIKE ${}", params.len()));
        }

        if let Some(ref genre) = query.genre {
            params.push(format!("%{}%", genre));
            conditions.push(format!("g.name ILIKE ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count total matching the filters
        let count_query = format!(
            "SELECT COUNT(*) FROM books b LEFT JOIN genres g ON b.genre_id = g.id {}",
            where_clause
        );
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Fetch the page slice
        let select_query = format!(
            "{} {} ORDER BY b.created_at DESC LIMIT {} OFFSET {}",
            BOOK_SELECT, where_clause, limit, offset
        );
        let mut select_builder = sqlx::query_as::<_, BookGenreRow>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let rows = select_builder.fetch_all(&self.pool).await?;

        Ok((rows.into_iter().map(BookWithGenre::from).collect(), total))
    }

    /// Fetch books by id in one batch
    pub async fn fetch_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Create a new book; validation happened in the service
    pub async fn create(
        &self,
        book: &CreateBook,
        title: &str,
        writer: &str,
    ) -> AppResult<Uuid> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO books (
                id, title, writer, publisher, publication_year, description,
                price, stock_quantity, genre_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(writer)
        .bind(&book.publisher)
        .bind(book.publication_year)
        .bind(&book.description)
        .bind(book.price)
        .bind(book.stock_quantity.unwrap_or(0))
        .bind(book.genre_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Apply a partial update; absent fields keep their current values.
    ///
    /// `description` and `genre_id` carry an extra presence flag so an
    /// explicit null clears the column.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        writer: Option<&str>,
        publisher: Option<&str>,
        publication_year: Option<i32>,
        description: Option<Option<&str>>,
        price: Option<Decimal>,
        stock_quantity: Option<i32>,
        genre_id: Option<Option<Uuid>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                writer = COALESCE($3, writer),
                publisher = COALESCE($4, publisher),
                publication_year = COALESCE($5, publication_year),
                description = CASE WHEN $6 THEN $7 ELSE description END,
                price = COALESCE($8, price),
                stock_quantity = COALESCE($9, stock_quantity),
                genre_id = CASE WHEN $10 THEN $11 ELSE genre_id END,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(writer)
        .bind(publisher)
        .bind(publication_year)
        .bind(description.is_some())
        .bind(description.flatten())
        .bind(price)
        .bind(stock_quantity)
        .bind(genre_id.is_some())
        .bind(genre_id.flatten())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a book.
    ///
    /// The FK from order_items is RESTRICT, so deleting a book referenced
    /// by an order fails at the store and propagates as a database error.
    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
