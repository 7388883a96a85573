//! Book model, request types and pagination

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::genre::Genre;

/// Default page size for listings
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Hard cap on page size to keep result sets bounded
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A catalog book
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub publication_year: i32,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub genre_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with its genre joined for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookWithGenre {
    #[serde(flatten)]
    pub book: Book,
    pub genre: Option<Genre>,
}

/// Compact book view nested under a genre
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: Uuid,
    pub title: String,
    pub writer: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Create book request.
///
/// Required fields are optional here so that missing input surfaces as a
/// 400 from the service rather than a deserialization rejection. `writer`
/// falls back to the title when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[serde(alias = "author")]
    pub writer: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Option<Decimal>,
    #[serde(alias = "stock")]
    pub stock_quantity: Option<i32>,
    #[serde(alias = "genreId")]
    pub genre_id: Option<Uuid>,
}

/// Partial update request for a book.
///
/// Absent fields keep their current values. `description` and `genre_id`
/// accept an explicit null to clear the field; a present-but-zero
/// `stock_quantity` is applied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[serde(alias = "author")]
    pub writer: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[schema(value_type = f64)]
    pub price: Option<Decimal>,
    #[serde(alias = "stock")]
    pub stock_quantity: Option<i32>,
    #[serde(default, alias = "genreId", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Uuid>, nullable)]
    pub genre_id: Option<Option<Uuid>>,
}

/// Book listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring filter on title
    pub title: Option<String>,
    /// Case-insensitive substring filter on writer
    pub writer: Option<String>,
    /// Case-insensitive substring filter on genre name
    pub genre: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl BookQuery {
    /// Normalized (page, limit): both floored at 1, limit capped
    pub fn page_limit(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        (page, limit)
    }
}

/// Pagination block carried by listing responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}
