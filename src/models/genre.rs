//! Genre model and request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::book::BookShort;

/// A book genre
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Genre detail with its books nested
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDetail {
    #[serde(flatten)]
    pub genre: Genre,
    pub books: Vec<BookShort>,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[validate(length(min = 1, message = "Genre name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update genre request.
///
/// `description` distinguishes "absent" (keep current value) from an
/// explicit null (clear the field).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    #[validate(length(min = 1, message = "Genre name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
}
