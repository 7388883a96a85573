//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{BookQuery, BookWithGenre, CreateBook, Pagination, UpdateBook},
        genre::Genre,
    },
};

use super::{ApiResponse, AppJson, AppQuery};

/// Paginated book listing payload
#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookWithGenre>,
    pub pagination: Pagination,
}

/// Book listing scoped to a genre
#[derive(Serialize, ToSchema)]
pub struct GenreBookList {
    pub genre: Genre,
    pub books: Vec<BookWithGenre>,
    pub pagination: Pagination,
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookWithGenre),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Referenced genre not found"),
        (status = 409, description = "Title already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookWithGenre>>)> {
    let book = state.services.books.create(request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Book created successfully", book),
    ))
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of books", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<BookQuery>,
) -> AppResult<Json<ApiResponse<BookList>>> {
    let (books, pagination) = state.services.books.list(&query).await?;
    Ok(ApiResponse::ok(
        "Books retrieved successfully",
        BookList { books, pagination },
    ))
}

/// Get book detail by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookWithGenre),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookWithGenre>>> {
    let book = state.services.books.get(book_id).await?;
    Ok(ApiResponse::ok("Book detail retrieved successfully", book))
}

/// List books belonging to a genre
#[utoipa::path(
    get,
    path = "/books/genre/{genre_id}",
    tag = "books",
    params(
        ("genre_id" = Uuid, Path, description = "Genre ID"),
        BookQuery
    ),
    responses(
        (status = 200, description = "Page of books for the genre", body = GenreBookList),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn list_books_by_genre(
    State(state): State<crate::AppState>,
    Path(genre_id): Path<Uuid>,
    AppQuery(query): AppQuery<BookQuery>,
) -> AppResult<Json<ApiResponse<GenreBookList>>> {
    let (genre, books, pagination) = state.services.books.list_by_genre(genre_id, &query).await?;
    Ok(ApiResponse::ok(
        "Books retrieved successfully",
        GenreBookList {
            genre,
            books,
            pagination,
        },
    ))
}

/// Partially update a book
#[utoipa::path(
    patch,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookWithGenre),
        (status = 404, description = "Book or referenced genre not found"),
        (status = 409, description = "Title already exists")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<Uuid>,
    AppJson(request): AppJson<UpdateBook>,
) -> AppResult<Json<ApiResponse<BookWithGenre>>> {
    let book = state.services.books.update(book_id, request).await?;
    Ok(ApiResponse::ok("Book updated successfully", book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Book is referenced by existing orders")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.services.books.delete(book_id).await?;
    Ok(ApiResponse::ok("Book deleted successfully", serde_json::Value::Null))
}
