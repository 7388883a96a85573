//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, genres, health, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkwell API",
        version = "0.1.0",
        description = "Bookstore catalog and order REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::list_books_by_genre,
        books::update_book,
        books::delete_book,
        // Genres
        genres::create_genre,
        genres::list_genres,
        genres::get_genre,
        genres::update_genre,
        genres::delete_genre,
        // Transactions
        transactions::create_transaction,
        transactions::list_transactions,
        transactions::transaction_statistics,
        transactions::get_transaction,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::User,
            crate::models::user::UserPublic,
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            auth::LoginData,
            // Books
            crate::models::book::Book,
            crate::models::book::BookWithGenre,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::Pagination,
            books::BookList,
            books::GenreBookList,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::GenreDetail,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Transactions
            crate::models::order::Order,
            crate::models::order::OrderItemInput,
            crate::models::order::CreateTransaction,
            crate::models::order::OrderItemBook,
            crate::models::order::OrderItemDetail,
            crate::models::order::OrderDetail,
            crate::models::order::OrderCreated,
            crate::models::order::TransactionStatistics,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and authentication"),
        (name = "books", description = "Book catalog management"),
        (name = "genres", description = "Genre management"),
        (name = "transactions", description = "Orders and sales statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
