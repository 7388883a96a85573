//! Repository layer for database operations

pub mod books;
pub mod genres;
pub mod orders;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub orders: orders::OrdersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            orders: orders::OrdersRepository::new(pool.clone()),
            pool,
        }
    }
}
