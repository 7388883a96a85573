//! Business logic services

pub mod auth;
pub mod books;
pub mod genres;
pub mod transactions;

use sqlx::{Pool, Postgres};

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub transactions: transactions::TransactionsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            transactions: transactions::TransactionsService::new(repository.clone()),
            repository,
        }
    }

    /// Underlying connection pool, for readiness probes
    pub fn pool(&self) -> Pool<Postgres> {
        self.repository.pool.clone()
    }
}
