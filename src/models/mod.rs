//! Data models shared between the API, services and repository layers

pub mod book;
pub mod genre;
pub mod order;
pub mod user;

pub use book::Book;
pub use genre::Genre;
pub use order::Order;
pub use user::User;
