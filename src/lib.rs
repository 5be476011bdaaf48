//! Bookshelf API: book catalogue with soft delete and identity-provider backed
//! sign-up, sign-in and sign-out.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, BookBackend};
pub use error::{AppError, ConfigError};
pub use models::{Book, Credentials, NewBook, Session, UserProfile};
pub use response::{error_body, success, success_empty};
pub use routes::{app, book_routes, common_routes, user_routes};
pub use service::{BookService, UserService};
pub use state::AppState;
pub use store::{AuthRepository, BookRepository, StoreError};
