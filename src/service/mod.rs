//! Domain services: business-rule checks in front of the repositories, and the
//! translation of repository failures into `AppError`.

mod books;
mod users;
mod validation;
pub use books::BookService;
pub use users::UserService;
