//! Service configuration: raw types, environment loading and validation.

pub mod types;
pub mod loader;
pub mod validator;

pub use types::*;
pub use loader::*;
pub use validator::*;
