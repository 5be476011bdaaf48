//! Request extractors for bearer tokens and credential bodies.

pub mod bearer;
pub mod credentials;
pub use bearer::{Authenticated, BearerToken};
pub use credentials::CredentialsBody;
