//! User service: account creation, sessions and token resolution.

use super::validation::{require_credentials, require_token};
use crate::error::AppError;
use crate::models::{Session, UserProfile};
use crate::store::AuthRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn AuthRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AppError> {
        require_credentials(email, password)?;
        Ok(self.repository.sign_up(email.trim(), password).await?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        require_credentials(email, password)?;
        Ok(self.repository.sign_in(email.trim(), password).await?)
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        require_token(token)?;
        Ok(self.repository.sign_out(token).await?)
    }

    /// Resolve a bearer token to its owner.
    pub async fn get_user(&self, token: &str) -> Result<UserProfile, AppError> {
        require_token(token)?;
        Ok(self.repository.get_user(token).await?)
    }
}
