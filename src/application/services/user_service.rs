//! User management service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service behind the user endpoints.
///
/// Every method returns the first error it hits; there is no retry and no
/// partial success.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Fetches one page of users and the total number of users.
    ///
    /// The page and the count are queried concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn fetch_index(&self, offset: i64, limit: i64) -> Result<(Vec<User>, u64), AppError> {
        let (users, total) = tokio::try_join!(
            self.repository.list(offset, limit),
            self.repository.count()
        )?;

        Ok((users, u64::try_from(total).unwrap_or_default()))
    }

    /// Fetches a single user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn fetch_show(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Persists a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn fetch_store(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Writes `user` over the stored user `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn fetch_update(&self, id: i64, user: User) -> Result<User, AppError> {
        let user = self.repository.update(id, user).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Deletes user `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was deleted.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn fetch_destroy(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
