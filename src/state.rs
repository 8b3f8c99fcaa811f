//! Shared application state.

use std::sync::Arc;

use crate::api::response::ResponseShaper;
use crate::application::services::UserService;
use crate::domain::repositories::UserRepository;
use crate::utils::jwt::JwtVerifier;

/// State handed to every handler and middleware.
///
/// Cheap to clone; everything behind it is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub shaper: Arc<ResponseShaper>,
    pub jwt: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        shaper: ResponseShaper,
        jwt: JwtVerifier,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(user_repository)),
            shaper: Arc::new(shaper),
            jwt: Arc::new(jwt),
        }
    }
}
