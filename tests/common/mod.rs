#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};
use user_api::api::response::ResponseShaper;
use user_api::api::routes::USERS_RESOURCE;
use user_api::domain::entities::{NewUser, User};
use user_api::domain::repositories::UserRepository;
use user_api::error::AppError;
use user_api::routes::app_router;
use user_api::state::AppState;
use user_api::utils::jwt::{self, Claims, JwtVerifier};

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const APP_HOST: &str = "http://localhost:3000";

/// Users kept in memory, ordered by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    unavailable: bool,
}

impl InMemoryUserRepository {
    /// A repository whose every call fails like a lost database connection.
    pub fn unavailable() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn seed(&self, count: i64) {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        for _ in 0..count {
            let id = users.last().map_or(1, |u| u.id + 1);
            users.push(User::new(
                id,
                format!("User {id}"),
                format!("user{id}@example.com"),
                now,
                now,
            ));
        }
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::internal(anyhow::anyhow!("connection refused")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::other(
                "Unique constraint violation: users_email_key",
            ));
        }
        let id = users.last().map_or(1, |u| u.id + 1);
        let now = Utc::now();
        let user = User::new(id, new_user.full_name, new_user.email, now, now);
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, user: User) -> Result<User, AppError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        stored.full_name = user.full_name;
        stored.email = user.email;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

pub fn create_test_state(repository: Arc<InMemoryUserRepository>) -> AppState {
    AppState::new(
        repository,
        ResponseShaper::new(APP_HOST, USERS_RESOURCE, 10),
        JwtVerifier::new(JWT_SECRET),
    )
}

/// Full application router over `repository`, without rate limiting.
pub fn make_server(repository: Arc<InMemoryUserRepository>) -> TestServer {
    let app = app_router(create_test_state(repository), None).unwrap();
    TestServer::new(app).unwrap()
}

pub fn token() -> String {
    jwt::issue(&Claims::new("tester", Duration::minutes(5)), JWT_SECRET).unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {}", token())
}
