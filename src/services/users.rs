use std::sync::Arc;
use tracing::info;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::issue_token;
use crate::models::{NewUser, User};
use crate::repositories::{RepoError, UserRepository};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    hash_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self {
            repo,
            jwt,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Стоимость bcrypt; в тестах ставим минимальную.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<User> {
        Ok(self.repo.find_by_id(user_id).await?)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<User> {
        if password != confirm_password {
            return Err(AppError::BadRequest("passwords do not match".into()));
        }

        let password = password.to_string();
        let cost = self.hash_cost;
        // bcrypt считает долго - не занимаем рабочий поток рантайма
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create(NewUser {
                name: name.trim().to_string(),
                email: email.trim().to_lowercase(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepoError::Conflict(_) => AppError::Conflict("email is already registered".into()),
                other => other.into(),
            })?;

        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Возвращает JWT и пользователя. Неизвестный email и неверный пароль
    /// неотличимы для клиента.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let invalid = || AppError::Unauthorized("invalid credentials".into());

        let user = match self.repo.find_by_email(&email.trim().to_lowercase()).await {
            Ok(user) => user,
            Err(RepoError::NotFound(_)) => return Err(invalid()),
            Err(e) => return Err(e.into()),
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
            .unwrap_or(false);
        if !verified {
            return Err(invalid());
        }

        let token = issue_token(&self.jwt.secret, user.id, &user.email, self.jwt.expires_in_hours)?;
        info!("User {} logged in", user.id);
        Ok((token, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::verify_token;
    use crate::testing::InMemoryStore;

    fn service() -> UserService {
        let jwt = JwtConfig {
            secret: "test-secret".into(),
            expires_in_hours: 1,
        };
        UserService::new(Arc::new(InMemoryStore::new()), jwt).with_hash_cost(4)
    }

    #[tokio::test]
    async fn register_then_login_issues_valid_token() {
        let users = service();
        let user = users
            .register("Alice", "Alice@Example.com", "secret1", "secret1")
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "secret1");

        let (token, logged_in) = users.login("alice@example.com", "secret1").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(verify_token("test-secret", &token).unwrap().sub, user.id);
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected() {
        let err = service()
            .register("Alice", "alice@example.com", "secret1", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let users = service();
        users.register("Alice", "alice@example.com", "secret1", "secret1").await.unwrap();
        let err = users
            .register("Alice 2", "alice@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let users = service();
        users.register("Alice", "alice@example.com", "secret1", "secret1").await.unwrap();

        let wrong = users.login("alice@example.com", "nope").await.unwrap_err();
        let unknown = users.login("bob@example.com", "secret1").await.unwrap_err();

        assert_eq!(wrong.to_string(), "invalid credentials");
        assert_eq!(unknown.to_string(), "invalid credentials");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let err = service().get_user(99).await.unwrap_err();
        assert!(matches!(err, AppError::Repo(RepoError::NotFound(_))));
    }
}
