//! Authentication service: registration, login and token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Claims, LoginRequest, RegisterRequest, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account.
    ///
    /// The email uniqueness pre-check here is advisory; the unique
    /// constraint on users.email is the final authority and a race that
    /// slips past still comes back as a 409 through the error translator.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref())
        else {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        };
        request.validate()?;

        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let hash = self.hash_password(password)?;
        self.repository
            .users
            .create(email, &hash, request.username.as_deref())
            .await
    }

    /// Authenticate by email and password, returning a signed token and the user.
    ///
    /// An unknown email and a wrong password produce the same message so
    /// email existence is not leaked.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(String, User)> {
        let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref())
        else {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        };

        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok((token, user))
    }

    /// Fetch the profile behind a verified token; the account may have
    /// disappeared since the token was issued.
    pub async fn profile(&self, user_id: Uuid) -> AppResult<User> {
        self.repository
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Create a signed JWT for a user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        Claims::new(user.id, &user.email, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against the stored hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
        Argon2,
    };

    #[test]
    fn hash_verifies_only_the_original_password() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"correct horse", &salt)
            .unwrap()
            .to_string();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"correct horse", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"battery staple", &parsed)
            .is_err());
    }

    #[test]
    fn hashing_is_salted() {
        let argon2 = Argon2::default();
        let a = argon2
            .hash_password(b"same password", &SaltString::generate(&mut OsRng))
            .unwrap()
            .to_string();
        let b = argon2
            .hash_password(b"same password", &SaltString::generate(&mut OsRng))
            .unwrap()
            .to_string();
        assert_ne!(a, b);
    }
}
