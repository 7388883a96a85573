//! User model and authentication claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered account
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 hash, never exposed in responses
    #[serde(skip_serializing)]
    pub password: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, embedded in order responses
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Registration request body.
///
/// Required fields are optional here so that missing input surfaces as a
/// 400 from the service rather than a deserialization rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub username: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user with the given expiration window
    pub fn new(user_id: Uuid, email: &str, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + (expiration_hours as i64 * 3600),
        }
    }

    /// Create a signed JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token; fails on bad signature, expiry or malformed input
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "reader@example.com", 24);
        let token = claims.create_token(SECRET).unwrap();

        let decoded = Claims::from_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.email, "reader@example.com");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "reader@example.com", 24);
        let token = claims.create_token(SECRET).unwrap();

        assert!(Claims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), "reader@example.com", 24);
        claims.iat -= 7200;
        claims.exp = claims.iat + 3600;
        let token = claims.create_token(SECRET).unwrap();

        assert!(Claims::from_token(&token, SECRET).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(Claims::from_token("not-a-token", SECRET).is_err());
    }
}
