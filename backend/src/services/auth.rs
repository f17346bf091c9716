//! Authentication service for the single admin account
//!
//! The platform has exactly one operator. Credentials live in configuration
//! (email plus a bcrypt hash), so login never touches the database.

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    admin_email: String,
    admin_password_hash: String,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for admin login
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &Config) -> Self {
        Self {
            admin_email: config.admin.email.clone(),
            admin_password_hash: config.admin.password_hash.clone(),
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Authenticate the admin and issue an access token
    pub fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        if !input.email.eq_ignore_ascii_case(&self.admin_email) {
            return Err(AppError::InvalidCredentials);
        }

        let valid = verify(&input.password, &self.admin_password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.generate_token()?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Generate a signed JWT for the admin
    fn generate_token(&self) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: "admin".to_string(),
            email: self.admin_email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::{hash, DEFAULT_COST};

    fn service_with_password(password: &str) -> AuthService {
        AuthService {
            admin_email: "admin@axis.example".to_string(),
            admin_password_hash: hash(password, DEFAULT_COST).unwrap(),
            jwt_secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn login_succeeds_with_correct_credentials() {
        let service = service_with_password("hunter2!");
        let response = service
            .login(LoginInput {
                email: "admin@axis.example".to_string(),
                password: "hunter2!".to_string(),
            })
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert!(!response.access_token.is_empty());
    }

    #[test]
    fn login_is_case_insensitive_on_email() {
        let service = service_with_password("hunter2!");
        let result = service.login(LoginInput {
            email: "ADMIN@Axis.Example".to_string(),
            password: "hunter2!".to_string(),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn login_rejects_wrong_password() {
        let service = service_with_password("hunter2!");
        let result = service.login(LoginInput {
            email: "admin@axis.example".to_string(),
            password: "wrong".to_string(),
        });
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn login_rejects_unknown_email() {
        let service = service_with_password("hunter2!");
        let result = service.login(LoginInput {
            email: "someone@else.example".to_string(),
            password: "hunter2!".to_string(),
        });
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
