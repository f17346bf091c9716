//! Authentication middleware
//!
//! JWT authentication for the single-operator admin area

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::AppState;

/// Authenticated admin information extracted from JWT
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub subject: String,
    pub email: String,
}

/// Authentication middleware that validates JWT tokens.
///
/// Tokens are verified against the same configured secret the login
/// endpoint signs with, so a file-configured secret works without any
/// environment fallback.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match decode_jwt(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(error) => {
            tracing::debug!("Token rejected: {}", error);
            return crate::error::AppError::InvalidToken.into_response();
        }
    };

    let admin = AdminUser {
        subject: claims.sub,
        email: claims.email,
    };

    request.extensions_mut().insert(admin);

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_ar: "غير مصرح بالدخول".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for the authenticated admin
/// Use this in handlers that need the logged-in identity
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub AdminUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_ar: "يجب تسجيل الدخول أولاً".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            email: "admin@axis.example".to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_token_verifies_with_signing_secret() {
        let token = token_for("configured-secret");
        let claims = decode_jwt(&token, "configured-secret").unwrap();
        assert_eq!(claims.email, "admin@axis.example");
    }

    #[test]
    fn test_token_rejected_with_different_secret() {
        let token = token_for("configured-secret");
        assert!(decode_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            email: "admin@axis.example".to_string(),
            exp: now - 600,
            iat: now - 4200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"configured-secret"),
        )
        .unwrap();
        assert!(decode_jwt(&token, "configured-secret").is_err());
    }
}
