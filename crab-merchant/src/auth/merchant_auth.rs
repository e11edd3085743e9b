//! Merchant JWT authentication
//!
//! Tokens are issued upstream by the account service. This middleware only
//! verifies them and exposes the caller's identity to handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for merchant API callers
#[derive(Debug, Serialize, Deserialize)]
pub struct MerchantClaims {
    /// User ID
    pub sub: String,
    /// Merchant the user acts for; absent for users without a merchant
    #[serde(default)]
    pub merchant_id: Option<i64>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    #[serde(default)]
    pub iat: usize,
}

/// Authenticated caller extracted from JWT
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
    pub merchant_id: Option<i64>,
}

/// Verify a bearer token and return the caller it identifies
pub fn verify_token(token: &str, secret: &str) -> Result<Caller, AppError> {
    let token_data = jsonwebtoken::decode::<MerchantClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    Ok(Caller {
        user_id: token_data.claims.sub,
        merchant_id: token_data.claims.merchant_id,
    })
}

/// Middleware that extracts and verifies the merchant JWT from the Authorization header
pub async fn merchant_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format").into_response())?;

    let caller = verify_token(token, &state.jwt_secret).map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use shared::error::ErrorCode;

    const SECRET: &str = "test-secret";

    fn sign(merchant_id: Option<i64>, expires_in: i64, secret: &str) -> String {
        let now = chrono::Utc::now();
        let claims = MerchantClaims {
            sub: "user-1".into(),
            merchant_id,
            exp: (now + chrono::Duration::seconds(expires_in)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_token_reads_merchant() {
        let caller = verify_token(&sign(Some(42), 3600, SECRET), SECRET).unwrap();
        assert_eq!(caller.user_id, "user-1");
        assert_eq!(caller.merchant_id, Some(42));

        let caller = verify_token(&sign(None, 3600, SECRET), SECRET).unwrap();
        assert_eq!(caller.merchant_id, None);
    }

    #[test]
    fn test_verify_token_rejects_bad_signature() {
        let err = verify_token(&sign(Some(1), 3600, "other"), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        // Beyond the default 60s leeway
        let err = verify_token(&sign(Some(1), -600, SECRET), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }
}
