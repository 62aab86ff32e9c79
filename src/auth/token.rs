use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Identity claims embedded in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        let cfg = &state.config.token;
        Self::new(&cfg.secret, cfg.ttl_minutes)
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: (now + self.ttl).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token signed");
        Ok(token)
    }

    /// Verifies signature and expiry with zero leeway, so the validity
    /// window is exactly the configured TTL.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;
        debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}

/// Authentication gate for protected routes: the `token` cookie must be
/// present and hold a valid, unexpired token. Absence is 401; a failed
/// verification is 400.
#[derive(Debug)]
pub struct SessionUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(TOKEN_COOKIE).ok_or_else(|| {
            warn!("missing token cookie");
            AppError::Unauthorized
        })?;
        let claims = TokenKeys::from_ref(state).verify(cookie.value())?;
        Ok(SessionUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", 60)
    }

    #[test]
    fn sign_then_verify_returns_the_identity_claims() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "ana@x.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verify_rejects_an_expired_token() {
        // Negative TTL puts exp in the past at signing time.
        let stale = TokenKeys::new("test-secret", -2);
        let token = stale.sign(Uuid::new_v4(), "ana@x.com").expect("sign");
        assert!(matches!(keys().verify(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn verify_rejects_a_tampered_token() {
        let token = keys().sign(Uuid::new_v4(), "ana@x.com").expect("sign");
        let mut tampered = token;
        tampered.push('x');
        assert!(matches!(
            keys().verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn verify_rejects_a_token_signed_with_another_secret() {
        let other = TokenKeys::new("other-secret", 60);
        let token = other.sign(Uuid::new_v4(), "ana@x.com").expect("sign");
        assert!(matches!(keys().verify(&token), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn gate_rejects_a_request_without_the_cookie() {
        let state = AppState::fake();
        let req = Request::builder().uri("/raquetas/nueva").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn gate_rejects_a_garbage_token() {
        let state = AppState::fake();
        let req = Request::builder()
            .uri("/raquetas/nueva")
            .header("cookie", "token=not-a-jwt")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn gate_accepts_a_valid_cookie() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        let token = TokenKeys::from_ref(&state)
            .sign(user_id, "ana@x.com")
            .expect("sign");
        let req = Request::builder()
            .uri("/raquetas/nueva")
            .header("cookie", format!("token={token}"))
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let SessionUser(claims) = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect("gate passes");
        assert_eq!(claims.sub, user_id);
    }
}
