use axum::http::HeaderMap;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};

use super::claims::Claims;
use super::error::AuthError;
use super::extract;
use super::jwks::JwksCache;

/// Verifies bearer credentials against the JWKS cache and enforces the
/// configured issuer / audience / algorithm policy.
///
/// Owns the key cache: constructed once at startup and shared behind an
/// `Arc`, so tests can build one around a preloaded cache with no network.
pub struct Authenticator {
    jwks: JwksCache,
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    leeway_seconds: u64,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("jwks", &self.jwks)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithms", &self.algorithms)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl Authenticator {
    pub fn new(
        jwks: JwksCache,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        algorithms: Vec<Algorithm>,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            jwks,
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms,
            leeway_seconds,
        }
    }

    /// The composed "authorize this call" primitive: extract the credential,
    /// verify it, then check the required permission.
    ///
    /// On success the caller gets the full claim set back; handlers may need
    /// more than the permission that let them run (subject identity, for one).
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<Claims, AuthError> {
        let token = extract::bearer_token(headers)?;
        let claims = self.verify(token).await?;
        claims.require_permission(permission)?;
        Ok(claims)
    }

    /// Signature verification plus standard-claim validation.
    ///
    /// May fetch the key set once if the token names a kid the cache has not
    /// seen (key rotation). Nothing is retried beyond that.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;
        let key = self.jwks.key_for(&kid).await?;

        let data = decode::<Claims>(token, &key, &self.validation()).map_err(map_jwt_error)?;
        Ok(data.claims)
    }

    fn validation(&self) -> Validation {
        let default = self.algorithms.first().copied().unwrap_or(Algorithm::RS256);
        let mut validation = Validation::new(default);
        validation.algorithms = self.algorithms.clone();
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.leeway = self.leeway_seconds;
        validation
    }
}

/// Collapse `jsonwebtoken` failures into the fixed taxonomy. The raw error
/// can name key formats and encoding details; clients only ever see the
/// category.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::ImmatureSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        _ => AuthError::MalformedToken,
    }
}
