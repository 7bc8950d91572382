use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the authorization pipeline.
///
/// Every variant carries a fixed, client-safe message. Unexpected errors on
/// the way (transport failures during the key fetch, undecodable key
/// material) are collapsed into the nearest variant so the boundary never
/// leaks internal diagnostics beyond this message set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,
    #[error("authorization header must be exactly 'Bearer <token>'")]
    MalformedHeader,
    #[error("authorization header must use the Bearer scheme")]
    UnsupportedScheme,
    #[error("unable to parse authentication token")]
    MalformedToken,
    #[error("unable to find an appropriate signing key")]
    UnknownKey,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    TokenExpired,
    #[error("incorrect claims, please check the audience and issuer")]
    InvalidClaims,
    #[error("permissions not included in token")]
    ClaimsMalformed,
    #[error("permission not found")]
    PermissionDenied,
}

impl AuthError {
    /// Stable machine-readable code, used as a log field and kept apart from
    /// the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader => "invalid_header",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::MalformedToken => "invalid_token",
            Self::UnknownKey => "unknown_key",
            Self::InvalidSignature => "invalid_signature",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::ClaimsMalformed => "invalid_permissions",
            Self::PermissionDenied => "permission_denied",
        }
    }

    /// Everything here is a client error: 403 for a missing permission,
    /// 401 for anything wrong with the credential itself.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
