use serde::Deserialize;

use super::error::AuthError;

/// Decoded access-token payload.
///
/// NOTE:
/// - `aud` can be either a string or an array of strings; it is kept as a raw
///   value and audience checking is left to `jsonwebtoken::Validation`.
/// - `permissions` stays optional so that a token issued without permission
///   scoping at all is distinguishable from one that merely lacks a specific
///   permission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    #[serde(default)]
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Enforce that this token carries `required`.
    ///
    /// `ClaimsMalformed` means the token has no permission list at all (an
    /// issuer configuration problem); `PermissionDenied` means the list is
    /// present but does not contain `required`. Callers debugging an
    /// authorization setup need to tell these apart.
    pub fn require_permission(&self, required: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::ClaimsMalformed)?;

        if permissions.iter().any(|p| p == required) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied)
        }
    }
}
