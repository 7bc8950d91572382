//! Transport framing for the bearer credential.

use axum::http::{HeaderMap, header};

use super::error::AuthError;

/// Pull the raw credential out of the `Authorization` header.
///
/// This stage only validates framing: the header must be exactly two
/// space-separated parts and the scheme must be the literal `Bearer`
/// (case-sensitive). The token is returned verbatim, undecoded.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(AuthError::MalformedHeader),
    };

    if scheme != "Bearer" {
        return Err(AuthError::UnsupportedScheme);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn absent_header_is_missing() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn bare_scheme_is_malformed() {
        assert_eq!(
            bearer_token(&headers("Bearer")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn three_parts_are_malformed() {
        assert_eq!(
            bearer_token(&headers("Bearer a b")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn basic_scheme_is_unsupported() {
        assert_eq!(
            bearer_token(&headers("Basic abc123")),
            Err(AuthError::UnsupportedScheme)
        );
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            bearer_token(&headers("bearer abc")),
            Err(AuthError::UnsupportedScheme)
        );
    }

    #[test]
    fn token_is_returned_verbatim() {
        assert_eq!(
            bearer_token(&headers("Bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
    }
}
