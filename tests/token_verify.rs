//! Verifier-level tests: signature handling, key-set behavior, and the
//! mapping of `jsonwebtoken` failures onto the fixed error taxonomy.

mod common;

use coffeeshop_api::services::auth::{AuthError, Authenticator};
use jsonwebtoken::Algorithm;
use serde_json::json;

use common::{
    AUDIENCE, ISSUER, TEST_KID, authenticator, base_claims, jwk_set, jwks_cache, sign, sign_with,
};

#[tokio::test]
async fn decoded_claims_round_trip() {
    let claims = base_claims(Some(vec!["get:drinks-detail", "post:drinks"]));
    let token = sign(&claims);

    let decoded = authenticator().verify(&token).await.unwrap();

    assert_eq!(decoded.iss, ISSUER);
    assert_eq!(decoded.aud, json!(AUDIENCE));
    assert_eq!(decoded.sub, "auth0|barista");
    assert_eq!(decoded.exp, claims["exp"].as_u64().unwrap());
    assert_eq!(
        decoded.permissions,
        Some(vec!["get:drinks-detail".into(), "post:drinks".into()])
    );
}

#[tokio::test]
async fn token_without_kid_is_malformed() {
    let token = sign_with(
        &base_claims(Some(vec!["get:drinks-detail"])),
        None,
        Algorithm::RS256,
    );

    assert_eq!(
        authenticator().verify(&token).await,
        Err(AuthError::MalformedToken)
    );
}

#[tokio::test]
async fn unknown_kid_fails_after_fetch_attempt() {
    let token = sign_with(
        &base_claims(Some(vec!["get:drinks-detail"])),
        Some("rotated-away"),
        Algorithm::RS256,
    );

    // The cache misses, the fetch to the unroutable endpoint fails fast, and
    // the transport error is reported as UnknownKey.
    assert_eq!(
        authenticator().verify(&token).await,
        Err(AuthError::UnknownKey)
    );
}

#[tokio::test]
async fn tampered_signature_is_invalid() {
    let token = sign(&base_claims(Some(vec!["get:drinks-detail"])));

    // Flip one character inside the signature segment.
    let (rest, signature) = token.rsplit_once('.').unwrap();
    let mut signature: Vec<char> = signature.chars().collect();
    signature[0] = if signature[0] == 'A' { 'B' } else { 'A' };
    let tampered: String = signature.into_iter().collect();
    let tampered = format!("{rest}.{tampered}");

    assert_eq!(
        authenticator().verify(&tampered).await,
        Err(AuthError::InvalidSignature)
    );
}

#[tokio::test]
async fn disallowed_algorithm_is_invalid() {
    // Same key, but signed with an algorithm outside the allow-list.
    let token = sign_with(
        &base_claims(Some(vec!["get:drinks-detail"])),
        Some(TEST_KID),
        Algorithm::RS384,
    );

    assert_eq!(
        authenticator().verify(&token).await,
        Err(AuthError::InvalidSignature)
    );
}

#[tokio::test]
async fn wrong_issuer_and_audience_are_invalid_claims() {
    let mut claims = base_claims(Some(vec!["get:drinks-detail"]));
    claims["iss"] = json!("https://somewhere-else.test/");
    assert_eq!(
        authenticator().verify(&sign(&claims)).await,
        Err(AuthError::InvalidClaims)
    );

    let mut claims = base_claims(Some(vec!["get:drinks-detail"]));
    claims["aud"] = json!("other-api");
    assert_eq!(
        authenticator().verify(&sign(&claims)).await,
        Err(AuthError::InvalidClaims)
    );
}

#[tokio::test]
async fn audience_may_be_a_list_containing_the_expected_value() {
    let mut claims = base_claims(Some(vec!["get:drinks-detail"]));
    claims["aud"] = json!([AUDIENCE, "userinfo"]);

    let decoded = authenticator().verify(&sign(&claims)).await.unwrap();
    assert_eq!(decoded.aud, json!([AUDIENCE, "userinfo"]));
}

#[tokio::test]
async fn installing_a_key_set_replaces_it_wholesale() {
    let cache = jwks_cache();
    let auth = Authenticator::new(cache, ISSUER, AUDIENCE, vec![Algorithm::RS256], 0);

    let token = sign(&base_claims(Some(vec!["get:drinks-detail"])));
    assert!(auth.verify(&token).await.is_ok());

    // Rotation: the published set now only carries a new kid. The old key
    // must be gone, not merged.
    // (Re-create the cache since the authenticator owns the old one.)
    let cache = jwks_cache();
    cache.install(&jwk_set("test-key-2"));
    let auth = Authenticator::new(cache, ISSUER, AUDIENCE, vec![Algorithm::RS256], 0);

    assert_eq!(auth.verify(&token).await, Err(AuthError::UnknownKey));

    let rotated = sign_with(
        &base_claims(Some(vec!["get:drinks-detail"])),
        Some("test-key-2"),
        Algorithm::RS256,
    );
    assert!(auth.verify(&rotated).await.is_ok());
}
