//! Bearer-token authorization pipeline.
//!
//! extract (header framing) → verify (signature + standard claims against the
//! JWKS cache) → permission check. Any failure short-circuits before the
//! handler runs; `Authenticator::authorize` is the composed entry point.

pub mod claims;
pub mod error;
pub mod extract;
pub mod jwks;
pub mod verify;

pub use claims::Claims;
pub use error::AuthError;
pub use jwks::JwksCache;
pub use verify::Authenticator;
