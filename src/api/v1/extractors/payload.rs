//! Request payload extractors whose rejections stay inside the error
//! envelope.
//!
//! axum's stock `Json` and `Path` reject with plain-text bodies; these
//! wrappers convert the rejection into `AppError` so a malformed body or
//! path segment renders the same `{"success": false, ...}` shape as every
//! other failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in for `axum::Json`, usable in both argument and return position.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(from_json_rejection(rejection)),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

// A body that parsed as JSON but does not fit the target type is semantic
// (422); everything else (syntax, content type, read failure) is 400.
fn from_json_rejection(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
        AppError::unprocessable(rejection.body_text())
    } else {
        AppError::bad_request(rejection.body_text())
    }
}

/// Drop-in for `axum::extract::Path` with the same envelope guarantee.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}
