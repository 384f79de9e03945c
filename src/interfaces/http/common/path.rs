//! Path extractor whose rejection uses the standard error body
//!
//! `axum::extract::Path` answers a malformed segment (`/bookings/abc`) with a
//! plain-text 400. `PathParam<T>` turns that into a `validation_error`.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::DomainError;

pub struct PathParam<T>(pub T);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(DomainError::Validation(rejection.body_text()))
    }
}

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParam(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::Service;

    use crate::interfaces::http::common::ErrorBody;

    async fn handler(PathParam(id): PathParam<i32>) -> String {
        id.to_string()
    }

    async fn get_path(uri: &str) -> axum::http::Response<Body> {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        Router::new()
            .route("/items/{id}", get(handler))
            .into_service()
            .call(req)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn numeric_segment_is_extracted() {
        let resp = get_path("/items/42").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"42");
    }

    #[tokio::test]
    async fn malformed_segment_gets_json_error_body() {
        for uri in ["/items/abc", "/items/99999999999"] {
            let resp = get_path(uri).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                resp.headers().get(header::CONTENT_TYPE).unwrap(),
                "application/json"
            );
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body.error, "validation_error");
        }
    }
}
