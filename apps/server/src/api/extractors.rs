//! Custom Axum extractors.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::Error;

/// JSON body extractor whose failures use the service's error envelope.
///
/// An empty body decodes as `{}`, so payloads whose fields are all optional (search
/// criteria, profile updates) accept a bare POST/PUT.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Keeps the 413 from the body limit intact.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        decode_json(&bytes)
            .map(ApiJson)
            .map_err(IntoResponse::into_response)
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> crate::Result<T> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };

    serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("Invalid JSON in request body: {}", e)))
}
