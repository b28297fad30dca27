//! Snap store client.
//!
//! The store's responses are relayed to the caller unchanged; the gateway
//! only produces its own envelope when the store could not be reached.

use crate::error::ApiError;
use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use snapbridge_core::StoreConfig;

/// Body of `POST /store/register-name`.
#[derive(Clone, Debug, Deserialize)]
pub struct RegisterNameRequest {
    pub snap_name: String,
    pub macaroon: String,
}

#[derive(Serialize)]
struct RegisterNameBody<'a> {
    snap_name: &'a str,
}

/// A store response, relayed as-is.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

/// Client for the snap store API.
#[derive(Clone, Debug)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(config: &StoreConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Register a snap name with the store on behalf of the macaroon holder.
    pub async fn register_name(
        &self,
        snap_name: &str,
        macaroon: &str,
    ) -> Result<UpstreamResponse, ApiError> {
        let authorization = HeaderValue::from_str(&format!("Macaroon root=\"{macaroon}\""))
            .map_err(|_| ApiError::BadRequest("macaroon is not a valid header value".into()))?;

        let result = self
            .http
            .post(format!("{}/register-name/", self.base_url))
            .header(header::AUTHORIZATION, authorization)
            .json(&RegisterNameBody { snap_name })
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                crate::metrics::record_upstream("store", "register_name", None);
                return Err(ApiError::StoreUnavailable(e));
            }
        };

        let status = response.status();
        crate::metrics::record_upstream("store", "register_name", Some(status));
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(ApiError::StoreUnavailable)?;

        tracing::debug!(snap_name, status = status.as_u16(), "Store responded");

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
