//
//  travis-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Travis CI client
//!
//! This module provides the types shared by the transport core and every
//! resource service: the error type, the response metadata handed back with
//! every call, the hypermedia metadata embedded in v3 payloads, and the
//! repository reference accepted by repo-scoped endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorResponse`] - Structured non-2xx response (method, URL, status, message)
//! - [`Response`] - Raw HTTP response metadata returned alongside values
//! - [`Metadata`] - The `@type` / `@href` / `@permissions` envelope
//! - [`RepoRef`] - Numeric id or `owner/name` slug
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use travis_client::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(ApiError::Status(resp)) => format!("server said {}", resp.status),
//!         Err(e) => format!("failed: {}", e),
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::api::context::CancelReason;

mod pagination;

pub use pagination::*;

/// Result alias used throughout the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Travis CI API operations.
///
/// # Variants
///
/// | Variant | Trigger | Retry? |
/// |---------|---------|--------|
/// | `InvalidArgument` | malformed path, query option or header | no |
/// | `Encoding` | request body could not be serialized | no |
/// | `Network` | DNS, connect, TLS, transport failure | caller may back off |
/// | `Cancelled` | the caller's [`Context`](crate::api::Context) is done | no |
/// | `Status` | non-2xx HTTP response | depends on status |
/// | `Decode` | 2xx body is not valid JSON for the destination | no |
/// | `Auth` | empty or unusable token | no |
///
/// The library never retries on its own; [`is_retryable`](Self::is_retryable)
/// is only a hint for callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A relative path, query option or header could not be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The call was abandoned because its context was cancelled or expired.
    #[error("Request cancelled: {0}")]
    Cancelled(CancelReason),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Status(Box<ErrorResponse>),

    /// A 2xx body could not be decoded into the requested type.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// The URL the body came from.
        url: Url,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Metadata of the response whose body failed to decode.
        response: Box<Response>,
    },

    /// Authentication could not be established.
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl ApiError {
    /// Returns the HTTP status code when the error carries a response.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns the raw response metadata, if the error happened after a
    /// response was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status(err) => Some(&err.response),
            Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Whether retrying the same call could reasonably succeed.
    ///
    /// Network failures, 429 and 5xx responses are considered retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(err) => {
                err.status == StatusCode::TOO_MANY_REQUESTS || err.status.is_server_error()
            }
            _ => false,
        }
    }
}

/// A non-2xx response from the Travis CI API.
///
/// The message is extracted from the JSON body when the body looks like
/// `{"error": "..."}` or the v3 `{"error_type": "...", "error_message": "..."}`
/// shape, and is empty otherwise.
///
/// Displays as `"{METHOD} {url}: {status} {message}"`.
#[derive(Debug)]
pub struct ErrorResponse {
    /// HTTP method of the failed request.
    pub method: Method,
    /// Fully resolved URL of the failed request.
    pub url: Url,
    /// Status code returned by the server.
    pub status: StatusCode,
    /// v3 error type (e.g. `not_found`), when provided.
    pub error_type: Option<String>,
    /// Server-provided message, empty when none could be parsed.
    pub message: String,
    /// Raw response metadata.
    pub response: Response,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.method,
            self.url,
            self.status.as_u16(),
            self.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Extracts `(error_type, message)` from an error body.
///
/// Returns an empty message when the body is not JSON or has no known
/// message field.
pub(crate) fn parse_error_body(body: &[u8]) -> (Option<String>, String) {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => {
            let message = parsed
                .error
                .or(parsed.error_message)
                .unwrap_or_default();
            (parsed.error_type, message)
        }
        Err(_) => (None, String::new()),
    }
}

/// Raw HTTP response metadata returned with every call.
///
/// The body has already been consumed by the time callers see this value.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code of the response.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL of the response.
    pub url: Url,
}

impl Response {
    pub(crate) fn from_reqwest(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// Hypermedia metadata attached to Travis CI API v3 resources.
///
/// Flattened into every DTO so the `@`-prefixed keys sit next to the
/// resource fields, exactly as the API sends them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Resource type, e.g. `build`.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Canonical API path of the resource.
    #[serde(rename = "@href", default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// `standard` or `minimal`.
    #[serde(
        rename = "@representation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub representation: Option<String>,

    /// Actions the authenticated user may perform on the resource.
    #[serde(rename = "@permissions", default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<HashMap<String, bool>>,
}

/// Identifies a repository in repo-scoped endpoints.
///
/// The API accepts either the numeric id or the `owner/name` slug as the
/// same path parameter. Slugs are percent-encoded as a single segment, so
/// `travis-ci/travis-web` becomes `travis-ci%2Ftravis-web`.
///
/// # Example
///
/// ```rust
/// use travis_client::api::common::RepoRef;
///
/// assert_eq!(RepoRef::from(42u64).path_segment(), "42");
/// assert_eq!(RepoRef::from("octo/cat").path_segment(), "octo%2Fcat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoRef {
    /// Numeric repository id.
    Id(u64),
    /// `owner/name` slug.
    Slug(String),
}

impl RepoRef {
    /// Picks a reference from an optional id and an optional slug.
    ///
    /// The numeric id wins when both are given.
    pub fn from_parts(id: Option<u64>, slug: Option<&str>) -> Result<Self> {
        match (id, slug) {
            (Some(id), _) => Ok(Self::Id(id)),
            (None, Some(slug)) if !slug.is_empty() => Ok(Self::Slug(slug.to_string())),
            _ => Err(ApiError::InvalidArgument(
                "either a repository id or a slug is required".to_string(),
            )),
        }
    }

    /// Returns the escaped path segment for this reference.
    pub fn path_segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Slug(slug) => escape_segment(slug),
        }
    }
}

impl From<u64> for RepoRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RepoRef {
    fn from(slug: &str) -> Self {
        Self::Slug(slug.to_string())
    }
}

impl From<String> for RepoRef {
    fn from(slug: String) -> Self {
        Self::Slug(slug)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Escapes a value for use as a single URL path segment.
pub(crate) fn escape_segment(value: &str) -> String {
    // form encoding turns spaces into `+`, which a path would keep literally
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
