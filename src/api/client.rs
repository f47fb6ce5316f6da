//
//  travis-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Travis CI API
//!
//! This module provides the transport every resource service goes through.
//! It resolves paths against the base URL, encodes option structs into query
//! strings, serializes bodies, manages headers and authentication, executes
//! requests and turns non-success responses into structured errors.
//!
//! ## Features
//!
//! - Relative path resolution against a configurable base URL
//! - Declarative query-string encoding ([`QueryOptions`])
//! - JSON request bodies (with a trailing newline) and JSON responses
//! - Raw and discarding response sinks for plain-text and empty bodies
//! - `Authorization: token ...` injection
//! - Cancellation through [`Context`]
//!
//! ## Request Lifecycle
//!
//! ```text
//! build_url(path, options) -> new_request(method, url, body, headers) -> execute(ctx, request, dest)
//! ```

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};
use url::Url;

use crate::api::common::{parse_error_body, ApiError, ErrorResponse, Response, Result};
use crate::api::context::Context;
use crate::api::query::{encode_query, QueryOptions};
use crate::config::{Config, API_COM_URL, API_ORG_URL};

/// Value of the `Travis-API-Version` header.
pub const API_VERSION: &str = "3";

const HEADER_CONTENT_TYPE: &str = "Content-Type";
const HEADER_USER_AGENT: &str = "User-Agent";
const HEADER_API_VERSION: &str = "Travis-API-Version";
const HEADER_HOST: &str = "Host";
const HEADER_AUTHORIZATION: &str = "Authorization";

const TOKEN_PREFIX: &str = "token ";

/// Placeholder body type for calls that send no body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Default `User-Agent` value, `travis-client/<version>`.
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

/// Receives the body of a successful response.
///
/// Three sinks are provided:
///
/// | Sink | Behaviour |
/// |------|-----------|
/// | `Option<T>` | JSON-decodes into `Some(T)`; an empty body leaves it untouched |
/// | `Vec<u8>` | Appends the raw bytes (for plain-text endpoints such as logs) |
/// | `()` | Discards the body |
pub trait Destination {
    /// Consumes the body of a 2xx response.
    fn receive(&mut self, body: &[u8]) -> std::result::Result<(), serde_json::Error>;
}

impl<T: DeserializeOwned> Destination for Option<T> {
    fn receive(&mut self, body: &[u8]) -> std::result::Result<(), serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        *self = Some(serde_json::from_slice(body)?);
        Ok(())
    }
}

impl Destination for Vec<u8> {
    fn receive(&mut self, body: &[u8]) -> std::result::Result<(), serde_json::Error> {
        self.extend_from_slice(body);
        Ok(())
    }
}

impl Destination for () {
    fn receive(&mut self, _body: &[u8]) -> std::result::Result<(), serde_json::Error> {
        Ok(())
    }
}

/// The shared transport for the Travis CI API.
///
/// Holds the base URL, the header mapping sent with every request and the
/// pooled [`reqwest::Client`]. Resource services borrow it; see
/// [`resources`](crate::api::resources).
///
/// # Creating a Client
///
/// ```rust,no_run
/// use travis_client::api::TravisClient;
///
/// // travis-ci.com, unauthenticated
/// let client = TravisClient::com(None)?;
///
/// // custom endpoint with a token
/// let client = TravisClient::new("https://travis.example.com/api/", Some("s3cr3t"))?;
/// assert!(client.is_authenticated());
/// # Ok::<(), travis_client::api::ApiError>(())
/// ```
///
/// # Authentication
///
/// Token changes need `&mut self`, so they cannot race with calls that are
/// borrowing the client.
///
/// ```rust
/// use travis_client::api::TravisClient;
///
/// let mut client = TravisClient::com(None)?;
/// assert!(!client.is_authenticated());
/// client.set_token("abc")?;
/// assert!(client.is_authenticated());
/// # Ok::<(), travis_client::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TravisClient {
    /// The underlying HTTP client
    http: Client,
    /// Absolute base URL, always ending with `/`
    base_url: Url,
    /// Headers sent with every request
    headers: HashMap<String, String>,
}

impl TravisClient {
    /// Creates a client for `base_url`, optionally authenticated with `token`.
    ///
    /// A missing trailing `/` is added to the base URL. An empty token is
    /// treated as no token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] when the base URL is not an
    /// absolute URL with a host, or [`ApiError::Network`] when the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let host = host_header(&base_url)?;

        let mut headers = HashMap::new();
        headers.insert(
            HEADER_CONTENT_TYPE.to_string(),
            "application/json".to_string(),
        );
        headers.insert(HEADER_USER_AGENT.to_string(), default_user_agent());
        headers.insert(HEADER_API_VERSION.to_string(), API_VERSION.to_string());
        headers.insert(HEADER_HOST.to_string(), host);

        let mut client = Self {
            http: Client::builder().build()?,
            base_url,
            headers,
        };

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            client.set_token(token)?;
        }

        Ok(client)
    }

    /// Creates a client for `https://api.travis-ci.com/`.
    pub fn com(token: Option<&str>) -> Result<Self> {
        Self::new(API_COM_URL, token)
    }

    /// Creates a client for the legacy `https://api.travis-ci.org/`.
    pub fn org(token: Option<&str>) -> Result<Self> {
        Self::new(API_ORG_URL, token)
    }

    /// Creates a client from a loaded [`Config`].
    ///
    /// The configured user agent and extra headers are layered over the
    /// defaults; the token, if any, is applied last.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(config.base_url(), None)?;

        if let Some(agent) = &config.user_agent {
            client.set_header(HEADER_USER_AGENT, agent);
        }
        for (key, value) in &config.headers {
            client.set_header(key, value);
        }
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            client.set_token(token)?;
        }

        Ok(client)
    }

    /// The base URL relative paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The headers sent with every request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Sets a header sent with every subsequent request.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key.to_string(), value.to_string());
    }

    /// Appends the query string for `options` to `path`.
    ///
    /// With `options == None` the path is returned unchanged. Fields are
    /// rendered by [`encode_query`]; an existing query on `path` is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] when `path` cannot be parsed as
    /// a URL reference.
    ///
    /// # Example
    ///
    /// ```rust
    /// use travis_client::api::TravisClient;
    /// use travis_client::api::resources::builds::BuildsOption;
    ///
    /// let client = TravisClient::com(None)?;
    /// let options = BuildsOption { limit: Some(5), ..Default::default() };
    ///
    /// assert_eq!(client.build_url("builds", None)?, "builds");
    /// assert_eq!(client.build_url("builds", Some(&options))?, "builds?limit=5");
    /// # Ok::<(), travis_client::api::ApiError>(())
    /// ```
    pub fn build_url(&self, path: &str, options: Option<&dyn QueryOptions>) -> Result<String> {
        let Some(options) = options else {
            return Ok(path.to_string());
        };

        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid path {:?}: {}", path, e)))?;

        let query = encode_query(options);
        if query.is_empty() {
            return Ok(path.to_string());
        }

        let separator = if path.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", path, separator, query))
    }

    /// Builds a request for `url`, resolved against the base URL.
    ///
    /// A present `body` is JSON-encoded and terminated with `\n`. The
    /// configured headers are applied first and `extra_headers` override
    /// them key by key (case-insensitively).
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] for an unresolvable URL or an invalid
    ///   header
    /// - [`ApiError::Encoding`] when the body cannot be serialized
    pub fn new_request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let target = self
            .base_url
            .join(url)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid URL {:?}: {}", url, e)))?;

        let mut header_map = HeaderMap::new();
        for (key, value) in self.headers.iter().chain(extra_headers.into_iter().flatten()) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ApiError::InvalidArgument(format!("invalid header {:?}: {}", key, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ApiError::InvalidArgument(format!("invalid value for header {:?}: {}", key, e))
            })?;
            header_map.insert(name, value);
        }

        let mut builder = self.http.request(method, target).headers(header_map);

        if let Some(body) = body {
            let mut bytes = serde_json::to_vec(body).map_err(ApiError::Encoding)?;
            bytes.push(b'\n');
            builder = builder.body(bytes);
        }

        builder
            .build()
            .map_err(|e| ApiError::InvalidArgument(e.to_string()))
    }

    /// Sends `request` and hands a successful body to `destination`.
    ///
    /// - If `ctx` finishes first, or is already done when the transport
    ///   fails, the result is [`ApiError::Cancelled`].
    /// - A non-2xx status never touches `destination` and yields
    ///   [`ApiError::Status`] with the server message.
    /// - A 2xx body that the destination cannot decode yields
    ///   [`ApiError::Decode`].
    ///
    /// The body is always read to completion and released before returning.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use reqwest::Method;
    /// use travis_client::api::{Context, TravisClient};
    /// use travis_client::api::resources::builds::Build;
    ///
    /// # async fn example() -> travis_client::api::common::Result<()> {
    /// let client = TravisClient::com(Some("token"))?;
    /// let request = client.new_request(Method::GET, "build/1", None::<&()>, None)?;
    ///
    /// let mut build: Option<Build> = None;
    /// let response = client.execute(&Context::background(), request, &mut build).await?;
    /// println!("{} -> {:?}", response.status, build.and_then(|b| b.state));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<D>(
        &self,
        ctx: &Context,
        request: Request,
        destination: &mut D,
    ) -> Result<Response>
    where
        D: Destination + ?Sized,
    {
        if let Some(reason) = ctx.reason() {
            return Err(ApiError::Cancelled(reason));
        }

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let exchange = async {
            let response = self.http.execute(request).await?;
            let meta = Response::from_reqwest(&response);
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((meta, body))
        };

        let outcome = tokio::select! {
            biased;
            reason = ctx.done() => return Err(ApiError::Cancelled(reason)),
            outcome = exchange => outcome,
        };

        let (meta, body) = match outcome {
            Ok(exchanged) => exchanged,
            Err(err) => {
                if let Some(reason) = ctx.reason() {
                    return Err(ApiError::Cancelled(reason));
                }
                return Err(ApiError::Network(err));
            }
        };

        debug!(%method, %url, status = meta.status.as_u16(), "received response");

        if !meta.status.is_success() {
            let (error_type, message) = parse_error_body(&body);
            warn!(%method, %url, status = meta.status.as_u16(), %message, "API error");
            return Err(ApiError::Status(Box::new(ErrorResponse {
                method,
                url,
                status: meta.status,
                error_type,
                message,
                response: meta,
            })));
        }

        trace!(bytes = body.len(), "response body");

        if let Err(source) = destination.receive(&body) {
            return Err(ApiError::Decode {
                url,
                source,
                response: Box::new(meta),
            });
        }

        Ok(meta)
    }

    /// Sets the API token used for every subsequent request.
    ///
    /// The header becomes `Authorization: token <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] for an empty token; the headers are left
    /// unchanged in that case.
    pub fn set_token(&mut self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(ApiError::Auth("token must not be empty".to_string()));
        }
        self.headers.insert(
            HEADER_AUTHORIZATION.to_string(),
            format!("{}{}", TOKEN_PREFIX, token),
        );
        Ok(())
    }

    /// Whether an `Authorization` header with a non-empty token is set.
    pub fn is_authenticated(&self) -> bool {
        self.headers
            .get(HEADER_AUTHORIZATION)
            .map(|value| value.strip_prefix(TOKEN_PREFIX.trim_end()).unwrap_or(value).trim())
            .is_some_and(|token| !token.is_empty())
    }

    /// Sends a request and decodes the JSON body into `T`.
    pub(crate) async fn fetch<T, B>(
        &self,
        ctx: &Context,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(T, Response)>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, url, body, None)?;
        let mut slot: Option<T> = None;
        let response = self.execute(ctx, request, &mut slot).await?;

        match slot {
            Some(value) => Ok((value, response)),
            // 2xx with an empty body where a value was expected
            None => match serde_json::from_slice::<T>(&[]) {
                Ok(value) => Ok((value, response)),
                Err(source) => Err(ApiError::Decode {
                    url: response.url.clone(),
                    source,
                    response: Box::new(response),
                }),
            },
        }
    }

    /// Sends a request and ignores the response body.
    pub(crate) async fn send_discarding<B>(
        &self,
        ctx: &Context,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, url, body, None)?;
        self.execute(ctx, request, &mut ()).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ApiError::InvalidArgument(format!("invalid base URL {:?}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidArgument(format!(
            "base URL {:?} cannot be used as a base",
            raw
        )));
    }
    Ok(url)
}

fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::InvalidArgument(format!("base URL {} has no host", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
