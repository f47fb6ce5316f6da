//
//  travis-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Travis CI REST API v3.
//!
//! ## Supported Endpoints
//!
//! - **travis-ci.com**: `https://api.travis-ci.com/` ([`TravisClient::com`])
//! - **travis-ci.org**: `https://api.travis-ci.org/` ([`TravisClient::org`])
//! - **Enterprise**: any base URL ([`TravisClient::new`])
//!
//! ## Architecture
//!
//! - [`client`]: Transport core with URL building, headers, execution and
//!   error decoding
//! - [`query`]: Declarative query-string encoding for option structs
//! - [`context`]: Cancellation and deadlines for in-flight calls
//! - [`resources`]: Per-resource data structures and services
//! - [`common`]: Shared types (errors, response metadata, repository
//!   references, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use travis_client::api::{Context, TravisClient};
//! use travis_client::api::resources::builds::BuildsByRepoOption;
//!
//! # async fn example() -> travis_client::api::common::Result<()> {
//! let client = TravisClient::com(Some("your-token"))?;
//! let ctx = Context::background().with_timeout(Duration::from_secs(10));
//!
//! let options = BuildsByRepoOption {
//!     state: vec!["failed".to_string()],
//!     limit: Some(5),
//!     ..Default::default()
//! };
//! let (builds, _) = client.builds().list_by_repo(&ctx, "octo/cat", Some(&options)).await?;
//! for build in builds {
//!     println!("#{} {}", build.number.unwrap_or_default(), build.state.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`] on failure:
//!
//! - `InvalidArgument`: bad path, header or missing repository reference
//! - `Encoding`: request body could not be serialized
//! - `Network`: transport failure
//! - `Cancelled`: the [`Context`] was cancelled or its deadline passed
//! - `Status`: non-2xx answer with the server message
//! - `Decode`: 2xx answer with an unexpected body
//! - `Auth`: empty or unusable token

/// Transport core.
pub mod client;

/// Shared types: errors, response metadata, repository references and
/// pagination.
pub mod common;

/// Cancellation contexts.
pub mod context;

/// Query-string encoding.
pub mod query;

/// Travis CI resources and their services.
pub mod resources;

pub use client::{Destination, TravisClient};
pub use common::{ApiError, ErrorResponse, RepoRef, Response};
pub use context::{CancelHandle, CancelReason, Context};
