//
//  travis-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Travis CI Client Library
//!
//! An asynchronous client for the Travis CI REST API v3.
//!
//! ## Overview
//!
//! The library is built around a single transport, [`TravisClient`], which
//! resolves resource paths against a base URL, attaches the API headers and
//! the access token, executes requests and turns error answers into
//! structured [`ApiError`] values. Resource services (builds, jobs,
//! repositories, ...) borrow the client and expose one method per endpoint.
//!
//! ## Features
//!
//! - **travis-ci.com, travis-ci.org and Enterprise**: any base URL
//! - **Typed resources**: every field optional, hypermedia metadata kept
//! - **Declarative query options**: filters, sorting, includes, pagination
//! - **Cancellation**: every call takes a [`Context`] with cancel and
//!   deadline support
//! - **Configuration file**: base URL, token and headers from
//!   `config.toml` and the environment
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, resources and shared types
//! - [`config`]: Configuration file and environment overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use travis_client::{Config, Context, TravisClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?.apply_env();
//!
//! let client = TravisClient::from_config(&config)?;
//! let (user, _) = client.user().current(&Context::background()).await?;
//! println!("Logged in as {}", user.login.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are reported through [`tracing`] at `debug` and
//! `trace` level, API error statuses at `warn`. Install any subscriber to
//! see them.

/// API client for Travis CI.
///
/// Holds the transport core, the cancellation context, query encoding and
/// the resource services.
pub mod api;

/// Configuration file management.
///
/// Stores the client configuration in platform-specific locations:
/// - Linux: `~/.config/travis-client/config.toml`
/// - macOS: `~/Library/Application Support/travis-client/config.toml`
/// - Windows: `%APPDATA%\travis-client\config\config.toml`
pub mod config;

pub use api::{ApiError, CancelHandle, CancelReason, Context, RepoRef, TravisClient};

/// Re-export of the configuration struct.
pub use config::Config;

/// Library name, used in the default `User-Agent` and configuration paths.
pub const APP_NAME: &str = "travis-client";

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use travis_client::VERSION;
///
/// println!("travis-client {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
