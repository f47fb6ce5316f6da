//
//  travis-client
//  api/resources/authentication.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication
//!
//! Travis CI authenticates API calls with `Authorization: token <token>`.
//! A token is obtained in one of two ways:
//!
//! - **Travis token**: copied from the Travis CI profile page and set
//!   directly with [`AuthenticationService::using_travis_token`].
//! - **GitHub token**: a GitHub personal access token exchanged for a
//!   Travis token through `POST auth/github` with
//!   [`AuthenticationService::using_github_token`].
//!
//! Both leave the client authenticated for every later request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use travis_client::api::{Context, TravisClient};
//!
//! # async fn example() -> travis_client::api::common::Result<()> {
//! let mut client = TravisClient::org(None)?;
//! let ctx = Context::background();
//!
//! let (token, _) = client
//!     .authentication()
//!     .using_github_token(&ctx, "ghp_example")
//!     .await?;
//!
//! assert!(client.is_authenticated());
//! println!("travis token: {}", token.access_token);
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::client::TravisClient;
use crate::api::common::{ApiError, Response, Result};
use crate::api::context::Context;

/// Travis token returned by the GitHub token exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Serialize)]
struct GithubTokenBody<'a> {
    github_token: &'a str,
}

/// Authenticates a client. Obtain one with
/// [`TravisClient::authentication`].
///
/// Holds the client mutably, since authenticating rewrites its headers.
#[derive(Debug)]
pub struct AuthenticationService<'a> {
    client: &'a mut TravisClient,
}

impl TravisClient {
    /// The authentication service.
    pub fn authentication(&mut self) -> AuthenticationService<'_> {
        AuthenticationService { client: self }
    }
}

impl AuthenticationService<'_> {
    /// Exchanges a GitHub token for a Travis token and installs it.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Auth`] for an empty GitHub token (no request is sent)
    ///   or an empty access token in the answer
    /// - any transport error from the exchange; the client stays
    ///   unauthenticated in that case
    pub async fn using_github_token(
        &mut self,
        ctx: &Context,
        github_token: &str,
    ) -> Result<(AccessToken, Response)> {
        if github_token.is_empty() {
            return Err(ApiError::Auth("GitHub token must not be empty".to_string()));
        }

        let body = GithubTokenBody { github_token };
        let (token, response): (AccessToken, _) = self
            .client
            .fetch(ctx, Method::POST, "auth/github", Some(&body))
            .await?;

        self.client.set_token(&token.access_token)?;
        debug!("authenticated with GitHub token exchange");
        Ok((token, response))
    }

    /// Installs a Travis token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] for an empty token.
    pub fn using_travis_token(&mut self, token: &str) -> Result<()> {
        self.client.set_token(token)
    }
}
