//
//  travis-client
//  api/resources/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Users.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, Response, Result};
use crate::api::context::Context;

/// A Travis CI user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_migration: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether a GitHub sync is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_syncing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recently_signed_up: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_user_hash: Option<String>,
}

/// Calls the user endpoints. Obtain one with [`TravisClient::user`].
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The user service.
    pub fn user(&self) -> UserService<'_> {
        UserService { client: self }
    }
}

impl UserService<'_> {
    /// The user the token belongs to.
    pub async fn current(&self, ctx: &Context) -> Result<(User, Response)> {
        self.client.fetch(ctx, Method::GET, "user", NO_BODY).await
    }

    pub async fn find(&self, ctx: &Context, id: u64) -> Result<(User, Response)> {
        let url = format!("user/{}", id);
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Starts a sync of the user's repositories and organizations with
    /// GitHub.
    pub async fn sync(&self, ctx: &Context, id: u64) -> Result<(User, Response)> {
        let url = format!("user/{}/sync", id);
        self.client.fetch(ctx, Method::POST, &url, NO_BODY).await
    }
}
