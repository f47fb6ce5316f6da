//
//  travis-client
//  api/resources/env_vars.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository environment variables.
//!
//! Private variables come back without a `value`; only public ones are
//! readable after creation.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{escape_segment, Metadata, RepoRef, Response, Result};
use crate::api::context::Context;

/// An environment variable defined in repository settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvVar {
    #[serde(flatten)]
    pub metadata: Metadata,

    /// UUID of the variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Whether the value is shown in build logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Restricts the variable to one branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Payload for creating or updating an environment variable.
///
/// Unset fields are left out, so an update only touches what is given.
///
/// # Example
///
/// ```rust
/// use travis_client::api::resources::env_vars::EnvVarBody;
///
/// let body = EnvVarBody {
///     name: Some("TEST".to_string()),
///     value: Some("test".to_string()),
///     public: Some(false),
///     branch: None,
/// };
///
/// assert_eq!(
///     serde_json::to_string(&body).unwrap(),
///     r#"{"env_var.name":"TEST","env_var.value":"test","env_var.public":false}"#,
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvVarBody {
    #[serde(rename = "env_var.name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "env_var.value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "env_var.public", default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(rename = "env_var.branch", default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Deserialize)]
struct EnvVarsEnvelope {
    env_vars: Vec<EnvVar>,
}

/// Calls the env var endpoints. Obtain one with [`TravisClient::env_vars`].
#[derive(Debug, Clone, Copy)]
pub struct EnvVarsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The environment variables service.
    pub fn env_vars(&self) -> EnvVarsService<'_> {
        EnvVarsService { client: self }
    }
}

impl EnvVarsService<'_> {
    pub async fn find_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        id: &str,
    ) -> Result<(EnvVar, Response)> {
        let url = env_var_path(&repo.into(), id);
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Vec<EnvVar>, Response)> {
        let url = format!("repo/{}/env_vars", repo.into().path_segment());
        let (envelope, response): (EnvVarsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.env_vars, response))
    }

    pub async fn create_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        body: &EnvVarBody,
    ) -> Result<(EnvVar, Response)> {
        let url = format!("repo/{}/env_vars", repo.into().path_segment());
        self.client.fetch(ctx, Method::POST, &url, Some(body)).await
    }

    /// Updates the fields set in `body` (PATCH).
    pub async fn update_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        id: &str,
        body: &EnvVarBody,
    ) -> Result<(EnvVar, Response)> {
        let url = env_var_path(&repo.into(), id);
        self.client.fetch(ctx, Method::PATCH, &url, Some(body)).await
    }

    /// Deletes a variable. The API answers `204 No Content`.
    pub async fn delete_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        id: &str,
    ) -> Result<Response> {
        let url = env_var_path(&repo.into(), id);
        self.client
            .send_discarding(ctx, Method::DELETE, &url, NO_BODY)
            .await
    }
}

fn env_var_path(repo: &RepoRef, id: &str) -> String {
    format!("repo/{}/env_var/{}", repo.path_segment(), escape_segment(id))
}
