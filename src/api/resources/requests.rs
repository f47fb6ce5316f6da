//
//  travis-client
//  api/resources/requests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build requests.
//!
//! A request is what Travis CI receives before deciding whether to create
//! builds: a push, a pull request, a cron tick or an explicit API trigger.
//! [`RequestsService::create_by_repo`] triggers a build through the API.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::builds::MinimalBuild;
use crate::api::resources::commits::Commit;
use crate::api::resources::owners::Owner;
use crate::api::resources::repositories::MinimalRepository;

/// A request as recorded by Travis CI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildRequest {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// `approved` or `rejected`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builds: Option<Vec<MinimalBuild>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

/// Payload for [`RequestsService::create_by_repo`].
///
/// `config` is merged into the repository's `.travis.yml` for this build.
/// `Some(Value::Null)` is sent as `"request.config":null` and decodes back
/// to `Some(Value::Null)`; only `None` leaves the key out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "request.message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "request.branch", default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(
        rename = "request.config",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<serde_json::Value>,
}

// A present key is `Some`, even when it holds `null`. Absent keys fall back
// to `default`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// The answer to a triggered request. The request is queued, not yet
/// processed, so only the submitted fields are known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingRequest {
    #[serde(flatten)]
    pub metadata: Metadata,

    /// API requests left for this repository in the current window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_requests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<PendingRequestDetails>,
}

/// The submitted request inside a [`PendingRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingRequestDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<serde_json::Value>,
}

/// Options for [`RequestsService::list_by_repo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestsOption {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl QueryOptions for RequestsOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
        ]
    }
}

#[derive(Deserialize)]
struct RequestsEnvelope {
    requests: Vec<BuildRequest>,
}

/// Calls the request endpoints. Obtain one with [`TravisClient::requests`].
#[derive(Debug, Clone, Copy)]
pub struct RequestsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The build requests service.
    pub fn requests(&self) -> RequestsService<'_> {
        RequestsService { client: self }
    }
}

impl RequestsService<'_> {
    pub async fn find_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        id: u64,
    ) -> Result<(BuildRequest, Response)> {
        let url = format!("repo/{}/request/{}", repo.into().path_segment(), id);
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&RequestsOption>,
    ) -> Result<(Vec<BuildRequest>, Response)> {
        let path = format!("repo/{}/requests", repo.into().path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (RequestsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.requests, response))
    }

    /// Triggers a build.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use travis_client::api::{Context, TravisClient};
    /// use travis_client::api::resources::requests::RequestBody;
    ///
    /// # async fn example() -> travis_client::api::common::Result<()> {
    /// let client = TravisClient::com(Some("token"))?;
    /// let body = RequestBody {
    ///     message: Some("nightly".to_string()),
    ///     branch: Some("master".to_string()),
    ///     config: Some(serde_json::json!({"script": "make test"})),
    /// };
    ///
    /// let (pending, _) = client
    ///     .requests()
    ///     .create_by_repo(&Context::background(), "octo/cat", &body)
    ///     .await?;
    /// println!("{:?} requests left", pending.remaining_requests);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        body: &RequestBody,
    ) -> Result<(PendingRequest, Response)> {
        let url = format!("repo/{}/requests", repo.into().path_segment());
        self.client.fetch(ctx, Method::POST, &url, Some(body)).await
    }
}
