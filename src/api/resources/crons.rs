//
//  travis-client
//  api/resources/crons.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Scheduled (cron) builds.
//!
//! A cron belongs to one branch of a repository and triggers a build
//! `daily`, `weekly` or `monthly`.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{escape_segment, Metadata, RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::branches::MinimalBranch;
use crate::api::resources::repositories::MinimalRepository;

/// A cron job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cron {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<MinimalBranch>,

    /// `daily`, `weekly` or `monthly`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dont_run_if_recent_build_exists: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Payload for [`CronsService::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CronBody {
    #[serde(rename = "cron.interval", default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(
        rename = "cron.dont_run_if_recent_build_exists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dont_run_if_recent_build_exists: Option<bool>,
}

/// Options for the single-cron lookups.
pub type CronOption = IncludeOption;

/// Options for [`CronsService::list_by_repo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CronsOption {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub include: Vec<String>,
}

impl QueryOptions for CronsOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct CronsEnvelope {
    crons: Vec<Cron>,
}

/// Calls the cron endpoints. Obtain one with [`TravisClient::crons`].
#[derive(Debug, Clone, Copy)]
pub struct CronsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The crons service.
    pub fn crons(&self) -> CronsService<'_> {
        CronsService { client: self }
    }
}

impl CronsService<'_> {
    pub async fn find(
        &self,
        ctx: &Context,
        id: u64,
        options: Option<&CronOption>,
    ) -> Result<(Cron, Response)> {
        let url = self
            .client
            .build_url(&format!("cron/{}", id), as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Fetches the cron of a branch.
    pub async fn find_by_branch(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        branch: &str,
        options: Option<&CronOption>,
    ) -> Result<(Cron, Response)> {
        let path = cron_path(&repo.into(), branch);
        let url = self.client.build_url(&path, as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&CronsOption>,
    ) -> Result<(Vec<Cron>, Response)> {
        let path = format!("repo/{}/crons", repo.into().path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (CronsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.crons, response))
    }

    /// Creates the cron of a branch, replacing an existing one.
    pub async fn create(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        branch: &str,
        body: &CronBody,
    ) -> Result<(Cron, Response)> {
        let path = cron_path(&repo.into(), branch);
        self.client.fetch(ctx, Method::POST, &path, Some(body)).await
    }

    /// Deletes a cron. The API answers `204 No Content`.
    pub async fn delete(&self, ctx: &Context, id: u64) -> Result<Response> {
        let url = format!("cron/{}", id);
        self.client
            .send_discarding(ctx, Method::DELETE, &url, NO_BODY)
            .await
    }
}

fn cron_path(repo: &RepoRef, branch: &str) -> String {
    format!(
        "repo/{}/branch/{}/cron",
        repo.path_segment(),
        escape_segment(branch)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cron_body_keys() {
        let body = CronBody {
            interval: Some("weekly".to_string()),
            dont_run_if_recent_build_exists: Some(false),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"cron.interval":"weekly","cron.dont_run_if_recent_build_exists":false}"#
        );
    }

    #[test]
    fn test_cron_path_escapes_branch() {
        let path = cron_path(&RepoRef::from("octo/cat"), "release/1.0");
        assert_eq!(path, "repo/octo%2Fcat/branch/release%2F1.0/cron");
    }
}
