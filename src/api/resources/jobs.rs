//
//  travis-client
//  api/resources/jobs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jobs API types and service.
//!
//! A job is one entry of a build matrix, running on a single worker.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`find`](JobsService::find) | GET | `job/{id}` |
//! | [`list`](JobsService::list) | GET | `jobs` |
//! | [`list_by_build`](JobsService::list_by_build) | GET | `build/{id}/jobs` |
//! | [`cancel`](JobsService::cancel) | POST | `job/{id}/cancel` |
//! | [`restart`](JobsService::restart) | POST | `job/{id}/restart` |
//! | [`debug`](JobsService::debug) | POST | `job/{id}/debug` |

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, Paginated, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::builds::MinimalBuild;
use crate::api::resources::commits::Commit;
use crate::api::resources::owners::Owner;
use crate::api::resources::repositories::MinimalRepository;
use crate::api::resources::stages::Stage;

/// Standard representation of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_failure: Option<bool>,

    /// `<build number>.<position>`, e.g. `25.2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<MinimalBuild>,

    /// Worker queue the job ran on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// Minimal representation of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimalJob {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Paginated for [Job] {
    fn last_item_number(&self) -> Option<&str> {
        self.last().and_then(|job| job.number.as_deref())
    }
}

/// Options for [`JobsService::find`] and [`JobsService::list_by_build`].
pub type JobOption = IncludeOption;

/// Options for [`JobsService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobsOption {
    /// Only jobs in these states; sent as `state[]=...`.
    pub state: Vec<String>,
    pub sort_by: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub include: Vec<String>,
}

impl QueryOptions for JobsOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::list("state", QueryEncoding::BracketedRepeat, &self.state),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct JobsEnvelope {
    jobs: Vec<Job>,
}

#[derive(Deserialize)]
struct JobActionEnvelope {
    job: Job,
}

/// Calls the jobs endpoints. Obtain one with [`TravisClient::jobs`].
#[derive(Debug, Clone, Copy)]
pub struct JobsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The jobs service.
    pub fn jobs(&self) -> JobsService<'_> {
        JobsService { client: self }
    }
}

impl JobsService<'_> {
    pub async fn find(
        &self,
        ctx: &Context,
        id: u64,
        options: Option<&JobOption>,
    ) -> Result<(Job, Response)> {
        let url = self
            .client
            .build_url(&format!("job/{}", id), as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Lists jobs visible to the authenticated user.
    pub async fn list(
        &self,
        ctx: &Context,
        options: Option<&JobsOption>,
    ) -> Result<(Vec<Job>, Response)> {
        let url = self.client.build_url("jobs", as_query(options))?;
        let (envelope, response): (JobsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.jobs, response))
    }

    /// Lists the jobs of a build.
    pub async fn list_by_build(
        &self,
        ctx: &Context,
        build_id: u64,
        options: Option<&JobOption>,
    ) -> Result<(Vec<Job>, Response)> {
        let url = self
            .client
            .build_url(&format!("build/{}/jobs", build_id), as_query(options))?;
        let (envelope, response): (JobsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.jobs, response))
    }

    pub async fn cancel(&self, ctx: &Context, id: u64) -> Result<(Job, Response)> {
        self.action(ctx, id, "cancel").await
    }

    pub async fn restart(&self, ctx: &Context, id: u64) -> Result<(Job, Response)> {
        self.action(ctx, id, "restart").await
    }

    /// Restarts a job in debug mode. Only available on repositories with
    /// debug builds enabled.
    pub async fn debug(&self, ctx: &Context, id: u64) -> Result<(Job, Response)> {
        self.action(ctx, id, "debug").await
    }

    async fn action(&self, ctx: &Context, id: u64, action: &str) -> Result<(Job, Response)> {
        let url = format!("job/{}/{}", id, action);
        let (envelope, response): (JobActionEnvelope, _) =
            self.client.fetch(ctx, Method::POST, &url, NO_BODY).await?;
        Ok((envelope.job, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::encode_query;

    #[test]
    fn test_jobs_state_is_bracketed() {
        let options = JobsOption {
            state: vec!["started".to_string(), "queued".to_string()],
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(
            encode_query(&options),
            "state%5B%5D=started&state%5B%5D=queued&limit=10"
        );
    }

    #[test]
    fn test_last_job_number() {
        let jobs = vec![
            Job {
                number: Some("3.1".to_string()),
                ..Default::default()
            },
            Job {
                number: Some("3.2".to_string()),
                ..Default::default()
            },
        ];
        assert_eq!(jobs.last_item_number(), Some("3.2"));
    }

    #[test]
    fn test_decode_job_with_stage() {
        let json = r#"{
            "@type": "job",
            "id": 12,
            "allow_failure": false,
            "number": "3.1",
            "state": "passed",
            "queue": "builds.gce",
            "build": {"@type": "build", "@representation": "minimal", "id": 11, "number": "3"},
            "stage": {"@type": "stage", "id": 5, "number": 1, "name": "test", "state": "passed"}
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.allow_failure, Some(false));
        assert_eq!(job.build.unwrap().number.as_deref(), Some("3"));
        assert_eq!(job.stage.unwrap().name.as_deref(), Some("test"));
    }
}
