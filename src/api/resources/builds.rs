//
//  travis-client
//  api/resources/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Builds API types and service.
//!
//! A build is one run of a repository's `.travis.yml` for a commit, made of
//! one or more jobs, optionally grouped into stages.
//!
//! # Build Lifecycle
//!
//! ```text
//! created -> received -> started -> passed | failed | errored | canceled
//! ```
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`find`](BuildsService::find) | GET | `build/{id}` |
//! | [`list`](BuildsService::list) | GET | `builds` |
//! | [`list_by_repo`](BuildsService::list_by_repo) | GET | `repo/{repo}/builds` |
//! | [`cancel`](BuildsService::cancel) | POST | `build/{id}/cancel` |
//! | [`restart`](BuildsService::restart) | POST | `build/{id}/restart` |

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, Paginated, RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::branches::MinimalBranch;
use crate::api::resources::commits::Commit;
use crate::api::resources::jobs::MinimalJob;
use crate::api::resources::owners::Owner;
use crate::api::resources::repositories::MinimalRepository;
use crate::api::resources::stages::Stage;

/// Standard representation of a build.
///
/// # Example
///
/// ```rust
/// use travis_client::api::resources::builds::Build;
///
/// let build: Build = serde_json::from_str(
///     r#"{"id": 1, "number": "1", "state": "created", "duration": 10}"#,
/// ).unwrap();
///
/// assert_eq!(build.id, Some(1));
/// assert_eq!(build.state.as_deref(), Some("created"));
/// assert!(build.repository.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Sequential number within the repository, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Wall time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// `push`, `pull_request`, `api` or `cron`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_number: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<MinimalBranch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<MinimalJob>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Owner>,
}

/// Minimal representation of a build, as embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimalBuild {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_number: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// A git tag a build ran for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_id: Option<u64>,
}

impl Build {
    /// Whether the build reached a final state.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state.as_deref(),
            Some("passed" | "failed" | "errored" | "canceled")
        )
    }
}

impl Paginated for [Build] {
    fn last_item_number(&self) -> Option<&str> {
        self.last().and_then(|build| build.number.as_deref())
    }
}

/// Options for [`BuildsService::find`].
pub type BuildOption = IncludeOption;

/// Options for [`BuildsService::list`] (builds of the current user).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildsOption {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// e.g. `id:desc`, `started_at`, `finished_at:desc`.
    pub sort_by: Option<String>,
    pub include: Vec<String>,
}

impl QueryOptions for BuildsOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

/// Options for [`BuildsService::list_by_repo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildsByRepoOption {
    /// Only builds on these branches.
    pub branch_name: Vec<String>,
    /// Only builds created by these logins.
    pub created_by: Vec<String>,
    pub event_type: Vec<String>,
    pub previous_state: Vec<String>,
    pub state: Vec<String>,
    /// Only builds numbered below this one; see [`after`](Self::after).
    pub after_number: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<String>,
    pub include: Vec<String>,
}

impl BuildsByRepoOption {
    /// Options for the page following `page`, or `None` when `page` is the
    /// last one.
    pub fn after(&self, page: &[Build]) -> Option<Self> {
        page.last_item_number().map(|number| Self {
            after_number: Some(number.to_string()),
            ..self.clone()
        })
    }
}

impl QueryOptions for BuildsByRepoOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::list("branch.name", QueryEncoding::CommaJoin, &self.branch_name),
            QueryField::list("created_by", QueryEncoding::CommaJoin, &self.created_by),
            QueryField::list("event_type", QueryEncoding::CommaJoin, &self.event_type),
            QueryField::list("previous_state", QueryEncoding::CommaJoin, &self.previous_state),
            QueryField::list("state", QueryEncoding::CommaJoin, &self.state),
            QueryField::text(
                "after_number",
                QueryEncoding::OmitIfEmpty,
                self.after_number.as_deref(),
            ),
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct BuildsEnvelope {
    builds: Vec<Build>,
}

#[derive(Deserialize)]
struct BuildActionEnvelope {
    build: Build,
}

/// Calls the builds endpoints. Obtain one with [`TravisClient::builds`].
#[derive(Debug, Clone, Copy)]
pub struct BuildsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The builds service.
    pub fn builds(&self) -> BuildsService<'_> {
        BuildsService { client: self }
    }
}

impl BuildsService<'_> {
    /// Fetches a single build by id.
    pub async fn find(
        &self,
        ctx: &Context,
        id: u64,
        options: Option<&BuildOption>,
    ) -> Result<(Build, Response)> {
        let url = self
            .client
            .build_url(&format!("build/{}", id), as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Lists builds of the authenticated user.
    pub async fn list(
        &self,
        ctx: &Context,
        options: Option<&BuildsOption>,
    ) -> Result<(Vec<Build>, Response)> {
        let url = self.client.build_url("builds", as_query(options))?;
        let (envelope, response): (BuildsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.builds, response))
    }

    /// Lists builds of a repository.
    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&BuildsByRepoOption>,
    ) -> Result<(Vec<Build>, Response)> {
        let path = format!("repo/{}/builds", repo.into().path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (BuildsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.builds, response))
    }

    /// Cancels a build. The returned build reflects the state before the
    /// cancellation took effect.
    pub async fn cancel(&self, ctx: &Context, id: u64) -> Result<(Build, Response)> {
        self.action(ctx, id, "cancel").await
    }

    /// Restarts a build.
    pub async fn restart(&self, ctx: &Context, id: u64) -> Result<(Build, Response)> {
        self.action(ctx, id, "restart").await
    }

    async fn action(&self, ctx: &Context, id: u64, action: &str) -> Result<(Build, Response)> {
        let url = format!("build/{}/{}", id, action);
        let (envelope, response): (BuildActionEnvelope, _) =
            self.client.fetch(ctx, Method::POST, &url, NO_BODY).await?;
        Ok((envelope.build, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::encode_query;

    #[test]
    fn test_builds_by_repo_query() {
        let options = BuildsByRepoOption {
            branch_name: vec!["master".to_string(), "dev".to_string()],
            state: vec!["passed".to_string()],
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            encode_query(&options),
            "branch.name=master%2Cdev&state=passed&limit=5"
        );
    }

    #[test]
    fn test_empty_options_encode_nothing() {
        assert_eq!(encode_query(&BuildsByRepoOption::default()), "");
        assert_eq!(encode_query(&BuildsOption::default()), "");
    }

    #[test]
    fn test_pagination_cursor() {
        let page = vec![
            Build {
                number: Some("20".to_string()),
                ..Default::default()
            },
            Build {
                number: Some("19".to_string()),
                ..Default::default()
            },
        ];
        let base = BuildsByRepoOption {
            limit: Some(2),
            ..Default::default()
        };
        let next = base.after(&page).unwrap();
        assert_eq!(next.after_number.as_deref(), Some("19"));
        assert_eq!(next.limit, Some(2));

        let empty: Vec<Build> = Vec::new();
        assert!(base.after(&empty).is_none());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_is_finished() {
        let mut build = Build {
            state: Some("started".to_string()),
            ..Default::default()
        };
        assert!(!build.is_finished());
        build.state = Some("passed".to_string());
        assert!(build.is_finished());
    }

    #[test]
    fn test_decode_standard_build() {
        let json = r#"{
            "@type": "build",
            "@href": "/build/86601346",
            "@representation": "standard",
            "@permissions": {"read": true, "cancel": false, "restart": false},
            "id": 86601346,
            "number": "25",
            "state": "passed",
            "duration": 53,
            "event_type": "push",
            "previous_state": "passed",
            "pull_request_title": null,
            "pull_request_number": null,
            "started_at": "2015-10-15T22:10:36Z",
            "finished_at": "2015-10-15T22:11:29Z",
            "private": false,
            "repository": {"@type": "repository", "@representation": "minimal", "id": 1, "name": "travis-web", "slug": "travis-ci/travis-web"},
            "branch": {"@type": "branch", "@representation": "minimal", "name": "master"},
            "tag": null,
            "commit": {"@type": "commit", "id": 2, "sha": "ecf3d3e57ce2f4d1b8a2fd5e8c1ba2e7c3e1a1e9", "ref": null, "message": "bump"},
            "jobs": [{"@type": "job", "@representation": "minimal", "id": 86601347}],
            "stages": [],
            "created_by": {"@type": "user", "id": 3, "login": "octocat"},
            "updated_at": "2015-10-15T22:11:29.118Z"
        }"#;
        let build: Build = serde_json::from_str(json).unwrap();
        assert_eq!(build.id, Some(86601346));
        assert_eq!(build.metadata.permissions.as_ref().unwrap()["read"], true);
        assert_eq!(
            build.repository.unwrap().slug.as_deref(),
            Some("travis-ci/travis-web")
        );
        assert_eq!(build.jobs.unwrap()[0].id, Some(86601347));
        assert!(build.tag.is_none());
        assert_eq!(build.stages, Some(Vec::new()));
    }
}
