//
//  travis-client
//  api/resources/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repositories API types and service.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`find`](RepositoriesService::find) | GET | `repo/{repo}` |
//! | [`list`](RepositoriesService::list) | GET | `repos` |
//! | [`list_by_owner`](RepositoriesService::list_by_owner) | GET | `owner/{login}/repos` |
//! | [`activate`](RepositoriesService::activate) | POST | `repo/{repo}/activate` |
//! | [`deactivate`](RepositoriesService::deactivate) | POST | `repo/{repo}/deactivate` |
//! | [`star`](RepositoriesService::star) | POST | `repo/{repo}/star` |
//! | [`unstar`](RepositoriesService::unstar) | POST | `repo/{repo}/unstar` |
//!
//! `{repo}` is either the numeric id or the percent-encoded slug, see
//! [`RepoRef`].

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{escape_segment, Metadata, RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::branches::MinimalBranch;
use crate::api::resources::owners::Owner;

/// Standard representation of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `owner/name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_language: Option<String>,

    /// Whether Travis CI builds this repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<MinimalBranch>,

    /// Whether the authenticated user starred the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by_installation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_on_org: Option<bool>,
}

/// Minimal representation of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimalRepository {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Options for [`RepositoriesService::find`].
pub type RepositoryOption = IncludeOption;

/// Options for [`RepositoriesService::list`] and
/// [`RepositoriesService::list_by_owner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoriesOption {
    pub active: Option<bool>,
    pub private: Option<bool>,
    pub starred: Option<bool>,
    /// Fuzzy slug filter. Sent even when empty.
    pub slug_matches: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<String>,
    pub include: Vec<String>,
}

impl QueryOptions for RepositoriesOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::flag("repository.active", QueryEncoding::OmitIfEmpty, self.active),
            QueryField::flag("repository.private", QueryEncoding::OmitIfEmpty, self.private),
            QueryField::flag("repository.starred", QueryEncoding::OmitIfEmpty, self.starred),
            QueryField::text(
                "slug_matches",
                QueryEncoding::Verbatim,
                self.slug_matches.as_deref(),
            ),
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct RepositoriesEnvelope {
    repositories: Vec<Repository>,
}

/// Calls the repository endpoints. Obtain one with
/// [`TravisClient::repositories`].
#[derive(Debug, Clone, Copy)]
pub struct RepositoriesService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService { client: self }
    }
}

impl RepositoriesService<'_> {
    /// Fetches a repository by id or slug.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use travis_client::api::{Context, TravisClient};
    ///
    /// # async fn example() -> travis_client::api::common::Result<()> {
    /// let client = TravisClient::com(None)?;
    /// let ctx = Context::background();
    ///
    /// let (repo, _) = client.repositories().find(&ctx, "travis-ci/travis-web", None).await?;
    /// let (same, _) = client.repositories().find(&ctx, repo.id.unwrap_or_default(), None).await?;
    /// assert_eq!(repo.slug, same.slug);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&RepositoryOption>,
    ) -> Result<(Repository, Response)> {
        let path = format!("repo/{}", repo.into().path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Lists repositories the authenticated user has access to.
    pub async fn list(
        &self,
        ctx: &Context,
        options: Option<&RepositoriesOption>,
    ) -> Result<(Vec<Repository>, Response)> {
        let url = self.client.build_url("repos", as_query(options))?;
        let (envelope, response): (RepositoriesEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.repositories, response))
    }

    /// Lists repositories of a user or organization.
    pub async fn list_by_owner(
        &self,
        ctx: &Context,
        login: &str,
        options: Option<&RepositoriesOption>,
    ) -> Result<(Vec<Repository>, Response)> {
        let path = format!("owner/{}/repos", escape_segment(login));
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (RepositoriesEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.repositories, response))
    }

    /// Enables builds for a repository.
    pub async fn activate(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Repository, Response)> {
        self.action(ctx, repo.into(), "activate").await
    }

    /// Disables builds for a repository.
    pub async fn deactivate(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Repository, Response)> {
        self.action(ctx, repo.into(), "deactivate").await
    }

    pub async fn star(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Repository, Response)> {
        self.action(ctx, repo.into(), "star").await
    }

    pub async fn unstar(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Repository, Response)> {
        self.action(ctx, repo.into(), "unstar").await
    }

    async fn action(
        &self,
        ctx: &Context,
        repo: RepoRef,
        action: &str,
    ) -> Result<(Repository, Response)> {
        let url = format!("repo/{}/{}", repo.path_segment(), action);
        self.client.fetch(ctx, Method::POST, &url, NO_BODY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::encode_query;

    #[test]
    fn test_repositories_query_keys() {
        let options = RepositoriesOption {
            active: Some(true),
            starred: Some(false),
            sort_by: Some("name".to_string()),
            ..Default::default()
        };
        assert_eq!(
            encode_query(&options),
            "repository.active=true&repository.starred=false&sort_by=name"
        );
    }

    #[test]
    fn test_slug_matches_sent_when_empty() {
        let options = RepositoriesOption {
            slug_matches: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(encode_query(&options), "slug_matches=");
    }

    #[test]
    fn test_decode_repository() {
        let json = r#"{
            "@type": "repository",
            "@permissions": {"read": true, "activate": true, "star": true},
            "id": 1,
            "name": "travis-web",
            "slug": "travis-ci/travis-web",
            "active": true,
            "private": false,
            "owner": {"@type": "organization", "id": 87, "login": "travis-ci"},
            "default_branch": {"@type": "branch", "@representation": "minimal", "name": "master"},
            "starred": false
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.default_branch.unwrap().name.as_deref(), Some("master"));
        assert!(repo.owner.unwrap().is_organization());
        assert_eq!(repo.starred, Some(false));
    }
}
