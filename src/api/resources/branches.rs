//
//  travis-client
//  api/resources/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branches of a repository and their build history.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{escape_segment, Metadata, RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};
use crate::api::resources::builds::MinimalBuild;
use crate::api::resources::repositories::MinimalRepository;

/// Standard representation of a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<MinimalRepository>,

    /// Whether this is the repository's default branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists_on_github: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build: Option<MinimalBuild>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_builds: Option<Vec<MinimalBuild>>,
}

/// Minimal representation of a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimalBranch {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Options for [`BranchesService::find`].
pub type BranchOption = IncludeOption;

/// Options for [`BranchesService::list_by_repo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchesOption {
    pub exists_on_github: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// e.g. `name`, `last_build`, `default_branch:desc`.
    pub sort_by: Option<String>,
    pub include: Vec<String>,
}

impl QueryOptions for BranchesOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::flag(
                "branch.exists_on_github",
                QueryEncoding::OmitIfEmpty,
                self.exists_on_github,
            ),
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct BranchesEnvelope {
    branches: Vec<Branch>,
}

/// Calls the branch endpoints. Obtain one with [`TravisClient::branches`].
#[derive(Debug, Clone, Copy)]
pub struct BranchesService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The branches service.
    pub fn branches(&self) -> BranchesService<'_> {
        BranchesService { client: self }
    }
}

impl BranchesService<'_> {
    /// Fetches one branch of a repository. Branch names containing `/` are
    /// escaped as a single path segment.
    pub async fn find(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        name: &str,
        options: Option<&BranchOption>,
    ) -> Result<(Branch, Response)> {
        let path = format!(
            "repo/{}/branch/{}",
            repo.into().path_segment(),
            escape_segment(name)
        );
        let url = self.client.build_url(&path, as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&BranchesOption>,
    ) -> Result<(Vec<Branch>, Response)> {
        let path = format!("repo/{}/branches", repo.into().path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (BranchesEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.branches, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::encode_query;

    #[test]
    fn test_branches_query() {
        let options = BranchesOption {
            exists_on_github: Some(true),
            sort_by: Some("last_build:desc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            encode_query(&options),
            "branch.exists_on_github=true&sort_by=last_build%3Adesc"
        );
    }

    #[test]
    fn test_decode_branch() {
        let json = r#"{
            "@type": "branch",
            "name": "master",
            "default_branch": true,
            "exists_on_github": true,
            "last_build": {"@type": "build", "id": 3, "number": "3", "state": "passed"},
            "recent_builds": [{"id": 3}, {"id": 2}]
        }"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(branch.default_branch, Some(true));
        assert_eq!(branch.last_build.unwrap().state.as_deref(), Some("passed"));
        assert_eq!(branch.recent_builds.unwrap().len(), 2);
    }
}
