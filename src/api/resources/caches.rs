//
//  travis-client
//  api/resources/caches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build caches of a repository.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{RepoRef, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, QueryEncoding, QueryField, QueryOptions};

/// One cache archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cache {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Matched cache slug, e.g. `cache-linux-...--rvm-default--gemfile-Gemfile`.
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Filters for listing and deleting caches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachesOption {
    pub branch: Option<String>,
    /// Substring of the cache slug.
    pub match_name: Option<String>,
}

impl QueryOptions for CachesOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("branch", QueryEncoding::OmitIfEmpty, self.branch.as_deref()),
            QueryField::text("match", QueryEncoding::OmitIfEmpty, self.match_name.as_deref()),
        ]
    }
}

#[derive(Deserialize)]
struct CachesEnvelope {
    caches: Vec<Cache>,
}

/// Calls the cache endpoints. Obtain one with [`TravisClient::caches`].
#[derive(Debug, Clone, Copy)]
pub struct CachesService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The caches service.
    pub fn caches(&self) -> CachesService<'_> {
        CachesService { client: self }
    }
}

impl CachesService<'_> {
    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&CachesOption>,
    ) -> Result<(Vec<Cache>, Response)> {
        self.send(ctx, Method::GET, repo.into(), options).await
    }

    /// Deletes the caches matching `options` and returns what was removed.
    /// Without options every cache of the repository goes.
    pub async fn delete_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        options: Option<&CachesOption>,
    ) -> Result<(Vec<Cache>, Response)> {
        self.send(ctx, Method::DELETE, repo.into(), options).await
    }

    async fn send(
        &self,
        ctx: &Context,
        method: Method,
        repo: RepoRef,
        options: Option<&CachesOption>,
    ) -> Result<(Vec<Cache>, Response)> {
        let path = format!("repo/{}/caches", repo.path_segment());
        let url = self.client.build_url(&path, as_query(options))?;
        let (envelope, response): (CachesEnvelope, _) =
            self.client.fetch(ctx, method, &url, NO_BODY).await?;
        Ok((envelope.caches, response))
    }
}
