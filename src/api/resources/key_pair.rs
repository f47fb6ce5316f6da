//
//  travis-client
//  api/resources/key_pair.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH key pairs used by builds to clone private dependencies.
//!
//! A repository has at most one custom key pair (`repo/{repo}/key_pair`)
//! and one key pair generated by Travis CI
//! (`repo/{repo}/key_pair/generated`).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, RepoRef, Response, Result};
use crate::api::context::Context;

/// Public half of a key pair. The private key is never returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Payload for creating or updating the custom key pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPairBody {
    #[serde(
        rename = "key_pair.description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// PEM-encoded private key.
    #[serde(rename = "key_pair.value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Calls the key pair endpoints. Obtain one with [`TravisClient::key_pair`].
#[derive(Debug, Clone, Copy)]
pub struct KeyPairService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The key pair service.
    pub fn key_pair(&self) -> KeyPairService<'_> {
        KeyPairService { client: self }
    }
}

impl KeyPairService<'_> {
    pub async fn find_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(KeyPair, Response)> {
        let url = key_pair_path(&repo.into());
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn create_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        body: &KeyPairBody,
    ) -> Result<(KeyPair, Response)> {
        let url = key_pair_path(&repo.into());
        self.client.fetch(ctx, Method::POST, &url, Some(body)).await
    }

    pub async fn update_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        body: &KeyPairBody,
    ) -> Result<(KeyPair, Response)> {
        let url = key_pair_path(&repo.into());
        self.client.fetch(ctx, Method::PATCH, &url, Some(body)).await
    }

    /// Removes the custom key pair. The API answers `204 No Content`.
    pub async fn delete_by_repo(&self, ctx: &Context, repo: impl Into<RepoRef>) -> Result<Response> {
        let url = key_pair_path(&repo.into());
        self.client
            .send_discarding(ctx, Method::DELETE, &url, NO_BODY)
            .await
    }

    pub async fn find_generated_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(KeyPair, Response)> {
        let url = format!("{}/generated", key_pair_path(&repo.into()));
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Replaces the generated key pair with a fresh one.
    pub async fn create_generated_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(KeyPair, Response)> {
        let url = format!("{}/generated", key_pair_path(&repo.into()));
        self.client.fetch(ctx, Method::POST, &url, NO_BODY).await
    }
}

fn key_pair_path(repo: &RepoRef) -> String {
    format!("repo/{}/key_pair", repo.path_segment())
}
