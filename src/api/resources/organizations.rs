//
//  travis-client
//  api/resources/organizations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organizations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, Response, Result};
use crate::api::context::Context;
use crate::api::query::{as_query, IncludeOption, QueryEncoding, QueryField, QueryOptions};

/// A GitHub organization known to Travis CI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
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
}

/// Options for [`OrganizationsService::find`].
pub type OrganizationOption = IncludeOption;

/// Options for [`OrganizationsService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationsOption {
    /// Only organizations where the user has this role, e.g. `admin`.
    pub role: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<String>,
    pub include: Vec<String>,
}

impl QueryOptions for OrganizationsOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::text("role", QueryEncoding::OmitIfEmpty, self.role.as_deref()),
            QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
            QueryField::number("offset", QueryEncoding::OmitIfEmpty, self.offset),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, self.sort_by.as_deref()),
            QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
        ]
    }
}

#[derive(Deserialize)]
struct OrganizationsEnvelope {
    organizations: Vec<Organization>,
}

/// Calls the organization endpoints. Obtain one with
/// [`TravisClient::organizations`].
#[derive(Debug, Clone, Copy)]
pub struct OrganizationsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService { client: self }
    }
}

impl OrganizationsService<'_> {
    pub async fn find(
        &self,
        ctx: &Context,
        id: u64,
        options: Option<&OrganizationOption>,
    ) -> Result<(Organization, Response)> {
        let url = self
            .client
            .build_url(&format!("org/{}", id), as_query(options))?;
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Organizations the authenticated user is a member of.
    pub async fn list(
        &self,
        ctx: &Context,
        options: Option<&OrganizationsOption>,
    ) -> Result<(Vec<Organization>, Response)> {
        let url = self.client.build_url("orgs", as_query(options))?;
        let (envelope, response): (OrganizationsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.organizations, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::encode_query;

    #[test]
    fn test_organizations_query() {
        let options = OrganizationsOption {
            role: Some("admin".to_string()),
            offset: Some(20),
            ..Default::default()
        };
        assert_eq!(encode_query(&options), "role=admin&offset=20");
    }
}
