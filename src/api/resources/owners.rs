//
//  travis-client
//  api/resources/owners.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Owner references embedded in repositories, builds and jobs.

use serde::{Deserialize, Serialize};

use crate::api::common::Metadata;

/// A user or organization that owns a repository or triggered a build.
///
/// Whether it is a user or an organization is given by
/// `metadata.resource_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
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
}

impl Owner {
    /// Whether this owner is an organization.
    pub fn is_organization(&self) -> bool {
        self.metadata.resource_type.as_deref() == Some("organization")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_kind() {
        let owner: Owner =
            serde_json::from_str(r#"{"@type":"organization","id":87,"login":"travis-ci"}"#).unwrap();
        assert!(owner.is_organization());
        assert_eq!(owner.login.as_deref(), Some("travis-ci"));

        let user: Owner = serde_json::from_str(r#"{"@type":"user","id":1}"#).unwrap();
        assert!(!user.is_organization());
    }
}
