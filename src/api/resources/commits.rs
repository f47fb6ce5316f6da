//
//  travis-client
//  api/resources/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit data attached to builds, jobs and requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::Metadata;

/// A VCS commit as seen by Travis CI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    /// Git ref, e.g. `refs/heads/master`.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer: Option<Person>,
}

/// Commit author or committer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Commit {
    /// First seven characters of the SHA.
    pub fn short_sha(&self) -> Option<&str> {
        self.sha.as_deref().map(|sha| sha.get(..7).unwrap_or(sha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_ref_field() {
        let commit: Commit = serde_json::from_str(
            r#"{"id":1,"sha":"a1b2c3d4e5f6","ref":"refs/heads/master","committed_at":"2018-04-10T10:10:10Z"}"#,
        )
        .unwrap();
        assert_eq!(commit.git_ref.as_deref(), Some("refs/heads/master"));
        assert_eq!(commit.short_sha(), Some("a1b2c3d"));
        assert!(commit.committed_at.is_some());
    }
}
