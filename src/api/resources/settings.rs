//
//  travis-client
//  api/resources/settings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository settings such as `builds_only_with_travis_yml` or
//! `maximum_number_of_builds`.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{escape_segment, Metadata, RepoRef, Response, Result};
use crate::api::context::Context;

/// A single repository setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SettingValue>,
}

/// Settings are either switches or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(i64),
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Payload for [`SettingsService::update_by_repo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingBody {
    #[serde(rename = "setting.value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SettingValue>,
}

#[derive(Deserialize)]
struct SettingsEnvelope {
    settings: Vec<Setting>,
}

/// Calls the settings endpoints. Obtain one with [`TravisClient::settings`].
#[derive(Debug, Clone, Copy)]
pub struct SettingsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The repository settings service.
    pub fn settings(&self) -> SettingsService<'_> {
        SettingsService { client: self }
    }
}

impl SettingsService<'_> {
    pub async fn find_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        name: &str,
    ) -> Result<(Setting, Response)> {
        let url = setting_path(&repo.into(), name);
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    pub async fn list_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
    ) -> Result<(Vec<Setting>, Response)> {
        let url = format!("repo/{}/settings", repo.into().path_segment());
        let (envelope, response): (SettingsEnvelope, _) =
            self.client.fetch(ctx, Method::GET, &url, NO_BODY).await?;
        Ok((envelope.settings, response))
    }

    pub async fn update_by_repo(
        &self,
        ctx: &Context,
        repo: impl Into<RepoRef>,
        name: &str,
        body: &SettingBody,
    ) -> Result<(Setting, Response)> {
        let url = setting_path(&repo.into(), name);
        self.client.fetch(ctx, Method::PATCH, &url, Some(body)).await
    }
}

fn setting_path(repo: &RepoRef, name: &str) -> String {
    format!("repo/{}/setting/{}", repo.path_segment(), escape_segment(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_values() {
        let settings: Vec<Setting> = serde_json::from_str(
            r#"[{"name":"build_pushes","value":true},{"name":"maximum_number_of_builds","value":3}]"#,
        )
        .unwrap();
        assert_eq!(settings[0].value, Some(SettingValue::Flag(true)));
        assert_eq!(settings[1].value, Some(SettingValue::Number(3)));
    }

    #[test]
    fn test_setting_body() {
        let body = SettingBody {
            value: Some(false.into()),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"setting.value":false}"#);
    }
}
