//
//  travis-client
//  api/resources/logs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Job logs.
//!
//! Logs are available as JSON (with the individual parts streamed by the
//! worker) or as plain text from `job/{id}/log.txt`.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::{TravisClient, NO_BODY};
use crate::api::common::{Metadata, Response, Result};
use crate::api::context::Context;

/// The log of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Log {
    #[serde(flatten)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Full log text, once the job has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_parts: Option<Vec<LogPart>>,
}

/// A chunk of a log as written by the worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Set on the last part of the log.
    #[serde(rename = "final", default, skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
}

impl Log {
    /// The log text, assembled from the parts when `content` is missing.
    pub fn text(&self) -> String {
        if let Some(content) = &self.content {
            return content.clone();
        }
        let mut parts: Vec<&LogPart> = self.log_parts.iter().flatten().collect();
        parts.sort_by_key(|part| part.number.unwrap_or_default());
        parts
            .iter()
            .filter_map(|part| part.content.as_deref())
            .collect()
    }
}

/// Calls the log endpoints. Obtain one with [`TravisClient::logs`].
#[derive(Debug, Clone, Copy)]
pub struct LogsService<'a> {
    client: &'a TravisClient,
}

impl TravisClient {
    /// The logs service.
    pub fn logs(&self) -> LogsService<'_> {
        LogsService { client: self }
    }
}

impl LogsService<'_> {
    /// Fetches the log of a job as JSON.
    pub async fn find_by_job(&self, ctx: &Context, job_id: u64) -> Result<(Log, Response)> {
        let url = format!("job/{}/log", job_id);
        self.client.fetch(ctx, Method::GET, &url, NO_BODY).await
    }

    /// Fetches the log of a job as plain text.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    pub async fn raw_by_job(&self, ctx: &Context, job_id: u64) -> Result<(String, Response)> {
        let url = format!("job/{}/log.txt", job_id);
        let request = self.client.new_request(Method::GET, &url, NO_BODY, None)?;
        let mut bytes: Vec<u8> = Vec::new();
        let response = self.client.execute(ctx, request, &mut bytes).await?;
        Ok((String::from_utf8_lossy(&bytes).into_owned(), response))
    }

    /// Deletes the log of a job. The API answers with the emptied log.
    pub async fn delete_by_job(&self, ctx: &Context, job_id: u64) -> Result<(Log, Response)> {
        let url = format!("job/{}/log", job_id);
        self.client.fetch(ctx, Method::DELETE, &url, NO_BODY).await
    }
}
