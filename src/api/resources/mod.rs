//
//  travis-client
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Travis CI API v3 resources.
//!
//! Each submodule holds the data structures of one resource family and the
//! service that calls its endpoints. Services are cheap borrowing views
//! obtained from the client:
//!
//! ```rust,no_run
//! use travis_client::api::{Context, TravisClient};
//!
//! # async fn example() -> travis_client::api::common::Result<()> {
//! let client = TravisClient::com(Some("token"))?;
//! let ctx = Context::background();
//!
//! let (build, _) = client.builds().find(&ctx, 351778872, None).await?;
//! let (jobs, _) = client.jobs().list_by_build(&ctx, 351778872, None).await?;
//! println!("build {:?} has {} jobs", build.number, jobs.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Conventions
//!
//! - Every field of every DTO is optional; absent fields are skipped when
//!   serializing.
//! - Standard and minimal representations are separate types, e.g.
//!   [`builds::Build`] and [`builds::MinimalBuild`].
//! - Repo-scoped calls accept anything convertible into
//!   [`RepoRef`](crate::api::common::RepoRef): a numeric id or an
//!   `owner/name` slug.
//! - Write bodies use the API's `resource.field` key style
//!   (`env_var.name`, `cron.interval`, ...).
//! - Collection envelopes such as `{"builds": [...]}` are unwrapped.

pub mod authentication;
pub mod branches;
pub mod builds;
pub mod caches;
pub mod commits;
pub mod crons;
pub mod env_vars;
pub mod jobs;
pub mod key_pair;
pub mod logs;
pub mod organizations;
pub mod owners;
pub mod repositories;
pub mod requests;
pub mod settings;
pub mod stages;
pub mod user;
