//
//  travis-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination helpers for Travis CI collections
//!
//! Travis CI build and job lists are ordered by their sequential number, and
//! the next page is requested with the number of the last item already seen
//! (`after_number`). Collections that support this expose the number of
//! their last item through the [`Paginated`] trait.
//!
//! The API also describes the current page in a `@pagination` object; callers
//! working with raw collection bodies can decode it into [`Pagination`].
//!
//! # Example
//!
//! ```rust
//! use travis_client::api::common::Paginated;
//! use travis_client::api::resources::builds::{Build, BuildsByRepoOption};
//!
//! let page = vec![
//!     Build { number: Some("12".to_string()), ..Default::default() },
//!     Build { number: Some("11".to_string()), ..Default::default() },
//! ];
//!
//! assert_eq!(page.last_item_number(), Some("11"));
//!
//! let next = BuildsByRepoOption::default().after(&page);
//! assert_eq!(next.unwrap().after_number.as_deref(), Some("11"));
//! ```

use serde::{Deserialize, Serialize};

/// A collection whose items carry a sequential number usable as a cursor.
pub trait Paginated {
    /// Number of the last item in this page, if any.
    ///
    /// Returns `None` for an empty page or when the last item has no number,
    /// which means there is nothing more to fetch.
    fn last_item_number(&self) -> Option<&str>;

    /// Whether another page may follow this one.
    fn has_next(&self) -> bool {
        self.last_item_number().is_some()
    }
}

/// The `@pagination` object attached to v3 collection responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_first: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

impl Pagination {
    /// Offset to request for the following page, or `None` on the last page.
    pub fn next_offset(&self) -> Option<u32> {
        if self.is_last == Some(true) {
            return None;
        }
        self.next.as_ref().and_then(|link| link.offset)
    }
}

/// A link to a neighbouring page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(rename = "@href", default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
