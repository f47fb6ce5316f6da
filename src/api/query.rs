//
//  travis-client
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-string encoding for option structs.
//!
//! Option structs describe their query parameters as a table of
//! [`QueryField`]s. Each field names its parameter, carries its value (or
//! `None` when unset) and picks one [`QueryEncoding`]:
//!
//! | Encoding | Unset / empty | Scalar | List `[a, b]` |
//! |----------|---------------|--------|---------------|
//! | `OmitIfEmpty` | omitted | `k=v` | `k=a&k=b` |
//! | `CommaJoin` | omitted | `k=v` | `k=a,b` |
//! | `BracketedRepeat` | omitted | `k[]=v` | `k[]=a&k[]=b` |
//! | `Verbatim` | unset omitted, empty string or list kept (`k=`) | `k=v` | `k=a&k=b` |
//!
//! Values are `application/x-www-form-urlencoded`, so `,` and `[]` appear
//! percent-encoded on the wire.
//!
//! # Example
//!
//! ```rust
//! use travis_client::api::query::{encode_query, QueryEncoding, QueryField, QueryOptions};
//!
//! struct Search {
//!     limit: Option<u32>,
//!     include: Vec<String>,
//! }
//!
//! impl QueryOptions for Search {
//!     fn query_fields(&self) -> Vec<QueryField> {
//!         vec![
//!             QueryField::number("limit", QueryEncoding::OmitIfEmpty, self.limit),
//!             QueryField::list("include", QueryEncoding::CommaJoin, &self.include),
//!         ]
//!     }
//! }
//!
//! let query = encode_query(&Search { limit: Some(5), include: vec![] });
//! assert_eq!(query, "limit=5");
//! ```

use url::form_urlencoded::Serializer;

/// How a single option field is rendered into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Skip the field when unset or empty; lists repeat the key.
    OmitIfEmpty,
    /// Skip the field when unset or empty; lists are joined with `,`.
    CommaJoin,
    /// Skip the field when unset or empty; the key gets a `[]` suffix and
    /// lists repeat it.
    BracketedRepeat,
    /// Emit the field whenever it is set, even when the value is empty.
    Verbatim,
}

/// The value of one option field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    List(Vec<String>),
}

impl QueryValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

/// One row of an option struct's query table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    pub name: &'static str,
    pub value: Option<QueryValue>,
    pub encoding: QueryEncoding,
}

impl QueryField {
    /// A string field.
    pub fn text(name: &'static str, encoding: QueryEncoding, value: Option<&str>) -> Self {
        Self {
            name,
            value: value.map(|v| QueryValue::Text(v.to_string())),
            encoding,
        }
    }

    /// An integer field.
    pub fn number<N: ToString>(name: &'static str, encoding: QueryEncoding, value: Option<N>) -> Self {
        Self {
            name,
            value: value.map(|v| QueryValue::Text(v.to_string())),
            encoding,
        }
    }

    /// A boolean field, rendered as `true` / `false`.
    pub fn flag(name: &'static str, encoding: QueryEncoding, value: Option<bool>) -> Self {
        Self::number(name, encoding, value)
    }

    /// A list field. An empty list counts as unset, except under
    /// [`QueryEncoding::Verbatim`] where it is sent as `k=`.
    pub fn list(name: &'static str, encoding: QueryEncoding, values: &[String]) -> Self {
        Self {
            name,
            value: if values.is_empty() && encoding != QueryEncoding::Verbatim {
                None
            } else {
                Some(QueryValue::List(values.to_vec()))
            },
            encoding,
        }
    }

    fn append_to(&self, serializer: &mut Serializer<'_, String>) {
        let Some(value) = &self.value else {
            return;
        };
        if self.encoding != QueryEncoding::Verbatim && value.is_empty() {
            return;
        }

        match (self.encoding, value) {
            (QueryEncoding::BracketedRepeat, QueryValue::Text(text)) => {
                serializer.append_pair(&format!("{}[]", self.name), text);
            }
            (QueryEncoding::BracketedRepeat, QueryValue::List(items)) => {
                let key = format!("{}[]", self.name);
                for item in items {
                    serializer.append_pair(&key, item);
                }
            }
            (QueryEncoding::Verbatim, QueryValue::List(items)) if items.is_empty() => {
                serializer.append_pair(self.name, "");
            }
            (QueryEncoding::CommaJoin, QueryValue::List(items)) => {
                serializer.append_pair(self.name, &items.join(","));
            }
            (_, QueryValue::Text(text)) => {
                serializer.append_pair(self.name, text);
            }
            (_, QueryValue::List(items)) => {
                for item in items {
                    serializer.append_pair(self.name, item);
                }
            }
        }
    }
}

/// Implemented by option structs that translate into query parameters.
pub trait QueryOptions {
    /// The declarative query table for this value, in emission order.
    fn query_fields(&self) -> Vec<QueryField>;
}

/// Options accepted by single-resource lookups: which related resources to
/// embed in full (`include=build.commit,build.jobs`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeOption {
    pub include: Vec<String>,
}

impl IncludeOption {
    /// An option embedding the given resources.
    pub fn new<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
        }
    }
}

impl QueryOptions for IncludeOption {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![QueryField::list("include", QueryEncoding::CommaJoin, &self.include)]
    }
}

/// Erases an optional option struct for [`TravisClient::build_url`](crate::api::TravisClient::build_url).
pub(crate) fn as_query<T: QueryOptions>(options: Option<&T>) -> Option<&dyn QueryOptions> {
    options.map(|o| o as &dyn QueryOptions)
}

/// Renders an option struct into a query string (without the leading `?`).
pub fn encode_query(options: &dyn QueryOptions) -> String {
    let mut serializer = Serializer::new(String::new());
    for field in options.query_fields() {
        field.append_to(&mut serializer);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table(Vec<QueryField>);

    impl QueryOptions for Table {
        fn query_fields(&self) -> Vec<QueryField> {
            self.0.clone()
        }
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_omit_if_empty_drops_unset_and_empty() {
        let table = Table(vec![
            QueryField::number::<u32>("limit", QueryEncoding::OmitIfEmpty, None),
            QueryField::text("sort_by", QueryEncoding::OmitIfEmpty, Some("")),
            QueryField::list("state", QueryEncoding::OmitIfEmpty, &[]),
        ]);
        assert_eq!(encode_query(&table), "");
    }

    #[test]
    fn test_omit_if_empty_keeps_zero_when_set() {
        let table = Table(vec![QueryField::number("offset", QueryEncoding::OmitIfEmpty, Some(0))]);
        assert_eq!(encode_query(&table), "offset=0");
    }

    #[test]
    fn test_value_is_percent_encoded_once() {
        let table = Table(vec![QueryField::text(
            "branch.name",
            QueryEncoding::OmitIfEmpty,
            Some("feature/a b&c"),
        )]);
        assert_eq!(encode_query(&table), "branch.name=feature%2Fa+b%26c");
    }

    #[test]
    fn test_comma_join() {
        let table = Table(vec![QueryField::list(
            "include",
            QueryEncoding::CommaJoin,
            &items(&["build.commit", "build.jobs"]),
        )]);
        assert_eq!(encode_query(&table), "include=build.commit%2Cbuild.jobs");
    }

    #[test]
    fn test_bracketed_repeat() {
        let table = Table(vec![QueryField::list(
            "state",
            QueryEncoding::BracketedRepeat,
            &items(&["started", "passed"]),
        )]);
        assert_eq!(encode_query(&table), "state%5B%5D=started&state%5B%5D=passed");
    }

    #[test]
    fn test_repeated_keys_for_plain_lists() {
        let table = Table(vec![QueryField::list(
            "role",
            QueryEncoding::OmitIfEmpty,
            &items(&["admin", "push"]),
        )]);
        assert_eq!(encode_query(&table), "role=admin&role=push");
    }

    #[test]
    fn test_verbatim_keeps_empty_values() {
        let table = Table(vec![
            QueryField::text("slug_matches", QueryEncoding::Verbatim, Some("")),
            QueryField::text("unset", QueryEncoding::Verbatim, None),
        ]);
        assert_eq!(encode_query(&table), "slug_matches=");
    }

    #[test]
    fn test_verbatim_keeps_empty_lists() {
        let table = Table(vec![
            QueryField::list("tags", QueryEncoding::Verbatim, &[]),
            QueryField::list("state", QueryEncoding::OmitIfEmpty, &[]),
        ]);
        assert_eq!(encode_query(&table), "tags=");
    }

    #[test]
    fn test_flags() {
        let table = Table(vec![
            QueryField::flag("active", QueryEncoding::OmitIfEmpty, Some(false)),
            QueryField::flag("private", QueryEncoding::OmitIfEmpty, Some(true)),
        ]);
        assert_eq!(encode_query(&table), "active=false&private=true");
    }
}
