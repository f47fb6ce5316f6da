//
//  travis-client
//  tests/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::collections::HashMap;
use std::fmt::Debug;
use std::net::SocketAddr;
use std::time::Duration;

use mockito::{Matcher, Server};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use travis_client::api::resources::builds::Build;
use travis_client::api::{ApiError, CancelReason, Context, TravisClient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Payload {
    name: String,
}

async fn client_for(server: &Server) -> TravisClient {
    TravisClient::new(&server.url(), None).unwrap()
}

#[tokio::test]
async fn test_execute_decodes_success_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/build/1")
        .match_header("travis-api-version", "3")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"number":"1","state":"created","duration":10}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = client
        .new_request(Method::GET, "build/1", None::<&()>, None)
        .unwrap();
    let mut build: Option<Build> = None;
    let response = client
        .execute(&Context::background(), request, &mut build)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        build,
        Some(Build {
            id: Some(1),
            number: Some("1".to_string()),
            state: Some("created".to_string()),
            duration: Some(10),
            ..Default::default()
        })
    );
}

#[tokio::test]
async fn test_error_status_leaves_destination_untouched() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repo/404")
        .with_status(404)
        .with_body(r#"{"error_type":"not_found","error_message":"repository not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = client
        .new_request(Method::GET, "repo/404", None::<&()>, None)
        .unwrap();
    let sentinel = Payload {
        name: "untouched".to_string(),
    };
    let mut destination = Some(sentinel.clone());
    let err = client
        .execute(&Context::background(), request, &mut destination)
        .await
        .unwrap_err();

    assert_eq!(destination, Some(sentinel));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ApiError::Status(resp) => {
            assert_eq!(resp.method, Method::GET);
            assert_eq!(resp.message, "repository not found");
            assert_eq!(resp.error_type.as_deref(), Some("not_found"));
            assert!(resp.to_string().starts_with("GET http://"));
            assert!(resp.to_string().ends_with(": 404 repository not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/user")
        .with_status(502)
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client
        .user()
        .current(&Context::background())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    match err {
        ApiError::Status(resp) => assert_eq!(resp.message, ""),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_success_body_leaves_option_destination() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/nothing")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = client
        .new_request(Method::POST, "nothing", None::<&()>, None)
        .unwrap();
    let mut destination: Option<Payload> = None;
    client
        .execute(&Context::background(), request, &mut destination)
        .await
        .unwrap();
    assert!(destination.is_none());
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/build/2")
        .with_status(200)
        .with_body("{not json")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client
        .builds()
        .find(&Context::background(), 2, None)
        .await
        .unwrap_err();
    match err {
        ApiError::Decode { response, .. } => assert_eq!(response.status, StatusCode::OK),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_raw_destination_gets_bytes_verbatim() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/job/7/log.txt")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("$ make test\nok\n")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = client
        .new_request(Method::GET, "job/7/log.txt", None::<&()>, None)
        .unwrap();
    let mut raw: Vec<u8> = Vec::new();
    client
        .execute(&Context::background(), request, &mut raw)
        .await
        .unwrap();
    assert_eq!(raw, b"$ make test\nok\n");
}

#[tokio::test]
async fn test_request_body_round_trips_through_server() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/echo")
        .match_body(Matcher::Exact("{\"name\":\"travis\"}\n".to_string()))
        .with_status(200)
        .with_body_from_request(|request| request.body().map(|b| b.to_vec()).unwrap_or_default())
        .create_async()
        .await;

    let client = client_for(&server).await;
    let sent = Payload {
        name: "travis".to_string(),
    };
    let request = client
        .new_request(Method::POST, "echo", Some(&sent), None)
        .unwrap();
    let mut received: Option<Payload> = None;
    client
        .execute(&Context::background(), request, &mut received)
        .await
        .unwrap();
    assert_eq!(received, Some(sent));
}

#[tokio::test]
async fn test_token_and_extra_headers_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "token abc")
        .match_header("user-agent", "custom-agent")
        .with_status(200)
        .with_body(r#"{"id":1,"login":"octocat"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server).await;
    client.set_token("abc").unwrap();

    let mut extra = HashMap::new();
    extra.insert("user-agent".to_string(), "custom-agent".to_string());
    let request = client
        .new_request(Method::GET, "user", None::<&()>, Some(&extra))
        .unwrap();
    client
        .execute(&Context::background(), request, &mut ())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_context_beats_network_error() {
    // nothing listens on port 1
    let client = TravisClient::new("http://127.0.0.1:1/", None).unwrap();
    let (ctx, handle) = Context::with_cancel();
    handle.cancel();

    let request = client
        .new_request(Method::GET, "build/1", None::<&()>, None)
        .unwrap();
    let err = client.execute(&ctx, request, &mut ()).await.unwrap_err();
    assert!(matches!(err, ApiError::Cancelled(CancelReason::Canceled)));
}

#[tokio::test]
async fn test_expired_deadline_is_reported() {
    let client = TravisClient::new("http://127.0.0.1:1/", None).unwrap();
    let ctx = Context::background().with_timeout(Duration::ZERO);

    let err = client
        .builds()
        .find(&ctx, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Cancelled(CancelReason::DeadlineExceeded)
    ));
}

/// Accepts connections and never answers them.
async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

#[tokio::test]
async fn test_cancel_interrupts_request_in_flight() {
    let addr = silent_server().await;
    let client = TravisClient::new(&format!("http://{addr}/"), None).unwrap();
    let (ctx, handle) = Context::with_cancel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let request = client
        .new_request(Method::GET, "build/1", None::<&()>, None)
        .unwrap();
    let mut build: Option<Build> = None;
    let err = tokio::time::timeout(
        Duration::from_secs(5),
        client.execute(&ctx, request, &mut build),
    )
    .await
    .expect("execute did not observe the cancel")
    .unwrap_err();

    assert!(matches!(err, ApiError::Cancelled(CancelReason::Canceled)));
    assert!(build.is_none());
}

#[tokio::test]
async fn test_deadline_interrupts_request_in_flight() {
    let addr = silent_server().await;
    let client = TravisClient::new(&format!("http://{addr}/"), None).unwrap();
    let ctx = Context::background().with_timeout(Duration::from_millis(50));

    let err = tokio::time::timeout(Duration::from_secs(5), client.builds().find(&ctx, 1, None))
        .await
        .expect("execute did not observe the deadline")
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Cancelled(CancelReason::DeadlineExceeded)
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let client = TravisClient::new("http://127.0.0.1:1/", None).unwrap();
    let err = client
        .builds()
        .find(&Context::background(), 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.is_retryable());
}

/// Encodes `value` as a request body and decodes it back.
fn round_trip<T>(client: &TravisClient, value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let request = client
        .new_request(Method::PUT, "echo", Some(value), None)
        .unwrap();
    let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();

    assert_eq!(bytes.last(), Some(&b'\n'));
    let decoded: T = serde_json::from_slice(bytes).unwrap();
    assert_eq!(&decoded, value);
}

#[test]
fn test_dto_round_trips_through_request_encoder() {
    use chrono::{DateTime, Utc};
    use travis_client::api::common::Metadata;
    use travis_client::api::resources::branches::MinimalBranch;
    use travis_client::api::resources::commits::Commit;
    use travis_client::api::resources::repositories::{MinimalRepository, Repository};

    let client = TravisClient::com(None).unwrap();

    round_trip(
        &client,
        &Repository {
            metadata: Metadata {
                resource_type: Some("repository".to_string()),
                ..Default::default()
            },
            id: Some(42),
            slug: Some("octo/cat".to_string()),
            description: None,
            active: Some(false),
            default_branch: Some(MinimalBranch {
                name: Some("main".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        },
    );

    let started_at: DateTime<Utc> = "2015-10-15T22:10:36Z".parse().unwrap();
    round_trip(
        &client,
        &Build {
            id: Some(7),
            number: Some("7".to_string()),
            state: Some("passed".to_string()),
            duration: Some(0),
            pull_request_number: None,
            started_at: Some(started_at),
            finished_at: None,
            private: Some(false),
            repository: Some(MinimalRepository {
                id: Some(42),
                slug: Some("octo/cat".to_string()),
                ..Default::default()
            }),
            commit: Some(Commit {
                sha: Some("a1b2c3".to_string()),
                message: None,
                ..Default::default()
            }),
            jobs: None,
            ..Default::default()
        },
    );
}

#[test]
fn test_bodies_round_trip_through_request_encoder() {
    use travis_client::api::resources::crons::CronBody;
    use travis_client::api::resources::env_vars::EnvVarBody;
    use travis_client::api::resources::key_pair::KeyPairBody;
    use travis_client::api::resources::requests::RequestBody;
    use travis_client::api::resources::settings::{SettingBody, SettingValue};

    let client = TravisClient::com(None).unwrap();

    round_trip(
        &client,
        &EnvVarBody {
            name: Some("TOKEN".to_string()),
            value: Some("".to_string()),
            public: Some(false),
            branch: None,
        },
    );
    round_trip(&client, &EnvVarBody::default());

    round_trip(
        &client,
        &CronBody {
            interval: Some("daily".to_string()),
            dont_run_if_recent_build_exists: Some(false),
        },
    );
    round_trip(
        &client,
        &CronBody {
            interval: Some("weekly".to_string()),
            dont_run_if_recent_build_exists: None,
        },
    );

    round_trip(
        &client,
        &SettingBody {
            value: Some(SettingValue::Number(0)),
        },
    );
    round_trip(
        &client,
        &SettingBody {
            value: Some(SettingValue::Flag(true)),
        },
    );
    round_trip(&client, &SettingBody { value: None });

    round_trip(
        &client,
        &KeyPairBody {
            description: Some("deploy key".to_string()),
            value: None,
        },
    );

    round_trip(
        &client,
        &RequestBody {
            message: Some("nightly".to_string()),
            branch: None,
            config: Some(serde_json::json!({"script": "make test", "env": ["A=1"]})),
        },
    );
    round_trip(
        &client,
        &RequestBody {
            message: None,
            branch: Some("master".to_string()),
            config: Some(serde_json::Value::Null),
        },
    );
}
