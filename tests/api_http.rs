// HTTP contract tests for the two API clients, backed by a wiremock
// server. The clients are blocking, so the server is driven from a
// separate tokio runtime while the requests run on the test thread.

use refsum::api::{ApiError, PolkassemblyClient, ReferendumSource, SummaryClient, Summarizer};
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_server(rt: &Runtime) -> MockServer {
    rt.block_on(MockServer::start())
}

#[test]
fn fetches_referendum_with_expected_request_shape() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/posts/on-chain-post"))
            .and(query_param("postId", "123"))
            .and(query_param("proposalType", "referendums_v2"))
            .and(header("x-network", "polkadot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Test Referendum",
                "status": "voting",
                "tags": ["treasury", "bounty"],
                "comments_count": 5,
                "content": "This is a test referendum content"
            })))
            .expect(1)
            .mount(&server),
    );

    let client = PolkassemblyClient::new(server.uri()).unwrap();
    let referendum = client.get_referendum(123).unwrap();

    assert_eq!(referendum.title.as_deref(), Some("Test Referendum"));
    assert_eq!(referendum.status.as_deref(), Some("voting"));
    assert_eq!(referendum.tags, vec!["treasury", "bounty"]);
    assert_eq!(referendum.comments_count, 5);
    assert_eq!(
        referendum.content_text(),
        Some("This is a test referendum content")
    );
}

#[test]
fn non_success_status_is_a_status_error() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/posts/on-chain-post"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server),
    );

    let client = PolkassemblyClient::new(server.uri()).unwrap();
    let err = client.get_referendum(999).unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn summarise_sends_system_and_user_messages() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant",
                        "content": "This is a test summary of the referendum content." } }
                ]
            })))
            .expect(1)
            .mount(&server),
    );

    let client = SummaryClient::new(server.uri(), "test-key").unwrap();
    let summary = client
        .summarise("This is a detailed referendum proposal about treasury funding.")
        .unwrap();

    assert_eq!(
        summary,
        "This is a test summary of the referendum content."
    );

    let requests = rt.block_on(server.received_requests()).unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4.1");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(
        messages[1]["content"],
        "This is a detailed referendum proposal about treasury funding."
    );
    assert_eq!(body["max_tokens"], 2048);
}

#[test]
fn summarise_auth_failure_propagates() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server),
    );

    let client = SummaryClient::new(server.uri(), "").unwrap();
    let err = client.summarise("some content").unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status(status)) => assert_eq!(status.as_u16(), 401),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn summarise_empty_choices_is_an_error() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server),
    );

    let client = SummaryClient::new(server.uri(), "test-key").unwrap();
    let err = client.summarise("content").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::EmptyCompletion)
    ));
}
