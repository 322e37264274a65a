//! End-to-end tests for the users endpoints against a mock HTTP server.
//!
//! These verify the full request path: URL construction, credential merging
//! into the query string, response deserialization, and error envelope
//! translation.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use instagram_client::{InstagramClient, InstagramErrorKind, PageParams, UserId, UserRef};

async fn test_client(server: &MockServer) -> InstagramClient {
    InstagramClient::builder()
        .base_url(server.uri())
        .access_token("test-token")
        .user_agent("instagram-client-tests/1.0")
        .build()
        .expect("client should build")
}

fn user_list_body() -> serde_json::Value {
    json!({
        "meta": { "code": 200 },
        "data": [
            { "id": "4", "username": "mikeyk", "full_name": "Mike Krieger" },
            { "id": "3", "username": "kevin", "full_name": "Kevin Systrom" }
        ],
        "pagination": { "next_cursor": "13872296" }
    })
}

fn profile_body(id: &str, username: &str) -> serde_json::Value {
    json!({
        "meta": { "code": 200 },
        "data": { "id": id, "username": username }
    })
}

#[tokio::test]
async fn follows_defaults_to_authenticated_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/follows"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.users().follows(UserId::Me).await.unwrap();

    assert_eq!(response.meta_code(), Some(200));
    assert_eq!(response.data_array().map(Vec::len), Some(2));
    assert_eq!(response.next_cursor(), Some("13872296"));
}

#[tokio::test]
async fn follows_of_user_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/4/follows"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.users().follows(4u64).await.unwrap();
}

#[tokio::test]
async fn follows_forwards_paging_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/follows"))
        .and(query_param("access_token", "test-token"))
        .and(query_param("count", "10"))
        .and(query_param("cursor", "13872296"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let params = PageParams::new().count(10).cursor("13872296");
    client
        .users()
        .follows_with_params(UserId::Me, &params)
        .await
        .unwrap();
}

#[tokio::test]
async fn followed_by_builds_expected_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/followed-by"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/4/followed-by"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.users().followed_by(UserId::Me).await.unwrap();
    client.users().followed_by(4u64).await.unwrap();
}

#[tokio::test]
async fn profile_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/16500486"))
        .and(query_param("access_token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_body("16500486", "caseyscarborough")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.users().get(16500486u64).await.unwrap();

    assert_eq!(response.data().unwrap()["username"], json!("caseyscarborough"));
}

#[tokio::test]
async fn profile_defaults_to_authenticated_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("3", "kevin")))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.users().get(UserRef::Me).await.unwrap();
    client.users().get_authenticated().await.unwrap();
}

#[tokio::test]
async fn profile_by_username_resolves_through_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "caseyscarborough"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": [
                { "id": "16500486", "username": "caseyscarborough" },
                { "id": "99", "username": "caseyscarborough_fan" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/16500486"))
        .and(query_param("access_token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_body("16500486", "caseyscarborough")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.users().get("caseyscarborough").await.unwrap();

    assert_eq!(response.data().unwrap()["id"], json!("16500486"));
}

#[tokio::test]
async fn profile_by_username_accepts_numeric_search_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": [{ "id": 16500486, "username": "caseyscarborough" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/16500486"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_body("16500486", "caseyscarborough")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.users().get("caseyscarborough").await.unwrap();
}

#[tokio::test]
async fn profile_by_unknown_username_is_user_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let error = client.users().get("ghost").await.unwrap_err();

    assert_eq!(*error.kind(), InstagramErrorKind::UserNotFound);
    assert_eq!(error.status_code(), None);
}

#[tokio::test]
async fn search_sends_query_alongside_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "jack"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": [{ "id": "66", "username": "jack" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.users().search("jack").await.unwrap();

    assert_eq!(response.data_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn search_with_params_forwards_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "jack"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client
        .users()
        .search_with_params("jack", &PageParams::new().count(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn feed_and_media_paths() {
    let server = MockServer::start().await;

    let media_body = json!({
        "meta": { "code": 200 },
        "data": [{ "id": "m1", "type": "image" }]
    });

    Mock::given(method("GET"))
        .and(path("/users/self/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/self/media/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/media/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/self/media/liked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.users().feed().await.unwrap();
    client.users().recent_media(UserId::Me).await.unwrap();
    client.users().recent_media(7u64).await.unwrap();
    client.users().liked_media().await.unwrap();
}

#[tokio::test]
async fn liked_media_forwards_max_like_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/media/liked"))
        .and(query_param("max_like_id", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client
        .users()
        .liked_media_with_params(&PageParams::new().param("max_like_id", 500))
        .await
        .unwrap();
}

#[tokio::test]
async fn caller_params_override_credential_on_collision() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/follows"))
        .and(query_param("access_token", "other-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let params = PageParams::new().param("access_token", "other-token");
    client
        .users()
        .follows_with_params(UserId::Me, &params)
        .await
        .unwrap();
}

#[tokio::test]
async fn oauth_error_envelope_maps_to_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self/feed"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "meta": {
                "code": 400,
                "error_type": "OAuthAccessTokenException",
                "error_message": "The access_token provided is invalid."
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let error = client.users().feed().await.unwrap_err();

    assert_eq!(*error.kind(), InstagramErrorKind::BadCredentials);
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(error.error_type(), Some("OAuthAccessTokenException"));
    assert!(error.to_string().contains("The access_token provided is invalid."));
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "meta": {
                "code": 404,
                "error_type": "APINotFoundError",
                "error_message": "this user does not exist"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let error = client.users().get(123u64).await.unwrap_err();

    assert_eq!(*error.kind(), InstagramErrorKind::NotFound);
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn server_error_is_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/self"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let error = client.users().get_authenticated().await.unwrap_err();

    assert_eq!(*error.kind(), InstagramErrorKind::ServiceUnavailable);
    assert!(error.is_retryable());
}
