//! ApiClient integration tests against an in-process mock backend

mod helpers;

use helpers::spawn_mock_backend;
use readwise_client::{ApiClient, Backend};
use readwise_common::config::ClientConfig;
use readwise_common::models::{
    FeedItem, LikeRequest, RecommendationRequest, SearchQuery, SearchSort,
};
use readwise_common::route::PostKindTag;
use readwise_common::{Error, Identity, RefId};
use serde_json::json;

fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 1,
        ..Default::default()
    };
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_onboard_status_round_trip() {
    // Given: a mock backend
    let (url, mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    // When: checking two identities
    let existing = client.onboard_status(&Identity::new("user_1")).await.unwrap();
    let fresh = client.onboard_status(&Identity::new("new_user")).await.unwrap();

    // Then: the body carries userId and the flag is decoded
    assert!(existing);
    assert!(!fresh);
    assert_eq!(
        mock.last_request("POST /users/onboardStatus"),
        Some(json!({"userId": "new_user"}))
    );
}

#[tokio::test]
async fn test_http_error_carries_status_and_message() {
    let (url, _mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let err = client
        .onboard_status(&Identity::new("banned"))
        .await
        .unwrap_err();

    match &err {
        Error::Http { status, message } => {
            assert_eq!(*status, 403);
            assert_eq!(message, "Account suspended");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn test_non_json_error_body_uses_reason() {
    let (url, _mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let err = client
        .rent(&Identity::new("u1"), &RefId::from(5))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Http { status: 500, ref message } if message == "Internal Server Error"
    ));
}

#[tokio::test]
async fn test_malformed_response_shape() {
    let (url, _mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let err = client.interests(&Identity::new("broken")).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));

    let ok = client.interests(&Identity::new("u1")).await.unwrap();
    assert_eq!(ok, vec!["fantasy", "history"]);
}

#[tokio::test]
async fn test_network_error_when_unreachable() {
    // Port 9 (discard) on loopback is not listening in test environments
    let client = client_for("http://127.0.0.1:9");
    let err = client.interests(&Identity::new("u1")).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_timeout_maps_to_network_error() {
    let (url, _mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let err = client.book(&RefId::from("slow")).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_recommendation_request_wire_form() {
    let (url, mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let request = RecommendationRequest {
        user_id: "u1".to_string(),
        interests: vec!["fantasy".to_string()],
        read_books: vec![RefId::from(3)],
        preferred_authors: vec![RefId::from("3389")],
        liked_books: Vec::new(),
        page_number: 2,
        page_size: 15,
    };
    let page = client.recommend_with_reviews(&request).await.unwrap();

    assert!(page.is_next);
    assert!(matches!(page.recommended[0], FeedItem::Fallback(_)));
    assert_eq!(
        mock.last_request("POST /recommend_with_reviews"),
        Some(json!({
            "user_id": "u1",
            "interests": ["fantasy"],
            "read_books": [3],
            "preferred_authors": ["3389"],
            "liked_books": [],
            "pageNumber": 2,
            "pageSize": 15
        }))
    );
}

#[tokio::test]
async fn test_like_and_unlike_methods() {
    let (url, mock) = spawn_mock_backend().await;
    let client = client_for(&url);
    let request = LikeRequest {
        user_id: "u1".to_string(),
        post_id: "s1".to_string(),
        post_type: PostKindTag::Review,
        book_id: RefId::from("42"),
    };

    client.like(&request).await.unwrap();
    client.unlike(&request).await.unwrap();

    let expected = json!({"userId": "u1", "postId": "s1", "postType": "review", "bookId": "42"});
    assert_eq!(mock.last_request("POST /users/likedBook"), Some(expected.clone()));
    assert_eq!(mock.last_request("DELETE /users/likedBook"), Some(expected));
}

#[tokio::test]
async fn test_comment_count_query() {
    let (url, mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let count = client.comment_count("thread_t1").await.unwrap();

    assert_eq!(count, 4);
    assert_eq!(
        mock.last_request("GET /getCommentCount"),
        Some(json!({"id": "thread_t1"}))
    );
}

#[tokio::test]
async fn test_search_query_omits_defaults() {
    let (url, mock) = spawn_mock_backend().await;
    let client = client_for(&url);

    let response = client
        .search_books(&SearchQuery {
            text: "dune".to_string(),
            page: 1,
            limit: 12,
            genres: None,
            year_min: Some(1960),
            year_max: None,
            sort: SearchSort::Relevance,
        })
        .await
        .unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.books[0].authors_names, vec!["Frank Herbert"]);
    assert_eq!(
        mock.last_request("GET /books/search"),
        Some(json!({"q": "dune", "page": "1", "limit": "12", "year_min": "1960"}))
    );
}

#[tokio::test]
async fn test_bearer_credential_attached() {
    let (url, mock) = spawn_mock_backend().await;

    let anonymous = client_for(&url);
    anonymous.comment_count("book_1").await.unwrap();

    let authed = client_for(&url).with_credential(Some("tok_123".to_string()));
    authed.comment_count("book_1").await.unwrap();

    assert_eq!(
        mock.authorization_headers(),
        vec![None, Some("Bearer tok_123".to_string())]
    );
}
