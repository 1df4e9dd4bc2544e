//! HTTP implementation of [`Backend`]
//!
//! JSON over HTTP against a single configured origin. Every request carries the
//! configured timeout; a bearer credential is attached when one is available.

use super::Backend;
use async_trait::async_trait;
use readwise_common::config::ClientConfig;
use readwise_common::models::{
    Book, BookAction, CommentCount, DiversifyResponse, LikeRequest, LikeStatus, LikedPost,
    NewComment, NewThread, OnboardStatus, OnboardStatusRequest, OnboardingSubmission,
    PostDetail, Profile, RecommendationPage, RecommendationRequest, SearchQuery,
    SearchResponse, Thread,
};
use readwise_common::{Error, Identity, RefId, Result};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("readwise-client/", env!("CARGO_PKG_VERSION"));

/// REST client for the book/review backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credential: config.session_token.clone(),
        })
    }

    /// Replace the bearer credential (e.g. one supplied by the session)
    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        if credential.is_some() {
            self.credential = credential;
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Backend request");

        let builder = self.http.request(method, url);
        match &self.credential {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self.request(Method::GET, path).query(query);
        decode(send(builder, path).await?, path).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).json(body);
        decode(send(builder, path).await?, path).await
    }

    /// Send a mutation whose response body is not needed
    async fn send_ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let builder = self.request(method, path).json(body);
        send(builder, path).await?;
        Ok(())
    }
}

/// Send and map transport failures and non-success statuses
async fn send(builder: RequestBuilder, path: &str) -> Result<reqwest::Response> {
    let response = builder.send().await.map_err(|e| {
        warn!(path = %path, "Backend unreachable: {}", e);
        Error::Network(e.to_string())
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    warn!(path = %path, status = status.as_u16(), "Backend error: {}", message);

    Err(Error::Http {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(path = %path, "Unexpected response shape: {}", e);
        Error::MalformedResponse(format!("{}: {}", path, e))
    })
}

/// Pull `error` or `message` out of a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[async_trait]
impl Backend for ApiClient {
    async fn onboard_status(&self, user: &Identity) -> Result<bool> {
        let body = OnboardStatusRequest {
            user_id: user.to_string(),
        };
        let status: OnboardStatus = self.post_json("/users/onboardStatus", &body).await?;
        Ok(status.onboarded)
    }

    async fn complete_onboarding(&self, submission: &OnboardingSubmission) -> Result<()> {
        self.send_ack(Method::POST, "/users/completeOnboarding", submission)
            .await
    }

    async fn interests(&self, user: &Identity) -> Result<Vec<String>> {
        self.get_json(&format!("/users/{}/interests", user), &[])
            .await
    }

    async fn preferred_authors(&self, user: &Identity) -> Result<Vec<RefId>> {
        self.get_json(&format!("/users/{}/preferences", user), &[])
            .await
    }

    async fn read_list(&self, user: &Identity) -> Result<Vec<RefId>> {
        self.get_json(&format!("/users/{}/read-list", user), &[])
            .await
    }

    async fn liked_books(&self, user: &Identity) -> Result<Vec<RefId>> {
        self.get_json(&format!("/users/{}/book-likes", user), &[])
            .await
    }

    async fn recommend_with_reviews(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationPage> {
        self.post_json("/recommend_with_reviews", request).await
    }

    async fn diversify_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<DiversifyResponse> {
        self.post_json("/diversify_recommendations", request).await
    }

    async fn books_by_ids(&self, ids: &[RefId]) -> Result<Vec<Book>> {
        self.post_json("/books/multiple", &json!({ "bookIds": ids }))
            .await
    }

    async fn search_books(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.get_json("/books/search", &query.to_query_pairs()).await
    }

    async fn book(&self, id: &RefId) -> Result<Book> {
        self.get_json(&format!("/books/{}", id), &[]).await
    }

    async fn book_threads(&self, id: &RefId) -> Result<Vec<Thread>> {
        self.get_json("/threads", &[("book_id", id.to_string())])
            .await
    }

    async fn rentals(&self, user: &Identity) -> Result<Vec<Book>> {
        self.get_json(&format!("/users/{}/rentals", user), &[])
            .await
    }

    async fn purchases(&self, user: &Identity) -> Result<Vec<Book>> {
        self.get_json(&format!("/users/{}/purchases", user), &[])
            .await
    }

    async fn rent(&self, user: &Identity, book: &RefId) -> Result<()> {
        let body = BookAction {
            book_id: book.clone(),
        };
        self.send_ack(Method::POST, &format!("/users/{}/rent", user), &body)
            .await
    }

    async fn purchase(&self, user: &Identity, book: &RefId) -> Result<()> {
        let body = BookAction {
            book_id: book.clone(),
        };
        self.send_ack(Method::POST, &format!("/users/{}/purchase", user), &body)
            .await
    }

    async fn like_status(&self, user: &Identity, book: &RefId) -> Result<bool> {
        let status: LikeStatus = self
            .get_json(
                "/users/likedBook/status",
                &[("userId", user.to_string()), ("bookId", book.to_string())],
            )
            .await?;
        Ok(status.is_liked)
    }

    async fn like(&self, request: &LikeRequest) -> Result<()> {
        self.send_ack(Method::POST, "/users/likedBook", request)
            .await
    }

    async fn unlike(&self, request: &LikeRequest) -> Result<()> {
        self.send_ack(Method::DELETE, "/users/likedBook", request)
            .await
    }

    async fn comment_count(&self, scoped_id: &str) -> Result<u32> {
        let count: CommentCount = self
            .get_json("/getCommentCount", &[("id", scoped_id.to_string())])
            .await?;
        Ok(count.count)
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<()> {
        self.send_ack(Method::POST, "/postComment", comment).await
    }

    async fn post_with_comments(&self, scoped_id: &str) -> Result<PostDetail> {
        self.get_json(&format!("/getComments/{}", scoped_id), &[])
            .await
    }

    async fn post_by_id(&self, thread_id: &str) -> Result<PostDetail> {
        self.post_json("/getPostById", &json!({ "threadId": thread_id }))
            .await
    }

    async fn create_thread(&self, thread: &NewThread) -> Result<()> {
        self.send_ack(Method::POST, "/threads", thread).await
    }

    async fn profile(&self, user: &Identity) -> Result<Profile> {
        self.get_json(&format!("/users/profile/{}", user), &[])
            .await
    }

    async fn user_threads(&self, user: &Identity) -> Result<Vec<Thread>> {
        self.get_json(&format!("/users/{}/threads", user), &[])
            .await
    }

    async fn liked_posts(&self, user: &Identity) -> Result<Vec<LikedPost>> {
        self.get_json(&format!("/users/{}/liked-posts", user), &[])
            .await
    }

    async fn book_history(&self, user: &Identity) -> Result<Vec<Book>> {
        self.get_json(&format!("/users/{}/book-history", user), &[])
            .await
    }
}
