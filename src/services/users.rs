//! Users endpoint operations.

use crate::client::InstagramClient;
use crate::errors::{InstagramError, InstagramResult};
use crate::types::ApiResponse;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::instrument;

/// Identifies the user whose lists or media are requested.
///
/// `Me` stands for the authenticated caller and renders as the API's `self`
/// path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserId {
    /// The authenticated caller.
    Me,
    /// A concrete user ID.
    Id(u64),
}

impl UserId {
    /// Path segment for this identity.
    pub fn as_segment(&self) -> Cow<'static, str> {
        match self {
            Self::Me => Cow::Borrowed("self"),
            Self::Id(id) => Cow::Owned(id.to_string()),
        }
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::Me
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

/// Reference to a user profile.
///
/// A `Username` reference cannot be placed in a request path directly; profile
/// lookup resolves it through search first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    /// The authenticated caller.
    Me,
    /// A concrete user ID.
    Id(u64),
    /// A username, resolved through search.
    Username(String),
}

impl Default for UserRef {
    fn default() -> Self {
        Self::Me
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for UserRef {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl From<String> for UserRef {
    fn from(username: String) -> Self {
        Self::Username(username)
    }
}

impl From<UserId> for UserRef {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Me => Self::Me,
            UserId::Id(id) => Self::Id(id),
        }
    }
}

/// Optional query parameters forwarded with list operations.
///
/// `cursor` and `count` get dedicated setters; anything else passes through
/// [`param`](Self::param) verbatim, unvalidated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageParams {
    cursor: Option<String>,
    count: Option<u32>,
    extra: BTreeMap<String, String>,
}

impl PageParams {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pagination cursor, as returned in a response's
    /// `pagination.next_cursor`.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Limits the number of results returned per page.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Forwards an arbitrary key/value pair.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Renders the parameters as query pairs in stable order.
    ///
    /// Dedicated fields take precedence over a pass-through pair with the
    /// same key.
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = self.extra.clone();
        if let Some(ref cursor) = self.cursor {
            pairs.insert("cursor".to_string(), cursor.clone());
        }
        if let Some(count) = self.count {
            pairs.insert("count".to_string(), count.to_string());
        }
        pairs.into_iter().collect()
    }
}

/// Extracts a path-ready ID from a search result entry.
///
/// The API serializes IDs as JSON strings, but numeric IDs are accepted too.
fn result_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Service for users endpoint operations.
pub struct UsersService<'a> {
    client: &'a InstagramClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a InstagramClient) -> Self {
        Self { client }
    }

    /// Retrieves the authenticated user's profile.
    pub async fn get_authenticated(&self) -> InstagramResult<ApiResponse> {
        self.client.get("/users/self").await
    }

    /// Retrieves a single user's profile.
    ///
    /// Accepts the authenticated caller, a user ID, or a username. A username
    /// is resolved through [`search`](Self::search) and the first result's ID
    /// is fetched; an empty result set yields a
    /// [`UserNotFound`](crate::InstagramErrorKind::UserNotFound) error.
    pub async fn get(&self, user: impl Into<UserRef>) -> InstagramResult<ApiResponse> {
        match user.into() {
            UserRef::Me => self.client.get("/users/self").await,
            UserRef::Id(id) => self.client.get(&format!("/users/{}", id)).await,
            UserRef::Username(username) => self.get_by_username(&username).await,
        }
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> InstagramResult<ApiResponse> {
        let results = self.search(username).await?;

        let id = results
            .data_array()
            .and_then(|data| data.first())
            .and_then(|user| user.get("id"))
            .and_then(result_id)
            .ok_or_else(|| {
                InstagramError::user_not_found(format!("no user matching '{}'", username))
            })?;

        self.client.get(&format!("/users/{}", id)).await
    }

    /// Searches for users by name.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> InstagramResult<ApiResponse> {
        self.client
            .get_with_query(
                "/users/search",
                &[("q".to_string(), query.to_string())],
            )
            .await
    }

    /// Searches for users by name, with extra parameters.
    pub async fn search_with_params(
        &self,
        query: &str,
        params: &PageParams,
    ) -> InstagramResult<ApiResponse> {
        let mut pairs = params.to_query();
        pairs.push(("q".to_string(), query.to_string()));
        self.client.get_with_query("/users/search", &pairs).await
    }

    /// Lists the users a given user follows.
    pub async fn follows(&self, user: impl Into<UserId>) -> InstagramResult<ApiResponse> {
        self.client
            .get(&format!("/users/{}/follows", user.into().as_segment()))
            .await
    }

    /// Lists the users a given user follows, with paging parameters.
    pub async fn follows_with_params(
        &self,
        user: impl Into<UserId>,
        params: &PageParams,
    ) -> InstagramResult<ApiResponse> {
        self.client
            .get_with_query(
                &format!("/users/{}/follows", user.into().as_segment()),
                &params.to_query(),
            )
            .await
    }

    /// Lists the users a given user is followed by.
    pub async fn followed_by(&self, user: impl Into<UserId>) -> InstagramResult<ApiResponse> {
        self.client
            .get(&format!("/users/{}/followed-by", user.into().as_segment()))
            .await
    }

    /// Lists the users a given user is followed by, with paging parameters.
    pub async fn followed_by_with_params(
        &self,
        user: impl Into<UserId>,
        params: &PageParams,
    ) -> InstagramResult<ApiResponse> {
        self.client
            .get_with_query(
                &format!("/users/{}/followed-by", user.into().as_segment()),
                &params.to_query(),
            )
            .await
    }

    /// Retrieves the authenticated user's feed.
    pub async fn feed(&self) -> InstagramResult<ApiResponse> {
        self.client.get("/users/self/feed").await
    }

    /// Retrieves the most recent media published by a user.
    pub async fn recent_media(&self, user: impl Into<UserId>) -> InstagramResult<ApiResponse> {
        self.client
            .get(&format!("/users/{}/media/recent", user.into().as_segment()))
            .await
    }

    /// Lists media the authenticated user has liked.
    pub async fn liked_media(&self) -> InstagramResult<ApiResponse> {
        self.client.get("/users/self/media/liked").await
    }

    /// Lists media the authenticated user has liked, with paging parameters.
    ///
    /// This endpoint pages on `max_like_id`, forwarded through
    /// [`PageParams::param`].
    pub async fn liked_media_with_params(
        &self,
        params: &PageParams,
    ) -> InstagramResult<ApiResponse> {
        self.client
            .get_with_query("/users/self/media/liked", &params.to_query())
            .await
    }
}
