//! BlogSphere REST client - explicitly constructed, no global state

use std::sync::Arc;

use futures_util::future::try_join;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::constants::APP_VERSION;
use crate::error::{ApiError, Result};
use crate::feed::{extract_posts, FetchResult, PostsQuery};
use crate::models::{
    ApiErrorBody, AuthResponse, Category, LoginRequest, Post, SignupRequest, Tag, UserDto,
};

const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Thin wrapper over `reqwest` for the BlogSphere API.
///
/// The bearer token is read from the `TokenProvider` on every request, so a
/// login or logout takes effect without rebuilding the client.
#[derive(Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl BlogClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Self {
        BlogClient {
            http: create_http_client(config),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach JSON accept header and bearer token
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map non-2xx statuses to `ApiError`
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let resp = self.authorize(builder).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| UNEXPECTED_ERROR.to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send(builder).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // ========================
    // Posts
    // ========================

    /// `GET /posts`, normalized to one page of results
    pub async fn get_posts(&self, query: &PostsQuery) -> Result<FetchResult> {
        let builder = self.http.get(self.url("/posts")).query(query);
        let body: serde_json::Value = self.read_json(builder).await?;
        Ok(extract_posts(body)?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        self.read_json(self.http.get(self.url(&format!("/posts/{}", id))))
            .await
    }

    // ========================
    // Taxonomy
    // ========================

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.read_json(self.http.get(self.url("/categories"))).await
    }

    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        self.read_json(self.http.get(self.url("/tags"))).await
    }

    /// Categories and tags, fetched concurrently; fails if either fails
    pub async fn get_taxonomy(&self) -> Result<(Vec<Category>, Vec<Tag>)> {
        try_join(self.get_categories(), self.get_tags()).await
    }

    // ========================
    // Auth
    // ========================

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.read_json(self.http.post(self.url("/auth/login")).json(credentials))
            .await
    }

    pub async fn signup(&self, credentials: &SignupRequest) -> Result<AuthResponse> {
        self.read_json(self.http.post(self.url("/auth/signup")).json(credentials))
            .await
    }

    pub async fn get_user_profile(&self) -> Result<UserDto> {
        self.read_json(self.http.get(self.url("/auth/me"))).await
    }
}

/// Create an HTTP client from configuration
pub fn create_http_client(config: &Config) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(format!("blogsphere-tui/{}", APP_VERSION))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
