//! # BlogSphere TUI
//!
//! A terminal reader for the Blog Sphere REST API.
//!
//! ## Features
//! - Paginated home feed of published posts
//! - Category and tag filters, selectable sort order
//! - Drafts feed for the logged-in author
//! - Post detail view
//! - Login and signup with a persisted session token
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use auth::{AuthState, SessionToken, TokenProvider};
pub use config::Config;
pub use error::ApiError;
pub use feed::{extract_posts, FeedKind, FeedState, FetchResult, PostsQuery, Query};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Category, Post, PostStatus, SortKey, Tag};
pub use network::{BlogClient, NetworkActor};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
