//! Network messages - communication between App and Network layers

use crate::feed::{FetchResult, PostsQuery};
use crate::models::{Category, LoginRequest, Post, SignupRequest, Tag, UserDto};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch one page of a feed
    FetchPosts { id: u64, query: PostsQuery },
    /// Fetch a single post for the reading view
    FetchPost { id: u64, post_id: String },
    /// Fetch categories and tags together
    FetchTaxonomy { id: u64 },
    Login { id: u64, request: LoginRequest },
    Signup { id: u64, request: SignupRequest },
    /// Fetch the signed-in user's profile
    FetchProfile { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Posts {
        id: u64,
        result: FetchResult,
        time_ms: u64,
    },
    Post {
        id: u64,
        post: Post,
    },
    Taxonomy {
        id: u64,
        categories: Vec<Category>,
        tags: Vec<Tag>,
    },
    /// Login or signup succeeded
    Authenticated {
        id: u64,
        token: String,
    },
    Profile {
        id: u64,
        user: UserDto,
    },
    /// Any failed request
    Error {
        id: u64,
        message: String,
        /// The server answered 401
        unauthorized: bool,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Posts { id, .. } => *id,
            NetworkResponse::Post { id, .. } => *id,
            NetworkResponse::Taxonomy { id, .. } => *id,
            NetworkResponse::Authenticated { id, .. } => *id,
            NetworkResponse::Profile { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NetworkResponse::Error { unauthorized: true, .. })
    }
}
