//! Feed layer - query composition, response normalization and fetch reconciliation
//!
//! Pure state, no I/O: the App layer drives it and the Network layer
//! executes the `PostsQuery` values it produces.

pub mod extract;
pub mod query;
pub mod state;

pub use extract::{extract_posts, FetchResult};
pub use query::{FeedKind, PostsQuery, Query};
pub use state::FeedState;
