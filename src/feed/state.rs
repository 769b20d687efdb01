//! Fetch reconciliation for one feed view

use crate::feed::extract::FetchResult;
use crate::feed::query::{FeedKind, PostsQuery, Query};
use crate::models::{Post, SortKey};

/// Query plus the last successfully fetched page of a feed.
///
/// Only the most recently issued request may update the view; completions
/// carrying any other id are stale and dropped.
#[derive(Clone, Debug)]
pub struct FeedState {
    pub kind: FeedKind,
    pub query: Query,
    /// `None` until the first successful fetch
    pub items: Option<Vec<Post>>,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Highlighted post in the list
    pub selected: usize,
    latest_request: Option<u64>,
}

impl FeedState {
    pub fn new(kind: FeedKind) -> Self {
        FeedState {
            kind,
            query: Query::for_feed(kind),
            items: None,
            total_pages: 1,
            loading: false,
            error: None,
            selected: 0,
            latest_request: None,
        }
    }

    // ========================
    // Query mutators
    // ========================

    pub fn set_page(&mut self, page: u32) -> bool {
        self.query.set_page(page)
    }

    pub fn set_category(&mut self, id: Option<&str>) -> bool {
        self.query.set_category(id)
    }

    pub fn set_tag(&mut self, id: Option<&str>) -> bool {
        self.query.set_tag(id)
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        self.query.set_sort(sort)
    }

    /// Advance one page, bounded by the last known page count
    pub fn next_page(&mut self) -> bool {
        if self.query.page >= self.total_pages {
            return false;
        }
        self.set_page(self.query.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.query.page <= 1 {
            return false;
        }
        self.set_page(self.query.page - 1)
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Start a fetch for the current query under request id `id`.
    ///
    /// Any request issued earlier becomes stale.
    pub fn begin_fetch(&mut self, id: u64, page_size: u32) -> PostsQuery {
        if let Some(previous) = self.latest_request.filter(|_| self.loading) {
            tracing::debug!(previous, id, feed = ?self.kind, "Superseding in-flight fetch");
        }
        self.latest_request = Some(id);
        self.loading = true;
        self.query.to_request(self.kind, page_size)
    }

    /// Whether `id` is the request this feed is waiting for
    pub fn is_pending(&self, id: u64) -> bool {
        self.loading && self.latest_request == Some(id)
    }

    /// Reconcile a successful fetch; returns false if the response was stale
    pub fn apply_success(&mut self, id: u64, result: FetchResult) -> bool {
        if !self.is_pending(id) {
            tracing::info!(id, feed = ?self.kind, "Discarding stale posts response");
            return false;
        }
        self.items = Some(result.items);
        self.total_pages = result.total_pages;
        self.error = None;
        self.loading = false;
        self.selected = 0;
        true
    }

    /// Reconcile a failed fetch: keep whatever is displayed, show the error
    pub fn apply_failure(&mut self, id: u64) -> bool {
        if !self.is_pending(id) {
            tracing::info!(id, feed = ?self.kind, "Discarding stale fetch failure");
            return false;
        }
        self.error = Some(self.kind.failure_message().to_string());
        self.loading = false;
        true
    }

    // ========================
    // Selection
    // ========================

    pub fn posts(&self) -> &[Post] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.posts().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.posts().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PostStatus};

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {}", id),
            content: String::new(),
            author: None,
            category: Category {
                id: "c1".into(),
                name: "General".into(),
                post_count: None,
            },
            tags: Vec::new(),
            reading_time: Some(1),
            created_at: "2024-01-01T00:00:00".into(),
            updated_at: "2024-01-01T00:00:00".into(),
            status: Some(PostStatus::Published),
        }
    }

    fn page_of(ids: &[&str], total_pages: u32) -> FetchResult {
        FetchResult {
            items: ids.iter().map(|id| post(id)).collect(),
            total_pages,
        }
    }

    #[test]
    fn test_first_page_bare_array_example() {
        let mut feed = FeedState::new(FeedKind::Home);
        let req = feed.begin_fetch(1, 10);
        assert_eq!(req.page, 1);
        assert_eq!(req.sort, "createdAt,desc");
        assert!(feed.loading);

        assert!(feed.apply_success(1, page_of(&["a", "b", "c"], 1)));
        assert_eq!(feed.posts().len(), 3);
        assert_eq!(feed.total_pages, 1);
        assert_eq!(feed.error, None);
        assert!(!feed.loading);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        feed.apply_success(1, page_of(&["a", "b"], 2));

        feed.next_page();
        feed.begin_fetch(2, 10);
        assert!(feed.apply_failure(2));
        assert_eq!(feed.posts().len(), 2);
        assert_eq!(
            feed.error.as_deref(),
            Some("Failed to load posts. Please try again later.")
        );
        assert!(!feed.loading);
    }

    #[test]
    fn test_failure_before_any_success_has_no_items() {
        let mut feed = FeedState::new(FeedKind::Drafts);
        feed.begin_fetch(7, 10);
        feed.apply_failure(7);
        assert!(feed.items.is_none());
        assert_eq!(
            feed.error.as_deref(),
            Some("Failed to load drafts. Please try again later.")
        );
    }

    #[test]
    fn test_success_clears_error() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        feed.apply_failure(1);
        feed.begin_fetch(2, 10);
        feed.apply_success(2, page_of(&["a"], 1));
        assert_eq!(feed.error, None);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        feed.set_category(Some("c2"));
        feed.begin_fetch(2, 10);

        assert!(!feed.apply_success(1, page_of(&["old"], 4)));
        assert!(feed.loading);
        assert!(feed.items.is_none());

        assert!(feed.apply_success(2, page_of(&["new"], 1)));
        assert_eq!(feed.posts()[0].id, "new");

        // A late failure for the old request changes nothing either
        assert!(!feed.apply_failure(1));
        assert_eq!(feed.error, None);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        assert!(feed.apply_success(1, page_of(&["a"], 1)));
        assert!(!feed.apply_failure(1));
        assert_eq!(feed.error, None);
    }

    #[test]
    fn test_page_navigation_bounded_by_total_pages() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        feed.apply_success(1, page_of(&["a"], 2));

        assert!(!feed.prev_page());
        assert!(feed.next_page());
        assert_eq!(feed.query.page, 2);
        assert!(!feed.next_page());
        assert!(feed.prev_page());
        assert_eq!(feed.query.page, 1);
    }

    #[test]
    fn test_selection_wraps() {
        let mut feed = FeedState::new(FeedKind::Home);
        feed.begin_fetch(1, 10);
        feed.apply_success(1, page_of(&["a", "b"], 1));
        feed.select_prev();
        assert_eq!(feed.selected_post().map(|p| p.id.as_str()), Some("b"));
        feed.select_next();
        assert_eq!(feed.selected_post().map(|p| p.id.as_str()), Some("a"));
    }
}
