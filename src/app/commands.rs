//! Command handlers - business logic for processing UI events

use crate::app::state::{AuthMode, FormField, LoginForm, PostView};
use crate::app::AppState;
use crate::auth::AuthState;
use crate::feed::{FeedKind, FeedState};
use crate::messages::ui_events::AppView;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{LoginRequest, SignupRequest};

const TAXONOMY_ERROR: &str = "Failed to load categories or tags.";
const POST_ERROR: &str = "Failed to load post. Please try again later.";
const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

impl AppState {
    // ========================
    // Startup
    // ========================

    /// Initial fetches: categories and tags, the home feed, and the profile
    /// when a stored token exists
    pub fn startup(&mut self) -> Vec<NetworkCommand> {
        let mut commands = vec![self.fetch_taxonomy(), self.fetch_feed(FeedKind::Home)];
        if self.session.is_present() {
            commands.push(self.fetch_profile());
        }
        commands
    }

    fn fetch_taxonomy(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_taxonomy_id = Some(id);
        NetworkCommand::FetchTaxonomy { id }
    }

    fn fetch_profile(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_profile_id = Some(id);
        NetworkCommand::FetchProfile { id }
    }

    /// Issue a fetch for the current query of `kind`, superseding any in flight
    fn fetch_feed(&mut self, kind: FeedKind) -> NetworkCommand {
        let id = self.next_id();
        let page_size = self.page_size;
        let query = self.feed_mut(kind).begin_fetch(id, page_size);
        NetworkCommand::FetchPosts { id, query }
    }

    /// Apply `change` to the active feed and fetch if the query changed
    fn update_active_feed<F>(&mut self, change: F) -> Option<NetworkCommand>
    where
        F: FnOnce(&mut FeedState) -> bool,
    {
        let kind = self.active_feed()?.kind;
        if change(self.feed_mut(kind)) {
            Some(self.fetch_feed(kind))
        } else {
            None
        }
    }

    // ========================
    // View navigation
    // ========================

    /// Switch to the home feed; a fresh feed is mounted when coming from another view
    pub fn show_home(&mut self) -> Option<NetworkCommand> {
        if self.view == AppView::Home {
            return None;
        }
        self.view = AppView::Home;
        self.home = FeedState::new(FeedKind::Home);
        Some(self.fetch_feed(FeedKind::Home))
    }

    /// Switch to drafts; without a session this goes to the login form
    pub fn show_drafts(&mut self) -> Option<NetworkCommand> {
        if !self.session.is_present() {
            self.notice = Some("Log in to see your drafts".to_string());
            self.show_login();
            return None;
        }
        if self.view == AppView::Drafts {
            return None;
        }
        self.view = AppView::Drafts;
        self.drafts = FeedState::new(FeedKind::Drafts);
        Some(self.fetch_feed(FeedKind::Drafts))
    }

    pub fn show_login(&mut self) {
        if self.view == AppView::Login {
            return;
        }
        if self.auth.is_authenticated() {
            self.notice = Some(format!(
                "Already logged in as {}",
                self.auth.user_name().unwrap_or_default()
            ));
            return;
        }
        self.login = LoginForm::default();
        self.view = AppView::Login;
    }

    /// Leave the post or login view
    pub fn back(&mut self) -> Option<NetworkCommand> {
        match self.view {
            AppView::Post => {
                self.view = self.post.return_to;
                self.post.pending_request_id = None;
                None
            }
            AppView::Login => {
                self.login = LoginForm::default();
                self.show_home()
            }
            _ => None,
        }
    }

    pub fn logout(&mut self) -> Option<NetworkCommand> {
        if !self.session.is_present() {
            return None;
        }
        tracing::info!("Logging out");
        self.end_session();
        self.notice = Some("Logged out".to_string());
        self.show_login();
        None
    }

    /// Forget token, user and drafts
    fn end_session(&mut self) {
        self.session.clear();
        self.auth = AuthState::default();
        self.pending_profile_id = None;
        self.drafts = FeedState::new(FeedKind::Drafts);
    }

    // ========================
    // Feed list
    // ========================

    pub fn select_next(&mut self) {
        if let Some(feed) = self.active_feed_mut() {
            feed.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(feed) = self.active_feed_mut() {
            feed.select_prev();
        }
    }

    pub fn next_page(&mut self) -> Option<NetworkCommand> {
        self.update_active_feed(|feed| feed.next_page())
    }

    pub fn prev_page(&mut self) -> Option<NetworkCommand> {
        self.update_active_feed(|feed| feed.prev_page())
    }

    pub fn cycle_sort(&mut self) -> Option<NetworkCommand> {
        self.update_active_feed(|feed| {
            let next = feed.query.sort.next();
            feed.set_sort(next)
        })
    }

    /// Re-issue the current query; the way out of a failed fetch.
    /// Categories and tags are retried too if they failed to load.
    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        let Some(kind) = self.active_feed().map(|f| f.kind) else {
            return Vec::new();
        };
        let mut commands = vec![self.fetch_feed(kind)];
        let retry_taxonomy = self.taxonomy_error.is_some() && self.pending_taxonomy_id.is_none();
        if kind == FeedKind::Home && retry_taxonomy {
            self.taxonomy_error = None;
            commands.push(self.fetch_taxonomy());
        }
        commands
    }

    pub fn open_post(&mut self) -> Option<NetworkCommand> {
        let feed = self.active_feed()?;
        let preview = feed.selected_post()?.clone();
        let return_to = self.view;

        let id = self.next_id();
        let post_id = preview.id.clone();
        self.post = PostView {
            post: Some(preview),
            loading: true,
            error: None,
            scroll: 0,
            return_to,
            pending_request_id: Some(id),
        };
        self.view = AppView::Post;
        Some(NetworkCommand::FetchPost { id, post_id })
    }

    // ========================
    // Home filters
    // ========================

    /// Index of the selected category tab; 0 is "All Posts"
    fn category_tab(&self) -> usize {
        self.home
            .query
            .category
            .as_deref()
            .and_then(|id| self.categories.iter().position(|c| c.id == id))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn select_category_tab(&mut self, tab: usize) -> Option<NetworkCommand> {
        let id = tab
            .checked_sub(1)
            .and_then(|i| self.categories.get(i))
            .map(|c| c.id.clone());
        self.update_active_feed(|feed| feed.set_category(id.as_deref()))
    }

    pub fn next_category(&mut self) -> Option<NetworkCommand> {
        if self.view != AppView::Home {
            return None;
        }
        let tabs = self.categories.len() + 1;
        let tab = (self.category_tab() + 1) % tabs;
        self.select_category_tab(tab)
    }

    pub fn prev_category(&mut self) -> Option<NetworkCommand> {
        if self.view != AppView::Home {
            return None;
        }
        let tabs = self.categories.len() + 1;
        let tab = self.category_tab().checked_sub(1).unwrap_or(tabs - 1);
        self.select_category_tab(tab)
    }

    pub fn all_categories(&mut self) -> Option<NetworkCommand> {
        if self.view != AppView::Home {
            return None;
        }
        self.select_category_tab(0)
    }

    pub fn next_tag(&mut self) {
        if !self.tags.is_empty() {
            self.tag_cursor = (self.tag_cursor + 1) % self.tags.len();
        }
    }

    pub fn prev_tag(&mut self) {
        if !self.tags.is_empty() {
            self.tag_cursor = self.tag_cursor.checked_sub(1).unwrap_or(self.tags.len() - 1);
        }
    }

    /// Toggle the tag under the cursor as the tag filter
    pub fn toggle_tag(&mut self) -> Option<NetworkCommand> {
        if self.view != AppView::Home {
            return None;
        }
        let id = self.tags.get(self.tag_cursor)?.id.clone();
        self.update_active_feed(|feed| feed.set_tag(Some(&id)))
    }

    // ========================
    // Post view
    // ========================

    pub fn scroll_up(&mut self) {
        self.post.scroll = self.post.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.post.scroll = self.post.scroll.saturating_add(1);
    }

    // ========================
    // Login form
    // ========================

    pub fn form_char(&mut self, c: char) {
        if !self.login.is_submitting() {
            self.login.current_input_mut().push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if !self.login.is_submitting() {
            self.login.current_input_mut().pop();
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.login.fields();
        let pos = fields.iter().position(|f| *f == self.login.field).unwrap_or(0);
        self.login.field = fields[(pos + 1) % fields.len()];
    }

    pub fn toggle_auth_mode(&mut self) {
        self.login.mode = match self.login.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        if !self.login.fields().contains(&self.login.field) {
            self.login.field = FormField::Email;
        }
        self.login.error = None;
    }

    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.login.is_submitting() {
            return None;
        }
        let email = self.login.email.trim().to_string();
        let name = self.login.name.trim().to_string();
        let password = self.login.password.clone();

        let missing = email.is_empty()
            || password.is_empty()
            || (self.login.mode == AuthMode::Signup && name.is_empty());
        if missing {
            self.login.error = Some("Please fill in all fields".to_string());
            return None;
        }

        self.login.error = None;
        let id = self.next_id();
        self.login.pending_request_id = Some(id);
        Some(match self.login.mode {
            AuthMode::Login => NetworkCommand::Login {
                id,
                request: LoginRequest { email, password },
            },
            AuthMode::Signup => NetworkCommand::Signup {
                id,
                request: SignupRequest {
                    name,
                    email,
                    password,
                },
            },
        })
    }

    // ========================
    // Response handling
    // ========================

    /// Reconcile a network response; may yield follow-up commands
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        let mut commands = Vec::new();
        match response {
            NetworkResponse::Posts { id, result, time_ms } => {
                let applied = if self.home.is_pending(id) {
                    self.home.apply_success(id, result)
                } else {
                    self.drafts.apply_success(id, result)
                };
                if applied {
                    tracing::info!(id, time_ms, "Feed updated");
                }
            }
            NetworkResponse::Post { id, post } => {
                if self.post.pending_request_id == Some(id) {
                    self.post.post = Some(post);
                    self.post.loading = false;
                    self.post.error = None;
                    self.post.pending_request_id = None;
                }
            }
            NetworkResponse::Taxonomy { id, categories, tags } => {
                if self.pending_taxonomy_id == Some(id) {
                    self.pending_taxonomy_id = None;
                    self.categories = categories;
                    self.tags = tags;
                    self.tag_cursor = self.tag_cursor.min(self.tags.len().saturating_sub(1));
                    self.taxonomy_error = None;
                }
            }
            NetworkResponse::Authenticated { id, token } => {
                if self.login.pending_request_id == Some(id) {
                    tracing::info!("Authenticated");
                    self.session.set(&token);
                    self.auth.has_token = true;
                    self.login = LoginForm::default();
                    commands.push(self.fetch_profile());
                    commands.extend(self.show_home());
                }
            }
            NetworkResponse::Profile { id, user } => {
                if self.pending_profile_id == Some(id) {
                    self.pending_profile_id = None;
                    self.notice = Some(format!("Logged in as {}", user.name));
                    self.auth.user = Some(user);
                }
            }
            NetworkResponse::Error {
                id,
                message,
                unauthorized,
                ..
            } => self.handle_error(id, message, unauthorized),
        }
        commands
    }

    fn handle_error(&mut self, id: u64, message: String, unauthorized: bool) {
        // A rejected login is a form error, not an expired session
        if self.login.pending_request_id == Some(id) {
            self.login.pending_request_id = None;
            self.login.error = Some(if unauthorized {
                "Invalid email or password".to_string()
            } else {
                message
            });
            return;
        }

        if self.home.is_pending(id) {
            self.home.apply_failure(id);
        } else if self.drafts.is_pending(id) {
            self.drafts.apply_failure(id);
        } else if self.post.pending_request_id == Some(id) {
            self.post.loading = false;
            self.post.error = Some(POST_ERROR.to_string());
            self.post.pending_request_id = None;
        } else if self.pending_taxonomy_id == Some(id) {
            self.pending_taxonomy_id = None;
            self.taxonomy_error = Some(TAXONOMY_ERROR.to_string());
        } else if self.pending_profile_id == Some(id) {
            // A token that cannot fetch its profile is not a usable session
            tracing::warn!(id, %message, "Profile fetch failed, clearing session");
            self.end_session();
        } else {
            tracing::debug!(id, "Discarding stale error response");
            if !self.session.is_present() {
                return;
            }
        }

        // A 401 ends the session even for a superseded request
        if unauthorized {
            self.handle_unauthorized();
        }
    }

    /// Global reaction to a 401: drop the session and go to the login form
    fn handle_unauthorized(&mut self) {
        tracing::warn!("Authorization failed, clearing session");
        self.end_session();
        self.login = LoginForm::default();
        self.view = AppView::Login;
        self.notice = Some(SESSION_EXPIRED.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionToken, TokenProvider};
    use crate::feed::FetchResult;
    use crate::models::{Category, Post, Tag, UserDto};
    use crate::storage::{MemoryTokenStore, TokenStore};

    fn state() -> AppState {
        AppState::new(SessionToken::new(Box::new(MemoryTokenStore::default())), 10)
    }

    fn signed_in_state() -> AppState {
        AppState::new(
            SessionToken::new(Box::new(MemoryTokenStore::with_token("tok"))),
            10,
        )
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {}", id),
            content: "<p>Body</p>".into(),
            author: None,
            category: Category {
                id: "c1".into(),
                name: "General".into(),
                post_count: None,
            },
            tags: Vec::new(),
            reading_time: None,
            created_at: "2024-01-01T00:00:00".into(),
            updated_at: "2024-01-01T00:00:00".into(),
            status: None,
        }
    }

    fn fetch_id(cmd: &NetworkCommand) -> u64 {
        match cmd {
            NetworkCommand::FetchPosts { id, .. } => *id,
            other => panic!("expected FetchPosts, got {:?}", other),
        }
    }

    fn posts_loaded(id: u64, ids: &[&str], total_pages: u32) -> NetworkResponse {
        NetworkResponse::Posts {
            id,
            result: FetchResult {
                items: ids.iter().map(|i| post(i)).collect(),
                total_pages,
            },
            time_ms: 1,
        }
    }

    fn error(id: u64, unauthorized: bool) -> NetworkResponse {
        NetworkResponse::Error {
            id,
            message: "boom".into(),
            unauthorized,
            time_ms: 1,
        }
    }

    fn with_taxonomy(state: &mut AppState) {
        state.categories = vec![
            Category { id: "c1".into(), name: "Rust".into(), post_count: Some(2) },
            Category { id: "c2".into(), name: "Go".into(), post_count: Some(1) },
        ];
        state.tags = vec![
            Tag { id: "t1".into(), name: "async".into(), post_count: None },
            Tag { id: "t2".into(), name: "web".into(), post_count: None },
        ];
    }

    #[test]
    fn test_startup_fetches_taxonomy_and_home() {
        let mut state = state();
        let commands = state.startup();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], NetworkCommand::FetchTaxonomy { .. }));
        assert!(matches!(commands[1], NetworkCommand::FetchPosts { .. }));
        assert!(state.home.loading);

        let commands = signed_in_state().startup();
        assert!(matches!(commands[2], NetworkCommand::FetchProfile { .. }));
    }

    #[test]
    fn test_category_tab_cycles_through_all() {
        let mut state = state();
        with_taxonomy(&mut state);
        state.startup();

        let cmd = state.next_category().unwrap();
        match cmd {
            NetworkCommand::FetchPosts { query, .. } => {
                assert_eq!(query.category_id.as_deref(), Some("c1"));
                assert_eq!(query.page, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        state.next_category();
        state.next_category();
        assert_eq!(state.home.query.category, None);

        state.prev_category();
        assert_eq!(state.home.query.category.as_deref(), Some("c2"));
    }

    #[test]
    fn test_toggle_tag_twice_clears_filter() {
        let mut state = state();
        with_taxonomy(&mut state);
        state.startup();

        state.next_tag();
        assert!(state.toggle_tag().is_some());
        assert_eq!(state.home.query.tag.as_deref(), Some("t2"));
        assert!(state.toggle_tag().is_some());
        assert_eq!(state.home.query.tag, None);
    }

    #[test]
    fn test_filter_change_on_later_page_resets_page() {
        let mut state = state();
        with_taxonomy(&mut state);
        let first = fetch_id(&state.startup()[1]);
        state.handle_response(posts_loaded(first, &["a"], 3));

        let cmd = state.next_page().unwrap();
        assert_eq!(state.home.query.page, 2);
        state.handle_response(posts_loaded(fetch_id(&cmd), &["b"], 3));

        state.toggle_tag();
        assert_eq!(state.home.query.page, 1);
    }

    #[test]
    fn test_stale_posts_response_is_dropped() {
        let mut state = state();
        with_taxonomy(&mut state);
        let first = fetch_id(&state.startup()[1]);
        let second = fetch_id(&state.next_category().unwrap());

        state.handle_response(posts_loaded(first, &["stale"], 9));
        assert!(state.home.items.is_none());
        assert!(state.home.loading);

        state.handle_response(posts_loaded(second, &["fresh"], 1));
        assert_eq!(state.home.posts()[0].id, "fresh");
        assert!(!state.home.loading);
    }

    #[test]
    fn test_failed_fetch_keeps_items() {
        let mut state = state();
        let first = fetch_id(&state.startup()[1]);
        state.handle_response(posts_loaded(first, &["a", "b", "c"], 2));

        let next = fetch_id(&state.next_page().unwrap());
        state.handle_response(error(next, false));
        assert_eq!(state.home.posts().len(), 3);
        assert!(state.home.error.is_some());
        assert!(!state.home.loading);
    }

    #[test]
    fn test_drafts_require_login() {
        let mut state = state();
        assert!(state.show_drafts().is_none());
        assert_eq!(state.view, AppView::Login);
    }

    #[test]
    fn test_drafts_fetch_with_draft_status() {
        let mut state = signed_in_state();
        match state.show_drafts() {
            Some(NetworkCommand::FetchPosts { query, .. }) => {
                assert_eq!(query.status.as_str(), "DRAFT");
                assert_eq!(query.sort, "updatedAt,desc");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(state.view, AppView::Drafts);
    }

    #[test]
    fn test_unauthorized_clears_session_and_shows_login() {
        let mut state = signed_in_state();
        let id = fetch_id(&state.show_drafts().unwrap());

        state.handle_response(error(id, true));
        assert!(!state.session.is_present());
        assert_eq!(state.auth, AuthState::default());
        assert_eq!(state.view, AppView::Login);
        assert_eq!(state.notice.as_deref(), Some(SESSION_EXPIRED));
    }

    #[test]
    fn test_unauthorized_from_superseded_request_still_ends_session() {
        let mut state = signed_in_state();
        let first = fetch_id(&state.show_drafts().unwrap());
        let second = fetch_id(&state.cycle_sort().unwrap());
        assert_ne!(first, second);

        state.handle_response(error(first, true));
        assert!(!state.session.is_present());
        assert_eq!(state.view, AppView::Login);
        assert_eq!(state.notice.as_deref(), Some(SESSION_EXPIRED));

        // The other in-flight request fails the same way; the form is left alone
        state.form_char('a');
        state.handle_response(error(second, true));
        assert_eq!(state.login.email, "a");
        assert_eq!(state.view, AppView::Login);
    }

    #[test]
    fn test_unauthorized_after_leaving_post_ends_session() {
        let mut state = signed_in_state();
        let first = fetch_id(&state.startup()[1]);
        state.handle_response(posts_loaded(first, &["a"], 1));

        let id = match state.open_post() {
            Some(NetworkCommand::FetchPost { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };
        state.back();
        assert_eq!(state.view, AppView::Home);

        state.handle_response(error(id, true));
        assert!(!state.session.is_present());
        assert_eq!(state.view, AppView::Login);
    }

    #[test]
    fn test_stale_plain_error_is_ignored() {
        let mut state = signed_in_state();
        let first = fetch_id(&state.show_drafts().unwrap());
        state.cycle_sort();

        state.handle_response(error(first, false));
        assert!(state.session.is_present());
        assert!(state.drafts.loading);
        assert!(state.drafts.error.is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = crate::storage::FileTokenStore::at(&path);
        store.save("tok").unwrap();

        let mut state = AppState::new(SessionToken::new(Box::new(store)), 10);
        state.auth.has_token = true;
        state.auth.user = Some(UserDto {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        });
        let id = fetch_id(&state.show_drafts().unwrap());
        state.handle_response(posts_loaded(id, &["d1"], 1));
        assert_eq!(state.drafts.posts().len(), 1);

        assert!(state.logout().is_none());
        assert!(!state.session.is_present());
        assert!(!path.exists());
        assert_eq!(state.auth, AuthState::default());
        assert!(state.drafts.items.is_none());
        assert_eq!(state.view, AppView::Login);
        assert_eq!(state.notice.as_deref(), Some("Logged out"));

        // Nothing to log out of
        assert!(state.logout().is_none());
    }

    #[test]
    fn test_refresh_after_failed_fetch() {
        let mut state = state();
        let commands = state.startup();
        let taxonomy_id = match commands[0] {
            NetworkCommand::FetchTaxonomy { id } => id,
            ref other => panic!("unexpected {:?}", other),
        };
        let (home_id, original) = match &commands[1] {
            NetworkCommand::FetchPosts { id, query } => (*id, query.clone()),
            other => panic!("unexpected {:?}", other),
        };

        state.handle_response(error(taxonomy_id, false));
        state.handle_response(error(home_id, false));
        assert!(state.home.error.is_some());

        let retry = state.refresh();
        assert_eq!(retry.len(), 2);
        match &retry[0] {
            NetworkCommand::FetchPosts { id, query } => {
                assert_ne!(*id, home_id);
                assert_eq!(*query, original);
            }
            other => panic!("unexpected {:?}", other),
        }
        let retry_taxonomy = match retry[1] {
            NetworkCommand::FetchTaxonomy { id } => id,
            ref other => panic!("unexpected {:?}", other),
        };
        assert!(state.home.loading);
        assert!(state.taxonomy_error.is_none());

        // Once categories and tags are loaded only the feed is re-fetched
        state.handle_response(NetworkResponse::Taxonomy {
            id: retry_taxonomy,
            categories: Vec::new(),
            tags: Vec::new(),
        });
        let again = state.refresh();
        assert_eq!(again.len(), 1);
        assert!(matches!(again[0], NetworkCommand::FetchPosts { .. }));
    }

    #[test]
    fn test_login_flow() {
        let mut state = state();
        state.show_login();
        for c in "ada@example.com".chars() {
            state.form_char(c);
        }
        state.next_field();
        for c in "secret".chars() {
            state.form_char(c);
        }

        let id = match state.submit() {
            Some(NetworkCommand::Login { id, request }) => {
                assert_eq!(request.email, "ada@example.com");
                assert_eq!(request.password, "secret");
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        assert!(state.submit().is_none());

        let follow_up = state.handle_response(NetworkResponse::Authenticated {
            id,
            token: "jwt".into(),
        });
        assert_eq!(state.session.token().as_deref(), Some("jwt"));
        assert_eq!(state.view, AppView::Home);
        let profile_id = match follow_up[0] {
            NetworkCommand::FetchProfile { id } => id,
            ref other => panic!("unexpected {:?}", other),
        };

        state.handle_response(NetworkResponse::Profile {
            id: profile_id,
            user: UserDto {
                id: "u1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
        });
        assert!(state.auth.is_authenticated());
    }

    #[test]
    fn test_rejected_login_is_form_error() {
        let mut state = state();
        state.show_login();
        state.login.email = "ada@example.com".into();
        state.login.password = "wrong".into();
        let id = match state.submit() {
            Some(NetworkCommand::Login { id, .. }) => id,
            other => panic!("unexpected {:?}", other),
        };
        state.handle_response(error(id, true));
        assert_eq!(state.view, AppView::Login);
        assert_eq!(state.login.error.as_deref(), Some("Invalid email or password"));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_signup_requires_name() {
        let mut state = state();
        state.show_login();
        state.toggle_auth_mode();
        state.login.email = "ada@example.com".into();
        state.login.password = "pw".into();
        assert!(state.submit().is_none());
        assert!(state.login.error.is_some());

        state.login.name = "Ada".into();
        assert!(matches!(state.submit(), Some(NetworkCommand::Signup { .. })));
    }

    #[test]
    fn test_profile_failure_ends_session() {
        let mut state = signed_in_state();
        let commands = state.startup();
        let id = match commands[2] {
            NetworkCommand::FetchProfile { id } => id,
            ref other => panic!("unexpected {:?}", other),
        };
        state.handle_response(error(id, false));
        assert!(!state.session.is_present());
        assert_eq!(state.view, AppView::Home);
    }

    #[test]
    fn test_open_post_and_back() {
        let mut state = state();
        let first = fetch_id(&state.startup()[1]);
        state.handle_response(posts_loaded(first, &["a", "b"], 1));
        state.select_next();

        let id = match state.open_post() {
            Some(NetworkCommand::FetchPost { id, post_id }) => {
                assert_eq!(post_id, "b");
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(state.view, AppView::Post);
        state.handle_response(error(id, false));
        assert_eq!(state.post.error.as_deref(), Some(POST_ERROR));
        // The preview from the list stays readable
        assert!(state.post.post.is_some());

        assert!(state.back().is_none());
        assert_eq!(state.view, AppView::Home);
        assert_eq!(state.home.posts().len(), 2);
    }

    #[test]
    fn test_taxonomy_failure_message() {
        let mut state = state();
        let id = match state.startup()[0] {
            NetworkCommand::FetchTaxonomy { id } => id,
            ref other => panic!("unexpected {:?}", other),
        };
        state.handle_response(error(id, false));
        assert_eq!(state.taxonomy_error.as_deref(), Some(TAXONOMY_ERROR));
    }
}
