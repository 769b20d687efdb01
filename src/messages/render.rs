//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{AuthMode, FormField, PostView};
use crate::auth::AuthState;
use crate::feed::{FeedKind, FeedState};
use crate::messages::ui_events::AppView;
use crate::models::{Category, Tag};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub view: AppView,
    pub auth: AuthState,

    // Feeds
    pub home: FeedState,
    pub drafts: FeedState,

    // Filters
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub tag_cursor: usize,
    pub taxonomy_error: Option<String>,

    // Post view
    pub post: PostView,

    // Login form; the password itself never leaves the App layer
    pub login_mode: AuthMode,
    pub login_field: FormField,
    pub login_name: String,
    pub login_email: String,
    pub login_password_len: usize,
    pub login_error: Option<String>,
    pub login_submitting: bool,

    // Status bar and popups
    pub notice: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    /// Feed of the current view; the post view shows the feed it was opened from
    pub fn feed(&self) -> &FeedState {
        let view = match self.view {
            AppView::Post => self.post.return_to,
            view => view,
        };
        match view {
            AppView::Drafts => &self.drafts,
            _ => &self.home,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: AppView::Home,
            auth: AuthState::default(),
            home: FeedState::new(FeedKind::Home),
            drafts: FeedState::new(FeedKind::Drafts),
            categories: Vec::new(),
            tags: Vec::new(),
            tag_cursor: 0,
            taxonomy_error: None,
            post: PostView::default(),
            login_mode: AuthMode::Login,
            login_field: FormField::Email,
            login_name: String::new(),
            login_email: String::new(),
            login_password_len: 0,
            login_error: None,
            login_submitting: false,
            notice: None,
            show_help: false,
        }
    }
}
