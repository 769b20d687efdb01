//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::auth::{AuthState, SessionToken};
use crate::feed::{FeedKind, FeedState};
use crate::messages::ui_events::AppView;
use crate::messages::RenderState;
use crate::models::{Category, Post, Tag};

/// Whether the form logs in or creates an account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Login form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    Name,
    #[default]
    Email,
    Password,
}

/// Login / signup form
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub field: FormField,
    pub error: Option<String>,
    pub pending_request_id: Option<u64>,
}

impl LoginForm {
    /// Fields shown in the current mode, in tab order
    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            AuthMode::Login => &[FormField::Email, FormField::Password],
            AuthMode::Signup => &[FormField::Name, FormField::Email, FormField::Password],
        }
    }

    pub fn current_input_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_request_id.is_some()
    }
}

/// Single post reading view
#[derive(Clone, Debug, Default)]
pub struct PostView {
    pub post: Option<Post>,
    pub loading: bool,
    pub error: Option<String>,
    pub scroll: u16,
    /// View to return to on Back
    pub return_to: AppView,
    pub pending_request_id: Option<u64>,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: AppView,
    pub page_size: u32,

    // Feeds
    pub home: FeedState,
    pub drafts: FeedState,

    // Category tabs and tag chips
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub tag_cursor: usize,
    pub taxonomy_error: Option<String>,
    pub pending_taxonomy_id: Option<u64>,

    pub post: PostView,
    pub login: LoginForm,

    // Authentication
    pub auth: AuthState,
    pub session: Arc<SessionToken>,
    pub pending_profile_id: Option<u64>,

    /// One-line message for the status bar
    pub notice: Option<String>,
    pub show_help: bool,

    pub next_request_id: u64,
}

impl AppState {
    pub fn new(session: Arc<SessionToken>, page_size: u32) -> Self {
        let auth = AuthState {
            user: None,
            has_token: session.is_present(),
        };
        AppState {
            view: AppView::Home,
            page_size,
            home: FeedState::new(FeedKind::Home),
            drafts: FeedState::new(FeedKind::Drafts),
            categories: Vec::new(),
            tags: Vec::new(),
            tag_cursor: 0,
            taxonomy_error: None,
            pending_taxonomy_id: None,
            post: PostView::default(),
            login: LoginForm::default(),
            auth,
            session,
            pending_profile_id: None,
            notice: None,
            show_help: false,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Feed shown by the current view, if any
    pub fn active_feed(&self) -> Option<&FeedState> {
        match self.view {
            AppView::Home => Some(&self.home),
            AppView::Drafts => Some(&self.drafts),
            _ => None,
        }
    }

    pub fn active_feed_mut(&mut self) -> Option<&mut FeedState> {
        match self.view {
            AppView::Home => Some(&mut self.home),
            AppView::Drafts => Some(&mut self.drafts),
            _ => None,
        }
    }

    pub fn feed_mut(&mut self, kind: FeedKind) -> &mut FeedState {
        match kind {
            FeedKind::Home => &mut self.home,
            FeedKind::Drafts => &mut self.drafts,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view,
            auth: self.auth.clone(),
            home: self.home.clone(),
            drafts: self.drafts.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            tag_cursor: self.tag_cursor,
            taxonomy_error: self.taxonomy_error.clone(),
            post: self.post.clone(),
            login_mode: self.login.mode,
            login_field: self.login.field,
            login_name: self.login.name.clone(),
            login_email: self.login.email.clone(),
            login_password_len: self.login.password.chars().count(),
            login_error: self.login.error.clone(),
            login_submitting: self.login.is_submitting(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
