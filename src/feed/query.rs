//! Feed query state and its wire form

use serde::Serialize;

use crate::constants::ALL_CATEGORIES_KEY;
use crate::models::{PostStatus, SortKey};

/// Which feed a query belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    /// Published posts, filterable by category and tag
    Home,
    /// The signed-in user's drafts
    Drafts,
}

impl FeedKind {
    pub fn status(&self) -> PostStatus {
        match self {
            FeedKind::Home => PostStatus::Published,
            FeedKind::Drafts => PostStatus::Draft,
        }
    }

    pub fn default_sort(&self) -> SortKey {
        match self {
            FeedKind::Home => SortKey::NEWEST,
            FeedKind::Drafts => SortKey::RECENTLY_UPDATED,
        }
    }

    /// Message shown when a fetch for this feed fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            FeedKind::Home => "Failed to load posts. Please try again later.",
            FeedKind::Drafts => "Failed to load drafts. Please try again later.",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FeedKind::Home => "Blog Posts",
            FeedKind::Drafts => "My Drafts",
        }
    }
}

/// Current page, sort and filter selection of a feed.
///
/// Every mutator returns whether the query changed, which is exactly when a
/// new fetch has to be issued. Filter and sort changes always move back to
/// the first page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub page: u32,
    pub sort: SortKey,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl Query {
    pub fn new(sort: SortKey) -> Self {
        Query {
            page: 1,
            sort,
            category: None,
            tag: None,
        }
    }

    pub fn for_feed(kind: FeedKind) -> Self {
        Self::new(kind.default_sort())
    }

    /// Move to page `page`; page numbers start at 1
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Select a category; `None` and the "all" key clear the filter
    pub fn set_category(&mut self, id: Option<&str>) -> bool {
        let before = self.clone();
        self.page = 1;
        self.category = id
            .filter(|id| *id != ALL_CATEGORIES_KEY)
            .map(str::to_string);
        *self != before
    }

    /// Select a tag; selecting the current tag again clears it
    pub fn set_tag(&mut self, id: Option<&str>) -> bool {
        let before = self.clone();
        self.page = 1;
        self.tag = match id {
            Some(id) if self.tag.as_deref() == Some(id) => None,
            other => other.map(str::to_string),
        };
        *self != before
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        let before = self.clone();
        self.page = 1;
        self.sort = sort;
        *self != before
    }

    /// Wire form of this query for a feed of `kind`
    pub fn to_request(&self, kind: FeedKind, size: u32) -> PostsQuery {
        let (category_id, tag_id) = match kind {
            FeedKind::Home => (self.category.clone(), self.tag.clone()),
            FeedKind::Drafts => (None, None),
        };
        PostsQuery {
            page: self.page,
            size,
            sort: self.sort.to_param(),
            category_id,
            tag_id,
            status: kind.status(),
        }
    }
}

/// Query parameters of `GET /posts`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    pub status: PostStatus,
}
