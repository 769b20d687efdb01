use serde::{Deserialize, Serialize};

/// Publication status of a post
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
        }
    }
}

/// Post author as embedded in a post
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

/// A post category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub post_count: Option<u32>,
}

/// A post tag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub post_count: Option<u32>,
}

/// A blog post, consumed read-only
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<Author>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl Post {
    /// Author name for display
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("Anonymous")
    }
}

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}

/// Sortable post fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Title => "title",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort order of a feed, e.g. `createdAt,desc` on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const NEWEST: SortKey = SortKey::new(SortField::CreatedAt, SortDirection::Desc);
    pub const OLDEST: SortKey = SortKey::new(SortField::CreatedAt, SortDirection::Asc);
    pub const TITLE_ASC: SortKey = SortKey::new(SortField::Title, SortDirection::Asc);
    pub const TITLE_DESC: SortKey = SortKey::new(SortField::Title, SortDirection::Desc);
    pub const RECENTLY_UPDATED: SortKey = SortKey::new(SortField::UpdatedAt, SortDirection::Desc);

    /// Options offered by the sort control, in cycle order
    pub const OPTIONS: [SortKey; 4] = [
        SortKey::NEWEST,
        SortKey::OLDEST,
        SortKey::TITLE_ASC,
        SortKey::TITLE_DESC,
    ];

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        SortKey { field, direction }
    }

    /// Query parameter value
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field.as_str(), self.direction.as_str())
    }

    /// Parse `field,direction`
    pub fn parse(s: &str) -> Option<SortKey> {
        let (field, direction) = s.split_once(',')?;
        let field = match field.trim() {
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            "title" => SortField::Title,
            _ => return None,
        };
        let direction = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        Some(SortKey::new(field, direction))
    }

    pub fn label(&self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::CreatedAt, SortDirection::Desc) => "Newest",
            (SortField::CreatedAt, SortDirection::Asc) => "Oldest",
            (SortField::Title, SortDirection::Asc) => "Title (A-Z)",
            (SortField::Title, SortDirection::Desc) => "Title (Z-A)",
            (SortField::UpdatedAt, SortDirection::Desc) => "Recently updated",
            (SortField::UpdatedAt, SortDirection::Asc) => "Least recently updated",
        }
    }

    /// Next option of the sort control; keys outside the options start over
    pub fn next(&self) -> SortKey {
        match SortKey::OPTIONS.iter().position(|k| k == self) {
            Some(i) => SortKey::OPTIONS[(i + 1) % SortKey::OPTIONS.len()],
            None => SortKey::OPTIONS[0],
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::NEWEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_backend_json() {
        let json = r#"{
            "id": "p1",
            "title": "Hello",
            "content": "<p>Body</p>",
            "author": {"id": "u1", "name": "Ada"},
            "category": {"id": "c1", "name": "Rust"},
            "tags": [{"id": "t1", "name": "async", "postCount": 4}],
            "readingTime": 3,
            "createdAt": "2024-05-01T10:00:00",
            "updatedAt": "2024-05-02T10:00:00",
            "status": "PUBLISHED"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.author_name(), "Ada");
        assert_eq!(post.tags[0].post_count, Some(4));
        assert_eq!(post.status, Some(PostStatus::Published));
    }

    #[test]
    fn test_post_without_author_is_anonymous() {
        let json = r#"{
            "id": "p1", "title": "t", "content": "",
            "category": {"id": "c1", "name": "Rust"},
            "createdAt": "2024-05-01T10:00:00",
            "updatedAt": "2024-05-01T10:00:00"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.author_name(), "Anonymous");
        assert!(post.tags.is_empty());
        assert_eq!(post.status, None);
    }

    #[test]
    fn test_sort_key_param_and_parse() {
        assert_eq!(SortKey::NEWEST.to_param(), "createdAt,desc");
        assert_eq!(SortKey::parse("title,asc"), Some(SortKey::TITLE_ASC));
        assert_eq!(SortKey::parse("updatedAt,desc"), Some(SortKey::RECENTLY_UPDATED));
        assert_eq!(SortKey::parse("views,desc"), None);
        assert_eq!(SortKey::parse("title"), None);
    }

    #[test]
    fn test_sort_key_cycles_options() {
        assert_eq!(SortKey::NEWEST.next(), SortKey::OLDEST);
        assert_eq!(SortKey::TITLE_DESC.next(), SortKey::NEWEST);
        assert_eq!(SortKey::RECENTLY_UPDATED.next(), SortKey::NEWEST);
    }
}
