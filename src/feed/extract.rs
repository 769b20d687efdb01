//! Normalizes the shapes `GET /posts` may answer with

use serde_json::Value;

use crate::models::Post;

/// One page of posts plus pagination metadata
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchResult {
    pub items: Vec<Post>,
    pub total_pages: u32,
}

/// Accepts `{posts, totalPages}`, the Spring page envelope
/// `{content, totalPages}` and a bare array.
///
/// Missing or zero `totalPages` counts as one page. Any other shape yields no
/// posts and zero pages. Malformed posts inside a recognized shape are an error.
pub fn extract_posts(body: Value) -> Result<FetchResult, serde_json::Error> {
    match body {
        Value::Array(items) => Ok(FetchResult {
            items: parse_items(items)?,
            total_pages: 1,
        }),
        Value::Object(mut map) => {
            let list = match map.remove("posts") {
                Some(Value::Array(items)) => Some(items),
                _ => match map.remove("content") {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                },
            };
            match list {
                Some(items) => {
                    let total_pages = map
                        .get("totalPages")
                        .and_then(Value::as_u64)
                        .filter(|n| *n > 0)
                        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
                        .unwrap_or(1);
                    Ok(FetchResult {
                        items: parse_items(items)?,
                        total_pages,
                    })
                }
                None => Ok(unrecognized(&Value::Object(map))),
            }
        }
        other => Ok(unrecognized(&other)),
    }
}

fn parse_items(items: Vec<Value>) -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_value(Value::Array(items))
}

fn unrecognized(body: &Value) -> FetchResult {
    tracing::warn!(body = %body, "Unexpected posts response structure");
    FetchResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Post {}", id),
            "content": "<p>hi</p>",
            "category": {"id": "c1", "name": "General"},
            "tags": [],
            "createdAt": "2024-01-01T00:00:00",
            "updatedAt": "2024-01-01T00:00:00"
        })
    }

    #[test]
    fn test_bare_array_is_single_page() {
        let result = extract_posts(json!([post("1"), post("2"), post("3")])).unwrap();
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_posts_envelope() {
        let result = extract_posts(json!({"posts": [post("1")], "totalPages": 7})).unwrap();
        assert_eq!(result.items[0].id, "1");
        assert_eq!(result.total_pages, 7);
    }

    #[test]
    fn test_spring_page_envelope() {
        let body = json!({
            "content": [post("1"), post("2")],
            "totalPages": 3,
            "totalElements": 25,
            "number": 0
        });
        let result = extract_posts(body).unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_envelope_without_total_pages_defaults_to_one() {
        let result = extract_posts(json!({"posts": []})).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);

        let result = extract_posts(json!({"content": [post("1")], "totalPages": 0})).unwrap();
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_unrecognized_shapes() {
        for body in [json!({"data": [post("1")]}), json!("nope"), json!(null), json!(42)] {
            let result = extract_posts(body).unwrap();
            assert!(result.items.is_empty());
            assert_eq!(result.total_pages, 0);
        }
    }

    #[test]
    fn test_malformed_post_is_error() {
        assert!(extract_posts(json!([{"id": "1"}])).is_err());
    }
}
