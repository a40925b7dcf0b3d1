//! Data Transfer Objects - request/response types for the API.

use blogger_core::domain::Blog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request to create a blog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

/// A blog as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            created_at: blog.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_response_uses_camel_case() {
        let response = BlogResponse {
            id: Uuid::nil(),
            title: "Hello".to_string(),
            content: "World".to_string(),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_blog_maps_field_for_field() {
        let blog = Blog::new("Hello".to_string(), "World".to_string());

        let response = BlogResponse::from(blog.clone());

        assert_eq!(response.id, blog.id);
        assert_eq!(response.title, blog.title);
        assert_eq!(response.content, blog.content);
        assert_eq!(response.created_at, blog.created_at);
    }

    #[test]
    fn test_create_request_requires_both_fields() {
        let missing: Result<CreateBlogRequest, _> =
            serde_json::from_str(r#"{"title":"Hello"}"#);
        assert!(missing.is_err());
    }
}
