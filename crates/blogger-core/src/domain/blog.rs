use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog entity - a titled piece of content.
///
/// A blog's identity and creation time are fixed when it is first built and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog with a freshly generated id and the current time.
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Event emitted after a blog has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreated {
    pub blog_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl BlogCreated {
    /// Job type used when this event travels through the job queue.
    pub const JOB_TYPE: &'static str = "blog.created";
}

impl From<&Blog> for BlogCreated {
    fn from(blog: &Blog) -> Self {
        Self {
            blog_id: blog.id,
            title: blog.title.clone(),
            created_at: blog.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blogs_get_distinct_ids() {
        let a = Blog::new("a".into(), "x".into());
        let b = Blog::new("a".into(), "x".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blog_created_event_from_blog() {
        let blog = Blog::new("Hello".into(), "World".into());
        let event = BlogCreated::from(&blog);

        assert_eq!(event.blog_id, blog.id);
        assert_eq!(event.title, "Hello");
        assert_eq!(event.created_at, blog.created_at);

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("blogId").is_some());
    }
}
