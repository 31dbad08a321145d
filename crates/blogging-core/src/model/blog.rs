use serde::{Deserialize, Serialize};

use super::post::Post;
use super::BlogId;

/// Blog - a record representing one blog site
///
/// A Blog row only stores its own columns. The posts that belong to it are
/// derived by foreign-key lookup and returned through [`BlogWithPosts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Primary key, assigned by the store on insert
    pub blog_id: BlogId,

    /// The blog's address
    pub url: String,
}

impl Blog {
    /// Create a Blog row value with the given id and url
    pub fn new(blog_id: BlogId, url: String) -> Self {
        Self { blog_id, url }
    }
}

/// A Blog together with the posts whose `blog_id` equals its id
///
/// Posts are ordered by ascending `post_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogWithPosts {
    pub blog_id: BlogId,
    pub url: String,
    pub posts: Vec<Post>,
}

impl BlogWithPosts {
    pub fn new(blog: Blog, posts: Vec<Post>) -> Self {
        Self {
            blog_id: blog.blog_id,
            url: blog.url,
            posts,
        }
    }

    /// The Blog row without its posts
    pub fn blog(&self) -> Blog {
        Blog::new(self.blog_id, self.url.clone())
    }
}

/// Field mutations for an existing Blog
///
/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogUpdate {
    pub url: Option<String>,
}

impl BlogUpdate {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_with_posts_keeps_row_fields() {
        let blog = Blog::new(3, "http://example.com".to_string());
        let with_posts = BlogWithPosts::new(blog.clone(), Vec::new());

        assert_eq!(with_posts.blog_id, 3);
        assert!(with_posts.posts.is_empty());
        assert_eq!(with_posts.blog(), blog);
    }

    #[test]
    fn test_blog_update_empty() {
        assert!(BlogUpdate::default().is_empty());
        assert!(!BlogUpdate::url("http://a.example").is_empty());
    }

    #[test]
    fn test_blog_with_posts_json_shape() {
        let with_posts = BlogWithPosts::new(Blog::new(1, "http://example.com".to_string()), vec![]);
        let json = serde_json::to_value(&with_posts).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"blog_id": 1, "url": "http://example.com", "posts": []})
        );
    }
}
