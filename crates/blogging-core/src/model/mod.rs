pub mod blog;
pub mod post;

pub use blog::{Blog, BlogUpdate, BlogWithPosts};
pub use post::{NewPost, Post, PostUpdate, PostWithBlog};

/// Primary key of a Blog row
pub type BlogId = i64;

/// Primary key of a Post row
pub type PostId = i64;
