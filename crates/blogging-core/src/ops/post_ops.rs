use super::store::MemoryStore;
use crate::errors::{BlogError, Result};
use crate::model::{BlogId, Post, PostId, PostUpdate, PostWithBlog};
use crate::rules::validate_title;

/// Create a new Post belonging to `blog_id`
///
/// # Returns
/// The id assigned to the new Post
///
/// # Errors
/// * `InvalidTitle` - If the title violates the schema constraints
/// * `BlogForeignKeyViolation` - If `blog_id` does not reference an existing Blog
pub fn create_post(
    store: &mut MemoryStore,
    blog_id: BlogId,
    title: &str,
    content: &str,
) -> Result<PostId> {
    validate_title(title)?;
    ensure_blog_reference(store, blog_id)?;

    let post_id = store.insert_post_row(blog_id, title.to_string(), content.to_string());
    tracing::debug!(post_id, blog_id, "post inserted");
    Ok(post_id)
}

/// Read a Post together with its owning Blog
///
/// # Errors
/// * `PostNotFound` - If the Post doesn't exist
pub fn get_post(store: &MemoryStore, post_id: PostId) -> Result<PostWithBlog> {
    let post = store.post_row(post_id)?.clone();
    let blog = store
        .blog_row(post.blog_id)
        .map_err(|_| BlogError::Internal {
            message: format!("post {} references missing blog {}", post_id, post.blog_id),
        })?
        .clone();
    Ok(PostWithBlog { post, blog })
}

/// List the posts of one Blog, ordered by id
///
/// # Errors
/// * `BlogNotFound` - If the Blog doesn't exist
pub fn list_posts(store: &MemoryStore, blog_id: BlogId) -> Result<Vec<Post>> {
    store.blog_row(blog_id)?;
    Ok(store.posts_of(blog_id).into_iter().cloned().collect())
}

/// Apply field mutations to a Post
///
/// # Returns
/// The Post row after the update
///
/// # Errors
/// * `PostNotFound` - If the Post doesn't exist (or was deleted meanwhile)
/// * `InvalidTitle` - If the new title violates the schema constraints
/// * `BlogForeignKeyViolation` - If the update moves the Post to a missing Blog
pub fn update_post(store: &mut MemoryStore, post_id: PostId, update: &PostUpdate) -> Result<Post> {
    store.post_row(post_id)?;
    if let Some(title) = &update.title {
        validate_title(title)?;
    }
    if let Some(blog_id) = update.blog_id {
        ensure_blog_reference(store, blog_id)?;
    }

    let post = store.post_row_mut(post_id)?;
    update.apply_to(post);
    Ok(post.clone())
}

/// Delete a Post
///
/// # Errors
/// * `PostNotFound` - If the Post doesn't exist
pub fn delete_post(store: &mut MemoryStore, post_id: PostId) -> Result<Post> {
    let removed = store
        .remove_post_row(post_id)
        .ok_or(BlogError::PostNotFound { post_id })?;
    tracing::debug!(post_id, blog_id = removed.blog_id, "post deleted");
    Ok(removed)
}

fn ensure_blog_reference(store: &MemoryStore, blog_id: BlogId) -> Result<()> {
    if store.blog_exists(blog_id) {
        Ok(())
    } else {
        Err(BlogError::BlogForeignKeyViolation { blog_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::blog_ops;

    #[test]
    fn test_create_post_missing_blog() {
        let mut store = MemoryStore::new();
        let result = create_post(&mut store, 1, "Hello", "World");
        assert!(matches!(
            result,
            Err(BlogError::BlogForeignKeyViolation { blog_id: 1 })
        ));
        assert_eq!(store.post_count(), 0);
    }

    #[test]
    fn test_get_post_resolves_blog() {
        let mut store = MemoryStore::new();
        let blog_id = blog_ops::create_blog(&mut store, "http://example.com").unwrap();
        let post_id = create_post(&mut store, blog_id, "Hello", "World").unwrap();

        let with_blog = get_post(&store, post_id).unwrap();
        assert_eq!(with_blog.post.title, "Hello");
        assert_eq!(with_blog.blog.url, "http://example.com");
    }

    #[test]
    fn test_update_post_to_missing_blog_keeps_row() {
        let mut store = MemoryStore::new();
        let blog_id = blog_ops::create_blog(&mut store, "http://example.com").unwrap();
        let post_id = create_post(&mut store, blog_id, "Hello", "World").unwrap();

        let result = update_post(&mut store, post_id, &PostUpdate::default().blog_id(77));

        assert!(matches!(
            result,
            Err(BlogError::BlogForeignKeyViolation { blog_id: 77 })
        ));
        assert_eq!(store.post_row(post_id).unwrap().blog_id, blog_id);
    }

    #[test]
    fn test_delete_post_twice() {
        let mut store = MemoryStore::new();
        let blog_id = blog_ops::create_blog(&mut store, "http://example.com").unwrap();
        let post_id = create_post(&mut store, blog_id, "Hello", "World").unwrap();

        assert!(delete_post(&mut store, post_id).is_ok());
        assert!(matches!(
            delete_post(&mut store, post_id),
            Err(BlogError::PostNotFound { .. })
        ));
    }
}
