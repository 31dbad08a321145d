use super::store::MemoryStore;
use crate::errors::{BlogError, Result};
use crate::model::{Blog, BlogId, BlogUpdate, BlogWithPosts, NewPost, PostId};
use crate::policy::{DeleteOutcome, DeletePolicy};
use crate::rules::{validate_title, validate_url};

/// Create a new Blog with the given url
///
/// # Returns
/// The id assigned to the new Blog
///
/// # Errors
/// * `InvalidUrl` - If the url violates the schema constraints
pub fn create_blog(store: &mut MemoryStore, url: &str) -> Result<BlogId> {
    validate_url(url)?;
    let blog_id = store.insert_blog_row(url.to_string());
    tracing::debug!(blog_id, "blog inserted");
    Ok(blog_id)
}

/// Create a Blog and its Posts as one unit
///
/// Every input is validated before the store is touched, so either all rows
/// are inserted or none are.
///
/// # Returns
/// The new Blog id and the new Post ids, in input order
///
/// # Errors
/// * `InvalidUrl` - If the url violates the schema constraints
/// * `InvalidTitle` - If any post title violates the schema constraints
pub fn create_blog_with_posts(
    store: &mut MemoryStore,
    url: &str,
    posts: &[NewPost],
) -> Result<(BlogId, Vec<PostId>)> {
    validate_url(url)?;
    for post in posts {
        validate_title(&post.title)?;
    }

    let blog_id = store.insert_blog_row(url.to_string());
    let post_ids = posts
        .iter()
        .map(|post| store.insert_post_row(blog_id, post.title.clone(), post.content.clone()))
        .collect::<Vec<_>>();
    tracing::debug!(blog_id, post_count = post_ids.len(), "blog inserted with posts");

    Ok((blog_id, post_ids))
}

/// Read a Blog with its posts
///
/// # Errors
/// * `BlogNotFound` - If the Blog doesn't exist
pub fn get_blog(store: &MemoryStore, blog_id: BlogId) -> Result<BlogWithPosts> {
    let blog = store.blog_row(blog_id)?.clone();
    let posts = store.posts_of(blog_id).into_iter().cloned().collect();
    Ok(BlogWithPosts::new(blog, posts))
}

/// List every Blog row, ordered by id
pub fn list_blogs(store: &MemoryStore) -> Vec<Blog> {
    store.blog_rows().into_iter().cloned().collect()
}

/// Apply field mutations to a Blog
///
/// An empty update is a no-op that still checks the Blog exists.
///
/// # Returns
/// The Blog row after the update
///
/// # Errors
/// * `BlogNotFound` - If the Blog doesn't exist (or was deleted meanwhile)
/// * `InvalidUrl` - If the new url violates the schema constraints
pub fn update_blog(store: &mut MemoryStore, blog_id: BlogId, update: &BlogUpdate) -> Result<Blog> {
    if let Some(url) = &update.url {
        validate_url(url)?;
    }

    let blog = store.blog_row_mut(blog_id)?;
    if let Some(url) = &update.url {
        blog.url = url.clone();
    }
    Ok(blog.clone())
}

/// Delete a Blog, resolving its posts according to `policy`
///
/// # Errors
/// * `BlogNotFound` - If the Blog doesn't exist
/// * `BlogHasPosts` - Under `Restrict`, if the Blog still has posts; nothing
///   is deleted
pub fn delete_blog(
    store: &mut MemoryStore,
    blog_id: BlogId,
    policy: DeletePolicy,
) -> Result<DeleteOutcome> {
    store.blog_row(blog_id)?;

    let dependent: Vec<PostId> = store.posts_of(blog_id).iter().map(|p| p.post_id).collect();

    if policy == DeletePolicy::Restrict && !dependent.is_empty() {
        return Err(BlogError::BlogHasPosts {
            blog_id,
            post_count: dependent.len(),
        });
    }

    for post_id in &dependent {
        store.remove_post_row(*post_id);
    }
    store.remove_blog_row(blog_id);
    tracing::debug!(blog_id, %policy, posts_deleted = dependent.len(), "blog deleted");

    Ok(DeleteOutcome {
        blog_id,
        policy,
        posts_deleted: dependent.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::post_ops;

    #[test]
    fn test_create_blog_rejects_blank_url() {
        let mut store = MemoryStore::new();
        let result = create_blog(&mut store, "  ");
        assert!(matches!(result, Err(BlogError::InvalidUrl { .. })));
        assert_eq!(store.blog_count(), 0);
    }

    #[test]
    fn test_create_with_posts_is_all_or_nothing() {
        let mut store = MemoryStore::new();
        let posts = vec![NewPost::new("Fine", "ok"), NewPost::new("", "bad title")];

        let result = create_blog_with_posts(&mut store, "http://example.com", &posts);

        assert!(matches!(result, Err(BlogError::InvalidTitle { .. })));
        assert_eq!(store.blog_count(), 0);
        assert_eq!(store.post_count(), 0);
    }

    #[test]
    fn test_update_blog_replaces_url() {
        let mut store = MemoryStore::new();
        let id = create_blog(&mut store, "http://old.example").unwrap();

        let blog = update_blog(&mut store, id, &BlogUpdate::url("http://new.example")).unwrap();

        assert_eq!(blog.url, "http://new.example");
        assert_eq!(get_blog(&store, id).unwrap().url, "http://new.example");
    }

    #[test]
    fn test_restrict_leaves_everything_in_place() {
        let mut store = MemoryStore::new();
        let id = create_blog(&mut store, "http://example.com").unwrap();
        post_ops::create_post(&mut store, id, "Hello", "World").unwrap();

        let result = delete_blog(&mut store, id, DeletePolicy::Restrict);

        assert!(matches!(
            result,
            Err(BlogError::BlogHasPosts { post_count: 1, .. })
        ));
        assert_eq!(get_blog(&store, id).unwrap().posts.len(), 1);
    }
}
