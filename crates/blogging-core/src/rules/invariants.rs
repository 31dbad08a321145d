use crate::model::{BlogId, PostId};
use crate::ops::MemoryStore;

/// Find posts whose `blog_id` does not match any blog
///
/// Returns list of (post_id, blog_id) tuples
pub fn find_dangling_posts(store: &MemoryStore) -> Vec<(PostId, BlogId)> {
    store
        .posts
        .values()
        .filter(|post| !store.blogs.contains_key(&post.blog_id))
        .map(|post| (post.post_id, post.blog_id))
        .collect()
}

/// Find map keys whose row carries a different primary key
///
/// Blog and post keys are reported in the same list.
pub fn find_mis_keyed_rows(store: &MemoryStore) -> Vec<i64> {
    let blogs = store
        .blogs
        .iter()
        .filter(|(key, blog)| **key != blog.blog_id)
        .map(|(key, _)| *key);
    let posts = store
        .posts
        .iter()
        .filter(|(key, post)| **key != post.post_id)
        .map(|(key, _)| *key);
    blogs.chain(posts).collect()
}
