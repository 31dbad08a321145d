use blogging_core::{BlogId, MemoryStore, PostId};

/// Create a new empty MemoryStore for testing
#[allow(dead_code)]
pub fn new_store() -> MemoryStore {
    MemoryStore::new()
}

/// Insert a blog row directly, bypassing validation
#[allow(dead_code)]
pub fn create_test_blog(store: &mut MemoryStore, url: &str) -> BlogId {
    store.insert_blog_row(url.to_string())
}

/// Insert a post row directly, bypassing validation and the foreign-key check
#[allow(dead_code)]
pub fn create_test_post(store: &mut MemoryStore, blog_id: BlogId, title: &str) -> PostId {
    store.insert_post_row(blog_id, title.to_string(), format!("content of {}", title))
}

/// Setup two blogs: the first with `first_posts` posts, the second with one
///
/// Returns (first_blog_id, second_blog_id)
#[allow(dead_code)]
pub fn setup_two_blogs(store: &mut MemoryStore, first_posts: usize) -> (BlogId, BlogId) {
    let first = create_test_blog(store, "http://first.example");
    let second = create_test_blog(store, "http://second.example");
    for n in 0..first_posts {
        create_test_post(store, first, &format!("first-{}", n));
    }
    create_test_post(store, second, "second-0");
    (first, second)
}
