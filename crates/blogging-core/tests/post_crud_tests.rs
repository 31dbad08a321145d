mod common;

use blogging_core::rules::validate_store;
use blogging_core::{BlogError, BlogStore, ExErrorKind, MemoryStore, PostUpdate};

#[test]
fn test_create_post_requires_existing_blog() {
    // GIVEN an empty store
    let mut store = MemoryStore::new();

    // WHEN creating a post for blog 5
    let err = store.create_post(5, "Hello", "World").unwrap_err();

    // THEN it is rejected as a foreign key violation
    assert_eq!(err.kind(), ExErrorKind::ForeignKeyViolation);
    assert_eq!(store.post_count(), 0);
}

#[test]
fn test_create_post_empty_content_allowed() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();

    let post_id = store.create_post(blog_id, "Title only", "").unwrap();

    assert_eq!(store.get_post(post_id).unwrap().post.content, "");
}

#[test]
fn test_create_post_blank_title_rejected() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();

    let result = store.create_post(blog_id, "  ", "body");

    assert!(matches!(result, Err(BlogError::InvalidTitle { .. })));
}

#[test]
fn test_get_post_navigates_to_blog() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();
    let post_id = store.create_post(blog_id, "Hello", "World").unwrap();

    let with_blog = store.get_post(post_id).unwrap();

    assert_eq!(with_blog.post.blog_id, blog_id);
    assert_eq!(with_blog.blog.blog_id, blog_id);
    assert_eq!(with_blog.blog.url, "http://example.com");
}

#[test]
fn test_get_post_missing() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.get_post(3),
        Err(BlogError::PostNotFound { post_id: 3 })
    ));
}

#[test]
fn test_list_posts_missing_blog() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.list_posts(1),
        Err(BlogError::BlogNotFound { .. })
    ));
}

#[test]
fn test_update_post_moves_between_blogs() {
    // GIVEN two blogs, the first with one post
    let mut store = common::new_store();
    let (first, second) = common::setup_two_blogs(&mut store, 1);
    let post_id = store.list_posts(first).unwrap()[0].post_id;

    // WHEN the post moves to the second blog
    store
        .update_post(post_id, &PostUpdate::default().blog_id(second))
        .unwrap();

    // THEN each blog's post set reflects the move
    assert!(store.list_posts(first).unwrap().is_empty());
    let moved: Vec<_> = store
        .list_posts(second)
        .unwrap()
        .into_iter()
        .map(|p| p.post_id)
        .collect();
    assert!(moved.contains(&post_id));
    assert!(validate_store(&store).is_ok());
}

#[test]
fn test_update_post_title_and_content() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();
    let post_id = store.create_post(blog_id, "Hello", "World").unwrap();

    let post = store
        .update_post(
            post_id,
            &PostUpdate::default().title("Hi").content("Everyone"),
        )
        .unwrap();

    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "Everyone");
    assert_eq!(post.blog_id, blog_id);
}

#[test]
fn test_update_post_invalid_title_changes_nothing() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();
    let post_id = store.create_post(blog_id, "Hello", "World").unwrap();

    let result = store.update_post(
        post_id,
        &PostUpdate::default().title("").content("changed"),
    );

    assert!(matches!(result, Err(BlogError::InvalidTitle { .. })));
    let post = store.get_post(post_id).unwrap().post;
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
}

#[test]
fn test_delete_post_detaches_from_blog() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();
    let keep = store.create_post(blog_id, "Keep", "").unwrap();
    let drop = store.create_post(blog_id, "Drop", "").unwrap();

    store.delete_post(drop).unwrap();

    let posts = store.get_blog(blog_id).unwrap().posts;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post_id, keep);
    assert!(matches!(
        store.get_post(drop),
        Err(BlogError::PostNotFound { .. })
    ));
}

#[test]
fn test_post_ids_not_reused() {
    let mut store = MemoryStore::new();
    let blog_id = store.create_blog("http://example.com").unwrap();
    let first = store.create_post(blog_id, "A", "").unwrap();
    store.delete_post(first).unwrap();

    let second = store.create_post(blog_id, "B", "").unwrap();

    assert!(second > first);
}
