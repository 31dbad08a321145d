//! On-disk behaviour: data, id counters and the sequence survive reopening

use blogging_core::{BlogStore, DeletePolicy};
use blogging_store::{ConnectionOptions, SqliteStore};
use tempfile::TempDir;

fn open(dir: &TempDir) -> SqliteStore {
    SqliteStore::open(dir.path().join("blog.db"), &ConnectionOptions::default())
        .expect("open store")
}

#[test]
fn test_rows_survive_reopen() {
    // GIVEN a blog with a post written through one store
    let dir = TempDir::new().unwrap();
    let (blog_id, post_id) = {
        let mut store = open(&dir);
        let blog_id = store.create_blog("http://example.com").unwrap();
        let post_id = store.create_post(blog_id, "Hello", "World").unwrap();
        (blog_id, post_id)
    };

    // WHEN the database is reopened
    let store = open(&dir);

    // THEN the rows are still there
    let blog = store.get_blog(blog_id).unwrap();
    assert_eq!(blog.url, "http://example.com");
    assert_eq!(blog.posts[0].post_id, post_id);
}

#[test]
fn test_ids_never_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    let first = {
        let mut store = open(&dir);
        let id = store.create_blog("http://first.example").unwrap();
        store.delete_blog(id, DeletePolicy::Cascade).unwrap();
        id
    };

    let mut store = open(&dir);
    let second = store.create_blog("http://second.example").unwrap();

    assert!(second > first);
}

#[test]
fn test_blog_numbers_continue_after_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        assert_eq!(store.next_blog_number().unwrap(), 1);
        assert_eq!(store.next_blog_number().unwrap(), 2);
    }

    let mut store = open(&dir);

    assert_eq!(store.next_blog_number().unwrap(), 3);
}

#[test]
fn test_reopen_does_not_reapply_migrations() {
    let dir = TempDir::new().unwrap();
    drop(open(&dir));
    let store = open(&dir);

    let applied = blogging_store::migrations::applied_migrations(store.connection()).unwrap();

    assert_eq!(
        applied.len(),
        blogging_store::migrations::get_migrations().len()
    );
}
