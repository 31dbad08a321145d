//! CLI integration tests
//!
//! Drive the built `blogging` binary against a database in a temp directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rusqlite::Connection;
use serde_json::{json, Value};
use tempfile::TempDir;

fn blogging(dir: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_blogging");
    Command::new(cli_bin)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env_remove("BLOGGING_DB_PATH")
        .env_remove("BLOGGING_DELETE_POLICY")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn blogging_json(dir: &Path, args: &[&str]) -> Value {
    let output = blogging(dir, args);
    assert!(
        output.status.success(),
        "CLI command {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_cli_example_blog_with_post() {
    // Given: An empty working directory
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    // When: A blog and a post are created
    let created = blogging_json(dir, &["--db", "blog.db", "blog", "create", "http://example.com"]);
    let post = blogging_json(dir, &["--db", "blog.db", "post", "create", "1", "Hello", "World"]);

    // Then: Both ids are 1 and the blog shows the post
    assert_eq!(created, json!({"blog_id": 1}));
    assert_eq!(post, json!({"post_id": 1}));
    assert_eq!(
        blogging_json(dir, &["--db", "blog.db", "blog", "get", "1"]),
        json!({
            "blog_id": 1,
            "url": "http://example.com",
            "posts": [{"post_id": 1, "title": "Hello", "content": "World", "blog_id": 1}]
        })
    );
}

#[test]
fn test_cli_default_db_path_created() {
    let temp_dir = TempDir::new().unwrap();

    blogging_json(temp_dir.path(), &["blog", "create", "http://example.com"]);

    assert!(temp_dir.path().join(".blogging").join("blog.db").exists());
}

#[test]
fn test_cli_post_for_missing_blog_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = blogging(
        temp_dir.path(),
        &["--db", "blog.db", "post", "create", "7", "Hello", "World"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: [ERR_FOREIGN_KEY_VIOLATION]"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_delete_policy_from_config_and_flag() {
    // Given: A config file choosing restrict, and a blog with a post
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(
        dir.join("blogging.toml"),
        "db_path = \"configured.db\"\ndelete_policy = \"restrict\"\n",
    )
    .unwrap();
    blogging_json(dir, &["blog", "create", "http://example.com"]);
    blogging_json(dir, &["post", "create", "1", "Hello"]);

    // When: Deleting without --policy
    let refused = blogging(dir, &["blog", "delete", "1"]);

    // Then: The configured restrict policy refuses
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("still has 1 post"));

    // And: An explicit --policy cascade goes through
    let outcome = blogging_json(dir, &["blog", "delete", "1", "--policy", "cascade"]);
    assert_eq!(
        outcome,
        json!({"blog_id": 1, "policy": "cascade", "posts_deleted": 1})
    );
    assert!(dir.join("configured.db").exists());
}

#[test]
fn test_cli_update_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    blogging_json(dir, &["--db", "blog.db", "blog", "create", "http://a.example"]);
    blogging_json(dir, &["--db", "blog.db", "blog", "create", "http://b.example"]);
    blogging_json(dir, &["--db", "blog.db", "post", "create", "1", "Hello", "World"]);

    let blog = blogging_json(
        dir,
        &["--db", "blog.db", "blog", "update", "1", "--url", "http://moved.example"],
    );
    assert_eq!(blog, json!({"blog_id": 1, "url": "http://moved.example"}));

    let post = blogging_json(
        dir,
        &["--db", "blog.db", "post", "update", "1", "--blog-id", "2", "--title", "Hi"],
    );
    assert_eq!(
        post,
        json!({"post_id": 1, "title": "Hi", "content": "World", "blog_id": 2})
    );

    let blogs = blogging_json(dir, &["--db", "blog.db", "blog", "list"]);
    assert_eq!(blogs.as_array().unwrap().len(), 2);
    let posts = blogging_json(dir, &["--db", "blog.db", "post", "list", "2"]);
    assert_eq!(posts[0]["post_id"], json!(1));
}

#[test]
fn test_cli_sequence_next_persists() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let first = blogging_json(dir, &["--db", "blog.db", "sequence", "next"]);
    let second = blogging_json(dir, &["--db", "blog.db", "sequence", "next"]);

    assert_eq!(first, json!({"value": 1}));
    assert_eq!(second, json!({"value": 2}));
}

#[test]
fn test_cli_migrate_records_versions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let applied = blogging_json(dir, &["--db", "blog.db", "migrate"]);

    let ids: Vec<_> = applied
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["migration_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["001_initial_schema", "002_blog_numbers_sequence"]);

    let conn = Connection::open(dir.join("blog.db")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_cli_get_missing_blog() {
    let temp_dir = TempDir::new().unwrap();

    let output = blogging(temp_dir.path(), &["--db", "blog.db", "blog", "get", "9"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_NOT_FOUND] in operation 'get_blog'"));
}
