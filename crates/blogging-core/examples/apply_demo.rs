//! Apply API Demonstration
//!
//! Runs the blog store commands through `apply()` against the in-memory store.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Command-based operations
//! 2. Navigating Blog -> Posts and Post -> Blog
//! 3. Delete policies
//! 4. The BlogNumbers sequence

use blogging_core::{apply, Command, CommandResult, DeletePolicy, ExError, MemoryStore, NewPost};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Blogging Apply API Demo ===\n");

    let mut store = MemoryStore::new();

    // ===== Part 1: Create =====
    println!("## Part 1: Create\n");

    let created = apply(
        &mut store,
        Command::BlogCreateWithPosts {
            url: "http://example.com".to_string(),
            posts: vec![
                NewPost::new("Hello", "World"),
                NewPost::new("Second", "Another post"),
            ],
        },
    )?;
    println!("created: {}", serde_json::to_string(&created)?);

    // ===== Part 2: Navigate =====
    println!("\n## Part 2: Navigate\n");

    if let CommandResult::Blog(blog) = apply(&mut store, Command::BlogGet { blog_id: 1 })? {
        println!("blog {} has {} post(s)", blog.url, blog.posts.len());
    }
    if let CommandResult::Post(with_blog) = apply(&mut store, Command::PostGet { post_id: 2 })? {
        println!(
            "post '{}' belongs to {}",
            with_blog.post.title, with_blog.blog.url
        );
    }

    // ===== Part 3: Delete policies =====
    println!("\n## Part 3: Delete policies\n");

    let refused = apply(
        &mut store,
        Command::BlogDelete {
            blog_id: 1,
            policy: DeletePolicy::Restrict,
        },
    );
    if let Err(e) = refused {
        println!("restrict: {}", ExError::from(e));
    }

    let deleted = apply(
        &mut store,
        Command::BlogDelete {
            blog_id: 1,
            policy: DeletePolicy::Cascade,
        },
    )?;
    println!("cascade: {}", serde_json::to_string(&deleted)?);

    // ===== Part 4: Sequence =====
    println!("\n## Part 4: BlogNumbers\n");

    for _ in 0..3 {
        println!("{}", serde_json::to_string(&apply(&mut store, Command::NextBlogNumber)?)?);
    }

    Ok(())
}
