pub mod blog_ops;
pub mod blog_store;
pub mod post_ops;
pub mod store;

pub use blog_store::BlogStore;
pub use store::MemoryStore;
