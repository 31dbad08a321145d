pub mod invariants;
pub mod validation;

pub use validation::{validate_store, validate_title, validate_url};
