pub mod json;

pub use json::{CacheError, JsonCache};
