pub mod types;

pub use types::{Card, Category, Tag};
