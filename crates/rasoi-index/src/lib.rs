pub mod error;
pub mod index;
pub mod source;

pub use error::FetchError;
pub use index::{CategoryCount, RecipeIndex, RecipeSet};
pub use source::{DirSource, HttpSource, RecipeSource};
