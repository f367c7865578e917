pub mod recipe;
pub mod video;

pub use recipe::{Recipe, Reference};
pub use video::Video;
