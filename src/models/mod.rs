pub mod episode;

pub use episode::{Episode, PageResult};
