pub mod format;

pub use format::{group_thousands, to_toman};
