pub mod facebook;
pub mod types;

pub use facebook::*;
pub use types::*;
