//! Data models

pub mod user_input;
pub mod prediction;

pub use user_input::*;
pub use prediction::*;
