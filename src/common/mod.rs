//! Shared types, traits, errors and channels

pub mod channels;
pub mod errors;
pub mod traits;
pub mod types;
