//! News module - client implementation for the Seeking Alpha news API

pub mod messages;
pub mod rest;

pub use rest::SeekingAlphaClient;
