//! HTTP request handlers.

pub mod github;
pub mod health;
pub mod store;

pub use github::*;
pub use health::*;
pub use store::*;
