//! Core types for the snapbridge gateway.
//!
//! This crate defines the pieces shared by the server and its tests:
//! - The uniform response envelope
//! - GitHub `Link` header pagination
//! - Application configuration

pub mod config;
pub mod envelope;
pub mod error;
pub mod pagination;

pub use config::{AppConfig, GitHubConfig, ServerConfig, StoreConfig};
pub use envelope::{Envelope, Payload, Status};
pub use error::{Error, Result};
pub use pagination::PageLinks;
