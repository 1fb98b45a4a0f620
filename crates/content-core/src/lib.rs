//! # content-core
//!
//! Core crate for the torrent content tree. Contains configuration schemas,
//! typed identifiers, the file priority and tri-state vocabulary, the row
//! projection handed to renderers, collaborator traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
