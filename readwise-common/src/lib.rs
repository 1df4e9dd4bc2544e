//! # Readwise Common Library
//!
//! Shared code for the Readwise client crates including:
//! - Wire types for the book/review backend (books, threads, feed items)
//! - Error taxonomy for remote calls
//! - Configuration loading
//! - Avatar descriptor generation
//! - Client event bus (toasts, navigation, feed updates)
//! - Timestamp formatting

pub mod avatar;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod models;
pub mod route;
pub mod time;

pub use error::{Error, Result};
pub use ids::{Identity, RefId};
pub use route::Route;
