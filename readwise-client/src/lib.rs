//! # Readwise Client
//!
//! Client-side flows for the Readwise book discovery service:
//! - [`api`]: the `Backend` seam and its HTTP implementation
//! - [`session`]: identity supplied by the external sign-in provider
//! - [`onboarding`]: entry guard and four-step profile wizard
//! - [`feed`]: recommendation feed fetch, flatten and pagination
//! - [`cards`]: one presentation card per post kind
//! - [`actions`]: likes, comments, review threads, rentals and purchases
//! - [`search`], [`discover`], [`detail`], [`profile`], [`thread_view`]: the
//!   remaining views

pub mod actions;
pub mod api;
pub mod cards;
pub mod detail;
pub mod discover;
pub mod feed;
pub mod onboarding;
pub mod profile;
pub mod search;
pub mod session;
pub mod status;
pub mod thread_view;

pub use api::{ApiClient, Backend};
pub use session::{Session, SessionState, StaticSession};
pub use status::ViewStatus;
