//! Heterogeneous recommendation feed
//!
//! - `normalize`: flatten tagged items into one post per review or book
//! - `pagination`: append/replace merge with duplicate diagnostics
//! - `pipeline`: facet reads and the combined recommendation request
//! - `home`: the home view with its guard, reentrancy guard and staleness check

mod home;
pub mod normalize;
pub mod pagination;
mod pipeline;

pub use home::{FeedSnapshot, HomeFeed, HomeInit, LoadOutcome};
pub use pagination::PaginatedFeed;
pub use pipeline::{gather_facets, FeedPipeline, FetchedPage};
