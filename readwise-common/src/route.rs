//! Client routes
//!
//! Guards and views return a [`Route`] to navigate to instead of navigating
//! themselves; the host (CLI, UI shell) decides what following it means.

use crate::RefId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind prefix used by post-scoped endpoints (`thread_<id>`, `review_<id>`, `book_<id>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKindTag {
    Thread,
    Review,
    Book,
}

impl PostKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKindTag::Thread => "thread",
            PostKindTag::Review => "review",
            PostKindTag::Book => "book",
        }
    }

    /// `<kind>_<id>` key
    pub fn scoped_id(&self, id: &str) -> String {
        format!("{}_{}", self.as_str(), id)
    }

    /// Split a `<kind>_<id>` key
    pub fn parse_scoped(key: &str) -> Option<(PostKindTag, &str)> {
        let (kind, id) = key.split_once('_')?;
        let kind = kind.parse().ok()?;
        if id.is_empty() {
            return None;
        }
        Some((kind, id))
    }
}

impl std::str::FromStr for PostKindTag {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "thread" => Ok(PostKindTag::Thread),
            "review" => Ok(PostKindTag::Review),
            "book" => Ok(PostKindTag::Book),
            other => Err(crate::Error::InvalidInput(format!("unknown post kind '{}'", other))),
        }
    }
}

impl fmt::Display for PostKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigable destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    SignIn,
    Onboarding,
    Home,
    Discover,
    Search,
    BookDetail(RefId),
    Thread { kind: PostKindTag, id: String },
    Profile(String),
    Rent { book_id: RefId, user_id: String },
    Purchase { book_id: RefId, user_id: String },
}

impl Route {
    /// URL path of the route
    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/sign-in".to_string(),
            Route::Onboarding => "/onboarding".to_string(),
            Route::Home => "/".to_string(),
            Route::Discover => "/discover".to_string(),
            Route::Search => "/search".to_string(),
            Route::BookDetail(id) => format!("/details/{}", id),
            Route::Thread { kind, id } => format!("/thread/{}", kind.scoped_id(id)),
            Route::Profile(id) => format!("/profile/{}", id),
            Route::Rent { book_id, user_id } => format!("/rentals/{}/{}", book_id, user_id),
            Route::Purchase { book_id, user_id } => format!("/purchase/{}/{}", book_id, user_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
