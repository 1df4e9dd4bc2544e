//! Book records

use super::lenient_string_list;
use crate::RefId;
use serde::{Deserialize, Serialize};

/// Bare book summary, the payload of a `fallback` feed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub book_id: RefId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string_list", skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list", skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

/// Catalog record returned by search, detail, batch lookup and commerce lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub book_id: RefId,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "authors", deserialize_with = "lenient_string_list")]
    pub authors_names: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Search result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    #[default]
    Relevance,
    Rating,
    YearDesc,
    YearAsc,
    Title,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Relevance => "relevance",
            SearchSort::Rating => "rating",
            SearchSort::YearDesc => "year_desc",
            SearchSort::YearAsc => "year_asc",
            SearchSort::Title => "title",
        }
    }
}

impl std::str::FromStr for SearchSort {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "relevance" => Ok(SearchSort::Relevance),
            "rating" => Ok(SearchSort::Rating),
            "year_desc" => Ok(SearchSort::YearDesc),
            "year_asc" => Ok(SearchSort::YearAsc),
            "title" => Ok(SearchSort::Title),
            other => Err(crate::Error::InvalidInput(format!("unknown sort '{}'", other))),
        }
    }
}

/// Parameters of `GET /books/search`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
    pub limit: u32,
    pub genres: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub sort: SearchSort,
}

impl SearchQuery {
    /// Query-string pairs; unset filters and the default sort are omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.text.clone()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(genres) = self.genres.as_ref().filter(|g| !g.trim().is_empty()) {
            pairs.push(("genres", genres.clone()));
        }
        if let Some(year) = self.year_min {
            pairs.push(("year_min", year.to_string()));
        }
        if let Some(year) = self.year_max {
            pairs.push(("year_max", year.to_string()));
        }
        if self.sort != SearchSort::Relevance {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        pairs
    }
}

/// Body of `GET /books/search`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub total: u64,
}
