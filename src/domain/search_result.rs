use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top hit returned by the search provider for a profile query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}
