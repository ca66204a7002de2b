use serde::Serialize;
use utoipa::ToSchema;

use super::{search_result::SearchResult, structured_profile::StructuredProfile};

/// Confidence reported for every profile the search provider returned.
pub const PUBLIC_PROFILE_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    PublicStructured,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExtractionResponse {
    pub status: ExtractionStatus,
    pub confidence: f64,
    pub raw_google_data: Option<SearchResult>,
    pub structured_data: Option<StructuredProfile>,
}

impl ExtractionResponse {
    pub fn found(result: SearchResult, profile: StructuredProfile) -> Self {
        ExtractionResponse {
            status: ExtractionStatus::PublicStructured,
            confidence: PUBLIC_PROFILE_CONFIDENCE,
            raw_google_data: Some(result),
            structured_data: Some(profile),
        }
    }

    pub fn not_found() -> Self {
        ExtractionResponse {
            status: ExtractionStatus::NotFound,
            confidence: 0.0,
            raw_google_data: None,
            structured_data: None,
        }
    }
}
