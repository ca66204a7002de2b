use actix_web::{
    error::JsonPayloadError, http::StatusCode, post, web, HttpRequest, HttpResponse,
    ResponseError,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{extract, ExtractionResponse, ProfileUrl, ProfileUrlError},
    services::{GoogleSearch, SearchError},
};

#[derive(Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Public profile url, e.g. `https://www.linkedin.com/in/john-doe`
    pub linkedin_url: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid LinkedIn URL: {0}")]
    InvalidInput(#[from] ProfileUrlError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ExtractError {
    fn detail(&self) -> String {
        match self {
            ExtractError::InvalidInput(_) | ExtractError::InvalidBody(_) => self.to_string(),
            ExtractError::Search(SearchError::Unauthorized) => {
                "Search provider rejected credentials".to_string()
            }
            ExtractError::Search(SearchError::QuotaExceeded) => {
                "Search provider quota exceeded".to_string()
            }
            ExtractError::Search(SearchError::Unavailable(_)) => {
                "Search provider unavailable".to_string()
            }
            ExtractError::Search(_) => "Search provider returned an invalid response".to_string(),
        }
    }
}

impl ResponseError for ExtractError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExtractError::InvalidInput(_) | ExtractError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ExtractError::Search(SearchError::QuotaExceeded) => StatusCode::TOO_MANY_REQUESTS,
            ExtractError::Search(SearchError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ExtractError::Search(
                SearchError::Unauthorized
                | SearchError::MalformedResponse(_)
                | SearchError::UnexpectedStatus(_),
            ) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.detail(),
        })
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected extract request body: {}", err);
    ExtractError::InvalidBody(err.to_string()).into()
}

/// Look up a public profile through the search provider and parse it into structured fields.
#[utoipa::path(
    post,
    path = "/extract",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Profile found or not indexed", body = ExtractionResponse),
        (status = 400, description = "Invalid profile url or request body", body = ErrorBody),
        (status = 429, description = "Search provider quota exceeded", body = ErrorBody),
        (status = 502, description = "Search provider rejected the request", body = ErrorBody),
        (status = 503, description = "Search provider unreachable", body = ErrorBody),
    )
)]
#[post("/extract")]
pub async fn extract_profile(
    body: web::Json<ExtractRequest>,
    google_search: web::Data<GoogleSearch>,
) -> Result<HttpResponse, ExtractError> {
    let profile_url = ProfileUrl::parse(&body.linkedin_url).map_err(|e| {
        log::warn!("Invalid profile url {:?}: {}", body.linkedin_url, e);
        e
    })?;

    let response = match google_search.search(&profile_url).await? {
        Some(result) => {
            let profile = extract(&result);
            ExtractionResponse::found(result, profile)
        }
        None => ExtractionResponse::not_found(),
    };

    Ok(HttpResponse::Ok().json(response))
}
