use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

use crate::{
    domain::{ExtractionResponse, ExtractionStatus, SearchResult, StructuredProfile},
    routes::extract_route::{self, ErrorBody, ExtractRequest},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scout",
        description = "Public profile data extractor: structured, deterministic, no AI"
    ),
    paths(extract_route::extract_profile),
    components(schemas(
        ExtractRequest,
        ErrorBody,
        ExtractionResponse,
        ExtractionStatus,
        SearchResult,
        StructuredProfile
    ))
)]
pub struct ApiDoc;

#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
