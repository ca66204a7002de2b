use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::GoogleSettings,
    domain::{ProfileUrl, SearchResult},
};

const NUM_RESULTS: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search provider rejected the api credentials")]
    Unauthorized,
    #[error("search provider quota exceeded")]
    QuotaExceeded,
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed search provider response")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("unexpected search provider status: {0}")]
    UnexpectedStatus(StatusCode),
}

/// Client for the Google custom search json api, restricted to public profile pages.
pub struct GoogleSearch {
    client: Client,
    api_key: String,
    search_engine_id: String,
    base_url: String,
    site: String,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    key: &'a str,
    cx: &'a str,
    q: String,
    num: u8,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
    #[serde(rename = "searchInformation")]
    search_information: Option<SearchInformation>,
}

#[derive(Deserialize)]
struct ApiItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

#[derive(Deserialize)]
struct SearchInformation {
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorReason>,
    #[serde(default)]
    details: Vec<ApiErrorReason>,
}

#[derive(Deserialize)]
struct ApiErrorReason {
    #[serde(default)]
    reason: Option<String>,
}

impl From<ApiItem> for SearchResult {
    fn from(item: ApiItem) -> Self {
        SearchResult {
            title: item.title,
            snippet: item.snippet,
            url: item.link,
        }
    }
}

impl GoogleSearch {
    pub fn new(settings: GoogleSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(GoogleSearch {
            client,
            api_key: settings.api_key,
            search_engine_id: settings.search_engine_id,
            base_url: settings.base_url,
            site: settings.site,
        })
    }

    /// Top search hit for the profile, `None` when the provider has nothing indexed for it.
    pub async fn search(&self, profile: &ProfileUrl) -> Result<Option<SearchResult>, SearchError> {
        let query = SearchQuery {
            key: &self.api_key,
            cx: &self.search_engine_id,
            q: self.build_query(profile),
            num: NUM_RESULTS,
        };
        log::info!("Searching google for: {}", query.q);

        let res = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                // The request url carries the api key
                let e = e.without_url();
                log::error!("No response from google search api, error: {:?}", e);
                SearchError::Unavailable(e.to_string())
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Failed to read google search response body. Error: {:?}", e);
            SearchError::Unavailable(e.to_string())
        })?;

        let result = interpret_response(status, &body);
        match result {
            Ok(None) => log::info!("Found no results on query: {}", query.q),
            Ok(Some(_)) => {}
            Err(ref e) => {
                log::error!("Google search failed on query: {}, error: {:?}", query.q, e)
            }
        }

        result
    }

    fn build_query(&self, profile: &ProfileUrl) -> String {
        format!("site:{} {}", self.site, profile.slug())
    }
}

pub fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<Option<SearchResult>, SearchError> {
    if status.is_success() {
        let response: ApiResponse =
            serde_json::from_str(body).map_err(SearchError::MalformedResponse)?;

        let total_results = response
            .search_information
            .and_then(|info| info.total_results);
        if total_results.as_deref() == Some("0") {
            return Ok(None);
        }

        return Ok(response.items.into_iter().next().map(SearchResult::from));
    }

    let reasons = error_reasons(body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(SearchError::QuotaExceeded),
        StatusCode::FORBIDDEN
            if has_reason(&reasons, &["limitexceeded", "quota", "resourceexhausted"]) =>
        {
            Err(SearchError::QuotaExceeded)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SearchError::Unauthorized),
        StatusCode::BAD_REQUEST if has_reason(&reasons, &["keyinvalid", "keyexpired"]) => {
            Err(SearchError::Unauthorized)
        }
        s if s.is_server_error() => Err(SearchError::Unavailable(format!("status {}", s))),
        s => Err(SearchError::UnexpectedStatus(s)),
    }
}

fn has_reason(reasons: &[String], needles: &[&str]) -> bool {
    reasons
        .iter()
        .any(|reason| needles.iter().any(|needle| reason.contains(needle)))
}

/// Lower-cased, underscore-free error reasons, so `API_KEY_INVALID` and `keyInvalid` both
/// contain `keyinvalid`.
fn error_reasons(body: &str) -> Vec<String> {
    let error = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(body) => body.error,
        Err(_) => return vec![],
    };

    error
        .errors
        .into_iter()
        .chain(error.details)
        .filter_map(|e| e.reason)
        .chain(error.status)
        .map(|reason| reason.to_lowercase().replace('_', ""))
        .collect()
}
