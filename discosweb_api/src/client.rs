//! HTTP client for the DISCOSweb API.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{LaunchQuery, ObjectQuery, Query, StageQuery},
    types::{
        LaunchAttributes, ListResponse, ObjectAttributes, OptionalResponse, RateLimitState, Record,
        StageAttributes, VehicleAttributes,
    },
    Error,
};

/// Request timeout for every API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API version requested through the `DiscosWeb-Api-Version` header.
pub const DEFAULT_API_VERSION: &str = "2";

pub const DEFAULT_BASE_URL: &str = "https://discosweb.esoc.esa.int";

/// HTTP client for the DISCOSweb API.
///
/// Every request carries the bearer token and the API version header.
/// Non-success responses are returned as [`Error::HttpStatus`] together with
/// the rate-limit headers; this client never retries on its own.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `https://discosweb.esoc.esa.int`.
    base_api_url: String,
    token: String,
    api_version: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("token", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Client {
    /// Creates a new client pointing at the production DISCOSweb API.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("discosweb/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Overrides the `DiscosWeb-Api-Version` header value.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/api{}", &self.base_api_url, path).as_str()).map_err(
            |e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            },
        )?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("DiscosWeb-Api-Version", &self.api_version)
            .header("accept", "application/vnd.api+json, application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let rate_limit = RateLimitState::from_headers(resp.headers());
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
                rate_limit,
            });
        }

        if let Some(remaining) = rate_limit.remaining {
            tracing::debug!("{} requests remaining in the current window", remaining);
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one page of launches matching the given query.
    pub async fn get_launches(
        &self,
        query: &LaunchQuery,
    ) -> Result<ListResponse<Record<LaunchAttributes>>, Error> {
        self.get::<ListResponse<Record<LaunchAttributes>>, LaunchQuery>("/launches", Some(query))
            .await
    }

    /// Fetches one page of the objects placed in orbit by a launch.
    pub async fn get_launch_objects(
        &self,
        launch_id: &str,
        query: &ObjectQuery,
    ) -> Result<ListResponse<Record<ObjectAttributes>>, Error> {
        self.get::<ListResponse<Record<ObjectAttributes>>, ObjectQuery>(
            format!("/launches/{}/objects", launch_id).as_str(),
            Some(query),
        )
        .await
    }

    /// Fetches the vehicle of a launch. `data` is `None` when the registry has
    /// no vehicle for it.
    pub async fn get_launch_vehicle(
        &self,
        launch_id: &str,
    ) -> Result<OptionalResponse<Record<VehicleAttributes>>, Error> {
        self.get::<OptionalResponse<Record<VehicleAttributes>>, StageQuery>(
            format!("/launches/{}/vehicle", launch_id).as_str(),
            None,
        )
        .await
    }

    /// Fetches one page of the stages of a launch vehicle.
    pub async fn get_vehicle_stages(
        &self,
        vehicle_id: &str,
        query: &StageQuery,
    ) -> Result<ListResponse<Record<StageAttributes>>, Error> {
        self.get::<ListResponse<Record<StageAttributes>>, StageQuery>(
            format!("/launch-vehicles/{}/stages", vehicle_id).as_str(),
            Some(query),
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
