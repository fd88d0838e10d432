use super::types::{PlacesResponse, Restaurant};
use crate::{Error, Result, config::SearchConfig, query::StructuredQuery};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, error};

const SEARCH_PATH: &str = "/places/search";
const API_VERSION_HEADER: &str = "X-Places-Api-Version";

/// Places search provider seam.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(&self, query: &StructuredQuery) -> Result<Vec<Restaurant>>;
}

pub struct FoursquareClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    api_version: String,
    fields: String,
}

impl FoursquareClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", config.base_url.trim_end_matches('/'), SEARCH_PATH),
            api_key: config.api_key,
            api_version: config.api_version,
            fields: config.fields,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn query_params(&self, query: &StructuredQuery) -> Vec<(&'static str, String)> {
        let p = &query.parameters;
        vec![
            ("query", p.query.clone()),
            ("near", p.near.clone()),
            ("min_price", p.min_price.to_string()),
            ("max_price", p.max_price.to_string()),
            ("open_now", p.open_now.to_string()),
            ("rating", p.rating.to_string()),
            ("fields", self.fields.clone()),
        ]
    }
}

#[async_trait]
impl PlacesSearch for FoursquareClient {
    async fn search(&self, query: &StructuredQuery) -> Result<Vec<Restaurant>> {
        debug!(
            "Searching places for '{}' near '{}'",
            query.parameters.query, query.parameters.near
        );

        let response = self
            .client
            .get(&self.url)
            .query(&self.query_params(query))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(API_VERSION_HEADER, &self.api_version)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Places request failed: {}", e);
                Error::search(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Places API returned HTTP {}: {}", status, body);
            return Err(Error::search(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::search(format!("Failed to read response body: {}", e)))?;

        let parsed: PlacesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::search(format!("Failed to parse places response: {}", e)))?;

        debug!("Places API returned {} results", parsed.results.len());

        Ok(parsed.results.into_iter().map(Restaurant::from).collect())
    }
}
