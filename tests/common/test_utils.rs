use axum::{Router, body::Body, http::Response};
use foodie_finder::{
    config::{Config, SearchConfig},
    query::{PriceTier, QueryGenerator, QueryParameters, StructuredQuery},
    search::{PlacesSearch, Restaurant},
    server::{self, AppState, StageTimeouts},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub const AUTH_CODE: &str = "SECRET";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.auth.code = AUTH_CODE.to_string();
    config.llm.api_key = "test-api-key".to_string();
    config.llm.model = "test-model".to_string();
    config.search.api_key = "fsq-test".to_string();
    config
}

/// Search configuration pointing at a mock provider
pub fn create_search_config(base_url: &str) -> SearchConfig {
    SearchConfig {
        base_url: base_url.to_string(),
        api_key: "fsq-test".to_string(),
        timeout_secs: 2,
        ..SearchConfig::default()
    }
}

pub fn create_test_state(
    generator: impl QueryGenerator + 'static,
    search: impl PlacesSearch + 'static,
) -> AppState {
    AppState {
        auth_code: Arc::from(AUTH_CODE),
        generator: Arc::new(generator),
        search: Arc::new(search),
        timeouts: StageTimeouts {
            generation: Duration::from_secs(5),
            search: Duration::from_secs(5),
        },
    }
}

pub fn create_test_app(
    generator: impl QueryGenerator + 'static,
    search: impl PlacesSearch + 'static,
) -> Router {
    server::router(create_test_state(generator, search))
}

pub fn execute_uri(code: &str, message: &str) -> String {
    let query = serde_urlencoded::to_string(&[("code", code), ("message", message)][..]).unwrap();
    format!("/api/execute?{}", query)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The structured query produced for "cheap sushi near Chicago"
pub fn sushi_query() -> StructuredQuery {
    StructuredQuery {
        action: "search".to_string(),
        parameters: QueryParameters {
            query: "sushi".to_string(),
            near: "Chicago, IL".to_string(),
            min_price: PriceTier::Inexpensive,
            max_price: PriceTier::Moderate,
            rating: 0.0,
            open_now: false,
        },
    }
}

pub fn sushi_restaurant() -> Restaurant {
    Restaurant {
        name: "Sushi Go".to_string(),
        address: "1 Main St".to_string(),
        cuisine: vec!["Sushi".to_string()],
        rating: 8.5,
        price_level: 1,
        hours: "9am-9pm".to_string(),
    }
}

/// Raw provider record as returned by the places API
pub fn sushi_place_json() -> Value {
    json!({
        "name": "Sushi Go",
        "location": { "formatted_address": "1 Main St" },
        "categories": [{ "short_name": "Sushi" }],
        "rating": 8.5,
        "price": 1,
        "hours": { "display": "9am-9pm" }
    })
}

pub fn place_json(index: usize) -> Value {
    json!({
        "name": format!("Place {}", index),
        "location": { "formatted_address": format!("{} Main St", index) },
        "categories": [{ "short_name": "Ramen" }, { "short_name": "Japanese" }],
        "rating": 7.0 + (index as f64) / 10.0,
        "price": (index % 4) + 1,
        "hours": { "display": "Open Daily 11:00 AM-10:00 PM" }
    })
}

pub const SUSHI_MODEL_OUTPUT: &str = r#"{
    "action": "search",
    "parameters": {
        "query": "sushi",
        "near": "Chicago, IL",
        "min_price": "1",
        "max_price": "2",
        "rating": 0,
        "open_now": false
    }
}"#;

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

auth:
  code: "SECRET"

llm:
  base_url: "https://router.huggingface.co/v1"
  api_key: "hf_test"
  model: "Qwen/Qwen3-235B-A22B-Instruct-2507"
  timeout_secs: 20

search:
  base_url: "https://places-api.foursquare.com"
  api_key: "fsq-test"
  timeout_secs: 5
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: "not-a-number"
"#;
