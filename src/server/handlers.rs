use super::types::{ExecuteParams, ResponseEnvelope};
use crate::{
    Error, Result,
    error::{FieldError, FieldErrors},
    query::QueryGenerator,
    search::{PlacesSearch, Restaurant},
};
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Json,
};
use std::{sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub auth_code: Arc<str>,
    pub generator: Arc<dyn QueryGenerator>,
    pub search: Arc<dyn PlacesSearch>,
    pub timeouts: StageTimeouts,
}

/// Upper bound on each outbound stage of a request.
#[derive(Debug, Clone, Copy)]
pub struct StageTimeouts {
    pub generation: Duration,
    pub search: Duration,
}

pub async fn root() -> &'static str {
    "Hello world!"
}

pub async fn execute(
    State(state): State<AppState>,
    params: std::result::Result<Query<ExecuteParams>, QueryRejection>,
) -> (StatusCode, Json<ResponseEnvelope>) {
    let request_id = Uuid::new_v4();
    let span = info_span!("execute", %request_id);

    let envelope = match process(&state, params).instrument(span).await {
        Ok(restaurants) => ResponseEnvelope::success(restaurants),
        Err(e) => ResponseEnvelope::from_error(&e),
    };

    (envelope.status_code(), Json(envelope))
}

async fn process(
    state: &AppState,
    params: std::result::Result<Query<ExecuteParams>, QueryRejection>,
) -> Result<Vec<Restaurant>> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Malformed query string: {}", rejection.body_text());
        let mut fields = FieldErrors::new();
        fields.insert(
            "query".to_string(),
            FieldError {
                errors: vec![rejection.body_text()],
            },
        );
        Error::Validation(fields)
    })?;

    let request = params
        .into_request()
        .inspect_err(|e| warn!("Validation errors: {}", e))?;

    // Only checked once the request is structurally valid.
    if request.code != *state.auth_code {
        warn!("Unauthorized access attempt with code: {}", request.code);
        return Err(Error::Unauthorized);
    }

    info!("Generating structured query for message: {}", request.message);

    let query = timeout(
        state.timeouts.generation,
        state.generator.generate(&request.message),
    )
    .await
    .map_err(|_| Error::generation("Timed out waiting for the language model"))?
    .map_err(|e| match e {
        Error::Generation(_) => e,
        other => Error::generation(other.to_string()),
    })
    .inspect_err(|e| error!("Error generating structure: {}", e))?;

    info!(
        action = %query.action,
        query = %query.parameters.query,
        near = %query.parameters.near,
        "Generated structured query"
    );

    let restaurants = timeout(state.timeouts.search, state.search.search(&query))
        .await
        .map_err(|_| Error::search("Timed out waiting for the places provider"))?
        .map_err(|e| match e {
            Error::Search(_) => e,
            other => Error::search(other.to_string()),
        })
        .inspect_err(|e| error!("Error getting restaurants: {}", e))?;

    info!("Successfully found {} restaurants", restaurants.len());

    Ok(restaurants)
}
