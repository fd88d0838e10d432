use crate::{
    Error,
    error::{FieldError, FieldErrors},
    search::Restaurant,
};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub const SUCCESS_MESSAGE: &str = "Your request has been processed successfully";

pub const MAX_CODE_CHARS: usize = 100;
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Query string of `GET /api/execute`. Fields are optional so that a missing
/// field reaches validation instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteParams {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl Validate for ExecuteParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(error) = check_length(self.code.as_deref(), "Code", MAX_CODE_CHARS) {
            errors.add("code", error);
        }
        if let Some(error) = check_length(self.message.as_deref(), "Message", MAX_MESSAGE_CHARS) {
            errors.add("message", error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_length(value: Option<&str>, label: &str, max: usize) -> Option<ValidationError> {
    let (code, message) = match value {
        None => ("required", format!("{} is required", label)),
        Some(v) if v.is_empty() => ("length", format!("{} is required", label)),
        Some(v) if v.chars().count() > max => (
            "length",
            format!("{} must be at most {} characters", label, max),
        ),
        Some(_) => return None,
    };

    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    Some(error)
}

/// Request that passed structural validation.
#[derive(Debug, Clone)]
pub struct AuthorizedRequest {
    pub code: String,
    pub message: String,
}

impl ExecuteParams {
    pub fn into_request(self) -> Result<AuthorizedRequest, Error> {
        self.validate()
            .map_err(|e| Error::Validation(field_errors(&e)))?;

        match (self.code, self.message) {
            (Some(code), Some(message)) => Ok(AuthorizedRequest { code, message }),
            _ => Err(Error::internal("validated request is missing fields")),
        }
    }
}

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let errors = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), FieldError { errors })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeMessage {
    Text(String),
    Fields(FieldErrors),
}

/// The single response shape for every outcome of `/api/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: EnvelopeMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<Vec<Restaurant>>,
}

impl ResponseEnvelope {
    pub fn success(restaurants: Vec<Restaurant>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            error: None,
            message: EnvelopeMessage::Text(SUCCESS_MESSAGE.to_string()),
            restaurants: Some(restaurants),
        }
    }

    /// Field detail is returned for validation failures only; everything
    /// server-side collapses to a generic message.
    pub fn from_error(error: &Error) -> Self {
        let status = error.status_code();
        let (label, message) = match error {
            Error::Validation(fields) => ("Bad Request", EnvelopeMessage::Fields(fields.clone())),
            Error::Unauthorized => (
                "Unauthorized",
                EnvelopeMessage::Text("Unauthorized access".to_string()),
            ),
            _ => (
                "Internal Server Error",
                EnvelopeMessage::Text("Internal Server Error".to_string()),
            ),
        };

        Self {
            status: status.as_u16(),
            error: Some(label.to_string()),
            message,
            restaurants: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
