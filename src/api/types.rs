use serde::{Deserialize, Serialize};

/// Error body for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self {
            error: message.into(),
            fields,
        }
    }
}

/// One failed input field and why it failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw `GET /episodes` parameters, before validation.
#[derive(Debug, Default)]
pub struct ListEpisodesParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub watched: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}
