use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::MissingFields;
use crate::record_store_client::RecordStoreError;
use crate::utility::error_chain_fmt;

use super::{ALLOWED_HEADERS, ALLOWED_METHODS};

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    MissingFields(#[from] MissingFields),
    #[error("Failed to save the waitlist entry")]
    Upstream(#[source] RecordStoreError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<RecordStoreError> for WaitlistError {
    fn from(e: RecordStoreError) -> Self {
        match e {
            RecordStoreError::Rejected { .. } => WaitlistError::Upstream(e),
            RecordStoreError::Request(_)
            | RecordStoreError::Decode(_)
            | RecordStoreError::NoRecordCreated => WaitlistError::Unexpected(e.into()),
        }
    }
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<&'a [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl WaitlistError {
    /// Renders the JSON error envelope. Upstream and unexpected failures only
    /// carry their underlying error text when `expose_details` is set.
    pub fn response(&self, expose_details: bool) -> HttpResponse {
        match self {
            WaitlistError::MethodNotAllowed => HttpResponse::MethodNotAllowed()
                .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
                .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
                .json(ErrorBody {
                    error: "Method Not Allowed",
                    missing_fields: None,
                    details: None,
                }),
            WaitlistError::MissingFields(missing) => HttpResponse::BadRequest().json(ErrorBody {
                error: "Missing required fields",
                missing_fields: Some(missing.0.as_slice()),
                details: None,
            }),
            WaitlistError::Upstream(e) => {
                let details = match e {
                    RecordStoreError::Rejected { body, .. } if expose_details => body.clone(),
                    _ => "Internal server error".to_string(),
                };
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Failed to save data",
                    missing_fields: None,
                    details: Some(details),
                })
            }
            WaitlistError::Unexpected(e) => {
                let details = if expose_details {
                    format!("{:#}", e)
                } else {
                    "Something went wrong".to_string()
                };
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Internal server error",
                    missing_fields: None,
                    details: Some(details),
                })
            }
        }
    }
}

impl ResponseError for WaitlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WaitlistError::MissingFields(_) => StatusCode::BAD_REQUEST,
            WaitlistError::Upstream(_) | WaitlistError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // Redacted unless the handler builds the response itself.
    fn error_response(&self) -> HttpResponse {
        self.response(false)
    }
}
