mod error;

pub use error::WaitlistError;

use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use anyhow::Context;
use futures_util::StreamExt;

use crate::domain::{SellToday, WaitlistEntry};
use crate::record_store_client::RecordStoreClient;
use crate::startup::{ExposeErrorDetails, MaxBodyBytes};

pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// The waitlist form as posted by the landing page.
/// Every field is optional here; completeness is checked by `WaitlistEntry`.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub sell_today: Option<SellToday>,
    pub revenue: Option<String>,
    pub customers: Option<String>,
    pub commit_bratislava: Option<String>,
    pub commit_amsterdam: Option<String>,
    pub expectations: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionAccepted {
    success: bool,
    message: &'static str,
    record_id: String,
}

pub async fn waitlist_preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .finish()
}

pub async fn waitlist_method_not_allowed() -> Result<HttpResponse, WaitlistError> {
    Err(WaitlistError::MethodNotAllowed)
}

#[tracing::instrument(
    name = "Adding a new waitlist entry",
    skip(payload, record_store_client, expose_error_details, max_body_bytes),
    fields(entry_email = tracing::field::Empty, entry_company = tracing::field::Empty)
)]
pub async fn submit_waitlist(
    payload: web::Payload,
    record_store_client: web::Data<RecordStoreClient>,
    expose_error_details: web::Data<ExposeErrorDetails>,
    max_body_bytes: web::Data<MaxBodyBytes>,
) -> Result<HttpResponse, InternalError<WaitlistError>> {
    match store_submission(payload, max_body_bytes.0, &record_store_client).await {
        Ok(record_id) => Ok(HttpResponse::Ok().json(SubmissionAccepted {
            success: true,
            message: "Successfully added to waitlist",
            record_id,
        })),
        Err(e) => {
            let response = e.response(expose_error_details.0);
            Err(InternalError::from_response(e, response))
        }
    }
}

async fn store_submission(
    payload: web::Payload,
    max_body_bytes: usize,
    record_store_client: &RecordStoreClient,
) -> Result<String, WaitlistError> {
    let body = read_body(payload, max_body_bytes).await?;
    let form: SubmissionForm =
        serde_json::from_slice(&body).context("Failed to parse the waitlist submission body")?;
    let entry: WaitlistEntry = form.try_into()?;

    let span = tracing::Span::current();
    span.record("entry_email", tracing::field::display(&entry.email));
    span.record("entry_company", tracing::field::display(&entry.company));
    tracing::info!(
        recognized_countries = ?entry.countries.recognized,
        other_countries = ?entry.countries.other,
        "Cleaned country selection"
    );

    let record_id = record_store_client.create_record(&entry).await?;
    tracing::info!(%record_id, "Waitlist entry stored");
    Ok(record_id)
}

/// Collects the request body, failing once it grows past `max_body_bytes`.
async fn read_body(
    mut payload: web::Payload,
    max_body_bytes: usize,
) -> Result<web::BytesMut, anyhow::Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.context("Failed to read the waitlist submission body")?;
        if body.len() + chunk.len() > max_body_bytes {
            anyhow::bail!(
                "The waitlist submission body is larger than {} bytes",
                max_body_bytes
            );
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
