use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::{NEW_ENTRY_STATUS, WaitlistEntry};
use crate::utility::error_chain_fmt;

/// Client for the Airtable records API, scoped to a single table.
#[derive(Debug)]
pub struct RecordStoreClient {
    http_client: Client,
    table_url: Url,
    access_token: SecretString,
}

#[derive(thiserror::Error)]
pub enum RecordStoreError {
    #[error("Failed to send the request to the record store.")]
    Request(#[source] reqwest::Error),
    #[error("The record store rejected the record with status {status}.")]
    Rejected { status: StatusCode, body: String },
    #[error("Failed to decode the record store response.")]
    Decode(#[source] reqwest::Error),
    #[error("The record store did not return the created record.")]
    NoRecordCreated,
}

impl std::fmt::Debug for RecordStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl RecordStoreClient {
    pub fn new(
        base_url: &str,
        base_id: &str,
        table_name: &str,
        access_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let mut table_url = Url::parse(base_url)
            .with_context(|| format!("{} is not a valid record store url", base_url))?;
        table_url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("{} cannot be used as a base url", base_url))?
            .pop_if_empty()
            .push(base_id)
            .push(table_name);
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the record store http client")?;
        Ok(Self {
            http_client,
            table_url,
            access_token,
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// Creates one record and returns its id.
    ///
    /// A single attempt is made: failures are not retried.
    #[tracing::instrument(name = "Create a record in the record store", skip(self, entry))]
    pub async fn create_record(&self, entry: &WaitlistEntry) -> Result<String, RecordStoreError> {
        let request_body = CreateRecordsRequest {
            records: vec![NewRecord {
                fields: RecordFields::from(entry),
            }],
        };
        let response = self
            .http_client
            .post(self.table_url.clone())
            .bearer_auth(self.access_token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(RecordStoreError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(RecordStoreError::Decode)?;
            tracing::error!(%status, error.body = %body, "Record store rejected the record");
            return Err(RecordStoreError::Rejected { status, body });
        }

        let created: CreateRecordsResponse =
            response.json().await.map_err(RecordStoreError::Decode)?;
        created
            .records
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or(RecordStoreError::NoRecordCreated)
    }
}

#[derive(serde::Serialize)]
struct CreateRecordsRequest<'a> {
    records: Vec<NewRecord<'a>>,
}

#[derive(serde::Serialize)]
struct NewRecord<'a> {
    fields: RecordFields<'a>,
}

/// Column names of the waitlist table.
#[derive(serde::Serialize)]
struct RecordFields<'a> {
    #[serde(rename = "First Name")]
    first_name: &'a str,
    #[serde(rename = "Last Name")]
    last_name: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Website")]
    website: &'a str,
    #[serde(rename = "Sell Today")]
    sell_today: &'a [String],
    #[serde(rename = "Other Countries")]
    other_countries: String,
    #[serde(rename = "Revenue")]
    revenue: &'a str,
    #[serde(rename = "Customers")]
    customers: &'a str,
    #[serde(rename = "Commit Bratislava")]
    commit_bratislava: &'a str,
    #[serde(rename = "Commit Amsterdam")]
    commit_amsterdam: &'a str,
    #[serde(rename = "Expectations")]
    expectations: &'a str,
    #[serde(rename = "Additional Information")]
    additional_info: &'a str,
    #[serde(rename = "Submission Date")]
    submission_date: String,
    #[serde(rename = "Status")]
    status: &'static str,
}

impl<'a> From<&'a WaitlistEntry> for RecordFields<'a> {
    fn from(entry: &'a WaitlistEntry) -> Self {
        Self {
            first_name: entry.first_name.as_ref(),
            last_name: entry.last_name.as_ref(),
            email: entry.email.as_ref(),
            company: entry.company.as_ref(),
            website: entry.website.as_ref(),
            sell_today: &entry.countries.recognized,
            other_countries: entry.countries.other_joined(),
            revenue: entry.revenue.as_ref(),
            customers: entry.customers.as_ref(),
            commit_bratislava: entry.commit_bratislava.as_ref(),
            commit_amsterdam: entry.commit_amsterdam.as_ref(),
            expectations: entry.expectations.as_ref(),
            additional_info: entry.additional_info.as_ref(),
            submission_date: entry.submission_date.format("%Y-%m-%d").to_string(),
            status: NEW_ENTRY_STATUS,
        }
    }
}

#[derive(serde::Deserialize)]
struct CreateRecordsResponse {
    records: Vec<CreatedRecord>,
}

#[derive(serde::Deserialize)]
struct CreatedRecord {
    id: String,
}
