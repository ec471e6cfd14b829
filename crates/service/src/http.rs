//! # HTTP clients
//!
//! [`ShiftService`] and [`AgencyDirectory`] implementations that call the
//! scheduling backend over JSON. Non-success statuses become errors carrying
//! the response body, except for business failures of the mutating calls,
//! which the backend reports as a [`ServiceResponse`] with `success: false`.

use std::collections::HashMap;

use async_trait::async_trait;
use carehive_core::{
    models::{
        directory::{CaregiverAssignment, Elder, NameLookupRequest, NameLookupResponse},
        shift::{NewShift, ScheduledShift, ServiceResponse},
    },
    role::UserProfile,
};
use chrono::NaiveDate;
use eyre::{eyre, Result, WrapErr};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::{AgencyDirectory, ShiftService};

/// Connection settings shared by both clients.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ServiceEndpoint {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .wrap_err_with(|| format!("Invalid service URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| eyre!("Service URL {} cannot take a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

async fn error_for_status(response: Response, what: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(eyre!("Failed to {}: {} {}", what, status, body))
}

/// Reads a mutating call's reply. Rejections with a JSON body are business
/// failures and come back as an unsuccessful [`ServiceResponse`]; any body
/// that is not a reply is an error, whatever the status.
fn parse_service_response(status: StatusCode, body: &str, what: &str) -> Result<ServiceResponse> {
    serde_json::from_str::<ServiceResponse>(body)
        .map_err(|_| eyre!("Failed to {}: {} {}", what, status, body))
}

async fn read_service_response(response: Response, what: &str) -> Result<ServiceResponse> {
    let status = response.status();
    let body = response.text().await?;
    parse_service_response(status, &body, what)
}

pub struct HttpShiftService {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl HttpShiftService {
    pub fn new(client: Client, endpoint: ServiceEndpoint) -> Self {
        Self { client, endpoint }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
        what: &str,
    ) -> Result<ServiceResponse> {
        let request = self.client.post(self.endpoint.url(segments)?).json(body);
        let response = self
            .endpoint
            .authorize(request)
            .send()
            .await
            .wrap_err_with(|| format!("Failed to {}", what))?;

        read_service_response(response, what).await
    }
}

#[async_trait]
impl ShiftService for HttpShiftService {
    async fn create_shift(&self, shift: &NewShift) -> Result<ServiceResponse> {
        debug!(
            "Creating shift: agency={}, caregiver={}, elder={}, date={}",
            shift.agency_id, shift.caregiver_id, shift.elder_id, shift.date
        );
        self.post(&["api", "scheduled-shifts"], shift, "create shift")
            .await
    }

    async fn confirm_shift(&self, shift_id: &str, user_id: &str) -> Result<ServiceResponse> {
        debug!("Confirming shift {}", shift_id);
        self.post(
            &["api", "scheduled-shifts", shift_id, "confirm"],
            &json!({ "userId": user_id }),
            "confirm shift",
        )
        .await
    }

    async fn cancel_shift(
        &self,
        shift_id: &str,
        user_id: &str,
        reason: &str,
    ) -> Result<ServiceResponse> {
        debug!("Cancelling shift {}", shift_id);
        self.post(
            &["api", "scheduled-shifts", shift_id, "cancel"],
            &json!({ "userId": user_id, "reason": reason }),
            "cancel shift",
        )
        .await
    }

    async fn get_scheduled_shifts(
        &self,
        agency_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledShift>> {
        debug!("Fetching shifts for agency {} from {} to {}", agency_id, start, end);
        let request = self
            .client
            .get(self.endpoint.url(&["api", "scheduled-shifts"])?)
            .query(&[
                ("agencyId", agency_id.to_string()),
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ]);

        let response = self.endpoint.authorize(request).send().await?;
        let response = error_for_status(response, "fetch shifts").await?;
        Ok(response.json().await?)
    }
}

pub struct HttpAgencyDirectory {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl HttpAgencyDirectory {
    pub fn new(client: Client, endpoint: ServiceEndpoint) -> Self {
        Self { client, endpoint }
    }

    async fn get(&self, segments: &[&str], what: &str) -> Result<Response> {
        let request = self.client.get(self.endpoint.url(segments)?);
        let response = self.endpoint.authorize(request).send().await?;
        error_for_status(response, what).await
    }
}

#[async_trait]
impl AgencyDirectory for HttpAgencyDirectory {
    async fn resolve_names(
        &self,
        user_ids: &[String],
        agency_id: &str,
    ) -> Result<HashMap<String, String>> {
        let body = NameLookupRequest {
            user_ids: user_ids.to_vec(),
            agency_id: agency_id.to_string(),
        };
        let request = self
            .client
            .post(self.endpoint.url(&["api", "caregiver-names"])?)
            .json(&body);

        let response = self.endpoint.authorize(request).send().await?;
        let response = error_for_status(response, "resolve caregiver names").await?;
        let lookup: NameLookupResponse = response.json().await?;
        Ok(lookup.names)
    }

    async fn caregiver_assignments(&self, agency_id: &str) -> Result<Vec<CaregiverAssignment>> {
        let response = self
            .get(
                &["api", "agencies", agency_id, "caregiver-assignments"],
                "fetch caregiver assignments",
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn elders(&self, agency_id: &str) -> Result<Vec<Elder>> {
        let response = self
            .get(&["api", "agencies", agency_id, "elders"], "fetch elders")
            .await?;
        Ok(response.json().await?)
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let request = self
            .client
            .get(self.endpoint.url(&["api", "users", user_id])?);
        let response = self.endpoint.authorize(request).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = error_for_status(response, "fetch user profile").await?;
        Ok(Some(response.json().await?))
    }
}
