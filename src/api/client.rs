//! API client for communicating with the EduSpace REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! API requests. Every request reads the bearer token through the injected
//! [`SessionAccess`] at the moment it is sent, and every error response is
//! classified once, here, into an [`ApiError`]. A 401 on any call tears the
//! session down and queues a redirect to the login destination.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{
    AdministratorProfile, BreakdownReport, Classroom, ClassroomResource, Meeting, RegisterTeacher,
    Reservation, SharedSpace, SignUpRequest, TeacherProfile,
};
use crate::routing::Navigator;

use super::{ApiError, SessionAccess};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response body of `POST /authentication/verify-code`.
///
/// Required fields are modelled as `Option` so a missing one can be reported
/// as an authentication error instead of a bare deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyCodeResponse {
    #[serde(rename = "profileId")]
    pub profile_id: Option<i64>,
    pub role: Option<String>,
    pub token: Option<String>,
    /// Account id, when the backend includes it.
    pub id: Option<i64>,
    pub username: Option<String>,
}

/// Created-account representation returned by `POST /authentication/sign-up`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<String>,
}

/// API client for the EduSpace backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionAccess>,
    navigator: Arc<Navigator>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `session` supplies the bearer token per request and absorbs the forced
    /// sign-out on 401; `navigator` receives the login redirect.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionAccess>,
        navigator: Arc<Navigator>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer header for the current session, read fresh per call so a token
    /// change between two requests is picked up by the second one.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Classify an error response. A 401 additionally clears the session and
    /// queues a redirect to login when the client is not already there.
    fn classify_error(&self, status: StatusCode, body: &str) -> ApiError {
        let err = ApiError::from_status(status, body);
        if status == StatusCode::UNAUTHORIZED {
            warn!("authentication failure on API call, clearing session");
            self.session.force_sign_out();
            self.navigator.force_login_redirect();
        }
        err
    }

    /// Check if response is successful, classifying the body if not.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.classify_error(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// POST where the caller has no use for the response body.
    async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        self.check_response(response).await?;
        Ok(())
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        self.check_response(response).await?;
        Ok(())
    }

    // ===== Authentication =====

    /// Submit credentials. On success the backend mails a one-time code;
    /// no token is issued yet.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<()> {
        debug!(username, "submitting credentials");
        self.post_unit(
            "/authentication/sign-in",
            &serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Submit the one-time verification code for the second sign-in step.
    pub async fn verify_code(&self, username: &str, code: &str) -> Result<VerifyCodeResponse> {
        debug!(username, "submitting verification code");
        self.post(
            "/authentication/verify-code",
            &serde_json::json!({ "username": username, "code": code }),
        )
        .await
    }

    /// Register a new administrator account.
    /// The payload is validated locally before anything is sent.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse> {
        request.validate().map_err(ApiError::Validation)?;
        self.post("/authentication/sign-up", request).await
    }

    // ===== Classrooms =====

    pub async fn fetch_classrooms(&self) -> Result<Vec<Classroom>> {
        self.get("/classrooms").await
    }

    pub async fn fetch_classroom(&self, id: i64) -> Result<Classroom> {
        self.get(&format!("/classrooms/{}", id)).await
    }

    pub async fn create_classroom(&self, classroom: &Classroom) -> Result<Classroom> {
        self.post("/classrooms", classroom).await
    }

    pub async fn create_classroom_for_teacher(
        &self,
        teacher_id: i64,
        classroom: &Classroom,
    ) -> Result<Classroom> {
        self.post(&format!("/classrooms/teachers/{}", teacher_id), classroom)
            .await
    }

    pub async fn update_classroom(&self, id: i64, classroom: &Classroom) -> Result<Classroom> {
        self.put(&format!("/classrooms/{}", id), classroom).await
    }

    pub async fn delete_classroom(&self, id: i64) -> Result<()> {
        self.delete(&format!("/classrooms/{}", id)).await
    }

    pub async fn fetch_classrooms_by_teacher(&self, teacher_id: i64) -> Result<Vec<Classroom>> {
        self.get(&format!("/classrooms/teachers/{}", teacher_id)).await
    }

    // ===== Classroom resources =====

    pub async fn fetch_classroom_resources(
        &self,
        classroom_id: i64,
    ) -> Result<Vec<ClassroomResource>> {
        self.get(&format!("/classrooms/{}/resources", classroom_id)).await
    }

    pub async fn fetch_classroom_resource(
        &self,
        classroom_id: i64,
        resource_id: i64,
    ) -> Result<ClassroomResource> {
        self.get(&format!("/classrooms/{}/resources/{}", classroom_id, resource_id))
            .await
    }

    pub async fn create_classroom_resource(
        &self,
        classroom_id: i64,
        resource: &ClassroomResource,
    ) -> Result<ClassroomResource> {
        self.post(&format!("/classrooms/{}/resources", classroom_id), resource)
            .await
    }

    pub async fn update_classroom_resource(
        &self,
        classroom_id: i64,
        resource_id: i64,
        resource: &ClassroomResource,
    ) -> Result<ClassroomResource> {
        self.put(
            &format!("/classrooms/{}/resources/{}", classroom_id, resource_id),
            resource,
        )
        .await
    }

    pub async fn delete_classroom_resource(
        &self,
        classroom_id: i64,
        resource_id: i64,
    ) -> Result<()> {
        self.delete(&format!("/classrooms/{}/resources/{}", classroom_id, resource_id))
            .await
    }

    // ===== Shared spaces =====

    pub async fn fetch_shared_spaces(&self) -> Result<Vec<SharedSpace>> {
        self.get("/shared-area").await
    }

    pub async fn fetch_shared_space(&self, id: i64) -> Result<SharedSpace> {
        self.get(&format!("/shared-area/{}", id)).await
    }

    pub async fn create_shared_space(&self, space: &SharedSpace) -> Result<SharedSpace> {
        self.post("/shared-area", space).await
    }

    pub async fn update_shared_space(&self, id: i64, space: &SharedSpace) -> Result<SharedSpace> {
        self.put(&format!("/shared-area/{}", id), space).await
    }

    pub async fn delete_shared_space(&self, id: i64) -> Result<()> {
        self.delete(&format!("/shared-area/{}", id)).await
    }

    // ===== Reservations =====

    pub async fn fetch_reservations(&self) -> Result<Vec<Reservation>> {
        self.get("/reservations").await
    }

    pub async fn create_reservation(
        &self,
        teacher_id: i64,
        area_id: i64,
        reservation: &Reservation,
    ) -> Result<Reservation> {
        self.post(
            &format!("/teachers/{}/areas/{}/reservations", teacher_id, area_id),
            reservation,
        )
        .await
    }

    pub async fn fetch_reservations_by_area(&self, area_id: i64) -> Result<Vec<Reservation>> {
        self.get(&format!("/areas/{}/reservations", area_id)).await
    }

    // ===== Breakdown reports =====

    pub async fn fetch_reports(&self) -> Result<Vec<BreakdownReport>> {
        self.get("/reports").await
    }

    pub async fn fetch_reports_by_resource(&self, resource_id: i64) -> Result<Vec<BreakdownReport>> {
        self.get(&format!("/reports/resources/{}", resource_id)).await
    }

    pub async fn create_report(&self, report: &BreakdownReport) -> Result<BreakdownReport> {
        self.post("/reports", report).await
    }

    // ===== Meetings =====

    pub async fn fetch_meetings(&self) -> Result<Vec<Meeting>> {
        self.get("/meetings").await
    }

    pub async fn create_meeting(
        &self,
        administrator_id: i64,
        classroom_id: i64,
        meeting: &Meeting,
    ) -> Result<Meeting> {
        self.post(
            &format!(
                "/administrators/{}/classrooms/{}/meetings",
                administrator_id, classroom_id
            ),
            meeting,
        )
        .await
    }

    pub async fn update_meeting(&self, id: i64, meeting: &Meeting) -> Result<Meeting> {
        self.put(&format!("/meetings/{}", id), meeting).await
    }

    pub async fn delete_meeting(&self, id: i64) -> Result<()> {
        self.delete(&format!("/meetings/{}", id)).await
    }

    pub async fn add_teacher_to_meeting(&self, meeting_id: i64, teacher_id: i64) -> Result<()> {
        self.post_unit(
            &format!("/meetings/{}/teachers/{}", meeting_id, teacher_id),
            &serde_json::json!({}),
        )
        .await
    }

    // ===== Teacher profiles =====

    pub async fn fetch_teachers(&self) -> Result<Vec<TeacherProfile>> {
        self.get("/teachers-profiles").await
    }

    /// Register a teacher profile.
    /// The payload is validated locally before anything is sent.
    pub async fn register_teacher(&self, teacher: &RegisterTeacher) -> Result<TeacherProfile> {
        teacher.validate().map_err(ApiError::Validation)?;
        self.post("/teachers-profiles", teacher).await
    }

    // ===== Administrator profiles =====

    pub async fn fetch_administrators(&self) -> Result<Vec<AdministratorProfile>> {
        self.get("/administrator-profiles").await
    }

    pub async fn fetch_administrator(&self, id: i64) -> Result<AdministratorProfile> {
        self.get(&format!("/administrator-profiles/{}", id)).await
    }

    pub async fn create_administrator(&self, request: &SignUpRequest) -> Result<SignUpResponse> {
        request.validate().map_err(ApiError::Validation)?;
        self.post("/administrator-profiles", request).await
    }

    pub async fn update_administrator(
        &self,
        id: i64,
        profile: &AdministratorProfile,
    ) -> Result<AdministratorProfile> {
        self.put(&format!("/administrator-profiles/{}", id), profile).await
    }

    pub async fn delete_administrator(&self, id: i64) -> Result<()> {
        self.delete(&format!("/administrator-profiles/{}", id)).await
    }
}
