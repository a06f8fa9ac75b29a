//! Test fixtures and data generators
//!
//! Request bodies, response shapes, and a helper that registers and logs in
//! a fresh user. Emails carry a random suffix so runs never collide in a
//! shared database.

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

/// Password used for every fixture account
pub const TEST_PASSWORD: &str = "TestPass123";

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

impl RegisterRequest {
    pub fn unique(role: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test {role} {}", &suffix[..8]),
            email: format!("{role}.{suffix}@example.com"),
            password: TEST_PASSWORD.to_string(),
            role: role.to_string(),
            manager_id: None,
        }
    }

    pub fn reporting_to(mut self, manager_id: i64) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub device_id: Option<String>,
    pub device_location: Option<String>,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
            device_id: Some("test-device".to_string()),
            device_location: None,
        }
    }
}

/// Session details returned on login
#[derive(Debug, Deserialize)]
pub struct SessionInfo {
    pub user_id: i64,
    pub device_id: Option<String>,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
    pub session: SessionInfo,
}

/// Refresh response
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Plain message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i64>,
    pub is_active: bool,
}

/// Attendance record response
#[derive(Debug, Deserialize)]
pub struct AttendanceResponse {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub total_hours: f64,
    pub status: String,
}

/// Check-in response
#[derive(Debug, Deserialize)]
pub struct CheckInResponse {
    pub message: String,
    pub time: String,
}

/// Check-out response
#[derive(Debug, Deserialize)]
pub struct CheckOutResponse {
    pub message: String,
    pub total_hours: f64,
}

/// Manual attendance entry
#[derive(Debug, Default, Serialize)]
pub struct CreateAttendanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreateAttendanceRequest {
    /// A full working day on `date` (YYYY-MM-DD) for `user_id`
    pub fn working_day(user_id: i64, date: &str) -> Self {
        Self {
            user_id: Some(user_id),
            date: Some(date.to_string()),
            check_in: Some(format!("{date}T09:00:00Z")),
            check_out: Some(format!("{date}T17:30:00Z")),
            status: None,
        }
    }
}

/// A registered and logged-in account
#[derive(Debug)]
pub struct TestUser {
    pub id: i64,
    pub token: String,
    pub register: RegisterRequest,
}

impl TestUser {
    /// Register a fresh user with `role` and log in
    pub async fn create(server: &TestServer, role: &str) -> Result<Self> {
        Self::create_with(server, RegisterRequest::unique(role)).await
    }

    /// Register a fresh user reporting to `manager` and log in
    pub async fn create_report(server: &TestServer, role: &str, manager: &TestUser) -> Result<Self> {
        Self::create_with(server, RegisterRequest::unique(role).reporting_to(manager.id)).await
    }

    /// Register with an explicit request and log in
    pub async fn create_with(server: &TestServer, register: RegisterRequest) -> Result<Self> {
        let response = server.post("/api/v1/auth/register", &register).await?;
        let _: MessageResponse = assert_json(response, StatusCode::CREATED).await?;

        let response = server
            .post("/api/v1/auth/login", &LoginRequest::from_register(&register))
            .await?;
        let tokens: TokenResponse = assert_json(response, StatusCode::OK).await?;

        Ok(Self {
            id: tokens.session.user_id,
            token: tokens.access_token,
            register,
        })
    }
}
