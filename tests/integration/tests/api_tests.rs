//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrated on server start)
//! - Environment variables: DATABASE_URL, optionally JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique("driver");

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.message, format!("User {} registered successfully", request.name));

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!tokens.access_token.is_empty());
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.role, "driver");
    assert_eq!(tokens.session.device_id.as_deref(), Some("test-device"));

    let response = server.get_auth("/api/v1/auth/me", &tokens.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, tokens.session.user_id);
    assert_eq!(me.email, request.email);
    assert!(me.is_active);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique("sweeper");

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_rejects_unknown_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique("admin");

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ROLE")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_rejects_malformed_body() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/auth/register", &json!({ "email": "not-an-email" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "driver").await.unwrap();

    let mut login = LoginRequest::from_register(&user.register);
    login.password = "WrongPass999".to_string();
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();

    let login = LoginRequest {
        email: format!("nobody.{}@example.com", unique_suffix()),
        password: TEST_PASSWORD.to_string(),
        device_id: None,
        device_location: None,
    };
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/v1/auth/me", "garbage").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_closes_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "delivery_associate").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/auth/logout", &user.token)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Logged out successfully");

    let response = server.get_auth("/api/v1/auth/me", &user.token).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "SESSION_INACTIVE")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "driver").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/auth/refresh", &user.token)
        .await
        .unwrap();
    let refreshed: RefreshResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.token_type, "bearer");
    assert_ne!(refreshed.access_token, user.token);

    let response = server
        .get_auth("/api/v1/auth/me", &refreshed.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/v1/auth/me", &user.token).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "SESSION_INACTIVE")
        .await
        .unwrap();
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_manager_sees_team() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "supervisor").await.unwrap();
    let report = TestUser::create_report(&server, "driver", &manager).await.unwrap();

    let response = server.get_auth("/api/v1/users/team", &manager.token).await.unwrap();
    let team: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].id, report.id);
    assert_eq!(team[0].manager_id, Some(manager.id));

    let response = server
        .get_auth(&format!("/api/v1/users/{}", report.id), &manager.token)
        .await
        .unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.name, report.register.name);
}

#[tokio::test]
async fn test_non_manager_cannot_list_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let driver = TestUser::create(&server, "driver").await.unwrap();

    let response = server.get_auth("/api/v1/users", &driver.token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_MANAGER")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_manager_cannot_reach_other_team() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "project_manager").await.unwrap();
    let stranger = TestUser::create(&server, "sweeper").await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/users/{}", stranger.id), &manager.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_IN_TEAM")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_user_reports_to_creator() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "supervisor").await.unwrap();
    let request = RegisterRequest::unique("sweeper");

    let response = server
        .post_auth("/api/v1/users", &manager.token, &request)
        .await
        .unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.manager_id, Some(manager.id));
    assert_eq!(created.role, "sweeper");
    assert!(created.is_active);
}

#[tokio::test]
async fn test_deactivate_and_activate_report() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "supervisor").await.unwrap();
    let report = TestUser::create_report(&server, "driver", &manager).await.unwrap();
    let path = format!("/api/v1/users/{}", report.id);

    let response = server.delete_auth(&path, &manager.token).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, format!("User {} deactivated", report.id));

    let response = server.get_auth("/api/v1/auth/me", &report.token).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "ACCOUNT_DEACTIVATED")
        .await
        .unwrap();

    let response = server
        .post_empty_auth(&format!("{path}/activate"), &manager.token)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, format!("User {} activated", report.id));

    let response = server.get_auth("/api/v1/auth/me", &report.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_manager_cannot_deactivate_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "project_manager").await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/users/{}", manager.id), &manager.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "SELF_DEACTIVATION")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_user_id_in_path() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "supervisor").await.unwrap();

    let response = server
        .get_auth("/api/v1/users/not-a-number", &manager.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_check_in_and_out() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "driver").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/attendance/checkin", &user.token)
        .await
        .unwrap();
    let checked_in: CheckInResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        checked_in.message,
        format!("{} checked in successfully", user.register.name)
    );

    let response = server
        .post_empty_auth("/api/v1/attendance/checkin", &user.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "ALREADY_CHECKED_IN")
        .await
        .unwrap();

    let response = server
        .post_empty_auth("/api/v1/attendance/checkout", &user.token)
        .await
        .unwrap();
    let checked_out: CheckOutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(checked_out.total_hours >= 0.0);

    let response = server
        .post_empty_auth("/api/v1/attendance/checkout", &user.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "ALREADY_CHECKED_OUT")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/attendance/history", &user.token)
        .await
        .unwrap();
    let history: Vec<AttendanceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_id, user.id);
    assert!(history[0].check_in.is_some());
    assert!(history[0].check_out.is_some());
}

#[tokio::test]
async fn test_check_out_without_check_in() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "sweeper").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/attendance/checkout", &user.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "NO_CHECK_IN")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_manager_records_attendance_for_report() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "supervisor").await.unwrap();
    let report = TestUser::create_report(&server, "driver", &manager).await.unwrap();

    let request = CreateAttendanceRequest::working_day(report.id, "2024-03-04");
    let response = server
        .post_auth("/api/v1/attendance", &manager.token, &request)
        .await
        .unwrap();
    let record: AttendanceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(record.user_id, report.id);
    assert_eq!(record.date, "2024-03-04");
    assert!((record.total_hours - 8.5).abs() < f64::EPSILON);
    assert_eq!(record.status, "present");

    // Same day again collides
    let response = server
        .post_auth("/api/v1/attendance", &manager.token, &request)
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "ATTENDANCE_ALREADY_EXISTS")
        .await
        .unwrap();

    // The report sees it in their own list
    let response = server
        .get_auth(&format!("/api/v1/attendance/{}", record.id), &report.token)
        .await
        .unwrap();
    let fetched: AttendanceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, record.id);

    let response = server
        .get_auth(
            &format!("/api/v1/attendance?user_id={}", report.id),
            &manager.token,
        )
        .await
        .unwrap();
    let listed: Vec<AttendanceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_manager_updates_and_deletes_attendance() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let manager = TestUser::create(&server, "project_manager").await.unwrap();
    let report = TestUser::create_report(&server, "sweeper", &manager).await.unwrap();

    let request = CreateAttendanceRequest::working_day(report.id, "2024-02-12");
    let response = server
        .post_auth("/api/v1/attendance", &manager.token, &request)
        .await
        .unwrap();
    let record: AttendanceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/attendance/{}", record.id);

    let response = server
        .put_auth(
            &path,
            &manager.token,
            &json!({ "check_out": "2024-02-12T13:00:00Z", "status": "late" }),
        )
        .await
        .unwrap();
    let updated: AttendanceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!((updated.total_hours - 4.0).abs() < f64::EPSILON);
    assert_eq!(updated.status, "late");

    // A report cannot edit their own record
    let response = server
        .put_auth(&path, &report.token, &json!({ "status": "present" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_MANAGER")
        .await
        .unwrap();

    let response = server.delete_auth(&path, &manager.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &manager.token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_ATTENDANCE")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_manager_cannot_record_for_others() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let driver = TestUser::create(&server, "driver").await.unwrap();
    let other = TestUser::create(&server, "driver").await.unwrap();

    let request = CreateAttendanceRequest::working_day(other.id, "2024-01-15");
    let response = server
        .post_auth("/api/v1/attendance", &driver.token, &request)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_MANAGER")
        .await
        .unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/attendance?user_id={}", other.id),
            &driver.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_self_recorded_attendance_defaults() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::create(&server, "delivery_associate").await.unwrap();

    let request = CreateAttendanceRequest {
        date: Some("2023-11-20".to_string()),
        status: Some("absent".to_string()),
        ..Default::default()
    };
    let response = server
        .post_auth("/api/v1/attendance", &user.token, &request)
        .await
        .unwrap();
    let record: AttendanceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(record.user_id, user.id);
    assert_eq!(record.status, "absent");
    assert!(record.check_in.is_none());
    assert!(record.total_hours.abs() < f64::EPSILON);
}
