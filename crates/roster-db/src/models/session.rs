//! Session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub id: i64,
    pub user_id: i64,
    pub device_id: Option<String>,
    pub device_location: Option<String>,
    pub token: String,
    pub login_time: DateTime<Utc>,
    pub is_active: bool,
}
