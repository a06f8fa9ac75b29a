//! Session entity - a bearer token bound to a user and device

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{SessionId, UserId};

/// One login on one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub device_id: Option<String>,
    pub device_location: Option<String>,
    pub token: String,
    pub login_time: DateTime<Utc>,
    pub is_active: bool,
}

impl Session {
    /// Check if the session has outlived the token lifetime
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.login_time >= ttl
    }
}

/// Data for inserting a session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: UserId,
    pub device_id: Option<String>,
    pub device_location: Option<String>,
    pub token: String,
    pub login_time: DateTime<Utc>,
}
