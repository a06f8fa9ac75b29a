//! In-memory repositories and a pinned clock for service scenarios
//!
//! The fakes enforce the same uniqueness rules as the PostgreSQL schema so
//! conflict paths behave the way they do in production.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use roster_common::JwtService;
use roster_core::entities::{
    AttendanceRecord, NewAttendance, NewSession, NewUser, Session, User,
};
use roster_core::traits::{
    AttendanceQuery, AttendanceRepository, Clock, FixedClock, RepoResult, ReportQuery,
    SessionRepository, UserRepository,
};
use roster_core::{AttendanceId, DomainError, Role, SessionId, UserId};
use roster_service::ServiceContext;

pub const PASSWORD: &str = "Sup3rSecret";
pub const JWT_SECRET: &str = "test-secret-key-that-is-long-enough";
pub const TOKEN_EXPIRY_SECS: i64 = 604_800;

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<UserId, (User, String)>,
}

#[derive(Default)]
pub struct InMemoryUsers {
    table: Mutex<UserTable>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, new: &NewUser) -> RepoResult<User> {
        let mut table = self.table.lock().unwrap();
        if table.rows.values().any(|(u, _)| u.email == new.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if let Some(manager_id) = new.manager_id {
            if !table.rows.contains_key(&manager_id) {
                return Err(DomainError::InvalidManager);
            }
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);
        let user = User {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            role: new.role,
            manager_id: new.manager_id,
            is_active: new.is_active,
            location: new.location.clone(),
            picture: new.picture.clone(),
            date_of_birth: new.date_of_birth,
            joined_date: new.joined_date,
        };
        table.rows.insert(id, (user.clone(), new.password_hash.clone()));
        Ok(user)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        if user.manager_id == Some(user.id) {
            return Err(DomainError::SelfManagement);
        }
        if table
            .rows
            .values()
            .any(|(u, _)| u.id != user.id && u.email == user.email)
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        match table.rows.get_mut(&user.id) {
            Some((row, _)) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.get(&id).map(|(_, hash)| hash.clone()))
    }

    async fn find_reports(&self, manager_id: UserId, query: ReportQuery) -> RepoResult<Vec<User>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .values()
            .map(|(u, _)| u)
            .filter(|u| u.reports_to(manager_id) && (query.include_inactive || u.is_active))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn count_reports(&self, manager_id: UserId) -> RepoResult<i64> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .values()
            .filter(|(u, _)| u.reports_to(manager_id))
            .count() as i64)
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Default)]
pub struct InMemorySessions {
    rows: Mutex<Vec<Session>>,
}

impl InMemorySessions {
    pub fn all(&self) -> Vec<Session> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create(&self, new: &NewSession) -> RepoResult<Session> {
        let mut rows = self.rows.lock().unwrap();
        let session = Session {
            id: SessionId::new(rows.len() as i64 + 1),
            user_id: new.user_id,
            device_id: new.device_id.clone(),
            device_location: new.device_location.clone(),
            token: new.token.clone(),
            login_time: new.login_time,
            is_active: true,
        };
        rows.push(session.clone());
        Ok(session)
    }

    async fn find_active(&self, user_id: UserId, token: &str) -> RepoResult<Option<Session>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|s| s.user_id == user_id && s.token == token && s.is_active)
            .cloned())
    }

    async fn deactivate(&self, user_id: UserId, token: &str) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|s| s.user_id == user_id && s.token == token && s.is_active)
        {
            Some(session) => {
                session.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_by_id(&self, id: SessionId) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(session) = rows.iter_mut().find(|s| s.id == id) {
            session.is_active = false;
        }
        Ok(())
    }

    async fn rotate_token(
        &self,
        id: SessionId,
        token: &str,
        login_time: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(session) = rows.iter_mut().find(|s| s.id == id) {
            session.token = token.to_string();
            session.login_time = login_time;
        }
        Ok(())
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Default)]
struct AttendanceTable {
    next_id: i64,
    rows: BTreeMap<AttendanceId, AttendanceRecord>,
}

#[derive(Default)]
pub struct InMemoryAttendance {
    table: Mutex<AttendanceTable>,
}

impl InMemoryAttendance {
    /// Insert a record directly, bypassing the services
    pub fn seed(&self, record: AttendanceRecord) {
        let mut table = self.table.lock().unwrap();
        table.next_id = table.next_id.max(record.id.into_inner());
        table.rows.insert(record.id, record);
    }

    pub fn get(&self, id: AttendanceId) -> Option<AttendanceRecord> {
        self.table.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendance {
    async fn find_by_id(&self, id: AttendanceId) -> RepoResult<Option<AttendanceRecord>> {
        Ok(self.get(id))
    }

    async fn find_by_user_and_date(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .values()
            .find(|r| r.user_id == user_id && r.date == date)
            .cloned())
    }

    async fn create(&self, new: &NewAttendance) -> RepoResult<AttendanceRecord> {
        let mut table = self.table.lock().unwrap();
        if table
            .rows
            .values()
            .any(|r| r.user_id == new.user_id && r.date == new.date)
        {
            return Err(DomainError::AttendanceAlreadyExists(new.date));
        }

        table.next_id += 1;
        let record = AttendanceRecord {
            id: AttendanceId::new(table.next_id),
            user_id: new.user_id,
            date: new.date,
            check_in: new.check_in,
            check_out: new.check_out,
            total_hours: new.total_hours,
            status: new.status,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &AttendanceRecord) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        if table
            .rows
            .values()
            .any(|r| r.id != record.id && r.user_id == record.user_id && r.date == record.date)
        {
            return Err(DomainError::AttendanceDateTaken);
        }
        match table.rows.get_mut(&record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(DomainError::AttendanceNotFound(record.id)),
        }
    }

    async fn delete(&self, id: AttendanceId) -> RepoResult<()> {
        let mut table = self.table.lock().unwrap();
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::AttendanceNotFound(id))
    }

    async fn list(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>> {
        let table = self.table.lock().unwrap();
        let mut records: Vec<_> = table
            .rows
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            let by_date = if query.ascending {
                a.date.cmp(&b.date)
            } else {
                b.date.cmp(&a.date)
            };
            by_date.then(a.id.cmp(&b.id))
        });

        Ok(records
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// 2024-03-05 09:00:00 UTC
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

pub fn at(d: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, hour, min, 0).unwrap()
}

pub struct TestHarness {
    pub ctx: ServiceContext,
    pub clock: Arc<FixedClock>,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
    pub attendance: Arc<InMemoryAttendance>,
}

impl TestHarness {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(start_time()));
        let users = Arc::new(InMemoryUsers::default());
        let sessions = Arc::new(InMemorySessions::default());
        let attendance = Arc::new(InMemoryAttendance::default());

        let ctx = ServiceContext::builder()
            .user_repo(users.clone())
            .session_repo(sessions.clone())
            .attendance_repo(attendance.clone())
            .jwt_service(Arc::new(JwtService::new(JWT_SECRET, TOKEN_EXPIRY_SECS)))
            .clock(clock.clone())
            .build()
            .unwrap();

        Self {
            ctx,
            clock,
            users,
            sessions,
            attendance,
        }
    }

    /// Insert a user directly, with `PASSWORD` hashed
    pub async fn seed_user(&self, name: &str, role: Role, manager: Option<&User>) -> User {
        let password_hash = self.ctx.password_service().hash(PASSWORD).unwrap();
        self.users
            .create(&NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash,
                role,
                manager_id: manager.map(|m| m.id),
                is_active: true,
                location: None,
                picture: None,
                date_of_birth: None,
                joined_date: None,
            })
            .await
            .unwrap()
    }

    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Overwrite a user in storage
    pub async fn save_user(&self, user: &User) {
        self.users.update(user).await.unwrap();
    }

    /// Re-read a user from storage
    pub async fn reload(&self, user: &User) -> User {
        self.users.find_by_id(user.id).await.unwrap().unwrap()
    }
}
