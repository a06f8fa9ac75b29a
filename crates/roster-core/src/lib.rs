//! # roster-core
//!
//! Domain layer containing entities, value objects, the access-control
//! policy and repository traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    hours_between, round_hours, AttendanceChanges, AttendanceRecord, NewAttendance, NewSession,
    NewUser, Session, User,
};
pub use error::DomainError;
pub use policy::{authorize, Decision, DenyReason, Operation};
pub use traits::{
    AttendanceQuery, AttendanceRepository, Clock, FixedClock, RepoResult, ReportQuery,
    SessionRepository, SystemClock, UserRepository,
};
pub use value_objects::{
    AttendanceId, AttendanceStatus, IdParseError, Role, RoleParseError, SessionId,
    StatusParseError, UserId,
};
