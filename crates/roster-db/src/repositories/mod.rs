//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in roster-core.

mod attendance;
mod error;
mod session;
mod user;

pub use attendance::PgAttendanceRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;
