//! Domain entities - core business objects

mod attendance;
mod session;
mod user;

pub use attendance::{
    hours_between, round_hours, AttendanceChanges, AttendanceRecord, NewAttendance,
};
pub use session::{NewSession, Session};
pub use user::{NewUser, User};
