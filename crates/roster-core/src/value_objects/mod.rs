//! Value objects - immutable types that represent domain concepts

mod id;
mod role;
mod status;

pub use id::{AttendanceId, IdParseError, SessionId, UserId};
pub use role::{Role, RoleParseError};
pub use status::{AttendanceStatus, StatusParseError};
