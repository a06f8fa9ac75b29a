mod clock;
mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repositories::{
    AttendanceQuery, AttendanceRepository, RepoResult, ReportQuery, SessionRepository,
    UserRepository,
};
