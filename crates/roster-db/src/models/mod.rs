//! Database models - row types read with `sqlx::FromRow`

mod attendance;
mod session;
mod user;

pub use attendance::AttendanceModel;
pub use session::SessionModel;
pub use user::UserModel;
