//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and checks the access
//! policy before it touches storage.

pub mod attendance;
pub mod auth;
pub mod context;
pub mod error;
pub mod user;

pub use attendance::AttendanceService;
pub use auth::{AuthService, Authenticated};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
