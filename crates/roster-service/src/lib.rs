//! # roster-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AttendanceService, AuthService, Authenticated, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
