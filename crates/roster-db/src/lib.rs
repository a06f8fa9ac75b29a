//! # roster-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `roster-core`:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use roster_db::{create_pool, PgUserRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgAttendanceRepository, PgSessionRepository, PgUserRepository};
