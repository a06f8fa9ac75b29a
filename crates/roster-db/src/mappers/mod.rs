//! Model -> entity conversions
//!
//! Enumerations are stored as TEXT; a value the domain does not know is
//! reported as a database error instead of being guessed.

mod attendance;
mod session;
mod user;
