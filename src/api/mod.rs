//! Resource access functions
//!
//! Stateless request/response wrappers, one remote call per operation (the
//! creator delete additionally pre-checks existence). Failures are
//! normalized into [`crate::error::Error`] and propagate to the caller;
//! nothing here retries or suppresses.

pub mod creators;
pub mod profile;
pub mod recipes;
