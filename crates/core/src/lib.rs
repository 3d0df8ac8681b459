//! Pure domain logic for the CLAI records service.
//!
//! Nothing in this crate performs I/O: the database and HTTP layers fetch
//! rows, enforce authorization with [`access`], and call into the
//! validators and aggregators defined here.

pub mod access;
pub mod attendance;
pub mod calendar;
pub mod daily_log;
pub mod dates;
pub mod error;
pub mod identifier;
pub mod observation;
pub mod pagination;
pub mod report;
pub mod roles;
pub mod student;
pub mod types;
pub mod user;
