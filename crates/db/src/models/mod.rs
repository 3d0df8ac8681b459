//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod attendance;
pub mod calendar_event;
pub mod daily_log;
pub mod notification;
pub mod observation;
pub mod role;
pub mod session;
pub mod student;
pub mod user;
