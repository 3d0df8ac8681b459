//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod daily_log;
pub mod dashboard;
pub mod notification;
pub mod observation;
pub mod profile;
pub mod report;
pub mod student;
