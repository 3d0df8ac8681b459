//! Calendar event validation.

use chrono::Duration;

use crate::types::Timestamp;

pub const MIN_TITLE_LENGTH: usize = 5;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Length of an event created from a single point in time.
pub const DEFAULT_EVENT_DURATION_MINS: i64 = 60;

/// Validate the title length.
pub fn validate_title(title: &str) -> Result<(), String> {
    let len = title.trim().chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
        return Err(format!(
            "Title must be between {MIN_TITLE_LENGTH} and {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate the optional description length.
pub fn validate_description(description: Option<&str>) -> Result<(), String> {
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

/// An event may not end before it starts.
pub fn validate_schedule(start: Timestamp, end: Timestamp) -> Result<(), String> {
    if end < start {
        return Err("Event end time must not be before its start time".to_string());
    }
    Ok(())
}

/// Validate every field of an event.
pub fn validate_event(
    title: &str,
    description: Option<&str>,
    start: Timestamp,
    end: Timestamp,
) -> Result<(), String> {
    validate_title(title)?;
    validate_description(description)?;
    validate_schedule(start, end)
}

/// End time used when a client supplies only a start time.
pub fn default_end(start: Timestamp) -> Timestamp {
    start + Duration::minutes(DEFAULT_EVENT_DURATION_MINS)
}
