//! Observation text rules.
//!
//! New observations need only text. Editing the text of an existing
//! observation requires a justification so the change is accounted for.

/// Minimum observation length in characters (after trimming).
pub const MIN_OBSERVATION_LENGTH: usize = 10;

/// Maximum justification length in characters.
pub const MAX_JUSTIFICATION_LENGTH: usize = 500;

/// Validate observation text.
pub fn validate_text(text: &str) -> Result<(), String> {
    if text.trim().chars().count() < MIN_OBSERVATION_LENGTH {
        return Err(format!(
            "Observation must be at least {MIN_OBSERVATION_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Check the justification precondition for an edit.
///
/// When `new_text` differs from `old_text`, `justification` must be present,
/// non-blank and at most [`MAX_JUSTIFICATION_LENGTH`] characters. An
/// unchanged text needs no justification, but one that is supplied is still
/// length-checked.
pub fn require_justification(
    old_text: &str,
    new_text: &str,
    justification: Option<&str>,
) -> Result<(), String> {
    let justification = justification.map(str::trim).filter(|j| !j.is_empty());

    if let Some(j) = justification {
        if j.chars().count() > MAX_JUSTIFICATION_LENGTH {
            return Err(format!(
                "Justification exceeds maximum length of {MAX_JUSTIFICATION_LENGTH} characters"
            ));
        }
    }

    if old_text != new_text && justification.is_none() {
        return Err("A justification is required when editing an observation".to_string());
    }
    Ok(())
}
