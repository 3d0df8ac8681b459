//! Attendance status values.
//!
//! Stored as lowercase text in `attendance.status`; the database carries a
//! matching CHECK constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const STATUS_PRESENT: &str = "present";
pub const STATUS_ABSENT: &str = "absent";
pub const STATUS_JUSTIFIED_ABSENT: &str = "justified_absent";

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_ABSENT, STATUS_JUSTIFIED_ABSENT];

/// Attendance outcome for one student on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    JustifiedAbsent,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => STATUS_PRESENT,
            AttendanceStatus::Absent => STATUS_ABSENT,
            AttendanceStatus::JustifiedAbsent => STATUS_JUSTIFIED_ABSENT,
        }
    }

    /// Human-readable label shown in the staff UI.
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Presente",
            AttendanceStatus::Absent => "Ausente",
            AttendanceStatus::JustifiedAbsent => "Justificado",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PRESENT => Ok(AttendanceStatus::Present),
            STATUS_ABSENT => Ok(AttendanceStatus::Absent),
            STATUS_JUSTIFIED_ABSENT => Ok(AttendanceStatus::JustifiedAbsent),
            other => Err(format!(
                "Invalid attendance status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for s in VALID_STATUSES {
            let status: AttendanceStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), *s);
        }
    }

    #[test]
    fn labels_are_portuguese() {
        assert_eq!(AttendanceStatus::Present.label(), "Presente");
        assert_eq!(AttendanceStatus::JustifiedAbsent.label(), "Justificado");
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "late".parse::<AttendanceStatus>().unwrap_err();
        assert!(err.contains("justified_absent"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::JustifiedAbsent).unwrap();
        assert_eq!(json, "\"justified_absent\"");
    }
}
