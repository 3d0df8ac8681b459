//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod calendar_event_repo;
pub mod daily_log_repo;
pub mod notification_repo;
pub mod observation_repo;
pub mod role_repo;
pub mod session_repo;
pub mod student_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use calendar_event_repo::CalendarEventRepo;
pub use daily_log_repo::DailyLogRepo;
pub use notification_repo::NotificationRepo;
pub use observation_repo::ObservationRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
