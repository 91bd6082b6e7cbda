//! # Campus Models
//!
//! Read models, request DTOs and filter parameters for the Campus API.
//!
//! Read models are `FromRow` projections that already contain the derived
//! display fields (`direction_name`, `professor_name`, ...); services select
//! them with joins on every read so they are never stale.
//!
//! # Modules
//!
//! - [`auth`]: token requests and responses
//! - [`users`]: users, registration and the student subset
//! - [`directions`], [`semesters`], [`courses`]: the curriculum tree
//! - [`attendance`], [`grades`]: per-student course records
//! - [`schedules`]: class sessions
//! - [`events`]: announcements with recipient lists

pub mod attendance;
pub mod auth;
pub mod courses;
pub mod directions;
pub mod events;
pub mod grades;
pub mod schedules;
pub mod semesters;
pub mod users;

pub use attendance::{Attendance, AttendanceFilterParams, CreateAttendanceDto, UpdateAttendanceDto};
pub use auth::{RefreshTokenRequest, TokenPair, TokenRequest, UserCredentials};
pub use courses::{Course, CourseFilterParams, CreateCourseDto, UpdateCourseDto};
pub use directions::{CreateDirectionDto, Direction, DirectionFilterParams, UpdateDirectionDto};
pub use events::{CreateEventDto, Event, EventFilterParams, UpdateEventDto};
pub use grades::{CreateGradeDto, Grade, GradeFilterParams, GradeType, UpdateGradeDto};
pub use schedules::{CreateScheduleDto, Schedule, ScheduleFilterParams, UpdateScheduleDto};
pub use semesters::{CreateSemesterDto, Semester, SemesterFilterParams, UpdateSemesterDto};
pub use users::{CreateStudentDto, RegisterUserDto, StudentFilterParams, UpdateStudentDto, User};
