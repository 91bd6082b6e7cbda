//! Seed rows and seeding configuration.

use campus_core::Role;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Suffix carried by every seeded direction and event title, used by
/// `clear-seed` to find them again.
pub const SEED_MARKER: &str = "(seed)";

/// Seeded accounts all use this email domain.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

pub struct DirectionSeed {
    pub name: String,
    pub semesters: i32,
}

pub struct SemesterSeed {
    pub direction_id: Uuid,
    pub number: i32,
    pub credits: i32,
}

pub struct CourseSeed {
    pub semester_id: Uuid,
    pub name: String,
    pub credits: i32,
    pub is_mandatory: bool,
    pub professor_id: Option<Uuid>,
}

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub fio: String,
    pub password_hash: String,
    pub role: Role,
    pub direction_id: Option<Uuid>,
    pub course: Option<i32>,
}

pub struct ScheduleSeed {
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub topic: String,
}

/// How much data `seed` generates.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub directions: usize,
    pub semesters_per_direction: usize,
    pub courses_per_semester: usize,
    pub teachers: usize,
    pub students_per_direction: usize,
    pub sessions_per_course: usize,
    pub events: usize,
    /// Shared by every seeded account.
    pub password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            directions: 4,
            semesters_per_direction: 8,
            courses_per_semester: 5,
            teachers: 10,
            students_per_direction: 30,
            sessions_per_course: 4,
            events: 5,
            password: "password123".to_string(),
        }
    }
}

impl SeedConfig {
    pub fn total_semesters(&self) -> usize {
        self.directions * self.semesters_per_direction
    }

    pub fn total_courses(&self) -> usize {
        self.total_semesters() * self.courses_per_semester
    }

    pub fn total_students(&self) -> usize {
        self.directions * self.students_per_direction
    }
}
