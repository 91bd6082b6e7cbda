//! Static access rules for the Campus API.
//!
//! Access is decided from the caller's [`Role`] alone: there are no per-record
//! ownership checks, so a teacher may grade any course and an admin may edit
//! any direction. The rules live in [`ACCESS_TABLE`]; a (resource, action)
//! pair that is not listed is denied to everyone.
//!
//! # Example
//!
//! ```ignore
//! use campus_core::access::{allowed, Action, Resource};
//! use campus_core::Role;
//!
//! assert!(allowed(Role::Teacher, Resource::Grades, Action::Write));
//! assert!(!allowed(Role::Student, Resource::Directions, Action::Read));
//! ```

use std::fmt;

use crate::role::Role;

/// A family of endpoints guarded by the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Register,
    Me,
    Directions,
    Semesters,
    Students,
    Courses,
    Attendance,
    Grades,
    Schedules,
    StudentSchedules,
    Events,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Register => "register",
            Resource::Me => "me",
            Resource::Directions => "directions",
            Resource::Semesters => "semesters",
            Resource::Students => "students",
            Resource::Courses => "courses",
            Resource::Attendance => "attendance",
            Resource::Grades => "grades",
            Resource::Schedules => "schedules",
            Resource::StudentSchedules => "student_schedules",
            Resource::Events => "events",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Read` covers list and retrieve; `Write` covers create, update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Write,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => f.write_str("read"),
            Action::Write => f.write_str("write"),
        }
    }
}

/// Role predicate guarding an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Admin,
    Teacher,
    Student,
    TeacherOrAdmin,
    Authenticated,
}

impl Gate {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            Gate::Admin => role == Role::Admin,
            Gate::Teacher => role == Role::Teacher,
            Gate::Student => role == Role::Student,
            Gate::TeacherOrAdmin => matches!(role, Role::Teacher | Role::Admin),
            Gate::Authenticated => true,
        }
    }

    /// Human readable requirement used in 403 messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Gate::Admin => "admin role required",
            Gate::Teacher => "teacher role required",
            Gate::Student => "student role required",
            Gate::TeacherOrAdmin => "teacher or admin role required",
            Gate::Authenticated => "authentication required",
        }
    }
}

pub const ACCESS_TABLE: &[(Resource, Action, Gate)] = &[
    (Resource::Register, Action::Write, Gate::Admin),
    (Resource::Me, Action::Read, Gate::Authenticated),
    (Resource::Directions, Action::Read, Gate::Admin),
    (Resource::Directions, Action::Write, Gate::Admin),
    (Resource::Semesters, Action::Read, Gate::Admin),
    (Resource::Semesters, Action::Write, Gate::Admin),
    (Resource::Students, Action::Read, Gate::Admin),
    (Resource::Students, Action::Write, Gate::Admin),
    (Resource::Courses, Action::Read, Gate::Authenticated),
    (Resource::Courses, Action::Write, Gate::Admin),
    (Resource::Attendance, Action::Read, Gate::Teacher),
    (Resource::Attendance, Action::Write, Gate::Teacher),
    (Resource::Grades, Action::Read, Gate::Teacher),
    (Resource::Grades, Action::Write, Gate::Teacher),
    (Resource::Schedules, Action::Read, Gate::TeacherOrAdmin),
    (Resource::Schedules, Action::Write, Gate::TeacherOrAdmin),
    (Resource::StudentSchedules, Action::Read, Gate::Student),
    (Resource::Events, Action::Read, Gate::Admin),
    (Resource::Events, Action::Write, Gate::Admin),
];

/// Looks up the gate for an operation. `None` means nobody may perform it.
pub fn gate(resource: Resource, action: Action) -> Option<Gate> {
    ACCESS_TABLE
        .iter()
        .find(|(r, a, _)| *r == resource && *a == action)
        .map(|(_, _, g)| *g)
}

pub fn allowed(role: Role, resource: Resource, action: Action) -> bool {
    gate(resource, action).is_some_and(|g| g.admits(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_only_resources() {
        for resource in [
            Resource::Register,
            Resource::Directions,
            Resource::Semesters,
            Resource::Students,
            Resource::Events,
        ] {
            for action in [Action::Read, Action::Write] {
                if resource == Resource::Register && action == Action::Read {
                    continue;
                }
                assert!(allowed(Role::Admin, resource, action), "{resource} {action}");
                assert!(!allowed(Role::Teacher, resource, action), "{resource} {action}");
                assert!(!allowed(Role::Student, resource, action), "{resource} {action}");
            }
        }
    }

    #[test]
    fn test_teacher_only_resources() {
        for resource in [Resource::Attendance, Resource::Grades] {
            for action in [Action::Read, Action::Write] {
                assert!(allowed(Role::Teacher, resource, action));
                assert!(!allowed(Role::Admin, resource, action));
                assert!(!allowed(Role::Student, resource, action));
            }
        }
    }

    #[test]
    fn test_schedules_teacher_or_admin() {
        assert!(allowed(Role::Teacher, Resource::Schedules, Action::Write));
        assert!(allowed(Role::Admin, Resource::Schedules, Action::Write));
        assert!(!allowed(Role::Student, Resource::Schedules, Action::Read));
    }

    #[test]
    fn test_student_schedules_read_only() {
        assert!(allowed(Role::Student, Resource::StudentSchedules, Action::Read));
        assert!(!allowed(Role::Teacher, Resource::StudentSchedules, Action::Read));
        assert!(!allowed(Role::Admin, Resource::StudentSchedules, Action::Read));
        assert!(!allowed(Role::Student, Resource::StudentSchedules, Action::Write));
    }

    #[test]
    fn test_courses_read_open_write_admin() {
        for role in Role::ALL {
            assert!(allowed(role, Resource::Courses, Action::Read));
        }
        assert!(allowed(Role::Admin, Resource::Courses, Action::Write));
        assert!(!allowed(Role::Teacher, Resource::Courses, Action::Write));
    }

    #[test]
    fn test_me_any_role() {
        for role in Role::ALL {
            assert!(allowed(role, Resource::Me, Action::Read));
        }
    }

    #[test]
    fn test_unlisted_pair_denied() {
        assert_eq!(gate(Resource::Register, Action::Read), None);
        assert!(!allowed(Role::Admin, Resource::Register, Action::Read));
    }

    #[test]
    fn test_table_has_no_duplicates() {
        for (i, (r, a, _)) in ACCESS_TABLE.iter().enumerate() {
            assert!(
                !ACCESS_TABLE[i + 1..]
                    .iter()
                    .any(|(r2, a2, _)| r2 == r && a2 == a),
                "duplicate entry for {r} {a}"
            );
        }
    }
}
