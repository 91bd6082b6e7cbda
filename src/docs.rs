use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campus_core::{ErrorResponse, Role};
use campus_models::{
    Attendance, Course, CreateAttendanceDto, CreateCourseDto, CreateDirectionDto, CreateEventDto,
    CreateGradeDto, CreateScheduleDto, CreateSemesterDto, CreateStudentDto, Direction, Event,
    Grade, GradeType, RefreshTokenRequest, RegisterUserDto, Schedule, Semester, TokenPair,
    TokenRequest, UpdateAttendanceDto, UpdateCourseDto, UpdateDirectionDto, UpdateEventDto,
    UpdateGradeDto, UpdateScheduleDto, UpdateSemesterDto, UpdateStudentDto, User,
};

use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::obtain_token,
        crate::modules::auth::controller::refresh_token,
        crate::modules::users::controller::get_me,
        crate::modules::directions::controller::create_direction,
        crate::modules::directions::controller::get_directions,
        crate::modules::directions::controller::get_direction,
        crate::modules::directions::controller::update_direction,
        crate::modules::directions::controller::delete_direction,
        crate::modules::semesters::controller::create_semester,
        crate::modules::semesters::controller::get_semesters,
        crate::modules::semesters::controller::get_semester,
        crate::modules::semesters::controller::update_semester,
        crate::modules::semesters::controller::delete_semester,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::get_attendance_list,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::get_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::schedules::controller::get_student_schedules,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::get_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            Role,
            TokenRequest,
            RefreshTokenRequest,
            TokenPair,
            User,
            RegisterUserDto,
            CreateStudentDto,
            UpdateStudentDto,
            Direction,
            CreateDirectionDto,
            UpdateDirectionDto,
            Semester,
            CreateSemesterDto,
            UpdateSemesterDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Attendance,
            CreateAttendanceDto,
            UpdateAttendanceDto,
            GradeType,
            Grade,
            CreateGradeDto,
            UpdateGradeDto,
            Schedule,
            CreateScheduleDto,
            UpdateScheduleDto,
            Event,
            CreateEventDto,
            UpdateEventDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Deployment probes"),
        (name = "Authentication", description = "Registration and token endpoints"),
        (name = "Users", description = "Current user profile"),
        (name = "Directions", description = "Programs of study"),
        (name = "Semesters", description = "Terms within a direction"),
        (name = "Students", description = "Student accounts"),
        (name = "Courses", description = "Subjects taught in a semester"),
        (name = "Attendance", description = "Per-day presence records"),
        (name = "Grades", description = "Assessment scores"),
        (name = "Schedules", description = "Class sessions"),
        (name = "Events", description = "Announcements and their recipients")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Academic records backend built with Axum and PostgreSQL: curriculum, students, attendance, grades, schedules and events behind JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_api_path_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/register",
            "/api/token",
            "/api/token/refresh",
            "/api/me",
            "/api/directions",
            "/api/directions/{id}",
            "/api/semesters",
            "/api/students/{id}",
            "/api/courses",
            "/api/attendance/{id}",
            "/api/grades",
            "/api/schedules/{id}",
            "/api/student/schedules",
            "/api/events",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
