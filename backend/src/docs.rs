#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    course::{
        Course, CourseDetailResponse, CourseModuleEntry, CourseModuleRef, CourseProgressResponse,
        CreateCoursePayload, EnrollRequest,
    },
    enrollment::{MyProgressResponse, QuizAttempt},
    ml::GenerateResponse,
    module::{
        CreateModulePayload, Module, ModuleCompletionResponse, ModuleContextRequest, ModuleStatus,
        ModuleStatusResponse,
    },
    quiz::{
        CreateQuestionPayload, CreateQuizPayload, OptionView, QuestionView, QuizStartResponse,
        SubmittedAnswer, SubmitQuizRequest, SubmitQuizResponse,
    },
    quiz_result::QuizResult,
    user::{AuthResponse, LoginRequest, SignupRequest, UserResponse},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        signup_doc,
        login_doc,
        profile_doc,
        logout_doc,
        list_courses_doc,
        get_course_doc,
        course_modules_doc,
        course_progress_doc,
        enroll_doc,
        get_module_doc,
        start_module_doc,
        complete_module_doc,
        module_status_doc,
        start_quiz_doc,
        submit_quiz_doc,
        my_activity_doc,
        my_activity_daily_doc,
        my_quiz_results_doc,
        my_progress_doc,
        generate_profile_doc,
        generate_recommendations_doc,
        get_profile_doc,
        get_recommendations_doc
    ),
    components(
        schemas(
            // auth
            SignupRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            // courses & modules
            Course,
            CourseDetailResponse,
            CourseModuleEntry,
            CourseModuleRef,
            CourseProgressResponse,
            CreateCoursePayload,
            EnrollRequest,
            Module,
            CreateModulePayload,
            ModuleContextRequest,
            ModuleStatus,
            ModuleStatusResponse,
            ModuleCompletionResponse,
            // quizzes
            CreateQuizPayload,
            CreateQuestionPayload,
            QuizStartResponse,
            QuestionView,
            OptionView,
            SubmitQuizRequest,
            SubmittedAnswer,
            SubmitQuizResponse,
            QuizResult,
            QuizAttempt,
            MyProgressResponse,
            // insight
            GenerateResponse
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Signup, login, session lifecycle"),
        (name = "Courses", description = "Course catalog, enrollment, progress"),
        (name = "Modules", description = "Module content, gating, completion"),
        (name = "Quiz", description = "Quiz presentation and scoring"),
        (name = "Dashboard", description = "Activity history and aggregates"),
        (name = "Insight", description = "ML persona and recommendations")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Duplicate email or invalid payload")
    ),
    tag = "Auth",
    security(())
)]
fn signup_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 404, description = "Unknown user"),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses((status = 200, description = "Current user", body = UserResponse)),
    tag = "Auth"
)]
fn profile_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session revoked"),
        (status = 400, description = "No active session")
    ),
    tag = "Auth"
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, body = [Course])),
    tag = "Courses",
    security(())
)]
fn list_courses_doc() {}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    responses(
        (status = 200, body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(())
)]
fn get_course_doc() {}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/modules",
    responses((status = 200, description = "Modules in course order", body = [Module])),
    tag = "Courses",
    security(())
)]
fn course_modules_doc() {}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/progress",
    responses((status = 200, description = "Quiz-derived progress", body = CourseProgressResponse)),
    tag = "Courses"
)]
fn course_progress_doc() {}

#[utoipa::path(
    post,
    path = "/api/courses/enroll",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled"),
        (status = 200, description = "Already enrolled"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
fn enroll_doc() {}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("course_id" = Option<uuid::Uuid>, Query, description = "Gating course context")),
    responses(
        (status = 200, body = Module),
        (status = 403, description = "Prerequisite not met or not enrolled")
    ),
    tag = "Modules",
    security(())
)]
fn get_module_doc() {}

#[utoipa::path(
    post,
    path = "/api/modules/{id}/start",
    request_body = ModuleContextRequest,
    responses((status = 200, description = "Module started")),
    tag = "Modules"
)]
fn start_module_doc() {}

#[utoipa::path(
    post,
    path = "/api/modules/{id}/complete",
    request_body = ModuleContextRequest,
    responses((status = 200, body = ModuleCompletionResponse)),
    tag = "Modules"
)]
fn complete_module_doc() {}

#[utoipa::path(
    get,
    path = "/api/modules/{id}/status",
    responses((status = 200, body = ModuleStatusResponse)),
    tag = "Modules"
)]
fn module_status_doc() {}

#[utoipa::path(
    post,
    path = "/api/quiz/{module_id}/start",
    request_body = ModuleContextRequest,
    responses(
        (status = 200, description = "Quiz without answers", body = QuizStartResponse),
        (status = 404, description = "Quiz not found")
    ),
    tag = "Quiz"
)]
fn start_quiz_doc() {}

#[utoipa::path(
    post,
    path = "/api/quiz/{module_id}/submit",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, body = SubmitQuizResponse),
        (status = 400, description = "Empty answers")
    ),
    tag = "Quiz"
)]
fn submit_quiz_doc() {}

#[utoipa::path(
    get,
    path = "/api/users/me/activity",
    responses((status = 200, description = "Paged event history")),
    tag = "Dashboard"
)]
fn my_activity_doc() {}

#[utoipa::path(
    get,
    path = "/api/users/me/activity/daily",
    responses((status = 200, description = "Daily event counts, zero-filled")),
    tag = "Dashboard"
)]
fn my_activity_daily_doc() {}

#[utoipa::path(
    get,
    path = "/api/users/me/quiz-results",
    responses((status = 200, description = "Paged attempt history", body = [QuizResult])),
    tag = "Dashboard"
)]
fn my_quiz_results_doc() {}

#[utoipa::path(
    get,
    path = "/api/users/me/progress",
    responses((status = 200, body = MyProgressResponse)),
    tag = "Dashboard"
)]
fn my_progress_doc() {}

#[utoipa::path(
    post,
    path = "/api/ml/profile/generate",
    responses(
        (status = 200, body = GenerateResponse),
        (status = 502, description = "Insight service unreachable, timed out, or errored")
    ),
    tag = "Insight"
)]
fn generate_profile_doc() {}

#[utoipa::path(
    post,
    path = "/api/ml/recommendations/generate",
    responses(
        (status = 200, body = GenerateResponse),
        (status = 404, description = "Profile not generated yet")
    ),
    tag = "Insight"
)]
fn generate_recommendations_doc() {}

#[utoipa::path(
    get,
    path = "/api/ml/profile",
    responses((status = 200, description = "Cached profile or null")),
    tag = "Insight"
)]
fn get_profile_doc() {}

#[utoipa::path(
    get,
    path = "/api/ml/recommendations",
    responses((status = 200, description = "Cached recommendations or null")),
    tag = "Insight"
)]
fn get_recommendations_doc() {}
