use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::module::Module;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, FromRow)]
/// One entry of a course's module list. `ord` is the explicit order key
/// (not necessarily contiguous); `position` is the list index and breaks
/// ties between equal `ord` values.
pub struct CourseModuleLink {
    pub module_id: Uuid,
    pub position: i32,
    pub ord: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for creating a course together with its ordered module list.
pub struct CreateCoursePayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub modules: Vec<CourseModuleRef>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CourseModuleRef {
    pub module_id: Uuid,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Serialize, ToSchema)]
/// A course with its modules resolved and sorted into course order.
pub struct CourseDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modules: Vec<CourseModuleEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseModuleEntry {
    pub order: i32,
    pub module: Module,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Quiz-derived progress view: recomputed from passing quiz results, not
/// from the enrollment snapshot. The two can disagree.
pub struct CourseProgressResponse {
    pub course_id: Uuid,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub progress_percentage: i32,
    pub is_finished: bool,
    pub next_module: Option<Module>,
}
