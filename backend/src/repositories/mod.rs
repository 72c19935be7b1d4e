pub mod activities;
pub mod courses;
pub mod enrollments;
pub mod ml_cache;
pub mod modules;
pub mod quiz_results;
pub mod quizzes;
pub mod revoked_tokens;
pub mod sessions;
pub mod users;
