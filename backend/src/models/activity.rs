use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{types::Json, FromRow};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
/// Learner event kinds recorded in the activity ledger.
pub enum ActivityType {
    Enroll,
    View,
    ModuleStart,
    ModuleComplete,
    QuizStart,
    QuizSubmit,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Enroll => "enroll",
            ActivityType::View => "view",
            ActivityType::ModuleStart => "module_start",
            ActivityType::ModuleComplete => "module_complete",
            ActivityType::QuizStart => "quiz_start",
            ActivityType::QuizSubmit => "quiz_submit",
        }
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enroll" => Ok(ActivityType::Enroll),
            "view" => Ok(ActivityType::View),
            "module_start" => Ok(ActivityType::ModuleStart),
            "module_complete" => Ok(ActivityType::ModuleComplete),
            "quiz_start" => Ok(ActivityType::QuizStart),
            "quiz_submit" => Ok(ActivityType::QuizSubmit),
            other => Err(format!("unknown activity type: {}", other)),
        }
    }
}

impl Serialize for ActivityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
/// One row of the append-only event ledger.
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub event_type: ActivityType,
    pub occurred_at: DateTime<Utc>,
    pub metadata: Option<Json<serde_json::Value>>,
}

#[derive(Debug, Clone)]
/// Event to append. Actor and type are always present; internal writers
/// construct this directly, so malformed events only arise at the HTTP edge.
pub struct NewActivity {
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub event_type: ActivityType,
    pub metadata: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn new(user_id: Uuid, event_type: ActivityType) -> Self {
        Self {
            user_id,
            course_id: None,
            module_id: None,
            event_type,
            metadata: None,
        }
    }

    pub fn course(mut self, course_id: Uuid) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn module(mut self, module_id: Uuid) -> Self {
        self.module_id = Some(module_id);
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
/// One bucket of the daily activity series.
pub struct DailyActivityEntry {
    pub date: NaiveDate,
    pub total_events: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_type_roundtrips_through_strings() {
        for (ty, s) in [
            (ActivityType::Enroll, "enroll"),
            (ActivityType::ModuleStart, "module_start"),
            (ActivityType::QuizSubmit, "quiz_submit"),
        ] {
            assert_eq!(ty.as_str(), s);
            assert_eq!(s.parse::<ActivityType>().unwrap(), ty);
        }
        assert!("bogus".parse::<ActivityType>().is_err());
    }
}
