//! Static mapping from the insight service's cluster assignment to a
//! human-readable learner persona.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClusterInfo {
    pub label: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub tips: Vec<String>,
}

fn entry(
    label: &str,
    summary: &str,
    strengths: &[&str],
    risks: &[&str],
    tips: &[&str],
) -> ClusterInfo {
    ClusterInfo {
        label: label.to_string(),
        summary: summary.to_string(),
        strengths: strengths.iter().map(|s| s.to_string()).collect(),
        risks: risks.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
    }
}

/// Resolves a cluster key to its persona. Unrecognized keys get a fallback
/// entry whose label carries the raw key and whose lists are empty.
pub fn cluster_info(key: &str) -> ClusterInfo {
    match key {
        "0" => entry(
            "Steady pacer",
            "Works through modules in regular, evenly spaced sessions.",
            &["Consistent study rhythm", "Strong quiz pass rate on first attempts"],
            &["Progress can stall when a single quiz blocks the path"],
            &["Schedule a retry soon after a failed attempt to keep momentum"],
        ),
        "1" => entry(
            "Burst learner",
            "Long gaps followed by intense catch-up sessions.",
            &["Covers a lot of material quickly when engaged"],
            &["Retention suffers between bursts", "Quiz scores dip after long gaps"],
            &["Short review of the previous module before each new burst"],
        ),
        "2" => entry(
            "Explorer",
            "Samples many courses, finishes few.",
            &["Broad exposure across topics"],
            &["Low completion rate", "Many enrollments with no quiz attempts"],
            &["Pick one active course and finish its next module first"],
        ),
        other => ClusterInfo {
            label: format!("Unknown cluster ({})", other),
            summary: "No persona is defined for this cluster yet.".to_string(),
            strengths: Vec::new(),
            risks: Vec::new(),
            tips: Vec::new(),
        },
    }
}

/// Extracts the cluster assignment from a cached profile payload. The
/// service reports it either as a number or a string.
pub fn cluster_key(payload: &Value) -> Option<String> {
    match payload.get("cluster")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
