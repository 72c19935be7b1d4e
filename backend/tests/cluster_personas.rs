use learntrack_backend::services::cluster_map::{cluster_info, cluster_key};
use serde_json::json;

#[test]
fn every_known_cluster_resolves_to_a_full_persona() {
    for key in ["0", "1", "2"] {
        let info = cluster_info(key);
        assert!(!info.summary.is_empty());
        assert!(!info.strengths.is_empty());
        assert!(!info.risks.is_empty());
        assert!(!info.tips.is_empty());
    }
}

#[test]
fn unknown_cluster_key_gets_fallback_with_raw_key_in_label() {
    for key in ["7", "banana", ""] {
        let info = cluster_info(key);
        assert!(info.label.contains(&format!("({})", key)));
        assert!(info.strengths.is_empty());
        assert!(info.risks.is_empty());
        assert!(info.tips.is_empty());
    }
}

#[test]
fn cluster_key_extraction_handles_both_encodings() {
    assert_eq!(cluster_key(&json!({ "cluster": 0 })), Some("0".into()));
    assert_eq!(cluster_key(&json!({ "cluster": "1" })), Some("1".into()));
    assert_eq!(cluster_key(&json!({ "cluster": [1] })), None);
    assert_eq!(cluster_key(&json!({ "other": 1 })), None);
}

#[test]
fn recommendations_payload_shape_is_serializable() {
    let info = cluster_info("1");
    let value = serde_json::to_value(&info).unwrap();
    assert!(value.get("label").is_some());
    assert!(value.get("summary").is_some());
    assert!(value["strengths"].is_array());
    assert!(value["risks"].is_array());
    assert!(value["tips"].is_array());
}
