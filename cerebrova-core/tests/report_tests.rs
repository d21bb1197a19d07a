// Tests for result narrative and report link generation

use cerebrova_client::result::TumorStatus;
use cerebrova_client::PredictionResult;
use cerebrova_core::report::{
    NO_TUMOR_MESSAGE, REPORT_PARAMS, cache_busted, report_link, result_text, result_text_for,
};
use serde_json::json;
use url::Url;

fn prediction(value: serde_json::Value) -> PredictionResult {
    serde_json::from_value(value).unwrap()
}

fn endpoint() -> Url {
    Url::parse("http://localhost:5000/download_report").unwrap()
}

// ============================================================================
// Result Text Tests
// ============================================================================

#[test]
fn test_result_text_detected_with_class() {
    let text = result_text(TumorStatus::Detected, Some("Glioma"), "92");
    assert_eq!(
        text,
        "Our AI has detected a potential Glioma tumor with 92% confidence. \
The highlighted areas in the image indicate regions of concern. \
Please consult with a medical professional for a comprehensive diagnosis and treatment plan."
    );
}

#[test]
fn test_result_text_detected_without_class() {
    let text = result_text(TumorStatus::Detected, None, "92");
    assert_eq!(
        text,
        "Our AI has detected a potential tumor with 92% confidence. \
The highlighted areas in the image indicate regions of concern. \
Please consult with a medical professional for a comprehensive diagnosis and treatment plan."
    );
}

#[test]
fn test_result_text_not_detected_ignores_class() {
    assert_eq!(
        result_text(TumorStatus::NotDetected, Some("Glioma"), "40"),
        NO_TUMOR_MESSAGE
    );
    assert_eq!(
        result_text(TumorStatus::NotDetected, None, "0"),
        "No tumor detected."
    );
}

#[test]
fn test_result_text_for_null_class() {
    let result = prediction(json!({
        "status": "detected",
        "confidence": 77,
        "tumor_class": null,
        "result_path": "r.jpg"
    }));
    let text = result_text_for(&result);

    assert!(text.starts_with("Our AI has detected a potential tumor with 77% confidence."));
}

#[test]
fn test_result_text_for_none_placeholder_class() {
    let result = prediction(json!({
        "status": "detected",
        "confidence": 61,
        "tumor_class": "None"
    }));
    assert!(!result_text_for(&result).contains("None"));
}

#[test]
fn test_result_text_for_other_status() {
    for status in ["not_detected", "", "DETECTED", "unknown"] {
        let result = prediction(json!({ "status": status, "confidence": 10 }));
        assert_eq!(result_text_for(&result), NO_TUMOR_MESSAGE);
    }
}

// ============================================================================
// Cache Busting Tests
// ============================================================================

#[test]
fn test_cache_busted_plain_path() {
    assert_eq!(
        cache_busted("static/result.jpg", 1700000000000),
        "static/result.jpg?t=1700000000000"
    );
}

#[test]
fn test_cache_busted_existing_query() {
    assert_eq!(
        cache_busted("https://cdn.example.com/r.jpg?token=abc", 5),
        "https://cdn.example.com/r.jpg?token=abc&t=5"
    );
}

#[test]
fn test_cache_busted_trailing_question_mark() {
    assert_eq!(
        cache_busted("https://cdn.example.com/r.jpg?", 5),
        "https://cdn.example.com/r.jpg?t=5"
    );
}

// ============================================================================
// Report Link Tests
// ============================================================================

#[test]
fn test_report_link_has_exactly_five_params_in_order() {
    let result = prediction(json!({
        "status": "detected",
        "confidence": 92,
        "tumor_class": "Glioma",
        "result_path": "https://cdn.example.com/processed/r.jpg",
        "extracted_text": "L R"
    }));

    let link = report_link(&endpoint(), &result);
    let keys: Vec<String> = link.query_pairs().map(|(k, _)| k.into_owned()).collect();

    assert_eq!(keys, REPORT_PARAMS);
    assert_eq!(link.path(), "/download_report");
}

#[test]
fn test_report_link_values_are_encoded() {
    let result = prediction(json!({
        "status": "detected",
        "confidence": 92,
        "tumor_class": "Glioma",
        "result_path": "https://cdn.example.com/processed/r.jpg?x=1&y=2",
        "extracted_text": "left & right"
    }));

    let link = report_link(&endpoint(), &result);
    let query = link.query().unwrap();

    assert!(query.contains(
        "result_path=https%3A%2F%2Fcdn.example.com%2Fprocessed%2Fr.jpg%3Fx%3D1%26y%3D2"
    ));
    assert!(query.contains("extracted_text=left+%26+right"));
    assert!(query.contains("confidence=92"));

    let decoded: Vec<(String, String)> = link.query_pairs().into_owned().collect();
    assert_eq!(
        decoded[0],
        (
            "result_path".to_string(),
            "https://cdn.example.com/processed/r.jpg?x=1&y=2".to_string()
        )
    );
    assert_eq!(
        decoded[4],
        ("extracted_text".to_string(), "left & right".to_string())
    );
}

#[test]
fn test_report_link_missing_values() {
    let result = prediction(json!({
        "status": "not_detected",
        "tumor_class": null,
        "result_path": "r.jpg"
    }));

    let link = report_link(&endpoint(), &result);
    let decoded: Vec<(String, String)> = link.query_pairs().into_owned().collect();

    assert_eq!(decoded.len(), 5);
    assert_eq!(decoded[2], ("confidence".to_string(), "N/A".to_string()));
    assert_eq!(decoded[3], ("tumor_class".to_string(), "None".to_string()));
    assert_eq!(decoded[4], ("extracted_text".to_string(), String::new()));
}

#[test]
fn test_report_link_replaces_existing_query() {
    let endpoint = Url::parse("http://localhost:5000/download_report?stale=1").unwrap();
    let result = prediction(json!({ "status": "detected", "confidence": 50 }));

    let link = report_link(&endpoint, &result);

    assert!(!link.query().unwrap().contains("stale"));
    assert_eq!(link.query_pairs().count(), 5);
}
