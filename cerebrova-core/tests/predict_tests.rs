// Tests for the submit/response state machine

use cerebrova_client::{ClientError, ImageUpload, PredictionResult};
use cerebrova_core::dom::{Bindings, Document};
use cerebrova_core::predict::{
    GENERIC_ERROR_MESSAGE, PROCESSING_MESSAGE, PredictController, SUBMIT_LABEL, SUBMITTING_LABEL,
    SubmitError, SubmitState,
};
use serde_json::json;
use url::Url;

const NOW: i64 = 1_700_000_000_000;

fn bindings() -> Bindings {
    let mut bindings = Bindings::bind(Document::standard()).unwrap();
    bindings.submit_btn.disabled = false;
    bindings
}

fn controller() -> PredictController {
    PredictController::new(Url::parse("http://localhost:5000/download_report").unwrap())
}

fn scan() -> ImageUpload {
    ImageUpload::new("brain.png", b"png".to_vec())
}

fn glioma() -> PredictionResult {
    serde_json::from_value(json!({
        "status": "detected",
        "confidence": 92,
        "tumor_class": "Glioma",
        "result_path": "https://cdn.example.com/processed/result_1.jpg",
        "extracted_text": "scan notes"
    }))
    .unwrap()
}

fn transport_error() -> ClientError {
    ClientError::MalformedResponse("expected value at line 1 column 1".to_string())
}

// ============================================================================
// Submit Tests
// ============================================================================

#[test]
fn test_submit_without_file_is_rejected() {
    let mut bindings = bindings();
    let mut controller = controller();

    assert_eq!(
        controller.begin(&mut bindings, None),
        Err(SubmitError::NoFile)
    );
    assert_eq!(controller.state(), SubmitState::Idle);
    assert!(!bindings.result_box.active);
}

#[test]
fn test_submit_enters_busy_state() {
    let mut bindings = bindings();
    let mut controller = controller();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();

    assert_eq!(submission.upload, scan());
    assert_eq!(controller.state(), SubmitState::Submitting);
    assert!(bindings.submit_btn.disabled);
    assert_eq!(bindings.submit_btn.text, SUBMITTING_LABEL);
    assert!(bindings.result_box.active);
    assert!(bindings.result_box.in_view);
    assert_eq!(bindings.detection_result_text.text, PROCESSING_MESSAGE);
}

/// In-flight guard: overlapping submissions are refused rather than raced
#[test]
fn test_resubmission_rejected_while_in_flight() {
    let mut bindings = bindings();
    let mut controller = controller();

    let first = controller.begin(&mut bindings, Some(&scan())).unwrap();
    assert_eq!(
        controller.begin(&mut bindings, Some(&scan())),
        Err(SubmitError::InFlight(first.id))
    );

    assert!(controller.complete_at(&mut bindings, first.id, Ok(glioma()), true, NOW));
    let second = controller.begin(&mut bindings, Some(&scan())).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn test_outcome_for_unknown_submission_is_ignored() {
    let mut bindings = bindings();
    let mut controller = controller();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    assert!(!controller.complete_at(&mut bindings, submission.id + 1, Ok(glioma()), true, NOW));

    assert_eq!(controller.state(), SubmitState::Submitting);
    assert_eq!(bindings.detection_result_text.text, PROCESSING_MESSAGE);
}

// ============================================================================
// Success Path Tests
// ============================================================================

#[test]
fn test_success_renders_result() {
    let mut bindings = bindings();
    let mut controller = controller();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, submission.id, Ok(glioma()), true, NOW);

    assert_eq!(controller.state(), SubmitState::Displayed);
    assert_eq!(
        bindings.detection_result_text.text,
        "Our AI has detected a potential Glioma tumor with 92% confidence. \
The highlighted areas in the image indicate regions of concern. \
Please consult with a medical professional for a comprehensive diagnosis and treatment plan."
    );
    assert_eq!(
        bindings.detection_image.src.as_deref(),
        Some("https://cdn.example.com/processed/result_1.jpg?t=1700000000000")
    );
    assert_eq!(bindings.confidence_value.text, "92");
    assert!(bindings.download_report_btn.active);
    assert!(!bindings.submit_btn.disabled);
    assert_eq!(bindings.submit_btn.text, SUBMIT_LABEL);
    assert_eq!(controller.last_result(), Some(&glioma()));
}

#[test]
fn test_report_link_reflects_last_successful_response() {
    let mut bindings = bindings();
    let mut controller = controller();

    let first = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, first.id, Ok(glioma()), true, NOW);

    let meningioma: PredictionResult = serde_json::from_value(json!({
        "status": "detected",
        "confidence": 88.5,
        "tumor_class": "Meningioma",
        "result_path": "https://cdn.example.com/processed/result_2.jpg",
        "extracted_text": ""
    }))
    .unwrap();
    let second = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, second.id, Ok(meningioma), true, NOW);

    let href = bindings.download_report_btn.href.clone().unwrap();
    let link = Url::parse(&href).unwrap();
    let pairs: Vec<(String, String)> = link.query_pairs().into_owned().collect();

    assert_eq!(link.path(), "/download_report");
    assert_eq!(
        pairs,
        vec![
            (
                "result_path".to_string(),
                "https://cdn.example.com/processed/result_2.jpg".to_string()
            ),
            ("status".to_string(), "detected".to_string()),
            ("confidence".to_string(), "88.5".to_string()),
            ("tumor_class".to_string(), "Meningioma".to_string()),
            ("extracted_text".to_string(), String::new()),
        ]
    );
    assert_eq!(bindings.confidence_value.text, "88.5");
}

#[test]
fn test_not_detected_result() {
    let mut bindings = bindings();
    let mut controller = controller();

    let result: PredictionResult = serde_json::from_value(json!({
        "status": "not_detected",
        "confidence": 12,
        "tumor_class": "None",
        "result_path": "r.jpg"
    }))
    .unwrap();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, submission.id, Ok(result), true, NOW);

    assert_eq!(bindings.detection_result_text.text, "No tumor detected.");
    assert_eq!(bindings.confidence_value.text, "12");
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[test]
fn test_server_error_is_shown_without_updates() {
    let mut bindings = bindings();
    let mut controller = controller();

    let first = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, first.id, Ok(glioma()), true, NOW);
    let image_before = bindings.detection_image.src.clone();
    let href_before = bindings.download_report_btn.href.clone();

    let rejected: PredictionResult =
        serde_json::from_value(json!({ "error": "Invalid file" })).unwrap();
    let second = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, second.id, Ok(rejected), true, NOW + 1);

    assert_eq!(bindings.detection_result_text.text, "Invalid file");
    assert_eq!(bindings.detection_image.src, image_before);
    assert_eq!(bindings.download_report_btn.href, href_before);
    assert_eq!(bindings.confidence_value.text, "92");
    assert_eq!(controller.state(), SubmitState::Displayed);
    assert_eq!(controller.last_result(), Some(&glioma()));
    assert!(!bindings.submit_btn.disabled);
}

#[test]
fn test_server_error_on_fresh_page_reveals_no_link() {
    let mut bindings = bindings();
    let mut controller = controller();

    let rejected: PredictionResult =
        serde_json::from_value(json!({ "error": "Invalid file" })).unwrap();
    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, submission.id, Ok(rejected), true, NOW);

    assert!(bindings.detection_image.src.is_none());
    assert!(bindings.download_report_btn.href.is_none());
    assert!(!bindings.download_report_btn.active);
}

#[test]
fn test_transport_error_shows_generic_message_and_reenables_submit() {
    let mut bindings = bindings();
    let mut controller = controller();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, submission.id, Err(transport_error()), true, NOW);

    assert_eq!(controller.state(), SubmitState::Error);
    assert_eq!(bindings.detection_result_text.text, GENERIC_ERROR_MESSAGE);
    assert!(!bindings.submit_btn.disabled);
    assert_eq!(bindings.submit_btn.text, SUBMIT_LABEL);

    // The user may retry by hand
    assert!(controller.begin(&mut bindings, Some(&scan())).is_ok());
}

#[test]
fn test_completion_without_selection_keeps_submit_disabled() {
    let mut bindings = bindings();
    let mut controller = controller();

    let submission = controller.begin(&mut bindings, Some(&scan())).unwrap();
    controller.complete_at(&mut bindings, submission.id, Ok(glioma()), false, NOW);

    assert_eq!(controller.state(), SubmitState::Displayed);
    assert!(bindings.submit_btn.disabled);
    assert_eq!(bindings.submit_btn.text, SUBMIT_LABEL);
}

// ============================================================================
// Page URL Restore Tests
// ============================================================================

#[test]
fn test_restore_from_query() {
    let mut bindings = bindings();
    let mut controller = controller();
    let url = Url::parse(
        "http://localhost:5000/?result=static%2Fresult.jpg&status=detected&confidence=81&tumor_class=Pituitary",
    )
    .unwrap();

    assert!(controller.restore_from_query_at(&mut bindings, &url, NOW));

    assert!(bindings.result_box.active);
    assert!(bindings.result_box.in_view);
    assert_eq!(
        bindings.detection_image.src.as_deref(),
        Some("static/result.jpg?t=1700000000000")
    );
    assert!(
        bindings
            .detection_result_text
            .text
            .starts_with("Our AI has detected a potential Pituitary tumor with 81% confidence.")
    );
    assert_eq!(bindings.confidence_value.text, "81");
    assert_eq!(controller.state(), SubmitState::Displayed);
}

#[test]
fn test_restore_from_query_placeholder_class() {
    let mut bindings = bindings();
    let mut controller = controller();
    let url = Url::parse("http://localhost/?result=r.jpg&status=detected&confidence=70&tumor_class=None")
        .unwrap();

    controller.restore_from_query_at(&mut bindings, &url, NOW);

    assert!(
        bindings
            .detection_result_text
            .text
            .starts_with("Our AI has detected a potential tumor with 70% confidence.")
    );
}

#[test]
fn test_restore_without_result_leaves_page() {
    let mut bindings = bindings();
    let mut controller = controller();
    let url = Url::parse("http://localhost:5000/?status=detected").unwrap();

    assert!(!controller.restore_from_query_at(&mut bindings, &url, NOW));
    assert!(!bindings.result_box.active);
    assert!(bindings.detection_image.src.is_none());
    assert_eq!(controller.state(), SubmitState::Idle);
}

#[test]
fn test_restore_confidence_without_result() {
    let mut bindings = bindings();
    let mut controller = controller();
    let url = Url::parse("http://localhost:5000/?confidence=88").unwrap();

    assert!(!controller.restore_from_query_at(&mut bindings, &url, NOW));
    assert_eq!(bindings.confidence_value.text, "88");
    assert!(!bindings.result_box.active);
}
