// Result narrative, cache busting and report links

use cerebrova_client::result::{NO_CLASS, PredictionResult, TumorStatus};
use url::Url;

pub const NO_TUMOR_MESSAGE: &str = "No tumor detected.";

const DETECTION_ADVICE: &str = "The highlighted areas in the image indicate regions of concern. \
Please consult with a medical professional for a comprehensive diagnosis and treatment plan.";

/// Query parameters of `/download_report`, in the order they are written.
pub const REPORT_PARAMS: [&str; 5] = [
    "result_path",
    "status",
    "confidence",
    "tumor_class",
    "extracted_text",
];

/// Compose the sentence shown under the annotated image.
pub fn result_text(status: TumorStatus, tumor_class: Option<&str>, confidence: &str) -> String {
    match (status, tumor_class) {
        (TumorStatus::Detected, Some(class)) => format!(
            "Our AI has detected a potential {} tumor with {}% confidence. {}",
            class, confidence, DETECTION_ADVICE
        ),
        (TumorStatus::Detected, None) => format!(
            "Our AI has detected a potential tumor with {}% confidence. {}",
            confidence, DETECTION_ADVICE
        ),
        (TumorStatus::NotDetected, _) => NO_TUMOR_MESSAGE.to_string(),
    }
}

pub fn result_text_for(result: &PredictionResult) -> String {
    result_text(
        result.status(),
        result.tumor_class(),
        &result.confidence_display(),
    )
}

/// Append a timestamp query parameter so the annotated image is re-fetched.
pub fn cache_busted(result_path: &str, timestamp_millis: i64) -> String {
    let separator = if result_path.ends_with('?') || result_path.ends_with('&') {
        ""
    } else if result_path.contains('?') {
        "&"
    } else {
        "?"
    };
    format!("{}{}t={}", result_path, separator, timestamp_millis)
}

/// Build the `/download_report` link for a successful prediction.
///
/// Any query already on the endpoint is replaced, so the link always carries
/// exactly the five report parameters.
pub fn report_link(report_endpoint: &Url, result: &PredictionResult) -> Url {
    let mut url = report_endpoint.clone();
    url.set_query(None);

    let tumor_class = result.tumor_class.as_deref().unwrap_or(NO_CLASS);
    let confidence = result.confidence_display();
    url.query_pairs_mut()
        .append_pair(REPORT_PARAMS[0], &result.result_path)
        .append_pair(REPORT_PARAMS[1], &result.status)
        .append_pair(REPORT_PARAMS[2], &confidence)
        .append_pair(REPORT_PARAMS[3], tumor_class)
        .append_pair(REPORT_PARAMS[4], result.extracted_text());

    url
}
