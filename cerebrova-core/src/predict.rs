// Submission state machine and result rendering

use crate::dom::Bindings;
use crate::report::{cache_busted, report_link, result_text, result_text_for};
use cerebrova_client::result::TumorStatus;
use cerebrova_client::{ClientError, ImageUpload, PredictionResult};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const SUBMIT_LABEL: &str = "Analyze Image";
pub const SUBMITTING_LABEL: &str = "Analyzing...";
pub const PROCESSING_MESSAGE: &str = "Processing MRI scan... This may take a few seconds.";
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while processing the image. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Displayed,
    Error,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("No file selected")]
    NoFile,

    #[error("Submission {0} is still in flight")]
    InFlight(u64),
}

/// One request to the prediction endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: u64,
    pub upload: ImageUpload,
}

#[derive(Debug)]
pub struct PredictController {
    state: SubmitState,
    report_endpoint: Url,
    next_id: u64,
    in_flight: Option<u64>,
    last_result: Option<PredictionResult>,
}

impl PredictController {
    pub fn new(report_endpoint: Url) -> Self {
        Self {
            state: SubmitState::Idle,
            report_endpoint,
            next_id: 1,
            in_flight: None,
            last_result: None,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// The last response that was rendered as a prediction (not as an error).
    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    /// Enter the busy state and hand back the request to send.
    ///
    /// Only one submission may be outstanding at a time.
    pub fn begin(
        &mut self,
        bindings: &mut Bindings,
        upload: Option<&ImageUpload>,
    ) -> Result<Submission, SubmitError> {
        if let Some(id) = self.in_flight {
            return Err(SubmitError::InFlight(id));
        }
        let upload = upload.ok_or(SubmitError::NoFile)?.clone();

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(id);
        self.state = SubmitState::Submitting;
        info!("Submission {} started for {}", id, upload.file_name);

        bindings.submit_btn.disabled = true;
        bindings.submit_btn.set_text(SUBMITTING_LABEL);
        bindings.result_box.show();
        bindings.result_box.scroll_into_view();
        bindings.detection_result_text.set_text(PROCESSING_MESSAGE);

        Ok(Submission { id, upload })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply the outcome of a submission. Returns false for an outcome that
    /// does not belong to the submission in flight.
    ///
    /// Submit is only re-enabled when a file is still selected.
    pub fn complete(
        &mut self,
        bindings: &mut Bindings,
        id: u64,
        outcome: Result<PredictionResult, ClientError>,
        has_selection: bool,
    ) -> bool {
        let now = chrono::Utc::now().timestamp_millis();
        self.complete_at(bindings, id, outcome, has_selection, now)
    }

    /// [`complete`](PredictController::complete) with an explicit clock, in
    /// epoch milliseconds, for the cache-busting parameter.
    pub fn complete_at(
        &mut self,
        bindings: &mut Bindings,
        id: u64,
        outcome: Result<PredictionResult, ClientError>,
        has_selection: bool,
        timestamp_millis: i64,
    ) -> bool {
        if self.in_flight != Some(id) {
            debug!("Ignoring outcome of submission {}", id);
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                if let Some(error) = result.server_error() {
                    warn!("Submission {} rejected by server: {}", id, error);
                    bindings.detection_result_text.set_text(error);
                } else {
                    info!(
                        "Submission {} complete: status={} confidence={}",
                        id,
                        result.status,
                        result.confidence_display()
                    );
                    self.render(bindings, &result, timestamp_millis);
                    self.last_result = Some(result);
                }
                self.state = SubmitState::Displayed;
            }
            Err(e) => {
                warn!("Submission {} failed: {}", id, e);
                bindings.detection_result_text.set_text(GENERIC_ERROR_MESSAGE);
                self.state = SubmitState::Error;
            }
        }

        bindings.submit_btn.disabled = !has_selection;
        bindings.submit_btn.set_text(SUBMIT_LABEL);
        true
    }

    fn render(&self, bindings: &mut Bindings, result: &PredictionResult, timestamp_millis: i64) {
        bindings.detection_image.src = Some(cache_busted(&result.result_path, timestamp_millis));
        bindings.detection_result_text.set_text(result_text_for(result));
        bindings.confidence_value.set_text(result.confidence_display());
        bindings.download_report_btn.href =
            Some(report_link(&self.report_endpoint, result).to_string());
        bindings.download_report_btn.show();
    }

    /// Show a result carried in the page URL (`?result=...&status=...`).
    ///
    /// A `confidence` parameter is written to the confidence field even
    /// without a result. Returns false when there is no `result` parameter.
    pub fn restore_from_query(&mut self, bindings: &mut Bindings, page_url: &Url) -> bool {
        self.restore_from_query_at(bindings, page_url, chrono::Utc::now().timestamp_millis())
    }

    pub fn restore_from_query_at(
        &mut self,
        bindings: &mut Bindings,
        page_url: &Url,
        timestamp_millis: i64,
    ) -> bool {
        let param = |name: &str| {
            page_url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        let confidence = param("confidence");
        if let Some(confidence) = &confidence {
            bindings.confidence_value.set_text(confidence.as_str());
        }

        let Some(result_path) = param("result") else {
            return false;
        };
        debug!("Restoring result {} from page URL", result_path);

        let status = TumorStatus::from_tag(param("status").as_deref().unwrap_or_default());
        let tumor_class = param("tumor_class");
        let tumor_class = tumor_class
            .as_deref()
            .filter(|c| *c != cerebrova_client::result::NO_CLASS);

        bindings.result_box.show();
        bindings.result_box.scroll_into_view();
        bindings.detection_image.src = Some(cache_busted(&result_path, timestamp_millis));
        bindings.detection_result_text.set_text(result_text(
            status,
            tumor_class,
            confidence.as_deref().unwrap_or(cerebrova_client::result::CONFIDENCE_UNAVAILABLE),
        ));
        self.state = SubmitState::Displayed;
        true
    }
}
