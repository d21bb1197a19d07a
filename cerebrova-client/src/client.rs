use crate::error::{ClientError, Result};
use crate::result::PredictionResult;
use crate::upload::ImageUpload;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

// Relative, so a base URL with a path prefix keeps it
pub const PREDICT_PATH: &str = "predict";
pub const DESCRIPTIONS_PATH: &str = "tumor_descriptions";
pub const REPORT_PATH: &str = "download_report";

/// Multipart field the prediction endpoint reads the image from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct PredictClient {
    client: Client,
    base_url: Url,
}

impl PredictClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 30)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("Cerebrova/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve one of the service paths against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Upload an image and parse the JSON verdict.
    ///
    /// The body is parsed whatever the HTTP status: the service reports its
    /// own failures as `{"error": ...}` with a 4xx/5xx status.
    pub async fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult> {
        let url = self.endpoint(PREDICT_PATH)?;
        info!("Submitting {} ({} bytes) to {}", upload.file_name, upload.size(), url);

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let start = Instant::now();
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Prediction answered {} in {:?}", status, start.elapsed());

        serde_json::from_str::<PredictionResult>(&body).map_err(|e| {
            warn!("Prediction response was not JSON ({}): {}", status, e);
            ClientError::MalformedResponse(e.to_string())
        })
    }

    /// Fetch the HTML fragment describing the tumor classes.
    pub async fn tumor_descriptions(&self) -> Result<String> {
        let url = self.endpoint(DESCRIPTIONS_PATH)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Download a report previously built with the report link builder.
    pub async fn download_report(&self, report_url: &Url) -> Result<Vec<u8>> {
        debug!("Downloading report from {}", report_url);

        let response = self
            .client
            .get(report_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        info!("Downloaded report ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}
