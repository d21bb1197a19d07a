pub mod client;
pub mod error;
pub mod result;
pub mod upload;

pub use client::PredictClient;
pub use error::ClientError;
pub use result::{PredictionResult, TumorStatus};
pub use upload::ImageUpload;
