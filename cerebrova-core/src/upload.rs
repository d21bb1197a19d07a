// File selection and local preview

use crate::dom::Bindings;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use cerebrova_client::{ClientError, ImageUpload};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DEFAULT_LABEL: &str = "Click to upload MRI image";
pub const DEFAULT_LABEL_HINT: &str = "Supports JPG, JPEG or PNG formats";
pub const SELECTED_LABEL_HINT: &str = "Click to change file";

/// Encode an image as a `data:` URL for the preview element.
pub fn to_data_url(upload: &ImageUpload) -> String {
    format!("data:{};base64,{}", upload.mime, BASE64.encode(&upload.bytes))
}

/// A pending read of the file the user just picked.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRead {
    pub generation: u64,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct UploadController {
    generation: u64,
    selected: Option<ImageUpload>,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the file input changing.
    ///
    /// With a file, the label switches to the file name right away and a
    /// read is requested; the preview follows in [`read_complete`]. Without
    /// one, the form goes back to its initial state.
    ///
    /// [`read_complete`]: UploadController::read_complete
    pub fn change(&mut self, bindings: &mut Bindings, selection: Option<PathBuf>) -> Option<FileRead> {
        // Any read still outstanding belongs to the previous selection
        self.generation += 1;
        self.selected = None;

        match selection {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                debug!("File selected: {}", name);

                bindings.file_input.set_text(path.display().to_string());
                bindings.file_input_label.set_text(name);
                bindings.file_input_label.hint = Some(SELECTED_LABEL_HINT.to_string());
                bindings.submit_btn.disabled = true;

                Some(FileRead {
                    generation: self.generation,
                    path,
                })
            }
            None => {
                debug!("File selection cleared");
                self.reset(bindings);
                None
            }
        }
    }

    /// Apply a finished read. Returns false when the read was stale.
    pub fn read_complete(
        &mut self,
        bindings: &mut Bindings,
        generation: u64,
        read: Result<ImageUpload, ClientError>,
    ) -> bool {
        self.read_complete_while(bindings, generation, read, false)
    }

    /// [`read_complete`](UploadController::read_complete) while a submission
    /// may be in flight. When `submitting`, submit stays disabled and the
    /// result panel is left alone until the submission settles.
    pub fn read_complete_while(
        &mut self,
        bindings: &mut Bindings,
        generation: u64,
        read: Result<ImageUpload, ClientError>,
        submitting: bool,
    ) -> bool {
        if generation != self.generation {
            debug!("Discarding stale file read (generation {})", generation);
            return false;
        }

        match read {
            Ok(upload) => {
                bindings.image_preview.src = Some(to_data_url(&upload));
                bindings.preview_container.show();
                if !submitting {
                    bindings.submit_btn.disabled = false;
                    bindings.result_box.hide();
                }
                self.selected = Some(upload);
            }
            Err(e) => {
                warn!("Could not read selected file: {}", e);
                self.reset(bindings);
            }
        }
        true
    }

    pub fn selected(&self) -> Option<&ImageUpload> {
        self.selected.as_ref()
    }

    fn reset(&mut self, bindings: &mut Bindings) {
        self.selected = None;
        bindings.file_input.set_text("");
        bindings.image_preview.src = None;
        bindings.preview_container.hide();
        bindings.submit_btn.disabled = true;
        bindings.file_input_label.set_text(DEFAULT_LABEL);
        bindings.file_input_label.hint = Some(DEFAULT_LABEL_HINT.to_string());
    }
}
