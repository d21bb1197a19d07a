// Element bindings for the detection page

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Every element the page controllers bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    FileInput,
    FileInputLabel,
    PreviewContainer,
    ImagePreview,
    SubmitBtn,
    ResultBox,
    DetectionImage,
    DetectionResultText,
    Sidebar,
    CloseBtn,
    InstructionsBtn,
    Overlay,
    ConfidenceValue,
    DownloadReportBtn,
    LearnMoreBtn,
    TumorModal,
    CloseModal,
    TumorDescriptionsContainer,
    UploadForm,
    NeuralNetwork,
}

impl ElementId {
    pub const ALL: [ElementId; 20] = [
        ElementId::FileInput,
        ElementId::FileInputLabel,
        ElementId::PreviewContainer,
        ElementId::ImagePreview,
        ElementId::SubmitBtn,
        ElementId::ResultBox,
        ElementId::DetectionImage,
        ElementId::DetectionResultText,
        ElementId::Sidebar,
        ElementId::CloseBtn,
        ElementId::InstructionsBtn,
        ElementId::Overlay,
        ElementId::ConfidenceValue,
        ElementId::DownloadReportBtn,
        ElementId::LearnMoreBtn,
        ElementId::TumorModal,
        ElementId::CloseModal,
        ElementId::TumorDescriptionsContainer,
        ElementId::UploadForm,
        ElementId::NeuralNetwork,
    ];

    /// CSS selector of the element in the page markup.
    pub fn selector(&self) -> &'static str {
        match self {
            ElementId::FileInput => "#fileInput",
            ElementId::FileInputLabel => ".file-input-label",
            ElementId::PreviewContainer => "#previewContainer",
            ElementId::ImagePreview => "#imagePreview",
            ElementId::SubmitBtn => "#submitBtn",
            ElementId::ResultBox => "#resultBox",
            ElementId::DetectionImage => "#detectionImage",
            ElementId::DetectionResultText => "#detectionResultText",
            ElementId::Sidebar => "#sidebar",
            ElementId::CloseBtn => "#closeBtn",
            ElementId::InstructionsBtn => "#instructionsBtn",
            ElementId::Overlay => "#overlay",
            ElementId::ConfidenceValue => "#confidenceValue",
            ElementId::DownloadReportBtn => "#downloadReportBtn",
            ElementId::LearnMoreBtn => "#learnMoreBtn",
            ElementId::TumorModal => "#tumorModal",
            ElementId::CloseModal => "#closeModal",
            ElementId::TumorDescriptionsContainer => "#tumorDescriptionsContainer",
            ElementId::UploadForm => "#uploadForm",
            ElementId::NeuralNetwork => "#neuralNetwork",
        }
    }

    /// The animation container is decorative; everything else must exist.
    pub fn is_required(&self) -> bool {
        !matches!(self, ElementId::NeuralNetwork)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// State of one bound element, as far as the controllers touch it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// The `active` class: visible for panels, open for sidebar and modal.
    pub active: bool,
    pub disabled: bool,
    pub text: String,
    pub hint: Option<String>,
    pub src: Option<String>,
    pub href: Option<String>,
    /// Markup injected verbatim.
    pub html: Option<String>,
    pub in_view: bool,
}

impl Element {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn show(&mut self) {
        self.active = true;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.in_view = false;
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn scroll_into_view(&mut self) {
        self.in_view = true;
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("Required element {0} is missing from the document")]
    Missing(ElementId),
}

/// The set of elements a page was rendered with.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding every element of the detection page in its
    /// initial state.
    pub fn standard() -> Self {
        let mut document = Self::new();
        for id in ElementId::ALL {
            document.insert(id, Element::default());
        }

        if let Some(label) = document.get_mut(ElementId::FileInputLabel) {
            label.text = crate::upload::DEFAULT_LABEL.to_string();
            label.hint = Some(crate::upload::DEFAULT_LABEL_HINT.to_string());
        }
        if let Some(submit) = document.get_mut(ElementId::SubmitBtn) {
            submit.text = crate::predict::SUBMIT_LABEL.to_string();
            submit.disabled = true;
        }

        document
    }

    pub fn insert(&mut self, id: ElementId, element: Element) -> &mut Self {
        self.elements.insert(id, element);
        self
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }
}

/// Element handles resolved once, when the page is constructed.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub file_input: Element,
    pub file_input_label: Element,
    pub preview_container: Element,
    pub image_preview: Element,
    pub submit_btn: Element,
    pub result_box: Element,
    pub detection_image: Element,
    pub detection_result_text: Element,
    pub sidebar: Element,
    pub close_btn: Element,
    pub instructions_btn: Element,
    pub overlay: Element,
    pub confidence_value: Element,
    pub download_report_btn: Element,
    pub learn_more_btn: Element,
    pub tumor_modal: Element,
    pub close_modal: Element,
    pub tumor_descriptions_container: Element,
    pub upload_form: Element,
    pub neural_network: Option<Element>,
}

impl Bindings {
    /// Take every required element out of the document, failing on the
    /// first one that is missing.
    pub fn bind(mut document: Document) -> Result<Self, BindError> {
        let mut take = |id: ElementId| document.remove(id).ok_or(BindError::Missing(id));

        Ok(Self {
            file_input: take(ElementId::FileInput)?,
            file_input_label: take(ElementId::FileInputLabel)?,
            preview_container: take(ElementId::PreviewContainer)?,
            image_preview: take(ElementId::ImagePreview)?,
            submit_btn: take(ElementId::SubmitBtn)?,
            result_box: take(ElementId::ResultBox)?,
            detection_image: take(ElementId::DetectionImage)?,
            detection_result_text: take(ElementId::DetectionResultText)?,
            sidebar: take(ElementId::Sidebar)?,
            close_btn: take(ElementId::CloseBtn)?,
            instructions_btn: take(ElementId::InstructionsBtn)?,
            overlay: take(ElementId::Overlay)?,
            confidence_value: take(ElementId::ConfidenceValue)?,
            download_report_btn: take(ElementId::DownloadReportBtn)?,
            learn_more_btn: take(ElementId::LearnMoreBtn)?,
            tumor_modal: take(ElementId::TumorModal)?,
            close_modal: take(ElementId::CloseModal)?,
            tumor_descriptions_container: take(ElementId::TumorDescriptionsContainer)?,
            upload_form: take(ElementId::UploadForm)?,
            neural_network: take(ElementId::NeuralNetwork).ok(),
        })
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        Some(match id {
            ElementId::FileInput => &self.file_input,
            ElementId::FileInputLabel => &self.file_input_label,
            ElementId::PreviewContainer => &self.preview_container,
            ElementId::ImagePreview => &self.image_preview,
            ElementId::SubmitBtn => &self.submit_btn,
            ElementId::ResultBox => &self.result_box,
            ElementId::DetectionImage => &self.detection_image,
            ElementId::DetectionResultText => &self.detection_result_text,
            ElementId::Sidebar => &self.sidebar,
            ElementId::CloseBtn => &self.close_btn,
            ElementId::InstructionsBtn => &self.instructions_btn,
            ElementId::Overlay => &self.overlay,
            ElementId::ConfidenceValue => &self.confidence_value,
            ElementId::DownloadReportBtn => &self.download_report_btn,
            ElementId::LearnMoreBtn => &self.learn_more_btn,
            ElementId::TumorModal => &self.tumor_modal,
            ElementId::CloseModal => &self.close_modal,
            ElementId::TumorDescriptionsContainer => &self.tumor_descriptions_container,
            ElementId::UploadForm => &self.upload_form,
            ElementId::NeuralNetwork => return self.neural_network.as_ref(),
        })
    }
}
