// The detection page: one owner for the bindings and every controller

use crate::dom::{BindError, Bindings, Document, ElementId};
use crate::neural::{NeuralNetwork, Viewport};
use crate::predict::{PredictController, SubmitState, Submission};
use crate::toggle::{TumorModal, toggle_sidebar};
use crate::upload::UploadController;
use cerebrova_client::{ClientError, ImageUpload, PredictClient, PredictionResult};
use rand::Rng;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Something the user (or the frame clock) did.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    FileSelected(Option<PathBuf>),
    Submit,
    Click(ElementId),
    Frame,
}

/// Asynchronous work requested by the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    ReadFile { generation: u64, path: PathBuf },
    Predict(Submission),
    FetchDescriptions { generation: u64 },
}

/// The result of a [`Task`], fed back through [`Page::resolve`].
#[derive(Debug)]
pub enum Completion {
    FileRead {
        generation: u64,
        result: Result<ImageUpload, ClientError>,
    },
    Prediction {
        id: u64,
        result: Result<PredictionResult, ClientError>,
    },
    Descriptions {
        generation: u64,
        result: Result<String, ClientError>,
    },
}

pub struct Page {
    bindings: Bindings,
    upload: UploadController,
    predict: PredictController,
    modal: TumorModal,
    network: Option<NeuralNetwork>,
}

impl Page {
    pub fn new<R: Rng>(
        document: Document,
        report_endpoint: Url,
        viewport: Viewport,
        rng: &mut R,
    ) -> Result<Self, BindError> {
        let bindings = Bindings::bind(document)?;
        let network = NeuralNetwork::initialize(bindings.neural_network.as_ref(), viewport, rng);

        Ok(Self {
            bindings,
            upload: UploadController::new(),
            predict: PredictController::new(report_endpoint),
            modal: TumorModal::new(),
            network,
        })
    }

    /// Handle one event to completion, returning the work it started.
    pub fn handle(&mut self, event: PageEvent) -> Option<Task> {
        match event {
            PageEvent::FileSelected(selection) => self
                .upload
                .change(&mut self.bindings, selection)
                .map(|read| Task::ReadFile {
                    generation: read.generation,
                    path: read.path,
                }),
            PageEvent::Submit => self.submit(),
            PageEvent::Click(target) => self.click(target),
            PageEvent::Frame => {
                if let Some(network) = self.network.as_mut() {
                    network.step();
                }
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Task> {
        match self.predict.begin(&mut self.bindings, self.upload.selected()) {
            Ok(submission) => Some(Task::Predict(submission)),
            Err(e) => {
                debug!("Submit ignored: {}", e);
                None
            }
        }
    }

    fn click(&mut self, target: ElementId) -> Option<Task> {
        match target {
            ElementId::InstructionsBtn | ElementId::CloseBtn | ElementId::Overlay => {
                toggle_sidebar(&mut self.bindings);
                None
            }
            ElementId::LearnMoreBtn => {
                let fetch = self.modal.open(&mut self.bindings);
                Some(Task::FetchDescriptions {
                    generation: fetch.generation,
                })
            }
            // A click on the modal itself is a click on the backdrop
            ElementId::CloseModal | ElementId::TumorModal => {
                self.modal.close(&mut self.bindings);
                None
            }
            ElementId::SubmitBtn if !self.bindings.submit_btn.disabled => self.submit(),
            _ => None,
        }
    }

    /// Apply the result of a task. Returns false when it was stale.
    pub fn resolve(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::FileRead { generation, result } => {
                let submitting = self.predict.is_in_flight();
                self.upload
                    .read_complete_while(&mut self.bindings, generation, result, submitting)
            }
            Completion::Prediction { id, result } => {
                let has_selection = self.upload.selected().is_some();
                self.predict
                    .complete(&mut self.bindings, id, result, has_selection)
            }
            Completion::Descriptions { generation, result } => {
                self.modal
                    .descriptions_loaded(&mut self.bindings, generation, result)
            }
        }
    }

    /// Handle an event and, if it started a task, run it and apply the
    /// result before returning.
    pub async fn dispatch(&mut self, event: PageEvent, client: &PredictClient) {
        if let Some(task) = self.handle(event) {
            let completion = run_task(task, client).await;
            self.resolve(completion);
        }
    }

    pub fn restore_from_query(&mut self, page_url: &Url) -> bool {
        self.predict.restore_from_query(&mut self.bindings, page_url)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn state(&self) -> SubmitState {
        self.predict.state()
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.predict.last_result()
    }

    pub fn selected_file(&self) -> Option<&ImageUpload> {
        self.upload.selected()
    }

    pub fn network(&self) -> Option<&NeuralNetwork> {
        self.network.as_ref()
    }
}

/// Perform a task. This is the only place the page's work suspends.
pub async fn run_task(task: Task, client: &PredictClient) -> Completion {
    match task {
        Task::ReadFile { generation, path } => Completion::FileRead {
            generation,
            result: ImageUpload::from_path(&path).await,
        },
        Task::Predict(submission) => Completion::Prediction {
            id: submission.id,
            result: client.predict(&submission.upload).await,
        },
        Task::FetchDescriptions { generation } => Completion::Descriptions {
            generation,
            result: client.tumor_descriptions().await,
        },
    }
}
