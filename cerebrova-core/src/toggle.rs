// Instructions sidebar and tumor description modal

use crate::dom::Bindings;
use cerebrova_client::ClientError;
use tracing::{debug, warn};

pub const DESCRIPTIONS_UNAVAILABLE: &str = "<p>Unable to load tumor descriptions.</p>";

/// Toggle both the sidebar and the overlay behind it.
pub fn toggle_sidebar(bindings: &mut Bindings) {
    bindings.sidebar.toggle();
    bindings.overlay.toggle();
    debug!("Sidebar open: {}", bindings.sidebar.active);
}

/// A pending fetch of the modal body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionsFetch {
    pub generation: u64,
}

/// The "learn more" modal. Its body is fetched again on every open.
#[derive(Debug, Default)]
pub struct TumorModal {
    generation: u64,
}

impl TumorModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, bindings: &mut Bindings) -> DescriptionsFetch {
        self.generation += 1;
        bindings.tumor_modal.show();
        DescriptionsFetch {
            generation: self.generation,
        }
    }

    pub fn close(&mut self, bindings: &mut Bindings) {
        bindings.tumor_modal.hide();
    }

    pub fn is_open(&self, bindings: &Bindings) -> bool {
        bindings.tumor_modal.active
    }

    /// Inject a fetched fragment. Fragments from an earlier open, or arriving
    /// after the modal closed, are dropped.
    pub fn descriptions_loaded(
        &mut self,
        bindings: &mut Bindings,
        generation: u64,
        fragment: Result<String, ClientError>,
    ) -> bool {
        if generation != self.generation || !self.is_open(bindings) {
            debug!("Discarding tumor descriptions from open {}", generation);
            return false;
        }

        let html = fragment.unwrap_or_else(|e| {
            warn!("Failed to load tumor descriptions: {}", e);
            DESCRIPTIONS_UNAVAILABLE.to_string()
        });
        bindings.tumor_descriptions_container.html = Some(html);
        true
    }
}
