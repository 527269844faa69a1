//! Content region replacement

use std::sync::Arc;

use vcsio_dom::{Document, ElementId};

use crate::error::FetchError;
use crate::source::FragmentSource;
use crate::typeset::Typesetter;
use crate::Result;

/// Classes on the inline paragraph shown when a fragment cannot be loaded
pub const ERROR_MESSAGE_CLASSES: &str = "text-red-500 text-center";

/// What happened to a load once its response arrived
#[derive(Debug)]
pub enum LoadOutcome {
    /// Fragment swapped into the region
    Loaded,
    /// Region now shows the error message
    Failed(FetchError),
    /// Response dropped because a newer load started
    Superseded,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

pub struct ContentLoader<S> {
    source: S,
    typesetter: Option<Arc<dyn Typesetter>>,
}

impl<S: FragmentSource> ContentLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            typesetter: None,
        }
    }

    pub fn with_typesetter(mut self, typesetter: Arc<dyn Typesetter>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "Fetching tab fragment");
        self.source.fetch(url).await
    }

    /// Replace the region's children with a fetched fragment, or with an
    /// error message when the fetch failed
    pub fn apply(
        &self,
        doc: &mut Document,
        region: ElementId,
        result: Result<String>,
    ) -> LoadOutcome {
        match result {
            Ok(html) => {
                doc.set_inner_html(region, &html);
                self.typeset(doc, region);
                LoadOutcome::Loaded
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading tab content");
                doc.remove_children(region);
                let message = doc.append_element(region, "p");
                doc.set_attribute(message, "class", ERROR_MESSAGE_CLASSES);
                doc.append_text(
                    message,
                    &format!("Error loading content: {}. Please try again.", e),
                );
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Fetch and apply in one step
    pub async fn load(&self, doc: &mut Document, region: ElementId, url: &str) -> LoadOutcome {
        let result = self.fetch(url).await;
        self.apply(doc, region, result)
    }

    fn typeset(&self, doc: &Document, region: ElementId) {
        let Some(typesetter) = &self.typesetter else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(typesetter.typeset(doc.inner_html(region)));
            }
            Err(_) => tracing::warn!("No async runtime available, skipping math typesetting"),
        }
    }
}
