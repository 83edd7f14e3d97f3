use std::sync::Arc;

use services::{AppServices, QuestionSource};

/// What the composition root (`crates/app`) provides to the UI.
pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
    /// Question sources available on the home screen, in display order.
    fn sources(&self) -> Vec<Arc<dyn QuestionSource>>;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    sources: Vec<Arc<dyn QuestionSource>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            sources: app.sources(),
        }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn QuestionSource>] {
        &self.sources
    }

    #[must_use]
    pub fn source(&self, index: usize) -> Option<Arc<dyn QuestionSource>> {
        self.sources.get(index).cloned()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
