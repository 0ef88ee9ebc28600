//! Shared application state for the web server.

use std::sync::Arc;

use habits::io::store::HabitStore;

use crate::render::PageRenderer;

/// Shared state accessible from all request handlers.
///
/// Holds no habits: every request loads the collection from the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HabitStore>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn HabitStore>) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            renderer: Arc::new(PageRenderer::new()?),
        })
    }
}
