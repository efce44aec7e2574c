// src/http/state.rs

use std::sync::Arc;

use crate::export::PdfCreator;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub creator: Arc<PdfCreator>,
}

impl AppState {
    pub fn new(creator: PdfCreator) -> Self {
        Self {
            creator: Arc::new(creator),
        }
    }
}
