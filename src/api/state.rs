//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Registrar, UserRepository};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<dyn Registrar>,
    /// Backing store, used by readiness checks
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(registrar: Arc<dyn Registrar>, users: Arc<dyn UserRepository>) -> Self {
        Self { registrar, users }
    }
}
