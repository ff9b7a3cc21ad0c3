use std::sync::Arc;

use crate::service::PlayerService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PlayerService>,
}

impl AppState {
    pub fn new(service: PlayerService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
