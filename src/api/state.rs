use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::upstream::Clients;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub clients: Arc<Clients>,
}

impl AppState {
    pub fn new(config: DashboardConfig, clients: Clients) -> Self {
        Self {
            config: Arc::new(config),
            clients: Arc::new(clients),
        }
    }
}
