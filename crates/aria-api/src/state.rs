use std::sync::Arc;

use aria_coach::AriaCoach;
use aria_wearables::DeviceSource;

use crate::config::Config;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub coach: Arc<AriaCoach>,
    pub devices: Arc<dyn DeviceSource>,
}

impl AppState {
    pub fn new(config: Config, coach: AriaCoach, devices: Arc<dyn DeviceSource>) -> Self {
        Self {
            config: Arc::new(config),
            coach: Arc::new(coach),
            devices,
        }
    }
}
