//! Application state.

use taskgate_config::GatewayConfig;

use crate::error::ValidationError;
use crate::service::TaskService;
use taskgate_protocols::CreateTaskRequest;

/// State shared across handlers. Read-only after construction.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
    /// Inclusive upper bound for task difficulty.
    pub max_difficulty: i64,
    pub cors_permissive: bool,
}

impl AppState {
    pub fn new(service: TaskService, config: &GatewayConfig) -> Self {
        Self {
            service,
            max_difficulty: config.max_difficulty,
            cors_permissive: config.cors_permissive,
        }
    }

    /// Check a create request against the ingress rules.
    pub fn validate_create(&self, request: &CreateTaskRequest) -> Result<(), ValidationError> {
        if request.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(0..=self.max_difficulty).contains(&request.difficulty) {
            return Err(ValidationError::DifficultyOutOfRange {
                value: request.difficulty,
                max: self.max_difficulty,
            });
        }
        Ok(())
    }
}
