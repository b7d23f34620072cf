use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for the health endpoint
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
