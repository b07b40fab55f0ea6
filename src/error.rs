use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with {status}")]
    Status { status: StatusCode },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session file error: {0}")]
    SessionIo(#[from] std::io::Error),

    #[error("Not signed in. Store an admin token with `session login` first")]
    NotAuthenticated,

    #[error("Access denied: an admin account is required")]
    Unauthorized,

    #[error("Order {0} not found")]
    UnknownOrder(String),

    #[error("Invalid {field} value: {value}")]
    InvalidStatus { field: &'static str, value: String },

    #[error("Failed to update order. Please try again.")]
    UpdateFailed(#[source] Box<DeskError>),

    #[error("Failed to update tracking number. Please try again.")]
    TrackingUpdateFailed(#[source] Box<DeskError>),
}

impl DeskError {
    /// True for the operator-facing alerts raised by failed mutations.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            DeskError::UpdateFailed(_) | DeskError::TrackingUpdateFailed(_)
        )
    }
}
