//! Device capabilities the workflow suspends on: photo sources and location.

use async_trait::async_trait;
use krishi_core::{Coordinates, ImageRef, ImageSource};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("{0} is not available on this device")]
    Unavailable(ImageSource),

    #[error("image picker failed: {0}")]
    Picker(String),

    #[error("current position could not be determined: {0}")]
    PositionUnavailable(String),
}

/// Camera and gallery access.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn request_permission(&self, source: ImageSource) -> PermissionStatus;

    /// Lets the user take or choose a photo. `Ok(None)` means they backed out.
    async fn pick(&self, source: ImageSource) -> Result<Option<ImageRef>, DeviceError>;
}

/// Foreground location access with a one-shot position read.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, DeviceError>;
}
